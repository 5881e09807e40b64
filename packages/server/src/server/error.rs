//! HTTP error mapping.
//!
//! Every failure leaving a handler passes through [`ApiError`], the only place
//! status codes are chosen. Bodies are always `{"detail": "<message>"}`.

use std::any::Any;

use axum::{
    extract::{rejection::JsonRejection, FromRequest},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

use crate::domains::compliance::ComplianceError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Compliance(#[from] ComplianceError),

    /// Request body rejected before any handler logic ran
    #[error("{message}")]
    Validation { status: StatusCode, message: String },

    #[error("{0}")]
    Unexpected(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Compliance(ComplianceError::Extraction(_)) => StatusCode::BAD_REQUEST,
            ApiError::Compliance(ComplianceError::Analysis(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::Validation { status, .. } => *status,
            ApiError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = self.to_string();

        if status.is_server_error() {
            error!(status = %status, detail = %detail, "Request failed");
        } else {
            warn!(status = %status, detail = %detail, "Request rejected");
        }

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

/// `Json` extractor whose rejections render as [`ApiError`]
#[derive(FromRequest)]
#[from_request(via(Json), rejection(ApiError))]
pub struct AppJson<T>(pub T);

/// Turn a handler panic into a 500 carrying the panic message
pub fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "Unknown internal error".to_string()
    };

    ApiError::Unexpected(message).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::compliance::{AnalysisError, ExtractionError};

    #[test]
    fn test_status_mapping() {
        let extraction: ApiError = ComplianceError::from(ExtractionError::new(
            "https://example.com",
            "timed out",
        ))
        .into();
        assert_eq!(extraction.status(), StatusCode::BAD_REQUEST);

        let analysis: ApiError =
            ComplianceError::from(AnalysisError::Model("boom".into())).into();
        assert_eq!(analysis.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let validation = ApiError::Validation {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            message: "bad url".into(),
        };
        assert_eq!(validation.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_panic_payload_becomes_unexpected_error() {
        let response = handle_panic(Box::new("worker exploded"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = handle_panic(Box::new(String::from("owned message")));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = handle_panic(Box::new(42_u8));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
