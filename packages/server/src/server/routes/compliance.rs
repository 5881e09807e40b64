use axum::{extract::Extension, Json};

use crate::domains::compliance::{check_compliance, ComplianceRequest, ComplianceResponse};
use crate::server::app::AppState;
use crate::server::error::{ApiError, AppJson};

/// `POST /check-compliance`
///
/// Fetches `url` and `policy_url`, asks the model for violations and returns
/// the report. Malformed URLs are rejected by the body extractor before any
/// fetch happens.
pub async fn check_compliance_handler(
    Extension(state): Extension<AppState>,
    AppJson(request): AppJson<ComplianceRequest>,
) -> Result<Json<ComplianceResponse>, ApiError> {
    let response = check_compliance(request, &state.deps).await?;
    Ok(Json(response))
}
