//! Typed errors for the compliance pipeline.

use thiserror::Error;

/// A page could not be fetched. Attributed to the caller.
#[derive(Debug, Error)]
#[error("{reason}")]
pub struct ExtractionError {
    pub url: String,
    pub reason: String,
}

impl ExtractionError {
    pub fn new(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            reason: reason.into(),
        }
    }
}

/// The model call or its reply was unusable. Attributed to the server.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Remote call failed (network, timeout, non-2xx)
    #[error("model request failed: {0}")]
    Model(String),

    /// Reply was not JSON or did not match the report shape
    #[error("model reply is not a valid report: {0}")]
    InvalidReply(#[from] serde_json::Error),

    /// Reply's count disagrees with its list
    #[error("model reported {reported} violations but listed {listed}")]
    InconsistentCount { reported: u32, listed: usize },
}

/// Errors from checking a page against a policy.
#[derive(Debug, Error)]
pub enum ComplianceError {
    #[error("Error fetching page: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("Error analyzing: {0}")]
    Analysis(#[from] AnalysisError),
}
