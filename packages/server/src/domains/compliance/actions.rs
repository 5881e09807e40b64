//! Compliance domain actions - business logic functions

use tracing::info;

use super::analyzer::analyze_compliance;
use super::error::ComplianceError;
use super::extractor::extract_page_text;
use super::models::{ComplianceRequest, ComplianceResponse};
use crate::kernel::ServerDeps;

/// Check a page against a policy page.
///
/// Both pages are fetched concurrently; the model is only called once both
/// have been extracted. Any failure aborts the whole check.
pub async fn check_compliance(
    request: ComplianceRequest,
    deps: &ServerDeps,
) -> Result<ComplianceResponse, ComplianceError> {
    info!(url = %request.url, policy_url = %request.policy_url, "Checking compliance");

    let fetcher = deps.page_fetcher.as_ref();
    let (page_content, policy_content) = tokio::try_join!(
        extract_page_text(fetcher, &request.url),
        extract_page_text(fetcher, &request.policy_url),
    )?;

    let compliance_result =
        analyze_compliance(deps.ai.as_ref(), &page_content, &policy_content).await?;

    Ok(ComplianceResponse {
        url_analyzed: request.url,
        checked_against: request.policy_url,
        compliance_result,
    })
}
