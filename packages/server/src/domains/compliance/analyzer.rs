//! Compliance analysis via a hosted model
//!
//! Sends the policy and page text with a fixed instruction and the report
//! schema, then parses the reply into a [`ComplianceReport`].

use openai_client::{strip_code_blocks, truncate_to_char_boundary, StructuredOutput};
use tracing::{debug, info, warn};

use super::error::AnalysisError;
use super::models::ComplianceReport;
use crate::kernel::BaseAI;

pub const SYSTEM_PROMPT: &str = "You are a compliance checker that analyzes webpage content against compliance policies. Provide detailed violations in a structured format.";

/// Low sampling temperature; the same input should give a stable verdict
pub const ANALYSIS_TEMPERATURE: f32 = 0.2;

/// User message embedding both texts verbatim
pub fn build_user_prompt(page_content: &str, policy_content: &str) -> String {
    format!(
        "Analyze this webpage content against the compliance policy.\n\n\
         COMPLIANCE POLICY:\n{}\n\n\
         WEBPAGE CONTENT:\n{}\n",
        policy_content, page_content
    )
}

/// Ask the model whether `page_content` violates `policy_content`.
pub async fn analyze_compliance(
    ai: &dyn BaseAI,
    page_content: &str,
    policy_content: &str,
) -> Result<ComplianceReport, AnalysisError> {
    let schema = ComplianceReport::openai_schema();
    let user_prompt = build_user_prompt(page_content, policy_content);

    debug!(
        model = %ai.model(),
        page_chars = page_content.len(),
        policy_chars = policy_content.len(),
        "Requesting compliance analysis"
    );

    let reply = ai
        .generate_structured(SYSTEM_PROMPT, &user_prompt, schema, ANALYSIS_TEMPERATURE)
        .await
        .map_err(|e| AnalysisError::Model(format!("{:#}", e)))?;

    let report = parse_report(&reply).inspect_err(|e| {
        warn!(
            error = %e,
            reply = %truncate_to_char_boundary(&reply, 500),
            "Unusable model reply"
        );
    })?;

    info!(
        model = %ai.model(),
        total_violations = report.total_violations,
        "Compliance analysis complete"
    );

    Ok(report)
}

/// Parse a model reply into a report, rejecting inconsistent counts.
pub fn parse_report(reply: &str) -> Result<ComplianceReport, AnalysisError> {
    let report: ComplianceReport = serde_json::from_str(strip_code_blocks(reply))?;

    if !report.is_consistent() {
        return Err(AnalysisError::InconsistentCount {
            reported: report.total_violations,
            listed: report.violations.len(),
        });
    }

    Ok(report)
}
