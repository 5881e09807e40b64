//! Compliance request, report and response types.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use url::Url;

// =============================================================================
// Page URLs
// =============================================================================

/// Why a submitted URL was rejected
#[derive(Debug, Error)]
pub enum InvalidUrl {
    #[error("invalid URL: {0}")]
    Parse(#[from] url::ParseError),

    #[error("URL scheme should be 'http' or 'https', got '{0}'")]
    Scheme(String),
}

/// An absolute http(s) URL that keeps the caller's original spelling.
///
/// Serializes back to exactly what was submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PageUrl {
    raw: String,
    parsed: Url,
}

impl PageUrl {
    pub fn parse(raw: impl Into<String>) -> Result<Self, InvalidUrl> {
        let raw = raw.into();
        let parsed = Url::parse(raw.trim())?;

        match parsed.scheme() {
            "http" | "https" => {}
            other => return Err(InvalidUrl::Scheme(other.to_string())),
        }

        Ok(Self { raw, parsed })
    }

    /// The URL as submitted
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The parsed, normalized form used for requests
    pub fn url(&self) -> &Url {
        &self.parsed
    }
}

impl TryFrom<String> for PageUrl {
    type Error = InvalidUrl;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::parse(raw)
    }
}

impl From<PageUrl> for String {
    fn from(url: PageUrl) -> Self {
        url.raw
    }
}

impl fmt::Display for PageUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

// =============================================================================
// Request / Response
// =============================================================================

/// Body of `POST /check-compliance`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplianceRequest {
    pub url: PageUrl,
    pub policy_url: PageUrl,
}

/// Successful response envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceResponse {
    pub url_analyzed: PageUrl,
    pub checked_against: PageUrl,
    pub compliance_result: ComplianceReport,
}

// =============================================================================
// Model output
// =============================================================================

/// The severity level of the violation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

/// A single discrepancy between the page and the policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ViolationRecord {
    /// The specific section of the policy that was violated
    pub policy_section: String,
    /// Detailed description of the violation
    pub violation_description: String,
    /// An example from the webpage content illustrating the issue
    pub example: String,
    /// Suggested solution to address the violation
    pub recommended_fix: String,
    pub severity: Severity,
}

/// Compliance check results for one page against one policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ComplianceReport {
    /// All the violations found in the webpage. If no violations are present, return an empty array.
    pub violations: Vec<ViolationRecord>,
    /// Total number of violations found
    pub total_violations: u32,
    /// A high-level summary of the compliance check results.
    pub summary: String,
}

impl ComplianceReport {
    /// Whether `total_violations` agrees with the violations listed
    pub fn is_consistent(&self) -> bool {
        self.total_violations as usize == self.violations.len()
    }
}
