//! Compliance domain - checks a webpage against a policy page.
//!
//! Extraction turns each page into flat text; analysis hands both texts to a
//! hosted model and parses its structured verdict.

pub mod actions;
pub mod analyzer;
pub mod error;
pub mod extractor;
pub mod models;

pub use actions::check_compliance;
pub use error::{AnalysisError, ComplianceError, ExtractionError};
pub use models::*;
