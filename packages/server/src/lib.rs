// Compliance Checker - API Core
//
// Fetches a webpage and a policy page, reduces both to plain text, and asks a
// hosted model whether the page violates the policy.

pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
