//! Kernel module - server infrastructure and dependencies.

pub mod ai;
pub mod deps;
pub mod page_fetcher;
pub mod test_dependencies;
pub mod traits;

pub use ai::HostedModel;
pub use deps::ServerDeps;
pub use page_fetcher::{HttpPageFetcher, BROWSER_USER_AGENT, DEFAULT_FETCH_TIMEOUT};
pub use test_dependencies::{MockAI, MockPageFetcher, StructuredCallArgs, TestDependencies};
pub use traits::*;
