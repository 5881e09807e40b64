// HTTP routes
pub mod compliance;
pub mod health;

pub use compliance::*;
pub use health::*;
