// Business domains
pub mod compliance;
