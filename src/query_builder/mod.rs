//! Query builder utilities
//!
//! This module provides GROQ query construction utilities.

pub mod builder;
pub mod filter;
pub mod groq_generation;
pub mod ordering;
pub mod projection;
pub mod slicing;


#[cfg(test)]
mod integration_tests;

// Re-export main types
pub use builder::{Query, QueryChain, QueryOptions};
pub use filter::{Filter, Join, DRAFT_EXCLUSION};
pub use ordering::SortOrder;
pub use projection::{Projection, ProjectionValue, FOLLOW};
pub use slicing::Slice;
