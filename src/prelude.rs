//! Convenience re-exports for common groq-query usage

// Core builder types
pub use crate::query_builder::{Query, QueryChain, QueryOptions};

// Query IR types
pub use crate::query_builder::{
    Filter, Join, Projection, ProjectionValue, Slice, SortOrder, DRAFT_EXCLUSION, FOLLOW,
};

// Error types
pub use crate::errors::QueryError;

// Common external dependencies that are frequently used
pub use serde_json::{json, Value};
