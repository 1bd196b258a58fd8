//! GROQ Query - chainable query builder for GROQ document APIs
//!
//! This crate provides the foundational types for assembling GROQ document
//! queries, including filters, projections, ordering, and slicing.

pub mod errors;
pub mod prelude;
pub mod query_builder;

pub use errors::QueryError;
pub use query_builder::{
    Filter, Join, Projection, ProjectionValue, Query, QueryChain, QueryOptions, Slice, SortOrder,
    DRAFT_EXCLUSION, FOLLOW,
};
