//! Error types for the groq-query crate
//!
//! This module contains all error types that can be returned by builder mutations.

use thiserror::Error;

use crate::query_builder::Query;

/// Validation failures raised by builder mutations.
///
/// Each variant carries the last-known-good query state from before the
/// failing call, so an errored chain can be inspected or resumed by the
/// caller. Errors stay plain values until [`crate::query_builder::QueryChain::build_or_panic`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QueryError {
    #[error("Filters must be a list of maps or nested lists of maps")]
    InvalidFilter(Query),

    #[error("Projections must be a string, list of strings, or nested maps")]
    InvalidProjection(Query),

    #[error("Qualifier must be a string")]
    InvalidQualifier(Query),

    #[error("Order must be a string or a list of strings")]
    InvalidOrder(Query),

    #[error("Limit must be a positive integer or a tuple of {{offset, limit}} where both are > 0")]
    InvalidLimit(Query),
}

impl QueryError {
    /// The frozen query state from before the failing mutation.
    pub fn query(&self) -> &Query {
        match self {
            QueryError::InvalidFilter(query)
            | QueryError::InvalidProjection(query)
            | QueryError::InvalidQualifier(query)
            | QueryError::InvalidOrder(query)
            | QueryError::InvalidLimit(query) => query,
        }
    }

    /// Consume the error and recover the frozen query state.
    pub fn into_query(self) -> Query {
        match self {
            QueryError::InvalidFilter(query)
            | QueryError::InvalidProjection(query)
            | QueryError::InvalidQualifier(query)
            | QueryError::InvalidOrder(query)
            | QueryError::InvalidLimit(query) => query,
        }
    }
}
