//! Query builder utilities
//!
//! This module provides GROQ query construction utilities.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::QueryError;
use crate::query_builder::filter::{Filter, DRAFT_EXCLUSION};
use crate::query_builder::groq_generation::GroqGenerator;
use crate::query_builder::projection::Projection;
use crate::query_builder::slicing::Slice;

/// Options accepted by [`Query::new`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryOptions {
    /// Keep draft documents in the result set
    pub include_drafts: bool,
    /// Root expression the query is built on
    pub base_query: String,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            include_drafts: false,
            base_query: "*".to_string(),
        }
    }
}

/// Query state for constructing GROQ document queries
///
/// Every mutation consumes the state and returns a fresh value, so callers
/// thread a `Result<Query, QueryError>` through the chain (see
/// [`QueryChain`]) and surface failures at build time.
///
/// # Example
///
/// ```
/// use groq_query::prelude::*;
///
/// let query = Query::default()
///     .filter(json!({"_type": "'post'"}))
///     .project(json!(["title", "body"]))
///     .build()
///     .unwrap();
///
/// assert_eq!(query, "*[!(_id in path('drafts.**')) && _type == 'post']{title, body}");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub(crate) base_query: String,
    pub(crate) filters: Vec<Filter>,
    pub(crate) projections: Vec<Projection>,
    pub(crate) qualifier: String,
    pub(crate) order: Vec<String>,
    pub(crate) limit: Slice,
}

impl Query {
    /// Create a query over `options.base_query`, seeding the draft-exclusion
    /// filter unless drafts are opted in or the base query is empty.
    pub fn new(options: QueryOptions) -> Self {
        let mut filters = Vec::new();
        if !options.include_drafts && !options.base_query.is_empty() {
            filters.push(Filter::raw(DRAFT_EXCLUSION));
        }

        Self {
            base_query: options.base_query,
            filters,
            projections: Vec::new(),
            qualifier: String::new(),
            order: Vec::new(),
            limit: Slice::None,
        }
    }

    /// Append filter conditions.
    ///
    /// Accepts a two-element `[key, value]` pair, a single map, or a list of
    /// maps and nested lists of maps.
    pub fn filter(mut self, input: Value) -> Result<Query, QueryError> {
        match Filter::parse(&input) {
            Some(filters) => {
                self.filters.extend(filters);
                Ok(self)
            }
            None => Err(QueryError::InvalidFilter(self)),
        }
    }

    /// Append a typed filter condition directly.
    pub fn filter_node(mut self, filter: Filter) -> Query {
        self.filters.push(filter);
        self
    }

    /// Append projection entries.
    ///
    /// Accepts a string, a list (appended element-wise), or a map of alias
    /// entries.
    pub fn project(mut self, input: Value) -> Result<Query, QueryError> {
        match Projection::parse(&input) {
            Some(projections) => {
                self.projections.extend(projections);
                Ok(self)
            }
            None => Err(QueryError::InvalidProjection(self)),
        }
    }

    /// Append a typed projection entry directly.
    pub fn project_node(mut self, projection: Projection) -> Query {
        self.projections.push(projection);
        self
    }

    /// Set the raw scope qualifier appended after the projection.
    pub fn qualify(mut self, input: Value) -> Result<Query, QueryError> {
        match input {
            Value::String(qualifier) => {
                self.qualifier = qualifier;
                Ok(self)
            }
            _ => Err(QueryError::InvalidQualifier(self)),
        }
    }

    /// Set ordering terms, replacing any previous order.
    pub fn set_order(mut self, input: Value) -> Result<Query, QueryError> {
        let order = match &input {
            Value::String(term) => vec![term.clone()],
            Value::Array(items) => {
                let mut order = Vec::with_capacity(items.len());
                for item in items {
                    match item.as_str() {
                        Some(term) => order.push(term.to_string()),
                        None => return Err(QueryError::InvalidOrder(self)),
                    }
                }
                order
            }
            _ => return Err(QueryError::InvalidOrder(self)),
        };

        self.order = order;
        Ok(self)
    }

    /// Set the slice window, replacing any previous limit.
    ///
    /// A limit of `0` (or a `[0, 0]` window) is a no-op that leaves the
    /// query unsliced.
    pub fn set_limit(mut self, input: Value) -> Result<Query, QueryError> {
        match &input {
            Value::Number(number) => match number.as_u64() {
                Some(0) => Ok(self),
                Some(count) => {
                    self.limit = Slice::Count(count);
                    Ok(self)
                }
                None => Err(QueryError::InvalidLimit(self)),
            },
            Value::Array(items) => {
                let window = match items.as_slice() {
                    [Value::Number(offset), Value::Number(count)] => {
                        match (offset.as_u64(), count.as_u64()) {
                            (Some(offset), Some(count)) => Some((offset, count)),
                            _ => None,
                        }
                    }
                    _ => None,
                };

                match window {
                    Some((0, 0)) => Ok(self),
                    Some((_, 0)) => Err(QueryError::InvalidLimit(self)),
                    Some((offset, count)) => {
                        self.limit = Slice::Page { offset, count };
                        Ok(self)
                    }
                    None => Err(QueryError::InvalidLimit(self)),
                }
            }
            _ => Err(QueryError::InvalidLimit(self)),
        }
    }

    /// Compile the query state into its GROQ string.
    ///
    /// Assembly order is fixed: base query, filter clause, projection
    /// clause, qualifier, order clause, slice clause.
    pub fn build(&self) -> String {
        let filter_clause = GroqGenerator::build_filter_clause(&self.filters);

        let mut query = self.base_query.clone();
        if !filter_clause.is_empty() {
            query.push('[');
            query.push_str(&filter_clause);
            query.push(']');
        }
        query.push_str(&GroqGenerator::build_projection_clause(
            &self.projections,
            !filter_clause.is_empty(),
        ));
        query.push_str(&self.qualifier);
        query.push_str(&GroqGenerator::build_order_clause(&self.order));
        query.push_str(&GroqGenerator::build_slice_clause(&self.limit));

        tracing::debug!("[BUILD] GROQ: {}", query);
        query
    }
}

impl Default for Query {
    fn default() -> Self {
        Self::new(QueryOptions::default())
    }
}

/// Chainable mutations over `Result<Query, QueryError>`.
///
/// Every operation passes a carried error through unchanged, so a faulty
/// call anywhere in a chain short-circuits the rest and surfaces at
/// [`QueryChain::build`].
pub trait QueryChain {
    fn filter(self, input: Value) -> Result<Query, QueryError>;
    fn project(self, input: Value) -> Result<Query, QueryError>;
    fn qualify(self, input: Value) -> Result<Query, QueryError>;
    fn set_order(self, input: Value) -> Result<Query, QueryError>;
    fn set_limit(self, input: Value) -> Result<Query, QueryError>;

    /// Compile the chain, propagating any carried error.
    fn build(self) -> Result<String, QueryError>;

    /// Compile the chain, panicking with the carried error's message. The
    /// single fault-reporting boundary of the builder.
    fn build_or_panic(self) -> String;
}

impl QueryChain for Result<Query, QueryError> {
    fn filter(self, input: Value) -> Result<Query, QueryError> {
        self.and_then(|query| query.filter(input))
    }

    fn project(self, input: Value) -> Result<Query, QueryError> {
        self.and_then(|query| query.project(input))
    }

    fn qualify(self, input: Value) -> Result<Query, QueryError> {
        self.and_then(|query| query.qualify(input))
    }

    fn set_order(self, input: Value) -> Result<Query, QueryError> {
        self.and_then(|query| query.set_order(input))
    }

    fn set_limit(self, input: Value) -> Result<Query, QueryError> {
        self.and_then(|query| query.set_limit(input))
    }

    fn build(self) -> Result<String, QueryError> {
        self.map(|query| query.build())
    }

    fn build_or_panic(self) -> String {
        match QueryChain::build(self) {
            Ok(query) => query,
            Err(error) => panic!("{}", error),
        }
    }
}
