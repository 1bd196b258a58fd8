//! Query builder utilities
//!
//! This module renders the query IR into GROQ clause strings.

use crate::query_builder::filter::Filter;
use crate::query_builder::projection::{Projection, ProjectionValue};
use crate::query_builder::slicing::Slice;

pub struct GroqGenerator;

impl GroqGenerator {
    /// Render top-level filters joined by ` && `. An empty list renders to
    /// an empty string so the assembler skips the bracket entirely.
    pub fn build_filter_clause(filters: &[Filter]) -> String {
        filters
            .iter()
            .map(Self::render_filter)
            .collect::<Vec<_>>()
            .join(" && ")
    }

    fn render_filter(filter: &Filter) -> String {
        match filter {
            Filter::Raw(expression) => expression.clone(),
            Filter::Pair { key, value } => format!("{} == {}", key, value),
            Filter::Cmp {
                key,
                operator,
                value,
                negate,
            } => {
                if *negate {
                    format!("!({} {} {})", key, operator, value)
                } else {
                    format!("{} {} {}", key, operator, value)
                }
            }
            Filter::Nest { key, children } => {
                let inner = children
                    .iter()
                    .map(Self::render_filter)
                    .collect::<Vec<_>>()
                    .join(" && ");
                format!("{}({})", key, inner)
            }
            Filter::Group {
                join,
                negate,
                children,
            } => {
                let joiner = format!(" {} ", join.to_groq());
                let inner = children
                    .iter()
                    .map(Self::render_filter)
                    .collect::<Vec<_>>()
                    .join(&joiner);
                if *negate {
                    format!("!({})", inner)
                } else {
                    format!("({})", inner)
                }
            }
        }
    }

    /// Render the projection clause.
    ///
    /// A single bare field preceded by a non-empty filter clause renders as
    /// `.field`; everything else renders inside braces. An empty list
    /// renders to an empty string.
    pub fn build_projection_clause(
        projections: &[Projection],
        has_preceding_clause: bool,
    ) -> String {
        if projections.is_empty() {
            return String::new();
        }

        if let [Projection::Field(name)] = projections {
            if has_preceding_clause {
                return format!(".{}", name);
            }
        }

        let items = projections
            .iter()
            .map(Self::render_projection)
            .collect::<Vec<_>>()
            .join(", ");
        format!("{{{}}}", items)
    }

    fn render_projection(projection: &Projection) -> String {
        match projection {
            Projection::Field(name) => name.clone(),
            // two-element pairs render nested lists without braces
            Projection::Pair { key, value } => {
                format!("{}:{}", key, Self::render_projection_value(value))
            }
            Projection::FollowPair { key, value, follow } => {
                let joiner = if *follow { "->" } else { ":" };
                match value {
                    ProjectionValue::Field(name) => format!("{}{}{}", key, joiner, name),
                    ProjectionValue::List(_) => format!(
                        "{}{}{{{}}}",
                        key,
                        joiner,
                        Self::render_projection_value(value)
                    ),
                }
            }
            Projection::Nested {
                alias,
                joiner,
                children,
            } => {
                let inner = children
                    .iter()
                    .map(Self::render_projection)
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("{}{}{{{}}}", alias, joiner, inner)
            }
        }
    }

    fn render_projection_value(value: &ProjectionValue) -> String {
        match value {
            ProjectionValue::Field(name) => name.clone(),
            ProjectionValue::List(children) => children
                .iter()
                .map(Self::render_projection)
                .collect::<Vec<_>>()
                .join(", "),
        }
    }

    /// Render ` | order(a, b)` or an empty string.
    pub fn build_order_clause(order: &[String]) -> String {
        if order.is_empty() {
            return String::new();
        }

        format!(" | order({})", order.join(", "))
    }

    /// Render the trailing slice window.
    pub fn build_slice_clause(limit: &Slice) -> String {
        match limit {
            Slice::None => String::new(),
            Slice::Count(count) => format!(" [0...{}]", count),
            Slice::Page { offset, count } => format!(" [{}...{}]", offset, offset + count),
        }
    }
}
