//! Multi-field search predicates for entity query scopes.
//!
//! A search narrows an existing query to rows where at least one of the
//! target fields matches a phrase. All per-field clauses land in one group:
//!
//! ```text
//! <existing constraints> AND (name LIKE '%ann%' OR email LIKE '%ann%')
//! ```
//!
//! Entity types opt in through [`Searchable`] (or a registered
//! [`SearchScope`]), declare default fields with [`SearchConfig`] and may
//! override matching for individual fields with [`FieldMatchers`].

#![forbid(unsafe_code)]

pub mod builder;
pub mod error;
pub mod matcher;
pub mod request;
pub mod scope;
pub mod settings;

pub use builder::PredicateBuilder;
pub use error::{Error, Result};
pub use matcher::{FieldMatcher, FieldMatchers};
pub use request::{FieldSpec, SearchRequest};
pub use scope::{Fields, SearchScope, Searchable};
pub use settings::{SearchConfig, SearchSettings};

pub use sift_query::{Boolean, Comparator, QueryBuilder};
