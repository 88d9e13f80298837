//! Query builder interface used by sift searches.
//!
//! Searches never talk to a database. They append predicates to a caller-owned
//! query through the [`QueryBuilder`] trait, which any ORM or SQL builder can
//! implement. [`SqlQuery`] is the reference implementation: it keeps a
//! predicate tree and renders it to SQL with positional bind parameters.

#![forbid(unsafe_code)]

mod bind;
mod builder;
mod sql;

pub use bind::BindValue;
pub use builder::{Boolean, Comparator, QueryBuilder};
pub use sql::{Clause, Predicate, SqlQuery};
