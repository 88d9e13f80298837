use std::fmt;

/// Comparison operator of a single clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Comparator {
    /// Literal equality (`=`).
    Equals,
    /// Pattern match with `%` wildcards (`LIKE`).
    Like,
}

impl Comparator {
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Equals => "=",
            Self::Like => "LIKE",
        }
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// Boolean joiner attaching a clause to the ones before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Boolean {
    And,
    Or,
}

impl Boolean {
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
        }
    }
}

impl fmt::Display for Boolean {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// Minimal capability set a query must offer to be searched.
///
/// Implementors append clauses in call order. The boolean of the first clause
/// in a clause list (the whole query, or one group) only matters once more
/// clauses follow it.
pub trait QueryBuilder {
    /// Appends `column <comparator> value`, joined with `boolean`.
    fn push_comparison(
        &mut self,
        column: &str,
        comparator: Comparator,
        value: &str,
        boolean: Boolean,
    );

    /// Appends a parenthesized subgroup joined with `boolean`.
    ///
    /// `build` receives an empty query of the same kind and fills the group.
    /// When `build` fails the error is returned as-is and nothing is appended.
    /// A group that ends up empty is dropped.
    fn push_group<E, F>(&mut self, boolean: Boolean, build: F) -> Result<(), E>
    where
        F: FnOnce(&mut Self) -> Result<(), E>;
}
