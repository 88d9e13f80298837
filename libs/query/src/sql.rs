//! Reference SQL query.
//!
//! Keeps the `WHERE` part of a `SELECT` as a predicate tree and renders it
//! either with positional bind parameters (`$1`, `$2`, ...) for execution or
//! with inline literals for logs and assertions.

use std::fmt;

use crate::bind::{push_text, BindValue};
use crate::builder::{Boolean, Comparator, QueryBuilder};

/// A node of the `WHERE` predicate tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    Comparison {
        column: String,
        comparator: Comparator,
        value: String,
    },
    /// Parenthesized subgroup.
    Group(Vec<Clause>),
}

/// A predicate together with the boolean attaching it to its predecessor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    pub boolean: Boolean,
    pub predicate: Predicate,
}

/// `SELECT * FROM <table> WHERE ...` query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlQuery {
    table: String,
    clauses: Vec<Clause>,
}

impl SqlQuery {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            clauses: Vec::new(),
        }
    }

    /// Adds an `AND`-joined constraint, for chaining the caller's own filters.
    pub fn with_comparison(mut self, column: &str, comparator: Comparator, value: &str) -> Self {
        self.push_comparison(column, comparator, value, Boolean::And);
        self
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn build_sql(&self) -> (String, Vec<BindValue>) {
        let mut sql = format!("SELECT * FROM {}", self.table);
        let mut bind_params = Vec::new();

        if !self.clauses.is_empty() {
            let mut placeholder =
                |value: &str| format!("${}", push_text(&mut bind_params, value.to_string()));
            let where_sql = render_clauses(&self.clauses, &mut placeholder);
            sql.push_str(" WHERE ");
            sql.push_str(&where_sql);
        }

        (sql, bind_params)
    }
}

impl QueryBuilder for SqlQuery {
    fn push_comparison(
        &mut self,
        column: &str,
        comparator: Comparator,
        value: &str,
        boolean: Boolean,
    ) {
        self.clauses.push(Clause {
            boolean,
            predicate: Predicate::Comparison {
                column: column.to_string(),
                comparator,
                value: value.to_string(),
            },
        });
    }

    fn push_group<E, F>(&mut self, boolean: Boolean, build: F) -> Result<(), E>
    where
        F: FnOnce(&mut Self) -> Result<(), E>,
    {
        let mut group = SqlQuery::new(self.table.clone());
        build(&mut group)?;

        if group.clauses.is_empty() {
            tracing::trace!(table = %self.table, "Dropping empty predicate group");
            return Ok(());
        }

        self.clauses.push(Clause {
            boolean,
            predicate: Predicate::Group(group.clauses),
        });
        Ok(())
    }
}

impl fmt::Display for SqlQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SELECT * FROM {}", self.table)?;
        if !self.clauses.is_empty() {
            let where_sql = render_clauses(&self.clauses, &mut quote_literal);
            write!(f, " WHERE {}", where_sql)?;
        }
        Ok(())
    }
}

fn render_clauses(clauses: &[Clause], value: &mut dyn FnMut(&str) -> String) -> String {
    let mut out = String::new();
    for (i, clause) in clauses.iter().enumerate() {
        // The leading boolean of a clause list has nothing to join.
        if i > 0 {
            out.push(' ');
            out.push_str(clause.boolean.as_sql());
            out.push(' ');
        }
        match &clause.predicate {
            Predicate::Comparison {
                column,
                comparator,
                value: v,
            } => {
                out.push_str(&format!("{} {} {}", column, comparator, value(v)));
            }
            Predicate::Group(inner) => {
                out.push('(');
                out.push_str(&render_clauses(inner, &mut *value));
                out.push(')');
            }
        }
    }
    out
}

fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}
