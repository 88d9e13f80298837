//! Searches against a second `QueryBuilder` implementation that evaluates
//! predicates over in-memory rows, checking the "any field matches" semantics
//! rather than the rendered SQL.

use std::collections::HashMap;

use sift_query::{Boolean, Comparator, QueryBuilder};
use sift_search::{Fields, SearchConfig, SearchScope};

type Row = HashMap<&'static str, &'static str>;

#[derive(Debug, Default)]
struct RowFilter {
    clauses: Vec<(Boolean, Node)>,
}

#[derive(Debug)]
enum Node {
    Compare {
        column: String,
        comparator: Comparator,
        value: String,
    },
    Group(RowFilter),
}

impl QueryBuilder for RowFilter {
    fn push_comparison(
        &mut self,
        column: &str,
        comparator: Comparator,
        value: &str,
        boolean: Boolean,
    ) {
        self.clauses.push((
            boolean,
            Node::Compare {
                column: column.to_string(),
                comparator,
                value: value.to_string(),
            },
        ));
    }

    fn push_group<E, F>(&mut self, boolean: Boolean, build: F) -> Result<(), E>
    where
        F: FnOnce(&mut Self) -> Result<(), E>,
    {
        let mut group = RowFilter::default();
        build(&mut group)?;
        if !group.clauses.is_empty() {
            self.clauses.push((boolean, Node::Group(group)));
        }
        Ok(())
    }
}

impl RowFilter {
    /// AND binds tighter than OR, as in SQL.
    fn matches(&self, row: &Row) -> bool {
        let mut any = false;
        let mut term = true;
        for (i, (boolean, node)) in self.clauses.iter().enumerate() {
            if i > 0 && *boolean == Boolean::Or {
                any |= term;
                term = true;
            }
            term &= node.matches(row);
        }
        self.clauses.is_empty() || any || term
    }
}

impl Node {
    fn matches(&self, row: &Row) -> bool {
        match self {
            Self::Compare {
                column,
                comparator,
                value,
            } => {
                let Some(cell) = row.get(column.as_str()) else {
                    return false;
                };
                match comparator {
                    Comparator::Equals => *cell == value.as_str(),
                    Comparator::Like => like(cell, value),
                }
            }
            Self::Group(group) => group.matches(row),
        }
    }
}

/// `LIKE` with `%` wildcards only.
fn like(cell: &str, pattern: &str) -> bool {
    let parts: Vec<&str> = pattern.split('%').collect();
    let (first, rest) = parts.split_first().expect("split yields at least one part");
    let Some(mut remaining) = cell.strip_prefix(first) else {
        return false;
    };
    let Some((last, middle)) = rest.split_last() else {
        return remaining.is_empty();
    };
    for part in middle {
        match remaining.find(part) {
            Some(pos) => remaining = &remaining[pos + part.len()..],
            None => return false,
        }
    }
    remaining.ends_with(last)
}

fn people() -> Vec<Row> {
    [
        ("Ann Lee", "lee@example.com", "Oslo"),
        ("Bob", "bob@example.com", "Lima"),
        ("Joanna", "jo@example.org", "Oslo"),
        ("Carl", "hannah@example.com", "Lima"),
    ]
    .into_iter()
    .map(|(name, email, city)| HashMap::from([("name", name), ("email", email), ("city", city)]))
    .collect()
}

fn names(filter: &RowFilter) -> Vec<&'static str> {
    people()
        .into_iter()
        .filter(|row| filter.matches(row))
        .map(|row| row["name"])
        .collect()
}

fn scope() -> SearchScope<RowFilter> {
    SearchScope::new("Person")
        .with_config(SearchConfig::with_default_fields(["name", "email"]))
}

#[test]
fn like_helper_handles_wildcards() {
    assert!(like("Joanna", "%ann%"));
    assert!(like("Ann", "Ann%"));
    assert!(like("Ann", "%nn"));
    assert!(!like("Ann", "%An"));
    assert!(like("Ann", "Ann"));
    assert!(!like("Anna", "Ann"));
}

#[test]
fn any_matching_field_selects_the_row() {
    let mut filter = RowFilter::default();

    scope().search(Some(&mut filter), "ann", Fields::none(), false).unwrap();

    assert_eq!(names(&filter), vec!["Joanna", "Carl"]);
}

#[test]
fn search_group_is_anded_with_existing_filters() {
    let mut filter = RowFilter::default();
    filter.push_comparison("city", Comparator::Equals, "Oslo", Boolean::And);

    scope().search(Some(&mut filter), "ann", Fields::none(), false).unwrap();

    assert_eq!(names(&filter), vec!["Joanna"]);
}

#[test]
fn exact_search_requires_whole_value() {
    let mut filter = RowFilter::default();
    scope().search(Some(&mut filter), "Bo", "name", true).unwrap();
    assert!(names(&filter).is_empty());

    let mut filter = RowFilter::default();
    scope().search(Some(&mut filter), " Bob ", "name", true).unwrap();
    assert_eq!(names(&filter), vec!["Bob"]);
}

#[test]
fn matcher_slot_counts_as_one_alternative() {
    let scope = scope().with_matcher(
        "name",
        |q: &mut RowFilter, phrase: &str, _exact: bool| {
            // Names are matched by prefix only.
            let prefix = format!("{}%", phrase);
            q.push_comparison("name", Comparator::Like, &prefix, Boolean::And);
            Ok(())
        },
    );
    let mut filter = RowFilter::default();
    filter.push_comparison("city", Comparator::Equals, "Lima", Boolean::And);

    scope.search(Some(&mut filter), "Bo", Fields::none(), false).unwrap();

    assert_eq!(names(&filter), vec!["Bob"]);
}
