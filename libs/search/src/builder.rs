//! Search predicate construction.
//!
//! Appends one group to the query, with one slot per requested field:
//!
//! ```text
//! AND (f1 <cmp> v OR f2 <cmp> v OR (<clauses of a custom matcher>) ...)
//! ```
//!
//! The first slot attaches with `AND`, the rest with `OR`. A field with a
//! custom matcher gets a nested group holding whatever the matcher adds.

use sift_query::{Boolean, Comparator, QueryBuilder};

use crate::error::{Error, Result};
use crate::matcher::{FieldMatcher, FieldMatchers};
use crate::request::{FieldSpec, SearchRequest};

/// Builds search predicates, consulting an entity's custom matchers.
pub struct PredicateBuilder<'m, Q> {
    matchers: Option<&'m FieldMatchers<Q>>,
}

impl<'m, Q: QueryBuilder> PredicateBuilder<'m, Q> {
    /// Builder that compares every plain field directly.
    pub fn new() -> Self {
        Self { matchers: None }
    }

    pub fn with_matchers(matchers: &'m FieldMatchers<Q>) -> Self {
        Self {
            matchers: Some(matchers),
        }
    }

    /// Appends the search group for `request` to `query` and hands the query back.
    ///
    /// Errors from custom matchers are returned unchanged. The query is left
    /// as it was when any field fails, as long as the query builder discards
    /// failed groups.
    pub fn build<'q>(
        &self,
        request: &SearchRequest<Q>,
        query: Option<&'q mut Q>,
    ) -> Result<&'q mut Q> {
        let query = query.ok_or(Error::MissingQuery)?;

        if request.fields().is_empty() {
            return Err(Error::MissingFields {
                entity: request.entity().to_string(),
            });
        }

        let comparator = request.comparator();
        let value = request.search_value();

        tracing::debug!(
            entity = %request.entity(),
            fields = request.fields().len(),
            exact = request.exact(),
            "Building search predicate"
        );

        query.push_group(Boolean::And, |group| -> Result<()> {
            let mut boolean = Boolean::And;
            for field in request.fields() {
                self.push_field(group, request, field, comparator, &value, boolean)?;
                boolean = Boolean::Or;
            }
            Ok(())
        })?;

        Ok(query)
    }

    fn push_field(
        &self,
        group: &mut Q,
        request: &SearchRequest<Q>,
        field: &FieldSpec<Q>,
        comparator: Comparator,
        value: &str,
        boolean: Boolean,
    ) -> Result<()> {
        match field {
            FieldSpec::Column(column) => match self.matcher_for(column) {
                Some(matcher) => {
                    tracing::trace!(
                        entity = %request.entity(),
                        field = %column,
                        scope = %FieldMatchers::<Q>::scope_name(column),
                        "Delegating field to custom matcher"
                    );
                    invoke_matcher(group, matcher, request, boolean)
                }
                None => {
                    tracing::trace!(
                        entity = %request.entity(),
                        field = %column,
                        comparator = %comparator,
                        "Comparing field"
                    );
                    group.push_comparison(column, comparator, value, boolean);
                    Ok(())
                }
            },
            FieldSpec::Matcher(matcher) => {
                tracing::trace!(entity = %request.entity(), "Invoking inline matcher");
                invoke_matcher(group, matcher, request, boolean)
            }
        }
    }

    fn matcher_for(&self, column: &str) -> Option<&'m FieldMatcher<Q>> {
        self.matchers.and_then(|matchers| matchers.get(column))
    }
}

fn invoke_matcher<Q: QueryBuilder>(
    group: &mut Q,
    matcher: &FieldMatcher<Q>,
    request: &SearchRequest<Q>,
    boolean: Boolean,
) -> Result<()> {
    group.push_group(boolean, |slot| matcher(slot, request.phrase(), request.exact()))
}

impl<Q: QueryBuilder> Default for PredicateBuilder<'_, Q> {
    fn default() -> Self {
        Self::new()
    }
}
