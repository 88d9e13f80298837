//! Per-field custom matchers.
//!
//! An entity type can take over matching for a field, e.g. to search a
//! computed or related value. The matcher receives the query group the field
//! would have been compared in, the trimmed phrase and the exactness flag, and
//! adds its own clauses.
//!
//! Matchers are keyed by the field name in StudlyCase, so `first_name` and
//! `firstName` resolve to the same `searchOnFirstName` matcher. Only `_`, `-`
//! and spaces separate words; qualified names such as `tags.label` keep their
//! dots and never share a key with `tags_label`.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::Result;

/// Custom matching logic for one field, called with `(query, phrase, exact)`.
pub type FieldMatcher<Q> = Arc<dyn Fn(&mut Q, &str, bool) -> Result<()> + Send + Sync>;

/// Registry of custom matchers of one entity type.
pub struct FieldMatchers<Q> {
    by_field: HashMap<String, FieldMatcher<Q>>,
}

impl<Q> FieldMatchers<Q> {
    pub fn new() -> Self {
        Self {
            by_field: HashMap::new(),
        }
    }

    /// Builder-style [`register`](Self::register).
    pub fn with<F>(mut self, field: &str, matcher: F) -> Self
    where
        F: Fn(&mut Q, &str, bool) -> Result<()> + Send + Sync + 'static,
    {
        self.register(field, matcher);
        self
    }

    /// Registers `matcher` for `field`, returning the matcher it replaces.
    pub fn register<F>(&mut self, field: &str, matcher: F) -> Option<FieldMatcher<Q>>
    where
        F: Fn(&mut Q, &str, bool) -> Result<()> + Send + Sync + 'static,
    {
        self.by_field.insert(matcher_key(field), Arc::new(matcher))
    }

    pub fn get(&self, field: &str) -> Option<&FieldMatcher<Q>> {
        self.by_field.get(&matcher_key(field))
    }

    pub fn contains(&self, field: &str) -> bool {
        self.by_field.contains_key(&matcher_key(field))
    }

    pub fn len(&self) -> usize {
        self.by_field.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_field.is_empty()
    }

    /// Conventional scope name of the matcher for `field` (`name` -> `searchOnName`).
    pub fn scope_name(field: &str) -> String {
        format!("searchOn{}", matcher_key(field))
    }
}

/// Uppercases the first letter of each word and drops the separators.
fn matcher_key(field: &str) -> String {
    field
        .split(['_', '-', ' '])
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect()
}

impl<Q> Default for FieldMatchers<Q> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Q> Clone for FieldMatchers<Q> {
    fn clone(&self) -> Self {
        Self {
            by_field: self.by_field.clone(),
        }
    }
}

impl<Q> fmt::Debug for FieldMatchers<Q> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut fields: Vec<&str> = self.by_field.keys().map(String::as_str).collect();
        fields.sort_unstable();
        f.debug_struct("FieldMatchers")
            .field("fields", &fields)
            .finish()
    }
}
