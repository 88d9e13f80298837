use std::fmt;
use std::sync::Arc;

use sift_query::Comparator;

use crate::matcher::FieldMatcher;
use crate::Result;

const WILDCARD: char = '%';

/// A field to search on.
pub enum FieldSpec<Q> {
    /// Plain field name, compared directly unless the entity registers a
    /// matcher for it.
    Column(String),
    /// Inline matcher, called in place of a comparison.
    Matcher(FieldMatcher<Q>),
}

impl<Q> FieldSpec<Q> {
    pub fn column(name: impl Into<String>) -> Self {
        Self::Column(name.into())
    }

    pub fn matcher<F>(matcher: F) -> Self
    where
        F: Fn(&mut Q, &str, bool) -> Result<()> + Send + Sync + 'static,
    {
        Self::Matcher(Arc::new(matcher))
    }

    pub fn as_column(&self) -> Option<&str> {
        match self {
            Self::Column(name) => Some(name),
            Self::Matcher(_) => None,
        }
    }
}

impl<Q> From<&str> for FieldSpec<Q> {
    fn from(name: &str) -> Self {
        Self::Column(name.to_string())
    }
}

impl<Q> From<String> for FieldSpec<Q> {
    fn from(name: String) -> Self {
        Self::Column(name)
    }
}

impl<Q> Clone for FieldSpec<Q> {
    fn clone(&self) -> Self {
        match self {
            Self::Column(name) => Self::Column(name.clone()),
            Self::Matcher(matcher) => Self::Matcher(Arc::clone(matcher)),
        }
    }
}

impl<Q> fmt::Debug for FieldSpec<Q> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Column(name) => f.debug_tuple("Column").field(name).finish(),
            Self::Matcher(_) => f.write_str("Matcher(..)"),
        }
    }
}

/// Everything needed to build one search predicate.
///
/// The phrase is trimmed on construction. Validation (non-empty fields)
/// happens when the request is built.
pub struct SearchRequest<Q> {
    entity: String,
    fields: Vec<FieldSpec<Q>>,
    phrase: String,
    exact: bool,
}

impl<Q> SearchRequest<Q> {
    pub fn new(
        entity: impl Into<String>,
        fields: Vec<FieldSpec<Q>>,
        phrase: &str,
        exact: bool,
    ) -> Self {
        Self {
            entity: entity.into(),
            fields,
            phrase: phrase.trim().to_string(),
            exact,
        }
    }

    /// Entity type being searched, used in diagnostics.
    pub fn entity(&self) -> &str {
        &self.entity
    }

    pub fn fields(&self) -> &[FieldSpec<Q>] {
        &self.fields
    }

    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    pub fn exact(&self) -> bool {
        self.exact
    }

    pub fn comparator(&self) -> Comparator {
        if self.exact {
            Comparator::Equals
        } else {
            Comparator::Like
        }
    }

    /// Value compared against plain fields.
    ///
    /// Non-exact searches wrap the phrase in `%` on both ends. `%` and `_`
    /// already in the phrase are not escaped and keep their pattern meaning.
    pub fn search_value(&self) -> String {
        if self.exact {
            self.phrase.clone()
        } else {
            format!("{WILDCARD}{}{WILDCARD}", self.phrase)
        }
    }
}

impl<Q> fmt::Debug for SearchRequest<Q> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchRequest")
            .field("entity", &self.entity)
            .field("fields", &self.fields)
            .field("phrase", &self.phrase)
            .field("exact", &self.exact)
            .finish()
    }
}
