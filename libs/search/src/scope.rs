//! Entry point used by entity query scopes.
//!
//! [`SearchScope::search`] decides whether a search runs at all and which
//! fields it covers before handing over to [`PredicateBuilder`]:
//!
//! 1. A blank phrase leaves the query untouched.
//! 2. Fields given by the caller win.
//! 3. Otherwise the entity's configured default fields are used.
//! 4. With neither, the search fails with [`Error::NoSearchFields`].

use sift_query::QueryBuilder;

use crate::builder::PredicateBuilder;
use crate::error::{Error, Result};
use crate::matcher::FieldMatchers;
use crate::request::{FieldSpec, SearchRequest};
use crate::settings::SearchConfig;

/// Fields named by the caller of a search. Empty means "use the defaults".
pub struct Fields<Q>(Vec<FieldSpec<Q>>);

impl<Q> Fields<Q> {
    pub fn none() -> Self {
        Self(Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_vec(self) -> Vec<FieldSpec<Q>> {
        self.0
    }
}

impl<Q> Default for Fields<Q> {
    fn default() -> Self {
        Self::none()
    }
}

impl<Q> From<&str> for Fields<Q> {
    fn from(field: &str) -> Self {
        if field.is_empty() {
            Self::none()
        } else {
            Self(vec![FieldSpec::column(field)])
        }
    }
}

impl<Q> From<String> for Fields<Q> {
    fn from(field: String) -> Self {
        Self::from(field.as_str())
    }
}

impl<Q> From<&[&str]> for Fields<Q> {
    fn from(fields: &[&str]) -> Self {
        Self(fields.iter().copied().map(FieldSpec::from).collect())
    }
}

impl<Q, const N: usize> From<[&str; N]> for Fields<Q> {
    fn from(fields: [&str; N]) -> Self {
        Self(fields.into_iter().map(FieldSpec::from).collect())
    }
}

impl<Q> From<Vec<&str>> for Fields<Q> {
    fn from(fields: Vec<&str>) -> Self {
        Self(fields.into_iter().map(FieldSpec::from).collect())
    }
}

impl<Q> From<Vec<String>> for Fields<Q> {
    fn from(fields: Vec<String>) -> Self {
        Self(fields.into_iter().map(FieldSpec::from).collect())
    }
}

impl<Q> From<FieldSpec<Q>> for Fields<Q> {
    fn from(field: FieldSpec<Q>) -> Self {
        Self(vec![field])
    }
}

impl<Q> From<Vec<FieldSpec<Q>>> for Fields<Q> {
    fn from(fields: Vec<FieldSpec<Q>>) -> Self {
        Self(fields)
    }
}

impl<Q, T> From<Option<T>> for Fields<Q>
where
    T: Into<Fields<Q>>,
{
    fn from(fields: Option<T>) -> Self {
        fields.map(Into::into).unwrap_or_default()
    }
}

/// Search registration of one entity type: its name, default fields and
/// custom matchers.
pub struct SearchScope<Q> {
    entity: String,
    config: SearchConfig,
    matchers: FieldMatchers<Q>,
}

impl<Q: QueryBuilder> SearchScope<Q> {
    pub fn new(entity: impl Into<String>) -> Self {
        Self {
            entity: entity.into(),
            config: SearchConfig::default(),
            matchers: FieldMatchers::new(),
        }
    }

    pub fn with_config(mut self, config: SearchConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_matchers(mut self, matchers: FieldMatchers<Q>) -> Self {
        self.matchers = matchers;
        self
    }

    pub fn with_matcher<F>(mut self, field: &str, matcher: F) -> Self
    where
        F: Fn(&mut Q, &str, bool) -> Result<()> + Send + Sync + 'static,
    {
        self.matchers.register(field, matcher);
        self
    }

    pub fn entity(&self) -> &str {
        &self.entity
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn matchers(&self) -> &FieldMatchers<Q> {
        &self.matchers
    }

    /// Fields a search covers: the caller's if any, else the configured defaults.
    pub fn resolve_fields(&self, fields: Fields<Q>) -> Vec<FieldSpec<Q>> {
        if !fields.is_empty() {
            return fields.into_vec();
        }

        tracing::debug!(
            entity = %self.entity,
            defaults = ?self.config.default_fields,
            "No search fields given, using entity defaults"
        );
        self.config
            .default_fields
            .iter()
            .map(|field| FieldSpec::column(field.as_str()))
            .collect()
    }

    /// Narrows `query` to rows where one of the fields matches `phrase`.
    ///
    /// `exact` switches from substring (`LIKE '%phrase%'`) to equality
    /// matching. Returns the same query for further chaining.
    pub fn search<'q>(
        &self,
        query: Option<&'q mut Q>,
        phrase: &str,
        fields: impl Into<Fields<Q>>,
        exact: bool,
    ) -> Result<&'q mut Q> {
        let phrase = phrase.trim();
        if phrase.is_empty() {
            tracing::debug!(
                entity = %self.entity,
                "Blank search phrase, leaving query unchanged"
            );
            return query.ok_or(Error::MissingQuery);
        }

        let fields = self.resolve_fields(fields.into());
        if fields.is_empty() {
            return Err(Error::NoSearchFields {
                entity: self.entity.clone(),
            });
        }

        let request = SearchRequest::new(self.entity.as_str(), fields, phrase, exact);
        PredicateBuilder::with_matchers(&self.matchers).build(&request, query)
    }
}

impl<Q> std::fmt::Debug for SearchScope<Q> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchScope")
            .field("entity", &self.entity)
            .field("config", &self.config)
            .field("matchers", &self.matchers)
            .finish()
    }
}

/// Search support for an entity type.
///
/// Implementors name themselves and may declare default fields and custom
/// matchers; [`Searchable::search`] is then available as a query scope.
pub trait Searchable {
    type Query: QueryBuilder;

    fn entity_name() -> &'static str;

    /// Default search fields. None unless overridden.
    fn search_config() -> SearchConfig {
        SearchConfig::default()
    }

    fn field_matchers() -> FieldMatchers<Self::Query> {
        FieldMatchers::new()
    }

    fn search_scope() -> SearchScope<Self::Query> {
        SearchScope::new(Self::entity_name())
            .with_config(Self::search_config())
            .with_matchers(Self::field_matchers())
    }

    /// Runs a search through a freshly built [`search_scope`](Self::search_scope).
    ///
    /// The scope, matcher registry included, is rebuilt on every call. Callers
    /// searching in a loop can build it once and call [`SearchScope::search`].
    fn search<'q>(
        query: Option<&'q mut Self::Query>,
        phrase: &str,
        fields: impl Into<Fields<Self::Query>>,
        exact: bool,
    ) -> Result<&'q mut Self::Query> {
        Self::search_scope().search(query, phrase, fields, exact)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sift_query::{Boolean, Comparator, SqlQuery};

    fn scope_with_defaults(defaults: &[&str]) -> SearchScope<SqlQuery> {
        SearchScope::new("Person")
            .with_config(SearchConfig::with_default_fields(defaults.iter().copied()))
    }

    fn columns(fields: &[FieldSpec<SqlQuery>]) -> Vec<&str> {
        fields.iter().filter_map(FieldSpec::as_column).collect()
    }

    #[test]
    fn explicit_fields_override_defaults() {
        let scope = scope_with_defaults(&["b", "c"]);
        assert_eq!(columns(&scope.resolve_fields(vec!["a"].into())), vec!["a"]);
    }

    #[test]
    fn scalar_field_is_normalized() {
        let scope = scope_with_defaults(&["b", "c"]);
        assert_eq!(columns(&scope.resolve_fields("a".into())), vec!["a"]);
    }

    #[test]
    fn empty_scalar_falls_back_to_defaults() {
        let scope = scope_with_defaults(&["b", "c"]);
        assert_eq!(columns(&scope.resolve_fields("".into())), vec!["b", "c"]);
    }

    #[test]
    fn none_falls_back_to_defaults() {
        let scope = scope_with_defaults(&["b"]);
        assert_eq!(
            columns(&scope.resolve_fields(None::<Vec<&str>>.into())),
            vec!["b"]
        );
    }

    #[test]
    fn blank_phrase_is_a_noop() {
        let scope = scope_with_defaults(&["name"]);
        for phrase in ["", "   ", "\t\n"] {
            let mut query = SqlQuery::new("people");
            scope.search(Some(&mut query), phrase, Fields::none(), false).unwrap();
            assert!(query.is_empty(), "phrase {:?} modified the query", phrase);
        }
    }

    #[test]
    fn blank_phrase_without_query_is_still_an_error() {
        let scope = scope_with_defaults(&["name"]);
        let err = scope.search(None, " ", Fields::none(), false).unwrap_err();
        assert!(matches!(err, Error::MissingQuery));
    }

    #[test]
    fn no_fields_and_no_defaults_is_an_error() {
        let scope = scope_with_defaults(&[]);
        let mut query = SqlQuery::new("people");

        let err = scope
            .search(Some(&mut query), "cat", Vec::<&str>::new(), false)
            .unwrap_err();

        assert!(matches!(err, Error::NoSearchFields { ref entity } if entity == "Person"));
        assert_eq!(
            err.to_string(),
            "no search fields were provided and 'Person' declares no default search fields"
        );
        assert!(query.is_empty());
    }

    #[test]
    fn field_check_precedes_query_check() {
        let scope = scope_with_defaults(&[]);
        let err = scope.search(None, "cat", Fields::none(), false).unwrap_err();
        assert!(matches!(err, Error::NoSearchFields { .. }));
    }

    #[test]
    fn scope_matchers_are_used() {
        let scope = scope_with_defaults(&["name"]).with_matcher(
            "name",
            |q: &mut SqlQuery, phrase: &str, _exact: bool| {
                q.push_comparison("display_name", Comparator::Equals, phrase, Boolean::And);
                Ok(())
            },
        );
        let mut query = SqlQuery::new("people");

        scope.search(Some(&mut query), "Ann", Fields::none(), false).unwrap();

        assert_eq!(
            query.to_string(),
            "SELECT * FROM people WHERE ((display_name = 'Ann'))"
        );
    }
}
