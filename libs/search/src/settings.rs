//! Default search fields per entity type.
//!
//! Entity types either build a [`SearchConfig`] in code or read it from a TOML
//! file through [`SearchSettings`]:
//!
//! ```toml
//! [entities.person]
//! search_on = ["name", "email"]
//!
//! [entities.post]
//! search_on = "title"
//! ```

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Deserializer};

use crate::Result;

/// Search configuration of one entity type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SearchConfig {
    /// Fields searched when the caller names none. Accepts a single field name
    /// or a list, under `default_fields` or `search_on`.
    #[serde(default, alias = "search_on", deserialize_with = "one_or_many")]
    pub default_fields: Vec<String>,
}

impl SearchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default_fields<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            default_fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    pub fn has_default_fields(&self) -> bool {
        !self.default_fields.is_empty()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

fn one_or_many<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(field) if field.is_empty() => Vec::new(),
        OneOrMany::One(field) => vec![field],
        OneOrMany::Many(fields) => fields,
    })
}

/// Search configuration for all entity types, keyed by entity name.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchSettings {
    #[serde(default)]
    pub entities: HashMap<String, SearchConfig>,
}

impl SearchSettings {
    /// Load settings from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let settings: Self = config::Config::builder()
            .add_source(config::File::from(path).format(config::FileFormat::Toml))
            .build()?
            .try_deserialize()?;

        tracing::debug!(
            path = %path.display(),
            entities = settings.entities.len(),
            "Loaded search settings"
        );
        Ok(settings)
    }

    pub fn from_toml_str(toml: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }

    /// Configuration for `entity`, or an empty one if it is not listed.
    ///
    /// Falls back to the lowercased name since `config` may normalize keys.
    pub fn entity(&self, entity: &str) -> SearchConfig {
        self.entities
            .get(entity)
            .or_else(|| self.entities.get(&entity.to_lowercase()))
            .cloned()
            .unwrap_or_default()
    }
}
