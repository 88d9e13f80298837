//! Error types for sift searches

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("no query target was provided to build a predicate against")]
    MissingQuery,

    #[error("search request for '{entity}' has no fields to search on")]
    MissingFields { entity: String },

    #[error("no search fields were provided and '{entity}' declares no default search fields")]
    NoSearchFields { entity: String },

    #[error("search configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Failure raised by a custom field matcher, surfaced unchanged.
    #[error(transparent)]
    Matcher(#[from] anyhow::Error),
}
