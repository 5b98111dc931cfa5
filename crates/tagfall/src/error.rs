use thiserror::Error;

/// Errors from loading a catalog document.
///
/// Resolution itself never fails; only parsing and validation do.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("yaml catalog error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("json catalog error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("catalog root must be a mapping of locale to values")]
    NotAMapping,

    #[error("invalid locale key `{0}` (allowed: lowercase [a-z0-9-], non-empty)")]
    InvalidLocaleKey(String),

    #[error("too many locales (max {max})")]
    TooManyLocales { max: usize },
}
