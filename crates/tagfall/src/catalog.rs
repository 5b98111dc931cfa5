use indexmap::IndexMap;
use tracing::debug;

use crate::error::CatalogError;
use crate::params::Params;
use crate::resolve::{localize_match, select, Candidates, Leaf, Match};
use crate::value::{PropertyPath, Value};

pub const MAX_CATALOG_LOCALES: usize = 1024;

fn is_valid_locale_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
}

/// Keep only the entries whose locale key is in `allowed`.
///
/// An empty `allowed` list passes the dictionary through unchanged. Keys are
/// compared as-is.
pub fn restrict_locales<M, T, A>(strings: M, allowed: &[A]) -> M
where
    M: IntoIterator<Item = (String, T)> + FromIterator<(String, T)>,
    A: AsRef<str>,
{
    if allowed.is_empty() {
        return strings;
    }
    strings
        .into_iter()
        .filter(|(locale, _)| allowed.iter().any(|a| a.as_ref() == locale))
        .collect()
}

/// Per-locale values loaded from a YAML or JSON document.
///
/// The document's top level maps lowercase locale tags to arbitrary nested
/// values:
///
/// ```yaml
/// en:
///   greeting: "Hello, ${name}!"
///   menu: { open: Open }
/// zh-hant:
///   greeting: "${name}，你好！"
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Catalog {
    locales: IndexMap<String, Value>,
}

impl Catalog {
    pub fn new() -> Self {
        Self {
            locales: IndexMap::new(),
        }
    }

    /// Insert (or replace) the value for a locale. The key is stored as given.
    pub fn insert(&mut self, locale: impl Into<String>, value: impl Into<Value>) {
        self.locales.insert(locale.into(), value.into());
    }

    pub fn get(&self, locale: &str) -> Option<&Value> {
        self.locales.get(locale)
    }

    pub fn len(&self) -> usize {
        self.locales.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locales.is_empty()
    }

    /// Locale keys in document order.
    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.locales.keys().map(String::as_str)
    }

    pub fn from_yaml_str(src: &str) -> Result<Self, CatalogError> {
        let root: Value = serde_yaml::from_str(src)?;
        Self::from_value(root)
    }

    pub fn from_json_str(src: &str) -> Result<Self, CatalogError> {
        let root: Value = serde_json::from_str(src)?;
        Self::from_value(root)
    }

    /// Build from an already-parsed document root.
    pub fn from_value(root: Value) -> Result<Self, CatalogError> {
        let Value::Object(locales) = root else {
            return Err(CatalogError::NotAMapping);
        };
        if locales.len() > MAX_CATALOG_LOCALES {
            return Err(CatalogError::TooManyLocales {
                max: MAX_CATALOG_LOCALES,
            });
        }
        if let Some(bad) = locales.keys().find(|k| !is_valid_locale_key(k)) {
            return Err(CatalogError::InvalidLocaleKey(bad.clone()));
        }
        debug!(locales = locales.len(), "Catalog loaded");
        Ok(Self { locales })
    }

    /// A copy holding only the `allowed` locales (all of them if `allowed` is empty).
    pub fn restrict<A: AsRef<str>>(&self, allowed: &[A]) -> Self {
        Self {
            locales: restrict_locales(self.locales.clone(), allowed),
        }
    }

    /// Resolve `path` for the ranked `user_locales`, keeping match details.
    pub fn resolve<L: AsRef<str>>(
        &self,
        path: &PropertyPath,
        params: &Params,
        user_locales: &[L],
    ) -> Option<Match<Value>> {
        localize_match(self, params, user_locales, select::path(path.clone()))
    }

    /// Resolve `path` to a value. Text values carry substituted params.
    pub fn value<L: AsRef<str>>(
        &self,
        path: impl Into<PropertyPath>,
        params: &Params,
        user_locales: &[L],
    ) -> Option<Value> {
        let path = path.into();
        self.resolve(&path, params, user_locales)
            .map(|m| match m.leaf {
                Leaf::Text(s) => Value::Text(s),
                Leaf::Other(v) => v,
            })
    }

    /// Resolve `path` to display text, echoing the path itself when nothing matches.
    ///
    /// Non-text values are rendered with [`Value`]'s `Display`.
    pub fn string<L: AsRef<str>>(
        &self,
        path: impl Into<PropertyPath>,
        params: &Params,
        user_locales: &[L],
    ) -> String {
        let path = path.into();
        match self.value(path.clone(), params, user_locales) {
            Some(v) => v.to_string(),
            None => path.as_str().to_string(),
        }
    }
}

impl Candidates<Value> for Catalog {
    fn get_candidate(&self, locale: &str) -> Option<&Value> {
        self.get(locale)
    }

    fn is_empty(&self) -> bool {
        self.locales.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Catalog {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut catalog = Catalog::new();
        for (k, v) in iter {
            catalog.insert(k, v);
        }
        catalog
    }
}
