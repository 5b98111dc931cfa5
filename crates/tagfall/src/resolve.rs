//! Walk ranked user locales through the fallback chain of a candidate map.
//!
//! # Invariants
//!
//! 1. **First match wins**: user locales are tried in order, and all
//!    fallback steps of one locale run before the next locale is considered.
//!
//! 2. **Presence is decided by the selector**: a dictionary entry whose
//!    selected leaf is `None` counts as a miss and the walk continues.
//!
//! 3. **No side effects**: the candidate map is only read.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Empty map | No candidates at all | Returns `None` without iterating |
//! | No match | No step of any locale selects a leaf | Returns `None` |
//! | Partial entry | Entry exists, selector target missing | Treated as no entry |
//! | Malformed locale | e.g. `""` or `"--"` | Produces no usable keys |

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use indexmap::IndexMap;
use tracing::{debug, trace};

use crate::locale::{decompose, fallback_chain, FallbackStep};
use crate::params::{substitute, Params};

/// Read access to a locale-keyed candidate dictionary.
///
/// Keys are expected to be lowercase; incoming locales are lowercased before
/// lookup.
pub trait Candidates<T> {
    fn get_candidate(&self, locale: &str) -> Option<&T>;

    fn is_empty(&self) -> bool;
}

impl<T, S: BuildHasher> Candidates<T> for HashMap<String, T, S> {
    fn get_candidate(&self, locale: &str) -> Option<&T> {
        self.get(locale)
    }

    fn is_empty(&self) -> bool {
        HashMap::is_empty(self)
    }
}

impl<T> Candidates<T> for BTreeMap<String, T> {
    fn get_candidate(&self, locale: &str) -> Option<&T> {
        self.get(locale)
    }

    fn is_empty(&self) -> bool {
        BTreeMap::is_empty(self)
    }
}

impl<T, S: BuildHasher> Candidates<T> for IndexMap<String, T, S> {
    fn get_candidate(&self, locale: &str) -> Option<&T> {
        self.get(locale)
    }

    fn is_empty(&self) -> bool {
        IndexMap::is_empty(self)
    }
}

/// A selected leaf: text (eligible for `${name}` substitution) or anything else.
#[derive(Clone, Debug, PartialEq)]
pub enum Leaf<R> {
    Text(String),
    Other(R),
}

impl<R> Leaf<R> {
    pub fn into_text(self) -> Option<String> {
        match self {
            Leaf::Text(s) => Some(s),
            Leaf::Other(_) => None,
        }
    }

    fn apply_params(self, params: &Params) -> Self {
        match self {
            Leaf::Text(s) if !params.is_empty() => Leaf::Text(substitute(&s, params)),
            leaf => leaf,
        }
    }
}

/// A successful resolution and where it came from.
#[derive(Clone, Debug, PartialEq)]
pub struct Match<R> {
    pub leaf: Leaf<R>,
    /// The user locale (as given) that produced the match.
    pub locale: String,
    pub step: FallbackStep,
    /// The dictionary key that was indexed.
    pub key: String,
}

/// Resolve a leaf for the first user locale that has one.
///
/// For each locale the keys of [`fallback_chain`] are tried in order: exact
/// tag, `<language>-<script>`, region alias, bare language. The first key
/// whose entry makes `selector` return `Some` wins. Text leaves get
/// `${name}` substitution when `params` is non-empty.
///
/// ```
/// use std::collections::HashMap;
/// use tagfall::{localize, select, Leaf, Params, Value};
///
/// let zh_hant: Value = [("title", "標題")].into_iter().collect();
/// let strings = HashMap::from([("zh-hant".to_string(), zh_hant)]);
/// let out = localize(&strings, &Params::new(), &["zh-TW"], select::path("title"));
/// assert_eq!(out, Some(Leaf::Text("標題".to_string())));
/// ```
pub fn localize<T, R, L, F>(
    strings: &impl Candidates<T>,
    params: &Params,
    user_locales: &[L],
    selector: F,
) -> Option<Leaf<R>>
where
    L: AsRef<str>,
    F: Fn(&T) -> Option<Leaf<R>>,
{
    localize_match(strings, params, user_locales, selector).map(|m| m.leaf)
}

/// Like [`localize`], but also reports the locale, step and key that matched.
pub fn localize_match<T, R, L, F>(
    strings: &impl Candidates<T>,
    params: &Params,
    user_locales: &[L],
    selector: F,
) -> Option<Match<R>>
where
    L: AsRef<str>,
    F: Fn(&T) -> Option<Leaf<R>>,
{
    if strings.is_empty() {
        return None;
    }

    for locale in user_locales {
        let locale = locale.as_ref();
        let tag = decompose(locale);

        for candidate in fallback_chain(&tag) {
            let Some(leaf) = strings.get_candidate(&candidate.key).and_then(&selector) else {
                continue;
            };
            trace!(
                locale = %locale,
                step = %candidate.step,
                key = %candidate.key,
                "localize: matched"
            );
            return Some(Match {
                leaf: leaf.apply_params(params),
                locale: locale.to_string(),
                step: candidate.step,
                key: candidate.key,
            });
        }
    }

    debug!(
        locales = user_locales.len(),
        "localize: no candidate for any user locale"
    );
    None
}

/// [`localize`] over plain string candidates.
pub fn localize_text<L: AsRef<str>>(
    strings: &impl Candidates<String>,
    params: &Params,
    user_locales: &[L],
) -> Option<String> {
    localize(strings, params, user_locales, select::identity::<()>).and_then(Leaf::into_text)
}

/// Ready-made selectors.
pub mod select {
    use super::Leaf;
    use crate::value::{PropertyPath, Value};

    /// Select a string candidate as-is.
    #[allow(clippy::ptr_arg)]
    pub fn identity<R>(s: &String) -> Option<Leaf<R>> {
        Some(Leaf::Text(s.clone()))
    }

    /// Turn a [`Value`] into a leaf. `Null` is absent; text becomes
    /// [`Leaf::Text`]; everything else passes through untouched.
    pub fn value_leaf(v: &Value) -> Option<Leaf<Value>> {
        match v {
            Value::Null => None,
            Value::Text(s) => Some(Leaf::Text(s.clone())),
            other => Some(Leaf::Other(other.clone())),
        }
    }

    /// Select the value at `path` inside each candidate.
    pub fn path(path: impl Into<PropertyPath>) -> impl Fn(&Value) -> Option<Leaf<Value>> {
        let path = path.into();
        move |v: &Value| v.get_path(&path).and_then(value_leaf)
    }
}
