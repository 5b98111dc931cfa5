//! Tagged-union value model for nested per-locale candidates.
//!
//! Catalog documents (YAML or JSON) deserialize into [`Value`], and a
//! [`PropertyPath`] picks a leaf out of it. A missing segment at any depth
//! yields `None` rather than an error.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A nested candidate value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Array(Vec<Value>),
    Object(IndexMap<String, Value>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&IndexMap<String, Value>> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Index one level down: object field or array element.
    pub fn get_segment(&self, segment: &Segment) -> Option<&Value> {
        match (self, segment) {
            (Value::Object(map), Segment::Key(key)) => map.get(key),
            (Value::Object(map), Segment::Index(i)) => map.get(&i.to_string()),
            (Value::Array(items), Segment::Index(i)) => items.get(*i),
            _ => None,
        }
    }

    /// Walk `path` from this value. The empty path returns `self`.
    pub fn get_path(&self, path: &PropertyPath) -> Option<&Value> {
        path.segments()
            .iter()
            .try_fold(self, |value, segment| value.get_segment(segment))
    }
}

impl fmt::Display for Value {
    /// Text renders as-is; everything else renders as compact JSON.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Text(s) => f.write_str(s),
            Value::Array(_) | Value::Object(_) => match serde_json::to_string(self) {
                Ok(json) => f.write_str(&json),
                Err(_) => Err(fmt::Error),
            },
        }
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl<V: Into<Value>> From<Vec<V>> for Value {
    fn from(items: Vec<V>) -> Self {
        Value::Array(items.into_iter().map(Into::into).collect())
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Value::Object(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// One step of a [`PropertyPath`].
///
/// `Index` is only produced for canonical decimal digits (`7`, not `007`),
/// so an object field spelled `007` stays a `Key` and is looked up verbatim.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Segment {
    Key(String),
    Index(usize),
}

/// A dotted property path such as `menu.items[2].label` or `menu.items.2.label`.
///
/// Numeric segments become [`Segment::Index`], which also matches an object
/// field spelled with the same digits. The source text is kept for display.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct PropertyPath {
    raw: String,
    segments: Vec<Segment>,
}

impl PropertyPath {
    /// Parse a dotted path. Empty segments are skipped; a `[` without a
    /// matching `]` or with a non-numeric index is read as part of a key.
    pub fn parse(path: &str) -> Self {
        let mut segments = Vec::new();
        for part in path.split('.') {
            push_part(&mut segments, part);
        }
        Self {
            raw: path.to_string(),
            segments,
        }
    }

    /// The path exactly as it was given to [`PropertyPath::parse`].
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

fn canonical_index(digits: &str) -> Option<usize> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let index = digits.parse::<usize>().ok()?;
    (index.to_string() == digits).then_some(index)
}

fn push_part(segments: &mut Vec<Segment>, part: &str) {
    let mut rest = part;
    while !rest.is_empty() {
        let Some(open) = rest.find('[') else {
            segments.push(key_or_index(rest));
            return;
        };
        let Some(close) = rest[open + 1..].find(']') else {
            segments.push(Segment::Key(rest.to_string()));
            return;
        };
        let inner = &rest[open + 1..open + 1 + close];
        if !inner.bytes().all(|b| b.is_ascii_digit()) || inner.is_empty() {
            segments.push(Segment::Key(rest.to_string()));
            return;
        }
        if open > 0 {
            segments.push(key_or_index(&rest[..open]));
        }
        segments.push(key_or_index(inner));
        rest = &rest[open + close + 2..];
    }
}

fn key_or_index(part: &str) -> Segment {
    match canonical_index(part) {
        Some(i) => Segment::Index(i),
        None => Segment::Key(part.to_string()),
    }
}

impl From<&str> for PropertyPath {
    fn from(path: &str) -> Self {
        Self::parse(path)
    }
}

impl From<&String> for PropertyPath {
    fn from(path: &String) -> Self {
        Self::parse(path)
    }
}

impl fmt::Display for PropertyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
