use std::borrow::Cow;
use std::fmt;

use indexmap::IndexMap;

/// Rendered in place of a `${name}` placeholder that has no parameter.
pub const MISSING_PARAM: &str = "undefined";

/// A substitution parameter value.
#[derive(Clone, Debug, PartialEq)]
pub enum Param {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Param::Str(s) => f.write_str(s),
            Param::Int(i) => write!(f, "{i}"),
            Param::Float(v) => {
                let mut s = v.to_string();
                if s.contains('.') {
                    while s.ends_with('0') {
                        s.pop();
                    }
                    if s.ends_with('.') {
                        s.pop();
                    }
                }
                f.write_str(&s)
            }
            Param::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<String> for Param {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<&str> for Param {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<&String> for Param {
    fn from(v: &String) -> Self {
        Self::Str(v.clone())
    }
}

impl From<i64> for Param {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for Param {
    fn from(v: i32) -> Self {
        Self::Int(v as i64)
    }
}

impl From<u32> for Param {
    fn from(v: u32) -> Self {
        Self::Int(v as i64)
    }
}

impl From<usize> for Param {
    fn from(v: usize) -> Self {
        Self::Int(v as i64)
    }
}

impl From<f64> for Param {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<f32> for Param {
    fn from(v: f32) -> Self {
        Self::Float(v as f64)
    }
}

impl From<bool> for Param {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

/// Named placeholder values, in insertion order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Params {
    values: IndexMap<Cow<'static, str>, Param>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<Cow<'static, str>>, value: impl Into<Param>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<Cow<'static, str>>, value: impl Into<Param>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&Param> {
        self.values.get(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Params
where
    K: Into<Cow<'static, str>>,
    V: Into<Param>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Params::new();
        for (k, v) in iter {
            params.insert(k, v);
        }
        params
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Parse `${ name }` starting right after the `${`.
///
/// Returns the identifier and the byte length consumed up to and including
/// the closing brace, or `None` if the placeholder is malformed.
fn parse_placeholder(rest: &str) -> Option<(&str, usize)> {
    let close = rest.find('}')?;
    let name = rest[..close].trim();
    if name.is_empty() || !name.chars().all(is_ident_char) {
        return None;
    }
    Some((name, close + 1))
}

/// Replace every `${name}` in `text` with the stringified parameter.
///
/// - Whitespace inside the braces is allowed: `${ name }`.
/// - Unknown names render as [`MISSING_PARAM`].
/// - Malformed sequences are kept verbatim.
/// - Replacement text is not scanned again.
pub fn substitute(text: &str, params: &Params) -> String {
    if !text.contains("${") {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len() + 8);
    let mut rest = text;

    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match parse_placeholder(after) {
            Some((name, consumed)) => {
                match params.get(name) {
                    Some(value) => out.push_str(&value.to_string()),
                    None => out.push_str(MISSING_PARAM),
                }
                rest = &after[consumed..];
            }
            None => {
                out.push_str("${");
                rest = after;
            }
        }
    }
    out.push_str(rest);

    out
}

/// Build [`Params`] from `name: value` pairs.
///
/// Examples:
/// - `params!{}`
/// - `params!{ name: "Sam", count: 3 }`
#[macro_export]
macro_rules! params {
    () => {
        $crate::Params::new()
    };
    ($($name:ident : $value:expr),* $(,)?) => {{
        let mut p = $crate::Params::new();
        $(
            p.insert(stringify!($name), $value);
        )*
        p
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn substitutes_named_placeholders() {
        let p = Params::new().with("name", "Sam");
        assert_eq!(substitute("Hello ${name}", &p), "Hello Sam");
        assert_eq!(substitute("${name}${name}", &p), "SamSam");
        assert_eq!(substitute("Hello ${ name }!", &p), "Hello Sam!");
    }

    #[test]
    fn missing_param_renders_undefined() {
        let p = Params::new().with("name", "Sam");
        assert_eq!(substitute("${name} has ${count}", &p), "Sam has undefined");
    }

    #[test]
    fn malformed_sequences_are_literal() {
        let p = Params::new().with("name", "Sam");
        assert_eq!(substitute("cost: ${", &p), "cost: ${");
        assert_eq!(substitute("${name", &p), "${name");
        assert_eq!(substitute("${}", &p), "${}");
        assert_eq!(substitute("${a b}", &p), "${a b}");
        assert_eq!(substitute("$name {name}", &p), "$name {name}");
        // The second `${` starts a valid placeholder.
        assert_eq!(substitute("${ ${name}", &p), "${ Sam");
    }

    #[test]
    fn substitution_is_single_pass() {
        let p = Params::new().with("a", "${b}").with("b", "nope");
        assert_eq!(substitute("${a}", &p), "${b}");
    }

    #[test]
    fn param_display() {
        assert_eq!(Param::from(3).to_string(), "3");
        assert_eq!(Param::from(1.50).to_string(), "1.5");
        assert_eq!(Param::from(2.0).to_string(), "2");
        assert_eq!(Param::from(true).to_string(), "true");
        assert_eq!(Param::from("x").to_string(), "x");
    }

    #[test]
    fn params_macro() {
        let count = 3;
        let p = crate::params! { name: "Sam", count: count };
        assert_eq!(p.len(), 2);
        assert_eq!(p.get("name"), Some(&Param::Str("Sam".into())));
        assert_eq!(p.get("count"), Some(&Param::Int(3)));
        assert!(crate::params! {}.is_empty());
    }

    #[test]
    fn non_ascii_text_survives() {
        let p = Params::new().with("name", "山田");
        assert_eq!(substitute("こんにちは、${name}さん", &p), "こんにちは、山田さん");
    }
}
