//! Subcommand implementations
//!
//! Each command returns its output as a `String`; `main` does the printing.

use anyhow::{bail, Context, Result};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use tagfall::{decompose, fallback_chain, Catalog, Param, Params, PropertyPath, UserLocales};

use crate::config::TagfallConfig;

/// Options for `tagfall resolve`
#[derive(Debug, Default)]
pub struct ResolveOptions {
    pub path: String,
    /// Overrides `locales.preferred` from the config
    pub preferred: Option<String>,
    /// Reported locales, in rank order
    pub locales: Vec<String>,
    pub params: Vec<(String, Param)>,
    pub explain: bool,
    /// Fail instead of echoing the path when nothing matches
    pub strict: bool,
}

/// Load a catalog file, choosing the format by extension (`.json` or YAML).
pub fn load_catalog(path: &Path) -> Result<Catalog> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));

    let catalog = if is_json {
        Catalog::from_json_str(&content)
    } else {
        Catalog::from_yaml_str(&content)
    };
    catalog.with_context(|| format!("Failed to load catalog {}", path.display()))
}

/// Parse `name=value`. The value is kept verbatim as text, so `007` or `1.10`
/// render exactly as typed.
pub fn parse_param(raw: &str) -> Result<(String, Param)> {
    let Some((name, value)) = raw.split_once('=') else {
        bail!("invalid param `{raw}` (expected name=value)");
    };
    let name = name.trim();
    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        bail!("invalid param name `{name}` (allowed: [A-Za-z0-9_]+)");
    }

    Ok((name.to_string(), Param::Str(value.to_string())))
}

pub fn resolve(config: &TagfallConfig, catalog: &Catalog, opts: ResolveOptions) -> Result<String> {
    let catalog = catalog.restrict(&config.locales.allowed);

    let mut ranked = UserLocales::new();
    if let Some(preferred) = opts.preferred.or_else(|| config.locales.preferred.clone()) {
        ranked = ranked.preferred(preferred);
    }
    let user_locales = ranked
        .reported(opts.locales)
        .fallback(config.locales.fallback.clone())
        .build();
    tracing::debug!(?user_locales, "resolve: ranked locales");

    let params: Params = opts.params.into_iter().collect();
    let path = PropertyPath::parse(&opts.path);

    let Some(found) = catalog.resolve(&path, &params, &user_locales) else {
        if opts.strict {
            bail!("no value for `{}` in locales {:?}", opts.path, user_locales);
        }
        let mut out = opts.path.clone();
        if opts.explain {
            let _ = write!(out, "\n# no match for {:?}", user_locales);
        }
        return Ok(out);
    };

    let mut out = match found.leaf {
        tagfall::Leaf::Text(s) => s,
        tagfall::Leaf::Other(v) => v.to_string(),
    };
    if opts.explain {
        let _ = write!(
            out,
            "\n# matched key `{}` via {} for locale `{}`",
            found.key, found.step, found.locale
        );
    }
    Ok(out)
}

pub fn decompose_all(locales: &[String]) -> String {
    let mut out = String::new();
    for locale in locales {
        let tag = decompose(locale);
        let _ = writeln!(
            out,
            "{}\tlanguage={}\tscript={}\tregion={}",
            tag.tag, tag.language, tag.script, tag.region
        );
    }
    out
}

pub fn chain(locale: &str) -> String {
    let mut out = String::new();
    for (i, key) in fallback_chain(&decompose(locale)).iter().enumerate() {
        let _ = writeln!(out, "{}. {}\t({})", i + 1, key.key, key.step);
    }
    out
}
