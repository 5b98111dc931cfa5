//! Locale tag decomposition and the per-locale fallback chain.
//!
//! Tags are split on `-` after lowercasing. This is deliberately not a
//! BCP-47 validator: anything that doesn't look like a script or region
//! subtag is dropped, and malformed input never fails.

/// Canonical script-qualified tags for `<language>-<region>` pairs.
///
/// Keys and values are lowercase.
const REGION_ALIASES: &[(&str, &str)] = &[
    ("zh-cn", "zh-hans"),
    ("zh-hk", "zh-hant"),
    ("zh-tw", "zh-hant"),
];

/// A locale identifier split into its language, script and region subtags.
///
/// All fields are lowercase. `script` and `region` are empty when the tag
/// doesn't carry them.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct LocaleTag {
    /// The full lowercased input, e.g. `zh-hant-tw`.
    pub tag: String,
    pub language: String,
    pub script: String,
    pub region: String,
}

impl LocaleTag {
    /// `<language>-<script>`, if the tag has a script subtag.
    pub fn language_script(&self) -> Option<String> {
        if self.language.is_empty() || self.script.is_empty() {
            return None;
        }
        Some(format!("{}-{}", self.language, self.script))
    }

    /// The canonical alias for this tag's `<language>-<region>` pair, if any.
    pub fn region_alias(&self) -> Option<&'static str> {
        if self.region.is_empty() {
            return None;
        }
        region_alias(&self.language, &self.region)
    }
}

fn is_script(subtag: &str) -> bool {
    subtag.len() == 4 && subtag.bytes().all(|b| b.is_ascii_alphabetic())
}

fn is_region(subtag: &str) -> bool {
    match subtag.len() {
        2 => subtag.bytes().all(|b| b.is_ascii_alphabetic()),
        3 => subtag.bytes().all(|b| b.is_ascii_digit()),
        _ => false,
    }
}

/// Split a locale string into `{ tag, language, script, region }`.
///
/// - `zh-Hant-TW` -> `zh-hant-tw` / `zh` / `hant` / `tw`
/// - `en-419` -> `en-419` / `en` / `` / `419`
/// - `""` -> all fields empty
///
/// A script is only recognized directly after the language, and a region
/// directly after the language or the script.
pub fn decompose(locale: &str) -> LocaleTag {
    let tag = locale.to_lowercase();
    let mut subtags = tag.split('-');

    let language = subtags.next().unwrap_or_default().to_string();
    let mut script = String::new();
    let mut region = String::new();

    if let Some(second) = subtags.next() {
        if is_script(second) {
            script = second.to_string();
            if let Some(third) = subtags.next() {
                if is_region(third) {
                    region = third.to_string();
                }
            }
        } else if is_region(second) {
            region = second.to_string();
        }
    }

    LocaleTag {
        tag,
        language,
        script,
        region,
    }
}

/// Look up the region alias table, e.g. `("zh", "tw")` -> `zh-hant`.
///
/// Both arguments are expected in lowercase.
pub fn region_alias(language: &str, region: &str) -> Option<&'static str> {
    let key = format!("{language}-{region}");
    REGION_ALIASES
        .iter()
        .find(|(pair, _)| *pair == key)
        .map(|&(_, alias)| alias)
}

/// Which rule of the fallback chain produced a dictionary key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FallbackStep {
    /// The full tag as given.
    Exact,
    /// `<language>-<script>`.
    LanguageScript,
    /// The alias of `<language>-<region>`.
    RegionAlias,
    /// The bare language.
    Language,
}

impl FallbackStep {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::LanguageScript => "language-script",
            Self::RegionAlias => "region-alias",
            Self::Language => "language",
        }
    }
}

impl std::fmt::Display for FallbackStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A dictionary key to try, and the step that produced it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FallbackKey {
    pub step: FallbackStep,
    pub key: String,
}

/// The ordered keys tried for one locale.
///
/// Example:
/// - `zh-TW` -> `[exact zh-tw, region-alias zh-hant, language zh]`
/// - `sr-Latn-RS` -> `[exact sr-latn-rs, language-script sr-latn, language sr]`
///
/// Keys may repeat across steps (`en` yields `exact en` and `language en`);
/// empty keys are never produced.
pub fn fallback_chain(locale: &LocaleTag) -> Vec<FallbackKey> {
    let mut chain = Vec::with_capacity(4);
    let mut push = |step, key: String| {
        if !key.is_empty() {
            chain.push(FallbackKey { step, key });
        }
    };

    push(FallbackStep::Exact, locale.tag.clone());
    if let Some(key) = locale.language_script() {
        push(FallbackStep::LanguageScript, key);
    }
    if let Some(alias) = locale.region_alias() {
        push(FallbackStep::RegionAlias, alias.to_string());
    }
    push(FallbackStep::Language, locale.language.clone());

    chain
}
