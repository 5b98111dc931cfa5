/// Assemble the ranked locale list handed to the resolver.
///
/// Order: the explicitly preferred locale, then the environment-reported
/// locales as reported, then the fallback. Empty entries are skipped;
/// duplicates are kept because a later duplicate can never change the result.
///
/// ```
/// use tagfall::UserLocales;
///
/// let locales = UserLocales::new()
///     .preferred("zh-TW")
///     .reported(["en-GB", "en"])
///     .fallback("en")
///     .build();
/// assert_eq!(locales, vec!["zh-TW", "en-GB", "en", "en"]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UserLocales {
    preferred: Option<String>,
    reported: Vec<String>,
    fallback: Option<String>,
}

impl UserLocales {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn preferred(mut self, locale: impl Into<String>) -> Self {
        self.preferred = Some(locale.into());
        self
    }

    /// Append environment-reported locales, keeping their order.
    pub fn reported<I, S>(mut self, locales: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.reported.extend(locales.into_iter().map(Into::into));
        self
    }

    pub fn fallback(mut self, locale: impl Into<String>) -> Self {
        self.fallback = Some(locale.into());
        self
    }

    pub fn build(self) -> Vec<String> {
        self.preferred
            .into_iter()
            .chain(self.reported)
            .chain(self.fallback)
            .filter(|l| !l.is_empty())
            .collect()
    }
}
