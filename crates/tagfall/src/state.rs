//! Observable preferred-locale state.
//!
//! A single writer (`set_preferred`) updates the preferred locale and notifies
//! every subscribed listener. UI layers subscribe to re-render; the resolver
//! itself never reads this state directly.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use tracing::debug;

use crate::preferences::UserLocales;

/// Default preferred and fallback locale.
pub const DEFAULT_LOCALE: &str = "en";

/// Handle returned by [`LocaleState::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Arc<dyn Fn(&str) + Send + Sync>;

/// Preferred locale plus fallback, with change notification.
pub struct LocaleState {
    preferred: RwLock<String>,
    fallback: String,
    listeners: Mutex<Vec<(SubscriptionId, Listener)>>,
    next_id: AtomicU64,
}

impl Default for LocaleState {
    fn default() -> Self {
        Self::new(DEFAULT_LOCALE, DEFAULT_LOCALE)
    }
}

impl std::fmt::Debug for LocaleState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocaleState")
            .field("preferred", &self.preferred())
            .field("fallback", &self.fallback)
            .finish_non_exhaustive()
    }
}

impl LocaleState {
    pub fn new(preferred: impl Into<String>, fallback: impl Into<String>) -> Self {
        Self {
            preferred: RwLock::new(preferred.into()),
            fallback: fallback.into(),
            listeners: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn preferred(&self) -> String {
        self.preferred
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    /// Change the preferred locale and notify listeners.
    ///
    /// Setting the current value again is a no-op. Listeners run on the
    /// calling thread after the new value is visible, outside any lock.
    pub fn set_preferred(&self, locale: impl Into<String>) {
        let locale = locale.into();
        {
            let mut cur = self
                .preferred
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            if *cur == locale {
                return;
            }
            debug!("LocaleState::set_preferred: {} -> {}", *cur, locale);
            *cur = locale.clone();
        }

        let listeners: Vec<Listener> = self
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, l)| Arc::clone(l))
            .collect();
        for listener in listeners {
            listener(&locale);
        }
    }

    /// Register a listener called with the new preferred locale on every change.
    pub fn subscribe(&self, listener: impl Fn(&str) + Send + Sync + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let listener: Listener = Arc::new(listener);
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, listener));
        id
    }

    /// Remove a listener. Returns `false` if it was not subscribed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let before = listeners.len();
        listeners.retain(|(sid, _)| *sid != id);
        listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Preferred, then `reported`, without the fallback.
    ///
    /// Use this when the caller applies its own fallback, or wants to know
    /// whether any user-chosen locale matched.
    pub fn preferred_locales<I, S>(&self, reported: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        UserLocales::new()
            .preferred(self.preferred())
            .reported(reported)
            .build()
    }

    /// The ranked locale list: preferred, then `reported`, then fallback.
    pub fn user_locales<I, S>(&self, reported: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        UserLocales::new()
            .preferred(self.preferred())
            .reported(reported)
            .fallback(self.fallback.clone())
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn defaults_to_english() {
        let st = LocaleState::default();
        assert_eq!(st.preferred(), "en");
        assert_eq!(st.fallback(), "en");
    }

    #[test]
    fn listeners_see_changes() {
        let st = LocaleState::new("en", "en");
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        st.subscribe(move |l| sink.lock().unwrap().push(l.to_string()));

        st.set_preferred("fr");
        st.set_preferred("fr");
        st.set_preferred("zh-TW");

        assert_eq!(*seen.lock().unwrap(), vec!["fr", "zh-TW"]);
        assert_eq!(st.preferred(), "zh-TW");
    }

    #[test]
    fn unsubscribe_stops_notifications() {
        let st = LocaleState::default();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        let id = st.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        st.set_preferred("de");
        assert!(st.unsubscribe(id));
        assert!(!st.unsubscribe(id));
        st.set_preferred("it");

        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(st.listener_count(), 0);
    }

    #[test]
    fn listener_may_read_state() {
        let st = Arc::new(LocaleState::default());
        let observed = Arc::new(Mutex::new(String::new()));
        let (inner, sink) = (Arc::clone(&st), Arc::clone(&observed));
        st.subscribe(move |_| *sink.lock().unwrap() = inner.preferred());

        st.set_preferred("ja");
        assert_eq!(*observed.lock().unwrap(), "ja");
    }

    #[test]
    fn user_locales_ranks_preferred_first() {
        let st = LocaleState::new("zh-TW", "en");
        assert_eq!(st.user_locales(["en-GB"]), vec!["zh-TW", "en-GB", "en"]);
    }

    #[test]
    fn preferred_locales_omit_fallback() {
        let st = LocaleState::new("zh-TW", "en");
        assert_eq!(st.preferred_locales(["en-GB"]), vec!["zh-TW", "en-GB"]);
        assert_eq!(st.preferred_locales(Vec::<String>::new()), vec!["zh-TW"]);

        let st = LocaleState::new("", "en");
        assert!(st.preferred_locales(Vec::<String>::new()).is_empty());
        assert_eq!(st.user_locales(Vec::<String>::new()), vec!["en"]);
    }

    #[test]
    fn state_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<LocaleState>();
    }
}
