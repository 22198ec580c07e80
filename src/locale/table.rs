//! Forward and reverse locale tables

use std::collections::{
    BTreeMap,
    HashMap,
};

/// Canonical → localized strings for one language.
///
/// Entries are kept ordered by canonical key. An empty localized value means
/// "not translated yet" and is never returned by [`LocaleTable::get`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocaleTable {
    /// Language this table translates into.
    language: String,
    /// Canonical string → localized string.
    entries: BTreeMap<String, String>,
}

impl LocaleTable {
    /// Creates a table from `(canonical, localized)` pairs.
    ///
    /// When the same canonical key appears twice the later pair replaces the
    /// earlier one.
    pub fn new<K, V>(language: impl Into<String>, entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            language: language.into(),
            entries: entries.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }

    /// Creates a table without entries.
    #[must_use]
    pub fn empty(language: impl Into<String>) -> Self {
        Self { language: language.into(), entries: BTreeMap::new() }
    }

    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Looks up the localized form of a canonical string.
    #[must_use]
    pub fn get(&self, canonical: &str) -> Option<&str> {
        self.entries.get(canonical).map(String::as_str).filter(|value| !value.is_empty())
    }

    /// Canonical keys in ascending order, translated or not.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Inverts the table into a localized → canonical lookup.
    ///
    /// Entries are visited in ascending canonical order and the first
    /// canonical key claiming a localized string keeps it. Untranslated
    /// (empty) entries are not inverted.
    #[must_use]
    pub fn reverse(&self) -> ReverseLocaleTable {
        let mut entries: HashMap<String, String> = HashMap::with_capacity(self.entries.len());
        for (canonical, localized) in &self.entries {
            if localized.is_empty() {
                continue;
            }
            if let Some(kept) = entries.get(localized) {
                tracing::debug!(
                    language = %self.language,
                    localized = %localized,
                    kept = %kept,
                    dropped = %canonical,
                    "Ambiguous reverse translation"
                );
                continue;
            }
            entries.insert(localized.clone(), canonical.clone());
        }
        ReverseLocaleTable { language: self.language.clone(), entries }
    }
}

/// Localized → canonical strings for one language, derived from a
/// [`LocaleTable`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReverseLocaleTable {
    /// Language of the localized keys.
    language: String,
    /// Localized string → canonical string.
    entries: HashMap<String, String>,
}

impl ReverseLocaleTable {
    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Looks up the canonical form of a localized string.
    #[must_use]
    pub fn get(&self, localized: &str) -> Option<&str> {
        self.entries.get(localized).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
