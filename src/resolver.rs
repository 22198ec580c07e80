//! Translation of strings between languages through a canonical language.
//!
//! Locale tables map canonical strings to localized ones, so translating
//! between two non-canonical languages goes through the canonical form:
//! the source string is looked up in the source language's reverse table,
//! then the canonical result in the target language's table.
//!
//! Missing translations are not errors. A string with no entry comes back
//! unchanged, which callers cannot tell apart from a string that needed no
//! translation; compare output with input when that matters.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use thiserror::Error;

use crate::locale::{
    LocaleError,
    LocaleSource,
    LocaleTable,
    ReverseLocaleTable,
};

/// Default pivot language.
pub const DEFAULT_CANONICAL_LANGUAGE: &str = "en";

/// Errors raised by [`TranslationResolver`].
#[derive(Error, Debug)]
pub enum ResolverError {
    #[error("Locale table for '{language}' is unavailable: {source}")]
    LocaleUnavailable {
        language: String,
        #[source]
        source: LocaleError,
    },

    #[error("Failed to list available languages: {0}")]
    LanguageDiscovery(#[source] LocaleError),
}

/// One column of a translation matrix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatrixEntry {
    pub language: String,
    pub text: String,
}

/// Resolves translations with per-language table caches.
///
/// Tables are loaded from the injected [`LocaleSource`] the first time a
/// language is needed and kept for the lifetime of the resolver. The
/// canonical language never needs a table.
#[derive(Debug)]
pub struct TranslationResolver<S> {
    /// Where locale tables are loaded from.
    source: S,
    /// Pivot language.
    canonical_language: String,
    /// Source language used when a call does not name one.
    current_language: String,
    /// Language → loaded table.
    locales: HashMap<String, LocaleTable>,
    /// Language → inverted table, built on first reverse lookup.
    reverse_locales: HashMap<String, ReverseLocaleTable>,
}

impl<S: LocaleSource> TranslationResolver<S> {
    /// Creates a resolver pivoting through English whose current language is
    /// English.
    pub fn new(source: S) -> Self {
        Self::with_languages(source, DEFAULT_CANONICAL_LANGUAGE, DEFAULT_CANONICAL_LANGUAGE)
    }

    pub fn with_languages(
        source: S,
        canonical_language: impl Into<String>,
        current_language: impl Into<String>,
    ) -> Self {
        Self {
            source,
            canonical_language: canonical_language.into(),
            current_language: current_language.into(),
            locales: HashMap::new(),
            reverse_locales: HashMap::new(),
        }
    }

    #[must_use]
    pub fn canonical_language(&self) -> &str {
        &self.canonical_language
    }

    #[must_use]
    pub fn current_language(&self) -> &str {
        &self.current_language
    }

    /// Changes the default source language. Cached tables are kept.
    pub fn set_current_language(&mut self, language: impl Into<String>) {
        self.current_language = language.into();
    }

    #[must_use]
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// Whether a table for `language` is already cached.
    #[must_use]
    pub fn is_loaded(&self, language: &str) -> bool {
        self.locales.contains_key(language)
    }

    /// Loads and caches the table for `language` if it is not cached yet.
    pub fn ensure_loaded(&mut self, language: &str) -> Result<&LocaleTable, ResolverError> {
        cached_table(&mut self.locales, &self.source, &self.canonical_language, language)
    }

    /// Maps a localized string back to its canonical form.
    ///
    /// Returns `text` unchanged for the canonical language and for strings the
    /// language's table does not know.
    pub fn to_canonical(&mut self, text: &str, language: &str) -> Result<String, ResolverError> {
        if language == self.canonical_language {
            return Ok(text.to_string());
        }

        let reverse = match self.reverse_locales.entry(language.to_string()) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                let table = cached_table(
                    &mut self.locales,
                    &self.source,
                    &self.canonical_language,
                    language,
                )?;
                tracing::debug!(language, "Building reverse locale table");
                entry.insert(table.reverse())
            }
        };

        Ok(reverse.get(text).unwrap_or(text).to_string())
    }

    /// Translates `text` from `source_language` (the current language when
    /// `None`) into `target_language`.
    ///
    /// Strings without a translation come back in canonical form, or unchanged
    /// when they have none either.
    pub fn translate(
        &mut self,
        text: &str,
        target_language: &str,
        source_language: Option<&str>,
    ) -> Result<String, ResolverError> {
        let source_language =
            source_language.map_or_else(|| self.current_language.clone(), str::to_string);
        if source_language == target_language {
            return Ok(text.to_string());
        }

        let canonical = if source_language == self.canonical_language {
            text.to_string()
        } else {
            self.to_canonical(text, &source_language)?
        };
        if target_language == self.canonical_language {
            return Ok(canonical);
        }

        let table = self.ensure_loaded(target_language)?;
        Ok(table.get(&canonical).map(str::to_string).unwrap_or(canonical))
    }

    /// Translates `text` into each of `languages`, preserving their order.
    pub fn build_matrix<L: AsRef<str>>(
        &mut self,
        text: &str,
        languages: &[L],
        source_language: Option<&str>,
    ) -> Result<Vec<MatrixEntry>, ResolverError> {
        languages
            .iter()
            .map(|language| {
                let language = language.as_ref();
                Ok(MatrixEntry {
                    language: language.to_string(),
                    text: self.translate(text, language, source_language)?,
                })
            })
            .collect()
    }

    /// Canonical strings known for `language`, in ascending order.
    ///
    /// The canonical language has no table of its own; its vocabulary is the
    /// key set of the first loadable table, since every table shares the
    /// canonical key space.
    pub fn vocabulary(&mut self, language: &str) -> Result<Vec<String>, ResolverError> {
        if language != self.canonical_language {
            return Ok(self.ensure_loaded(language)?.keys().map(str::to_string).collect());
        }

        for candidate in self.available_languages()? {
            if candidate == self.canonical_language {
                continue;
            }
            match self.ensure_loaded(&candidate) {
                Ok(table) => return Ok(table.keys().map(str::to_string).collect()),
                Err(err) => {
                    tracing::debug!(language = %candidate, %err, "Skipping vocabulary source");
                }
            }
        }

        tracing::warn!(language, "No locale table to take the canonical vocabulary from");
        Ok(Vec::new())
    }

    /// Languages the locale source offers.
    pub fn available_languages(&self) -> Result<Vec<String>, ResolverError> {
        self.source.languages().map_err(ResolverError::LanguageDiscovery)
    }
}

/// Returns the cached table for `language`, loading it on first use.
fn cached_table<'a, S: LocaleSource>(
    locales: &'a mut HashMap<String, LocaleTable>,
    source: &S,
    canonical_language: &str,
    language: &str,
) -> Result<&'a LocaleTable, ResolverError> {
    match locales.entry(language.to_string()) {
        Entry::Occupied(entry) => Ok(entry.into_mut()),
        Entry::Vacant(entry) => {
            let table = if language == canonical_language {
                LocaleTable::empty(language)
            } else {
                source.load(language).map_err(|source| ResolverError::LocaleUnavailable {
                    language: language.to_string(),
                    source,
                })?
            };
            tracing::debug!(language, entries = table.len(), "Loaded locale table");
            Ok(entry.insert(table))
        }
    }
}
