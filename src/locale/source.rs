//! Locale table sources

use std::collections::{
    BTreeMap,
    BTreeSet,
};
use std::fmt;
use std::path::{
    Path,
    PathBuf,
};

use ignore::WalkBuilder;
use serde_json::Value;
use thiserror::Error;

use super::{
    LocaleTable,
    flatten_table,
};

/// Errors raised while loading a locale table.
#[derive(Error, Debug)]
pub enum LocaleError {
    #[error("No locale table for language '{0}'")]
    NotFound(String),

    #[error("Failed to read locale table {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse locale table {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Locale table {0:?} is not a JSON object")]
    NotAnObject(PathBuf),
}

/// Supplies locale tables by language.
pub trait LocaleSource: fmt::Debug {
    /// Loads the table for `language`.
    ///
    /// Returns [`LocaleError::NotFound`] when the source has no table for it.
    fn load(&self, language: &str) -> Result<LocaleTable, LocaleError>;

    /// Languages this source can offer, sorted.
    fn languages(&self) -> Result<Vec<String>, LocaleError>;
}

impl<S: LocaleSource + ?Sized> LocaleSource for &S {
    fn load(&self, language: &str) -> Result<LocaleTable, LocaleError> {
        (**self).load(language)
    }

    fn languages(&self) -> Result<Vec<String>, LocaleError> {
        (**self).languages()
    }
}

/// Normalize language code (replace - with _)
fn normalize_language_code(code: &str) -> String {
    code.replace('-', "_")
}

/// Reads JSON locale tables from a locale directory.
///
/// For a language `de` the following files are tried in order:
/// - `<root>/de/LC_MESSAGES/phpwiki.json`
/// - `<root>/de.json`
///
/// A code written with `-` also matches a directory written with `_`
/// (`pt-BR` → `pt_BR`).
#[derive(Debug, Clone)]
pub struct DirectoryLocaleSource {
    /// Locale directory.
    root: PathBuf,
    /// Separator used to join nested JSON keys.
    key_separator: String,
    /// Directory names that never hold a language (`po`, `CVS`).
    excluded: Vec<String>,
}

impl DirectoryLocaleSource {
    /// Message catalog name inside `LC_MESSAGES`.
    pub const CATALOG: &'static str = "phpwiki.json";

    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            key_separator: ".".to_string(),
            excluded: vec!["po".to_string(), "CVS".to_string()],
        }
    }

    #[must_use]
    pub fn with_key_separator(mut self, separator: impl Into<String>) -> Self {
        self.key_separator = separator.into();
        self
    }

    #[must_use]
    pub fn with_excluded(mut self, excluded: Vec<String>) -> Self {
        self.excluded = excluded;
        self
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Candidate files for a language, most specific first.
    fn candidates(&self, language: &str) -> Vec<PathBuf> {
        let mut codes = vec![language.to_string()];
        let normalized = normalize_language_code(language);
        if normalized != language {
            codes.push(normalized);
        }

        codes
            .iter()
            .flat_map(|code| {
                [
                    self.root.join(code).join("LC_MESSAGES").join(Self::CATALOG),
                    self.root.join(format!("{code}.json")),
                ]
            })
            .collect()
    }

    /// Parses one locale file.
    fn read_table(&self, language: &str, path: &Path) -> Result<LocaleTable, LocaleError> {
        tracing::debug!("Loading locale table from: {:?}", path);

        let content = std::fs::read_to_string(path)
            .map_err(|source| LocaleError::Io { path: path.to_path_buf(), source })?;
        let json: Value = serde_json::from_str(&content)
            .map_err(|source| LocaleError::Parse { path: path.to_path_buf(), source })?;
        if !json.is_object() {
            return Err(LocaleError::NotAnObject(path.to_path_buf()));
        }

        Ok(LocaleTable::new(language, flatten_table(&json, &self.key_separator)))
    }

    /// Whether a directory entry name can be a language.
    fn is_language_name(&self, name: &str) -> bool {
        !name.is_empty() && !name.starts_with('.') && !self.excluded.iter().any(|e| e == name)
    }
}

impl LocaleSource for DirectoryLocaleSource {
    fn load(&self, language: &str) -> Result<LocaleTable, LocaleError> {
        if !self.is_language_name(language) || language.contains(['/', '\\']) {
            return Err(LocaleError::NotFound(language.to_string()));
        }

        let path = self
            .candidates(language)
            .into_iter()
            .find(|path| path.is_file())
            .ok_or_else(|| LocaleError::NotFound(language.to_string()))?;

        self.read_table(language, &path)
    }

    fn languages(&self) -> Result<Vec<String>, LocaleError> {
        if !self.root.is_dir() {
            return Err(LocaleError::Io {
                path: self.root.clone(),
                source: std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "locale directory does not exist",
                ),
            });
        }

        let mut languages = BTreeSet::new();
        for result in WalkBuilder::new(&self.root)
            .max_depth(Some(1))
            .hidden(true)
            .git_ignore(false)
            .git_global(false)
            .git_exclude(false)
            .ignore(false)
            .parents(false)
            .follow_links(true)
            .build()
        {
            let entry = match result {
                Ok(entry) => entry,
                Err(err) => {
                    tracing::warn!(?err, "Failed to read locale directory entry");
                    continue;
                }
            };
            if entry.depth() == 0 {
                continue;
            }

            let path = entry.path();
            let Some(file_type) = entry.file_type() else {
                continue;
            };
            let name = if file_type.is_dir() {
                path.file_name()
            } else if path.extension().is_some_and(|ext| ext == "json") {
                path.file_stem()
            } else {
                None
            };

            if let Some(name) = name.map(|n| n.to_string_lossy().to_string())
                && self.is_language_name(&name)
            {
                languages.insert(name);
            }
        }

        Ok(languages.into_iter().collect())
    }
}

/// Locale tables held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryLocaleSource {
    /// Language → canonical → localized.
    tables: BTreeMap<String, BTreeMap<String, String>>,
}

impl MemoryLocaleSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) the table for `language`.
    #[must_use]
    pub fn with_table<K, V>(
        mut self,
        language: impl Into<String>,
        entries: impl IntoIterator<Item = (K, V)>,
    ) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.insert(language, entries);
        self
    }

    /// Adds (or replaces) the table for `language`.
    pub fn insert<K, V>(
        &mut self,
        language: impl Into<String>,
        entries: impl IntoIterator<Item = (K, V)>,
    ) where
        K: Into<String>,
        V: Into<String>,
    {
        self.tables.insert(
            language.into(),
            entries.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        );
    }
}

impl LocaleSource for MemoryLocaleSource {
    fn load(&self, language: &str) -> Result<LocaleTable, LocaleError> {
        self.tables
            .get(language)
            .map(|entries| LocaleTable::new(language, entries.clone()))
            .ok_or_else(|| LocaleError::NotFound(language.to_string()))
    }

    fn languages(&self) -> Result<Vec<String>, LocaleError> {
        Ok(self.tables.keys().cloned().collect())
    }
}
