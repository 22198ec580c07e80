use std::path::{
    Path,
    PathBuf,
};

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "translationService.sourceLanguages[0]")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WikiSettings {
    /// Directory holding one locale table per language.
    pub locale_dir: PathBuf,

    /// Page source directory used when a language has no localized one.
    pub pgsrc_dir: PathBuf,

    /// Pivot language for translations between two other languages.
    pub canonical_language: String,

    /// Source language when a request names none.
    pub default_language: String,

    /// Entries of `locale_dir` that are not languages.
    pub excluded_locale_dirs: Vec<String>,

    /// Separator joining nested keys of JSON locale tables.
    pub key_separator: String,

    /// Base URL that page names are appended to.
    pub wiki_base_url: String,

    pub translation_service: TranslationServiceConfig,
}

/// External page translation service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TranslationServiceConfig {
    pub url: String,

    /// Languages the service can translate from.
    pub source_languages: Vec<String>,
}

impl Default for TranslationServiceConfig {
    fn default() -> Self {
        Self {
            url: "http://translate.google.com/translate".to_string(),
            source_languages: vec!["en".to_string(), "fr".to_string()],
        }
    }
}

impl WikiSettings {
    /// # Errors
    /// - Required field is empty
    /// - Invalid URL
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.locale_dir.as_os_str().is_empty() {
            errors.push(ValidationError::new(
                "localeDir",
                "The directory cannot be empty. Example: \"locale\"",
            ));
        }

        if self.pgsrc_dir.as_os_str().is_empty() {
            errors.push(ValidationError::new(
                "pgsrcDir",
                "The directory cannot be empty. Example: \"pgsrc\"",
            ));
        }

        if self.canonical_language.is_empty() {
            errors.push(ValidationError::new(
                "canonicalLanguage",
                "The language cannot be empty. Example: \"en\"",
            ));
        }

        if self.default_language.is_empty() {
            errors.push(ValidationError::new(
                "defaultLanguage",
                "The language cannot be empty. Example: \"en\"",
            ));
        }

        if self.key_separator.is_empty() {
            errors.push(ValidationError::new(
                "keySeparator",
                "The separator cannot be empty. Please specify a separator, for example: \".\" (dot)",
            ));
        }

        match url::Url::parse(&self.wiki_base_url) {
            Ok(url) if url.cannot_be_a_base() => errors.push(ValidationError::new(
                "wikiBaseUrl",
                format!("URL '{}' cannot have page names appended", self.wiki_base_url),
            )),
            Ok(_) => {}
            Err(e) => errors.push(ValidationError::new(
                "wikiBaseUrl",
                format!("Invalid URL '{}': {e}", self.wiki_base_url),
            )),
        }

        if let Err(e) = url::Url::parse(&self.translation_service.url) {
            errors.push(ValidationError::new(
                "translationService.url",
                format!("Invalid URL '{}': {e}", self.translation_service.url),
            ));
        }

        if self.translation_service.source_languages.is_empty() {
            errors.push(ValidationError::new(
                "translationService.sourceLanguages",
                "At least one language is required. Example: [\"en\", \"fr\"]",
            ));
        }

        for (index, language) in self.translation_service.source_languages.iter().enumerate() {
            if language.is_empty() {
                errors.push(ValidationError::new(
                    format!("translationService.sourceLanguages[{index}]"),
                    "The language cannot be empty",
                ));
            }
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Makes relative directories relative to `root`.
    #[must_use]
    pub fn resolve_paths(mut self, root: &Path) -> Self {
        if self.locale_dir.is_relative() {
            self.locale_dir = root.join(&self.locale_dir);
        }
        if self.pgsrc_dir.is_relative() {
            self.pgsrc_dir = root.join(&self.pgsrc_dir);
        }
        self
    }

    /// Localized page source directory for `language`, if the locale
    /// directory has one.
    #[must_use]
    pub fn localized_pgsrc_dir(&self, language: &str) -> Option<PathBuf> {
        let dir = self.locale_dir.join(language).join("pgsrc");
        dir.is_dir().then_some(dir)
    }
}

impl Default for WikiSettings {
    fn default() -> Self {
        Self {
            locale_dir: PathBuf::from("locale"),
            pgsrc_dir: PathBuf::from("pgsrc"),
            canonical_language: "en".to_string(),
            default_language: "en".to_string(),
            excluded_locale_dirs: vec!["po".to_string(), "CVS".to_string()],
            key_separator: ".".to_string(),
            wiki_base_url: "http://localhost/wiki/".to_string(),
            translation_service: TranslationServiceConfig::default(),
        }
    }
}
