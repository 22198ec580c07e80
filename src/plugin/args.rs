//! Plugin arguments

use std::str::FromStr;

use serde::Serialize;

use super::PluginError;

/// Which rows a translation matrix is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum What {
    /// Pages shipped in the page source directory.
    #[default]
    Pages,
    /// Every page in the page store.
    AllPages,
    /// Wiki words of the source language's locale table.
    WikiWords,
}

impl FromStr for What {
    type Err = PluginError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pages" => Ok(Self::Pages),
            "allpages" => Ok(Self::AllPages),
            "wikiwords" => Ok(Self::WikiWords),
            other => Err(PluginError::invalid_argument(
                "what",
                format!("expected pages, allpages or wikiwords, got '{other}'"),
            )),
        }
    }
}

/// Row order of a translation matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    /// Keep the order rows were collected in.
    #[default]
    Unsorted,
    Ascending,
    Descending,
}

impl FromStr for SortBy {
    type Err = PluginError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" => Ok(Self::Unsorted),
            "pagename" | "+pagename" | "pagename ASC" => Ok(Self::Ascending),
            "-pagename" | "pagename DESC" => Ok(Self::Descending),
            other => Err(PluginError::invalid_argument(
                "sortby",
                format!("expected pagename, +pagename or -pagename, got '{other}'"),
            )),
        }
    }
}

/// Arguments of the translation plugin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationArgs {
    /// Target languages; empty means every available language.
    pub languages: Vec<String>,
    /// Single string to translate.
    pub string: Option<String>,
    /// Page to hand to the external translation service.
    pub page: Option<String>,
    pub what: What,
    /// Glob applied to row names; `*` keeps everything.
    pub match_pattern: String,
    /// Source language; the configured default when `None`.
    pub from_lang: Option<String>,
    /// `allpages`: also list empty pages.
    pub include_empty: bool,
    /// Page names or globs left out of the matrix.
    pub exclude: Vec<String>,
    pub sort_by: SortBy,
    /// Maximum number of rows, 0 for no limit.
    pub limit: usize,
}

impl Default for TranslationArgs {
    fn default() -> Self {
        Self {
            languages: Vec::new(),
            string: None,
            page: None,
            what: What::default(),
            match_pattern: "*".to_string(),
            from_lang: None,
            include_empty: false,
            exclude: Vec::new(),
            sort_by: SortBy::default(),
            limit: 0,
        }
    }
}

impl TranslationArgs {
    /// Builds arguments from `name=value` pairs.
    ///
    /// # Errors
    /// Unknown names and malformed values.
    pub fn from_pairs<'a>(
        pairs: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Result<Self, PluginError> {
        let mut args = Self::default();
        for (name, value) in pairs {
            args.set(name, value)?;
        }
        Ok(args)
    }

    /// Parses `name=value` words, as written in a plugin invocation.
    ///
    /// # Errors
    /// Words without `=`, unknown names and malformed values.
    pub fn parse<S: AsRef<str>>(words: &[S]) -> Result<Self, PluginError> {
        let pairs = words
            .iter()
            .map(|word| {
                let word = word.as_ref();
                word.split_once('=').ok_or_else(|| {
                    PluginError::invalid_argument(word, "expected name=value")
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_pairs(pairs)
    }

    /// Sets one argument by name.
    fn set(&mut self, name: &str, value: &str) -> Result<(), PluginError> {
        let value = value.trim().trim_matches(|c| c == '"' || c == '\'');
        match name.trim() {
            "languages" => self.languages = split_list(value),
            "string" => self.string = non_empty(value),
            "page" => self.page = non_empty(value),
            "what" => self.what = value.parse()?,
            "match" => self.match_pattern = if value.is_empty() { "*" } else { value }.to_string(),
            "from_lang" => self.from_lang = non_empty(value),
            "include_empty" => self.include_empty = parse_bool("include_empty", value)?,
            "exclude" => self.exclude = split_list(value),
            "sortby" => self.sort_by = value.parse()?,
            "limit" => {
                self.limit = if value.is_empty() {
                    0
                } else {
                    value.parse().map_err(|e| {
                        PluginError::invalid_argument("limit", format!("'{value}': {e}"))
                    })?
                };
            }
            other => return Err(PluginError::invalid_argument(other, "unknown argument")),
        }
        Ok(())
    }
}

/// Splits a comma-separated list, dropping blanks.
fn split_list(value: &str) -> Vec<String> {
    value.split(',').map(str::trim).filter(|s| !s.is_empty()).map(str::to_string).collect()
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

fn parse_bool(name: &str, value: &str) -> Result<bool, PluginError> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "" | "0" | "false" | "no" | "off" => Ok(false),
        other => Err(PluginError::invalid_argument(name, format!("'{other}' is not a boolean"))),
    }
}
