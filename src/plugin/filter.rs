//! Row selection for translation matrices.

use globset::{
    Glob,
    GlobMatcher,
    GlobSet,
    GlobSetBuilder,
};

use super::{
    PluginError,
    SortBy,
};

/// Keeps names matching the `match` glob and none of the `exclude` entries.
#[derive(Debug, Clone)]
pub struct PageFilter {
    /// `None` when every name matches (`*`).
    include: Option<GlobMatcher>,
    exclude: GlobSet,
}

impl PageFilter {
    pub fn new(match_pattern: &str, exclude: &[String]) -> Result<Self, PluginError> {
        let include = if match_pattern == "*" {
            None
        } else {
            Some(Self::glob(match_pattern)?.compile_matcher())
        };

        let mut builder = GlobSetBuilder::new();
        for pattern in exclude {
            builder.add(Self::glob(pattern)?);
        }
        let exclude = builder.build().map_err(|source| PluginError::InvalidPattern {
            pattern: exclude.join(","),
            source,
        })?;

        Ok(Self { include, exclude })
    }

    fn glob(pattern: &str) -> Result<Glob, PluginError> {
        Glob::new(pattern)
            .map_err(|source| PluginError::InvalidPattern { pattern: pattern.to_string(), source })
    }

    #[must_use]
    pub fn is_match(&self, name: &str) -> bool {
        self.include.as_ref().is_none_or(|glob| glob.is_match(name)) && !self.exclude.is_match(name)
    }

    /// Filters, orders and truncates `names`. A `limit` of 0 keeps all.
    pub fn select(
        &self,
        names: impl IntoIterator<Item = String>,
        sort_by: SortBy,
        limit: usize,
    ) -> Vec<String> {
        let mut selected: Vec<String> = names.into_iter().filter(|n| self.is_match(n)).collect();
        match sort_by {
            SortBy::Unsorted => {}
            SortBy::Ascending => selected.sort(),
            SortBy::Descending => selected.sort_by(|a, b| b.cmp(a)),
        }
        if limit > 0 {
            selected.truncate(limit);
        }
        selected
    }
}
