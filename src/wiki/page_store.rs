//! Page stores
//!
//! The translation plugin only needs to know which pages exist and to list
//! them. Storage drivers live elsewhere; this module holds the interface, a
//! memoizing wrapper and two simple stores.

use std::borrow::Cow;
use std::cell::RefCell;
use std::collections::{
    BTreeMap,
    HashMap,
};
use std::fmt;
use std::path::{
    Path,
    PathBuf,
};

use ignore::WalkBuilder;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PageStoreError {
    #[error("Failed to read page store {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Page store backend error: {0}")]
    Backend(String),
}

/// Read access to the pages of a wiki.
pub trait PageStore: fmt::Debug {
    /// Returns true if `name` exists with non-default (non-empty) content.
    fn is_wiki_page(&self, name: &str) -> Result<bool, PageStoreError>;

    /// Lists page names, sorted. Empty pages are only listed when
    /// `include_empty` is set.
    fn all_pages(&self, include_empty: bool) -> Result<Vec<String>, PageStoreError>;
}

impl<P: PageStore + ?Sized> PageStore for &P {
    fn is_wiki_page(&self, name: &str) -> Result<bool, PageStoreError> {
        (**self).is_wiki_page(name)
    }

    fn all_pages(&self, include_empty: bool) -> Result<Vec<String>, PageStoreError> {
        (**self).all_pages(include_empty)
    }
}

/// Remembers `is_wiki_page` answers so the backend is asked at most once per
/// page name.
#[derive(Debug)]
pub struct CachedPageStore<P> {
    /// Wrapped store.
    backend: P,
    /// Page name → whether it exists.
    known: RefCell<HashMap<String, bool>>,
}

impl<P: PageStore> CachedPageStore<P> {
    pub fn new(backend: P) -> Self {
        Self { backend, known: RefCell::new(HashMap::new()) }
    }

    #[must_use]
    pub const fn backend(&self) -> &P {
        &self.backend
    }
}

impl<P: PageStore> PageStore for CachedPageStore<P> {
    fn is_wiki_page(&self, name: &str) -> Result<bool, PageStoreError> {
        if let Some(&exists) = self.known.borrow().get(name) {
            return Ok(exists);
        }

        let exists = self.backend.is_wiki_page(name)?;
        self.known.borrow_mut().insert(name.to_string(), exists);
        Ok(exists)
    }

    fn all_pages(&self, include_empty: bool) -> Result<Vec<String>, PageStoreError> {
        self.backend.all_pages(include_empty)
    }
}

/// Pages stored as one file per page in a directory.
///
/// File names are the URL-encoded page names (`PhpWikiAdministration%2FRemove`).
/// Both `+` and `%20` decode to a space.
/// Hidden files and editor backups ending in `~` are ignored. A page exists
/// when its file is non-empty.
#[derive(Debug, Clone)]
pub struct DirectoryPageStore {
    /// Page directory.
    root: PathBuf,
}

impl DirectoryPageStore {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File that holds `name`.
    #[must_use]
    pub fn page_path(&self, name: &str) -> PathBuf {
        self.root.join(urlencoding::encode(name).as_ref())
    }

    /// Page name for a file name, or `None` for files that are not pages.
    fn page_name(file_name: &str) -> Option<String> {
        if file_name.starts_with('.') || file_name.ends_with('~') {
            return None;
        }
        let file_name = file_name.replace('+', " ");
        let decoded = urlencoding::decode(&file_name).map(Cow::into_owned);
        match decoded {
            Ok(name) => Some(name),
            Err(err) => {
                tracing::warn!(%file_name, %err, "Page file name is not valid UTF-8 when decoded");
                Some(file_name)
            }
        }
    }

    fn io_error(&self, source: std::io::Error) -> PageStoreError {
        PageStoreError::Io { path: self.root.clone(), source }
    }
}

impl PageStore for DirectoryPageStore {
    fn is_wiki_page(&self, name: &str) -> Result<bool, PageStoreError> {
        match std::fs::metadata(self.page_path(name)) {
            Ok(metadata) => Ok(metadata.is_file() && metadata.len() > 0),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(err) => Err(self.io_error(err)),
        }
    }

    fn all_pages(&self, include_empty: bool) -> Result<Vec<String>, PageStoreError> {
        if !self.root.is_dir() {
            return Err(self.io_error(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "page directory does not exist",
            )));
        }

        let mut pages = Vec::new();
        for result in WalkBuilder::new(&self.root)
            .max_depth(Some(1))
            .hidden(true)
            .git_ignore(false)
            .git_global(false)
            .git_exclude(false)
            .ignore(false)
            .parents(false)
            .build()
        {
            let entry = match result {
                Ok(entry) => entry,
                Err(err) => {
                    tracing::debug!(?err, "Failed to read page directory entry");
                    continue;
                }
            };

            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                continue;
            }

            let Some(name) = Self::page_name(&entry.file_name().to_string_lossy()) else {
                continue;
            };

            if !include_empty {
                let metadata = entry.metadata().map_err(|err| {
                    PageStoreError::Io {
                        path: entry.path().to_path_buf(),
                        source: err.into_io_error().unwrap_or_else(|| {
                            std::io::Error::other("failed to read page metadata")
                        }),
                    }
                })?;
                if metadata.len() == 0 {
                    continue;
                }
            }

            pages.push(name);
        }

        pages.sort();
        Ok(pages)
    }
}

/// Pages held in memory (name → content).
#[derive(Debug, Clone, Default)]
pub struct MemoryPageStore {
    pages: BTreeMap<String, String>,
}

impl MemoryPageStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_page(mut self, name: impl Into<String>, content: impl Into<String>) -> Self {
        self.insert(name, content);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, content: impl Into<String>) {
        self.pages.insert(name.into(), content.into());
    }
}

impl PageStore for MemoryPageStore {
    fn is_wiki_page(&self, name: &str) -> Result<bool, PageStoreError> {
        Ok(self.pages.get(name).is_some_and(|content| !content.is_empty()))
    }

    fn all_pages(&self, include_empty: bool) -> Result<Vec<String>, PageStoreError> {
        Ok(self
            .pages
            .iter()
            .filter(|(_, content)| include_empty || !content.is_empty())
            .map(|(name, _)| name.clone())
            .collect())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::cell::Cell;
    use std::fs;

    use googletest::prelude::*;
    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;
    use crate::test_utils::wiki_pages;

    /// Counts backend lookups.
    #[derive(Debug, Default)]
    struct CountingStore {
        lookups: Cell<usize>,
    }

    impl PageStore for CountingStore {
        fn is_wiki_page(&self, name: &str) -> Result<bool, PageStoreError> {
            self.lookups.set(self.lookups.get() + 1);
            Ok(name == "HomePage")
        }

        fn all_pages(&self, _include_empty: bool) -> Result<Vec<String>, PageStoreError> {
            Ok(vec!["HomePage".to_string()])
        }
    }

    #[rstest]
    fn cached_store_asks_backend_once_per_name() {
        let store = CachedPageStore::new(CountingStore::default());

        assert_that!(store.is_wiki_page("HomePage").unwrap(), eq(true));
        assert_that!(store.is_wiki_page("HomePage").unwrap(), eq(true));
        assert_that!(store.is_wiki_page("Missing").unwrap(), eq(false));
        assert_that!(store.is_wiki_page("Missing").unwrap(), eq(false));

        assert_that!(store.backend().lookups.get(), eq(2));
    }

    #[rstest]
    fn cached_store_delegates_listing() {
        let store = CachedPageStore::new(CountingStore::default());

        assert_that!(store.all_pages(false).unwrap(), elements_are![eq("HomePage")]);
    }

    #[rstest]
    fn memory_store_treats_empty_pages_as_missing() {
        let store = wiki_pages();

        assert_that!(store.is_wiki_page("HomePage").unwrap(), eq(true));
        assert_that!(store.is_wiki_page("RecentChanges").unwrap(), eq(false));
        assert_that!(store.is_wiki_page("Nowhere").unwrap(), eq(false));
        assert_that!(store.all_pages(false).unwrap(), not(contains(eq("RecentChanges"))));
        assert_that!(store.all_pages(true).unwrap(), contains(eq("RecentChanges")));
    }

    #[rstest]
    fn directory_store_lists_decoded_page_names() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::write(root.join("HomePage"), "Welcome").unwrap();
        fs::write(root.join("PhpWikiAdministration%2FRemove"), "Remove pages").unwrap();
        fs::write(root.join("HomePage~"), "backup").unwrap();
        fs::write(root.join(".hidden"), "x").unwrap();
        fs::write(root.join("EmptyPage"), "").unwrap();
        fs::create_dir(root.join("subdir")).unwrap();

        let store = DirectoryPageStore::new(root);

        assert_that!(
            store.all_pages(false).unwrap(),
            elements_are![eq("HomePage"), eq("PhpWikiAdministration/Remove")]
        );
        assert_that!(
            store.all_pages(true).unwrap(),
            elements_are![eq("EmptyPage"), eq("HomePage"), eq("PhpWikiAdministration/Remove")]
        );
    }

    #[rstest]
    fn directory_store_decodes_plus_as_space() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::write(root.join("Sand+Box"), "Play here").unwrap();
        fs::write(root.join("C%2B%2BPage"), "Templates").unwrap();

        let store = DirectoryPageStore::new(root);

        assert_that!(store.all_pages(false).unwrap(), elements_are![eq("C++Page"), eq("Sand Box")]);
    }

    #[rstest]
    fn directory_store_checks_page_files() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::write(root.join("HomePage"), "Welcome").unwrap();
        fs::write(root.join("PhpWikiAdministration%2FRemove"), "Remove pages").unwrap();
        fs::write(root.join("EmptyPage"), "").unwrap();

        let store = DirectoryPageStore::new(root);

        assert_that!(store.is_wiki_page("HomePage").unwrap(), eq(true));
        assert_that!(store.is_wiki_page("PhpWikiAdministration/Remove").unwrap(), eq(true));
        assert_that!(store.is_wiki_page("EmptyPage").unwrap(), eq(false));
        assert_that!(store.is_wiki_page("Missing").unwrap(), eq(false));
    }

    #[rstest]
    fn directory_store_missing_root_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let store = DirectoryPageStore::new(temp_dir.path().join("pgsrc"));

        assert!(matches!(store.all_pages(true), Err(PageStoreError::Io { .. })));
        assert_that!(store.is_wiki_page("HomePage").unwrap(), eq(false));
    }
}
