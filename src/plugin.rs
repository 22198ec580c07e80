//! Translation plugin
//!
//! Answers one request: translate a single string, hand a page to an
//! external translation service, or tabulate how a set of page names and
//! vocabulary reads in every language.

/// Plugin arguments
mod args;
/// Row selection
mod filter;
/// Target language selection
mod languages;
/// Translation matrix
mod matrix;
/// External translation service links
mod service;

use serde::Serialize;
use thiserror::Error;

pub use args::{
    SortBy,
    TranslationArgs,
    What,
};
pub use filter::PageFilter;
pub use languages::default_languages;
pub use matrix::{
    CellStatus,
    MatrixCell,
    MatrixRow,
    TranslationMatrix,
};
pub use service::{
    page_url,
    service_url,
};

use crate::config::WikiSettings;
use crate::locale::LocaleSource;
use crate::resolver::{
    ResolverError,
    TranslationResolver,
};
use crate::wiki::{
    DirectoryPageStore,
    PageStore,
    PageStoreError,
    is_wiki_word,
};

#[derive(Error, Debug)]
pub enum PluginError {
    #[error("Invalid argument '{name}': {message}")]
    InvalidArgument { name: String, message: String },

    #[error("Invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("{0} is empty")]
    EmptyPage(String),

    #[error(transparent)]
    Resolver(#[from] ResolverError),

    #[error(transparent)]
    PageStore(#[from] PageStoreError),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

impl PluginError {
    pub fn invalid_argument(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidArgument { name: name.into(), message: message.into() }
    }
}

/// Result of a plugin run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "value")]
pub enum Output {
    /// A single translated string.
    Text(String),
    /// Link to the external translation service.
    Redirect(String),
    /// Notice for the reader, e.g. an unsupported service language.
    Message(String),
    Matrix(TranslationMatrix),
}

/// The translation plugin, bound to the wiki's settings.
#[derive(Debug, Clone, Copy)]
pub struct WikiTranslation<'a> {
    /// Wiki settings.
    settings: &'a WikiSettings,
}

impl<'a> WikiTranslation<'a> {
    #[must_use]
    pub const fn new(settings: &'a WikiSettings) -> Self {
        Self { settings }
    }

    /// Runs one request.
    ///
    /// Without `from_lang` the resolver's current language is the source.
    ///
    /// # Errors
    /// - the source language's table cannot be loaded
    /// - the requested page does not exist
    /// - invalid `match`/`exclude` patterns, page store failures
    pub fn run<S, P>(
        &self,
        resolver: &mut TranslationResolver<S>,
        pages: &P,
        args: &TranslationArgs,
    ) -> Result<Output, PluginError>
    where
        S: LocaleSource,
        P: PageStore,
    {
        let from_lang = args
            .from_lang
            .clone()
            .unwrap_or_else(|| resolver.current_language().to_string());
        let from_lang = from_lang.as_str();
        let languages = if args.languages.is_empty() {
            default_languages(
                &resolver.available_languages()?,
                from_lang,
                resolver.canonical_language(),
            )
        } else {
            args.languages.clone()
        };
        tracing::debug!(from_lang, ?languages, "Running translation plugin");

        if let Some(string) = &args.string
            && let [to_lang] = languages.as_slice()
        {
            return Ok(Output::Text(resolver.translate(string, to_lang, Some(from_lang))?));
        }

        if let Some(page) = &args.page {
            let to_lang = languages
                .iter()
                .find(|language| *language != from_lang)
                .map_or(resolver.canonical_language(), String::as_str);
            return self.translate_page(pages, page, from_lang, to_lang);
        }

        let matrix = self.build_matrix(resolver, pages, args, from_lang, &languages)?;
        Ok(Output::Matrix(matrix))
    }

    /// Hands `page` to the external translation service.
    fn translate_page<P: PageStore>(
        &self,
        pages: &P,
        page: &str,
        from_lang: &str,
        to_lang: &str,
    ) -> Result<Output, PluginError> {
        if !pages.is_wiki_page(page)? {
            return Err(PluginError::EmptyPage(page.to_string()));
        }

        let service = &self.settings.translation_service;
        let url = page_url(&self.settings.wiki_base_url, page)?;
        match service_url(service, from_lang, to_lang, &url)? {
            Some(redirect) => Ok(Output::Redirect(redirect.into())),
            None => Ok(Output::Message(format!(
                "The translation service can only translate from {}",
                service.source_languages.join(", ")
            ))),
        }
    }

    /// Tabulates the selected rows in every loadable target language.
    fn build_matrix<S, P>(
        &self,
        resolver: &mut TranslationResolver<S>,
        pages: &P,
        args: &TranslationArgs,
        from_lang: &str,
        languages: &[String],
    ) -> Result<TranslationMatrix, PluginError>
    where
        S: LocaleSource,
        P: PageStore,
    {
        resolver.ensure_loaded(from_lang)?;

        let mut columns = Vec::with_capacity(languages.len());
        for language in languages {
            if language == from_lang || columns.contains(language) {
                continue;
            }
            if let Err(err) = resolver.ensure_loaded(language) {
                tracing::warn!(language = %language, %err, "Skipping language");
                continue;
            }
            columns.push(language.clone());
        }

        let rows = self.collect_rows(resolver, pages, args, from_lang)?;
        let canonical_language = resolver.canonical_language().to_string();

        let mut matrix = TranslationMatrix::new(from_lang.to_string(), columns);
        for text in rows {
            let canonical = resolver.to_canonical(&text, from_lang)?;
            let mut cells = Vec::with_capacity(matrix.languages.len());
            for language in &matrix.languages {
                let translated = resolver.translate(&text, language, Some(from_lang))?;
                let untranslated = translated == text
                    || (from_lang != canonical_language
                        && *language != canonical_language
                        && translated == canonical);
                let status = if untranslated {
                    CellStatus::Untranslated { page_exists: pages.is_wiki_page(&translated)? }
                } else {
                    CellStatus::Translated
                };
                cells.push(MatrixCell { language: language.clone(), text: translated, status });
            }
            matrix.rows.push(MatrixRow { source: text, cells });
        }

        tracing::debug!(rows = matrix.rows.len(), columns = matrix.languages.len(), "Built matrix");
        Ok(matrix)
    }

    /// Row names in the source language, filtered, ordered and limited.
    fn collect_rows<S, P>(
        &self,
        resolver: &mut TranslationResolver<S>,
        pages: &P,
        args: &TranslationArgs,
        from_lang: &str,
    ) -> Result<Vec<String>, PluginError>
    where
        S: LocaleSource,
        P: PageStore,
    {
        if let Some(string) = &args.string {
            return Ok(vec![string.clone()]);
        }

        let filter = PageFilter::new(&args.match_pattern, &args.exclude)?;
        let names = match args.what {
            What::Pages => {
                let dir = self
                    .settings
                    .localized_pgsrc_dir(from_lang)
                    .unwrap_or_else(|| self.settings.pgsrc_dir.clone());
                tracing::debug!(?dir, "Listing page sources");
                DirectoryPageStore::new(dir).all_pages(true)?
            }
            What::AllPages => pages.all_pages(args.include_empty)?,
            What::WikiWords => {
                let canonical_language = resolver.canonical_language().to_string();
                let mut words = Vec::new();
                for key in resolver.vocabulary(from_lang)? {
                    let word =
                        resolver.translate(&key, from_lang, Some(canonical_language.as_str()))?;
                    if is_wiki_word(&word) && !words.contains(&word) {
                        words.push(word);
                    }
                }
                words
            }
        };

        Ok(filter.select(names, args.sort_by, args.limit))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::panic)]
mod tests {
    use std::fs;

    use googletest::prelude::*;
    use rstest::*;
    use tempfile::TempDir;

    use super::*;
    use crate::locale::MemoryLocaleSource;
    use crate::test_utils::{
        wiki_locales,
        wiki_pages,
    };
    use crate::wiki::MemoryPageStore;

    #[fixture]
    fn resolver() -> TranslationResolver<MemoryLocaleSource> {
        TranslationResolver::new(wiki_locales())
    }

    fn args(words: &[&str]) -> TranslationArgs {
        TranslationArgs::parse(words).unwrap()
    }

    fn matrix(output: Output) -> TranslationMatrix {
        match output {
            Output::Matrix(matrix) => matrix,
            other => panic!("expected a matrix, got {other:?}"),
        }
    }

    fn texts(row: &MatrixRow) -> Vec<&str> {
        row.cells.iter().map(|cell| cell.text.as_str()).collect()
    }

    #[rstest]
    fn single_string_single_language_is_text(
        mut resolver: TranslationResolver<MemoryLocaleSource>,
    ) {
        let settings = WikiSettings::default();

        let output = WikiTranslation::new(&settings)
            .run(&mut resolver, &wiki_pages(), &args(&["string=HomePage", "languages=de"]))
            .unwrap();

        assert_that!(output, eq(&Output::Text("Startseite".to_string())));
    }

    #[rstest]
    fn single_string_from_other_language(mut resolver: TranslationResolver<MemoryLocaleSource>) {
        let settings = WikiSettings::default();

        let output = WikiTranslation::new(&settings)
            .run(
                &mut resolver,
                &wiki_pages(),
                &args(&["string=Startseite", "languages=fr", "from_lang=de"]),
            )
            .unwrap();

        assert_that!(output, eq(&Output::Text("Accueil".to_string())));
    }

    #[rstest]
    fn source_language_defaults_to_resolver_current_language(
        mut resolver: TranslationResolver<MemoryLocaleSource>,
    ) {
        let settings = WikiSettings::default();
        resolver.set_current_language("de");

        let output = WikiTranslation::new(&settings)
            .run(&mut resolver, &wiki_pages(), &args(&["string=Startseite", "languages=fr"]))
            .unwrap();

        assert_that!(output, eq(&Output::Text("Accueil".to_string())));
    }

    #[rstest]
    fn single_string_many_languages_is_one_row_matrix(
        mut resolver: TranslationResolver<MemoryLocaleSource>,
    ) {
        let settings = WikiSettings::default();

        let output = WikiTranslation::new(&settings)
            .run(&mut resolver, &wiki_pages(), &args(&["string=HomePage"]))
            .unwrap();

        let matrix = matrix(output);
        assert_that!(matrix.headings(), elements_are![eq(&"en"), eq(&"de"), eq(&"fr")]);
        assert_that!(matrix.rows, len(eq(1)));
        assert_that!(texts(&matrix.rows[0]), elements_are![eq(&"Startseite"), eq(&"Accueil")]);
    }

    #[rstest]
    fn matrix_skips_unloadable_languages(mut resolver: TranslationResolver<MemoryLocaleSource>) {
        let settings = WikiSettings::default();

        let output = WikiTranslation::new(&settings)
            .run(&mut resolver, &wiki_pages(), &args(&["string=HomePage", "languages=sv,fr,en"]))
            .unwrap();

        assert_that!(matrix(output).languages, elements_are![eq("fr")]);
    }

    #[rstest]
    fn matrix_marks_untranslated_cells(mut resolver: TranslationResolver<MemoryLocaleSource>) {
        let settings = WikiSettings::default();

        let output = WikiTranslation::new(&settings)
            .run(
                &mut resolver,
                &wiki_pages(),
                &args(&["what=allpages", "include_empty=1", "sortby=pagename"]),
            )
            .unwrap();

        let matrix = matrix(output);
        let sandbox = matrix.rows.iter().find(|row| row.source == "SandBox").unwrap();
        assert_that!(sandbox.cells[0].status, eq(CellStatus::Translated));
        assert_that!(sandbox.cells[1].status, eq(CellStatus::Untranslated { page_exists: true }));

        let startseite = matrix.rows.iter().find(|row| row.source == "Startseite").unwrap();
        assert_that!(
            startseite.cells[0].status,
            eq(CellStatus::Untranslated { page_exists: true })
        );
    }

    #[rstest]
    fn canonical_fallback_between_other_languages_is_untranslated(
        mut resolver: TranslationResolver<MemoryLocaleSource>,
    ) {
        let settings = WikiSettings::default();
        let pages = MemoryPageStore::new().with_page("FindPage", "Search");

        let output = WikiTranslation::new(&settings)
            .run(
                &mut resolver,
                &pages,
                &args(&["string=SeiteFinden", "from_lang=de", "languages=en,fr"]),
            )
            .unwrap();

        let matrix = matrix(output);
        let row = &matrix.rows[0];
        assert_that!(texts(row), elements_are![eq(&"FindPage"), eq(&"FindPage")]);
        assert_that!(row.cells[0].status, eq(CellStatus::Translated));
        assert_that!(row.cells[1].status, eq(CellStatus::Untranslated { page_exists: true }));
    }

    #[rstest]
    fn allpages_filters_sorts_and_limits(mut resolver: TranslationResolver<MemoryLocaleSource>) {
        let settings = WikiSettings::default();

        let output = WikiTranslation::new(&settings)
            .run(
                &mut resolver,
                &wiki_pages(),
                &args(&["what=allpages", "exclude=SandBox", "sortby=-pagename", "limit=2"]),
            )
            .unwrap();

        let sources: Vec<String> = matrix(output).rows.into_iter().map(|row| row.source).collect();
        assert_that!(sources, elements_are![eq("Startseite"), eq("HomePage")]);
    }

    #[rstest]
    fn wikiwords_lists_source_language_vocabulary(
        mut resolver: TranslationResolver<MemoryLocaleSource>,
    ) {
        let settings = WikiSettings::default();

        let output = WikiTranslation::new(&settings)
            .run(
                &mut resolver,
                &wiki_pages(),
                &args(&["what=wikiwords", "from_lang=de", "languages=en", "match=Seite*"]),
            )
            .unwrap();

        let sources: Vec<String> = matrix(output).rows.into_iter().map(|row| row.source).collect();
        assert_that!(sources, elements_are![eq("SeiteFinden")]);
    }

    #[rstest]
    fn pages_reads_localized_page_sources(
        mut resolver: TranslationResolver<MemoryLocaleSource>,
    ) {
        let temp_dir = TempDir::new().unwrap();
        let localized = temp_dir.path().join("locale").join("de").join("pgsrc");
        fs::create_dir_all(&localized).unwrap();
        fs::write(localized.join("Startseite"), "Willkommen").unwrap();
        fs::create_dir_all(temp_dir.path().join("pgsrc")).unwrap();
        fs::write(temp_dir.path().join("pgsrc").join("HomePage"), "Welcome").unwrap();
        let settings = WikiSettings::default().resolve_paths(temp_dir.path());

        let german = WikiTranslation::new(&settings)
            .run(&mut resolver, &wiki_pages(), &args(&["from_lang=de", "languages=en"]))
            .unwrap();
        let english = WikiTranslation::new(&settings)
            .run(&mut resolver, &wiki_pages(), &args(&["languages=de"]))
            .unwrap();

        assert_that!(matrix(german).rows[0].source, eq("Startseite"));
        assert_that!(matrix(english).rows[0].source, eq("HomePage"));
    }

    #[rstest]
    fn page_redirects_to_translation_service(
        mut resolver: TranslationResolver<MemoryLocaleSource>,
    ) {
        let settings = WikiSettings::default();

        let output = WikiTranslation::new(&settings)
            .run(&mut resolver, &wiki_pages(), &args(&["page=HomePage", "languages=de"]))
            .unwrap();

        let Output::Redirect(url) = output else { panic!("expected a redirect, got {output:?}") };
        assert_that!(url, starts_with("http://translate.google.com/translate?"));
        assert_that!(url, contains_substring("langpair=en%7Cde"));
    }

    #[rstest]
    fn page_from_unsupported_language_is_message(
        mut resolver: TranslationResolver<MemoryLocaleSource>,
    ) {
        let settings = WikiSettings::default();

        let output = WikiTranslation::new(&settings)
            .run(&mut resolver, &wiki_pages(), &args(&["page=Startseite", "from_lang=de"]))
            .unwrap();

        assert!(matches!(output, Output::Message(ref message) if message.contains("en, fr")));
    }

    #[rstest]
    fn missing_page_is_error(mut resolver: TranslationResolver<MemoryLocaleSource>) {
        let settings = WikiSettings::default();

        let result = WikiTranslation::new(&settings).run(
            &mut resolver,
            &wiki_pages(),
            &args(&["page=RecentChanges"]),
        );

        assert!(matches!(result, Err(PluginError::EmptyPage(ref page)) if page == "RecentChanges"));
    }

    #[rstest]
    fn unknown_source_language_is_error(mut resolver: TranslationResolver<MemoryLocaleSource>) {
        let settings = WikiSettings::default();

        let result = WikiTranslation::new(&settings).run(
            &mut resolver,
            &wiki_pages(),
            &args(&["string=Hemsida", "from_lang=sv", "languages=de,fr"]),
        );

        assert!(matches!(
            result,
            Err(PluginError::Resolver(ResolverError::LocaleUnavailable { .. }))
        ));
    }

    #[rstest]
    fn output_serializes_with_kind() {
        let json = serde_json::to_value(Output::Text("Startseite".to_string())).unwrap();

        assert_that!(json, eq(&serde_json::json!({"kind": "text", "value": "Startseite"})));
    }
}
