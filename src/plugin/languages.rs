//! Target language selection.

/// Languages a matrix shows when the request names none.
///
/// The canonical language comes first unless it is the source, then every
/// other available language in order, and the source language last.
#[must_use]
pub fn default_languages(
    available: &[String],
    source_language: &str,
    canonical_language: &str,
) -> Vec<String> {
    let mut languages = Vec::with_capacity(available.len() + 2);
    if source_language != canonical_language {
        languages.push(canonical_language.to_string());
    }
    for language in available {
        if language != source_language && !languages.contains(language) {
            languages.push(language.clone());
        }
    }
    languages.push(source_language.to_string());
    languages
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;

    use super::*;

    fn available() -> Vec<String> {
        vec!["de".to_string(), "fr".to_string(), "nl".to_string()]
    }

    #[rstest]
    fn non_canonical_source_puts_canonical_first() {
        assert_that!(
            default_languages(&available(), "de", "en"),
            elements_are![eq("en"), eq("fr"), eq("nl"), eq("de")]
        );
    }

    #[rstest]
    fn canonical_source_is_listed_last() {
        assert_that!(
            default_languages(&available(), "en", "en"),
            elements_are![eq("de"), eq("fr"), eq("nl"), eq("en")]
        );
    }

    #[rstest]
    fn canonical_directory_is_not_repeated() {
        let available = vec!["de".to_string(), "en".to_string()];

        assert_that!(
            default_languages(&available, "de", "en"),
            elements_are![eq("en"), eq("de")]
        );
    }

    #[rstest]
    fn source_missing_from_locale_directory_is_still_listed() {
        assert_that!(
            default_languages(&available(), "sv", "en"),
            elements_are![eq("en"), eq("de"), eq("fr"), eq("nl"), eq("sv")]
        );
    }
}
