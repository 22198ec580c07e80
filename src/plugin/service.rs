//! External page translation service links.

use url::Url;

use crate::config::TranslationServiceConfig;

/// Absolute URL of a wiki page.
///
/// The page name is appended to the base path as one encoded segment, so
/// `http://example.org/index.php` yields `http://example.org/index.php/HomePage`.
/// A query on the base is kept.
pub fn page_url(wiki_base_url: &str, page: &str) -> Result<Url, url::ParseError> {
    let mut url = Url::parse(wiki_base_url)?;
    url.path_segments_mut()
        .map_err(|()| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
        .pop_if_empty()
        .push(page);
    Ok(url)
}

/// Link asking the service to translate `page_url` from `from` into `to`.
///
/// Returns `None` when the service cannot translate from `from`.
pub fn service_url(
    service: &TranslationServiceConfig,
    from: &str,
    to: &str,
    page_url: &Url,
) -> Result<Option<Url>, url::ParseError> {
    if !service.source_languages.iter().any(|language| language == from) {
        return Ok(None);
    }

    let url = Url::parse_with_params(
        &service.url,
        &[("langpair", format!("{from}|{to}").as_str()), ("u", page_url.as_str())],
    )?;
    Ok(Some(url))
}
