//! Test fixtures
//!
//! Locale tables and pages shared by several test modules.
#![cfg(test)]

use crate::locale::MemoryLocaleSource;
use crate::wiki::MemoryPageStore;

/// German and French tables for a handful of wiki page names.
///
/// - `de` maps both `FullTextSearch` and `TitleSearch` to `Suche`
/// - `de` leaves `UpLoad` untranslated (empty value)
/// - `fr` only knows `HomePage` and `RecentChanges`
pub(crate) fn wiki_locales() -> MemoryLocaleSource {
    MemoryLocaleSource::new()
        .with_table(
            "de",
            [
                ("Edit", "Bearbeiten"),
                ("FindPage", "SeiteFinden"),
                ("FullTextSearch", "Suche"),
                ("HomePage", "Startseite"),
                ("RecentChanges", "LetzteÄnderungen"),
                ("SandBox", "SpielWiese"),
                ("TitleSearch", "Suche"),
                ("UpLoad", ""),
            ],
        )
        .with_table("fr", [("HomePage", "Accueil"), ("RecentChanges", "ModificationsRécentes")])
}

/// Pages present in the test wiki.
pub(crate) fn wiki_pages() -> MemoryPageStore {
    MemoryPageStore::new()
        .with_page("HomePage", "Welcome")
        .with_page("Startseite", "Willkommen")
        .with_page("FindPage", "Search")
        .with_page("SandBox", "Play here")
        .with_page("RecentChanges", "")
}
