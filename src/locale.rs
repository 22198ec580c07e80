//! Locale tables and the sources they are loaded from.
//!
//! A locale table maps a canonical string (a page name or UI label in the
//! canonical language) to its localized form in one language.

/// JSON locale file decoding
mod json;
/// Locale table sources (directory, in-memory)
mod source;
/// Forward and reverse locale tables
mod table;

pub use json::flatten_table;
pub use source::{
    DirectoryLocaleSource,
    LocaleError,
    LocaleSource,
    MemoryLocaleSource,
};
pub use table::{
    LocaleTable,
    ReverseLocaleTable,
};
