//! wiki-translation
//!
//! Wiki ページ名・文字列のロケールテーブル翻訳。正規言語 (canonical language) を経由して任意の言語間で翻訳する。

pub mod config;
pub mod locale;
pub mod plugin;
pub mod resolver;
pub mod wiki;

#[cfg(test)]
mod test_utils;

pub use plugin::WikiTranslation;
pub use resolver::TranslationResolver;
