//! Translation matrix: one row per string, one column per language.

use std::fmt::Write as _;

use serde::Serialize;

/// Whether a cell holds a real translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "status")]
pub enum CellStatus {
    Translated,
    /// No translation exists. `page_exists` tells whether a page by the
    /// untranslated name exists, so a translation can be defined for it.
    #[serde(rename_all = "camelCase")]
    Untranslated { page_exists: bool },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatrixCell {
    pub language: String,
    pub text: String,
    #[serde(flatten)]
    pub status: CellStatus,
}

impl MatrixCell {
    #[must_use]
    pub const fn is_translated(&self) -> bool {
        matches!(self.status, CellStatus::Translated)
    }

    /// Cell text as shown in a text table.
    ///
    /// Untranslated cells are blank, or `[name]` when a page by that name
    /// exists and is waiting for a translation.
    #[must_use]
    pub fn display_text(&self) -> String {
        match self.status {
            CellStatus::Translated => self.text.clone(),
            CellStatus::Untranslated { page_exists: true } => format!("[{}]", self.text),
            CellStatus::Untranslated { page_exists: false } => String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatrixRow {
    /// String in the source language.
    pub source: String,
    pub cells: Vec<MatrixCell>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationMatrix {
    pub source_language: String,
    /// Column languages, source language excluded.
    pub languages: Vec<String>,
    pub rows: Vec<MatrixRow>,
}

impl TranslationMatrix {
    #[must_use]
    pub const fn new(source_language: String, languages: Vec<String>) -> Self {
        Self { source_language, languages, rows: Vec::new() }
    }

    /// Column headings: the source language, then the target languages.
    #[must_use]
    pub fn headings(&self) -> Vec<&str> {
        std::iter::once(self.source_language.as_str())
            .chain(self.languages.iter().map(String::as_str))
            .collect()
    }

    /// Renders the matrix as a column-aligned text table.
    #[must_use]
    pub fn render_text(&self) -> String {
        let lines: Vec<Vec<String>> = std::iter::once(
            self.headings().into_iter().map(str::to_string).collect(),
        )
        .chain(self.rows.iter().map(|row| {
            std::iter::once(row.source.clone())
                .chain(row.cells.iter().map(MatrixCell::display_text))
                .collect()
        }))
        .collect();

        let mut widths = vec![0_usize; self.languages.len() + 1];
        for line in &lines {
            for (width, cell) in widths.iter_mut().zip(line) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let mut out = String::new();
        for line in &lines {
            let mut rendered = String::new();
            for (index, (cell, width)) in line.iter().zip(&widths).enumerate() {
                if index > 0 {
                    rendered.push_str("  ");
                }
                let _ = write!(rendered, "{cell:<width$}");
            }
            out.push_str(rendered.trim_end());
            out.push('\n');
        }
        out
    }
}
