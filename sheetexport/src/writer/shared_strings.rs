//! Shared-string table built from every textual cell in a workbook

use std::collections::HashMap;
use std::fmt::Write as _;
use std::sync::LazyLock;

use regex::Regex;

use super::xml::{XML_DECLARATION, escape_text};
use crate::model::Workbook;

/// Optional sign, ASCII digits with an optional leading decimal part, optional exponent
static NUMERIC_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:[0-9]*\.)?[0-9]+(?:[eE][+-]?[0-9]+)?$").expect("numeric pattern is valid")
});

/// Whether a value's string form is written inline as a number
pub fn is_numeric(value: &str) -> bool {
    NUMERIC_PATTERN.is_match(value)
}

/// Deduplicated, insertion-ordered string table
#[derive(Debug, Clone, Default)]
pub struct SharedStrings {
    strings: Vec<String>,
    index: HashMap<String, usize>,
    count: usize,
}

impl SharedStrings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan every cell in sheet, row, column order
    pub fn from_workbook(workbook: &Workbook) -> Self {
        let mut table = Self::new();
        for cell in workbook.cells() {
            table.insert(&cell.value.to_text());
        }
        log::debug!(
            "shared strings: {} occurrences, {} unique",
            table.count,
            table.strings.len()
        );
        table
    }

    /// Record one occurrence of `value`
    ///
    /// Returns the table index, or `None` when the value is numeric and stays inline.
    pub fn insert(&mut self, value: &str) -> Option<usize> {
        if is_numeric(value) {
            return None;
        }

        self.count += 1;
        if let Some(&idx) = self.index.get(value) {
            return Some(idx);
        }

        let idx = self.strings.len();
        self.strings.push(value.to_string());
        self.index.insert(value.to_string(), idx);
        Some(idx)
    }

    /// Index of a textual value already in the table
    pub fn index_of(&self, value: &str) -> Option<usize> {
        self.index.get(value).copied()
    }

    /// Total number of textual occurrences (not unique)
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn unique_count(&self) -> usize {
        self.strings.len()
    }

    pub fn strings(&self) -> &[String] {
        &self.strings
    }

    /// Render `xl/sharedStrings.xml`
    pub fn to_xml(&self) -> String {
        let mut xml = String::with_capacity(128 + self.strings.len() * 24);
        xml.push_str(XML_DECLARATION);
        let _ = write!(
            xml,
            r#"<sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" count="{}" uniqueCount="{}">"#,
            self.count,
            self.strings.len()
        );
        for s in &self.strings {
            if needs_preserve(s) {
                let _ = write!(xml, r#"<si><t xml:space="preserve">{}</t></si>"#, escape_text(s));
            } else {
                let _ = write!(xml, "<si><t>{}</t></si>", escape_text(s));
            }
        }
        xml.push_str("</sst>");
        xml
    }
}

fn needs_preserve(s: &str) -> bool {
    s.starts_with(char::is_whitespace) || s.ends_with(char::is_whitespace) || s.contains('\n')
}
