//! Workbook data structures consumed by the writer

use serde::{Deserialize, Serialize};

/// Represents a complete workbook
///
/// Sheet order is significant: the first sheet is the active one when the
/// package is opened.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Workbook {
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn new(sheets: Vec<Sheet>) -> Self {
        Self { sheets }
    }

    /// Get a sheet by name
    pub fn get_sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }

    /// Get all sheet names
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }

    /// Iterate over every cell in sheet, row, column order
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.sheets.iter().flat_map(|s| s.cells())
    }
}

/// Represents a worksheet
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sheet {
    pub name: String,
    /// Rows in the order they are written
    #[serde(default)]
    pub grid: Vec<Vec<Cell>>,
}

impl Sheet {
    pub fn new(name: impl Into<String>, grid: Vec<Vec<Cell>>) -> Self {
        Self {
            name: name.into(),
            grid,
        }
    }

    /// Build a sheet whose cell coordinates follow the grid position
    pub fn from_values<V: Into<CellValue>>(name: impl Into<String>, rows: Vec<Vec<V>>) -> Self {
        let grid = rows
            .into_iter()
            .enumerate()
            .map(|(r, row)| {
                row.into_iter()
                    .enumerate()
                    .map(|(c, value)| Cell::new(r as u32, c as u32, value))
                    .collect()
            })
            .collect();
        Self::new(name, grid)
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.grid.iter().flatten()
    }

    /// Length of the longest row
    pub fn max_row_len(&self) -> usize {
        self.grid.iter().map(Vec::len).max().unwrap_or(0)
    }
}

/// A single cell anchored at (`row_index`, `col_index`)
///
/// The coordinates are authoritative for references and merges; they are
/// never re-derived from the cell's position in the grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    #[serde(default)]
    pub value: CellValue,
    pub row_index: u32,
    pub col_index: u32,
    #[serde(default = "default_span")]
    pub row_span: u32,
    #[serde(default = "default_span")]
    pub col_span: u32,
}

fn default_span() -> u32 {
    1
}

impl Cell {
    pub fn new(row_index: u32, col_index: u32, value: impl Into<CellValue>) -> Self {
        Self {
            value: value.into(),
            row_index,
            col_index,
            row_span: 1,
            col_span: 1,
        }
    }

    pub fn with_span(mut self, row_span: u32, col_span: u32) -> Self {
        self.row_span = row_span;
        self.col_span = col_span;
        self
    }

    pub fn is_merged(&self) -> bool {
        self.row_span > 1 || self.col_span > 1
    }
}

/// Scalar cell content
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
    #[default]
    Empty,
}

impl CellValue {
    /// String form used to classify the value as numeric or textual
    pub fn to_text(&self) -> String {
        match self {
            CellValue::Number(n) => n.to_string(),
            CellValue::Text(s) => s.clone(),
            CellValue::Empty => String::new(),
        }
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<i32> for CellValue {
    fn from(n: i32) -> Self {
        CellValue::Number(f64::from(n))
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(CellValue::Empty, Into::into)
    }
}
