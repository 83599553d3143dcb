//! Configuration for package generation
//!
//! Values are layered: built-in defaults, then a TOML file, then explicit
//! overrides (usually from the command line). Layout values can also be set
//! per sheet and fall back to the global ones.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use crate::error::{Result, XlsxError};

/// MIME type of `.xlsx` packages
pub const XLSX_MIME_TYPE: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Custom property name reserved for the generated document id
pub const DOCUMENT_ID_PROPERTY: &str = "DocumentId";

/// Main export configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    #[serde(default)]
    pub package: PackageConfig,
    #[serde(default)]
    pub properties: PropertiesConfig,
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub sheets: HashMap<String, SheetConfig>,
}

impl ExportConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: ExportConfig = toml::from_str(content)?;
        Ok(config)
    }

    /// Apply explicit overrides on top of this configuration
    pub fn apply(&mut self, overrides: &ConfigOverrides) {
        if let Some(author) = &overrides.author {
            self.properties.author = author.clone();
        }
        if let Some(mime_type) = &overrides.mime_type {
            self.package.mime_type = mime_type.clone();
        }
        if let Some(numbering) = overrides.part_numbering {
            self.layout.part_numbering = numbering;
        }
        if let Some(compression) = overrides.compression {
            self.package.compression = compression;
        }
    }

    /// Validate values that would produce an unusable package
    pub fn validate(&self) -> Result<()> {
        if self.package.mime_type.trim().is_empty() {
            return Err(XlsxError::Config("mime_type must not be empty".to_string()));
        }
        if self.properties.custom.contains_key(DOCUMENT_ID_PROPERTY) {
            return Err(XlsxError::Config(format!(
                "custom property '{DOCUMENT_ID_PROPERTY}' is reserved"
            )));
        }

        check_dimension("default_col_width", self.layout.default_col_width, None)?;
        check_dimension("default_row_height", self.layout.default_row_height, None)?;

        for (sheet_name, sheet) in &self.sheets {
            if let Some(width) = sheet.default_col_width {
                check_dimension("default_col_width", width, Some(sheet_name))?;
            }
            if let Some(height) = sheet.default_row_height {
                check_dimension("default_row_height", height, Some(sheet_name))?;
            }
        }

        Ok(())
    }

    /// Default column width with fallback chain: sheet -> global
    pub fn col_width(&self, sheet_name: &str) -> f64 {
        self.sheets
            .get(sheet_name)
            .and_then(|s| s.default_col_width)
            .unwrap_or(self.layout.default_col_width)
    }

    /// Default row height with fallback chain: sheet -> global
    pub fn row_height(&self, sheet_name: &str) -> f64 {
        self.sheets
            .get(sheet_name)
            .and_then(|s| s.default_row_height)
            .unwrap_or(self.layout.default_row_height)
    }
}

fn check_dimension(key: &str, value: f64, sheet_name: Option<&str>) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        return Ok(());
    }
    let location = match sheet_name {
        Some(name) => format!("sheet '{name}'"),
        None => "layout".to_string(),
    };
    Err(XlsxError::Config(format!(
        "{key} in {location} must be a positive number, got {value}"
    )))
}

/// Container-level settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackageConfig {
    /// MIME type attached to the produced blob
    pub mime_type: String,
    pub compression: Compression,
}

impl Default for PackageConfig {
    fn default() -> Self {
        Self {
            mime_type: XLSX_MIME_TYPE.to_string(),
            compression: Compression::Deflated,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Compression {
    Stored,
    Deflated,
}

impl From<Compression> for zip::CompressionMethod {
    fn from(c: Compression) -> Self {
        match c {
            Compression::Stored => zip::CompressionMethod::Stored,
            Compression::Deflated => zip::CompressionMethod::Deflated,
        }
    }
}

/// Document properties written to `docProps/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PropertiesConfig {
    pub author: String,
    pub application: String,
    /// Extra custom properties, written after the generated document id
    pub custom: BTreeMap<String, String>,
}

impl Default for PropertiesConfig {
    fn default() -> Self {
        Self {
            author: "nobody".to_string(),
            application: "SheetExport".to_string(),
            custom: BTreeMap::new(),
        }
    }
}

/// Worksheet layout defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub part_numbering: PartNumbering,
    pub default_col_width: f64,
    pub default_row_height: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            part_numbering: PartNumbering::Reversed,
            default_col_width: 10.3846153846154,
            default_row_height: 16.8,
        }
    }
}

/// How input sheet positions map to `xl/worksheets/sheet{N}.xml`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartNumbering {
    /// Sheet `i` of `n` is stored in part `n - i`; keeps output byte-compatible
    /// with packages produced by earlier releases
    #[default]
    Reversed,
    /// Sheet `i` is stored in part `i + 1`
    Sequential,
}

impl PartNumbering {
    /// 1-based part number for the sheet at zero-based input `index`
    pub fn part_number(self, index: usize, sheet_count: usize) -> usize {
        match self {
            PartNumbering::Reversed => sheet_count - index,
            PartNumbering::Sequential => index + 1,
        }
    }
}

/// Sheet-specific configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SheetConfig {
    #[serde(default)]
    pub default_col_width: Option<f64>,
    #[serde(default)]
    pub default_row_height: Option<f64>,
}

/// Highest-precedence values, typically parsed from command-line flags
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub author: Option<String>,
    pub mime_type: Option<String>,
    pub part_numbering: Option<PartNumbering>,
    pub compression: Option<Compression>,
}
