//! Loading workbook models and export configuration

use anyhow::{Context, Result};
use sheetexport::{ExportConfig, Workbook};
use std::fs;
use std::path::{Path, PathBuf};

/// Config file picked up from the current directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "sheetexport.toml";

/// Model file formats accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelFormat {
    Json,
    Toml,
}

impl ModelFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }
}

/// Read a workbook model; the format follows the file extension
pub fn load_workbook(path: &Path) -> Result<Workbook> {
    let format = ModelFormat::from_path(path).with_context(|| {
        format!(
            "Unsupported model format: {} (expected .json or .toml)",
            path.display()
        )
    })?;
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read model: {}", path.display()))?;

    let workbook: Workbook = match format {
        ModelFormat::Json => serde_json::from_str(&content)
            .with_context(|| format!("Invalid JSON model: {}", path.display()))?,
        ModelFormat::Toml => toml::from_str(&content)
            .with_context(|| format!("Invalid TOML model: {}", path.display()))?,
    };
    log::debug!("loaded {} sheet(s) from {}", workbook.sheets.len(), path.display());
    Ok(workbook)
}

/// Load the explicit config, else `sheetexport.toml` in the current directory, else defaults
pub fn load_config(explicit: Option<&Path>) -> Result<ExportConfig> {
    if let Some(config_path) = explicit {
        return ExportConfig::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()));
    }

    let default_config_path = PathBuf::from(DEFAULT_CONFIG_FILE);
    if default_config_path.exists() {
        log::info!("using {}", default_config_path.display());
        ExportConfig::from_file(&default_config_path).with_context(|| {
            format!(
                "Failed to load config from {}",
                default_config_path.display()
            )
        })
    } else {
        Ok(ExportConfig::default())
    }
}

/// Output path next to the model, with an `.xlsx` extension
pub fn default_output(model: &Path) -> PathBuf {
    model.with_extension("xlsx")
}
