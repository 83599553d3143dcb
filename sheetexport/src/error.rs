//! Error type for package generation

use thiserror::Error;

#[derive(Debug, Error)]
pub enum XlsxError {
    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),
    /// The blocking archival task panicked or was cancelled
    #[error("archival task failed: {0}")]
    Task(String),
}

pub type Result<T> = std::result::Result<T, XlsxError>;
