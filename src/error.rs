use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuickTagError {
    #[error("Quicktag error: {0}")]
    Generic(String),
    #[error(transparent)]
    Expected(#[from] QuickTagExpectedError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum QuickTagExpectedError {
    #[error("{0}")]
    Generic(String),
    #[error("Invalid file format: {format}")]
    InvalidFileFormat { format: String },
    #[error("Custom tag group does not exist: {index}")]
    CustomGroupDoesNotExist { index: usize },
    #[error("Track does not exist: {path}")]
    TrackDoesNotExist { path: PathBuf },
    #[error("Configuration file not found ({path})")]
    ConfigNotFound { path: PathBuf },
    #[error("Failed to decode configuration file ({path}): {message}")]
    ConfigDecode { path: PathBuf, message: String },
}

pub type Result<T> = std::result::Result<T, QuickTagError>;
