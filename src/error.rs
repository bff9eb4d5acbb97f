// DIT Bridge Error Types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("No matched pairs to export")]
    NoMatches,

    #[error("Export failed: {0}")]
    ExportFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Manifest error: {0}")]
    Manifest(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("{0}")]
    Other(String),
}

impl From<anyhow::Error> for BridgeError {
    fn from(err: anyhow::Error) -> Self {
        BridgeError::Other(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, BridgeError>;

impl From<quick_xml::Error> for BridgeError {
    fn from(err: quick_xml::Error) -> Self {
        BridgeError::ExportFailed(format!("XML error: {}", err))
    }
}
