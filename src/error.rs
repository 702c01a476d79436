use thiserror::Error;

#[derive(Error, Debug)]
pub enum PointsmithError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Prompt error: {0}")]
    Prompt(String),

    /// A target file no longer matches the marker conventions this tool
    /// relies on (missing anchor, dangling region marker). Signals a version
    /// or state mismatch with the scaffolder and is never swallowed.
    #[error("Marker protocol error in {file}: {reason}")]
    Protocol { file: String, reason: String },

    #[error("Generic error: {0}")]
    Generic(#[from] anyhow::Error),
}

impl PointsmithError {
    /// Attach a file path to a splice failure.
    pub fn protocol(file: &std::path::Path, reason: impl std::fmt::Display) -> Self {
        PointsmithError::Protocol {
            file: file.display().to_string(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PointsmithError>;
