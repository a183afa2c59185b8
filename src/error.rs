//! Inspector error types.

use thiserror::Error;

use crate::model::MessageId;

#[derive(Debug, Error)]
pub enum InspectorError {
    #[error("device not found: {0}")]
    DeviceNotFound(String),

    #[error("message {message} not found on device {device}")]
    MessageNotFound { device: String, message: MessageId },

    #[error("unsupported plot type: {0}")]
    UnsupportedPlot(String),

    #[error("invalid plot object: {0}")]
    InvalidPlot(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type InspectorResult<T> = Result<T, InspectorError>;
