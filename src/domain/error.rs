use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Serialize, Deserialize)]
pub enum AppError {
    DatasetUnavailable(String),
    InvalidInput(String),
    ConfigError(String),
    ParseError(String),
    IoError(String),
}

impl AppError {
    /// Message safe to hand back to HTTP clients.
    pub fn public_message(&self) -> String {
        match self {
            AppError::DatasetUnavailable(_) => "Dataset not loaded".to_string(),
            AppError::InvalidInput(msg) => msg.clone(),
            AppError::ConfigError(_) | AppError::ParseError(_) | AppError::IoError(_) => {
                "Internal server error".to_string()
            }
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::DatasetUnavailable(msg) => write!(f, "Dataset unavailable: {}", msg),
            AppError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            AppError::ConfigError(msg) => write!(f, "Config error: {}", msg),
            AppError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            AppError::IoError(msg) => write!(f, "IO error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::IoError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dataset_unavailable_hides_details() {
        let err = AppError::DatasetUnavailable("models/missing.csv: not found".to_string());
        assert_eq!(err.public_message(), "Dataset not loaded");
        assert!(err.to_string().contains("models/missing.csv"));
    }

    #[test]
    fn test_invalid_input_passes_message_through() {
        let err = AppError::InvalidInput("day_index must be an integer".to_string());
        assert_eq!(err.public_message(), "day_index must be an integer");
    }
}
