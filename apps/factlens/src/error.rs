//! Application error type.

use crate::config::MAX_TEXT_BYTES;
use crate::lookup::LookupError;
use crate::search::SearchError;
use factlens_core::RuleError;
use factlens_core::formats::FormatError;
use thiserror::Error;

/// Errors surfaced by CLI commands and API handlers.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("failed to load model: {0}")]
    Model(#[from] FormatError),

    #[error("failed to load rules: {0}")]
    Rules(#[from] RuleError),

    #[error("no classifier model is loaded")]
    ClassifierUnavailable,

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("text is {len} bytes, the limit is {max}")]
    TextTooLong { len: usize, max: usize },

    #[error("reference client: {0}")]
    Lookup(#[from] LookupError),

    #[error("search client: {0}")]
    Search(#[from] SearchError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Reject empty or oversized input text.
pub fn validate_text(text: &str) -> Result<&str, AppError> {
    if text.trim().is_empty() {
        return Err(AppError::InvalidInput(String::from("text is empty")));
    }
    if text.len() > MAX_TEXT_BYTES {
        return Err(AppError::TextTooLong {
            len: text.len(),
            max: MAX_TEXT_BYTES,
        });
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_text_is_rejected() {
        assert!(matches!(validate_text(" \n\t"), Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn oversized_text_is_rejected() {
        let text = "a".repeat(MAX_TEXT_BYTES + 1);
        assert!(matches!(
            validate_text(&text),
            Err(AppError::TextTooLong { len, .. }) if len == MAX_TEXT_BYTES + 1
        ));
    }

    #[test]
    fn normal_text_passes() {
        assert!(validate_text("The sun sets in the west").is_ok());
    }
}
