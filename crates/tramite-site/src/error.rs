// File: tramite-site/src/error.rs
// Purpose: Error type shared by the page controllers and their collaborators

use thiserror::Error;

/// Errors surfaced by collaborators and configuration.
///
/// None of these are fatal to the page: the controllers log them and
/// fall back to an interactive state.
#[derive(Debug, Error)]
pub enum SiteError {
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("storage unavailable: {0}")]
    Storage(String),

    #[error("consent record is not valid JSON: {0}")]
    ConsentRecord(#[from] serde_json::Error),

    #[error("request failed: {0}")]
    Transport(String),

    #[error("unknown form field: {0}")]
    UnknownField(String),
}

pub type Result<T> = std::result::Result<T, SiteError>;
