//! Error types for Recital

use thiserror::Error;

/// Result type alias using Recital's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// All possible errors in Recital
#[derive(Error, Debug)]
pub enum Error {
    #[error("Transcription failed: {0}")]
    Transcription(String),

    #[error("Speech synthesis failed: {0}")]
    Synthesis(String),

    #[error("Answer store error: {0}")]
    AnswerStore(String),

    #[error("Provider not configured: {0}")]
    ProviderNotConfigured(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Internal consistency defect in the alignment engine. The display
    /// message stays generic; the full context (both token sequences,
    /// matrix dimensions) is logged where the violation is detected.
    #[error("internal alignment error")]
    InvariantViolation(String),
}
