//! Recital - spoken-answer practice engine
//!
//! Scores speech-recognizer transcripts against reference transcripts word
//! by word and renders an annotated diff, with provider abstraction for the
//! external transcription, speech synthesis, and answer-lookup services.

pub mod alignment;
pub mod answers;
pub mod engine;
pub mod error;
pub mod normalize;
pub mod providers;
pub mod report;
pub mod types;

pub use error::{Error, Result};
pub use types::*;

/// Re-export the main engine components for convenience
pub use alignment::{Alignment, EditKind, EditOp, ErrorCounts, align};
pub use answers::{AnswerStore, FALLBACK_ANSWER, GraphAnswerStore};
pub use engine::RecitalEngine;
pub use normalize::{normalize, tokenize};
pub use providers::{GoogleSpeechProvider, SynthesisProvider, TranscriptionProvider};
pub use report::{WerReport, score_transcript, word_error_rate};
