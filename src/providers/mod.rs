//! Provider abstraction layer for the external speech services
//!
//! The scoring engine itself is pure; transcription and synthesis are
//! call-throughs to managed cloud services behind these traits.
mod google;
mod synthesis;
mod transcription;

pub use google::GoogleSpeechProvider;
pub use synthesis::{SynthesisProvider, SynthesisRequest, SynthesisResponse};
pub use transcription::{TranscriptionProvider, TranscriptionRequest, TranscriptionResponse};
