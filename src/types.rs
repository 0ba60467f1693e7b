//! Core types used throughout Recital

use serde::{Deserialize, Serialize};

/// Audio payload as raw encoded bytes
pub type AudioData = Vec<u8>;

/// Voice gender hint for speech synthesis
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VoiceGender {
    #[default]
    Neutral,
    Male,
    Female,
}

/// A looked-up answer together with its synthesized audio
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpokenAnswer {
    pub answer: String,
    /// Encoded audio (MP3) of the answer
    pub audio: AudioData,
}
