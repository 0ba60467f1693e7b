//! Speech synthesis provider trait and types

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::{AudioData, VoiceGender};

/// Request for speech synthesis
#[derive(Debug, Clone)]
pub struct SynthesisRequest {
    /// Text to speak
    pub text: String,
    /// Language code (BCP-47)
    pub language: String,
    /// Voice gender hint
    pub gender: VoiceGender,
}

impl SynthesisRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            language: "en-US".to_string(),
            gender: VoiceGender::default(),
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn with_gender(mut self, gender: VoiceGender) -> Self {
        self.gender = gender;
        self
    }
}

/// Response from speech synthesis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynthesisResponse {
    /// Encoded audio (MP3)
    pub audio: AudioData,
}

/// Trait for text-to-speech providers
#[async_trait]
pub trait SynthesisProvider: Send + Sync {
    /// Get the provider name
    fn name(&self) -> &'static str;

    /// Synthesize speech for the given text
    async fn synthesize(&self, request: SynthesisRequest) -> Result<SynthesisResponse>;

    /// Check if the provider is configured and ready
    fn is_configured(&self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builder_defaults() {
        let request = SynthesisRequest::new("hello");
        assert_eq!(request.language, "en-US");
        assert_eq!(request.gender, VoiceGender::Neutral);

        let request = request
            .with_language("de-DE")
            .with_gender(VoiceGender::Female);
        assert_eq!(request.language, "de-DE");
        assert_eq!(request.gender, VoiceGender::Female);
    }
}
