//! Google Cloud provider implementations for speech recognition and synthesis

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::error::{Error, Result};
use crate::types::VoiceGender;

use super::{
    SynthesisProvider, SynthesisRequest, SynthesisResponse, TranscriptionProvider,
    TranscriptionRequest, TranscriptionResponse,
};

const SPEECH_API_BASE: &str = "https://speech.googleapis.com/v1";
const TTS_API_BASE: &str = "https://texttospeech.googleapis.com/v1";

const DEFAULT_LANGUAGE: &str = "en-US";

/// Google Cloud speech provider, covering both recognition and synthesis
pub struct GoogleSpeechProvider {
    client: Client,
    api_key: Option<String>,
}

impl GoogleSpeechProvider {
    /// Create a new provider (API key loaded from environment if not provided)
    pub fn new(api_key: Option<String>) -> Self {
        let key = api_key.or_else(|| std::env::var("GOOGLE_API_KEY").ok());

        Self {
            client: Client::new(),
            api_key: key,
        }
    }

    fn api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .ok_or_else(|| Error::ProviderNotConfigured("Google API key not set".to_string()))
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RecognizeRequest {
    config: RecognitionConfig,
    audio: RecognitionAudio,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RecognitionConfig {
    encoding: String,
    sample_rate_hertz: u32,
    language_code: String,
}

#[derive(Debug, Serialize)]
struct RecognitionAudio {
    /// Base64-encoded audio content
    content: String,
}

#[derive(Debug, Deserialize)]
struct RecognizeResponse {
    #[serde(default)]
    results: Vec<RecognitionResult>,
}

#[derive(Debug, Deserialize)]
struct RecognitionResult {
    #[serde(default)]
    alternatives: Vec<RecognitionAlternative>,
}

#[derive(Debug, Deserialize)]
struct RecognitionAlternative {
    transcript: String,
    #[serde(default)]
    confidence: Option<f32>,
}

#[async_trait]
impl TranscriptionProvider for GoogleSpeechProvider {
    fn name(&self) -> &'static str {
        "Google Cloud Speech"
    }

    async fn transcribe(&self, request: TranscriptionRequest) -> Result<TranscriptionResponse> {
        let api_key = self.api_key()?;

        let recognize_request = RecognizeRequest {
            config: RecognitionConfig {
                encoding: "LINEAR16".to_string(),
                sample_rate_hertz: request.sample_rate,
                language_code: request
                    .language
                    .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
            },
            audio: RecognitionAudio {
                content: STANDARD.encode(&request.audio),
            },
        };

        debug!("Sending recognition request to Google Cloud Speech");

        let response = self
            .client
            .post(format!("{}/speech:recognize?key={}", SPEECH_API_BASE, api_key))
            .json(&recognize_request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            error!("Speech API error: {} - {}", status, error_text);
            return Err(Error::Transcription(format!(
                "Speech API error: {} - {}",
                status, error_text
            )));
        }

        let recognize_response: RecognizeResponse = response.json().await?;

        // each result covers a consecutive portion of the audio; stitch the
        // top alternatives together
        let confidence = recognize_response
            .results
            .first()
            .and_then(|r| r.alternatives.first())
            .and_then(|a| a.confidence);

        let text = recognize_response
            .results
            .into_iter()
            .filter_map(|r| r.alternatives.into_iter().next())
            .map(|a| a.transcript)
            .collect::<Vec<_>>()
            .join("\n");

        Ok(TranscriptionResponse { text, confidence })
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeRequest {
    input: SynthesisInput,
    voice: VoiceSelection,
    audio_config: AudioConfig,
}

#[derive(Debug, Serialize)]
struct SynthesisInput {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VoiceSelection {
    language_code: String,
    ssml_gender: VoiceGender,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AudioConfig {
    audio_encoding: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeResponse {
    /// Base64-encoded audio content
    audio_content: String,
}

#[async_trait]
impl SynthesisProvider for GoogleSpeechProvider {
    fn name(&self) -> &'static str {
        "Google Cloud Text-to-Speech"
    }

    async fn synthesize(&self, request: SynthesisRequest) -> Result<SynthesisResponse> {
        let api_key = self.api_key()?;

        let synthesize_request = SynthesizeRequest {
            input: SynthesisInput { text: request.text },
            voice: VoiceSelection {
                language_code: request.language,
                ssml_gender: request.gender,
            },
            audio_config: AudioConfig {
                audio_encoding: "MP3".to_string(),
            },
        };

        debug!("Sending synthesis request to Google Cloud TTS");

        let response = self
            .client
            .post(format!("{}/text:synthesize?key={}", TTS_API_BASE, api_key))
            .json(&synthesize_request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            error!("TTS API error: {} - {}", status, error_text);
            return Err(Error::Synthesis(format!(
                "TTS API error: {} - {}",
                status, error_text
            )));
        }

        let synthesize_response: SynthesizeResponse = response.json().await?;

        let audio = STANDARD
            .decode(synthesize_response.audio_content)
            .map_err(|e| Error::Synthesis(format!("Invalid audio content encoding: {e}")))?;

        Ok(SynthesisResponse { audio })
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}
