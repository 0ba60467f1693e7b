//! High-level facade wiring the scoring engine to its collaborators
//!
//! The four operations the surrounding app exposes: transcribe a recording,
//! score a transcript against a reference, look up and voice an answer, and
//! store a new answer. Scoring is pure and never touches a provider.

use std::sync::Arc;

use tracing::debug;

use crate::answers::AnswerStore;
use crate::error::Result;
use crate::providers::{SynthesisProvider, SynthesisRequest, TranscriptionProvider, TranscriptionRequest};
use crate::report::{WerReport, score_transcript};
use crate::types::{AudioData, SpokenAnswer};

/// Engine combining transcription, synthesis, and answer lookup
pub struct RecitalEngine {
    transcription: Arc<dyn TranscriptionProvider>,
    synthesis: Arc<dyn SynthesisProvider>,
    answers: Arc<dyn AnswerStore>,
}

impl RecitalEngine {
    pub fn new(
        transcription: Arc<dyn TranscriptionProvider>,
        synthesis: Arc<dyn SynthesisProvider>,
        answers: Arc<dyn AnswerStore>,
    ) -> Self {
        Self {
            transcription,
            synthesis,
            answers,
        }
    }

    /// Transcribe recorded audio to text via the configured provider
    pub async fn transcribe(&self, audio: AudioData, sample_rate: u32) -> Result<String> {
        debug!(provider = self.transcription.name(), "transcribing audio");

        let response = self
            .transcription
            .transcribe(TranscriptionRequest::new(audio, sample_rate))
            .await?;
        Ok(response.text)
    }

    /// Score a recognizer hypothesis against a reference transcript.
    ///
    /// Pure and synchronous; safe to call concurrently with any other
    /// operation.
    pub fn score(&self, hypothesis: &str, reference: &str) -> Result<WerReport> {
        score_transcript(hypothesis, reference)
    }

    /// Look up the answer for a spoken question and synthesize it
    pub async fn answer(&self, question: &str) -> Result<SpokenAnswer> {
        let answer = self.answers.answer_for(question).await?;

        debug!(provider = self.synthesis.name(), "synthesizing answer");
        let speech = self
            .synthesis
            .synthesize(SynthesisRequest::new(&answer))
            .await?;

        Ok(SpokenAnswer {
            answer,
            audio: speech.audio,
        })
    }

    /// Store an answer under a question in the answer store
    pub async fn add_answer(&self, question: &str, answer: &str) -> Result<()> {
        self.answers.add_answer(question, answer).await
    }
}
