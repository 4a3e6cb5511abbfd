use crate::domain::voice::VoiceConfig;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum TtsRepositoryError {
    #[error("request to TTS backend failed: {0}")]
    Transport(String),
    #[error("TTS backend returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("TTS backend returned an empty audio body")]
    EmptyAudio,
    #[error("invalid TTS backend response: {0}")]
    InvalidResponse(String),
}

/// Readiness reported by a TTS backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub model_loaded: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device: Option<String>,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy" && self.model_loaded
    }
}

/// Repository for TTS synthesis operations.
/// Abstracts the underlying TTS provider (Chatterbox server, test doubles, ...)
///
/// Implementations handle a single request at a time: splitting text to fit
/// the provider and stitching audio together is done by the caller.
#[async_trait]
pub trait TtsRepository: Send + Sync {
    /// Synthesize one piece of text with the given voice
    ///
    /// Returns raw audio bytes (mono, fixed sample rate WAV)
    ///
    /// # Errors
    /// Any failed or non-success response is an error; callers treat it as a
    /// failure of that piece only
    async fn synthesize(&self, text: &str, voice: &VoiceConfig)
        -> Result<Vec<u8>, TtsRepositoryError>;

    /// Ask the provider whether it is ready to synthesize
    async fn check_health(&self) -> Result<HealthStatus, TtsRepositoryError>;
}
