use super::tts_repository::{HealthStatus, TtsRepository, TtsRepositoryError};
use crate::domain::voice::VoiceConfig;
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;

/// Request body for POST /synthesize-wav
#[derive(Debug, Serialize)]
struct SynthesizeRequest<'a> {
    text: &'a str,
    voice_preset: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    min_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_k: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    exaggeration: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cfg_weight: Option<f32>,
}

impl<'a> SynthesizeRequest<'a> {
    fn new(text: &'a str, voice: &'a VoiceConfig) -> Self {
        Self {
            text,
            voice_preset: &voice.preset,
            temperature: voice.temperature,
            top_p: voice.top_p,
            min_p: voice.min_p,
            top_k: voice.top_k,
            exaggeration: voice.exaggeration,
            cfg_weight: voice.cfg_weight,
        }
    }
}

/// Chatterbox TTS server implementation of TTS repository
pub struct ChatterboxTtsRepository {
    client: reqwest::Client,
    base_url: String,
}

impl ChatterboxTtsRepository {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, TtsRepositoryError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TtsRepositoryError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

#[async_trait]
impl TtsRepository for ChatterboxTtsRepository {
    async fn synthesize(
        &self,
        text: &str,
        voice: &VoiceConfig,
    ) -> Result<Vec<u8>, TtsRepositoryError> {
        let start_time = std::time::Instant::now();
        let text_preview: String = text.chars().take(80).collect();

        tracing::debug!(
            voice_preset = %voice.preset,
            text_length = text.chars().count(),
            text_preview = %text_preview,
            "Calling Chatterbox synthesize-wav"
        );

        let response = self
            .client
            .post(self.endpoint("synthesize-wav"))
            .json(&SynthesizeRequest::new(text, voice))
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    voice_preset = %voice.preset,
                    text_length = text.chars().count(),
                    "Chatterbox request failed"
                );
                TtsRepositoryError::Transport(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TtsRepositoryError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let audio_bytes = response
            .bytes()
            .await
            .map_err(|e| TtsRepositoryError::Transport(e.to_string()))?
            .to_vec();

        if audio_bytes.is_empty() {
            return Err(TtsRepositoryError::EmptyAudio);
        }

        tracing::debug!(
            audio_size_bytes = audio_bytes.len(),
            latency_ms = start_time.elapsed().as_millis(),
            "Chatterbox audio received"
        );

        Ok(audio_bytes)
    }

    async fn check_health(&self) -> Result<HealthStatus, TtsRepositoryError> {
        let response = self
            .client
            .get(self.endpoint("health"))
            .send()
            .await
            .map_err(|e| TtsRepositoryError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TtsRepositoryError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<HealthStatus>()
            .await
            .map_err(|e| TtsRepositoryError::InvalidResponse(e.to_string()))
    }
}
