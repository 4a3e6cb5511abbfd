use super::fixtures::{fake_audio, wav_bytes};
use async_trait::async_trait;
use parking_lot::Mutex;
use script_narrator::domain::voice::VoiceConfig;
use script_narrator::infrastructure::repositories::{
    HealthStatus, TtsRepository, TtsRepositoryError,
};

#[derive(Debug, Clone, Copy)]
pub enum AudioStyle {
    /// `len` opaque bytes, filled with the request number
    Fake(usize),
    /// A WAV file whose single sample is the request number
    Wav,
}

/// Deterministic TTS double. Fails any request whose text contains one of the
/// configured markers and records every request it receives.
pub struct ScriptedTtsRepository {
    pub calls: Mutex<Vec<String>>,
    pub voices: Mutex<Vec<String>>,
    fail_markers: Vec<String>,
    style: AudioStyle,
}

impl ScriptedTtsRepository {
    pub fn new(style: AudioStyle) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            voices: Mutex::new(Vec::new()),
            fail_markers: Vec::new(),
            style,
        }
    }

    pub fn failing_on(mut self, marker: &str) -> Self {
        self.fail_markers.push(marker.to_string());
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }
}

#[async_trait]
impl TtsRepository for ScriptedTtsRepository {
    async fn synthesize(
        &self,
        text: &str,
        voice: &VoiceConfig,
    ) -> Result<Vec<u8>, TtsRepositoryError> {
        let request_number = {
            let mut calls = self.calls.lock();
            calls.push(text.to_string());
            calls.len()
        };
        self.voices.lock().push(voice.preset.clone());

        if self.fail_markers.iter().any(|marker| text.contains(marker)) {
            return Err(TtsRepositoryError::Status {
                status: 500,
                body: format!("model crashed on request {}", request_number),
            });
        }

        Ok(match self.style {
            AudioStyle::Fake(len) => fake_audio(len, request_number as u8),
            AudioStyle::Wav => wav_bytes(&[request_number as i16], 24_000),
        })
    }

    async fn check_health(&self) -> Result<HealthStatus, TtsRepositoryError> {
        Ok(HealthStatus {
            status: "healthy".to_string(),
            model_loaded: true,
            device: Some("cpu".to_string()),
        })
    }
}
