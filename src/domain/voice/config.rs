use super::preset::{find_preset, VoicePreset, DEFAULT_PRESET};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum VoiceConfigError {
    #[error("voice preset name cannot be empty")]
    EmptyPreset,
    #[error("{parameter} must be within [0, 1], got {value}")]
    OutOfRange { parameter: &'static str, value: f32 },
    #[error("top_k must be at least 1, got {0}")]
    InvalidTopK(u32),
}

/// Voice settings for one job.
///
/// Built once when the job starts and passed by reference to every synthesis
/// call; unset tuning values fall back to the preset's values on the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceConfig {
    pub preset: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exaggeration: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cfg_weight: Option<f32>,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self::preset(DEFAULT_PRESET)
    }
}

impl VoiceConfig {
    /// Preset with no tuning overrides
    pub fn preset(name: impl Into<String>) -> Self {
        Self {
            preset: name.into(),
            temperature: None,
            top_p: None,
            min_p: None,
            top_k: None,
            exaggeration: None,
            cfg_weight: None,
        }
    }

    /// Catalogue entry for the configured preset, if it is a built-in one
    pub fn builtin_preset(&self) -> Option<&'static VoicePreset> {
        find_preset(&self.preset)
    }

    pub fn validate(&self) -> Result<(), VoiceConfigError> {
        if self.preset.trim().is_empty() {
            return Err(VoiceConfigError::EmptyPreset);
        }

        let unit_params = [
            ("temperature", self.temperature),
            ("top_p", self.top_p),
            ("min_p", self.min_p),
            ("exaggeration", self.exaggeration),
            ("cfg_weight", self.cfg_weight),
        ];
        for (parameter, value) in unit_params {
            if let Some(value) = value {
                if !(0.0..=1.0).contains(&value) {
                    return Err(VoiceConfigError::OutOfRange { parameter, value });
                }
            }
        }

        match self.top_k {
            Some(top_k) if top_k < 1 => Err(VoiceConfigError::InvalidTopK(top_k)),
            _ => Ok(()),
        }
    }
}
