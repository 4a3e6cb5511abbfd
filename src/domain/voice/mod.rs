pub mod config;
pub mod preset;

pub use config::{VoiceConfig, VoiceConfigError};
pub use preset::{find_preset, preset_names, VoicePreset, DEFAULT_PRESET, VOICE_PRESETS};
