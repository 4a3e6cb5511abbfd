use serde::Serialize;

/// A named voice preset known to the Chatterbox backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VoicePreset {
    pub name: &'static str,
    pub personality: &'static str,
    pub description: &'static str,
    pub use_case: &'static str,
}

/// Preset used when none is configured
pub const DEFAULT_PRESET: &str = "masculine";

/// Presets shipped with the backend. Names outside this list are still passed
/// through, since custom voices can be uploaded to the backend's library.
pub const VOICE_PRESETS: &[VoicePreset] = &[
    VoicePreset {
        name: "default",
        personality: "neutral",
        description: "Balanced default voice with natural characteristics",
        use_case: "General purpose, conversational content",
    },
    VoicePreset {
        name: "masculine",
        personality: "confident",
        description: "Strong masculine voice with controlled characteristics",
        use_case: "Professional podcasts, tech content, authoritative narration",
    },
    VoicePreset {
        name: "deep_male",
        personality: "authoritative",
        description: "Deep, stable male voice with minimal variation",
        use_case: "News, documentaries, serious content",
    },
    VoicePreset {
        name: "professional",
        personality: "formal",
        description: "Corporate presenter style with clear diction",
        use_case: "Business presentations, formal announcements",
    },
    VoicePreset {
        name: "conversational",
        personality: "friendly",
        description: "Natural conversational style with expressive variation",
        use_case: "Casual podcasts, storytelling, interviews",
    },
    VoicePreset {
        name: "energetic",
        personality: "enthusiastic",
        description: "High-energy, enthusiastic delivery",
        use_case: "Marketing content, product demos, entertainment",
    },
    VoicePreset {
        name: "feminine",
        personality: "expressive",
        description: "Feminine voice characteristics",
        use_case: "When specifically requested for female voice content",
    },
];

/// Look up a built-in preset by name
pub fn find_preset(name: &str) -> Option<&'static VoicePreset> {
    VOICE_PRESETS.iter().find(|preset| preset.name == name)
}

/// Names of all built-in presets, in catalogue order
pub fn preset_names() -> Vec<&'static str> {
    VOICE_PRESETS.iter().map(|preset| preset.name).collect()
}
