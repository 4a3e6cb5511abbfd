use crate::domain::audio::ConcatError;
use crate::domain::synthesis::SynthesisError;
use crate::infrastructure::config::ConfigError;
use crate::infrastructure::repositories::TtsRepositoryError;

/// Errors that can cross the pipeline boundary.
///
/// Per-unit synthesis failures are not represented here: they are recorded in
/// the job summary and never abort a job.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("TTS backend setup failed: {0}")]
    Backend(#[from] TtsRepositoryError),

    #[error(transparent)]
    Synthesis(#[from] SynthesisError),

    #[error("audio concatenation failed: {0}")]
    Concatenation(#[from] ConcatError),
}

impl PipelineError {
    /// True when every synthesis request failed
    pub fn is_no_audio(&self) -> bool {
        matches!(
            self,
            PipelineError::Synthesis(SynthesisError::NoAudioProduced { .. })
        )
    }
}

/// Custom result type for the pipeline
pub type PipelineResult<T> = Result<T, PipelineError>;
