/// Job-level synthesis failures. Per-unit failures never surface here; they
/// are recorded in the report as `UnitFailure`s.
#[derive(Debug, thiserror::Error)]
pub enum SynthesisError {
    #[error("no text to synthesize")]
    NoText,
    #[error("no audio produced: all {failed_requests} synthesis requests failed")]
    NoAudioProduced { failed_requests: usize },
}
