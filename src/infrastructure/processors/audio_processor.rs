use crate::domain::audio::OutputFormat;
use crate::domain::synthesis::AudioChunk;
use async_trait::async_trait;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum ProcessingError {
    #[error("failed to launch {program}: {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{program} exited with {status}: {stderr}")]
    Failed {
        program: String,
        status: String,
        stderr: String,
    },
    #[error("{processor} does not support {operation}")]
    Unsupported {
        processor: &'static str,
        operation: &'static str,
    },
    #[error("invalid WAV data in chunk {index}: {source}")]
    Decode {
        index: usize,
        #[source]
        source: hound::Error,
    },
    #[error("chunk {index} is {found}, expected {expected}")]
    IncompatibleFormat {
        index: usize,
        found: String,
        expected: String,
    },
    #[error("failed to encode WAV: {0}")]
    Encode(#[source] hound::Error),
}

/// Fixed encoding applied to transcoded output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodingSettings {
    pub sample_rate: u32,
    pub channels: u16,
    pub codec: String,
    pub bitrate_kbps: u32,
}

impl Default for EncodingSettings {
    fn default() -> Self {
        Self {
            sample_rate: 24_000,
            channels: 1,
            codec: "libmp3lame".to_string(),
            bitrate_kbps: 128,
        }
    }
}

/// Something that can turn several audio chunks into one file.
///
/// File-based processors implement [`AudioProcessor::concatenate`], reading a
/// concat manifest; in-memory processors implement [`AudioProcessor::process`].
#[async_trait]
pub trait AudioProcessor: Send + Sync {
    fn name(&self) -> &'static str;

    /// Whether this processor can produce the given output format
    fn supports(&self, format: OutputFormat) -> bool;

    /// Whether the processor can run on this machine right now
    async fn is_available(&self) -> bool;

    /// Stitch the files listed in `manifest` into `output`
    async fn concatenate(&self, _manifest: &Path, _output: &Path) -> Result<(), ProcessingError> {
        Err(ProcessingError::Unsupported {
            processor: self.name(),
            operation: "manifest concatenation",
        })
    }

    /// Merge chunks in memory, returning the combined file contents
    async fn process(&self, _chunks: &[AudioChunk]) -> Result<Vec<u8>, ProcessingError> {
        Err(ProcessingError::Unsupported {
            processor: self.name(),
            operation: "in-memory merge",
        })
    }
}
