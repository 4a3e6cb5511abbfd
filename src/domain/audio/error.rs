use crate::infrastructure::processors::ProcessingError;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConcatError {
    #[error("no audio chunks to combine")]
    EmptyInput,
    #[error("unsupported output format: {0}")]
    UnsupportedFormat(String),
    #[error("no audio processor supports {0} output")]
    NoProcessor(String),
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
    #[error("transcoder produced an empty file at {0}")]
    EmptyOutput(PathBuf),
    #[error("processing error: {0}")]
    Processing(#[from] ProcessingError),
}

impl ConcatError {
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        ConcatError::Io {
            context: context.into(),
            source,
        }
    }
}
