use super::error::ConcatError;
use std::path::Path;

/// Output container, selected from the output path's extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Mp3,
    Wav,
}

impl OutputFormat {
    pub fn from_path(path: &Path) -> Result<Self, ConcatError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "mp3" => Ok(OutputFormat::Mp3),
            "wav" | "wave" => Ok(OutputFormat::Wav),
            _ => Err(ConcatError::UnsupportedFormat(path.display().to_string())),
        }
    }

    /// Lossy targets are produced by the external transcoder
    pub fn is_lossy(&self) -> bool {
        matches!(self, OutputFormat::Mp3)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Mp3 => "mp3",
            OutputFormat::Wav => "wav",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
