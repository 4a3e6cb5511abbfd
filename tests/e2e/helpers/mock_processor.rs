use async_trait::async_trait;
use parking_lot::Mutex;
use script_narrator::domain::audio::OutputFormat;
use script_narrator::infrastructure::processors::{AudioProcessor, ProcessingError};
use std::path::{Path, PathBuf};

/// One concat invocation as seen by the processor
#[derive(Debug, Clone)]
pub struct ConcatCall {
    pub manifest_lines: Vec<String>,
    pub segment_paths: Vec<PathBuf>,
    pub segments_existed: bool,
}

#[derive(Debug, Clone, Default)]
enum Behavior {
    #[default]
    Concatenate,
    /// Write a few bytes into the output, then exit non-zero like a crashed ffmpeg
    FailAfterPartialWrite(String),
    /// Exit zero without producing any audio
    WriteEmpty,
}

/// Stands in for ffmpeg: parses the manifest, checks the listed files exist
/// and writes their bytes back to back into the output
#[derive(Default)]
pub struct RecordingProcessor {
    pub calls: Mutex<Vec<ConcatCall>>,
    pub outputs: Mutex<Vec<PathBuf>>,
    behavior: Behavior,
}

impl RecordingProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(stderr: &str) -> Self {
        Self {
            behavior: Behavior::FailAfterPartialWrite(stderr.to_string()),
            ..Self::default()
        }
    }

    pub fn writing_empty_output() -> Self {
        Self {
            behavior: Behavior::WriteEmpty,
            ..Self::default()
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }
}

/// Reverse of the engine's escaping: `file '<path>'` with `'\''` for quotes
pub fn parse_manifest_line(line: &str) -> Option<PathBuf> {
    let quoted = line.strip_prefix("file '")?.strip_suffix('\'')?;
    Some(PathBuf::from(quoted.replace(r"'\''", "'")))
}

#[async_trait]
impl AudioProcessor for RecordingProcessor {
    fn name(&self) -> &'static str {
        "recording"
    }

    fn supports(&self, format: OutputFormat) -> bool {
        format.is_lossy()
    }

    async fn is_available(&self) -> bool {
        true
    }

    async fn concatenate(&self, manifest: &Path, output: &Path) -> Result<(), ProcessingError> {
        let contents = std::fs::read_to_string(manifest).map_err(|e| ProcessingError::Launch {
            program: "recording".to_string(),
            source: e,
        })?;
        let manifest_lines: Vec<String> = contents.lines().map(str::to_string).collect();
        let segment_paths: Vec<PathBuf> = manifest_lines
            .iter()
            .filter_map(|line| parse_manifest_line(line))
            .collect();
        let segments_existed = segment_paths.iter().all(|path| path.exists());

        self.calls.lock().push(ConcatCall {
            manifest_lines,
            segment_paths: segment_paths.clone(),
            segments_existed,
        });

        self.outputs.lock().push(output.to_path_buf());
        let io_error = |e: std::io::Error| ProcessingError::Launch {
            program: "recording".to_string(),
            source: e,
        };

        match &self.behavior {
            Behavior::Concatenate => {}
            Behavior::FailAfterPartialWrite(stderr) => {
                std::fs::write(output, [0u8; 10]).map_err(io_error)?;
                return Err(ProcessingError::Failed {
                    program: "recording".to_string(),
                    status: "exit status: 1".to_string(),
                    stderr: stderr.clone(),
                });
            }
            Behavior::WriteEmpty => {
                std::fs::write(output, b"").map_err(io_error)?;
                return Ok(());
            }
        }

        let mut combined = Vec::new();
        for path in &segment_paths {
            let bytes = std::fs::read(path).map_err(io_error)?;
            combined.extend(bytes);
        }
        std::fs::write(output, combined).map_err(io_error)?;

        Ok(())
    }
}
