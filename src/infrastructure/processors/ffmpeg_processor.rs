use super::audio_processor::{AudioProcessor, EncodingSettings, ProcessingError};
use crate::domain::audio::OutputFormat;
use async_trait::async_trait;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;

/// Transcodes through an external ffmpeg binary using the concat demuxer
pub struct FfmpegProcessor {
    program: PathBuf,
    settings: EncodingSettings,
}

impl FfmpegProcessor {
    pub fn new(program: impl Into<PathBuf>, settings: EncodingSettings) -> Self {
        Self {
            program: program.into(),
            settings,
        }
    }

    fn program_name(&self) -> String {
        self.program.display().to_string()
    }

    /// Arguments for a concat-demuxer run: overwrite output, resample to the
    /// fixed rate and channel count, encode at the fixed bitrate
    pub fn concat_args(&self, manifest: &Path, output: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = [
            "-hide_banner",
            "-loglevel",
            "error",
            "-y",
            "-f",
            "concat",
            "-safe",
            "0",
            "-i",
        ]
        .into_iter()
        .map(OsString::from)
        .collect();

        args.push(manifest.as_os_str().to_owned());
        args.extend(
            [
                "-ar".to_string(),
                self.settings.sample_rate.to_string(),
                "-ac".to_string(),
                self.settings.channels.to_string(),
                "-codec:a".to_string(),
                self.settings.codec.clone(),
                "-b:a".to_string(),
                format!("{}k", self.settings.bitrate_kbps),
            ]
            .into_iter()
            .map(OsString::from),
        );
        args.push(output.as_os_str().to_owned());
        args
    }
}

#[async_trait]
impl AudioProcessor for FfmpegProcessor {
    fn name(&self) -> &'static str {
        "ffmpeg"
    }

    fn supports(&self, format: OutputFormat) -> bool {
        format.is_lossy()
    }

    async fn is_available(&self) -> bool {
        Command::new(&self.program)
            .arg("-version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map(|status| status.success())
            .unwrap_or(false)
    }

    async fn concatenate(&self, manifest: &Path, output: &Path) -> Result<(), ProcessingError> {
        let args = self.concat_args(manifest, output);
        tracing::debug!(
            program = %self.program_name(),
            manifest = %manifest.display(),
            output = %output.display(),
            "Running ffmpeg concat"
        );

        let result = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| ProcessingError::Launch {
                program: self.program_name(),
                source: e,
            })?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr).trim().to_string();
            tracing::error!(
                status = %result.status,
                stderr = %stderr,
                "ffmpeg concat failed"
            );
            return Err(ProcessingError::Failed {
                program: self.program_name(),
                status: result.status.to_string(),
                stderr,
            });
        }

        Ok(())
    }
}
