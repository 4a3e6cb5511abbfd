use super::artifacts::TempArtifacts;
use super::error::ConcatError;
use super::format::OutputFormat;
use super::manifest::build_manifest;
use crate::domain::synthesis::AudioChunk;
use crate::infrastructure::processors::AudioProcessor;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Combines a job's ordered audio chunks into one output file.
pub struct ConcatenationEngine {
    processors: Vec<Arc<dyn AudioProcessor>>,
    temp_dir: PathBuf,
}

impl ConcatenationEngine {
    pub fn new(processors: Vec<Arc<dyn AudioProcessor>>, temp_dir: impl Into<PathBuf>) -> Self {
        Self {
            processors,
            temp_dir: temp_dir.into(),
        }
    }

    pub fn processors(&self) -> &[Arc<dyn AudioProcessor>] {
        &self.processors
    }

    /// Write `chunks`, in order, as a single file at `output`.
    ///
    /// - one chunk: its bytes are written as they are
    /// - lossy target: chunks go to temp files listed in a concat manifest and
    ///   the transcoder runs once over the manifest into a staging file that
    ///   replaces `output` only when non-empty; the temp files are removed
    ///   whether or not it succeeds
    /// - other supported targets: merged in memory and written directly
    ///
    /// Must not be called with no chunks.
    pub async fn combine(&self, chunks: &[AudioChunk], output: &Path) -> Result<(), ConcatError> {
        let Some(first) = chunks.first() else {
            return Err(ConcatError::EmptyInput);
        };

        if chunks.len() == 1 {
            tracing::info!(
                output = %output.display(),
                audio_size_bytes = first.audio.len(),
                "Single chunk, writing output directly"
            );
            return write_output(output, &first.audio).await;
        }

        let format = OutputFormat::from_path(output)?;
        let processor = self.processor_for(format)?;

        tracing::info!(
            chunk_count = chunks.len(),
            format = %format,
            processor = processor.name(),
            output = %output.display(),
            "Combining audio chunks"
        );

        if format.is_lossy() {
            self.concatenate_via_manifest(processor.as_ref(), chunks, output)
                .await
        } else {
            let merged = processor.process(chunks).await?;
            write_output(output, &merged).await
        }
    }

    fn processor_for(&self, format: OutputFormat) -> Result<Arc<dyn AudioProcessor>, ConcatError> {
        self.processors
            .iter()
            .find(|processor| processor.supports(format))
            .cloned()
            .ok_or_else(|| ConcatError::NoProcessor(format.to_string()))
    }

    async fn concatenate_via_manifest(
        &self,
        processor: &dyn AudioProcessor,
        chunks: &[AudioChunk],
        output: &Path,
    ) -> Result<(), ConcatError> {
        ensure_parent_dir(output).await?;

        let mut artifacts = TempArtifacts::new(&self.temp_dir);
        let result = transcode(processor, chunks, output, &mut artifacts).await;
        artifacts.cleanup().await;

        if let Err(e) = &result {
            tracing::error!(
                job_id = %artifacts.job_id(),
                error = %e,
                "Audio concatenation failed"
            );
        }
        result
    }
}

async fn transcode(
    processor: &dyn AudioProcessor,
    chunks: &[AudioChunk],
    output: &Path,
    artifacts: &mut TempArtifacts,
) -> Result<(), ConcatError> {
    let mut segment_paths = Vec::with_capacity(chunks.len());
    for (index, chunk) in chunks.iter().enumerate() {
        let path = artifacts.segment_path(index);
        artifacts
            .write(path.clone(), &chunk.audio)
            .await
            .map_err(|e| {
                ConcatError::io(format!("failed to write temp segment {}", path.display()), e)
            })?;
        segment_paths.push(path);
    }

    let manifest_path = artifacts.manifest_path();
    artifacts
        .write(manifest_path.clone(), build_manifest(&segment_paths).as_bytes())
        .await
        .map_err(|e| {
            ConcatError::io(format!("failed to write manifest {}", manifest_path.display()), e)
        })?;

    // `output` is only replaced by a complete, non-empty transcode
    let staging_path = artifacts.staging_path(output);
    artifacts.register(staging_path.clone());
    processor.concatenate(&manifest_path, &staging_path).await?;

    let metadata = tokio::fs::metadata(&staging_path).await.map_err(|e| {
        ConcatError::io(
            format!("transcoder output missing at {}", staging_path.display()),
            e,
        )
    })?;
    if metadata.len() == 0 {
        return Err(ConcatError::EmptyOutput(output.to_path_buf()));
    }

    tokio::fs::rename(&staging_path, output)
        .await
        .map_err(|e| ConcatError::io(format!("failed to move output to {}", output.display()), e))?;

    tracing::info!(
        output = %output.display(),
        segment_count = segment_paths.len(),
        output_size_bytes = metadata.len(),
        "Audio chunks concatenated"
    );
    Ok(())
}

async fn ensure_parent_dir(output: &Path) -> Result<(), ConcatError> {
    match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| ConcatError::io(format!("failed to create {}", parent.display()), e)),
        _ => Ok(()),
    }
}

async fn write_output(output: &Path, contents: &[u8]) -> Result<(), ConcatError> {
    ensure_parent_dir(output).await?;
    tokio::fs::write(output, contents)
        .await
        .map_err(|e| ConcatError::io(format!("failed to write output {}", output.display()), e))
}
