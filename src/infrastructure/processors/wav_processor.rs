use super::audio_processor::{AudioProcessor, ProcessingError};
use crate::domain::audio::OutputFormat;
use crate::domain::synthesis::AudioChunk;
use async_trait::async_trait;
use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use std::io::Cursor;

/// Merges WAV chunks in memory by decoding every chunk and re-encoding the
/// samples back to back into a single file
#[derive(Debug, Default)]
pub struct WavProcessor;

impl WavProcessor {
    pub fn new() -> Self {
        Self
    }
}

fn describe(spec: &WavSpec) -> String {
    let kind = match spec.sample_format {
        SampleFormat::Float => "float",
        SampleFormat::Int => "int",
    };
    format!(
        "{} Hz, {} ch, {}-bit {}",
        spec.sample_rate, spec.channels, spec.bits_per_sample, kind
    )
}

fn merge_wav(chunks: &[AudioChunk]) -> Result<Vec<u8>, ProcessingError> {
    let mut readers = Vec::with_capacity(chunks.len());
    for (index, chunk) in chunks.iter().enumerate() {
        let reader = WavReader::new(Cursor::new(chunk.audio.as_slice()))
            .map_err(|source| ProcessingError::Decode { index, source })?;
        readers.push(reader);
    }

    let Some(spec) = readers.first().map(|reader| reader.spec()) else {
        return Ok(Vec::new());
    };

    for (index, reader) in readers.iter().enumerate().skip(1) {
        if reader.spec() != spec {
            return Err(ProcessingError::IncompatibleFormat {
                index,
                found: describe(&reader.spec()),
                expected: describe(&spec),
            });
        }
    }

    let mut merged = Vec::new();
    {
        let mut writer =
            WavWriter::new(Cursor::new(&mut merged), spec).map_err(ProcessingError::Encode)?;

        for (index, reader) in readers.iter_mut().enumerate() {
            match spec.sample_format {
                SampleFormat::Float => {
                    for sample in reader.samples::<f32>() {
                        let sample =
                            sample.map_err(|source| ProcessingError::Decode { index, source })?;
                        writer.write_sample(sample).map_err(ProcessingError::Encode)?;
                    }
                }
                SampleFormat::Int => {
                    for sample in reader.samples::<i32>() {
                        let sample =
                            sample.map_err(|source| ProcessingError::Decode { index, source })?;
                        writer.write_sample(sample).map_err(ProcessingError::Encode)?;
                    }
                }
            }
        }

        writer.finalize().map_err(ProcessingError::Encode)?;
    }

    Ok(merged)
}

#[async_trait]
impl AudioProcessor for WavProcessor {
    fn name(&self) -> &'static str {
        "wav"
    }

    fn supports(&self, format: OutputFormat) -> bool {
        format == OutputFormat::Wav
    }

    async fn is_available(&self) -> bool {
        true
    }

    async fn process(&self, chunks: &[AudioChunk]) -> Result<Vec<u8>, ProcessingError> {
        let merged = merge_wav(chunks)?;
        tracing::debug!(
            chunk_count = chunks.len(),
            merged_size_bytes = merged.len(),
            "WAV chunks merged in memory"
        );
        Ok(merged)
    }
}
