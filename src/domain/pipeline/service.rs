use super::readiness::{check_readiness, ReadinessReport};
use crate::domain::audio::{ConcatError, ConcatenationEngine, OutputFormat};
use crate::domain::segment::segment;
use crate::domain::synthesis::SynthesisOrchestrator;
use crate::domain::voice::preset_names;
use crate::error::{PipelineError, PipelineResult};
use crate::infrastructure::config::Config;
use crate::infrastructure::processors::{
    AudioProcessor, EncodingSettings, FfmpegProcessor, WavProcessor,
};
use crate::infrastructure::repositories::{ChatterboxTtsRepository, TtsRepository};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// What a completed job produced
#[derive(Debug, Clone, Serialize)]
pub struct NarrationSummary {
    pub output: PathBuf,
    pub unit_count: usize,
    pub chunk_count: usize,
    pub failed_units: Vec<usize>,
    pub output_size_bytes: u64,
    pub elapsed: Duration,
}

/// Script text in, one audio file out: segment, synthesize, combine.
pub struct NarrationPipeline {
    config: Config,
    tts_repo: Arc<dyn TtsRepository>,
    orchestrator: SynthesisOrchestrator,
    engine: ConcatenationEngine,
}

impl NarrationPipeline {
    pub fn new(
        config: Config,
        tts_repo: Arc<dyn TtsRepository>,
        processors: Vec<Arc<dyn AudioProcessor>>,
    ) -> Self {
        let orchestrator = SynthesisOrchestrator::new(tts_repo.clone(), config.transport_limit);
        let engine = ConcatenationEngine::new(processors, config.temp_dir.clone());

        Self {
            config,
            tts_repo,
            orchestrator,
            engine,
        }
    }

    /// Wire the Chatterbox backend, ffmpeg and the WAV merger from `config`
    pub fn from_config(config: Config) -> PipelineResult<Self> {
        config.validate()?;

        let tts_repo: Arc<dyn TtsRepository> = Arc::new(ChatterboxTtsRepository::new(
            config.backend_url.clone(),
            config.request_timeout,
        )?);
        let processors: Vec<Arc<dyn AudioProcessor>> = vec![
            Arc::new(FfmpegProcessor::new(
                config.ffmpeg_path.clone(),
                EncodingSettings::default(),
            )),
            Arc::new(WavProcessor::new()),
        ];

        Ok(Self::new(config, tts_repo, processors))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub async fn check_readiness(&self) -> ReadinessReport {
        check_readiness(self.tts_repo.as_ref(), self.engine.processors()).await
    }

    /// Run one job. On success `output` holds audio for every unit that
    /// synthesized; if nothing synthesized, no output file is written.
    pub async fn run(&self, script: &str, output: &Path) -> PipelineResult<NarrationSummary> {
        let start_time = Instant::now();
        OutputFormat::from_path(output).map_err(PipelineError::Concatenation)?;

        match self.config.voice.builtin_preset() {
            Some(preset) => tracing::info!(
                voice_preset = preset.name,
                personality = preset.personality,
                use_case = preset.use_case,
                "Using built-in voice preset"
            ),
            None => tracing::warn!(
                voice_preset = %self.config.voice.preset,
                builtin_presets = ?preset_names(),
                "Voice preset is not a built-in preset, assuming a custom voice"
            ),
        }

        let units = segment(script, self.config.max_unit_length);
        let oversized = units
            .iter()
            .filter(|unit| unit.char_len() > self.config.max_unit_length)
            .count();
        tracing::info!(
            script_length = script.chars().count(),
            unit_count = units.len(),
            oversized_units = oversized,
            max_unit_length = self.config.max_unit_length,
            "Script segmented"
        );

        let report = self
            .orchestrator
            .process_units(&units, &self.config.voice, self.config.inter_request_delay)
            .await?;

        self.engine.combine(&report.chunks, output).await?;

        let output_size_bytes = tokio::fs::metadata(output)
            .await
            .map(|metadata| metadata.len())
            .map_err(|e| ConcatError::io(format!("missing output {}", output.display()), e))?;

        let summary = NarrationSummary {
            output: output.to_path_buf(),
            unit_count: units.len(),
            chunk_count: report.chunks.len(),
            failed_units: report.failed_units(),
            output_size_bytes,
            elapsed: start_time.elapsed(),
        };

        tracing::info!(
            output = %summary.output.display(),
            unit_count = summary.unit_count,
            chunk_count = summary.chunk_count,
            failed_units = summary.failed_units.len(),
            output_size_bytes = summary.output_size_bytes,
            latency_secs = summary.elapsed.as_secs_f64(),
            "Narration completed"
        );

        Ok(summary)
    }
}
