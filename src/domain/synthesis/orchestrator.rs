use super::error::SynthesisError;
use super::model::{AudioChunk, SynthesisOutcome, SynthesisReport, UnitFailure};
use crate::domain::segment::{split_for_transport, TextUnit};
use crate::domain::voice::VoiceConfig;
use crate::infrastructure::repositories::TtsRepository;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Chatterbox accepts at most 2000 characters per request
pub const DEFAULT_TRANSPORT_LIMIT: usize = 2000;

/// Drives the TTS repository over a job's units, one request at a time.
pub struct SynthesisOrchestrator {
    tts_repo: Arc<dyn TtsRepository>,
    transport_limit: usize,
}

impl SynthesisOrchestrator {
    pub fn new(tts_repo: Arc<dyn TtsRepository>, transport_limit: usize) -> Self {
        Self {
            tts_repo,
            transport_limit,
        }
    }

    /// Synthesize every unit in sequence order.
    ///
    /// Units longer than the transport limit are re-split and each part is
    /// synthesized on its own, keeping the parent's position. `inter_request_delay`
    /// is awaited between consecutive requests, never after the last one.
    /// A failed request is logged and skipped; the job only fails when the
    /// input is empty or nothing at all was synthesized.
    pub async fn process_units(
        &self,
        units: &[TextUnit],
        voice: &VoiceConfig,
        inter_request_delay: Duration,
    ) -> Result<SynthesisReport, SynthesisError> {
        if units.is_empty() {
            return Err(SynthesisError::NoText);
        }

        let start_time = Instant::now();
        let mut ordered: Vec<&TextUnit> = units.iter().collect();
        ordered.sort_by_key(|unit| unit.sequence_index);

        tracing::info!(
            unit_count = ordered.len(),
            voice_preset = %voice.preset,
            transport_limit = self.transport_limit,
            delay_ms = inter_request_delay.as_millis(),
            "Starting synthesis"
        );

        let mut outcomes = Vec::with_capacity(ordered.len());
        let mut requests_sent = 0usize;
        for unit in ordered {
            let parts = self.parts_for(unit);
            if parts.is_empty() {
                tracing::warn!(
                    sequence_index = unit.sequence_index,
                    "Unit has no speakable text, skipping"
                );
                outcomes.push(SynthesisOutcome::Failed(UnitFailure {
                    sequence_index: unit.sequence_index,
                    part: 0,
                    reason: "unit has no speakable text".to_string(),
                }));
                continue;
            }

            for (part, text) in parts.iter().enumerate() {
                if requests_sent > 0 && !inter_request_delay.is_zero() {
                    tokio::time::sleep(inter_request_delay).await;
                }
                requests_sent += 1;

                let outcome = self.synthesize_part(unit.sequence_index, part, text, voice).await;
                outcomes.push(outcome);
            }
        }

        let report = SynthesisReport::from_outcomes(outcomes, units.len());

        tracing::info!(
            unit_count = report.units_total,
            requests = report.requests_made,
            chunks = report.chunks.len(),
            failures = report.failures.len(),
            audio_size_bytes = report.audio_bytes(),
            latency_ms = start_time.elapsed().as_millis(),
            "Synthesis finished"
        );

        if report.chunks.is_empty() {
            return Err(SynthesisError::NoAudioProduced {
                failed_requests: report.failures.len(),
            });
        }

        Ok(report)
    }

    fn parts_for(&self, unit: &TextUnit) -> Vec<String> {
        if unit.char_len() <= self.transport_limit {
            let text = unit.content.trim();
            return if text.is_empty() {
                Vec::new()
            } else {
                vec![text.to_string()]
            };
        }

        let parts = split_for_transport(&unit.content, self.transport_limit);
        tracing::debug!(
            sequence_index = unit.sequence_index,
            text_length = unit.char_len(),
            part_count = parts.len(),
            "Unit exceeds transport limit, re-split"
        );
        parts
    }

    async fn synthesize_part(
        &self,
        sequence_index: usize,
        part: usize,
        text: &str,
        voice: &VoiceConfig,
    ) -> SynthesisOutcome {
        let result = self.tts_repo.synthesize(text, voice).await;

        match result {
            Ok(audio) if !audio.is_empty() => {
                tracing::info!(
                    sequence_index,
                    part,
                    text_length = text.chars().count(),
                    audio_size_bytes = audio.len(),
                    "Unit synthesized"
                );
                SynthesisOutcome::Succeeded(AudioChunk::new(sequence_index, part, audio))
            }
            Ok(_) => {
                tracing::warn!(sequence_index, part, "Backend returned empty audio, skipping unit");
                SynthesisOutcome::Failed(UnitFailure {
                    sequence_index,
                    part,
                    reason: "empty audio".to_string(),
                })
            }
            Err(e) => {
                tracing::warn!(
                    sequence_index,
                    part,
                    error = %e,
                    "Synthesis failed, skipping unit"
                );
                SynthesisOutcome::Failed(UnitFailure {
                    sequence_index,
                    part,
                    reason: e.to_string(),
                })
            }
        }
    }
}
