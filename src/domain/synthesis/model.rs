use serde::{Deserialize, Serialize};

/// Synthesized audio for one unit, or for one transport-sized part of a unit.
///
/// `part` is 0 unless the unit had to be re-split for the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioChunk {
    pub sequence_index: usize,
    pub part: usize,
    pub audio: Vec<u8>,
}

impl AudioChunk {
    pub fn new(sequence_index: usize, part: usize, audio: Vec<u8>) -> Self {
        Self {
            sequence_index,
            part,
            audio,
        }
    }
}

/// A unit (or unit part) the backend could not synthesize
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitFailure {
    pub sequence_index: usize,
    pub part: usize,
    pub reason: String,
}

/// Per-request result, consumed inside the orchestrator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SynthesisOutcome {
    Succeeded(AudioChunk),
    Failed(UnitFailure),
}

/// What a synthesis run produced: the successful chunks in script order plus
/// the failures that were skipped over.
#[derive(Debug, Clone, Default)]
pub struct SynthesisReport {
    pub chunks: Vec<AudioChunk>,
    pub failures: Vec<UnitFailure>,
    pub units_total: usize,
    pub requests_made: usize,
}

impl SynthesisReport {
    pub fn from_outcomes(outcomes: Vec<SynthesisOutcome>, units_total: usize) -> Self {
        let requests_made = outcomes.len();
        let mut report = Self {
            units_total,
            requests_made,
            ..Self::default()
        };

        for outcome in outcomes {
            match outcome {
                SynthesisOutcome::Succeeded(chunk) => report.chunks.push(chunk),
                SynthesisOutcome::Failed(failure) => report.failures.push(failure),
            }
        }

        report
    }

    /// Sequence indices of units with at least one failed part
    pub fn failed_units(&self) -> Vec<usize> {
        let mut indices: Vec<usize> = self.failures.iter().map(|f| f.sequence_index).collect();
        indices.dedup();
        indices
    }

    pub fn audio_bytes(&self) -> usize {
        self.chunks.iter().map(|chunk| chunk.audio.len()).sum()
    }
}
