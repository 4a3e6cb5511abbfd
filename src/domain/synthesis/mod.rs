pub mod error;
pub mod model;
pub mod orchestrator;

pub use error::SynthesisError;
pub use model::{AudioChunk, SynthesisOutcome, SynthesisReport, UnitFailure};
pub use orchestrator::{SynthesisOrchestrator, DEFAULT_TRANSPORT_LIMIT};
