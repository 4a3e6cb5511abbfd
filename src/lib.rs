//! Turns a narration script into a single audio file.
//!
//! The script is split into bounded-length units ([`domain::segment`]), each
//! unit is synthesized by a TTS backend one request at a time
//! ([`domain::synthesis`]), and the resulting chunks are combined into one
//! output file ([`domain::audio`]). [`domain::pipeline::NarrationPipeline`]
//! wires the three stages together.

pub mod domain;
pub mod error;
pub mod infrastructure;

pub use domain::pipeline::{NarrationPipeline, NarrationSummary};
pub use error::{PipelineError, PipelineResult};
pub use infrastructure::config::{Config, ConfigOverrides};
