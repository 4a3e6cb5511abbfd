pub mod artifacts;
pub mod engine;
pub mod error;
pub mod format;
pub mod manifest;

pub use artifacts::TempArtifacts;
pub use engine::ConcatenationEngine;
pub use error::ConcatError;
pub use format::OutputFormat;
pub use manifest::{build_manifest, escape_manifest_path};
