pub mod readiness;
pub mod service;

pub use readiness::{check_readiness, ProcessorReadiness, ReadinessReport};
pub use service::{NarrationPipeline, NarrationSummary};
