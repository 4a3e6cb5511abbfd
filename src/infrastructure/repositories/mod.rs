pub mod chatterbox_tts_repository;
pub mod tts_repository;

pub use chatterbox_tts_repository::ChatterboxTtsRepository;
pub use tts_repository::{HealthStatus, TtsRepository, TtsRepositoryError};
