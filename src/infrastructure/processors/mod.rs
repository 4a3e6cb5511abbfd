pub mod audio_processor;
pub mod ffmpeg_processor;
pub mod wav_processor;

pub use audio_processor::{AudioProcessor, EncodingSettings, ProcessingError};
pub use ffmpeg_processor::FfmpegProcessor;
pub use wav_processor::WavProcessor;
