pub mod audio;
pub mod pipeline;
pub mod segment;
pub mod synthesis;
pub mod voice;
