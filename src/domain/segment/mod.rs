pub mod model;
pub mod segmenter;

pub use model::{TextUnit, DEFAULT_MAX_UNIT_LENGTH};
pub use segmenter::{segment, split_for_transport};
