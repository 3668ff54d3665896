// Gesture module
// Stroke capture, scratch-out classification, and recognizer actions

pub mod recognizer;
pub mod scratch;
pub mod stroke;

pub use recognizer::{Recognition, StrokeAction, StrokeRecognizer, duration_from_template};
pub use scratch::{ScratchConfig, ScratchOutcome, StrokeFeatures, is_scratch_out, try_scratch_out};
pub use stroke::{Point, Stroke};
