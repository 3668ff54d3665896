// Inkstave - Library exports for tests and benchmarks

pub mod config;
pub mod editor;
pub mod geometry;
pub mod gesture;
pub mod messaging;
pub mod midi;
pub mod playback;
pub mod score;

// Re-export commonly used types for convenience
pub use config::{ConfigError, EditorConfig};
pub use editor::{DragSnapper, ScoreEditor, SnapCandidate, SnapState};
pub use geometry::{GlyphMetrics, Rect, StaffLayout};
pub use gesture::{
    Recognition, ScratchConfig, ScratchOutcome, Stroke, StrokeAction, StrokeRecognizer,
    is_scratch_out,
};
pub use messaging::channels::{create_notification_channel, push_notification};
pub use messaging::notification::{Notification, NotificationCategory, NotificationLevel};
pub use midi::{MidiError, MidiSoundPort, note_number};
pub use playback::{
    ConsolePort, PlayEvent, PlayEventKind, PlaybackHandle, PlaybackState, PortError, SoundPort,
    build_timeline,
};
pub use score::{Accidental, NoteDuration, Page, Symbol, SymbolId, SymbolKind};
