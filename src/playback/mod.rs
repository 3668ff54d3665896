// Playback module
// Timeline construction and the cancellable scheduler that walks it

pub mod event;
pub mod port;
pub mod scheduler;
pub mod state;
pub mod timeline;

pub use event::{PlayEvent, PlayEventKind, sort_timeline};
pub use port::{ConsolePort, PortError, PortResult, SoundPort};
pub use scheduler::{PlaybackHandle, spawn};
pub use state::{PlaybackState, SharedPlaybackState};
pub use timeline::{DEFAULT_CHORD_TOLERANCE_PX, build_timeline};
