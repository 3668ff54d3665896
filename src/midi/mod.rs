// MIDI module
// Note-name arithmetic and the midir-backed output port

pub mod notes;
pub mod output;

pub use notes::note_number;
pub use output::{DEFAULT_VELOCITY, MidiError, MidiResult, MidiSoundPort};
