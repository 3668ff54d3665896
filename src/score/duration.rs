// Rhythmic durations and their playback lengths

/// Rhythmic value of a placed symbol
///
/// The same five values apply to notes and rests. Playback length is a
/// fixed table in milliseconds; there is no tempo model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NoteDuration {
    Whole,
    Half,
    #[default]
    Quarter,
    Eighth,
    Sixteenth,
}

impl NoteDuration {
    /// Playback length in milliseconds
    pub fn millis(&self) -> u64 {
        match self {
            NoteDuration::Whole => 1600,
            NoteDuration::Half => 800,
            NoteDuration::Quarter => 400,
            NoteDuration::Eighth => 200,
            NoteDuration::Sixteenth => 100,
        }
    }

    /// All durations, longest first
    pub fn all() -> [NoteDuration; 5] {
        [
            NoteDuration::Whole,
            NoteDuration::Half,
            NoteDuration::Quarter,
            NoteDuration::Eighth,
            NoteDuration::Sixteenth,
        ]
    }
}
