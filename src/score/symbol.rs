// Placed symbols on the staff canvas
// A symbol is either a pitched note or a rest; both carry a position and duration

use crate::score::duration::NoteDuration;
use std::sync::atomic::{AtomicU64, Ordering};

/// Unique identifier for placed symbols
pub type SymbolId = u64;

/// Global symbol ID generator (atomic for thread-safety)
static NEXT_SYMBOL_ID: AtomicU64 = AtomicU64::new(1);

/// Generate a unique symbol ID
pub fn generate_symbol_id() -> SymbolId {
    NEXT_SYMBOL_ID.fetch_add(1, Ordering::Relaxed)
}

/// Accidental attached to a note
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Accidental {
    #[default]
    None,
    Sharp,
    Flat,
}

impl Accidental {
    /// Rewrite a pitch label with this accidental ("G4" -> "G#4").
    ///
    /// The mark is inserted after the letter; labels shorter than two
    /// characters pass through unchanged.
    pub fn apply(&self, pitch: &str) -> String {
        // Split on the first character's boundary, whatever its width
        let letter_len = pitch.chars().next().map_or(0, char::len_utf8);
        if letter_len == 0 || letter_len == pitch.len() {
            return pitch.to_string();
        }
        let (letter, octave) = pitch.split_at(letter_len);
        match self {
            Accidental::None => pitch.to_string(),
            Accidental::Sharp => format!("{letter}#{octave}"),
            Accidental::Flat => format!("{letter}b{octave}"),
        }
    }

    /// Display glyph for status text ("♯", "♭", or empty)
    pub fn glyph(&self) -> &'static str {
        match self {
            Accidental::None => "",
            Accidental::Sharp => "♯",
            Accidental::Flat => "♭",
        }
    }
}

/// Variant data for a placed symbol
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SymbolKind {
    /// Pitched note; `pitch` stays `None` until the first position commit
    Note {
        pitch: Option<&'static str>,
        accidental: Accidental,
    },
    /// Silence; occupies time during playback but makes no sound
    Rest,
}

/// A symbol placed on the canvas
///
/// `x`/`y` anchor the top-left corner of the glyph in canvas pixels.
/// Pitch is derived from the position by the staff geometry and rewritten
/// on every position commit.
#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    /// Unique identifier for this symbol
    pub id: SymbolId,

    /// Top-left glyph anchor, canvas pixels
    pub x: i32,
    pub y: i32,

    /// Rhythmic value
    pub duration: NoteDuration,

    pub kind: SymbolKind,
}

impl Symbol {
    /// Create a note with no computed pitch yet
    pub fn note(x: i32, y: i32, duration: NoteDuration) -> Self {
        Self {
            id: generate_symbol_id(),
            x,
            y,
            duration,
            kind: SymbolKind::Note {
                pitch: None,
                accidental: Accidental::None,
            },
        }
    }

    /// Create a rest
    pub fn rest(x: i32, y: i32, duration: NoteDuration) -> Self {
        Self {
            id: generate_symbol_id(),
            x,
            y,
            duration,
            kind: SymbolKind::Rest,
        }
    }

    pub fn is_note(&self) -> bool {
        matches!(self.kind, SymbolKind::Note { .. })
    }

    pub fn is_rest(&self) -> bool {
        matches!(self.kind, SymbolKind::Rest)
    }

    /// Base pitch label, without accidental ("G4")
    pub fn pitch(&self) -> Option<&'static str> {
        match self.kind {
            SymbolKind::Note { pitch, .. } => pitch,
            SymbolKind::Rest => None,
        }
    }

    /// Set the base pitch label. No-op for rests.
    pub fn set_pitch(&mut self, new_pitch: Option<&'static str>) {
        if let SymbolKind::Note { pitch, .. } = &mut self.kind {
            *pitch = new_pitch;
        }
    }

    pub fn accidental(&self) -> Accidental {
        match self.kind {
            SymbolKind::Note { accidental, .. } => accidental,
            SymbolKind::Rest => Accidental::None,
        }
    }

    /// Set the accidental. Returns false for rests.
    pub fn set_accidental(&mut self, new_accidental: Accidental) -> bool {
        if let SymbolKind::Note { accidental, .. } = &mut self.kind {
            *accidental = new_accidental;
            true
        } else {
            false
        }
    }

    /// Resolved sounding name: the base pitch with its accidental applied
    /// ("G#4"). Rests and notes without a computed pitch yield `None`.
    pub fn sounding_name(&self) -> Option<String> {
        match &self.kind {
            SymbolKind::Note {
                pitch: Some(p),
                accidental,
            } => Some(accidental.apply(p)),
            _ => None,
        }
    }

    /// Label for status text: base pitch followed by the accidental glyph
    /// ("G4♯"), or "?" when no pitch has been computed yet
    pub fn display_pitch(&self) -> String {
        match &self.kind {
            SymbolKind::Note {
                pitch: Some(p),
                accidental,
            } => format!("{}{}", p, accidental.glyph()),
            SymbolKind::Note { pitch: None, .. } => "?".to_string(),
            SymbolKind::Rest => String::new(),
        }
    }
}
