// Glyph metrics
// Pixel extents of the rendered sprites, supplied by the canvas collaborator

use crate::geometry::rect::Rect;
use crate::score::duration::NoteDuration;
use crate::score::symbol::{Accidental, Symbol, SymbolKind};

/// Sprite extents used for hit-testing and head-center math
///
/// The canvas draws scaled sprite images; the core only needs their
/// pixel sizes. Note glyphs anchor the head at the glyph bottom, which
/// is why the head-center formula subtracts from the full height.
/// Defaults match the stock sprite set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphMetrics {
    /// Stemless whole-note glyph (width, height)
    pub whole_note: (i32, i32),
    /// Stemmed note glyph, half through sixteenth (width, height)
    pub stemmed_note: (i32, i32),
    pub whole_rest: (i32, i32),
    pub half_rest: (i32, i32),
    pub quarter_rest: (i32, i32),
    pub eighth_rest: (i32, i32),
    pub sixteenth_rest: (i32, i32),
    /// Sharp/flat glyph (width, height)
    pub accidental: (i32, i32),
    /// Horizontal gap between an accidental and its note
    pub accidental_gap: i32,
    /// Vertical offset from a note's anchor to its accidental
    pub accidental_drop: i32,
}

impl Default for GlyphMetrics {
    fn default() -> Self {
        Self {
            whole_note: (24, 15),
            stemmed_note: (20, 55),
            whole_rest: (18, 8),
            half_rest: (18, 8),
            quarter_rest: (12, 40),
            eighth_rest: (14, 28),
            sixteenth_rest: (16, 32),
            accidental: (15, 25),
            accidental_gap: 4,
            accidental_drop: 35,
        }
    }
}

impl GlyphMetrics {
    /// Glyph size for a symbol
    pub fn size_of(&self, symbol: &Symbol) -> (i32, i32) {
        match (&symbol.kind, symbol.duration) {
            (SymbolKind::Note { .. }, NoteDuration::Whole) => self.whole_note,
            (SymbolKind::Note { .. }, _) => self.stemmed_note,
            (SymbolKind::Rest, NoteDuration::Whole) => self.whole_rest,
            (SymbolKind::Rest, NoteDuration::Half) => self.half_rest,
            (SymbolKind::Rest, NoteDuration::Quarter) => self.quarter_rest,
            (SymbolKind::Rest, NoteDuration::Eighth) => self.eighth_rest,
            (SymbolKind::Rest, NoteDuration::Sixteenth) => self.sixteenth_rest,
        }
    }

    pub fn width_of(&self, symbol: &Symbol) -> i32 {
        self.size_of(symbol).0
    }

    pub fn height_of(&self, symbol: &Symbol) -> i32 {
        self.size_of(symbol).1
    }

    /// Bounding box of the symbol's glyph
    pub fn bounds(&self, symbol: &Symbol) -> Rect {
        let (w, h) = self.size_of(symbol);
        Rect::new(symbol.x, symbol.y, w, h)
    }

    /// Bounding box of a note's accidental glyph, drawn to the left of
    /// the note. `None` when the symbol carries no accidental.
    pub fn accidental_bounds(&self, symbol: &Symbol) -> Option<Rect> {
        if symbol.accidental() == Accidental::None {
            return None;
        }
        let (aw, ah) = self.accidental;
        Some(Rect::new(
            symbol.x - aw - self.accidental_gap,
            symbol.y + self.accidental_drop,
            aw,
            ah,
        ))
    }

    /// Notehead center Y: the head sits at the bottom of the glyph
    pub fn head_center_y(&self, symbol: &Symbol, line_spacing: i32) -> i32 {
        symbol.y + self.height_of(symbol) - line_spacing / 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_varies_by_kind_and_duration() {
        let metrics = GlyphMetrics::default();

        let whole = Symbol::note(0, 0, NoteDuration::Whole);
        let quarter = Symbol::note(0, 0, NoteDuration::Quarter);
        let rest = Symbol::rest(0, 0, NoteDuration::Quarter);

        assert_eq!(metrics.size_of(&whole), metrics.whole_note);
        assert_eq!(metrics.size_of(&quarter), metrics.stemmed_note);
        assert_eq!(metrics.size_of(&rest), metrics.quarter_rest);
    }

    #[test]
    fn test_head_center_sits_above_glyph_bottom() {
        let metrics = GlyphMetrics::default();
        let note = Symbol::note(100, 80, NoteDuration::Quarter);

        // 80 + 55 - 15/2 = 128
        assert_eq!(metrics.head_center_y(&note, 15), 128);
    }

    #[test]
    fn test_accidental_bounds() {
        let metrics = GlyphMetrics::default();
        let mut note = Symbol::note(100, 80, NoteDuration::Quarter);

        assert_eq!(metrics.accidental_bounds(&note), None);

        note.set_accidental(Accidental::Flat);
        let rect = metrics.accidental_bounds(&note).unwrap();
        assert_eq!(rect, Rect::new(100 - 15 - 4, 80 + 35, 15, 25));
    }

    #[test]
    fn test_rests_have_no_accidental_bounds() {
        let metrics = GlyphMetrics::default();
        let rest = Symbol::rest(100, 80, NoteDuration::Half);
        assert_eq!(metrics.accidental_bounds(&rest), None);
    }
}
