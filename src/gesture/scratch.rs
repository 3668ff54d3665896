// Scratch-out detection
// Kinematic features of a finished stroke decide deletion vs drawing

use crate::geometry::metrics::GlyphMetrics;
use crate::geometry::rect::Rect;
use crate::gesture::stroke::Stroke;
use crate::score::page::Page;
use crate::score::symbol::{SymbolId, SymbolKind};
use serde::{Deserialize, Serialize};

/// Thresholds for the scratch-out signature
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScratchConfig {
    /// Minimum number of horizontal direction flips
    pub min_reversals: u32,
    /// Minimum |dx| / |dy| aspect ratio
    pub min_ratio: f64,
}

impl Default for ScratchConfig {
    fn default() -> Self {
        Self {
            min_reversals: 2,
            min_ratio: 4.0,
        }
    }
}

/// Horizontal-motion features extracted from a stroke
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StrokeFeatures {
    pub total_dx: f64,
    pub total_dy: f64,
    pub reversals: u32,
}

impl StrokeFeatures {
    /// Walk consecutive point pairs, accumulating absolute travel and
    /// counting sign flips of the horizontal direction. Vertical-only
    /// segments neither count nor reset the remembered direction.
    pub fn of(stroke: &Stroke) -> Self {
        let mut features = StrokeFeatures::default();
        let mut last_dir = 0i32;

        for pair in stroke.points().windows(2) {
            let dx = pair[1].x - pair[0].x;
            let dy = pair[1].y - pair[0].y;
            features.total_dx += dx.abs();
            features.total_dy += dy.abs();

            let dir = if dx > 0.0 {
                1
            } else if dx < 0.0 {
                -1
            } else {
                0
            };
            if dir != 0 {
                if last_dir != 0 && dir != last_dir {
                    features.reversals += 1;
                }
                last_dir = dir;
            }
        }
        features
    }

    /// Aspect ratio of the travel; +inf for purely horizontal strokes
    pub fn ratio(&self) -> f64 {
        if self.total_dy == 0.0 {
            f64::INFINITY
        } else {
            self.total_dx / self.total_dy
        }
    }
}

/// True when the stroke matches the scratch-out signature. Degenerate
/// strokes (fewer than two points) never match.
pub fn is_scratch_out(stroke: &Stroke, config: &ScratchConfig) -> bool {
    if stroke.len() < 2 {
        return false;
    }
    let features = StrokeFeatures::of(stroke);
    features.reversals >= config.min_reversals && features.ratio() >= config.min_ratio
}

/// What a scratch-out changed on the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScratchOutcome {
    pub removed: usize,
    pub cleared: usize,
}

impl ScratchOutcome {
    pub fn status_message(&self) -> String {
        match (self.removed, self.cleared) {
            (0, 0) => "Scratch-out: no symbols intersected.".to_string(),
            (r, 0) => format!("Scratch-out: removed {r} symbols."),
            (0, c) => format!("Scratch-out: cleared {c} accidental(s)."),
            (r, c) => format!("Scratch-out: removed {r} symbols, cleared {c} accidental(s)."),
        }
    }
}

/// Classify the stroke and, on a match, apply it to the page.
///
/// `Some` is returned for every stroke that classifies as a scratch-out,
/// including one over blank canvas; `None` means the stroke is a drawing
/// gesture and belongs to the general recognizer.
pub fn try_scratch_out(
    page: &mut Page,
    stroke: &Stroke,
    metrics: &GlyphMetrics,
    config: &ScratchConfig,
) -> Option<ScratchOutcome> {
    if !is_scratch_out(stroke, config) {
        return None;
    }
    let stroke_box = stroke.bounding_box()?;
    Some(apply(page, &stroke_box, metrics))
}

/// Delete every symbol whose glyph the stroke box hits; a hit on a
/// note's accidental alone clears the accidental and keeps the note.
fn apply(page: &mut Page, stroke_box: &Rect, metrics: &GlyphMetrics) -> ScratchOutcome {
    let mut to_remove: Vec<SymbolId> = Vec::new();
    let mut to_clear: Vec<SymbolId> = Vec::new();

    for symbol in page.symbols() {
        let glyph_hit = stroke_box.intersects(&metrics.bounds(symbol));
        let accidental_hit = metrics
            .accidental_bounds(symbol)
            .is_some_and(|b| stroke_box.intersects(&b));

        match symbol.kind {
            SymbolKind::Rest if glyph_hit => to_remove.push(symbol.id),
            SymbolKind::Note { .. } if glyph_hit => to_remove.push(symbol.id),
            SymbolKind::Note { .. } if accidental_hit => to_clear.push(symbol.id),
            _ => {}
        }
    }

    let mut outcome = ScratchOutcome::default();
    for id in to_remove {
        if page.remove(id).is_some() {
            outcome.removed += 1;
        }
    }
    for id in to_clear {
        if page.clear_accidental(id) {
            outcome.cleared += 1;
        }
    }
    outcome
}
