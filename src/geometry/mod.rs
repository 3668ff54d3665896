// Geometry module
// Staff layout, pitch mapping, and glyph extents

pub mod metrics;
pub mod rect;
pub mod staff;

pub use metrics::GlyphMetrics;
pub use rect::Rect;
pub use staff::{LedgerLines, PITCH_NAMES, REFERENCE_PITCH, StaffLayout};
