// Editor module
// Drag snapping and the facade that drives every edit

pub mod score_editor;
pub mod snapper;

pub use score_editor::ScoreEditor;
pub use snapper::{DragSnapper, SnapCandidate, SnapState};
