// Horizontal snap lock for note dragging
// A dragged note latches onto the X of a neighbour on the same staff
// and stays there until the pointer pulls far enough away

use crate::score::symbol::SymbolId;

/// Snap lock state. `anchor_x` is the left edge of the locked target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SnapState {
    #[default]
    Free,
    Locked {
        target: SymbolId,
        anchor_x: i32,
    },
}

/// A note the dragged symbol may snap to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapCandidate {
    pub id: SymbolId,
    /// Left edge of the candidate's glyph
    pub x: i32,
    pub width: i32,
}

#[derive(Debug, Clone)]
pub struct DragSnapper {
    state: SnapState,
    unsnap_dx: i32,
}

impl DragSnapper {
    /// `unsnap_dx` is clamped to at least 4 px so a lock can always be
    /// escaped with a small deliberate motion
    pub fn new(unsnap_dx: i32) -> Self {
        Self {
            state: SnapState::Free,
            unsnap_dx: unsnap_dx.max(4),
        }
    }

    /// Releases any lock; called at drag start and on staff crossings
    pub fn reset(&mut self) {
        self.state = SnapState::Free;
    }

    pub fn state(&self) -> SnapState {
        self.state
    }

    pub fn is_snapped(&self) -> bool {
        matches!(self.state, SnapState::Locked { .. })
    }

    /// X to pin the dragged glyph to while locked
    pub fn snapped_x(&self) -> Option<i32> {
        match self.state {
            SnapState::Locked { anchor_x, .. } => Some(anchor_x),
            SnapState::Free => None,
        }
    }

    /// Advances the state machine for one pointer move.
    ///
    /// While locked, the only transition is the escape: the pointer
    /// must travel more than `unsnap_dx` from the anchor, and no new
    /// lock is taken on the same move. While free, the dragged glyph's
    /// span (pointer-centered, `half_width` each side) is tested
    /// against each candidate in order and the first overlap locks.
    pub fn on_drag_move(&mut self, pointer_x: i32, half_width: i32, candidates: &[SnapCandidate]) {
        if let SnapState::Locked { anchor_x, .. } = self.state {
            if (pointer_x - anchor_x).abs() > self.unsnap_dx {
                self.state = SnapState::Free;
            }
            return;
        }

        let span_left = pointer_x - half_width;
        let span_right = pointer_x + half_width;

        for candidate in candidates {
            let left = candidate.x;
            let right = candidate.x + candidate.width.max(1);
            if span_right >= left && span_left <= right {
                self.state = SnapState::Locked {
                    target: candidate.id,
                    anchor_x: candidate.x,
                };
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(id: SymbolId, x: i32, width: i32) -> SnapCandidate {
        SnapCandidate { id, x, width }
    }

    #[test]
    fn test_overlap_locks_onto_first_candidate() {
        let mut snapper = DragSnapper::new(12);
        let candidates = [candidate(1, 95, 20), candidate(2, 100, 20)];

        snapper.on_drag_move(100, 10, &candidates);

        assert_eq!(
            snapper.state(),
            SnapState::Locked {
                target: 1,
                anchor_x: 95
            }
        );
        assert_eq!(snapper.snapped_x(), Some(95));
    }

    #[test]
    fn test_edge_touch_counts_as_overlap() {
        let mut snapper = DragSnapper::new(12);
        // Span [140, 160] just reaches the candidate's left edge at 160
        snapper.on_drag_move(150, 10, &[candidate(7, 160, 20)]);
        assert!(snapper.is_snapped());
    }

    #[test]
    fn test_no_overlap_stays_free() {
        let mut snapper = DragSnapper::new(12);
        snapper.on_drag_move(100, 10, &[candidate(1, 200, 20)]);
        assert_eq!(snapper.state(), SnapState::Free);
        assert_eq!(snapper.snapped_x(), None);
    }

    #[test]
    fn test_lock_holds_within_unsnap_distance() {
        let mut snapper = DragSnapper::new(12);
        snapper.on_drag_move(100, 10, &[candidate(1, 95, 20)]);
        assert!(snapper.is_snapped());

        // 12 px from the anchor at 95 is still within the threshold
        snapper.on_drag_move(107, 10, &[candidate(1, 95, 20)]);
        assert_eq!(snapper.snapped_x(), Some(95));
    }

    #[test]
    fn test_escape_does_not_relock_on_the_same_move() {
        let mut snapper = DragSnapper::new(12);
        let candidates = [candidate(1, 95, 20)];
        snapper.on_drag_move(100, 10, &candidates);
        assert!(snapper.is_snapped());

        // Far enough to escape, yet still overlapping the candidate;
        // the relock waits for the next move
        snapper.on_drag_move(110, 10, &candidates);
        assert_eq!(snapper.state(), SnapState::Free);

        snapper.on_drag_move(110, 10, &candidates);
        assert!(snapper.is_snapped());
    }

    #[test]
    fn test_zero_width_candidate_still_locks() {
        let mut snapper = DragSnapper::new(12);
        snapper.on_drag_move(100, 10, &[candidate(1, 105, 0)]);
        assert_eq!(snapper.snapped_x(), Some(105));
    }

    #[test]
    fn test_reset_releases_the_lock() {
        let mut snapper = DragSnapper::new(12);
        snapper.on_drag_move(100, 10, &[candidate(1, 95, 20)]);
        assert!(snapper.is_snapped());

        snapper.reset();
        assert_eq!(snapper.state(), SnapState::Free);
    }

    #[test]
    fn test_unsnap_distance_has_a_floor() {
        let mut snapper = DragSnapper::new(0);
        snapper.on_drag_move(100, 10, &[candidate(1, 95, 20)]);

        // 4 px of travel from the anchor at 95 is within the clamped
        // threshold; 5 px is past it
        snapper.on_drag_move(99, 10, &[]);
        assert!(snapper.is_snapped());

        snapper.on_drag_move(100, 10, &[]);
        assert!(!snapper.is_snapped());
    }
}
