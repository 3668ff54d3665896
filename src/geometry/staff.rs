// Staff geometry
// Vertical layout of the staves and the pixel <-> pitch mapping

/// Pitch labels covering the playable range, highest first.
/// Adjacent entries sit one half line spacing apart on the canvas.
pub const PITCH_NAMES: [&str; 19] = [
    "D6", "C6", "B5", "A5", "G5", "F5", "E5", "D5", "C5", "B4", "A4", "G4", "F4", "E4", "D4",
    "C4", "B3", "A3", "G3",
];

/// Pitch on a staff's top line; anchors step 0 of the mapping
pub const REFERENCE_PITCH: &str = "F5";

/// Ledger lines required for a notehead outside its staff
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerLines {
    /// True when the lines extend above the staff
    pub above: bool,
    /// Line Y positions, nearest the staff first (at most two)
    pub ys: Vec<i32>,
}

impl LedgerLines {
    pub fn count(&self) -> usize {
        self.ys.len()
    }
}

/// Vertical layout of the staves on a page
///
/// All mapping functions are pure; identical inputs always produce
/// identical output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaffLayout {
    /// Y of the first staff's top line
    pub top_padding: i32,
    /// X of every staff's left edge; frame geometry for the canvas
    pub left_padding: i32,
    /// Horizontal extent of the drawn staff lines
    pub staff_width: i32,
    /// Distance from a staff's top line to its bottom line
    pub staff_height: i32,
    /// Vertical gap between consecutive staves
    pub staff_spacing: i32,
    pub staff_count: usize,
}

impl Default for StaffLayout {
    fn default() -> Self {
        Self {
            top_padding: 60,
            left_padding: 60,
            staff_width: 1000,
            staff_height: 60,
            staff_spacing: 100,
            staff_count: 4,
        }
    }
}

impl StaffLayout {
    /// Vertical distance between a line and the adjacent space center
    pub fn half_line_spacing(&self) -> f64 {
        self.staff_height as f64 / 8.0
    }

    /// Vertical distance between adjacent staff lines, in whole pixels
    pub fn line_spacing(&self) -> i32 {
        round_half_up(2.0 * self.half_line_spacing())
    }

    /// Default snap tolerance: one half line spacing
    pub fn snap_tolerance(&self) -> i32 {
        round_half_up(self.half_line_spacing())
    }

    /// Top-line Y of the staff at `index`
    pub fn staff_top(&self, index: usize) -> i32 {
        self.top_padding + index as i32 * (self.staff_height + self.staff_spacing)
    }

    /// Top-line Y of the staff whose vertical center is closest to `y`.
    /// Total: out-of-range `y` clamps to the nearest edge staff, ties go
    /// to the topmost staff.
    pub fn nearest_staff_top(&self, y: i32) -> i32 {
        let mut best_top = self.top_padding;
        let mut best_dist = i32::MAX;
        for i in 0..self.staff_count {
            let top = self.staff_top(i);
            let center = top + self.staff_height / 2;
            let dist = (y - center).abs();
            if dist < best_dist {
                best_dist = dist;
                best_top = top;
            }
        }
        best_top
    }

    /// Banded staff assignment used when committing a drag: each staff
    /// claims half of the blank gap on either side, so a notehead only
    /// changes staff once its center crosses the middle of the gap.
    pub fn staff_top_for_band(&self, head_center_y: i32) -> i32 {
        for i in 0..self.staff_count {
            let top = self.staff_top(i);
            let bottom = top + self.staff_height;
            let band_top = top - self.staff_spacing / 2;
            let band_bottom = bottom + self.staff_spacing / 2;
            if head_center_y >= band_top && head_center_y <= band_bottom {
                return top;
            }
        }
        if head_center_y < self.top_padding - self.staff_spacing / 2 {
            self.staff_top(0)
        } else {
            self.staff_top(self.staff_count.saturating_sub(1))
        }
    }

    /// Pitch label for a notehead center Y, or `None` when the position
    /// falls outside the playable range
    pub fn pitch_for_y(&self, head_center_y: i32) -> Option<&'static str> {
        let staff_top = self.nearest_staff_top(head_center_y);
        let step = round_half_up((head_center_y - staff_top) as f64 / self.half_line_spacing());
        let anchor = reference_index() as i32;
        let index = anchor + step;
        if index < 0 || index >= PITCH_NAMES.len() as i32 {
            return None;
        }
        Some(PITCH_NAMES[index as usize])
    }

    /// Inverse mapping: the snapped head-center Y of a pitch on the staff
    /// whose top line is `staff_top`. `None` for labels not in the table.
    pub fn y_for_pitch(&self, pitch: &str, staff_top: i32) -> Option<i32> {
        let index = PITCH_NAMES.iter().position(|p| *p == pitch)? as i32;
        let rel = index - reference_index() as i32;
        Some(round_half_up(
            staff_top as f64 + rel as f64 * self.half_line_spacing(),
        ))
    }

    /// Round `raw_y` to the nearest half-line multiple from `staff_top`,
    /// but only move it when the snapped position is within
    /// `tolerance_px`; otherwise `raw_y` comes back unchanged.
    pub fn snap_y(&self, raw_y: i32, staff_top: i32, tolerance_px: i32) -> i32 {
        let half = self.half_line_spacing();
        let index = ((raw_y - staff_top) as f64 / half).round_ties_even();
        let snapped = round_half_up(staff_top as f64 + index * half);
        if (raw_y - snapped).abs() <= tolerance_px {
            snapped
        } else {
            raw_y
        }
    }

    /// Ledger lines for a notehead center outside its staff, capped at
    /// two. `None` when the head sits inside the staff or within the
    /// first line spacing beyond it.
    pub fn ledger_lines(&self, head_center_y: i32) -> Option<LedgerLines> {
        let staff_top = self.staff_top_for_band(head_center_y);
        let staff_bottom = staff_top + self.staff_height;
        let spacing = self.line_spacing();

        let (diff, above, base) = if head_center_y < staff_top {
            (staff_top - head_center_y, true, staff_top)
        } else if head_center_y > staff_bottom {
            (head_center_y - staff_bottom, false, staff_bottom)
        } else {
            return None;
        };

        let count = (diff / spacing).min(2);
        if count <= 0 {
            return None;
        }
        let ys = (1..=count)
            .map(|k| if above { base - k * spacing } else { base + k * spacing })
            .collect();
        Some(LedgerLines { above, ys })
    }
}

/// Half fractions round toward positive infinity
fn round_half_up(v: f64) -> i32 {
    (v + 0.5).floor() as i32
}

fn reference_index() -> usize {
    PITCH_NAMES
        .iter()
        .position(|p| *p == REFERENCE_PITCH)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_staff_tops() {
        let layout = StaffLayout::default();
        assert_eq!(layout.staff_top(0), 60);
        assert_eq!(layout.staff_top(1), 220);
        assert_eq!(layout.staff_top(2), 380);
        assert_eq!(layout.staff_top(3), 540);
    }

    #[test]
    fn test_nearest_staff_clamps_and_breaks_ties_upward() {
        let layout = StaffLayout::default();

        assert_eq!(layout.nearest_staff_top(-500), 60);
        assert_eq!(layout.nearest_staff_top(10_000), 540);

        // Exactly between the first two staff centers (90 and 250)
        assert_eq!(layout.nearest_staff_top(170), 60);
        assert_eq!(layout.nearest_staff_top(171), 220);
    }

    #[test]
    fn test_pitch_on_the_lines() {
        let layout = StaffLayout::default();

        // Top line of the first staff is the reference pitch
        assert_eq!(layout.pitch_for_y(60), Some("F5"));
        // One line down (two half steps)
        assert_eq!(layout.pitch_for_y(75), Some("D5"));
        // Bottom line
        assert_eq!(layout.pitch_for_y(120), Some("E4"));
    }

    #[test]
    fn test_pitch_for_y_out_of_range() {
        let layout = StaffLayout::default();

        // Far above the first staff: beyond D6
        assert_eq!(layout.pitch_for_y(15), None);
        // Far below the first staff but still nearest to it: beyond G3
        assert_eq!(layout.pitch_for_y(168), None);
        // Highest and lowest mapped positions still resolve
        assert_eq!(layout.pitch_for_y(23), Some("D6"));
        assert_eq!(layout.pitch_for_y(158), Some("G3"));
    }

    #[test]
    fn test_y_for_pitch_round_trips_on_every_staff() {
        let layout = StaffLayout::default();
        for staff in 0..layout.staff_count {
            let top = layout.staff_top(staff);
            for pitch in PITCH_NAMES {
                let y = layout.y_for_pitch(pitch, top).unwrap();
                assert_eq!(layout.pitch_for_y(y), Some(pitch), "pitch {pitch} staff {staff}");
            }
        }
    }

    #[test]
    fn test_y_for_pitch_unknown_label() {
        let layout = StaffLayout::default();
        assert_eq!(layout.y_for_pitch("H4", 60), None);
        assert_eq!(layout.y_for_pitch("", 60), None);
    }

    #[test]
    fn test_snap_then_map_is_stable() {
        let layout = StaffLayout::default();
        let tolerance = layout.snap_tolerance();

        // Everywhere inside the first staff band, deriving the pitch from
        // the snapped Y matches deriving it from the raw Y directly.
        for y in 20..=165 {
            let top = layout.nearest_staff_top(y);
            let snapped = layout.snap_y(y, top, tolerance);
            assert_eq!(
                layout.pitch_for_y(snapped),
                layout.pitch_for_y(y),
                "y = {y}"
            );
        }
    }

    #[test]
    fn test_snap_y_respects_tolerance() {
        let layout = StaffLayout::default();

        // 64 is 3.5px from the nearest half-line (67.5 -> 68)
        assert_eq!(layout.snap_y(64, 60, 8), 68);
        // With a tight tolerance the raw value comes back unchanged
        assert_eq!(layout.snap_y(64, 60, 2), 64);
    }

    #[test]
    fn test_snap_y_half_step_ties_round_to_even() {
        // staff_height 64 gives a half line spacing of exactly 8, so a
        // point 20px below the top line is an exact tie between steps 2
        // and 3; the even step wins.
        let layout = StaffLayout {
            staff_height: 64,
            ..StaffLayout::default()
        };
        assert_eq!(layout.snap_y(80, 60, 8), 76);
    }

    #[test]
    fn test_band_assignment_switches_mid_gap() {
        let layout = StaffLayout::default();

        // First staff claims [10, 170]
        assert_eq!(layout.staff_top_for_band(10), 60);
        assert_eq!(layout.staff_top_for_band(170), 60);
        assert_eq!(layout.staff_top_for_band(171), 220);

        // Outside every band clamps to the edge staves
        assert_eq!(layout.staff_top_for_band(-100), 60);
        assert_eq!(layout.staff_top_for_band(10_000), 540);
    }

    #[test]
    fn test_ledger_lines_above_and_below() {
        let layout = StaffLayout::default();

        // G3 head center sits 38px below the first staff's bottom line
        let below = layout.ledger_lines(158).unwrap();
        assert!(!below.above);
        assert_eq!(below.ys, vec![135, 150]);

        // A5 head center sits 15px above the top line
        let above = layout.ledger_lines(45).unwrap();
        assert!(above.above);
        assert_eq!(above.ys, vec![45]);
    }

    #[test]
    fn test_ledger_lines_inside_staff_and_cap() {
        let layout = StaffLayout::default();

        assert_eq!(layout.ledger_lines(90), None);
        // Just past the bottom line but within one line spacing
        assert_eq!(layout.ledger_lines(130), None);
        // Deep below the staff but still in its band: capped at two
        assert_eq!(layout.ledger_lines(166).unwrap().count(), 2);
    }
}
