// Timeline builder
// Left-to-right reading of a page into timed start/stop events

use crate::playback::event::{PlayEvent, sort_timeline};
use crate::score::symbol::Symbol;

/// Notes whose X positions differ by at most this many pixels sound
/// together as a chord
pub const DEFAULT_CHORD_TOLERANCE_PX: i32 = 10;

/// Builds the playback timeline for a set of symbols.
///
/// Symbols are read in X order. A rest advances the clock silently. A
/// run of consecutive notes within `chord_tolerance_px` of the first
/// note's X forms a chord; the chord starts together and each member
/// stops after its own duration, while the clock advances by the
/// shortest duration in the chord. Notes without a resolved pitch
/// still occupy time but produce no events. A negative tolerance is
/// treated as zero.
pub fn build_timeline(symbols: &[Symbol], chord_tolerance_px: i32) -> Vec<PlayEvent> {
    // Below zero the anchor note would fail its own tolerance check and
    // the scan could never advance
    let chord_tolerance_px = chord_tolerance_px.max(0);
    let mut sorted: Vec<&Symbol> = symbols.iter().collect();
    sorted.sort_by_key(|s| s.x);

    let mut events: Vec<PlayEvent> = Vec::new();
    let mut now: u64 = 0;
    let mut i = 0;

    while i < sorted.len() {
        let symbol = sorted[i];
        if symbol.is_rest() {
            now += symbol.duration.millis();
            i += 1;
            continue;
        }

        // Chord scan anchored on the first note's X
        let anchor_x = symbol.x;
        let mut names: Vec<String> = Vec::new();
        let mut min_ms = u64::MAX;
        let mut j = i;
        while j < sorted.len()
            && sorted[j].is_note()
            && (sorted[j].x - anchor_x).abs() <= chord_tolerance_px
        {
            let duration_ms = sorted[j].duration.millis();
            min_ms = min_ms.min(duration_ms);
            if let Some(name) = sorted[j].sounding_name() {
                events.push(PlayEvent::stop(now + duration_ms, name.clone()));
                names.push(name);
            }
            j += 1;
        }

        if !names.is_empty() {
            events.push(PlayEvent::start(now, names));
        }
        now += min_ms;
        i = j;
    }

    sort_timeline(&mut events);
    events
}
