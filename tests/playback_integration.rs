// Integration test: page -> timeline -> scheduler, end to end
//
// Builds pages the way the editor does, derives their timelines, and
// plays them through a recording port to check command ordering,
// cancellation cleanup, and the finish callback.

use inkstave::playback::{PortResult, scheduler};
use inkstave::{
    GlyphMetrics, NoteDuration, Page, PlaybackState, SoundPort, StaffLayout, Symbol,
    build_timeline,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Port that appends every command to a shared log
struct RecordingPort {
    log: Arc<Mutex<Vec<String>>>,
}

impl SoundPort for RecordingPort {
    fn start_note(&mut self, name: &str) -> PortResult<()> {
        self.log.lock().unwrap().push(format!("on {name}"));
        Ok(())
    }

    fn stop_note(&mut self, name: &str) -> PortResult<()> {
        self.log.lock().unwrap().push(format!("off {name}"));
        Ok(())
    }
}

fn recording_port() -> (RecordingPort, Arc<Mutex<Vec<String>>>) {
    let log = Arc::new(Mutex::new(Vec::new()));
    let port = RecordingPort {
        log: Arc::clone(&log),
    };
    (port, log)
}

/// A note placed so its head lands exactly on `pitch` on the first
/// staff, with the pitch committed the way a drag release would
fn committed_note(x: i32, pitch: &str, duration: NoteDuration) -> Symbol {
    let layout = StaffLayout::default();
    let metrics = GlyphMetrics::default();

    let head = layout.y_for_pitch(pitch, layout.staff_top(0)).unwrap();
    let mut symbol = Symbol::note(x, 0, duration);
    symbol.y = head - (metrics.height_of(&symbol) - layout.line_spacing() / 2);

    let committed = layout.pitch_for_y(metrics.head_center_y(&symbol, layout.line_spacing()));
    assert_eq!(committed, Some(pitch), "helper placed {pitch} off-grid");
    symbol.set_pitch(committed);
    symbol
}

#[test]
fn test_single_note_plays_through_port() {
    let symbol = committed_note(100, "G4", NoteDuration::Sixteenth);
    let timeline = build_timeline(&[symbol], 10);

    let (port, log) = recording_port();
    let mut handle = scheduler::spawn(timeline, port, || {}).unwrap();
    handle.join();

    assert_eq!(handle.state(), PlaybackState::Finished);
    assert_eq!(
        *log.lock().unwrap(),
        vec!["on G4".to_string(), "off G4".to_string()]
    );
}

#[test]
fn test_chord_stops_land_before_following_start() {
    // Two quarters close enough in X to sound together, then a third
    // note starting the instant the chord ends. The chord's stops must
    // reach the port before the next start.
    let mut page = Page::new();
    page.add(committed_note(100, "C4", NoteDuration::Quarter));
    page.add(committed_note(105, "E4", NoteDuration::Quarter));
    page.add(committed_note(200, "G4", NoteDuration::Quarter));

    let timeline = build_timeline(page.symbols(), 10);
    let (port, log) = recording_port();
    let mut handle = scheduler::spawn(timeline, port, || {}).unwrap();
    handle.join();

    assert_eq!(handle.state(), PlaybackState::Finished);
    assert_eq!(
        *log.lock().unwrap(),
        vec![
            "on C4".to_string(),
            "on E4".to_string(),
            "off C4".to_string(),
            "off E4".to_string(),
            "on G4".to_string(),
            "off G4".to_string(),
        ]
    );
}

#[test]
fn test_rest_leaves_silence_between_notes() {
    let layout = StaffLayout::default();
    let mut page = Page::new();
    page.add(committed_note(100, "C4", NoteDuration::Sixteenth));
    let mid = layout.staff_top(0) + 30;
    page.add(Symbol::rest(160, mid, NoteDuration::Sixteenth));
    page.add(committed_note(220, "E4", NoteDuration::Sixteenth));

    let timeline = build_timeline(page.symbols(), 10);
    let (port, log) = recording_port();

    let begun = Instant::now();
    let mut handle = scheduler::spawn(timeline, port, || {}).unwrap();
    handle.join();

    // C4 for 100ms, 100ms of rest, E4 for 100ms
    assert!(begun.elapsed() >= Duration::from_millis(300));
    assert_eq!(
        *log.lock().unwrap(),
        vec![
            "on C4".to_string(),
            "off C4".to_string(),
            "on E4".to_string(),
            "off E4".to_string(),
        ]
    );
}

#[test]
fn test_cancel_releases_notes_and_fires_callback_once() {
    // A whole note rings for 1600ms; cancel long before the stop event
    let symbol = committed_note(100, "C4", NoteDuration::Whole);
    let timeline = build_timeline(&[symbol], 10);

    let (port, log) = recording_port();
    let finish_count = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&finish_count);

    let mut handle = scheduler::spawn(timeline, port, move || {
        counter.fetch_add(1, Ordering::Relaxed);
    })
    .unwrap();

    // Let the start event fire before cancelling
    std::thread::sleep(Duration::from_millis(50));
    assert_eq!(handle.state(), PlaybackState::Running);

    let begun = Instant::now();
    handle.request_cancel();
    handle.join();

    // Poll-sliced waits bound the cancel latency to one slice plus
    // scheduling noise
    assert!(begun.elapsed() < Duration::from_millis(250));
    assert_eq!(handle.state(), PlaybackState::Cancelled);
    assert_eq!(finish_count.load(Ordering::Relaxed), 1);
    assert_eq!(
        *log.lock().unwrap(),
        vec!["on C4".to_string(), "off C4".to_string()]
    );
}

#[test]
fn test_uncommitted_notes_take_time_but_stay_silent() {
    // A never-dragged note has no pitch; it occupies its duration in
    // the timeline without reaching the port
    let mut page = Page::new();
    page.add(Symbol::note(100, 50, NoteDuration::Sixteenth));
    page.add(committed_note(200, "A4", NoteDuration::Sixteenth));

    let timeline = build_timeline(page.symbols(), 10);
    let (port, log) = recording_port();

    let begun = Instant::now();
    let mut handle = scheduler::spawn(timeline, port, || {}).unwrap();
    handle.join();

    assert!(begun.elapsed() >= Duration::from_millis(200));
    assert_eq!(
        *log.lock().unwrap(),
        vec!["on A4".to_string(), "off A4".to_string()]
    );
}
