use inkstave::{
    ConsolePort, EditorConfig, MidiSoundPort, NoteDuration, ScoreEditor, build_timeline,
    create_notification_channel,
};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

// Notifications are short status lines emitted at human editing rate;
// 256 holds far more than one run ever produces
const NOTIFICATION_RINGBUFFER_CAPACITY: usize = 256;

fn main() {
    println!("=== Inkstave ===");
    println!("Staff editor core demo\n");

    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("inkstave.ron"));
    let config = match EditorConfig::load_or_default(&config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            return;
        }
    };

    let (notification_tx, mut notification_rx) =
        create_notification_channel(NOTIFICATION_RINGBUFFER_CAPACITY);
    let notification_tx = Arc::new(Mutex::new(notification_tx));

    let mut editor = ScoreEditor::with_config(config.clone(), notification_tx);

    // A short phrase on the top staff: an ascending run, a breath,
    // then a C major chord. Click points are chosen so the commit
    // lands each notehead on its line or gap.
    editor.place_note(150, 114, NoteDuration::Quarter); // C4
    editor.place_note(210, 107, NoteDuration::Quarter); // D4
    editor.place_note(270, 99, NoteDuration::Quarter); // E4
    editor.place_note(330, 92, NoteDuration::Quarter); // F4
    editor.place_note(390, 84, NoteDuration::Half); // G4
    editor.place_rest(430, 100, NoteDuration::Quarter);
    editor.place_note(500, 134, NoteDuration::Whole); // C4
    editor.place_note(504, 119, NoteDuration::Whole); // E4
    editor.place_note(508, 104, NoteDuration::Whole); // G4

    let timeline = build_timeline(editor.page().symbols(), config.chord_tolerance_px);
    println!("Timeline ({} events):", timeline.len());
    for event in &timeline {
        println!(
            "  {:>5} ms  {:?} {:?}",
            event.at_ms, event.kind, event.note_names
        );
    }
    println!();

    let started = match MidiSoundPort::connect_default() {
        Ok(mut port) => {
            if let Err(e) = port.set_instrument(config.instrument) {
                eprintln!("Program change failed: {}", e);
            }
            port.set_velocity(config.velocity);
            println!("MIDI output connected");
            editor.play(port)
        }
        Err(e) => {
            println!("No MIDI output ({}), printing notes instead", e);
            editor.play(ConsolePort)
        }
    };

    if let Err(e) = started {
        eprintln!("ERROR: {}", e);
        return;
    }

    while editor.playback_state().is_running() {
        while let Some(notification) = ringbuf::traits::Consumer::try_pop(&mut notification_rx) {
            println!("  [{:?}] {}", notification.category, notification.message);
        }
        thread::sleep(Duration::from_millis(25));
    }
    editor.wait_for_playback();
    while let Some(notification) = ringbuf::traits::Consumer::try_pop(&mut notification_rx) {
        println!("  [{:?}] {}", notification.category, notification.message);
    }

    println!("\n=== Done ===");
}
