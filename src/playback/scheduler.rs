// Playback scheduler
// Walks a timeline on a worker thread with polled cancellation

use crate::playback::event::{PlayEvent, PlayEventKind};
use crate::playback::port::SoundPort;
use crate::playback::state::{PlaybackState, SharedPlaybackState};
use std::collections::HashSet;
use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Upper bound on one sleep slice, so a cancel request is observed
/// within this many milliseconds
const POLL_INTERVAL_MS: u64 = 10;

/// Caller-side handle to a running playback worker
pub struct PlaybackHandle {
    cancel: Arc<AtomicBool>,
    state: SharedPlaybackState,
    worker: Option<JoinHandle<()>>,
}

impl PlaybackHandle {
    /// Asks the worker to stop; it reacts within one poll interval
    pub fn request_cancel(&self) {
        self.cancel.store(true, Ordering::Relaxed);
    }

    pub fn state(&self) -> PlaybackState {
        self.state.get()
    }

    pub fn is_running(&self) -> bool {
        self.state.get().is_running()
    }

    /// Blocks until the worker exits. Safe to call more than once.
    pub fn join(&mut self) {
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

/// Starts a worker thread that plays `timeline` through `port`.
/// `on_finish` runs exactly once, on the worker, however playback ends.
pub fn spawn<P, F>(timeline: Vec<PlayEvent>, port: P, on_finish: F) -> io::Result<PlaybackHandle>
where
    P: SoundPort + 'static,
    F: FnOnce() + Send + 'static,
{
    let cancel = Arc::new(AtomicBool::new(false));
    let state = SharedPlaybackState::new(PlaybackState::Running);

    let worker_cancel = Arc::clone(&cancel);
    let worker_state = state.clone();
    let worker = thread::Builder::new()
        .name("playback".to_string())
        .spawn(move || run(timeline, port, worker_cancel, worker_state, on_finish))?;

    Ok(PlaybackHandle {
        cancel,
        state,
        worker: Some(worker),
    })
}

/// Runs on whatever path the worker exits, including a panic in the
/// port: releases every sounding note, publishes the exit state, then
/// fires the completion callback.
struct Cleanup<P: SoundPort> {
    port: P,
    sounding: HashSet<String>,
    state: SharedPlaybackState,
    exit_state: PlaybackState,
    on_finish: Option<Box<dyn FnOnce() + Send>>,
}

impl<P: SoundPort> Drop for Cleanup<P> {
    fn drop(&mut self) {
        let sounding = std::mem::take(&mut self.sounding);
        for name in sounding {
            if let Err(err) = self.port.stop_note(&name) {
                eprintln!("Failed to release {name}: {err}");
            }
        }
        self.state.set(self.exit_state);
        if let Some(callback) = self.on_finish.take() {
            callback();
        }
    }
}

fn run<P, F>(
    timeline: Vec<PlayEvent>,
    port: P,
    cancel: Arc<AtomicBool>,
    state: SharedPlaybackState,
    on_finish: F,
) where
    P: SoundPort,
    F: FnOnce() + Send + 'static,
{
    let started = Instant::now();
    let mut guard = Cleanup {
        port,
        sounding: HashSet::new(),
        state,
        exit_state: PlaybackState::Cancelled,
        on_finish: Some(Box::new(on_finish)),
    };

    let mut index = 0;
    while index < timeline.len() {
        if cancel.load(Ordering::Relaxed) {
            return;
        }

        let event = &timeline[index];
        let elapsed = started.elapsed().as_millis() as u64;
        if elapsed < event.at_ms {
            let wait = (event.at_ms - elapsed).min(POLL_INTERVAL_MS);
            thread::sleep(Duration::from_millis(wait));
            continue;
        }

        match event.kind {
            PlayEventKind::Start => {
                for name in &event.note_names {
                    match guard.port.start_note(name) {
                        Ok(()) => {
                            guard.sounding.insert(name.clone());
                        }
                        Err(err) => eprintln!("Failed to start {name}: {err}"),
                    }
                }
            }
            PlayEventKind::Stop => {
                // The note leaves the sounding set even if the port
                // rejects the command
                for name in &event.note_names {
                    if let Err(err) = guard.port.stop_note(name) {
                        eprintln!("Failed to stop {name}: {err}");
                    }
                    guard.sounding.remove(name);
                }
            }
        }
        index += 1;
    }

    guard.exit_state = PlaybackState::Finished;
}
