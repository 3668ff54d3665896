// Playback run state shared across threads

use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Idle = 0,
    Running = 1,
    Finished = 2,
    Cancelled = 3,
}

impl From<u8> for PlaybackState {
    fn from(value: u8) -> Self {
        match value {
            0 => PlaybackState::Idle,
            1 => PlaybackState::Running,
            2 => PlaybackState::Finished,
            3 => PlaybackState::Cancelled,
            _ => PlaybackState::Idle,
        }
    }
}

impl PlaybackState {
    pub fn is_running(&self) -> bool {
        *self == PlaybackState::Running
    }

    /// Finished and Cancelled are terminal; the handle can be replaced
    pub fn is_terminal(&self) -> bool {
        matches!(self, PlaybackState::Finished | PlaybackState::Cancelled)
    }
}

/// Atomic wrapper for sharing the state between threads
#[derive(Debug, Clone)]
pub struct SharedPlaybackState {
    inner: Arc<AtomicU8>,
}

impl SharedPlaybackState {
    pub fn new(state: PlaybackState) -> Self {
        Self {
            inner: Arc::new(AtomicU8::new(state as u8)),
        }
    }

    pub fn get(&self) -> PlaybackState {
        PlaybackState::from(self.inner.load(Ordering::Relaxed))
    }

    pub fn set(&self, state: PlaybackState) {
        self.inner.store(state as u8, Ordering::Relaxed);
    }
}

impl Default for SharedPlaybackState {
    fn default() -> Self {
        Self::new(PlaybackState::Idle)
    }
}
