// Sound port abstraction
// Playback is generic over where note commands go

use std::sync::{Arc, Mutex};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PortError {
    #[error("Sound port unavailable: {0}")]
    Unavailable(String),
    #[error("Failed to send note command: {0}")]
    SendFailed(String),
}

pub type PortResult<T> = Result<T, PortError>;

/// Sink for note on/off commands. Implementations run on the playback
/// thread, so they must be `Send`.
pub trait SoundPort: Send {
    fn start_note(&mut self, name: &str) -> PortResult<()>;
    fn stop_note(&mut self, name: &str) -> PortResult<()>;
}

/// Shared-port wrapper so a caller can keep a handle to the same port
/// the playback thread drives
impl<P: SoundPort> SoundPort for Arc<Mutex<P>> {
    fn start_note(&mut self, name: &str) -> PortResult<()> {
        self.lock()
            .map_err(|_| PortError::Unavailable("port lock poisoned".to_string()))?
            .start_note(name)
    }

    fn stop_note(&mut self, name: &str) -> PortResult<()> {
        self.lock()
            .map_err(|_| PortError::Unavailable("port lock poisoned".to_string()))?
            .stop_note(name)
    }
}

/// Fallback port that prints note commands to the console
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsolePort;

impl SoundPort for ConsolePort {
    fn start_note(&mut self, name: &str) -> PortResult<()> {
        println!("note on  {name}");
        Ok(())
    }

    fn stop_note(&mut self, name: &str) -> PortResult<()> {
        println!("note off {name}");
        Ok(())
    }
}
