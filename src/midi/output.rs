// MIDI output port
// Sends note commands to a hardware or software synth through midir

use crate::midi::notes::note_number;
use crate::playback::port::{PortError, PortResult, SoundPort};
use midir::{MidiOutput, MidiOutputConnection};
use thiserror::Error;

const CLIENT_NAME: &str = "Inkstave MIDI Output";

const NOTE_ON: u8 = 0x90;
const NOTE_OFF: u8 = 0x80;
const PROGRAM_CHANGE: u8 = 0xC0;

pub const DEFAULT_VELOCITY: u8 = 120;

#[derive(Debug, Error)]
pub enum MidiError {
    #[error("Failed to initialize MIDI: {0}")]
    Init(#[from] midir::InitError),
    #[error("No MIDI output ports available")]
    NoPorts,
    #[error("MIDI output port {0} not found")]
    PortNotFound(usize),
    #[error("Failed to connect to MIDI port: {0}")]
    Connect(String),
    #[error("Failed to send MIDI message: {0}")]
    Send(#[from] midir::SendError),
}

pub type MidiResult<T> = Result<T, MidiError>;

/// Playback port backed by a MIDI output connection, channel 1
pub struct MidiSoundPort {
    conn: MidiOutputConnection,
    velocity: u8,
}

impl MidiSoundPort {
    /// Names of the currently available output ports, in port order
    pub fn ports() -> MidiResult<Vec<String>> {
        let midi_out = MidiOutput::new(CLIENT_NAME)?;
        Ok(midi_out
            .ports()
            .iter()
            .filter_map(|p| midi_out.port_name(p).ok())
            .collect())
    }

    /// Connects to the output port at `index`
    pub fn connect(index: usize) -> MidiResult<Self> {
        let midi_out = MidiOutput::new(CLIENT_NAME)?;
        let ports = midi_out.ports();
        if ports.is_empty() {
            return Err(MidiError::NoPorts);
        }
        let port = ports.get(index).ok_or(MidiError::PortNotFound(index))?;
        let conn = midi_out
            .connect(port, "inkstave-playback")
            .map_err(|e| MidiError::Connect(e.to_string()))?;

        Ok(Self {
            conn,
            velocity: DEFAULT_VELOCITY,
        })
    }

    /// Connects to the first available output port
    pub fn connect_default() -> MidiResult<Self> {
        Self::connect(0)
    }

    /// Selects the General MIDI program used for playback
    pub fn set_instrument(&mut self, program: u8) -> MidiResult<()> {
        self.conn.send(&[PROGRAM_CHANGE, program & 0x7F])?;
        Ok(())
    }

    pub fn set_velocity(&mut self, velocity: u8) {
        self.velocity = velocity.min(127);
    }
}

impl SoundPort for MidiSoundPort {
    fn start_note(&mut self, name: &str) -> PortResult<()> {
        // Spellings outside the playable range are skipped, not errors
        let Some(number) = note_number(name) else {
            return Ok(());
        };
        self.conn
            .send(&[NOTE_ON, number, self.velocity])
            .map_err(|e| PortError::SendFailed(e.to_string()))
    }

    fn stop_note(&mut self, name: &str) -> PortResult<()> {
        let Some(number) = note_number(name) else {
            return Ok(());
        };
        self.conn
            .send(&[NOTE_OFF, number, 0])
            .map_err(|e| PortError::SendFailed(e.to_string()))
    }
}
