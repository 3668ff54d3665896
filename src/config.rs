// Editor configuration
// Optional RON file layered over built-in defaults

use crate::gesture::scratch::ScratchConfig;
use crate::midi::output::DEFAULT_VELOCITY;
use crate::playback::timeline::DEFAULT_CHORD_TOLERANCE_PX;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// X distance within which simultaneous notes form a chord
    pub chord_tolerance_px: i32,
    /// Horizontal pointer travel needed to break a snap lock
    pub unsnap_dx_px: i32,
    /// MIDI velocity for played notes
    pub velocity: u8,
    /// General MIDI program selected at startup
    pub instrument: u8,
    pub scratch: ScratchConfig,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            chord_tolerance_px: DEFAULT_CHORD_TOLERANCE_PX,
            unsnap_dx_px: 12,
            velocity: DEFAULT_VELOCITY,
            instrument: 0,
            scratch: ScratchConfig::default(),
        }
    }
}

impl EditorConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Ok(ron::from_str(&text)?)
    }

    /// A missing file falls back to defaults; a malformed file is still
    /// an error so typos do not silently vanish
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load(path)
    }
}
