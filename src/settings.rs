//! Game settings
//!
//! Loaded from an optional JSON file; any field left out keeps its default.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::{BallError, BallParams};

/// Error loading or validating settings
#[derive(Debug)]
pub enum SettingsError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Ball(BallError),
    Invalid(String),
}

impl std::fmt::Display for SettingsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "IO error: {e}"),
            Self::Parse(e) => write!(f, "JSON parse error: {e}"),
            Self::Ball(e) => write!(f, "invalid ball parameters: {e}"),
            Self::Invalid(msg) => write!(f, "invalid settings: {msg}"),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
            Self::Ball(e) => Some(e),
            Self::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for SettingsError {
    fn from(err: std::io::Error) -> Self {
        SettingsError::Io(err)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(err: serde_json::Error) -> Self {
        SettingsError::Parse(err)
    }
}

impl From<BallError> for SettingsError {
    fn from(err: BallError) -> Self {
        SettingsError::Ball(err)
    }
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Ball ===
    /// Physics constants for every ball spawned
    pub ball: BallParams,
    /// Ball color (BGR)
    pub color: [u8; 3],
    /// Spawn point in pixels; None = horizontal center, a quarter down
    pub spawn: Option<[f32; 2]>,

    // === Synthetic camera ===
    pub frame_width: u32,
    pub frame_height: u32,
    /// Probability that a frame read fails (0.0 - 1.0)
    pub drop_rate: f32,

    // === Synthetic hand ===
    /// Probability that no hand is visible in a frame (0.0 - 1.0)
    pub hand_dropout: f32,
    /// RNG seed for the synthetic camera and hand
    pub seed: u64,

    // === Run ===
    /// Number of ticks the headless demo runs
    pub ticks: u32,
    /// Log a ball snapshot every N ticks (0 = never)
    pub log_every: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ball: BallParams::default(),
            color: BALL_COLOR,
            spawn: None,

            frame_width: FRAME_WIDTH,
            frame_height: FRAME_HEIGHT,
            drop_rate: 0.0,

            hand_dropout: 0.2,
            seed: 12345,

            ticks: 600,
            log_every: 30,
        }
    }
}

impl Settings {
    /// Parse settings from a JSON string and validate them
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        self.ball.validate()?;
        if self.frame_width == 0 || self.frame_height == 0 {
            return Err(SettingsError::Invalid(format!(
                "frame size must be non-zero, got {}x{}",
                self.frame_width, self.frame_height
            )));
        }
        if !(0.0..=1.0).contains(&self.drop_rate) {
            return Err(SettingsError::Invalid(format!(
                "drop_rate must be in [0, 1], got {}",
                self.drop_rate
            )));
        }
        if !(0.0..=1.0).contains(&self.hand_dropout) {
            return Err(SettingsError::Invalid(format!(
                "hand_dropout must be in [0, 1], got {}",
                self.hand_dropout
            )));
        }
        Ok(())
    }

    /// Where a new ball appears on a `width` x `height` playfield
    pub fn spawn_point(&self, width: f32, height: f32) -> Vec2 {
        match self.spawn {
            Some([x, y]) => Vec2::new(x, y),
            None => Vec2::new(width / 2.0, height / 4.0),
        }
    }
}
