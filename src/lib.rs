//! Trampoline - a falling ball bounced by a hand-tracked line
//!
//! Core modules:
//! - `sim`: Ball physics (gravity, wall bounces, trampoline contact, cooldown)
//! - `tracking`: Camera and hand-detector seams feeding the trampoline segment
//! - `game`: Owning loop that wires a frame source and detector to the ball
//! - `demo`: Seeded synthetic camera/hand for headless runs
//! - `settings`: JSON-loadable configuration

pub mod demo;
pub mod game;
pub mod settings;
pub mod sim;
pub mod tracking;

pub use game::{Command, Game, StepOutcome};
pub use settings::{Settings, SettingsError};

/// Game configuration constants
pub mod consts {
    /// Ball defaults
    pub const BALL_RADIUS: f32 = 20.0;
    /// Ball color in BGR order (cosmetic only)
    pub const BALL_COLOR: [u8; 3] = [255, 0, 0];

    /// Added to vertical velocity every tick (pixels/tick²)
    pub const GRAVITY: f32 = 0.5;
    /// Restitution applied to the reflected component on wall hits
    pub const BOUNCE_FACTOR: f32 = 0.8;
    /// Speed imparted by a trampoline bounce (pixels/tick)
    pub const TRAMPOLINE_BOOST: f32 = 15.0;
    /// Refractory window after a trampoline bounce (seconds)
    pub const COLLISION_COOLDOWN: f64 = 0.5;

    /// Default playfield (typical webcam frame)
    pub const FRAME_WIDTH: u32 = 640;
    pub const FRAME_HEIGHT: u32 = 480;
}
