//! Fixed logical tick
//!
//! One call advances the ball by one frame in the canonical order:
//! trampoline check, motion, walls.

use serde::{Deserialize, Serialize};

use super::ball::Ball;
use super::clock::Clock;
use super::segment::Segment;

/// Playfield dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
}

impl Playfield {
    /// Returns None unless both dimensions are positive and finite
    pub fn new(width: f32, height: f32) -> Option<Self> {
        let valid = |v: f32| v.is_finite() && v > 0.0;
        if valid(width) && valid(height) {
            Some(Self { width, height })
        } else {
            None
        }
    }
}

/// Input for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickInput {
    /// Thumb-to-index segment, absent when no hand is tracked
    pub trampoline: Option<Segment>,
}

/// What happened during a tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickReport {
    /// A trampoline bounce was applied this tick
    pub bounced: bool,
    /// Ball is inside the trampoline cooldown window after the tick
    pub in_cooldown: bool,
}

/// Advance the ball by one tick
pub fn tick<C: Clock>(ball: &mut Ball<C>, input: &TickInput, field: Playfield) -> TickReport {
    let bounced = match &input.trampoline {
        Some(segment) => ball.check_segment(segment),
        None => false,
    };

    ball.advance();
    ball.check_boundary(field.width, field.height);

    TickReport {
        bounced,
        in_cooldown: ball.get_collision_cooldown_status(),
    }
}
