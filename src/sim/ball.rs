//! The ball: kinematic state plus wall and trampoline responses
//!
//! Call order per tick is owned by the caller (see `tick`): trampoline check,
//! then `advance`, then `check_boundary`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::clock::{Clock, SystemClock};
use super::collision::{ball_segment_contact, boundary_hits};
use super::segment::{Segment, bounce_normal};
use crate::consts::*;

/// Invalid ball construction parameters
#[derive(Debug, Clone, PartialEq)]
pub enum BallError {
    NonFinite(&'static str),
    NonPositiveRadius(f32),
    NonPositiveCooldown(f64),
    NonPositiveGravity(f32),
    BounceFactorOutOfRange(f32),
    NonPositiveBoost(f32),
}

impl std::fmt::Display for BallError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonFinite(field) => write!(f, "{field} must be finite"),
            Self::NonPositiveRadius(r) => write!(f, "radius must be positive, got {r}"),
            Self::NonPositiveCooldown(c) => {
                write!(f, "collision cooldown must be positive, got {c}")
            }
            Self::NonPositiveGravity(g) => write!(f, "gravity must be positive, got {g}"),
            Self::BounceFactorOutOfRange(b) => {
                write!(f, "bounce factor must be in (0, 1), got {b}")
            }
            Self::NonPositiveBoost(b) => write!(f, "trampoline boost must be positive, got {b}"),
        }
    }
}

impl std::error::Error for BallError {}

/// Physics constants, fixed for a ball's lifetime
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BallParams {
    pub radius: f32,
    /// Added to vertical velocity every tick
    pub gravity: f32,
    /// Restitution on wall hits, strictly between 0 and 1
    pub bounce_factor: f32,
    /// Speed set by a trampoline bounce
    pub trampoline_boost: f32,
    /// Seconds after a trampoline bounce during which another is ignored
    pub collision_cooldown: f64,
}

impl Default for BallParams {
    fn default() -> Self {
        Self {
            radius: BALL_RADIUS,
            gravity: GRAVITY,
            bounce_factor: BOUNCE_FACTOR,
            trampoline_boost: TRAMPOLINE_BOOST,
            collision_cooldown: COLLISION_COOLDOWN,
        }
    }
}

impl BallParams {
    pub fn validate(&self) -> Result<(), BallError> {
        if !self.radius.is_finite() {
            return Err(BallError::NonFinite("radius"));
        }
        if !self.gravity.is_finite() {
            return Err(BallError::NonFinite("gravity"));
        }
        if !self.bounce_factor.is_finite() {
            return Err(BallError::NonFinite("bounce_factor"));
        }
        if !self.trampoline_boost.is_finite() {
            return Err(BallError::NonFinite("trampoline_boost"));
        }
        if !self.collision_cooldown.is_finite() {
            return Err(BallError::NonFinite("collision_cooldown"));
        }
        if self.radius <= 0.0 {
            return Err(BallError::NonPositiveRadius(self.radius));
        }
        if self.collision_cooldown <= 0.0 {
            return Err(BallError::NonPositiveCooldown(self.collision_cooldown));
        }
        if self.gravity <= 0.0 {
            return Err(BallError::NonPositiveGravity(self.gravity));
        }
        if self.bounce_factor <= 0.0 || self.bounce_factor >= 1.0 {
            return Err(BallError::BounceFactorOutOfRange(self.bounce_factor));
        }
        if self.trampoline_boost <= 0.0 {
            return Err(BallError::NonPositiveBoost(self.trampoline_boost));
        }
        Ok(())
    }
}

/// Read-only view of a ball for rendering and HUD
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallSnapshot {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub color: [u8; 3],
    pub in_cooldown: bool,
}

/// The ball entity
///
/// There is no reset: restarting means building a new `Ball`.
#[derive(Debug)]
pub struct Ball<C: Clock = SystemClock> {
    pub pos: Vec2,
    pub vel: Vec2,
    color: [u8; 3],
    params: BallParams,
    /// Clock reading of the last trampoline bounce (None before the first)
    last_bounce: Option<f64>,
    clock: C,
}

impl<C: Clock> Ball<C> {
    /// Ball at rest at `center` with default parameters
    pub fn new(center: Vec2, clock: C) -> Self {
        Self {
            pos: center,
            vel: Vec2::ZERO,
            color: BALL_COLOR,
            params: BallParams::default(),
            last_bounce: None,
            clock,
        }
    }

    /// Ball at rest at `center` with custom parameters
    pub fn with_params(
        center: Vec2,
        color: [u8; 3],
        params: BallParams,
        clock: C,
    ) -> Result<Self, BallError> {
        if !center.is_finite() {
            return Err(BallError::NonFinite("center"));
        }
        params.validate()?;
        Ok(Self {
            pos: center,
            vel: Vec2::ZERO,
            color,
            params,
            last_bounce: None,
            clock,
        })
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.params.radius
    }

    #[inline]
    pub fn color(&self) -> [u8; 3] {
        self.color
    }

    #[inline]
    pub fn params(&self) -> &BallParams {
        &self.params
    }

    /// Clock reading of the most recent trampoline bounce
    #[inline]
    pub fn last_bounce_time(&self) -> Option<f64> {
        self.last_bounce
    }

    /// Apply gravity and move by one tick
    pub fn advance(&mut self) {
        self.advance_by(1.0);
    }

    /// Apply gravity and move by `ticks` logical ticks
    ///
    /// For variable frame rates; `advance_by(1.0)` is exactly `advance()`.
    pub fn advance_by(&mut self, ticks: f32) {
        self.vel.y += self.params.gravity * ticks;
        self.pos += self.vel * ticks;
    }

    /// Reflect off the edges of a `width` x `height` playfield
    ///
    /// Side walls clamp x into `[radius, width - radius]`. The top and bottom
    /// set y exactly to the edge, top taking priority.
    pub fn check_boundary(&mut self, width: f32, height: f32) {
        let r = self.params.radius;
        let bf = self.params.bounce_factor;
        let hits = boundary_hits(self.pos, r, width, height);

        if hits.horizontal() {
            self.vel.x *= -bf;
            // A field narrower than the ball pins it to the right edge
            self.pos.x = self.pos.x.max(r).min(width - r);
            log::trace!("Wall hit (left={}, right={}) at x={}", hits.left, hits.right, self.pos.x);
        }

        if hits.top {
            self.vel.y *= -bf;
            self.pos.y = r;
            log::trace!("Ceiling hit");
        } else if hits.bottom {
            self.vel.y *= -bf;
            self.pos.y = height - r;
            log::trace!("Floor hit");
        }
    }

    /// Bounce off the trampoline `p1 -> p2` if the ball touches it
    ///
    /// Returns true only when a bounce was actually applied (contact outside
    /// the cooldown window). Zero-length segments never collide.
    pub fn check_trampoline_collision(&mut self, p1: Vec2, p2: Vec2) -> bool {
        self.check_segment(&Segment::new(p1, p2))
    }

    /// Same as `check_trampoline_collision` for an existing `Segment`
    pub fn check_segment(&mut self, segment: &Segment) -> bool {
        match ball_segment_contact(self.pos, self.params.radius, segment) {
            Some(contact) => self.bounce_trampoline(contact.line_angle),
            None => false,
        }
    }

    /// Launch the ball perpendicular to a line at `line_angle`
    ///
    /// Replaces velocity with `boost * (sin a, -cos a)`. Ignored (returns
    /// false) while the previous bounce is still cooling down.
    pub fn bounce_trampoline(&mut self, line_angle: f32) -> bool {
        let now = self.clock.now();
        if self.cooling_down_at(now) {
            log::trace!("Trampoline contact ignored (cooldown)");
            return false;
        }

        self.vel = bounce_normal(line_angle) * self.params.trampoline_boost;
        self.last_bounce = Some(now);
        log::debug!(
            "Trampoline bounce at t={now:.3}: angle={line_angle:.3}, vel=({:.2}, {:.2})",
            self.vel.x,
            self.vel.y
        );
        true
    }

    /// True while a trampoline bounce would be ignored
    pub fn get_collision_cooldown_status(&self) -> bool {
        self.cooling_down_at(self.clock.now())
    }

    #[inline]
    pub fn in_cooldown(&self) -> bool {
        self.get_collision_cooldown_status()
    }

    // Shared by the bounce gate and the status query; the boundary instant counts as cooling down
    fn cooling_down_at(&self, now: f64) -> bool {
        match self.last_bounce {
            Some(last) => now - last <= self.params.collision_cooldown,
            None => false,
        }
    }

    pub fn snapshot(&self) -> BallSnapshot {
        BallSnapshot {
            pos: self.pos,
            vel: self.vel,
            radius: self.params.radius,
            color: self.color,
            in_cooldown: self.in_cooldown(),
        }
    }
}
