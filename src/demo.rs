//! Synthetic camera and hand for headless runs
//!
//! Both are seeded (Pcg32) so a run is reproducible from `Settings::seed`.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::tracking::{FrameError, FrameSource, HandDetector, HandLandmarks};

/// Clamp to a valid `random_bool` probability (NaN counts as never)
fn probability(p: f32) -> f64 {
    if p.is_nan() { 0.0 } else { f64::from(p.clamp(0.0, 1.0)) }
}

/// A frame with no pixels, only its sequence number
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameStamp {
    pub index: u64,
}

/// Camera that yields numbered empty frames, occasionally failing a read
pub struct SyntheticCamera {
    width: u32,
    height: u32,
    drop_rate: f64,
    next_index: u64,
    rng: Pcg32,
}

impl SyntheticCamera {
    pub fn new(width: u32, height: u32, drop_rate: f32, seed: u64) -> Self {
        Self {
            width,
            height,
            drop_rate: probability(drop_rate),
            next_index: 0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }
}

impl FrameSource for SyntheticCamera {
    type Frame = FrameStamp;

    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn next_frame(&mut self) -> Result<FrameStamp, FrameError> {
        let index = self.next_index;
        self.next_index += 1;

        if self.rng.random_bool(self.drop_rate) {
            return Err(FrameError::ReadFailed(format!("synthetic drop at frame {index}")));
        }
        Ok(FrameStamp { index })
    }
}

/// Hand held flat near the bottom of the frame, swaying side to side
///
/// Thumb is on the left and index on the right so the trampoline bounces
/// the ball upward. Each frame adds a little tilt jitter, and with
/// probability `dropout` the hand is not seen at all.
pub struct SweepingHand {
    /// Normalized height of the hand
    pub height: f32,
    /// Normalized half-width between thumb and index
    pub half_span: f32,
    /// Normalized sway amplitude around the center
    pub sway: f32,
    /// Sway angular speed (radians per frame)
    pub sway_speed: f32,
    /// Maximum tilt jitter (normalized units)
    pub jitter: f32,
    dropout: f64,
    rng: Pcg32,
}

impl SweepingHand {
    pub fn new(dropout: f32, seed: u64) -> Self {
        Self {
            height: 0.8,
            half_span: 0.15,
            sway: 0.1,
            sway_speed: 0.02,
            jitter: 0.02,
            dropout: probability(dropout),
            // Offset the stream so camera and hand don't share draws
            rng: Pcg32::seed_from_u64(seed.wrapping_add(1)),
        }
    }
}

impl HandDetector<FrameStamp> for SweepingHand {
    fn detect(&mut self, frame: &FrameStamp) -> Option<HandLandmarks> {
        if self.rng.random_bool(self.dropout) {
            return None;
        }

        let center_x = 0.5 + self.sway * (frame.index as f32 * self.sway_speed).sin();
        let tilt = if self.jitter > 0.0 {
            self.rng.random_range(-self.jitter..=self.jitter)
        } else {
            0.0
        };

        let thumb = Vec2::new(center_x - self.half_span, self.height + tilt);
        let index = Vec2::new(center_x + self.half_span, self.height - tilt);
        Some(HandLandmarks::from_tips(thumb, index))
    }
}
