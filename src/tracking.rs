//! Camera and hand-detector seams
//!
//! Video capture and landmark detection live outside this crate. These
//! traits describe what the game loop needs from them, and
//! `trampoline_from_landmarks` turns one detected hand into the segment the
//! ball collides with.

use glam::Vec2;

use crate::sim::Segment;

/// Hand landmark indices (21-point hand model)
pub const THUMB_TIP: usize = 4;
pub const INDEX_TIP: usize = 8;
pub const LANDMARK_COUNT: usize = 21;

/// Failure to produce a frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameError {
    /// Device could not be opened or was released
    Unavailable(String),
    /// Device is open but a read failed
    ReadFailed(String),
}

impl std::fmt::Display for FrameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable(msg) => write!(f, "camera unavailable: {msg}"),
            Self::ReadFailed(msg) => write!(f, "failed to capture frame: {msg}"),
        }
    }
}

impl std::error::Error for FrameError {}

/// A stream of video frames with fixed dimensions
pub trait FrameSource {
    type Frame;

    /// Frame (width, height) in pixels
    fn dimensions(&self) -> (u32, u32);

    fn next_frame(&mut self) -> Result<Self::Frame, FrameError>;
}

/// Landmarks of a single hand, normalized to [0, 1] frame coordinates
///
/// Missing landmarks are `None`; a detector may report a partial hand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandLandmarks {
    pub points: [Option<Vec2>; LANDMARK_COUNT],
}

impl Default for HandLandmarks {
    fn default() -> Self {
        Self {
            points: [None; LANDMARK_COUNT],
        }
    }
}

impl HandLandmarks {
    /// Hand with only thumb and index tips known
    pub fn from_tips(thumb: Vec2, index: Vec2) -> Self {
        let mut hand = Self::default();
        hand.points[THUMB_TIP] = Some(thumb);
        hand.points[INDEX_TIP] = Some(index);
        hand
    }

    #[inline]
    pub fn get(&self, landmark: usize) -> Option<Vec2> {
        self.points.get(landmark).copied().flatten()
    }
}

/// Finds the first hand in a frame
pub trait HandDetector<F> {
    fn detect(&mut self, frame: &F) -> Option<HandLandmarks>;
}

/// Map a hand to the thumb-to-index trampoline in pixel coordinates
///
/// Coordinates are truncated to whole pixels. Returns None unless both
/// fingertips are present.
pub fn trampoline_from_landmarks(hand: &HandLandmarks, width: u32, height: u32) -> Option<Segment> {
    let size = Vec2::new(width as f32, height as f32);
    let to_pixels = |p: Vec2| (p * size).trunc();

    let thumb = hand.get(THUMB_TIP)?;
    let index = hand.get(INDEX_TIP)?;
    Some(Segment::new(to_pixels(thumb), to_pixels(index)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trampoline_scales_and_truncates() {
        let hand = HandLandmarks::from_tips(Vec2::new(0.25, 0.5), Vec2::new(0.7501, 0.5019));
        let seg = trampoline_from_landmarks(&hand, 640, 480).unwrap();
        assert_eq!(seg.p1, Vec2::new(160.0, 240.0));
        assert_eq!(seg.p2, Vec2::new(480.0, 240.0));
    }

    #[test]
    fn test_trampoline_is_thumb_first() {
        let hand = HandLandmarks::from_tips(Vec2::new(0.905, 0.5), Vec2::new(0.105, 0.5));
        let seg = trampoline_from_landmarks(&hand, 100, 100).unwrap();
        assert_eq!(seg.p1, Vec2::new(90.0, 50.0));
        assert_eq!(seg.p2, Vec2::new(10.0, 50.0));
    }

    #[test]
    fn test_trampoline_requires_both_tips() {
        let mut hand = HandLandmarks::default();
        hand.points[THUMB_TIP] = Some(Vec2::new(0.5, 0.5));
        assert!(trampoline_from_landmarks(&hand, 640, 480).is_none());

        hand.points[THUMB_TIP] = None;
        hand.points[INDEX_TIP] = Some(Vec2::new(0.5, 0.5));
        assert!(trampoline_from_landmarks(&hand, 640, 480).is_none());
    }

    #[test]
    fn test_landmark_out_of_range_is_none() {
        let hand = HandLandmarks::default();
        assert!(hand.get(LANDMARK_COUNT + 3).is_none());
    }
}
