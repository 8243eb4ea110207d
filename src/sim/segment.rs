//! Trampoline segment geometry
//!
//! A trampoline is the line between two tracked points. Point order is
//! significant: it fixes the line angle and therefore which side the
//! bounce normal points to (callers supply thumb first, index second).

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A directed line segment from `p1` to `p2`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub p1: Vec2,
    pub p2: Vec2,
}

impl Segment {
    pub fn new(p1: Vec2, p2: Vec2) -> Self {
        Self { p1, p2 }
    }

    /// Direction vector `p2 - p1`
    #[inline]
    pub fn vector(&self) -> Vec2 {
        self.p2 - self.p1
    }

    #[inline]
    pub fn length_squared(&self) -> f32 {
        self.vector().length_squared()
    }

    /// Zero-length segments can't be projected onto
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.length_squared() == 0.0
    }

    /// Angle of the segment direction (radians, atan2 convention)
    pub fn angle(&self) -> f32 {
        let v = self.vector();
        v.y.atan2(v.x)
    }

    /// Projection parameter of `point` onto the infinite line through the segment
    ///
    /// `0` maps to `p1`, `1` maps to `p2`. Returns `None` for a degenerate segment.
    pub fn project(&self, point: Vec2) -> Option<f32> {
        let line_vec = self.vector();
        let len_sq = line_vec.length_squared();
        if len_sq == 0.0 {
            return None;
        }
        Some((point - self.p1).dot(line_vec) / len_sq)
    }

    /// Foot of the perpendicular from `point`, only if it lands on the segment
    ///
    /// Unlike a clamped closest-point query, points beyond either end
    /// report `None` rather than snapping to the endpoint.
    pub fn closest_point(&self, point: Vec2) -> Option<(f32, Vec2)> {
        let t = self.project(point)?;
        if (0.0..=1.0).contains(&t) {
            Some((t, self.p1 + t * self.vector()))
        } else {
            None
        }
    }
}

/// Unit bounce direction for a line at `line_angle`: `(sin a, -cos a)`
///
/// For a left-to-right segment this points toward negative y (up on screen).
#[inline]
pub fn bounce_normal(line_angle: f32) -> Vec2 {
    Vec2::new(line_angle.sin(), -line_angle.cos())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_project_midpoint() {
        let seg = Segment::new(Vec2::new(50.0, 150.0), Vec2::new(150.0, 150.0));
        assert_eq!(seg.project(Vec2::new(100.0, 100.0)), Some(0.5));
    }

    #[test]
    fn test_closest_point_on_segment() {
        let seg = Segment::new(Vec2::new(50.0, 150.0), Vec2::new(150.0, 150.0));
        let (t, closest) = seg.closest_point(Vec2::new(100.0, 100.0)).unwrap();
        assert_eq!(t, 0.5);
        assert_eq!(closest, Vec2::new(100.0, 150.0));
    }

    #[test]
    fn test_closest_point_beyond_ends() {
        let seg = Segment::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0));
        assert!(seg.closest_point(Vec2::new(-1.0, 0.0)).is_none());
        assert!(seg.closest_point(Vec2::new(11.0, 0.0)).is_none());
        // Endpoints themselves are on the segment
        assert!(seg.closest_point(Vec2::new(0.0, 5.0)).is_some());
        assert!(seg.closest_point(Vec2::new(10.0, 5.0)).is_some());
    }

    #[test]
    fn test_degenerate_segment() {
        let p = Vec2::new(30.0, 30.0);
        let seg = Segment::new(p, p);
        assert!(seg.is_degenerate());
        assert!(seg.project(p).is_none());
        assert!(seg.closest_point(p).is_none());
    }

    #[test]
    fn test_angle_depends_on_point_order() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(0.0, 10.0);
        assert!((Segment::new(a, b).angle() - FRAC_PI_2).abs() < 1e-6);
        assert!((Segment::new(b, a).angle() + FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn test_bounce_normal_horizontal_points_up() {
        let n = bounce_normal(0.0);
        assert_eq!(n, Vec2::new(0.0, -1.0));
    }

    #[test]
    fn test_bounce_normal_is_unit_and_perpendicular() {
        for &angle in &[0.3_f32, 1.2, -2.0, 3.0] {
            let n = bounce_normal(angle);
            let dir = Vec2::new(angle.cos(), angle.sin());
            assert!((n.length() - 1.0).abs() < 1e-5);
            assert!(n.dot(dir).abs() < 1e-5);
        }
    }
}
