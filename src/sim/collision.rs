//! Collision queries for the ball
//!
//! Pure functions: they report what the ball touches and leave the response
//! (reflection, trampoline boost) to `Ball`.

use glam::Vec2;

use super::segment::Segment;

/// Result of a ball/trampoline contact check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentContact {
    /// Projection parameter of the ball center along the segment (in [0, 1])
    pub t: f32,
    /// Closest point on the segment to the ball center
    pub closest: Vec2,
    /// Distance from ball center to `closest`
    pub distance: f32,
    /// Angle of the segment direction, used to pick the bounce normal
    pub line_angle: f32,
}

/// Check whether a ball touches a trampoline segment
///
/// Contact requires the perpendicular foot to land on the segment itself
/// (not its extension) and the center to be within `radius` of it.
/// A zero-length segment never touches anything.
pub fn ball_segment_contact(center: Vec2, radius: f32, segment: &Segment) -> Option<SegmentContact> {
    let (t, closest) = segment.closest_point(center)?;
    let distance = (center - closest).length();

    if distance <= radius {
        Some(SegmentContact {
            t,
            closest,
            distance,
            line_angle: segment.angle(),
        })
    } else {
        None
    }
}

/// Which playfield edges a ball overlaps
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoundaryHits {
    pub left: bool,
    pub right: bool,
    pub top: bool,
    pub bottom: bool,
}

impl BoundaryHits {
    /// Touching either side wall
    #[inline]
    pub fn horizontal(&self) -> bool {
        self.left || self.right
    }

    #[inline]
    pub fn any(&self) -> bool {
        self.left || self.right || self.top || self.bottom
    }
}

/// Check the ball against the four edges of a `width` x `height` playfield
///
/// Top and bottom are exclusive: bottom only registers if top did not.
pub fn boundary_hits(pos: Vec2, radius: f32, width: f32, height: f32) -> BoundaryHits {
    let top = pos.y - radius <= 0.0;
    BoundaryHits {
        left: pos.x - radius <= 0.0,
        right: pos.x + radius >= width,
        top,
        bottom: !top && pos.y + radius >= height,
    }
}
