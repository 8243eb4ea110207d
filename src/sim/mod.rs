//! Ball simulation module
//!
//! All physics lives here. This module must stay free of I/O:
//! - Fixed logical tick (no hidden delta-time)
//! - Time only through an injected `Clock`
//! - No camera, detector or rendering dependencies

pub mod ball;
pub mod clock;
pub mod collision;
pub mod segment;
pub mod tick;

pub use ball::{Ball, BallError, BallParams, BallSnapshot};
pub use clock::{Clock, ManualClock, SystemClock};
pub use collision::{BoundaryHits, SegmentContact, ball_segment_contact, boundary_hits};
pub use segment::{Segment, bounce_normal};
pub use tick::{Playfield, TickInput, TickReport, tick};
