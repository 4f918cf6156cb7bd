//! Waypoints and the pure geometry behind the travelled-path display.

use serde::{Deserialize, Serialize};

/// Margin added to each axis so segments anchor at marker centers rather
/// than marker corners.
pub const PATH_MARGIN: f64 = 10.0;

/// A 2D coordinate on the map field. The y axis grows downward, matching
/// the fixed field the waypoints were plotted on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub x: f64,
    pub y: f64,
}

impl Waypoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another waypoint.
    pub fn distance(&self, other: &Waypoint) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

/// One rendered segment between two consecutive waypoints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathSegment {
    /// Anchor point: the first waypoint offset by [`PATH_MARGIN`].
    pub x: f64,
    pub y: f64,
    /// End point: the second waypoint offset by [`PATH_MARGIN`].
    pub end_x: f64,
    pub end_y: f64,
    /// Segment length.
    pub length: f64,
    /// Rotation from the positive x axis, in degrees.
    pub angle_deg: f64,
}

/// Compute the segments connecting consecutive waypoints, in order.
///
/// Fewer than two waypoints produce no segments.
pub fn segments(points: &[Waypoint]) -> Vec<PathSegment> {
    points
        .windows(2)
        .map(|pair| {
            let x = pair[0].x + PATH_MARGIN;
            let y = pair[0].y + PATH_MARGIN;
            let end_x = pair[1].x + PATH_MARGIN;
            let end_y = pair[1].y + PATH_MARGIN;
            let dx = end_x - x;
            let dy = end_y - y;
            PathSegment {
                x,
                y,
                end_x,
                end_y,
                length: dx.hypot(dy),
                angle_deg: dy.atan2(dx).to_degrees(),
            }
        })
        .collect()
}
