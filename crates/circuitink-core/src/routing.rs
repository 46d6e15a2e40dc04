//! Wire routing between gates.
//!
//! Routes are recomputed from gate positions every frame and never stored,
//! so moving a gate cannot leave its wires behind.

use crate::gate::Gate;
use kurbo::{BezPath, Point, Rect};
use serde::{Deserialize, Serialize};

/// Width and height of a gate body in canvas units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GateSize {
    pub width: f64,
    pub height: f64,
}

impl GateSize {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl Default for GateSize {
    fn default() -> Self {
        Self::new(100.0, 50.0)
    }
}

/// How a wire route is drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeStyle {
    /// Right-angle connector through the route's midpoints.
    Angular,
    /// Single cubic curve using the midpoints as control points.
    #[default]
    Flowing,
}

/// Route of a wire: start, two midpoints on a shared vertical, end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeRoute {
    pub points: [Point; 4],
}

impl EdgeRoute {
    /// Exit point on the source gate's right edge.
    pub fn start(&self) -> Point {
        self.points[0]
    }

    /// Entry point on the target gate's left edge.
    pub fn end(&self) -> Point {
        self.points[3]
    }

    /// X coordinate of the vertical run.
    pub fn mid_x(&self) -> f64 {
        self.points[1].x
    }

    /// Drawable path for this route.
    pub fn to_path(&self, style: EdgeStyle) -> BezPath {
        let [p0, p1, p2, p3] = self.points;
        let mut path = BezPath::new();
        path.move_to(p0);
        match style {
            EdgeStyle::Angular => {
                path.line_to(p1);
                path.line_to(p2);
                path.line_to(p3);
            }
            EdgeStyle::Flowing => path.curve_to(p1, p2, p3),
        }
        path
    }

    /// Bounding box of the route's points.
    pub fn bounds(&self) -> Rect {
        self.points[1..]
            .iter()
            .fold(Rect::from_points(self.points[0], self.points[0]), |rect, p| {
                rect.union_pt(*p)
            })
    }
}

/// Route a wire from the right-center of `from` to the left-center of `to`.
pub fn route_between(from: &Gate, to: &Gate, size: GateSize) -> EdgeRoute {
    let from_origin = from.position().to_point();
    let to_origin = to.position().to_point();

    let start = Point::new(from_origin.x + size.width, from_origin.y + size.height / 2.0);
    let end = Point::new(to_origin.x, to_origin.y + size.height / 2.0);
    let mid_x = (start.x + end.x) / 2.0;

    EdgeRoute {
        points: [start, Point::new(mid_x, start.y), Point::new(mid_x, end.y), end],
    }
}

/// Route a wire whose endpoints may no longer exist.
///
/// Returns `None` when either gate could not be resolved; such a wire simply
/// has no geometry this frame.
pub fn route_edge(from: Option<&Gate>, to: Option<&Gate>, size: GateSize) -> Option<EdgeRoute> {
    let (Some(from), Some(to)) = (from, to) else {
        return None;
    };
    Some(route_between(from, to, size))
}
