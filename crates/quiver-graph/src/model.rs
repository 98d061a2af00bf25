//! Nodes, arrows and the geometry the engine writes back onto arrows.

use crate::geom::{Point, Rect, Size, Vector, point, rect_from_center, size, vector};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Creation-order identity of a node.
///
/// Issued by a monotonically increasing counter owned by [`Scene`](crate::Scene); never reused
/// within one scene, so `Ord` is creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u64);

/// Creation-order identity of an arrow. Parallel arrows are ordered by this id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ArrowId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

impl fmt::Display for ArrowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a{}", self.0)
    }
}

pub const DEFAULT_NODE_SIZE: f64 = 80.0;
pub const DEFAULT_CORNER_RADIUS: f64 = 10.0;

/// A box on the canvas. The engine only reads nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub center: Point,
    pub width: f64,
    pub height: f64,
    pub corner_radius: f64,
}

impl Node {
    pub fn new(id: NodeId, center: Point, size: Size) -> Self {
        Self {
            id,
            center,
            width: size.width,
            height: size.height,
            corner_radius: DEFAULT_CORNER_RADIUS,
        }
    }

    pub fn with_corner_radius(mut self, corner_radius: f64) -> Self {
        self.corner_radius = corner_radius;
        self
    }

    pub fn size(&self) -> Size {
        size(self.width, self.height)
    }

    pub fn bounds(&self) -> Rect {
        rect_from_center(self.center, self.size())
    }

    pub fn max_dimension(&self) -> f64 {
        self.width.max(self.height)
    }
}

/// Side of a node a self-loop is drawn on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoopSide {
    Top,
    Bottom,
    Left,
    Right,
}

impl LoopSide {
    /// Tie-break preference order.
    pub const ALL: [LoopSide; 4] = [
        LoopSide::Top,
        LoopSide::Bottom,
        LoopSide::Left,
        LoopSide::Right,
    ];

    /// Unit vector pointing away from the node on this side (screen coordinates, y down).
    pub fn outward(self) -> Vector {
        match self {
            LoopSide::Top => vector(0.0, -1.0),
            LoopSide::Bottom => vector(0.0, 1.0),
            LoopSide::Left => vector(-1.0, 0.0),
            LoopSide::Right => vector(1.0, 0.0),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LoopSide::Top => "top",
            LoopSide::Bottom => "bottom",
            LoopSide::Left => "left",
            LoopSide::Right => "right",
        }
    }
}

impl fmt::Display for LoopSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cubic Bézier routing for an arrow that shares its corridor with others.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Curve {
    /// Signed distance of the control points from the straight start→end line.
    pub offset: f64,
    /// Perpendicular fixed at assignment time; `None` means "rotate start→end by 90°".
    pub direction: Option<Vector>,
    pub control_point_1: Point,
    pub control_point_2: Point,
}

/// Arc routing for an arrow whose source and target are the same node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Loop {
    pub side: LoopSide,
    pub center: Point,
    pub radius: f64,
}

impl Loop {
    /// The arc is drawn from this angle (degrees, y down) ...
    pub const ARC_START_DEG: f64 = 20.0;
    /// ... sweeping this far, leaving a gap where it meets the node.
    pub const ARC_SPAN_DEG: f64 = 320.0;

    /// Where the arrowhead sits on the loop circle.
    pub fn arrow_tip(&self) -> Point {
        let a = Self::ARC_START_DEG.to_radians();
        point(
            self.center.x + self.radius * a.cos(),
            self.center.y + self.radius * a.sin(),
        )
    }

    /// Arrowhead direction at [`Loop::arrow_tip`], tangent to the circle.
    pub fn tip_angle(&self) -> f64 {
        Self::ARC_START_DEG.to_radians() + std::f64::consts::FRAC_PI_2
    }
}

/// Active rendering mode. Exactly one applies at a time.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Route {
    #[default]
    Straight,
    Curved(Curve),
    SelfLoop(Loop),
}

/// Engine-owned output for one arrow. Rewritten wholesale on every recompute.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArrowGeometry {
    pub start_point: Point,
    pub end_point: Point,
    pub route: Route,
    /// `(source, target)` the anchors were computed for; `None` until the first recompute.
    #[serde(default)]
    pub anchored_to: Option<(NodeId, NodeId)>,
}

impl Default for ArrowGeometry {
    fn default() -> Self {
        Self {
            start_point: Point::origin(),
            end_point: Point::origin(),
            route: Route::Straight,
            anchored_to: None,
        }
    }
}

impl ArrowGeometry {
    /// Whether the anchors belong to an arrow from `source` to `target`.
    pub fn is_anchored_to(&self, source: NodeId, target: NodeId) -> bool {
        self.anchored_to == Some((source, target))
    }

    pub fn is_curved(&self) -> bool {
        matches!(self.route, Route::Curved(_))
    }

    pub fn is_self_loop(&self) -> bool {
        matches!(self.route, Route::SelfLoop(_))
    }

    pub fn curve(&self) -> Option<&Curve> {
        match &self.route {
            Route::Curved(c) => Some(c),
            _ => None,
        }
    }

    pub fn self_loop(&self) -> Option<&Loop> {
        match &self.route {
            Route::SelfLoop(l) => Some(l),
            _ => None,
        }
    }

    /// `0.0` unless curved.
    pub fn curve_offset(&self) -> f64 {
        self.curve().map_or(0.0, |c| c.offset)
    }

    pub fn control_points(&self) -> Option<(Point, Point)> {
        self.curve()
            .map(|c| (c.control_point_1, c.control_point_2))
    }

    pub fn loop_center(&self) -> Option<Point> {
        self.self_loop().map(|l| l.center)
    }

    pub fn loop_radius(&self) -> Option<f64> {
        self.self_loop().map(|l| l.radius)
    }

    /// Angle (radians, `atan2` convention) of the path where it arrives at the target.
    pub fn end_tangent_angle(&self) -> f64 {
        match &self.route {
            Route::Straight => angle(self.start_point, self.end_point),
            Route::Curved(c) => angle(c.control_point_2, self.end_point),
            Route::SelfLoop(l) => l.tip_angle(),
        }
    }

    /// Angle of the path where it leaves the source (tail decorations).
    pub fn start_tangent_angle(&self) -> f64 {
        match &self.route {
            Route::Straight => angle(self.start_point, self.end_point),
            Route::Curved(c) => angle(self.start_point, c.control_point_1),
            Route::SelfLoop(_) => {
                (Loop::ARC_START_DEG + Loop::ARC_SPAN_DEG).to_radians()
                    + std::f64::consts::FRAC_PI_2
            }
        }
    }

    /// Region covered by the drawn path (loop circle, or the Bézier hull).
    pub fn bounds(&self) -> Rect {
        match &self.route {
            Route::SelfLoop(l) => Rect::new(
                point(l.center.x - l.radius, l.center.y - l.radius),
                size(2.0 * l.radius, 2.0 * l.radius),
            ),
            Route::Curved(c) => Rect::from_points([
                self.start_point,
                self.end_point,
                c.control_point_1,
                c.control_point_2,
            ]),
            Route::Straight => Rect::from_points([self.start_point, self.end_point]),
        }
    }
}

fn angle(from: Point, to: Point) -> f64 {
    (to.y - from.y).atan2(to.x - from.x)
}

/// A directed connection. `source`/`target` are `None` only while the host is still
/// dragging the arrow out; such arrows are skipped by every engine computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arrow {
    pub id: ArrowId,
    pub source: Option<NodeId>,
    pub target: Option<NodeId>,
    pub geometry: ArrowGeometry,
}

impl Arrow {
    pub fn new(id: ArrowId, source: Option<NodeId>, target: Option<NodeId>) -> Self {
        Self {
            id,
            source,
            target,
            geometry: ArrowGeometry::default(),
        }
    }

    pub fn endpoints(&self) -> Option<(NodeId, NodeId)> {
        Some((self.source?, self.target?))
    }

    pub fn is_complete(&self) -> bool {
        self.endpoints().is_some()
    }

    pub fn is_self_loop_edge(&self) -> bool {
        self.endpoints().is_some_and(|(s, t)| s == t)
    }

    /// Whether `self` and `other` join the same two nodes, in either order.
    pub fn shares_endpoints_with(&self, other: &Arrow) -> bool {
        match (self.endpoints(), other.endpoints()) {
            (Some((a, b)), Some((c, d))) => (a == c && b == d) || (a == d && b == c),
            _ => false,
        }
    }

    pub fn touches(&self, node: NodeId) -> bool {
        self.source == Some(node) || self.target == Some(node)
    }
}
