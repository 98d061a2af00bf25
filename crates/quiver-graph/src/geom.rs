//! Scene-space geometry primitives.
//!
//! Everything is `f64` in a single untyped coordinate space (the host canvas). The helpers here
//! are the small building blocks shared by the anchoring and routing code in `quiver`.

pub type Unit = euclid::UnknownUnit;

pub type Point = euclid::Point2D<f64, Unit>;
pub type Vector = euclid::Vector2D<f64, Unit>;
pub type Size = euclid::Size2D<f64, Unit>;
pub type Rect = euclid::Rect<f64, Unit>;

/// Determinant magnitude below which two segments are treated as parallel.
pub const PARALLEL_DET_EPSILON: f64 = 1e-10;

pub fn point(x: f64, y: f64) -> Point {
    euclid::point2(x, y)
}

pub fn vector(x: f64, y: f64) -> Vector {
    euclid::vec2(x, y)
}

pub fn size(width: f64, height: f64) -> Size {
    euclid::size2(width, height)
}

/// Axis-aligned rectangle centered on `center`.
pub fn rect_from_center(center: Point, size: Size) -> Rect {
    Rect::new(
        point(center.x - size.width / 2.0, center.y - size.height / 2.0),
        size,
    )
}

/// Closed-interval rectangle overlap (touching edges count).
///
/// `euclid::Rect::intersects` is half-open, which misses nodes that sit exactly on the edge of a
/// side clearance region.
pub fn rects_touch(a: &Rect, b: &Rect) -> bool {
    a.min_x() <= b.max_x()
        && b.min_x() <= a.max_x()
        && a.min_y() <= b.max_y()
        && b.min_y() <= a.max_y()
}

/// `v` rotated by 90° (`(-y, x)`) and normalized; `None` for a zero-length vector.
pub fn perpendicular(v: Vector) -> Option<Vector> {
    let perp = vector(-v.y, v.x);
    let len = perp.length();
    if len > 0.0 { Some(perp / len) } else { None }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

impl Segment {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    pub fn vector(&self) -> Vector {
        self.end - self.start
    }

    pub fn length(&self) -> f64 {
        self.vector().length()
    }

    pub fn midpoint(&self) -> Point {
        self.start.lerp(self.end, 0.5)
    }

    pub fn reversed(&self) -> Self {
        Self::new(self.end, self.start)
    }
}

/// Intersection of the line through `p1 -> p2` with the segment `p3 -> p4`.
///
/// Solves the parametric 2×2 system. The first operand is treated as a (long) ray: only the
/// parameter `u` on `p3 -> p4` is range-checked (`0 <= u <= 1`), callers filter direction
/// themselves.
pub fn segment_intersection(p1: Point, p2: Point, p3: Point, p4: Point) -> Option<Point> {
    let (x1, y1) = (p1.x, p1.y);
    let (x2, y2) = (p2.x, p2.y);
    let (x3, y3) = (p3.x, p3.y);
    let (x4, y4) = (p4.x, p4.y);

    let det = (x1 - x2) * (y3 - y4) - (y1 - y2) * (x3 - x4);
    if det.abs() < PARALLEL_DET_EPSILON {
        return None;
    }

    let t = ((x1 - x3) * (y3 - y4) - (y1 - y3) * (x3 - x4)) / det;
    let u = -((x1 - x2) * (y1 - y3) - (y1 - y2) * (x1 - x3)) / det;

    if (0.0..=1.0).contains(&u) {
        Some(point(x1 + t * (x2 - x1), y1 + t * (y2 - y1)))
    } else {
        None
    }
}
