//! Which arrows would be drawn on top of each other if all were straight.
//!
//! Two center-to-center segments are grouped when they share both endpoints (either order), or
//! when they are parallel, overlap along their shared direction, and lie close to each other
//! across it. Self-loops never join a group.

use super::ArrowLine;
use crate::options::{LayoutOptions, ParallelMode};
use quiver_graph::geom::{Point, Segment, Vector, vector};

fn same_point(a: Point, b: Point, tolerance: f64) -> bool {
    (a.x - b.x).abs() < tolerance && (a.y - b.y).abs() < tolerance
}

/// Both endpoints coincide, in the same or in swapped order.
pub fn endpoints_coincide(a: &Segment, b: &Segment, tolerance: f64) -> bool {
    (same_point(a.start, b.start, tolerance) && same_point(a.end, b.end, tolerance))
        || (same_point(a.start, b.end, tolerance) && same_point(a.end, b.start, tolerance))
}

/// Whether projected ranges `[a_min, a_max]` and `[b_min, b_max]` overlap enough.
///
/// The overlap must be strictly longer than `min_overlap`. Ranges whose ends are all within
/// `near_identical_tolerance` of each other also count: short near-duplicates can fail the raw
/// length test.
pub fn projections_overlap(a: (f64, f64), b: (f64, f64), opts: &LayoutOptions) -> bool {
    let (a_min, a_max) = a;
    let (b_min, b_max) = b;

    let near = opts.near_identical_tolerance;
    if (a_min - b_min).abs() < near && (a_max - b_max).abs() < near {
        return true;
    }

    let overlap = a_max.min(b_max) - a_min.max(b_min);
    overlap > opts.min_overlap
}

fn projected_range(seg: &Segment, dir: Vector) -> (f64, f64) {
    let p0 = seg.start.to_vector().dot(dir);
    let p1 = seg.end.to_vector().dot(dir);
    (p0.min(p1), p0.max(p1))
}

/// Distance between the segment midpoints across `dir` (a unit vector).
pub fn perpendicular_distance(a: &Segment, b: &Segment, dir: Vector) -> f64 {
    let perp = vector(-dir.y, dir.x);
    let pa = a.midpoint().to_vector().dot(perp);
    let pb = b.midpoint().to_vector().dot(perp);
    (pa - pb).abs()
}

/// The full grouping predicate on two center-to-center segments.
pub fn parallel_and_overlapping(a: &Segment, b: &Segment, opts: &LayoutOptions) -> bool {
    if endpoints_coincide(a, b, opts.shared_endpoint_tolerance) {
        return true;
    }

    let v1 = a.vector();
    let v2 = b.vector();
    let len1 = v1.length();
    let len2 = v2.length();
    if len1 < opts.degenerate_length || len2 < opts.degenerate_length {
        return false;
    }

    if v1.cross(v2).abs() > opts.parallel_tolerance * len1 * len2 {
        return false;
    }

    // Project onto the longer segment's direction.
    let dir = if len1 >= len2 { v1 / len1 } else { v2 / len2 };
    if !projections_overlap(projected_range(a, dir), projected_range(b, dir), opts) {
        return false;
    }

    perpendicular_distance(a, b, dir) <= opts.max_perpendicular_distance
}

/// Every other arrow in `lines` grouped with `arrow`, in `lines` order.
pub fn find_group(arrow: &ArrowLine, lines: &[ArrowLine], opts: &LayoutOptions) -> Vec<ArrowLine> {
    if arrow.is_self_loop() {
        return Vec::new();
    }
    lines
        .iter()
        .filter(|other| other.id != arrow.id && !other.is_self_loop())
        .filter(|other| match opts.parallel_mode {
            ParallelMode::Geometric => {
                parallel_and_overlapping(&arrow.segment, &other.segment, opts)
            }
            ParallelMode::NodePair => arrow.shares_endpoints(other),
        })
        .copied()
        .collect()
}
