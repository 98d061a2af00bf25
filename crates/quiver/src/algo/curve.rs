//! Curve offsets and Bézier control points for grouped arrows.
//!
//! Members of a group are ordered by arrow id (creation order), so which arrow gets which side
//! only depends on the order the arrows were created in.

use super::ArrowLine;
use crate::options::LayoutOptions;
use quiver_graph::geom::{Point, Vector, perpendicular, vector};
use quiver_graph::{ArrowGeometry, ArrowId, Curve, Route};

/// Offset (and optionally a fixed perpendicular) chosen for one arrow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurvePlan {
    pub offset: f64,
    pub direction: Option<Vector>,
}

fn sorted_position(arrow: ArrowId, members: impl IntoIterator<Item = ArrowId>) -> (usize, usize) {
    let mut ids: Vec<ArrowId> = members.into_iter().collect();
    ids.sort_unstable();
    let i = ids.iter().position(|&id| id == arrow).unwrap_or(0);
    (i, ids.len())
}

/// Symmetric fan around zero: `(i - (n - 1) / 2) * base`.
fn fan_multiplier(i: usize, n: usize) -> f64 {
    i as f64 - (n as f64 - 1.0) / 2.0
}

/// Weighted direction scalar used to tell "forward" from "backward" arrows in a mixed group.
fn direction_factor(v: Vector) -> f64 {
    v.x + v.y * 1000.0
}

/// Whether any member of `others` sits within the visual thickness of `arrow` across its own
/// direction.
pub fn visually_overlaps(arrow: &ArrowLine, others: &[ArrowLine], opts: &LayoutOptions) -> bool {
    let Some(perp) = perpendicular(arrow.vector()) else {
        return false;
    };
    let mid = arrow.segment.midpoint();
    others.iter().any(|other| {
        let diff = other.segment.midpoint() - mid;
        diff.dot(perp).abs() < opts.visual_thickness
    })
}

/// Every pair of members points the same general way (non-negative dot product).
fn all_same_direction(members: &[&ArrowLine]) -> bool {
    members.iter().enumerate().all(|(i, a)| {
        members[i + 1..]
            .iter()
            .all(|b| a.vector().dot(b.vector()) >= 0.0)
    })
}

/// Decides how `arrow` is curved given its (non-empty) `group`; `None` means straight.
///
/// Arrows sharing both endpoints with `arrow` take precedence: only they are ranked, and the
/// rest of the group is ignored. For an opposite pair (`a -> b`, `b -> a`) the offsets are
/// `+base` and `-base`, but the default perpendicular also flips with the direction, so both
/// control polygons land on the same side and the two curves coincide, told apart only by
/// their arrowheads.
pub fn plan(arrow: &ArrowLine, group: &[ArrowLine], opts: &LayoutOptions) -> Option<CurvePlan> {
    if group.is_empty() {
        return None;
    }
    let base = opts.base_curve_offset;

    let shared: Vec<&ArrowLine> = group.iter().filter(|g| g.shares_endpoints(arrow)).collect();
    if !shared.is_empty() {
        let (i, n) = sorted_position(
            arrow.id,
            std::iter::once(arrow.id).chain(shared.iter().map(|g| g.id)),
        );
        let offset = if n == 2 {
            if i == 0 { base } else { -base }
        } else {
            fan_multiplier(i, n) * base
        };
        return Some(CurvePlan {
            offset,
            direction: None,
        });
    }

    // Geometrically parallel but not duplicates: only curve on a real visual collision.
    if !visually_overlaps(arrow, group, opts) {
        return None;
    }

    let (i, n) = sorted_position(
        arrow.id,
        std::iter::once(arrow.id).chain(group.iter().map(|g| g.id)),
    );
    let members: Vec<&ArrowLine> = std::iter::once(arrow).chain(group.iter()).collect();
    if all_same_direction(&members) {
        // Everyone bends to the same side, further out by rank.
        return Some(CurvePlan {
            offset: base * (i as f64 + 1.0),
            direction: perpendicular(arrow.vector()),
        });
    }

    let mut m = fan_multiplier(i, n);
    if direction_factor(arrow.vector()) < 0.0 {
        m = -m;
    }
    Some(CurvePlan {
        offset: m * base,
        direction: None,
    })
}

/// Control points at `t1`/`t2` along `start -> end`, both shifted by `perp * offset`.
///
/// Without a fixed perpendicular, `start -> end` rotated by 90° is used; a zero-length
/// `start -> end` leaves the control points on the line.
pub fn control_points(
    start: Point,
    end: Point,
    plan: &CurvePlan,
    opts: &LayoutOptions,
) -> (Point, Point) {
    let d = end - start;
    let perp = plan
        .direction
        .or_else(|| perpendicular(d))
        .unwrap_or(vector(0.0, 0.0));
    let shift = perp * plan.offset;
    (
        start + d * opts.control_t1 + shift,
        start + d * opts.control_t2 + shift,
    )
}

/// Writes the curve fields of `geometry` for `arrow`. Anchor points must already be set.
pub fn assign(
    geometry: &mut ArrowGeometry,
    arrow: &ArrowLine,
    group: &[ArrowLine],
    opts: &LayoutOptions,
) {
    geometry.route = match plan(arrow, group, opts) {
        None => Route::Straight,
        Some(plan) => {
            let (control_point_1, control_point_2) =
                control_points(geometry.start_point, geometry.end_point, &plan, opts);
            Route::Curved(Curve {
                offset: plan.offset,
                direction: plan.direction,
                control_point_1,
                control_point_2,
            })
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fan_is_symmetric_around_zero() {
        let offsets: Vec<f64> = (0..3).map(|i| fan_multiplier(i, 3)).collect();
        assert_eq!(offsets, vec![-1.0, 0.0, 1.0]);
        let offsets: Vec<f64> = (0..4).map(|i| fan_multiplier(i, 4)).collect();
        assert_eq!(offsets, vec![-1.5, -0.5, 0.5, 1.5]);
    }

    #[test]
    fn sorted_position_uses_id_order() {
        let ids = [ArrowId(7), ArrowId(2), ArrowId(5)];
        assert_eq!(sorted_position(ArrowId(5), ids), (1, 3));
        assert_eq!(sorted_position(ArrowId(2), ids), (0, 3));
    }
}
