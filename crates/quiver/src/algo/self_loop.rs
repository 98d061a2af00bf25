//! Self-loop placement: pick the least crowded side of the node and hang a circle off it.

use crate::options::LayoutOptions;
use quiver_graph::geom::{Point, Rect, Vector, point, rects_touch, size, vector};
use quiver_graph::{ArrowGeometry, Loop, LoopSide, Node, Route};

/// Clearance region outward from `side` of `node`, `loop_clearance_factor * max(w, h)` deep and
/// centered on that edge.
pub fn clearance_rect(node: &Node, side: LoopSide, opts: &LayoutOptions) -> Rect {
    let b = node.bounds();
    let d = opts.loop_clearance_factor * node.max_dimension();
    let (w, h) = (b.width(), b.height());
    match side {
        LoopSide::Top => Rect::new(point(b.min_x() - d / 2.0, b.min_y() - d), size(w + d, d)),
        LoopSide::Bottom => Rect::new(point(b.min_x() - d / 2.0, b.max_y()), size(w + d, d)),
        LoopSide::Left => Rect::new(point(b.min_x() - d, b.min_y() - d / 2.0), size(d, h + d)),
        LoopSide::Right => Rect::new(point(b.max_x(), b.min_y() - d / 2.0), size(d, h + d)),
    }
}

/// Number of `others` (excluding `node` itself) whose bounds touch the clearance region on `side`.
pub fn occupancy<'a>(
    node: &Node,
    side: LoopSide,
    others: impl IntoIterator<Item = &'a Node>,
    opts: &LayoutOptions,
) -> usize {
    let region = clearance_rect(node, side, opts);
    others
        .into_iter()
        .filter(|other| other.id != node.id)
        .filter(|other| rects_touch(&region, &other.bounds()))
        .count()
}

/// Least occupied side; ties go to the earliest side in [`LoopSide::ALL`].
pub fn choose_side(node: &Node, others: &[&Node], opts: &LayoutOptions) -> LoopSide {
    let mut best = LoopSide::Top;
    let mut best_score = usize::MAX;
    for side in LoopSide::ALL {
        let score = occupancy(node, side, others.iter().copied(), opts);
        if score < best_score {
            best = side;
            best_score = score;
        }
    }
    best
}

fn edge_midpoint(node: &Node, side: LoopSide) -> Point {
    let b = node.bounds();
    let c = node.center;
    match side {
        LoopSide::Top => point(c.x, b.min_y()),
        LoopSide::Bottom => point(c.x, b.max_y()),
        LoopSide::Left => point(b.min_x(), c.y),
        LoopSide::Right => point(b.max_x(), c.y),
    }
}

/// Unit vector along the edge on `side`.
fn along_edge(side: LoopSide) -> Vector {
    match side {
        LoopSide::Top | LoopSide::Bottom => vector(1.0, 0.0),
        LoopSide::Left | LoopSide::Right => vector(0.0, 1.0),
    }
}

/// Loop geometry on a fixed `side`.
pub fn loop_on(node: &Node, side: LoopSide, opts: &LayoutOptions) -> ArrowGeometry {
    let radius = opts.loop_radius_factor * node.max_dimension();
    let mid = edge_midpoint(node, side);
    let half_gap = along_edge(side) * (opts.loop_anchor_gap / 2.0);
    ArrowGeometry {
        start_point: mid - half_gap,
        end_point: mid + half_gap,
        route: Route::SelfLoop(Loop {
            side,
            center: mid + side.outward() * radius,
            radius,
        }),
        anchored_to: Some((node.id, node.id)),
    }
}

/// Full self-loop geometry for an arrow from `node` to itself.
pub fn place(node: &Node, others: &[&Node], opts: &LayoutOptions) -> ArrowGeometry {
    loop_on(node, choose_side(node, others, opts), opts)
}
