//! Where an arrow meets a node's rounded-rectangle outline.
//!
//! The outline is flattened into a closed polygon (a fixed number of chords per corner) and a
//! long ray from the node center is intersected with every polygon edge; the nearest hit in the
//! ray's direction wins.

use crate::options::LayoutOptions;
use quiver_graph::Node;
use quiver_graph::geom::{Point, point, segment_intersection};
use std::f64::consts::{FRAC_PI_2, PI};

/// Below this per-axis distance `center` and `towards` coincide.
const COINCIDENT_EPSILON: f64 = 1e-3;

/// The node's rounded-rectangle outline as a closed polygon, clockwise on screen (y down),
/// starting at the top-left corner arc. The closing edge is implicit.
///
/// The corner radius is clamped to half the shorter side; a radius of zero yields the four
/// rectangle corners.
pub fn rounded_rect_outline(node: &Node, segments_per_corner: usize) -> Vec<Point> {
    let bounds = node.bounds();
    let (min_x, min_y) = (bounds.min_x(), bounds.min_y());
    let (max_x, max_y) = (bounds.max_x(), bounds.max_y());
    let r = node
        .corner_radius
        .min(node.width / 2.0)
        .min(node.height / 2.0)
        .max(0.0);

    if r <= 0.0 {
        return vec![
            point(min_x, min_y),
            point(max_x, min_y),
            point(max_x, max_y),
            point(min_x, max_y),
        ];
    }

    let segments = segments_per_corner.max(1);
    // (arc center, start angle); each arc sweeps +90°.
    let corners = [
        (point(min_x + r, min_y + r), PI),
        (point(max_x - r, min_y + r), PI + FRAC_PI_2),
        (point(max_x - r, max_y - r), 0.0),
        (point(min_x + r, max_y - r), FRAC_PI_2),
    ];

    let mut outline = Vec::with_capacity(corners.len() * (segments + 1));
    for (c, start) in corners {
        for i in 0..=segments {
            let a = start + FRAC_PI_2 * (i as f64 / segments as f64);
            outline.push(point(c.x + r * a.cos(), c.y + r * a.sin()));
        }
    }
    outline
}

/// Anchor point for an arrow leaving `node` from `center` toward `towards`, using the default
/// tessellation and ray length.
pub fn intersect(center: Point, towards: Point, node: &Node) -> Point {
    intersect_with(center, towards, node, &LayoutOptions::default())
}

/// Nearest point where the ray `center -> towards` exits `node`'s outline.
///
/// Coincident `center`/`towards`, or a ray that hits nothing, returns `center` unchanged.
pub fn intersect_with(center: Point, towards: Point, node: &Node, opts: &LayoutOptions) -> Point {
    let d = towards - center;
    if d.x.abs() < COINCIDENT_EPSILON && d.y.abs() < COINCIDENT_EPSILON {
        return center;
    }
    let dir = d / d.length();
    let ray_end = center + dir * opts.ray_length;

    let outline = rounded_rect_outline(node, opts.corner_segments);
    let mut best = center;
    let mut best_dist = f64::INFINITY;
    for (i, &a) in outline.iter().enumerate() {
        let b = outline[(i + 1) % outline.len()];
        let Some(hit) = segment_intersection(center, ray_end, a, b) else {
            continue;
        };
        let to_hit = hit - center;
        if to_hit.dot(dir) <= 0.0 {
            continue;
        }
        let dist = to_hit.length();
        if dist < best_dist {
            best_dist = dist;
            best = hit;
        }
    }
    best
}
