//! One recompute over a whole [`Scene`].
//!
//! Order per pass: outline anchors for arrows touching a changed node, parallel grouping and
//! curve assignment for every arrow, self-loop placement on changed nodes, then cycle detection
//! over the whole graph. All geometry is computed against the scene as it was at the start of
//! the pass and written back at the end, so the result does not depend on arrow order.

use crate::algo::{ArrowLine, arrow_lines, boundary, curve, parallel, self_loop};
use crate::options::LayoutOptions;
use quiver_graph::alg::{Cycle, CycleHighlight, cycle_highlights};
use quiver_graph::geom::Point;
use quiver_graph::{ArrowGeometry, ArrowId, Node, NodeId, Route, Scene};
use serde::Serialize;

/// What a pass did, plus the cycle output for the host's highlighting step.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RecomputeReport {
    pub straight: usize,
    pub curved: usize,
    pub self_loops: usize,
    /// Arrows left untouched: under construction or pointing at a missing node.
    pub skipped: usize,
    pub cycles: Vec<Cycle>,
    pub highlight: CycleHighlight,
}

impl RecomputeReport {
    pub fn has_cycles(&self) -> bool {
        !self.cycles.is_empty()
    }
}

#[derive(Debug, Clone, Copy)]
enum Dirty<'a> {
    All,
    Nodes(&'a [NodeId]),
}

impl Dirty<'_> {
    fn contains(&self, node: NodeId) -> bool {
        match self {
            Dirty::All => true,
            Dirty::Nodes(ids) => ids.contains(&node),
        }
    }

    fn touches(&self, line: &ArrowLine) -> bool {
        self.contains(line.source) || self.contains(line.target)
    }
}

/// Recomputes every arrow as if every node had changed.
pub fn recompute(scene: &mut Scene, opts: &LayoutOptions) -> RecomputeReport {
    run(scene, Dirty::All, opts)
}

/// Incremental pass after the nodes in `changed` moved, resized, or gained or lost arrows.
///
/// Arrows that touch no changed node keep their current anchors, unless those anchors were
/// computed for different endpoints: a freshly added arrow, or one that was flipped since the
/// last pass, is always re-anchored. Curves are still reassigned for every arrow because a new
/// neighbor can join its group.
pub fn recompute_for_nodes(
    scene: &mut Scene,
    changed: &[NodeId],
    opts: &LayoutOptions,
) -> RecomputeReport {
    run(scene, Dirty::Nodes(changed), opts)
}

fn anchors(src: &Node, tgt: &Node, opts: &LayoutOptions) -> (Point, Point) {
    (
        boundary::intersect_with(src.center, tgt.center, src, opts),
        boundary::intersect_with(tgt.center, src.center, tgt, opts),
    )
}

fn run(scene: &mut Scene, dirty: Dirty<'_>, opts: &LayoutOptions) -> RecomputeReport {
    let lines = arrow_lines(scene);
    let nodes: Vec<&Node> = scene.nodes().collect();

    let mut report = RecomputeReport {
        skipped: scene.arrow_count() - lines.len(),
        ..RecomputeReport::default()
    };
    let mut updates: Vec<(ArrowId, ArrowGeometry)> = Vec::with_capacity(lines.len());

    for line in &lines {
        let (Some(src), Some(tgt)) = (scene.node(line.source), scene.node(line.target)) else {
            continue;
        };
        let current = scene
            .arrow(line.id)
            .map(|a| a.geometry)
            .unwrap_or_default();

        if line.is_self_loop() {
            let stale =
                !current.is_self_loop() || !current.is_anchored_to(line.source, line.source);
            let geometry = if dirty.contains(line.source) || stale {
                self_loop::place(src, &nodes, opts)
            } else {
                current
            };
            if let Some(l) = geometry.self_loop() {
                tracing::trace!(arrow = %line.id, side = %l.side, "self-loop");
            }
            report.self_loops += 1;
            updates.push((line.id, geometry));
            continue;
        }

        let stale = current.is_self_loop() || !current.is_anchored_to(line.source, line.target);
        let (start_point, end_point) = if dirty.touches(line) || stale {
            anchors(src, tgt, opts)
        } else {
            (current.start_point, current.end_point)
        };
        let mut geometry = ArrowGeometry {
            start_point,
            end_point,
            route: Route::Straight,
            anchored_to: Some((line.source, line.target)),
        };
        let group = parallel::find_group(line, &lines, opts);
        curve::assign(&mut geometry, line, &group, opts);

        tracing::trace!(
            arrow = %line.id,
            group = group.len(),
            offset = geometry.curve_offset(),
            "arrow"
        );
        if geometry.is_curved() {
            report.curved += 1;
        } else {
            report.straight += 1;
        }
        updates.push((line.id, geometry));
    }

    for (id, geometry) in updates {
        if let Some(slot) = scene.geometry_mut(id) {
            *slot = geometry;
        }
    }

    report.cycles = scene.find_cycles();
    report.highlight = cycle_highlights(&report.cycles, scene.arrows());

    tracing::debug!(
        straight = report.straight,
        curved = report.curved,
        self_loops = report.self_loops,
        skipped = report.skipped,
        cycles = report.cycles.len(),
        "recompute"
    );
    report
}
