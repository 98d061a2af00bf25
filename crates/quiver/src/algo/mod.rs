//! Per-arrow geometry algorithms.
//!
//! Each submodule is a pure function of its inputs; [`crate::pass`] wires them into a full
//! recompute over a [`Scene`].

pub mod boundary;
pub mod curve;
pub mod parallel;
pub mod self_loop;

use quiver_graph::geom::{Segment, Vector};
use quiver_graph::{Arrow, ArrowId, NodeId, Scene};

/// The node-center to node-center line of a complete arrow. Parallel grouping and curve
/// assignment both work on these, never on the outline-anchored points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrowLine {
    pub id: ArrowId,
    pub source: NodeId,
    pub target: NodeId,
    pub segment: Segment,
}

impl ArrowLine {
    /// `None` while the arrow is under construction or references a node not in `scene`.
    pub fn of(arrow: &Arrow, scene: &Scene) -> Option<Self> {
        let (source, target) = arrow.endpoints()?;
        let start = scene.node(source)?.center;
        let end = scene.node(target)?.center;
        Some(Self {
            id: arrow.id,
            source,
            target,
            segment: Segment::new(start, end),
        })
    }

    pub fn vector(&self) -> Vector {
        self.segment.vector()
    }

    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }

    /// Same two nodes, in either order.
    pub fn shares_endpoints(&self, other: &ArrowLine) -> bool {
        (self.source == other.source && self.target == other.target)
            || (self.source == other.target && self.target == other.source)
    }

    pub fn touches(&self, node: NodeId) -> bool {
        self.source == node || self.target == node
    }
}

/// Lines of every complete arrow in `scene`, in arrow creation order (self-loops included;
/// the grouping code skips them).
pub fn arrow_lines(scene: &Scene) -> Vec<ArrowLine> {
    scene
        .arrows()
        .filter_map(|a| ArrowLine::of(a, scene))
        .collect()
}
