//! Graph algorithms over the arrow adjacency.
//!
//! Cycle detection is the classic three-color DFS: every back-edge (an edge into a node that is
//! still on the DFS path) yields one closed walk. Results are not deduplicated; the same cycle
//! can be reported again from a different back-edge.

use crate::model::{Arrow, ArrowId, NodeId};
use indexmap::IndexSet;
use rustc_hash::FxBuildHasher;
use serde::{Deserialize, Serialize};

type HashMap<K, V> = hashbrown::HashMap<K, V, FxBuildHasher>;

/// A closed walk `[n0, n1, …, nk = n0]` found through a back-edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cycle {
    pub nodes: Vec<NodeId>,
}

impl Cycle {
    /// Number of arrows in the walk (a self-loop has length 1).
    pub fn len(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The walk without its repeated closing node.
    pub fn distinct_nodes(&self) -> &[NodeId] {
        match self.nodes.split_last() {
            Some((_, rest)) if !rest.is_empty() => rest,
            _ => &self.nodes,
        }
    }

    /// Consecutive `(from, to)` steps of the walk.
    pub fn steps(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.nodes.windows(2).map(|w| (w[0], w[1]))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    White,
    Gray,
    Black,
}

/// Successor lists keyed by source, in arrow order. Arrows with a missing endpoint, or an
/// endpoint outside `color`, are ignored.
fn build_adjacency<'a>(
    color: &HashMap<NodeId, Color>,
    arrows: impl IntoIterator<Item = &'a Arrow>,
) -> HashMap<NodeId, Vec<NodeId>> {
    let mut adjacency: HashMap<NodeId, Vec<NodeId>> = HashMap::default();
    for arrow in arrows {
        let Some((source, target)) = arrow.endpoints() else {
            continue;
        };
        if color.contains_key(&source) && color.contains_key(&target) {
            adjacency.entry(source).or_default().push(target);
        }
    }
    adjacency
}

/// Every directed cycle reachable as a back-edge, roots taken in the order of `nodes`.
///
/// The traversal uses an explicit frame stack but visits nodes and neighbors in exactly the order
/// a recursive DFS would.
pub fn find_cycles<'a>(
    nodes: impl IntoIterator<Item = NodeId>,
    arrows: impl IntoIterator<Item = &'a Arrow>,
) -> Vec<Cycle> {
    let order: Vec<NodeId> = nodes.into_iter().collect();
    let mut color: HashMap<NodeId, Color> = HashMap::default();
    for &n in &order {
        color.insert(n, Color::White);
    }
    let adjacency = build_adjacency(&color, arrows);

    let mut cycles: Vec<Cycle> = Vec::new();
    let mut path: Vec<NodeId> = Vec::new();
    // (node, index of the next successor to visit)
    let mut frames: Vec<(NodeId, usize)> = Vec::new();

    for &root in &order {
        if color.get(&root) != Some(&Color::White) {
            continue;
        }
        color.insert(root, Color::Gray);
        path.push(root);
        frames.push((root, 0));

        while let Some(&(v, next)) = frames.last() {
            let successors = adjacency.get(&v).map(Vec::as_slice).unwrap_or(&[]);
            let Some(&w) = successors.get(next) else {
                color.insert(v, Color::Black);
                path.pop();
                frames.pop();
                continue;
            };
            if let Some(top) = frames.last_mut() {
                top.1 += 1;
            }

            match color.get(&w).copied() {
                Some(Color::Gray) => {
                    if let Some(start) = path.iter().position(|&n| n == w) {
                        let mut walk = path[start..].to_vec();
                        walk.push(w);
                        cycles.push(Cycle { nodes: walk });
                    }
                }
                Some(Color::White) => {
                    color.insert(w, Color::Gray);
                    path.push(w);
                    frames.push((w, 0));
                }
                Some(Color::Black) | None => {}
            }
        }
    }

    cycles
}

/// The first arrow realizing each step of `cycle`, in walk order. Steps without a matching
/// arrow contribute nothing.
pub fn cycle_arrows<'a>(
    cycle: &Cycle,
    arrows: impl IntoIterator<Item = &'a Arrow>,
) -> Vec<ArrowId> {
    if cycle.nodes.len() < 2 {
        return Vec::new();
    }
    let arrows: Vec<&Arrow> = arrows.into_iter().collect();
    cycle
        .steps()
        .filter_map(|step| {
            arrows
                .iter()
                .find(|a| a.endpoints() == Some(step))
                .map(|a| a.id)
        })
        .collect()
}

/// Union of everything a host should mark as "part of a cycle".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleHighlight {
    pub nodes: IndexSet<NodeId>,
    pub arrows: IndexSet<ArrowId>,
}

impl CycleHighlight {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.arrows.is_empty()
    }

    pub fn contains_node(&self, id: NodeId) -> bool {
        self.nodes.contains(&id)
    }

    pub fn contains_arrow(&self, id: ArrowId) -> bool {
        self.arrows.contains(&id)
    }
}

/// Collapses cycle reports into the node/arrow sets to highlight. Pure data: applying and
/// clearing the styling is left to the host.
pub fn cycle_highlights<'a>(
    cycles: &[Cycle],
    arrows: impl IntoIterator<Item = &'a Arrow>,
) -> CycleHighlight {
    let arrows: Vec<&Arrow> = arrows.into_iter().collect();
    let mut out = CycleHighlight::default();
    for cycle in cycles.iter().filter(|c| c.nodes.len() > 1) {
        out.nodes.extend(cycle.distinct_nodes().iter().copied());
        out.arrows.extend(cycle_arrows(cycle, arrows.iter().copied()));
    }
    out
}
