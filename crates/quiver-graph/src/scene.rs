//! The node/arrow store the host mutates and the engine reads.
//!
//! Nodes and arrows keep insertion order (iteration order is creation order, which the cycle
//! detector and the parallel-arrow ordering rely on). Ids come from per-scene counters and are
//! never reused, so an id that was removed stays dead.

use crate::alg::{self, Cycle};
use crate::error::{GraphError, Result};
use crate::geom::{Point, Size};
use crate::model::{Arrow, ArrowGeometry, ArrowId, Node, NodeId};
use indexmap::IndexMap;

#[derive(Debug, Clone, Default)]
pub struct Scene {
    nodes: IndexMap<NodeId, Node>,
    arrows: IndexMap<ArrowId, Arrow>,
    next_node: u64,
    next_arrow: u64,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    fn issue_node_id(&mut self) -> NodeId {
        let id = NodeId(self.next_node);
        self.next_node += 1;
        id
    }

    fn issue_arrow_id(&mut self) -> ArrowId {
        let id = ArrowId(self.next_arrow);
        self.next_arrow += 1;
        id
    }

    pub fn add_node(&mut self, center: Point, size: Size) -> NodeId {
        let id = self.issue_node_id();
        self.nodes.insert(id, Node::new(id, center, size));
        id
    }

    pub fn has_node(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn node_ids(&self) -> Vec<NodeId> {
        self.nodes.keys().copied().collect()
    }

    fn node_entry_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.nodes.get_mut(&id).ok_or(GraphError::UnknownNode(id))
    }

    pub fn move_node(&mut self, id: NodeId, center: Point) -> Result<()> {
        self.node_entry_mut(id)?.center = center;
        Ok(())
    }

    pub fn resize_node(&mut self, id: NodeId, size: Size) -> Result<()> {
        let node = self.node_entry_mut(id)?;
        node.width = size.width;
        node.height = size.height;
        Ok(())
    }

    pub fn set_corner_radius(&mut self, id: NodeId, corner_radius: f64) -> Result<()> {
        self.node_entry_mut(id)?.corner_radius = corner_radius;
        Ok(())
    }

    /// Removes the node together with every arrow that touches it.
    pub fn remove_node(&mut self, id: NodeId) -> Option<Node> {
        let node = self.nodes.shift_remove(&id)?;
        self.arrows.retain(|_, a| !a.touches(id));
        Some(node)
    }

    fn require_node(&self, id: NodeId) -> Result<()> {
        if self.nodes.contains_key(&id) {
            Ok(())
        } else {
            Err(GraphError::UnknownNode(id))
        }
    }

    pub fn add_arrow(&mut self, source: NodeId, target: NodeId) -> Result<ArrowId> {
        self.require_node(source)?;
        self.require_node(target)?;
        let id = self.issue_arrow_id();
        self.arrows
            .insert(id, Arrow::new(id, Some(source), Some(target)));
        Ok(id)
    }

    /// Starts an arrow whose target is not chosen yet.
    pub fn begin_arrow(&mut self, source: NodeId) -> Result<ArrowId> {
        self.require_node(source)?;
        let id = self.issue_arrow_id();
        self.arrows.insert(id, Arrow::new(id, Some(source), None));
        Ok(id)
    }

    pub fn finish_arrow(&mut self, id: ArrowId, target: NodeId) -> Result<()> {
        self.require_node(target)?;
        let arrow = self.arrow_entry_mut(id)?;
        arrow.target = Some(target);
        Ok(())
    }

    /// Reverses the arrow's direction. Geometry is stale until the next recompute.
    pub fn flip_arrow(&mut self, id: ArrowId) -> Result<()> {
        let arrow = self.arrow_entry_mut(id)?;
        std::mem::swap(&mut arrow.source, &mut arrow.target);
        Ok(())
    }

    pub fn remove_arrow(&mut self, id: ArrowId) -> Option<Arrow> {
        self.arrows.shift_remove(&id)
    }

    pub fn arrow(&self, id: ArrowId) -> Option<&Arrow> {
        self.arrows.get(&id)
    }

    fn arrow_entry_mut(&mut self, id: ArrowId) -> Result<&mut Arrow> {
        self.arrows.get_mut(&id).ok_or(GraphError::UnknownArrow(id))
    }

    pub fn arrow_count(&self) -> usize {
        self.arrows.len()
    }

    pub fn arrows(&self) -> impl Iterator<Item = &Arrow> {
        self.arrows.values()
    }

    pub fn arrow_ids(&self) -> Vec<ArrowId> {
        self.arrows.keys().copied().collect()
    }

    /// Engine-owned output slot of one arrow.
    pub fn geometry_mut(&mut self, id: ArrowId) -> Option<&mut ArrowGeometry> {
        self.arrows.get_mut(&id).map(|a| &mut a.geometry)
    }

    pub fn incident_arrows(&self, node: NodeId) -> Vec<ArrowId> {
        self.arrows
            .values()
            .filter(|a| a.touches(node))
            .map(|a| a.id)
            .collect()
    }

    pub fn self_loops_on(&self, node: NodeId) -> Vec<ArrowId> {
        self.arrows
            .values()
            .filter(|a| a.endpoints() == Some((node, node)))
            .map(|a| a.id)
            .collect()
    }

    fn is_dangling(&self, arrow: &Arrow) -> bool {
        match arrow.endpoints() {
            Some((s, t)) => !self.has_node(s) || !self.has_node(t),
            None => true,
        }
    }

    /// First arrow that is missing an endpoint, if any.
    pub fn validate(&self) -> Result<()> {
        match self.arrows.values().find(|a| self.is_dangling(a)) {
            Some(a) => Err(GraphError::DanglingArrow { arrow: a.id }),
            None => Ok(()),
        }
    }

    /// Drops every arrow that is missing an endpoint and returns their ids.
    pub fn prune_dangling_arrows(&mut self) -> Vec<ArrowId> {
        let dangling: Vec<ArrowId> = self
            .arrows
            .values()
            .filter(|a| self.is_dangling(a))
            .map(|a| a.id)
            .collect();
        for id in &dangling {
            self.arrows.shift_remove(id);
        }
        dangling
    }

    /// Every directed cycle, with roots taken in node creation order.
    pub fn find_cycles(&self) -> Vec<Cycle> {
        alg::find_cycles(self.nodes.keys().copied(), self.arrows.values())
    }
}
