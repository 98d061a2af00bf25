#![forbid(unsafe_code)]

//! Scene graph container used by `quiver`.
//!
//! Holds the host's nodes and arrows under stable creation-order ids, the per-arrow geometry
//! slots the engine writes into, and the graph algorithms that need no geometry (cycle
//! detection).

pub mod alg;
mod error;
pub mod geom;
mod model;
mod scene;

pub use error::{GraphError, Result};
pub use model::{
    Arrow, ArrowGeometry, ArrowId, Curve, DEFAULT_CORNER_RADIUS, DEFAULT_NODE_SIZE, Loop, LoopSide,
    Node, NodeId, Route,
};
pub use scene::Scene;
