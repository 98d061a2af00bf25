#![forbid(unsafe_code)]

//! Headless connectivity engine for node-and-arrow diagrams.
//!
//! Given a [`Scene`] of rounded-rectangle nodes and directed arrows, the engine computes where
//! each arrow meets its nodes' outlines, curves arrows that would otherwise be drawn on top of
//! each other, hangs self-loops on the least crowded side of their node, and reports directed
//! cycles. It writes only into each arrow's [`ArrowGeometry`]; rendering and cycle styling are
//! left to the host.
//!
//! ```
//! use quiver::graph::geom::{point, size};
//! use quiver::{LayoutOptions, Scene};
//!
//! let mut scene = Scene::new();
//! let a = scene.add_node(point(0.0, 0.0), size(80.0, 80.0));
//! let b = scene.add_node(point(200.0, 0.0), size(80.0, 80.0));
//! let ab = scene.add_arrow(a, b).unwrap();
//! scene.add_arrow(b, a).unwrap();
//!
//! let report = quiver::recompute(&mut scene, &LayoutOptions::default());
//! assert_eq!(report.curved, 2);
//! assert!(report.has_cycles());
//! // Anchored on the right edge of `a`, not at its center.
//! let start = scene.arrow(ab).unwrap().geometry.start_point;
//! assert!((start.x - 40.0).abs() < 1e-6 && start.y.abs() < 1e-6);
//! ```

pub use quiver_graph as graph;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod algo;
pub mod config;
pub mod error;
pub mod options;
pub mod pass;

pub use config::EngineConfig;
pub use error::{Error, Result};
pub use options::{LayoutOptions, ParallelMode};
pub use pass::{RecomputeReport, recompute, recompute_for_nodes};
pub use quiver_graph::{
    Arrow, ArrowGeometry, ArrowId, Curve, Loop, LoopSide, Node, NodeId, Route, Scene,
};
