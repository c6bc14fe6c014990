//! # ik-scene
//!
//! A small 3D scene graph with lazily cached hierarchical transforms, per-joint
//! constraints and a Cyclic Coordinate Descent (CCD) inverse kinematics solver.
//!
//! ## Features
//! - Arena-backed node hierarchy with cycle rejection
//! - Cached world and normal transforms, invalidated down the hierarchy
//! - Revolute/prismatic joint limits and single-axis hinges
//! - CCD solver that respects those limits
//! - Boid-style steering on the same primitives
//!
//! ## Example
//! ```rust,ignore
//! use ik_scene::ik::{CcdConfig, CcdSolver};
//! use ik_scene::math::Transform;
//! use ik_scene::scene::SceneGraph;
//! use glam::Vec3;
//!
//! let mut graph = SceneGraph::new();
//! let shoulder = graph.add_node("shoulder");
//! let elbow = graph.add_child(shoulder, "elbow", Transform::from_origin(Vec3::X))?;
//! let hand = graph.add_child(elbow, "hand", Transform::from_origin(Vec3::X))?;
//!
//! let config = CcdConfig::new(20).with_accept_distance(0.01);
//! let result = CcdSolver::solve(&mut graph, hand, shoulder, Vec3::ZERO, Vec3::new(1.0, 1.0, 0.0), &config);
//! println!("Converged: {}, sweeps: {}", result.converged, result.sweeps);
//! ```

pub mod error;
pub mod ik;
pub mod math;
pub mod scene;
pub mod steering;

pub use error::{Result, SceneError};
pub use ik::{Arcball, CcdConfig, CcdSolver, IkChain, JointConstraints, JointType, SolveResult};
pub use math::{Axis, Transform};
pub use scene::{DebugGuides, Light, Named, NodeId, SceneGraph, SpatialNode, TransformHook};
pub use steering::BoidConfig;
