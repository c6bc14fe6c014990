//! Scene graph module
//!
//! An arena of spatial nodes with parent/child links and lazily cached world
//! transforms.

pub mod entity;
mod graph;
pub mod hook;
pub mod light;
mod node;

pub use entity::Named;
pub use graph::SceneGraph;
pub use hook::TransformHook;
pub use light::Light;
pub use node::{DebugGuides, NodeId, SpatialNode};
