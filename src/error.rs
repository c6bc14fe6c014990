use thiserror::Error;

use crate::scene::NodeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SceneError {
    #[error("node {0:?} does not belong to this scene")]
    UnknownNode(NodeId),

    #[error("linking {node:?} under {parent:?} would make it its own ancestor")]
    Cycle { node: NodeId, parent: NodeId },
}

pub type Result<T> = std::result::Result<T, SceneError>;
