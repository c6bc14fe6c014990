use crate::scene::{NodeId, SceneGraph};
use glam::Vec3;
use log::warn;

/// The joints between an end effector and a chain root, nearest-to-tip first.
///
/// The end effector itself is not a joint of its own chain; the root is.
#[derive(Debug, Clone)]
pub struct IkChain {
    end_effector: NodeId,
    root: NodeId,
    local_tip: Vec3,
    joints: Vec<NodeId>,
    complete: bool,
}

impl IkChain {
    /// Walks from `end_effector`'s parent up to and including `root`.
    ///
    /// If `root` is not an ancestor the walk stops at the hierarchy's top and
    /// the chain is flagged incomplete.
    pub fn new(graph: &SceneGraph, end_effector: NodeId, root: NodeId, local_tip: Vec3) -> Self {
        let mut joints = Vec::new();
        let mut complete = end_effector == root;
        if !complete {
            let mut current = graph.get_parent(end_effector);
            while let Some(joint) = current {
                joints.push(joint);
                if joint == root {
                    complete = true;
                    break;
                }
                current = graph.get_parent(joint);
            }
        }
        if !complete {
            warn!("{:?} is not an ancestor of end effector {:?}", root, end_effector);
        }

        Self {
            end_effector,
            root,
            local_tip,
            joints,
            complete,
        }
    }

    pub fn end_effector(&self) -> NodeId {
        self.end_effector
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn local_tip(&self) -> Vec3 {
        self.local_tip
    }

    pub fn joints(&self) -> &[NodeId] {
        &self.joints
    }

    pub fn joint_count(&self) -> usize {
        self.joints.len()
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn tip_position(&self, graph: &SceneGraph) -> Vec3 {
        graph.in_abs_system(self.end_effector, self.local_tip)
    }

    /// Sum of the current world-space link lengths from the root out to the tip.
    pub fn reach(&self, graph: &SceneGraph) -> f32 {
        let mut points: Vec<Vec3> = self
            .joints
            .iter()
            .rev()
            .map(|&joint| graph.in_abs_system(joint, Vec3::ZERO))
            .collect();
        points.push(self.tip_position(graph));
        points.windows(2).map(|w| (w[1] - w[0]).length()).sum()
    }
}
