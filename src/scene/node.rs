use super::entity::Named;
use super::hook::TransformHook;
use crate::ik::JointConstraints;
use crate::math::Transform;
use glam::{Mat4, Vec3};
use std::cell::{Cell, RefCell};
use std::collections::BTreeSet;

/// Stable handle to a node inside a [`SceneGraph`](super::SceneGraph).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Guide wires written by the IK solver for debug drawing.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DebugGuides {
    pub target_dir: Vec3,
    pub end_effector_tip_dir: Vec3,
    pub local_pivot: Vec3,
    pub local_target: Vec3,
}

#[derive(Debug)]
pub struct SpatialNode {
    name: String,
    pub(crate) transform: Transform,
    pub(crate) joint: JointConstraints,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: BTreeSet<NodeId>,
    pub(crate) debug: DebugGuides,
    pub(crate) hook: RefCell<Option<Box<dyn TransformHook>>>,

    // caching
    pub(crate) world: Cell<Mat4>,
    pub(crate) normal: Cell<Mat4>,
    pub(crate) dirty_transform: Cell<bool>,
    pub(crate) dirty_normal_transform: Cell<bool>,
}

impl SpatialNode {
    pub fn new(name: impl Into<String>, transform: Transform) -> Self {
        Self {
            name: name.into(),
            transform,
            joint: JointConstraints::default(),
            parent: None,
            children: BTreeSet::new(),
            debug: DebugGuides::default(),
            hook: RefCell::new(None),
            world: Cell::new(Mat4::IDENTITY),
            normal: Cell::new(Mat4::IDENTITY),
            dirty_transform: Cell::new(true),
            dirty_normal_transform: Cell::new(true),
        }
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn joint(&self) -> &JointConstraints {
        &self.joint
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &BTreeSet<NodeId> {
        &self.children
    }

    pub fn debug_guides(&self) -> &DebugGuides {
        &self.debug
    }

    pub fn has_hook(&self) -> bool {
        self.hook.borrow().is_some()
    }

    pub(crate) fn mark_dirty_transform(&self) {
        self.dirty_transform.set(true);
        self.dirty_normal_transform.set(true);
    }
}

impl Named for SpatialNode {
    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: String) {
        self.name = name;
    }
}
