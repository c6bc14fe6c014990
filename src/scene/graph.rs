use super::entity::Named;
use super::hook::TransformHook;
use super::node::{DebugGuides, NodeId, SpatialNode};
use crate::error::{Result, SceneError};
use crate::ik::JointConstraints;
use crate::math::{euler_from_quat_near, look_rotation, Axis, Transform};
use glam::{Mat3, Mat4, Quat, Vec3};
use log::{debug, trace, warn};

/// Arena owning every node of a scene.
///
/// Nodes refer to each other only through [`NodeId`]s: a node's parent is a
/// weak back-reference and its children are non-owning. World and normal
/// transforms are cached per node and recomputed lazily on read.
///
/// Ids are never reused: a removed node leaves an empty slot behind, so a stale
/// id keeps failing lookups instead of aliasing a newer node.
#[derive(Debug, Default)]
pub struct SceneGraph {
    nodes: Vec<Option<SpatialNode>>,
    live: usize,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            live: 0,
        }
    }

    pub fn add_node(&mut self, name: impl Into<String>) -> NodeId {
        self.add_node_with(name, Transform::IDENTITY)
    }

    pub fn add_node_with(&mut self, name: impl Into<String>, transform: Transform) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Some(SpatialNode::new(name, transform)));
        self.live += 1;
        id
    }

    /// Adds a node and links it under `parent` in one step.
    pub fn add_child(
        &mut self,
        parent: NodeId,
        name: impl Into<String>,
        transform: Transform,
    ) -> Result<NodeId> {
        self.check(parent)?;
        let id = self.add_node_with(name, transform);
        self.link_parent(id, Some(parent), false)?;
        Ok(id)
    }

    /// Removes a node. Its children become roots; nothing is destroyed recursively.
    pub fn remove_node(&mut self, id: NodeId) -> Result<SpatialNode> {
        self.check(id)?;
        self.link_parent(id, None, false)?;
        self.unlink_children(id);
        let node = self.nodes[id.0].take().ok_or(SceneError::UnknownNode(id))?;
        self.live -= 1;
        Ok(node)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        matches!(self.nodes.get(id.0), Some(Some(_)))
    }

    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.is_some())
            .map(|(i, _)| NodeId(i))
    }

    pub fn find_by_name(&self, name: &str) -> Option<NodeId> {
        self.ids().find(|&id| self.node(id).name() == name)
    }

    pub fn set_name(&mut self, id: NodeId, name: impl Into<String>) {
        self.node_mut(id).set_name(name.into());
    }

    pub fn get(&self, id: NodeId) -> Option<&SpatialNode> {
        self.nodes.get(id.0).and_then(Option::as_ref)
    }

    /// # Panics
    /// If `id` was not issued by this graph or the node was removed.
    pub fn node(&self, id: NodeId) -> &SpatialNode {
        match self.nodes.get(id.0) {
            Some(Some(node)) => node,
            _ => panic!("unknown node {id:?}"),
        }
    }

    fn node_mut(&mut self, id: NodeId) -> &mut SpatialNode {
        match self.nodes.get_mut(id.0) {
            Some(Some(node)) => node,
            _ => panic!("unknown node {id:?}"),
        }
    }

    fn check(&self, id: NodeId) -> Result<()> {
        if self.contains(id) {
            Ok(())
        } else {
            Err(SceneError::UnknownNode(id))
        }
    }

    // basic features

    pub fn get_origin(&self, id: NodeId) -> Vec3 {
        self.node(id).transform.origin
    }

    pub fn get_euler(&self, id: NodeId) -> Vec3 {
        self.node(id).transform.euler
    }

    pub fn get_scale(&self, id: NodeId) -> Vec3 {
        self.node(id).transform.scale
    }

    pub fn set_origin(&mut self, id: NodeId, origin: Vec3) {
        self.modify_transform(id, |t| t.origin = origin);
    }

    pub fn set_euler(&mut self, id: NodeId, euler: Vec3) {
        self.modify_transform(id, |t| t.euler = euler);
    }

    pub fn set_scale(&mut self, id: NodeId, scale: Vec3) {
        self.modify_transform(id, |t| t.scale = scale);
    }

    pub fn set_transform(&mut self, id: NodeId, transform: Transform) {
        self.modify_transform(id, |t| *t = transform);
    }

    pub fn reset_transform(&mut self, id: NodeId) {
        self.set_transform(id, Transform::IDENTITY);
    }

    pub(crate) fn modify_transform(&mut self, id: NodeId, f: impl FnOnce(&mut Transform)) {
        let node = self.node_mut(id);
        let before = node.transform;
        f(&mut node.transform);
        if node.transform != before {
            self.mark_dirty(id);
        }
    }

    pub fn joint(&self, id: NodeId) -> &JointConstraints {
        &self.node(id).joint
    }

    pub fn joint_mut(&mut self, id: NodeId) -> &mut JointConstraints {
        &mut self.node_mut(id).joint
    }

    pub fn set_joint(&mut self, id: NodeId, joint: JointConstraints) {
        self.node_mut(id).joint = joint;
    }

    pub fn debug_guides(&self, id: NodeId) -> &DebugGuides {
        &self.node(id).debug
    }

    pub(crate) fn debug_guides_mut(&mut self, id: NodeId) -> &mut DebugGuides {
        &mut self.node_mut(id).debug
    }

    pub fn attach_hook(&mut self, id: NodeId, hook: Box<dyn TransformHook>) {
        let node = self.node_mut(id);
        *node.hook.get_mut() = Some(hook);
        self.mark_dirty(id);
    }

    /// Runs `f` against the node's hook if it is a `T`.
    pub fn with_hook<T, R, F>(&self, id: NodeId, f: F) -> Option<R>
    where
        T: TransformHook,
        F: FnOnce(&T) -> R,
    {
        // refresh first so the hook observes the current world transform
        self.get_transform(id);
        let hook = self.node(id).hook.borrow();
        let result = hook
            .as_ref()
            .and_then(|h| h.as_any().downcast_ref::<T>())
            .map(f);
        result
    }

    /// Runs `f` against the node's hook mutably if it is a `T`.
    pub fn with_hook_mut<T, R, F>(&mut self, id: NodeId, f: F) -> Option<R>
    where
        T: TransformHook,
        F: FnOnce(&mut T) -> R,
    {
        self.node_mut(id)
            .hook
            .get_mut()
            .as_mut()
            .and_then(|h| h.as_any_mut().downcast_mut::<T>())
            .map(f)
    }

    // caching

    /// Marks `id` and every descendant stale.
    pub(crate) fn mark_dirty(&self, id: NodeId) {
        let mut pending = vec![id];
        while let Some(current) = pending.pop() {
            let node = self.node(current);
            node.mark_dirty_transform();
            pending.extend(node.children.iter().copied());
        }
    }

    pub fn is_transform_dirty(&self, id: NodeId) -> bool {
        self.node(id).dirty_transform.get()
    }

    pub fn is_normal_transform_dirty(&self, id: NodeId) -> bool {
        self.node(id).dirty_normal_transform.get()
    }

    /// World transform of `id`, recomputed from the ancestors down when stale.
    pub fn get_transform(&self, id: NodeId) -> Mat4 {
        let node = self.node(id);
        if !node.dirty_transform.get() {
            return node.world.get();
        }
        let parent_world = match node.parent {
            Some(parent) => self.get_transform(parent),
            None => Mat4::IDENTITY,
        };
        let world = parent_world * node.transform.to_matrix();
        node.world.set(world);
        node.dirty_transform.set(false);
        if let Some(hook) = node.hook.borrow_mut().as_mut() {
            hook.update_transform(&world);
        }
        trace!("recomputed world transform of {:?} ({})", id, node.name());
        world
    }

    /// The node's own `T * R * S`, without ancestors.
    pub fn local_transform(&self, id: NodeId) -> Mat4 {
        self.node(id).transform.to_matrix()
    }

    /// `inverse(transpose(world))` of the upper 3x3, for transforming normals.
    pub fn get_normal_transform(&self, id: NodeId) -> Mat4 {
        let world = self.get_transform(id);
        let node = self.node(id);
        if !node.dirty_normal_transform.get() {
            return node.normal.get();
        }
        let basis = Mat3::from_mat4(world);
        let normal = if basis.determinant().abs() > f32::EPSILON {
            Mat4::from_mat3(basis.transpose().inverse())
        } else {
            Mat4::IDENTITY
        };
        node.normal.set(normal);
        node.dirty_normal_transform.set(false);
        normal
    }

    pub fn get_local_rotation_transform(&self, id: NodeId) -> Mat4 {
        self.node(id).transform.rotation_matrix()
    }

    /// Replaces the local rotation with the rotational part of `rotation`.
    pub fn set_local_rotation_transform(&mut self, id: NodeId, rotation: Mat4) {
        let (_, rotation, _) = rotation.to_scale_rotation_translation();
        self.set_local_rotation(id, rotation);
    }

    pub(crate) fn local_rotation(&self, id: NodeId) -> Quat {
        self.node(id).transform.rotation()
    }

    pub(crate) fn set_local_rotation(&mut self, id: NodeId, rotation: Quat) {
        self.modify_transform(id, |t| t.euler = euler_from_quat_near(rotation, t.euler));
    }

    // coordinate system conversions

    pub fn in_abs_system(&self, id: NodeId, local_point: Vec3) -> Vec3 {
        self.get_transform(id).transform_point3(local_point)
    }

    /// Maps a world-space point into the frame `id`'s origin is expressed in.
    pub fn in_parent_system(&self, id: NodeId, abs_point: Vec3) -> Vec3 {
        match self.node(id).parent {
            Some(parent) => self.get_transform(parent).inverse().transform_point3(abs_point),
            None => abs_point,
        }
    }

    /// Vector from `id`'s origin to `abs_point`, in the parent's frame.
    pub fn from_origin_in_parent_system(&self, id: NodeId, abs_point: Vec3) -> Vec3 {
        self.in_parent_system(id, abs_point) - self.get_origin(id)
    }

    /// World-space direction expressed in the node's local rotation frame (scale excluded).
    pub(crate) fn abs_direction_to_local(&self, id: NodeId, abs_dir: Vec3) -> Vec3 {
        let parent_dir = match self.node(id).parent {
            Some(parent) => self.get_transform(parent).inverse().transform_vector3(abs_dir),
            None => abs_dir,
        };
        (self.local_rotation(id).inverse() * parent_dir).normalize_or_zero()
    }

    pub fn get_abs_left_direction(&self, id: NodeId) -> Vec3 {
        self.get_transform(id).x_axis.truncate().normalize_or_zero()
    }

    pub fn get_abs_up_direction(&self, id: NodeId) -> Vec3 {
        self.get_transform(id).y_axis.truncate().normalize_or_zero()
    }

    pub fn get_abs_heading(&self, id: NodeId) -> Vec3 {
        self.get_transform(id).z_axis.truncate().normalize_or_zero()
    }

    pub fn get_abs_axis_endpoint(&self, id: NodeId, axis: Axis) -> Vec3 {
        self.in_abs_system(id, axis.unit())
    }

    // coordinate system operations

    /// Turns the node so its local heading (+Z) points at `local_target`.
    ///
    /// `local_target` lives in the same frame as the node's origin. Roll is
    /// resolved with `up_hint`, +Y when absent. Does nothing when the target
    /// coincides with the origin.
    pub fn point_at_local(&mut self, id: NodeId, local_target: Vec3, up_hint: Option<Vec3>) {
        let forward = local_target - self.get_origin(id);
        if let Some(rotation) = look_rotation(forward, up_hint.unwrap_or(Vec3::Y)) {
            self.set_local_rotation(id, rotation);
        }
    }

    /// Post-composes `rotation` onto the local rotation.
    pub fn rotate(&mut self, id: NodeId, rotation: Mat4) {
        let (_, delta, _) = rotation.to_scale_rotation_translation();
        let rotation = self.local_rotation(id) * delta;
        self.set_local_rotation(id, rotation);
    }

    /// Rotates by `angle_delta` degrees about `pivot`, an axis through the node's
    /// origin given in its local rotation frame.
    pub fn rotate_about(&mut self, id: NodeId, angle_delta: f32, pivot: Vec3) {
        let axis = pivot.normalize_or_zero();
        if axis.length_squared() < 1e-12 || angle_delta == 0.0 {
            return;
        }
        let rotation = self.local_rotation(id) * Quat::from_axis_angle(axis, angle_delta.to_radians());
        self.set_local_rotation(id, rotation);
    }

    // hierarchy related

    pub fn get_parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    pub fn get_children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.node(id).children.iter().copied()
    }

    /// True when `ancestor` is `id` itself or lies on its parent chain.
    pub fn is_ancestor(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = self.node(node).parent;
        }
        false
    }

    /// Moves `id` under `new_parent`, or makes it a root when `None`.
    ///
    /// With `keep_transform` the local origin, euler and scale are re-derived so
    /// the world pose survives the move. Linking under a descendant (or itself)
    /// is rejected and leaves the hierarchy untouched.
    pub fn link_parent(
        &mut self,
        id: NodeId,
        new_parent: Option<NodeId>,
        keep_transform: bool,
    ) -> Result<()> {
        self.check(id)?;
        if let Some(parent) = new_parent {
            self.check(parent)?;
            if self.is_ancestor(id, parent) {
                warn!("rejected link of {:?} under {:?}: cycle", id, parent);
                return Err(SceneError::Cycle { node: id, parent });
            }
        }

        let old_world = keep_transform.then(|| self.get_transform(id));

        if let Some(old_parent) = self.node_mut(id).parent.take() {
            self.node_mut(old_parent).children.remove(&id);
        }
        if let Some(parent) = new_parent {
            self.node_mut(parent).children.insert(id);
        }
        self.node_mut(id).parent = new_parent;

        if let Some(old_world) = old_world {
            let parent_world = new_parent.map_or(Mat4::IDENTITY, |p| self.get_transform(p));
            let local = parent_world.inverse() * old_world;
            let previous = self.get_euler(id);
            self.node_mut(id).transform = Transform::from_matrix_near(&local, previous);
        }
        self.mark_dirty(id);

        debug!("linked {:?} under {:?}", id, new_parent);
        Ok(())
    }

    /// Detaches every child of `id`; the children become roots and are not destroyed.
    pub fn unlink_children(&mut self, id: NodeId) {
        let children = std::mem::take(&mut self.node_mut(id).children);
        for child in children {
            self.node_mut(child).parent = None;
            self.mark_dirty(child);
        }
    }
}
