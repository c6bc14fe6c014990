use super::graph::SceneGraph;
use super::hook::TransformHook;
use super::node::NodeId;
use crate::math::Transform;
use glam::{Mat4, Vec3};
use std::any::Any;

/// Point light attached to a scene node; tracks where the node sits in the world.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub color: Vec3,
    pub enabled: bool,
    abs_position: Vec3,
}

impl Light {
    pub fn new(color: Vec3) -> Self {
        Self {
            color,
            enabled: true,
            abs_position: Vec3::ZERO,
        }
    }

    pub fn abs_position(&self) -> Vec3 {
        self.abs_position
    }
}

impl Default for Light {
    fn default() -> Self {
        Self::new(Vec3::ONE)
    }
}

impl TransformHook for Light {
    fn update_transform(&mut self, world: &Mat4) {
        self.abs_position = world.transform_point3(Vec3::ZERO);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl SceneGraph {
    pub fn add_light(&mut self, name: impl Into<String>, origin: Vec3, color: Vec3) -> NodeId {
        let id = self.add_node_with(name, Transform::from_origin(origin));
        self.attach_hook(id, Box::new(Light::new(color)));
        id
    }

    pub fn light(&self, id: NodeId) -> Option<Light> {
        self.with_hook(id, |light: &Light| *light)
    }

    /// Returns false when `id` carries no light.
    pub fn set_light_enabled(&mut self, id: NodeId, enabled: bool) -> bool {
        self.with_hook_mut(id, |light: &mut Light| light.enabled = enabled)
            .is_some()
    }

    /// Returns false when `id` carries no light.
    pub fn set_light_color(&mut self, id: NodeId, color: Vec3) -> bool {
        self.with_hook_mut(id, |light: &mut Light| light.color = color)
            .is_some()
    }
}
