use glam::Mat4;
use std::any::Any;
use std::fmt::Debug;

/// Node-kind specific work run right after a node's world transform is recomputed.
pub trait TransformHook: Debug + Any {
    fn update_transform(&mut self, world: &Mat4);

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}
