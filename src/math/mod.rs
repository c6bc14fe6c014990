//! Math utilities module
//!
//! Provides convenient re-exports from glam plus Euler/degree helpers used by
//! the scene graph and the solvers.

pub mod angle;
mod transform;

pub use transform::{euler_from_quat_near, look_rotation, quat_from_euler, Transform};

// Re-export commonly used glam types
pub use glam::{BVec3, Mat3, Mat4, Quat, Vec3, Vec4};

/// One of the three local axes of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    pub fn unit(self) -> Vec3 {
        match self {
            Axis::X => Vec3::X,
            Axis::Y => Vec3::Y,
            Axis::Z => Vec3::Z,
        }
    }
}
