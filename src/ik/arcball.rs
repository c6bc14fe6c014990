use super::joint::JointType;
use crate::math::angle::angle_between_degrees;
use crate::math::Axis;
use crate::scene::{NodeId, SceneGraph};
use glam::{Quat, Vec3};

const MIN_ANGLE_DEGREES: f32 = 1e-4;

/// Rotation about a node's origin taking one point's direction onto another's.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arcball {
    /// Unit axis in the node's local rotation frame.
    pub local_pivot_dir: Vec3,
    /// Degrees, always positive; the sign lives in the pivot direction.
    pub angle_delta: f32,
}

impl SceneGraph {
    /// Rotation that, applied with [`SceneGraph::rotate_about`], swings
    /// `abs_reference_point` onto the ray from the node's origin toward `abs_target`.
    ///
    /// `None` when either point coincides with the origin or the two are already aligned.
    pub fn arcball(&self, id: NodeId, abs_target: Vec3, abs_reference_point: Vec3) -> Option<Arcball> {
        let abs_origin = self.in_abs_system(id, Vec3::ZERO);
        let target_dir = (abs_target - abs_origin).normalize_or_zero();
        let reference_dir = (abs_reference_point - abs_origin).normalize_or_zero();
        if target_dir == Vec3::ZERO || reference_dir == Vec3::ZERO {
            return None;
        }

        let angle_delta = angle_between_degrees(reference_dir, target_dir);
        if angle_delta < MIN_ANGLE_DEGREES {
            return None;
        }

        let mut abs_pivot = reference_dir.cross(target_dir);
        if abs_pivot.length_squared() < 1e-12 {
            // opposite directions: any perpendicular axis works
            abs_pivot = reference_dir.any_orthonormal_vector();
        }

        let local_pivot_dir = self.abs_direction_to_local(id, abs_pivot);
        if local_pivot_dir == Vec3::ZERO {
            return None;
        }
        Some(Arcball {
            local_pivot_dir,
            angle_delta,
        })
    }

    /// World-space axis a revolute hinge is free to turn about.
    ///
    /// The axes other than the hinge are taken at their constraint center,
    /// which is where the hinge restriction keeps them.
    pub fn abs_hinge_axis(&self, id: NodeId) -> Option<Vec3> {
        let joint = self.joint(id);
        if joint.joint_type != JointType::Revolute {
            return None;
        }
        let hinge = joint.hinge?;
        let center = joint.center;
        let parent_axis = match hinge {
            Axis::X => {
                Quat::from_rotation_z(center.z.to_radians())
                    * Quat::from_rotation_y(center.y.to_radians())
                    * Vec3::X
            }
            Axis::Y => Quat::from_rotation_z(center.z.to_radians()) * Vec3::Y,
            Axis::Z => Vec3::Z,
        };
        let abs_axis = match self.get_parent(id) {
            Some(parent) => self.get_transform(parent).transform_vector3(parent_axis),
            None => parent_axis,
        };
        let abs_axis = abs_axis.normalize_or_zero();
        (abs_axis != Vec3::ZERO).then_some(abs_axis)
    }

    /// Projects `target` and `end_effector_tip` onto the plane through the
    /// node's origin perpendicular to its hinge axis. Points pass through
    /// unchanged for nodes that are not revolute hinges.
    pub fn project_to_plane_of_free_rotation(
        &self,
        id: NodeId,
        target: Vec3,
        end_effector_tip: Vec3,
    ) -> (Vec3, Vec3) {
        let Some(normal) = self.abs_hinge_axis(id) else {
            return (target, end_effector_tip);
        };
        let origin = self.in_abs_system(id, Vec3::ZERO);
        let project = |p: Vec3| p - normal * (p - origin).dot(normal);
        (project(target), project(end_effector_tip))
    }
}
