use super::joint::{JointConstraints, JointType};
use crate::math::angle::{clamp_deviation, wrap_toward};
use crate::math::{Axis, Transform};
use crate::scene::{NodeId, SceneGraph};

impl JointConstraints {
    fn limited_values<'a>(&self, transform: &'a mut Transform) -> &'a mut glam::Vec3 {
        match self.joint_type {
            JointType::Revolute => &mut transform.euler,
            JointType::Prismatic => &mut transform.origin,
        }
    }

    fn clamp_axis(&self, value: f32, axis: Axis) -> f32 {
        let i = axis.index();
        let center = self.center[i];
        let max_deviation = self.max_deviation[i].abs();
        match self.joint_type {
            JointType::Revolute => clamp_deviation(value, center, max_deviation),
            JointType::Prismatic => value.clamp(center - max_deviation, center + max_deviation),
        }
    }

    /// Snaps the two axes other than the hinge axis back to the center.
    pub fn apply_perpendicular_to_plane(&self, transform: &mut Transform) {
        let Some(hinge) = self.hinge else {
            return;
        };
        let center = self.center;
        let values = self.limited_values(transform);
        for axis in Axis::ALL {
            if axis != hinge {
                values[axis.index()] = center[axis.index()];
            }
        }
    }

    /// Keeps the hinge axis value on the shortest path from the center and
    /// clamps it when that axis is limited.
    pub fn apply_within_plane(&self, transform: &mut Transform) {
        let Some(hinge) = self.hinge else {
            return;
        };
        let i = hinge.index();
        let center = self.center[i];
        let enabled = self.is_axis_enabled(hinge);
        let joint_type = self.joint_type;
        let mut value = self.limited_values(transform)[i];
        if joint_type == JointType::Revolute {
            value = wrap_toward(value, center);
        }
        if enabled {
            value = self.clamp_axis(value, hinge);
        }
        self.limited_values(transform)[i] = value;
    }

    /// Hinge restriction first, then each enabled axis clamp. Idempotent.
    pub fn apply(&self, transform: &mut Transform) {
        if self.is_hinge() {
            self.apply_perpendicular_to_plane(transform);
            self.apply_within_plane(transform);
        }
        for axis in Axis::ALL {
            if self.is_axis_enabled(axis) {
                let value = self.limited_values(transform)[axis.index()];
                self.limited_values(transform)[axis.index()] = self.clamp_axis(value, axis);
            }
        }
    }
}

impl SceneGraph {
    pub fn apply_hinge_constraints_perpendicular_to_plane_of_free_rotation(&mut self, id: NodeId) {
        let joint = *self.joint(id);
        self.modify_transform(id, |t| joint.apply_perpendicular_to_plane(t));
    }

    pub fn apply_hinge_constraints_within_plane_of_free_rotation(&mut self, id: NodeId) {
        let joint = *self.joint(id);
        self.modify_transform(id, |t| joint.apply_within_plane(t));
    }

    pub fn apply_joint_constraints(&mut self, id: NodeId) {
        let joint = *self.joint(id);
        if joint.is_constrained() {
            self.modify_transform(id, |t| joint.apply(t));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn hinge_snaps_other_axes_to_center() {
        let joint = JointConstraints::hinge(Axis::Y).with_center(Vec3::new(5.0, 0.0, -7.0));
        let mut t = Transform::from_origin_euler(Vec3::ZERO, Vec3::new(40.0, 300.0, 12.0));
        joint.apply(&mut t);
        assert_eq!(t.euler.x, 5.0);
        assert_eq!(t.euler.z, -7.0);
        assert!((t.euler.y + 60.0).abs() < 1e-4);
    }

    #[test]
    fn prismatic_clamps_origin() {
        let joint = JointConstraints::prismatic()
            .with_hinge(Axis::X)
            .with_limit(Axis::X, 1.0, 0.5);
        let mut t = Transform::from_origin(Vec3::new(3.0, 2.0, -1.0));
        joint.apply(&mut t);
        assert_eq!(t.origin, Vec3::new(1.5, 0.0, 0.0));
        assert_eq!(t.euler, Vec3::ZERO);
    }

    #[test]
    fn unconstrained_joint_is_untouched() {
        let joint = JointConstraints::revolute();
        let mut t = Transform::from_origin_euler(Vec3::ONE, Vec3::new(400.0, -270.0, 33.0));
        let before = t;
        joint.apply(&mut t);
        assert_eq!(t, before);
    }
}
