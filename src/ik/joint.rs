use crate::math::Axis;
use glam::{BVec3, Vec3};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JointType {
    /// Rotates; limits act on the euler angles (degrees).
    #[default]
    Revolute,
    /// Slides; limits act on the origin (scene units).
    Prismatic,
}

/// Per-node joint limits.
///
/// `hinge` restricts motion to a single axis, `enabled` selects which axes are
/// clamped to `center ± max_deviation`. Both may apply at once.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JointConstraints {
    pub joint_type: JointType,
    pub enabled: BVec3,
    pub center: Vec3,
    pub max_deviation: Vec3,
    pub hinge: Option<Axis>,
}

impl Default for JointConstraints {
    fn default() -> Self {
        Self {
            joint_type: JointType::Revolute,
            enabled: BVec3::FALSE,
            center: Vec3::ZERO,
            max_deviation: Vec3::ZERO,
            hinge: None,
        }
    }
}

impl JointConstraints {
    pub fn revolute() -> Self {
        Self::default()
    }

    pub fn prismatic() -> Self {
        Self {
            joint_type: JointType::Prismatic,
            ..Self::default()
        }
    }

    pub fn hinge(axis: Axis) -> Self {
        Self::default().with_hinge(axis)
    }

    pub fn with_hinge(mut self, axis: Axis) -> Self {
        self.hinge = Some(axis);
        self
    }

    pub fn with_center(mut self, center: Vec3) -> Self {
        self.center = center;
        self
    }

    /// Enables the clamp on `axis` around `center` with the given deviation.
    pub fn with_limit(mut self, axis: Axis, center: f32, max_deviation: f32) -> Self {
        self.set_limit(axis, center, max_deviation);
        self
    }

    pub fn set_limit(&mut self, axis: Axis, center: f32, max_deviation: f32) {
        let i = axis.index();
        *enabled_flag(&mut self.enabled, axis) = true;
        self.center[i] = center;
        self.max_deviation[i] = max_deviation.abs();
    }

    pub fn clear_limit(&mut self, axis: Axis) {
        *enabled_flag(&mut self.enabled, axis) = false;
    }

    pub fn is_hinge(&self) -> bool {
        self.hinge.is_some()
    }

    pub fn is_axis_enabled(&self, axis: Axis) -> bool {
        match axis {
            Axis::X => self.enabled.x,
            Axis::Y => self.enabled.y,
            Axis::Z => self.enabled.z,
        }
    }

    pub fn is_constrained(&self) -> bool {
        self.is_hinge() || self.enabled.any()
    }
}

fn enabled_flag(enabled: &mut BVec3, axis: Axis) -> &mut bool {
    match axis {
        Axis::X => &mut enabled.x,
        Axis::Y => &mut enabled.y,
        Axis::Z => &mut enabled.z,
    }
}
