use glam::{Mat3, Mat4, Quat, Vec3};

use super::angle::{shortest_delta, wrap_degrees};

/// Local transform state of a node: translation, Euler angles in degrees and scale.
///
/// The rotation is `Rz(euler.z) * Ry(euler.y) * Rx(euler.x)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub origin: Vec3,
    pub euler: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self {
        origin: Vec3::ZERO,
        euler: Vec3::ZERO,
        scale: Vec3::ONE,
    };

    pub fn new(origin: Vec3, euler: Vec3, scale: Vec3) -> Self {
        Self {
            origin,
            euler,
            scale,
        }
    }

    pub fn from_origin(origin: Vec3) -> Self {
        Self {
            origin,
            ..Self::IDENTITY
        }
    }

    pub fn from_origin_euler(origin: Vec3, euler: Vec3) -> Self {
        Self {
            origin,
            euler,
            scale: Vec3::ONE,
        }
    }

    pub fn rotation(&self) -> Quat {
        quat_from_euler(self.euler)
    }

    pub fn rotation_matrix(&self) -> Mat4 {
        Mat4::from_quat(self.rotation())
    }

    /// `T(origin) * R(euler) * S(scale)`
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation(), self.origin)
    }

    /// Decomposes an affine matrix, picking the Euler solution nearest `previous_euler`.
    pub fn from_matrix_near(matrix: &Mat4, previous_euler: Vec3) -> Self {
        let (scale, rotation, origin) = matrix.to_scale_rotation_translation();
        Self {
            origin,
            euler: euler_from_quat_near(rotation, previous_euler),
            scale,
        }
    }
}

pub fn quat_from_euler(euler: Vec3) -> Quat {
    Quat::from_rotation_z(euler.z.to_radians())
        * Quat::from_rotation_y(euler.y.to_radians())
        * Quat::from_rotation_x(euler.x.to_radians())
}

/// Euler angles (degrees) of `rotation`, choosing among the equivalent
/// decompositions the one closest to `previous`, on `previous`'s winding.
pub fn euler_from_quat_near(rotation: Quat, previous: Vec3) -> Vec3 {
    let m = Mat3::from_quat(rotation.normalize());
    let sin_y = -m.x_axis.z;
    let cos_y = m.x_axis.x.hypot(m.x_axis.y);
    let y = sin_y.atan2(cos_y);

    let primary = if cos_y < 1e-4 {
        // gimbal lock: only x - z (or x + z) is determined, keep x from previous
        let x = previous.x.to_radians();
        let z = if sin_y > 0.0 {
            x - m.y_axis.x.atan2(m.y_axis.y)
        } else {
            (-m.y_axis.x).atan2(m.y_axis.y) - x
        };
        Vec3::new(x, y, z)
    } else {
        let x = m.y_axis.z.atan2(m.z_axis.z);
        let z = m.x_axis.y.atan2(m.x_axis.x);
        Vec3::new(x, y, z)
    };

    let primary = Vec3::new(
        primary.x.to_degrees(),
        primary.y.to_degrees(),
        primary.z.to_degrees(),
    );
    let alternate = Vec3::new(
        wrap_degrees(primary.x + 180.0),
        wrap_degrees(180.0 - primary.y),
        wrap_degrees(primary.z + 180.0),
    );

    let unwind = |candidate: Vec3| {
        Vec3::new(
            previous.x + shortest_delta(previous.x, candidate.x),
            previous.y + shortest_delta(previous.y, candidate.y),
            previous.z + shortest_delta(previous.z, candidate.z),
        )
    };
    let a = unwind(primary);
    let b = unwind(alternate);
    if (a - previous).abs().element_sum() <= (b - previous).abs().element_sum() {
        a
    } else {
        b
    }
}

/// Rotation whose +Z axis points along `forward`, with +Y as close to `up` as possible.
pub fn look_rotation(forward: Vec3, up: Vec3) -> Option<Quat> {
    let forward = forward.normalize_or_zero();
    if forward.length_squared() < 1e-12 {
        return None;
    }
    let mut left = up.cross(forward);
    if left.length_squared() < 1e-12 {
        left = forward.any_orthonormal_vector().cross(forward);
    }
    let left = left.normalize();
    let up = forward.cross(left);
    Some(Quat::from_mat3(&Mat3::from_cols(left, up, forward)))
}
