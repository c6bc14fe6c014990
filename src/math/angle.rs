/// Wraps an angle in degrees into `(-180, 180]`.
pub fn wrap_degrees(angle: f32) -> f32 {
    let wrapped = (angle + 180.0).rem_euclid(360.0) - 180.0;
    if wrapped <= -180.0 {
        wrapped + 360.0
    } else {
        wrapped
    }
}

/// Signed shortest-path difference `to - from`, in degrees.
pub fn shortest_delta(from: f32, to: f32) -> f32 {
    wrap_degrees(to - from)
}

/// Clamps `angle` to `center ± max_deviation`, measuring along the shortest arc.
///
/// The returned value stays on the same winding as `center`, so applying the
/// clamp twice gives the same result.
pub fn clamp_deviation(angle: f32, center: f32, max_deviation: f32) -> f32 {
    let max_deviation = max_deviation.abs();
    let delta = shortest_delta(center, angle);
    if delta.abs() <= max_deviation && (angle - center).abs() <= 180.0 {
        return angle;
    }
    center + delta.clamp(-max_deviation, max_deviation)
}

/// Re-expresses `angle` on the winding closest to `center`.
pub fn wrap_toward(angle: f32, center: f32) -> f32 {
    if (angle - center).abs() <= 180.0 {
        angle
    } else {
        center + shortest_delta(center, angle)
    }
}

/// Unsigned angle between two directions in degrees, 0 for degenerate input.
pub fn angle_between_degrees(a: glam::Vec3, b: glam::Vec3) -> f32 {
    if a.length_squared() < 1e-12 || b.length_squared() < 1e-12 {
        return 0.0;
    }
    a.angle_between(b).to_degrees()
}
