use crate::scene::{NodeId, SceneGraph};
use glam::Vec3;

#[derive(Debug, Clone, Copy)]
pub struct BoidConfig {
    /// Distance travelled along the heading per update.
    pub forward_speed: f32,
    /// Largest turn per update, in degrees.
    pub angle_delta: f32,
    /// Within this distance of the target the heading is left alone.
    pub avoid_radius: f32,
}

impl Default for BoidConfig {
    fn default() -> Self {
        Self {
            forward_speed: 0.1,
            angle_delta: 5.0,
            avoid_radius: 0.5,
        }
    }
}

impl BoidConfig {
    pub fn new(forward_speed: f32, angle_delta: f32) -> Self {
        Self {
            forward_speed,
            angle_delta,
            ..Default::default()
        }
    }

    pub fn with_avoid_radius(mut self, avoid_radius: f32) -> Self {
        self.avoid_radius = avoid_radius;
        self
    }
}

impl SceneGraph {
    /// One steering tick: turn the heading toward `target` by at most
    /// `angle_delta` degrees, then move `forward_speed` along it.
    pub fn update_boid(
        &mut self,
        id: NodeId,
        target: Vec3,
        forward_speed: f32,
        angle_delta: f32,
        avoid_radius: f32,
    ) {
        let abs_origin = self.in_abs_system(id, Vec3::ZERO);

        if abs_origin.distance(target) > avoid_radius {
            let heading = self.get_abs_heading(id);
            if let Some(arc) = self.arcball(id, target, abs_origin + heading) {
                let turn = arc.angle_delta.min(angle_delta.abs());
                self.rotate_about(id, turn, arc.local_pivot_dir);
            }
        }

        let heading = self.get_abs_heading(id);
        let origin = self.in_parent_system(id, abs_origin + heading * forward_speed);
        self.set_origin(id, origin);
    }

    pub fn update_boid_with(&mut self, id: NodeId, target: Vec3, config: &BoidConfig) {
        self.update_boid(
            id,
            target,
            config.forward_speed,
            config.angle_delta,
            config.avoid_radius,
        );
    }
}
