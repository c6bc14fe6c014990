use super::chain::IkChain;
use super::joint::JointType;
use crate::scene::{NodeId, SceneGraph};
use glam::{Quat, Vec3};
use log::{debug, trace};

#[derive(Debug, Clone, Copy)]
pub struct CcdConfig {
    /// Maximum number of sweeps over the chain.
    pub iterations: u32,
    /// Tip-to-target distance counted as success.
    pub accept_end_effector_distance: f32,
    /// Mean per-joint correction (degrees) below which a sweep counts as stalled.
    pub accept_avg_angle_distance: f32,
}

impl Default for CcdConfig {
    fn default() -> Self {
        Self {
            iterations: 10,
            accept_end_effector_distance: 0.001,
            accept_avg_angle_distance: 0.0001,
        }
    }
}

impl CcdConfig {
    pub fn new(iterations: u32) -> Self {
        Self {
            iterations,
            ..Default::default()
        }
    }

    pub fn with_accept_distance(mut self, distance: f32) -> Self {
        self.accept_end_effector_distance = distance;
        self
    }

    pub fn with_accept_avg_angle(mut self, degrees: f32) -> Self {
        self.accept_avg_angle_distance = degrees;
        self
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SolveResult {
    /// Whether the tip ended within the accepted distance of the target.
    pub converged: bool,
    pub sweeps: u32,
    pub final_distance: f32,
    /// World-space direction of the tip from the end effector's origin.
    pub end_effector_dir: Vec3,
}

/// Cyclic coordinate descent over a chain of scene nodes.
pub struct CcdSolver;

impl CcdSolver {
    pub fn solve(
        graph: &mut SceneGraph,
        end_effector: NodeId,
        root: NodeId,
        local_end_effector_tip: Vec3,
        target: Vec3,
        config: &CcdConfig,
    ) -> SolveResult {
        let chain = IkChain::new(graph, end_effector, root, local_end_effector_tip);
        Self::solve_chain(graph, &chain, target, config)
    }

    pub fn solve_chain(
        graph: &mut SceneGraph,
        chain: &IkChain,
        target: Vec3,
        config: &CcdConfig,
    ) -> SolveResult {
        let accept = config.accept_end_effector_distance;

        if chain.tip_position(graph).distance(target) < accept {
            return Self::finish(graph, chain, target, true, 0);
        }
        if chain.joints().is_empty() {
            return Self::finish(graph, chain, target, false, 0);
        }

        for sweep in 0..config.iterations {
            let mut total_correction = 0.0;
            let mut rotations = 0u32;

            for &joint in chain.joints() {
                let tip = chain.tip_position(graph);
                if tip.distance(target) < accept {
                    return Self::finish(graph, chain, target, true, sweep + 1);
                }

                match graph.joint(joint).joint_type {
                    JointType::Revolute => {
                        total_correction += Self::rotate_joint(graph, joint, tip, target);
                        rotations += 1;
                    }
                    JointType::Prismatic => Self::slide_joint(graph, joint, tip, target),
                }
            }

            if chain.tip_position(graph).distance(target) < accept {
                return Self::finish(graph, chain, target, true, sweep + 1);
            }

            if rotations > 0 {
                let average = total_correction / rotations as f32;
                trace!("sweep {}: mean correction {:.5} deg", sweep, average);
                if average < config.accept_avg_angle_distance {
                    debug!("ccd stalled after {} sweeps", sweep + 1);
                    return Self::finish(graph, chain, target, false, sweep + 1);
                }
            }
        }

        Self::finish(graph, chain, target, false, config.iterations)
    }

    /// Turns one revolute joint so the tip swings toward the target, then
    /// clamps it. Returns the rotation actually applied, in degrees.
    fn rotate_joint(graph: &mut SceneGraph, joint: NodeId, tip: Vec3, target: Vec3) -> f32 {
        let (target_in_plane, tip_in_plane) = if graph.joint(joint).is_hinge() {
            graph.project_to_plane_of_free_rotation(joint, target, tip)
        } else {
            (target, tip)
        };

        let abs_origin = graph.in_abs_system(joint, Vec3::ZERO);
        let local_target = graph.get_transform(joint).inverse().transform_point3(target);

        let Some(arc) = graph.arcball(joint, target_in_plane, tip_in_plane) else {
            return 0.0;
        };

        let before = graph.local_rotation(joint);
        graph.rotate_about(joint, arc.angle_delta, arc.local_pivot_dir);
        graph.apply_joint_constraints(joint);
        let after = graph.local_rotation(joint);

        let guides = graph.debug_guides_mut(joint);
        guides.target_dir = (target - abs_origin).normalize_or_zero();
        guides.end_effector_tip_dir = (tip - abs_origin).normalize_or_zero();
        guides.local_pivot = arc.local_pivot_dir;
        guides.local_target = local_target;

        rotation_angle_degrees(before, after)
    }

    /// Slides one prismatic joint by the tip's offset to the target, along its
    /// free axis when it has one, then clamps it.
    fn slide_joint(graph: &mut SceneGraph, joint: NodeId, tip: Vec3, target: Vec3) {
        let mut delta = target - tip;
        if let Some(axis) = graph.joint(joint).hinge {
            let parent_world = graph
                .get_parent(joint)
                .map(|parent| graph.get_transform(parent));
            let abs_axis = parent_world
                .map_or(axis.unit(), |world| world.transform_vector3(axis.unit()))
                .normalize_or_zero();
            delta = abs_axis * delta.dot(abs_axis);
        }

        let abs_origin = graph.in_abs_system(joint, Vec3::ZERO);
        let origin = graph.in_parent_system(joint, abs_origin + delta);
        graph.set_origin(joint, origin);
        graph.apply_joint_constraints(joint);

        let guides = graph.debug_guides_mut(joint);
        guides.target_dir = (target - abs_origin).normalize_or_zero();
        guides.end_effector_tip_dir = (tip - abs_origin).normalize_or_zero();
    }

    fn finish(
        graph: &SceneGraph,
        chain: &IkChain,
        target: Vec3,
        converged: bool,
        sweeps: u32,
    ) -> SolveResult {
        let tip = chain.tip_position(graph);
        let end_effector = chain.end_effector();
        let mut end_effector_dir = (tip - graph.in_abs_system(end_effector, Vec3::ZERO)).normalize_or_zero();
        if end_effector_dir == Vec3::ZERO {
            end_effector_dir = graph.get_abs_heading(end_effector);
        }
        let final_distance = tip.distance(target);
        debug!(
            "ccd finished: converged={} sweeps={} distance={:.4}",
            converged, sweeps, final_distance
        );

        SolveResult {
            converged,
            sweeps,
            final_distance,
            end_effector_dir,
        }
    }
}

/// Angle of the rotation taking `before` to `after`, accurate near zero.
fn rotation_angle_degrees(before: Quat, after: Quat) -> f32 {
    let delta = before.conjugate() * after;
    (2.0 * delta.xyz().length().atan2(delta.w.abs())).to_degrees()
}
