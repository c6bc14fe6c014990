use glam::Vec3;
use ik_scene::ik::{CcdConfig, CcdSolver, IkChain, JointConstraints};
use ik_scene::math::{Axis, Transform};
use ik_scene::scene::{NodeId, SceneGraph};
use ik_scene::steering::BoidConfig;
use ik_scene::Result;

const TICKS: u32 = 120;

struct App {
    graph: SceneGraph,
    chain: IkChain,
    boid: NodeId,
    config: CcdConfig,
    boid_config: BoidConfig,
}

impl App {
    fn new() -> Result<Self> {
        let mut graph = SceneGraph::new();

        let base = graph.add_node("base");
        graph.set_joint(base, JointConstraints::hinge(Axis::Y));

        let shoulder = graph.add_child(base, "shoulder", Transform::from_origin(Vec3::new(0.0, 1.0, 0.0)))?;
        graph.set_joint(
            shoulder,
            JointConstraints::hinge(Axis::Z).with_limit(Axis::Z, 0.0, 100.0),
        );

        let elbow = graph.add_child(shoulder, "elbow", Transform::from_origin(Vec3::new(0.0, 1.5, 0.0)))?;
        graph.set_joint(
            elbow,
            JointConstraints::hinge(Axis::Z).with_limit(Axis::Z, 0.0, 135.0),
        );

        let wrist = graph.add_child(elbow, "wrist", Transform::from_origin(Vec3::new(0.0, 1.5, 0.0)))?;
        let hand = graph.add_child(wrist, "hand", Transform::from_origin(Vec3::new(0.0, 0.5, 0.0)))?;

        let chain = IkChain::new(&graph, hand, base, Vec3::ZERO);
        log::info!(
            "arm: {} joints, reach {:.2}",
            chain.joint_count(),
            chain.reach(&graph)
        );

        let boid = graph.add_node_with("boid", Transform::from_origin(Vec3::new(-4.0, 0.0, -4.0)));

        Ok(Self {
            graph,
            chain,
            boid,
            config: CcdConfig::new(20)
                .with_accept_distance(0.01)
                .with_accept_avg_angle(0.001),
            boid_config: BoidConfig::new(0.08, 6.0).with_avoid_radius(0.3),
        })
    }

    fn target(tick: u32) -> Vec3 {
        let t = tick as f32 * 0.05;
        Vec3::new(2.0 * t.cos(), 1.5 + 0.75 * (2.0 * t).sin(), 2.0 * t.sin())
    }

    fn update(&mut self, tick: u32) {
        let target = Self::target(tick);
        let result = CcdSolver::solve_chain(&mut self.graph, &self.chain, target, &self.config);
        if tick % 20 == 0 {
            log::info!(
                "tick {:3}: target {:?} converged={} sweeps={} distance={:.4}",
                tick,
                target,
                result.converged,
                result.sweeps,
                result.final_distance
            );
        }

        self.graph.update_boid_with(self.boid, target, &self.boid_config);
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let mut app = App::new()?;
    for tick in 0..TICKS {
        app.update(tick);
    }

    let boid_position = app.graph.in_abs_system(app.boid, Vec3::ZERO);
    log::info!("boid ended at {:?}", boid_position);
    Ok(())
}
