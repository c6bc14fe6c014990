use glam::{Mat4, Vec3};
use ik_scene::math::{Axis, Transform};
use ik_scene::scene::{Named, SceneGraph};
use ik_scene::SceneError;

#[test]
fn link_parent_records_both_directions() {
    let mut graph = SceneGraph::new();
    let a = graph.add_node("a");
    let b = graph.add_node("b");

    graph.link_parent(b, Some(a), false).unwrap();
    assert_eq!(graph.get_parent(b), Some(a));
    assert_eq!(graph.get_children(a).collect::<Vec<_>>(), vec![b]);

    graph.link_parent(b, None, false).unwrap();
    assert_eq!(graph.get_parent(b), None);
    assert_eq!(graph.get_children(a).count(), 0);
}

#[test]
fn relinking_moves_child_between_parents() {
    let mut graph = SceneGraph::new();
    let a = graph.add_node("a");
    let b = graph.add_node("b");
    let c = graph.add_child(a, "c", Transform::IDENTITY).unwrap();

    graph.link_parent(c, Some(b), false).unwrap();
    assert_eq!(graph.get_parent(c), Some(b));
    assert_eq!(graph.get_children(a).count(), 0);
    assert_eq!(graph.get_children(b).collect::<Vec<_>>(), vec![c]);
}

#[test]
fn cycle_is_rejected_and_hierarchy_unchanged() {
    let mut graph = SceneGraph::new();
    let a = graph.add_node("a");
    let b = graph.add_node("b");
    let c = graph.add_node("c");

    graph.link_parent(a, Some(b), false).unwrap();
    graph.link_parent(b, Some(c), false).unwrap();

    assert_eq!(
        graph.link_parent(b, Some(a), false),
        Err(SceneError::Cycle { node: b, parent: a })
    );
    assert_eq!(
        graph.link_parent(c, Some(a), true),
        Err(SceneError::Cycle { node: c, parent: a })
    );
    assert_eq!(
        graph.link_parent(a, Some(a), false),
        Err(SceneError::Cycle { node: a, parent: a })
    );

    assert_eq!(graph.get_parent(a), Some(b));
    assert_eq!(graph.get_parent(b), Some(c));
    assert_eq!(graph.get_parent(c), None);
    assert_eq!(graph.get_children(a).count(), 0);
    assert_eq!(graph.get_children(b).collect::<Vec<_>>(), vec![a]);
    assert_eq!(graph.get_children(c).collect::<Vec<_>>(), vec![b]);
}

#[test]
fn unknown_node_is_reported() {
    let mut graph = SceneGraph::new();
    let a = graph.add_node("a");
    let gone = graph.add_node("gone");
    graph.remove_node(gone).unwrap();
    assert_eq!(
        graph.link_parent(a, Some(gone), false),
        Err(SceneError::UnknownNode(gone))
    );
    assert_eq!(graph.get_parent(a), None);
}

#[test]
fn keep_transform_preserves_world_pose() {
    let mut graph = SceneGraph::new();
    let parent = graph.add_node_with(
        "parent",
        Transform::new(
            Vec3::new(2.0, -1.0, 3.0),
            Vec3::new(15.0, 60.0, -30.0),
            Vec3::splat(2.0),
        ),
    );
    let node = graph.add_node_with(
        "node",
        Transform::from_origin_euler(Vec3::new(1.0, 1.0, 0.0), Vec3::new(0.0, 45.0, 10.0)),
    );
    let before = graph.get_transform(node);

    graph.link_parent(node, Some(parent), true).unwrap();
    let after = graph.get_transform(node);
    assert!(after.abs_diff_eq(before, 1e-4), "{before:?} vs {after:?}");
    assert!(graph.get_scale(node).abs_diff_eq(Vec3::splat(0.5), 1e-4));

    graph.link_parent(node, None, true).unwrap();
    assert!(graph.get_transform(node).abs_diff_eq(before, 1e-4));
    assert!(graph.get_origin(node).abs_diff_eq(Vec3::new(1.0, 1.0, 0.0), 1e-4));
}

#[test]
fn without_keep_transform_local_values_are_kept() {
    let mut graph = SceneGraph::new();
    let parent = graph.add_node_with("parent", Transform::from_origin(Vec3::new(0.0, 4.0, 0.0)));
    let node = graph.add_node_with("node", Transform::from_origin(Vec3::X));

    graph.link_parent(node, Some(parent), false).unwrap();
    assert_eq!(graph.get_origin(node), Vec3::X);
    assert!(graph
        .in_abs_system(node, Vec3::ZERO)
        .abs_diff_eq(Vec3::new(1.0, 4.0, 0.0), 1e-6));
}

#[test]
fn unlink_children_orphans_without_destroying() {
    let mut graph = SceneGraph::new();
    let root = graph.add_node_with("root", Transform::from_origin(Vec3::Y));
    let a = graph.add_child(root, "a", Transform::from_origin(Vec3::X)).unwrap();
    let b = graph.add_child(root, "b", Transform::from_origin(Vec3::Z)).unwrap();
    assert!(graph.in_abs_system(a, Vec3::ZERO).abs_diff_eq(Vec3::new(1.0, 1.0, 0.0), 1e-6));

    graph.unlink_children(root);
    assert_eq!(graph.get_children(root).count(), 0);
    assert_eq!(graph.get_parent(a), None);
    assert_eq!(graph.get_parent(b), None);
    assert!(graph.contains(a) && graph.contains(b));
    assert!(graph.in_abs_system(a, Vec3::ZERO).abs_diff_eq(Vec3::X, 1e-6));
}

#[test]
fn coordinate_conversions_round_trip() {
    let mut graph = SceneGraph::new();
    let parent = graph.add_node_with(
        "parent",
        Transform::from_origin_euler(Vec3::new(0.0, 5.0, 0.0), Vec3::new(0.0, 90.0, 0.0)),
    );
    let child = graph.add_child(parent, "child", Transform::from_origin(Vec3::X)).unwrap();

    let abs = graph.in_abs_system(child, Vec3::ZERO);
    assert!(abs.abs_diff_eq(Vec3::new(0.0, 5.0, -1.0), 1e-5), "{abs:?}");
    assert!(graph.in_parent_system(child, abs).abs_diff_eq(Vec3::X, 1e-5));
    assert!(graph
        .from_origin_in_parent_system(child, abs)
        .abs_diff_eq(Vec3::ZERO, 1e-5));
    assert!(graph
        .from_origin_in_parent_system(child, Vec3::new(0.0, 6.0, -1.0))
        .abs_diff_eq(Vec3::Y, 1e-5));

    assert!(graph.get_abs_heading(child).abs_diff_eq(Vec3::X, 1e-5));
    assert!(graph.get_abs_up_direction(child).abs_diff_eq(Vec3::Y, 1e-5));
    assert!(graph.get_abs_left_direction(child).abs_diff_eq(-Vec3::Z, 1e-5));
    assert!(graph
        .get_abs_axis_endpoint(child, Axis::Y)
        .abs_diff_eq(Vec3::new(0.0, 6.0, -1.0), 1e-5));
}

#[test]
fn point_at_local_turns_heading() {
    let mut graph = SceneGraph::new();
    let node = graph.add_node_with("eye", Transform::from_origin(Vec3::new(1.0, 0.0, 0.0)));

    graph.point_at_local(node, Vec3::new(4.0, 0.0, 0.0), None);
    assert!(graph.get_abs_heading(node).abs_diff_eq(Vec3::X, 1e-5));
    assert!(graph.get_abs_up_direction(node).abs_diff_eq(Vec3::Y, 1e-5));

    graph.point_at_local(node, Vec3::new(1.0, 3.0, 0.0), Some(Vec3::Z));
    assert!(graph.get_abs_heading(node).abs_diff_eq(Vec3::Y, 1e-5));
    assert!(graph.get_abs_up_direction(node).abs_diff_eq(Vec3::Z, 1e-5));

    let euler = graph.get_euler(node);
    graph.point_at_local(node, Vec3::new(1.0, 0.0, 0.0), None);
    assert_eq!(graph.get_euler(node), euler);
}

#[test]
fn rotate_composes_in_local_frame() {
    let mut graph = SceneGraph::new();
    let node = graph.add_node_with(
        "n",
        Transform::from_origin_euler(Vec3::ZERO, Vec3::new(0.0, 90.0, 0.0)),
    );
    graph.rotate(node, Mat4::from_rotation_x(90f32.to_radians()));
    // heading +Z -> -Y locally, then the yaw leaves -Y alone
    assert!(graph.get_abs_heading(node).abs_diff_eq(-Vec3::Y, 1e-5));

    graph.reset_transform(node);
    graph.rotate_about(node, 90.0, Vec3::Y);
    assert!(graph.get_abs_heading(node).abs_diff_eq(Vec3::X, 1e-5));
    assert!(graph.get_euler(node).abs_diff_eq(Vec3::new(0.0, 90.0, 0.0), 1e-3));

    graph.set_local_rotation_transform(node, Mat4::from_rotation_z(30f32.to_radians()));
    assert!(graph.get_euler(node).abs_diff_eq(Vec3::new(0.0, 0.0, 30.0), 1e-3));
}

#[test]
fn nodes_are_found_by_name() {
    let mut graph = SceneGraph::new();
    let a = graph.add_node("shoulder");
    let b = graph.add_node("elbow");
    assert_eq!(graph.find_by_name("elbow"), Some(b));
    assert_eq!(graph.find_by_name("shoulder"), Some(a));
    assert_eq!(graph.find_by_name("wrist"), None);
    assert_eq!(graph.node(a).name(), "shoulder");
}

#[test]
fn renamed_nodes_are_found_under_new_name() {
    let mut graph = SceneGraph::new();
    let a = graph.add_node("hand");
    graph.set_name(a, "gripper");
    assert_eq!(graph.node(a).name(), "gripper");
    assert_eq!(graph.find_by_name("gripper"), Some(a));
    assert_eq!(graph.find_by_name("hand"), None);
}
