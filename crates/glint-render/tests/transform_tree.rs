//! Transform composition across threads and deep chains.

use std::sync::Arc;
use std::thread;

use glint_render::{Mat4, Quat, Transform, Vec3};

fn setup() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn chain(depth: usize) -> Vec<Arc<Transform>> {
    let mut nodes: Vec<Arc<Transform>> = Vec::with_capacity(depth);
    for i in 0..depth {
        let node = Arc::new(Transform::new());
        node.set_position(Vec3::new(1.0, 0.0, 0.0));
        node.set_scale(Vec3::splat(if i % 2 == 0 { 2.0 } else { 0.5 }));
        if let Some(parent) = nodes.last() {
            node.set_parent(Some(parent));
        }
        nodes.push(node);
    }
    nodes
}

#[test]
fn test_deep_chain_sums_positions_and_multiplies_scales() {
    setup();
    let nodes = chain(8);
    let leaf = nodes.last().unwrap();
    assert_eq!(leaf.world_position(), Vec3::new(8.0, 0.0, 0.0));
    assert_eq!(leaf.world_scale(), Vec3::ONE);
}

#[test]
fn test_world_values_follow_parent_writes_from_other_threads() {
    setup();
    let nodes = chain(3);
    let root = Arc::clone(&nodes[0]);

    thread::spawn(move || root.set_position(Vec3::new(10.0, 5.0, 0.0)))
        .join()
        .unwrap();

    assert_eq!(nodes[2].world_position(), Vec3::new(12.0, 5.0, 0.0));
}

#[test]
fn test_quaternion_wins_after_later_euler_writes() {
    setup();
    let t = Transform::new();
    t.set_rotation(Vec3::new(0.3, 0.0, 0.0));
    t.set_rotation_quat(Quat::IDENTITY);
    t.set_rotation(Vec3::new(0.0, 1.2, 0.0));

    assert!(t.world_matrix().abs_diff_eq(Mat4::IDENTITY, 1e-6));
}
