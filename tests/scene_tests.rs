//! Scene Model Tests
//!
//! Tests for:
//! - Scene: node insertion, attach/re-parent hierarchy
//! - World matrices and full paths along the parent chain
//! - Depth-first order, mesh instance counts, camera lookup
//! - Transform: TRS composition

use std::f32::consts::FRAC_PI_2;

use glam::{Mat4, Vec3};

use pbrt_export::resources::PolygonMesh;
use pbrt_export::scene::{Camera, Node, NodeCategory, Scene, Transform};

const EPSILON: f32 = 1e-5;

fn vec3_approx(a: Vec3, b: Vec3) -> bool {
    (a - b).length() < EPSILON
}

// ============================================================================
// Hierarchy
// ============================================================================

#[test]
fn scene_add_node_to_root() {
    let mut scene = Scene::new();
    let handle = scene.add_node(Node::new("group1"));
    assert!(scene.root_nodes.contains(&handle));
    assert_eq!(scene.get_node(handle).unwrap().name, "group1");
}

#[test]
fn builder_links_parent_and_child() {
    let mut scene = Scene::new();
    let parent = scene.build_node("parent").build();
    let child = scene.build_node("child").with_parent(parent).build();

    assert_eq!(scene.get_node(child).unwrap().parent(), Some(parent));
    assert_eq!(scene.get_node(parent).unwrap().children(), &[child]);
    assert!(!scene.root_nodes.contains(&child));
}

#[test]
fn attach_moves_node_between_parents() {
    let mut scene = Scene::new();
    let a = scene.build_node("a").build();
    let b = scene.build_node("b").build();
    let child = scene.build_node("child").with_parent(a).build();

    scene.attach(child, b);

    assert!(scene.get_node(a).unwrap().children().is_empty());
    assert_eq!(scene.get_node(b).unwrap().children(), &[child]);
    assert_eq!(scene.full_path(child), "|b|child");
}

#[test]
fn attach_root_node_removes_it_from_roots() {
    let mut scene = Scene::new();
    let a = scene.build_node("a").build();
    let b = scene.build_node("b").build();

    scene.attach(b, a);
    assert_eq!(scene.root_nodes, vec![a]);
}

#[test]
fn attach_to_self_is_ignored() {
    let mut scene = Scene::new();
    let a = scene.build_node("a").build();
    scene.attach(a, a);
    assert!(scene.get_node(a).unwrap().parent().is_none());
}

// ============================================================================
// Paths & matrices
// ============================================================================

#[test]
fn full_path_joins_ancestor_names() {
    let mut scene = Scene::new();
    let group = scene.build_node("group1").build();
    let cube = scene.build_node("pCube1").with_parent(group).build();
    let shape = scene.build_node("pCubeShape1").with_parent(cube).build();

    assert_eq!(scene.full_path(shape), "|group1|pCube1|pCubeShape1");
}

#[test]
fn world_matrix_composes_parent_chain() {
    let mut scene = Scene::new();
    let parent = scene
        .build_node("parent")
        .with_position(10.0, 0.0, 0.0)
        .with_scale(2.0)
        .build();
    let child = scene
        .build_node("child")
        .with_parent(parent)
        .with_position(1.0, 0.0, 0.0)
        .build();

    let world = scene.world_matrix(child);
    assert!(vec3_approx(world.transform_point3(Vec3::ZERO), Vec3::new(12.0, 0.0, 0.0)));
}

#[test]
fn world_matrix_of_root_is_local() {
    let mut scene = Scene::new();
    let node = scene
        .build_node("node")
        .with_rotation_euler(0.0, FRAC_PI_2, 0.0)
        .build();

    let local = scene.get_node(node).unwrap().transform.local_matrix();
    assert_eq!(scene.world_matrix(node), local);
}

// ============================================================================
// Queries
// ============================================================================

#[test]
fn depth_first_is_pre_order() {
    let mut scene = Scene::new();
    let a = scene.build_node("a").build();
    let a1 = scene.build_node("a1").with_parent(a).build();
    let a1x = scene.build_node("a1x").with_parent(a1).build();
    let a2 = scene.build_node("a2").with_parent(a).build();
    let b = scene.build_node("b").build();

    assert_eq!(scene.depth_first(), vec![a, a1, a1x, a2, b]);
}

#[test]
fn instance_count_counts_every_referencing_node() {
    let mut scene = Scene::new();
    let shared = scene.add_mesh(PolygonMesh::new("shared", Vec::new(), Vec::new()));
    let single = scene.add_mesh(PolygonMesh::new("single", Vec::new(), Vec::new()));
    scene.build_node("i1").with_mesh(shared).build();
    scene.build_node("i2").with_mesh(shared).with_visible(false).build();
    scene.build_node("i3").with_mesh(single).build();

    assert_eq!(scene.instance_count(shared), 2);
    assert_eq!(scene.instance_count(single), 1);
}

#[test]
fn find_camera_matches_shape_or_transform_name() {
    let mut scene = Scene::new();
    let xform = scene.build_node("renderCam").build();
    let shape = scene
        .build_node("renderCamShape")
        .with_parent(xform)
        .with_camera(Camera::default())
        .build();

    assert_eq!(scene.find_camera("renderCam"), Some(shape));
    assert_eq!(scene.find_camera("renderCamShape"), Some(shape));
    assert_eq!(scene.find_camera("persp"), None);
    // Non-camera nodes never match.
    scene.build_node("persp").build();
    assert_eq!(scene.find_camera("persp"), None);
}

#[test]
fn node_category_follows_payload() {
    let mut scene = Scene::new();
    let cam = scene.build_node("cam").with_camera(Camera::new_orthographic(10.0)).build();
    let group = scene.build_node("group").build();

    assert_eq!(scene.get_node(cam).unwrap().category(), NodeCategory::Camera);
    assert_eq!(scene.get_node(group).unwrap().category(), NodeCategory::Transform);
}

// ============================================================================
// Transform
// ============================================================================

#[test]
fn transform_default_is_identity() {
    assert_eq!(Transform::default().local_matrix(), Mat4::IDENTITY);
}

#[test]
fn transform_composes_scale_rotation_translation() {
    let mut t = Transform::new();
    t.position = Vec3::new(5.0, -1.0, 0.5);
    t.scale = Vec3::splat(2.0);
    t.set_rotation_euler(0.0, 0.0, FRAC_PI_2);

    let p = t.local_matrix().transform_point3(Vec3::X);
    assert!(vec3_approx(p, Vec3::new(5.0, 1.0, 0.5)));
}
