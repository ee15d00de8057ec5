//! Geometry Indexer Tests
//!
//! Tests for:
//! - Vertex buffer size and index bounds
//! - Deduplication on (point, normal, uv) identity, without over-merging
//! - Local index remap, including duplicated points
//! - UV fallback when a corner has no usable UV
//! - Invalid triangulation and missing normals
//! - Winding preservation

use glam::{Vec2, Vec3};

use pbrt_export::errors::IndexError;
use pbrt_export::export::{GeometryIndexer, VertexKey};
use pbrt_export::resources::{Polygon, PolygonGroup, PolygonMesh};

fn all_polygons(mesh: &PolygonMesh) -> PolygonGroup {
    PolygonGroup::new((0..mesh.polygons.len() as u32).collect(), None)
}

/// Unit quad in the XY plane, one normal per point.
fn quad() -> PolygonMesh {
    let points = vec![
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(1.0, 0.0, 0.0),
        Vec3::new(1.0, 1.0, 0.0),
        Vec3::new(0.0, 1.0, 0.0),
    ];
    let normals = vec![Vec3::Z; 4];
    let mut mesh = PolygonMesh::new("quadShape", points, normals);
    mesh.add_polygon(Polygon::fan(vec![0, 1, 2, 3]));
    mesh
}

/// Two quads sharing the edge 1-2. With `hard_edge` each face gets its own
/// normal, so the shared points must split.
fn folded_quads(hard_edge: bool) -> PolygonMesh {
    let points = vec![
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(1.0, 0.0, 0.0),
        Vec3::new(1.0, 1.0, 0.0),
        Vec3::new(0.0, 1.0, 0.0),
        Vec3::new(2.0, 0.0, 1.0),
        Vec3::new(2.0, 1.0, 1.0),
    ];
    let normals = vec![Vec3::Z, Vec3::X];
    let mut mesh = PolygonMesh::new("foldShape", points, normals);
    let second_normal = u32::from(hard_edge);
    mesh.add_polygon(Polygon::fan(vec![0, 1, 2, 3]).with_normal_ids(vec![0; 4]));
    mesh.add_polygon(Polygon::fan(vec![1, 4, 5, 2]).with_normal_ids(vec![second_normal; 4]));
    mesh
}

fn uv_quad(corner_uvs: Vec<u32>) -> PolygonMesh {
    let mut mesh = quad();
    mesh.polygons[0] = Polygon::fan(vec![0, 1, 2, 3]).with_uv_ids(corner_uvs);
    mesh.add_uv_set(
        "map1",
        vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, 1.0),
        ],
    );
    mesh
}

// ============================================================================
// Buffer shape
// ============================================================================

#[test]
fn quad_produces_two_triangles_over_four_vertices() {
    let mesh = quad();
    let indexed = GeometryIndexer::new(&mesh).index(&all_polygons(&mesh)).unwrap();

    assert_eq!(indexed.triangle_count(), 2);
    assert_eq!(indexed.indices.len(), 6);
    assert_eq!(indexed.vertex_count(), 4);
    assert_eq!(indexed.normals.len(), indexed.points.len());
    assert!(!indexed.has_uvs());
}

#[test]
fn every_index_is_in_bounds() {
    let mesh = folded_quads(true);
    let indexed = GeometryIndexer::new(&mesh).index(&all_polygons(&mesh)).unwrap();

    let count = indexed.vertex_count() as u32;
    assert!(indexed.indices.iter().all(|&i| i < count));
    assert_eq!(indexed.indices.len() % 3, 0);
}

#[test]
fn winding_order_is_preserved() {
    let mesh = quad();
    let indexed = GeometryIndexer::new(&mesh).index(&all_polygons(&mesh)).unwrap();

    assert_eq!(indexed.indices, vec![0, 1, 2, 0, 2, 3]);
    assert_eq!(indexed.points[1], Vec3::new(1.0, 0.0, 0.0));
}

#[test]
fn group_only_indexes_its_own_polygons() {
    let mesh = folded_quads(true);
    let group = PolygonGroup::new(vec![1], None);
    let indexed = GeometryIndexer::new(&mesh).index(&group).unwrap();

    assert_eq!(indexed.triangle_count(), 2);
    assert_eq!(indexed.vertex_count(), 4);
    assert!(indexed.keys.iter().all(|k| k.normal == 1));
}

// ============================================================================
// Deduplication
// ============================================================================

#[test]
fn smooth_shared_edge_reuses_vertices() {
    let mesh = folded_quads(false);
    let indexed = GeometryIndexer::new(&mesh).index(&all_polygons(&mesh)).unwrap();

    assert_eq!(indexed.vertex_count(), 6);
}

#[test]
fn hard_edge_never_merges_different_normals() {
    let mesh = folded_quads(true);
    let indexed = GeometryIndexer::new(&mesh).index(&all_polygons(&mesh)).unwrap();

    assert_eq!(indexed.vertex_count(), 8);
    let shared: Vec<&VertexKey> = indexed.keys.iter().filter(|k| k.point == 1).collect();
    assert_eq!(shared.len(), 2);
    assert_ne!(shared[0].normal, shared[1].normal);
}

#[test]
fn keys_are_unique() {
    let mesh = folded_quads(true);
    let indexed = GeometryIndexer::new(&mesh).index(&all_polygons(&mesh)).unwrap();

    for (i, a) in indexed.keys.iter().enumerate() {
        assert!(indexed.keys[i + 1..].iter().all(|b| a != b), "duplicate key {a:?}");
    }
}

// ============================================================================
// Local index remap
// ============================================================================

#[test]
fn corner_attributes_follow_the_local_index() {
    // Point ids and normal ids deliberately disagree.
    let mut mesh = quad();
    mesh.normals = vec![Vec3::X, Vec3::Y, Vec3::Z, Vec3::NEG_Z];
    mesh.polygons[0] = Polygon::fan(vec![2, 3, 0, 1]).with_normal_ids(vec![0, 1, 2, 3]);

    let indexed = GeometryIndexer::new(&mesh).index(&all_polygons(&mesh)).unwrap();

    let slot_of_point_0 = indexed.keys.iter().position(|k| k.point == 0).unwrap();
    assert_eq!(indexed.normals[slot_of_point_0], Vec3::Z);
}

#[test]
fn duplicated_point_uses_first_occurrence() {
    let mut mesh = quad();
    mesh.normals = vec![Vec3::X, Vec3::Y, Vec3::Z, Vec3::NEG_Z];
    mesh.polygons[0] = Polygon::fan(vec![0, 1, 2, 0])
        .with_normal_ids(vec![0, 1, 2, 3])
        .with_triangles(Some(vec![[0, 1, 2]]));

    let indexed = GeometryIndexer::new(&mesh).index(&all_polygons(&mesh)).unwrap();

    assert_eq!(indexed.keys[0], VertexKey { point: 0, normal: 0, uv: None });
}

// ============================================================================
// UV handling
// ============================================================================

#[test]
fn valid_uvs_are_emitted() {
    let mesh = uv_quad(vec![0, 1, 2, 3]);
    let indexed = GeometryIndexer::new(&mesh).index(&all_polygons(&mesh)).unwrap();

    let uvs = indexed.uvs.as_ref().unwrap();
    assert_eq!(uvs.len(), indexed.vertex_count());
    assert_eq!(uvs[2], Vec2::new(1.0, 1.0));
}

#[test]
fn unresolvable_uv_falls_back_to_no_uvs() {
    let mesh = uv_quad(vec![0, 1, 2, 9]);
    let indexed = GeometryIndexer::new(&mesh).index(&all_polygons(&mesh)).unwrap();

    assert!(!indexed.has_uvs());
    assert_eq!(indexed.indices.len(), 6);
    assert!(indexed.keys.iter().all(|k| k.uv.is_none()));
}

#[test]
fn missing_corner_uv_ids_fall_back_to_no_uvs() {
    let mut mesh = uv_quad(vec![0, 1, 2, 3]);
    mesh.polygons[0].uv_ids.clear();

    let indexed = GeometryIndexer::new(&mesh).index(&all_polygons(&mesh)).unwrap();
    assert!(!indexed.has_uvs());
    assert_eq!(indexed.vertex_count(), 4);
}

#[test]
fn shared_point_with_split_uvs_does_not_merge() {
    let mut mesh = uv_quad(vec![0, 1, 2, 3]);
    mesh.uv_sets[0].uvs.push(Vec2::new(0.5, 0.5));
    // Second polygon reuses points 0 and 2 but with a seam on point 0.
    mesh.add_polygon(Polygon::fan(vec![0, 2, 3]).with_uv_ids(vec![4, 2, 3]));

    let indexed = GeometryIndexer::new(&mesh).index(&all_polygons(&mesh)).unwrap();

    assert!(indexed.has_uvs());
    assert_eq!(indexed.vertex_count(), 5);
}

// ============================================================================
// Invalid input
// ============================================================================

#[test]
fn untriangulated_polygon_is_rejected() {
    let mut mesh = quad();
    mesh.polygons[0].triangles = None;

    let err = GeometryIndexer::new(&mesh).index(&all_polygons(&mesh)).unwrap_err();
    assert_eq!(err, IndexError::InvalidTriangulation { polygon: 0 });
    assert!(mesh.validate().is_err());
}

#[test]
fn triangle_outside_its_polygon_is_rejected() {
    let mut mesh = quad();
    mesh.polygons[0] = Polygon::fan(vec![0, 1, 2]).with_triangles(Some(vec![[0, 1, 3]]));

    let err = GeometryIndexer::new(&mesh).index(&all_polygons(&mesh)).unwrap_err();
    assert_eq!(err, IndexError::InvalidTriangulation { polygon: 0 });
}

#[test]
fn missing_normal_is_reported() {
    let mut mesh = quad();
    mesh.polygons[0] = Polygon::fan(vec![0, 1, 2, 3]).with_normal_ids(vec![0, 1]);

    let err = GeometryIndexer::new(&mesh).index(&all_polygons(&mesh)).unwrap_err();
    assert!(matches!(err, IndexError::MissingNormal { polygon: 0, corner: 2 }));
    assert!(mesh.validate().is_err());
}

#[test]
fn empty_triangle_list_is_rejected() {
    let mut mesh = quad();
    mesh.polygons[0].triangles = Some(Vec::new());

    assert_eq!(mesh.validate(), Err(IndexError::InvalidTriangulation { polygon: 0 }));
    let err = GeometryIndexer::new(&mesh).index(&all_polygons(&mesh)).unwrap_err();
    assert_eq!(err, IndexError::InvalidTriangulation { polygon: 0 });
}

#[test]
fn group_with_missing_polygon_fails_validation() {
    let mut mesh = quad();
    mesh.add_group(vec![0, 7], None);

    assert_eq!(mesh.validate(), Err(IndexError::InvalidTriangulation { polygon: 7 }));
}

#[test]
fn valid_mesh_passes_validation() {
    assert!(quad().validate().is_ok());
    assert!(folded_quads(true).validate().is_ok());
}
