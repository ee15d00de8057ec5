//! Polygon mesh data as authored in the host application.
//!
//! Points and normals live in separate index spaces. Polygons reference
//! points object-relatively and normals/UVs face-relatively, which is why the
//! indexer has to remap every triangle corner through [`Polygon::local_index`].

use std::borrow::Cow;

use glam::{Vec2, Vec3};

use crate::errors::IndexError;
use crate::scene::ShaderKey;

/// A named UV set with its own index space.
#[derive(Debug, Clone, Default)]
pub struct UvSet {
    pub name: String,
    pub uvs: Vec<Vec2>,
}

/// One polygon of a mesh.
#[derive(Debug, Clone, Default)]
pub struct Polygon {
    /// Object-relative point indices in winding order.
    pub vertices: Vec<u32>,
    /// One normal index per corner, face-relative.
    pub normal_ids: Vec<u32>,
    /// Per UV set, one UV index per corner.
    pub uv_ids: Vec<Vec<u32>>,
    /// Triangles naming object-relative point indices.
    /// `None` when the host failed to triangulate the polygon.
    pub triangles: Option<Vec<[u32; 3]>>,
}

impl Polygon {
    /// Creates a fan-triangulated polygon whose normal ids mirror its point
    /// ids, which is the layout of a mesh with per-vertex normals.
    #[must_use]
    pub fn fan(vertices: Vec<u32>) -> Self {
        let triangles = (1..vertices.len().saturating_sub(1))
            .map(|i| [vertices[0], vertices[i], vertices[i + 1]])
            .collect();
        Self {
            normal_ids: vertices.clone(),
            vertices,
            uv_ids: Vec::new(),
            triangles: Some(triangles),
        }
    }

    #[must_use]
    pub fn with_normal_ids(mut self, normal_ids: Vec<u32>) -> Self {
        self.normal_ids = normal_ids;
        self
    }

    /// Appends the corner UV indices of the next UV set.
    #[must_use]
    pub fn with_uv_ids(mut self, uv_ids: Vec<u32>) -> Self {
        self.uv_ids.push(uv_ids);
        self
    }

    #[must_use]
    pub fn with_triangles(mut self, triangles: Option<Vec<[u32; 3]>>) -> Self {
        self.triangles = triangles;
        self
    }

    /// Position of `point` within this polygon's own vertex list.
    ///
    /// Degenerate polygons may list the same point twice; the first
    /// occurrence wins.
    #[inline]
    #[must_use]
    pub fn local_index(&self, point: u32) -> Option<usize> {
        self.vertices.iter().position(|&v| v == point)
    }

    #[inline]
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.triangles.as_ref().map_or(0, Vec::len)
    }
}

/// A set of polygons sharing one surface shader assignment.
#[derive(Debug, Clone, Default)]
pub struct PolygonGroup {
    /// Mesh-wide polygon indices.
    pub polygons: Vec<u32>,
    pub shader: Option<ShaderKey>,
}

impl PolygonGroup {
    #[must_use]
    pub fn new(polygons: Vec<u32>, shader: Option<ShaderKey>) -> Self {
        Self { polygons, shader }
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }
}

/// Polygonal mesh shape data, shared by every node that instances it.
#[derive(Debug, Clone, Default)]
pub struct PolygonMesh {
    /// Shape name, also used as the object name when instanced.
    pub name: String,
    pub points: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub uv_sets: Vec<UvSet>,
    /// Index of the UV set that gets exported.
    pub current_uv_set: usize,
    pub polygons: Vec<Polygon>,
    /// Shader partition. An empty list means one group holding every polygon.
    pub groups: Vec<PolygonGroup>,
    /// Loop subdivision levels; `None` exports a plain triangle mesh.
    pub subdivision_levels: Option<u32>,
}

impl PolygonMesh {
    #[must_use]
    pub fn new(name: &str, points: Vec<Vec3>, normals: Vec<Vec3>) -> Self {
        Self {
            name: name.to_string(),
            points,
            normals,
            ..Self::default()
        }
    }

    /// Adds a polygon and returns its mesh-wide index.
    pub fn add_polygon(&mut self, polygon: Polygon) -> u32 {
        self.polygons.push(polygon);
        (self.polygons.len() - 1) as u32
    }

    pub fn add_uv_set(&mut self, name: &str, uvs: Vec<Vec2>) {
        self.uv_sets.push(UvSet {
            name: name.to_string(),
            uvs,
        });
    }

    pub fn add_group(&mut self, polygons: Vec<u32>, shader: Option<ShaderKey>) {
        self.groups.push(PolygonGroup::new(polygons, shader));
    }

    /// Binds every polygon to a single shader.
    pub fn assign_shader(&mut self, shader: ShaderKey) {
        let all = (0..self.polygons.len() as u32).collect();
        self.groups = vec![PolygonGroup::new(all, Some(shader))];
    }

    #[inline]
    #[must_use]
    pub fn has_uvs(&self) -> bool {
        self.current_uv_set < self.uv_sets.len()
    }

    #[must_use]
    pub fn current_uv_set(&self) -> Option<&UvSet> {
        self.uv_sets.get(self.current_uv_set)
    }

    /// Shader groups in export order.
    #[must_use]
    pub fn shader_groups(&self) -> Cow<'_, [PolygonGroup]> {
        if self.groups.is_empty() {
            let all = (0..self.polygons.len() as u32).collect();
            Cow::Owned(vec![PolygonGroup::new(all, None)])
        } else {
            Cow::Borrowed(&self.groups)
        }
    }

    /// Surface shader of the first group, which decides the output stream.
    #[must_use]
    pub fn primary_shader(&self) -> Option<ShaderKey> {
        self.groups.first().and_then(|g| g.shader)
    }

    #[must_use]
    pub fn triangle_count(&self, group: &PolygonGroup) -> usize {
        group
            .polygons
            .iter()
            .filter_map(|&p| self.polygons.get(p as usize))
            .map(Polygon::triangle_count)
            .sum()
    }

    /// Checks that every group names existing polygons, that every polygon
    /// has at least one triangle, that each triangle corner is a valid point
    /// of both the mesh and its own polygon, and that each such corner has a
    /// normal.
    pub fn validate(&self) -> Result<(), IndexError> {
        let polygon_count = self.polygons.len();
        for group in &self.groups {
            if let Some(&missing) = group.polygons.iter().find(|&&p| p as usize >= polygon_count) {
                return Err(IndexError::InvalidTriangulation { polygon: missing });
            }
        }

        for (index, polygon) in self.polygons.iter().enumerate() {
            let polygon_index = index as u32;
            let Some(triangles) = polygon.triangles.as_ref().filter(|t| !t.is_empty()) else {
                return Err(IndexError::InvalidTriangulation { polygon: polygon_index });
            };
            for &point in triangles.iter().flatten() {
                let local = polygon
                    .local_index(point)
                    .filter(|_| (point as usize) < self.points.len())
                    .ok_or(IndexError::InvalidTriangulation { polygon: polygon_index })?;
                let has_normal = polygon
                    .normal_ids
                    .get(local)
                    .is_some_and(|&n| (n as usize) < self.normals.len());
                if !has_normal {
                    return Err(IndexError::MissingNormal {
                        polygon: polygon_index,
                        corner: local as u32,
                    });
                }
            }
        }
        Ok(())
    }
}
