//! Geometry Indexing
//!
//! Turns one polygon group of a [`PolygonMesh`] into an [`IndexedMesh`]: a
//! vertex buffer whose points, normals and UVs are co-indexed, plus a flat
//! triangle index list.
//!
//! # Algorithm
//!
//! Every triangle corner names an object-relative point. Normal and UV
//! indices are stored per polygon corner, so the point is first mapped to
//! its position in the polygon's own vertex list (the local index). The
//! corner's identity is then the [`VertexKey`] `(point, normal, uv)`; equal
//! keys share one output vertex, different keys never do.
//!
//! # UV fallback
//!
//! If any corner of the group has no resolvable UV, the whole group is
//! indexed again from scratch without UVs, and no UVs are emitted for it.

use glam::{Vec2, Vec3};
use rustc_hash::FxHashMap;
use std::collections::hash_map::Entry;

use crate::errors::IndexError;
use crate::resources::mesh::{PolygonGroup, PolygonMesh, UvSet};

/// Deduplication identity of one triangle corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VertexKey {
    pub point: u32,
    pub normal: u32,
    pub uv: Option<u32>,
}

/// Co-indexed vertex buffer for one polygon group.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndexedMesh {
    pub points: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    /// Present only when every corner of the group had a UV.
    pub uvs: Option<Vec<Vec2>>,
    /// Three entries per triangle, input winding preserved.
    pub indices: Vec<u32>,
    /// Key of each output vertex, in slot order.
    pub keys: Vec<VertexKey>,
}

impl IndexedMesh {
    fn with_uvs(uvs: bool) -> Self {
        Self {
            uvs: uvs.then(Vec::new),
            ..Self::default()
        }
    }

    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.points.len()
    }

    #[inline]
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    #[inline]
    #[must_use]
    pub fn has_uvs(&self) -> bool {
        self.uvs.is_some()
    }
}

/// Indexes polygon groups of one mesh.
#[derive(Debug, Clone, Copy)]
pub struct GeometryIndexer<'a> {
    mesh: &'a PolygonMesh,
}

impl<'a> GeometryIndexer<'a> {
    #[must_use]
    pub fn new(mesh: &'a PolygonMesh) -> Self {
        Self { mesh }
    }

    /// Indexes `group`, retrying without UVs when the UV set is unusable.
    pub fn index(&self, group: &PolygonGroup) -> Result<IndexedMesh, IndexError> {
        if let Some(uv_set) = self.mesh.current_uv_set() {
            match self.compile(group, Some(uv_set)) {
                Err(IndexError::UnresolvedUv { polygon, corner, .. }) => {
                    log::warn!(
                        "Invalid UV data on mesh '{}' (UV set \"{}\", polygon {polygon} corner {corner}), restarting without UVs",
                        self.mesh.name,
                        uv_set.name
                    );
                }
                result => return result,
            }
        }
        self.compile(group, None)
    }

    fn compile(&self, group: &PolygonGroup, uv_set: Option<&UvSet>) -> Result<IndexedMesh, IndexError> {
        let mesh = self.mesh;
        let mut out = IndexedMesh::with_uvs(uv_set.is_some());
        let mut slots: FxHashMap<VertexKey, u32> = FxHashMap::default();

        for &polygon_index in &group.polygons {
            let invalid = IndexError::InvalidTriangulation {
                polygon: polygon_index,
            };
            let polygon = mesh.polygons.get(polygon_index as usize).ok_or(invalid.clone())?;
            let triangles = polygon
                .triangles
                .as_ref()
                .filter(|t| !t.is_empty())
                .ok_or(invalid.clone())?;

            for &point in triangles.iter().flatten() {
                // -- Local index remap --
                let local = polygon
                    .local_index(point)
                    .filter(|_| (point as usize) < mesh.points.len())
                    .ok_or(invalid.clone())?;

                let normal = polygon
                    .normal_ids
                    .get(local)
                    .copied()
                    .filter(|&n| (n as usize) < mesh.normals.len())
                    .ok_or(IndexError::MissingNormal {
                        polygon: polygon_index,
                        corner: local as u32,
                    })?;

                let uv = match uv_set {
                    Some(set) => Some(
                        polygon
                            .uv_ids
                            .get(mesh.current_uv_set)
                            .and_then(|ids| ids.get(local))
                            .copied()
                            .filter(|&u| (u as usize) < set.uvs.len())
                            .ok_or(IndexError::UnresolvedUv {
                                polygon: polygon_index,
                                corner: local as u32,
                                set: mesh.current_uv_set,
                            })?,
                    ),
                    None => None,
                };

                // -- Dedup --
                let key = VertexKey { point, normal, uv };
                let slot = match slots.entry(key) {
                    Entry::Occupied(entry) => *entry.get(),
                    Entry::Vacant(entry) => {
                        let slot = out.points.len() as u32;
                        out.points.push(mesh.points[point as usize]);
                        out.normals.push(mesh.normals[normal as usize]);
                        if let (Some(uvs), Some(set), Some(uv)) = (out.uvs.as_mut(), uv_set, uv) {
                            uvs.push(set.uvs[uv as usize]);
                        }
                        out.keys.push(key);
                        *entry.insert(slot)
                    }
                };
                out.indices.push(slot);
            }
        }

        Ok(out)
    }
}
