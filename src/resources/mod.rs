//! Scene resources referenced by nodes.
//!
//! - PolygonMesh: shared polygonal shape data (points, normals, UV sets, shader groups)
//! - ShadingNode: unpositioned shader nodes of the dependency graph

pub mod mesh;
pub mod shading;

pub use mesh::{Polygon, PolygonGroup, PolygonMesh, UvSet};
pub use shading::{ShaderAttributes, ShadingNode};
