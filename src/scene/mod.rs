//! Scene graph model
//!
//! A read-only snapshot of the host scene:
//! - Node: positioned DAG node (hierarchy, transform, visibility state, payload)
//! - Transform: local TRS component
//! - Scene: container of nodes, mesh shapes and shading nodes
//! - Camera / Light / Locator: node payloads

pub mod camera;
pub mod light;
pub mod locator;
pub mod node;
pub mod scene;
pub mod transform;

pub use camera::{Camera, ProjectionType};
pub use light::{Light, LightKind};
pub use locator::Locator;
pub use node::{Node, NodeCategory, NodeFlags, NodeKind};
pub use scene::{NodeBuilder, Scene};
pub use transform::Transform;

use slotmap::new_key_type;

new_key_type! {
    pub struct NodeHandle;
    pub struct MeshKey;
    pub struct ShaderKey;
}
