use glam::{Mat4, Vec3};
use slotmap::SlotMap;

use crate::resources::mesh::PolygonMesh;
use crate::resources::shading::ShadingNode;
use crate::scene::camera::Camera;
use crate::scene::light::Light;
use crate::scene::locator::Locator;
use crate::scene::node::{Node, NodeCategory, NodeFlags, NodeKind};
use crate::scene::{MeshKey, NodeHandle, ShaderKey};

/// Read-only snapshot of a host scene.
///
/// Holds the positioned DAG (`nodes` + `root_nodes`), the mesh shapes those
/// nodes reference, and the flat set of shading nodes. Slot maps preserve
/// insertion order while nothing is removed, so dependency traversal follows
/// creation order just like the host's own node iterator.
#[derive(Debug, Default)]
pub struct Scene {
    pub nodes: SlotMap<NodeHandle, Node>,
    pub meshes: SlotMap<MeshKey, PolygonMesh>,
    pub shaders: SlotMap<ShaderKey, ShadingNode>,
    pub root_nodes: Vec<NodeHandle>,
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Construction
    // ========================================================================

    /// Starts building a node.
    pub fn build_node(&'_ mut self, name: &str) -> NodeBuilder<'_> {
        NodeBuilder::new(self, name)
    }

    /// Adds a root node.
    pub fn add_node(&mut self, node: Node) -> NodeHandle {
        let handle = self.nodes.insert(node);
        self.root_nodes.push(handle);
        handle
    }

    pub fn add_to_parent(&mut self, child: Node, parent: NodeHandle) -> NodeHandle {
        let handle = self.nodes.insert(child);
        if self.nodes.contains_key(parent) {
            self.link(handle, parent);
        } else {
            log::error!("Parent node not found, adding '{}' as a root", self.nodes[handle].name);
            self.root_nodes.push(handle);
        }
        handle
    }

    /// Re-parents `child` under `parent`.
    pub fn attach(&mut self, child: NodeHandle, parent: NodeHandle) {
        if child == parent {
            log::warn!("Cannot attach node to itself!");
            return;
        }
        if !self.nodes.contains_key(parent) {
            log::error!("Parent node not found during attach!");
            return;
        }

        // 1. Detach from old
        let old_parent = self.get_node(child).and_then(Node::parent);
        if let Some(p) = old_parent {
            if let Some(n) = self.get_node_mut(p)
                && let Some(i) = n.children.iter().position(|&x| x == child)
            {
                n.children.remove(i);
            }
        } else if let Some(i) = self.root_nodes.iter().position(|&x| x == child) {
            self.root_nodes.remove(i);
        }

        // 2. Attach to new
        self.link(child, parent);
    }

    fn link(&mut self, child: NodeHandle, parent: NodeHandle) {
        if let Some(p) = self.get_node_mut(parent) {
            p.children.push(child);
        }
        if let Some(c) = self.get_node_mut(child) {
            c.parent = Some(parent);
        }
    }

    pub fn add_mesh(&mut self, mesh: PolygonMesh) -> MeshKey {
        self.meshes.insert(mesh)
    }

    pub fn add_shader(&mut self, shader: ShadingNode) -> ShaderKey {
        self.shaders.insert(shader)
    }

    // ========================================================================
    // Lookup
    // ========================================================================

    #[inline]
    #[must_use]
    pub fn get_node(&self, handle: NodeHandle) -> Option<&Node> {
        self.nodes.get(handle)
    }

    #[inline]
    pub fn get_node_mut(&mut self, handle: NodeHandle) -> Option<&mut Node> {
        self.nodes.get_mut(handle)
    }

    #[inline]
    #[must_use]
    pub fn mesh(&self, key: MeshKey) -> Option<&PolygonMesh> {
        self.meshes.get(key)
    }

    #[inline]
    #[must_use]
    pub fn shader(&self, key: ShaderKey) -> Option<&ShadingNode> {
        self.shaders.get(key)
    }

    /// Inclusive world matrix of a node: the product of every local matrix
    /// from the root down to the node itself.
    #[must_use]
    pub fn world_matrix(&self, handle: NodeHandle) -> Mat4 {
        let mut world = Mat4::IDENTITY;
        let mut current = Some(handle);
        while let Some(h) = current {
            let Some(node) = self.nodes.get(h) else {
                break;
            };
            world = node.transform.local_matrix() * world;
            current = node.parent;
        }
        world
    }

    /// Host-style full path, e.g. `|group1|pCube1|pCubeShape1`.
    #[must_use]
    pub fn full_path(&self, handle: NodeHandle) -> String {
        let mut names = Vec::new();
        let mut current = Some(handle);
        while let Some(h) = current {
            let Some(node) = self.nodes.get(h) else {
                break;
            };
            names.push(node.name.as_str());
            current = node.parent;
        }
        names.iter().rev().fold(String::new(), |mut path, name| {
            path.push('|');
            path.push_str(name);
            path
        })
    }

    /// All DAG nodes in depth-first pre-order, roots in insertion order.
    #[must_use]
    pub fn depth_first(&self) -> Vec<NodeHandle> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<NodeHandle> = self.root_nodes.iter().rev().copied().collect();

        while let Some(handle) = stack.pop() {
            let Some(node) = self.nodes.get(handle) else {
                continue;
            };
            order.push(handle);
            stack.extend(node.children.iter().rev().copied());
        }
        order
    }

    /// Number of DAG nodes that reference the given mesh.
    #[must_use]
    pub fn instance_count(&self, key: MeshKey) -> usize {
        self.nodes
            .values()
            .filter(|n| matches!(n.kind, NodeKind::Mesh(k) if k == key))
            .count()
    }

    /// Finds the render camera by its own name or the name of its parent
    /// transform, searching depth-first.
    #[must_use]
    pub fn find_camera(&self, name: &str) -> Option<NodeHandle> {
        self.depth_first().into_iter().find(|&handle| {
            let node = &self.nodes[handle];
            if node.category() != NodeCategory::Camera {
                return false;
            }
            node.name == name
                || node
                    .parent
                    .and_then(|p| self.nodes.get(p))
                    .is_some_and(|p| p.name == name)
        })
    }
}

/// Chained node construction.
///
/// ```rust,ignore
/// let xform = scene.build_node("pCube1").with_position(0.0, 1.0, 0.0).build();
/// let shape = scene.build_node("pCubeShape1").with_parent(xform).with_mesh(mesh).build();
/// ```
pub struct NodeBuilder<'a> {
    scene: &'a mut Scene,
    node: Node,
    parent: Option<NodeHandle>,
}

impl<'a> NodeBuilder<'a> {
    pub fn new(scene: &'a mut Scene, name: &str) -> Self {
        Self {
            scene,
            node: Node::new(name),
            parent: None,
        }
    }

    #[must_use]
    pub fn with_position(mut self, x: f32, y: f32, z: f32) -> Self {
        self.node.transform.position = Vec3::new(x, y, z);
        self
    }

    /// XYZ Euler rotation in radians.
    #[must_use]
    pub fn with_rotation_euler(mut self, x: f32, y: f32, z: f32) -> Self {
        self.node.transform.set_rotation_euler(x, y, z);
        self
    }

    #[must_use]
    pub fn with_scale(mut self, s: f32) -> Self {
        self.node.transform.scale = Vec3::splat(s);
        self
    }

    #[must_use]
    pub fn with_parent(mut self, parent: NodeHandle) -> Self {
        self.parent = Some(parent);
        self
    }

    #[must_use]
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.node.visible = visible;
        self
    }

    #[must_use]
    pub fn with_flags(mut self, flags: NodeFlags) -> Self {
        self.node.flags |= flags;
        self
    }

    #[must_use]
    pub fn with_mesh(mut self, mesh: MeshKey) -> Self {
        self.node.kind = NodeKind::Mesh(mesh);
        self
    }

    #[must_use]
    pub fn with_light(mut self, light: Light) -> Self {
        self.node.kind = NodeKind::Light(light);
        self
    }

    #[must_use]
    pub fn with_camera(mut self, camera: Camera) -> Self {
        self.node.kind = NodeKind::Camera(camera);
        self
    }

    #[must_use]
    pub fn with_locator(mut self, locator: Locator) -> Self {
        self.node.kind = NodeKind::Locator(locator);
        self
    }

    /// Inserts the node and returns its handle.
    pub fn build(self) -> NodeHandle {
        match self.parent {
            Some(parent) => self.scene.add_to_parent(self.node, parent),
            None => self.scene.add_node(self.node),
        }
    }
}
