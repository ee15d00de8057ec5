use bitflags::bitflags;

use crate::scene::camera::Camera;
use crate::scene::light::Light;
use crate::scene::locator::Locator;
use crate::scene::transform::Transform;
use crate::scene::{MeshKey, NodeHandle};

bitflags! {
    /// Host state that hides a node independently of its visibility attribute.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct NodeFlags: u8 {
        /// Construction-history shape, never rendered.
        const INTERMEDIATE          = 1 << 0;
        /// Display override set to template.
        const TEMPLATE              = 1 << 1;
        /// Display override set to reference.
        const REFERENCE             = 1 << 2;
        /// Member of a hidden display layer.
        const LAYER_HIDDEN          = 1 << 3;
        /// The host could not report the display override.
        const VISIBILITY_UNRESOLVED = 1 << 4;
    }
}

/// What a DAG node carries besides its transform.
#[derive(Debug, Clone, Default)]
pub enum NodeKind {
    #[default]
    Transform,
    /// Polygon shape. Several nodes sharing one key are instances.
    Mesh(MeshKey),
    Light(Light),
    Camera(Camera),
    Locator(Locator),
}

/// Traversal category of a DAG node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeCategory {
    Transform,
    Mesh,
    Light,
    Camera,
    Locator,
}

impl NodeKind {
    #[must_use]
    pub fn category(&self) -> NodeCategory {
        match self {
            Self::Transform => NodeCategory::Transform,
            Self::Mesh(_) => NodeCategory::Mesh,
            Self::Light(_) => NodeCategory::Light,
            Self::Camera(_) => NodeCategory::Camera,
            Self::Locator(_) => NodeCategory::Locator,
        }
    }
}

/// A positioned node of the host DAG.
///
/// # Hierarchy
///
/// - `parent`: handle of the owning node (None for root nodes)
/// - `children`: owned child handles, in host order
///
/// # Visibility
///
/// A node hides itself through `visible == false` or any [`NodeFlags`] bit.
/// Whether it is exported also depends on every ancestor; see
/// [`is_visible`](crate::export::walker::is_visible).
#[derive(Debug, Clone)]
pub struct Node {
    pub name: String,

    // === Hierarchy ===
    pub(crate) parent: Option<NodeHandle>,
    pub(crate) children: Vec<NodeHandle>,

    // === Spatial ===
    pub transform: Transform,

    // === State ===
    pub visible: bool,
    pub flags: NodeFlags,

    pub kind: NodeKind,
}

impl Node {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            parent: None,
            children: Vec::new(),
            transform: Transform::new(),
            visible: true,
            flags: NodeFlags::empty(),
            kind: NodeKind::Transform,
        }
    }

    #[must_use]
    pub fn with_kind(name: &str, kind: NodeKind) -> Self {
        Self {
            kind,
            ..Self::new(name)
        }
    }

    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<NodeHandle> {
        self.parent
    }

    #[inline]
    #[must_use]
    pub fn children(&self) -> &[NodeHandle] {
        &self.children
    }

    /// Visibility of this node alone, ignoring ancestors.
    #[inline]
    #[must_use]
    pub fn is_locally_visible(&self) -> bool {
        self.visible && self.flags.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn category(&self) -> NodeCategory {
        self.kind.category()
    }
}

impl Default for Node {
    fn default() -> Self {
        Self::new("node")
    }
}
