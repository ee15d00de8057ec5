#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::too_many_arguments)]

pub mod errors;
pub mod export;
pub mod resources;
pub mod scene;
pub mod settings;

pub use errors::{ExportError, IndexError, Result};
pub use export::{
    CancelToken, CollectionStats, CoordinateTransformer, ExportReport, ExportTarget, Exporter, GeometryIndexer,
    OutputSink, TranslationRegistry,
};
pub use resources::{Polygon, PolygonGroup, PolygonMesh, ShaderAttributes, ShadingNode, UvSet};
pub use scene::{Camera, Light, LightKind, Locator, Node, NodeFlags, NodeHandle, NodeKind, Scene, Transform};
pub use settings::{ExportSettings, UpAxis};
