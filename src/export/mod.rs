//! Export pipeline
//!
//! - [`Exporter`]: top-level ordered pipeline
//! - [`ExportSession`]: per-run streams, counters and cancellation
//! - [`SceneWalker`]: visibility-filtered traversal of one collection
//! - [`TranslationRegistry`]: node kind to translator lookup
//! - [`GeometryIndexer`]: polygon groups to indexed triangle lists
//! - [`CoordinateTransformer`]: up-axis conversion and scene scale
//! - [`OutputSink`]: buffered or file-backed text stream

pub mod coords;
pub mod exporter;
pub mod format;
pub mod indexer;
pub mod registry;
pub mod session;
pub mod sink;
pub mod translators;
pub mod walker;

pub use coords::CoordinateTransformer;
pub use exporter::{ExportReport, ExportTarget, Exporter, auxiliary_path};
pub use indexer::{GeometryIndexer, IndexedMesh, VertexKey};
pub use registry::{Candidate, TranslationRegistry};
pub use session::{CancelToken, CollectionStats, ExportSession, StreamId, TranslateContext};
pub use sink::{OutputSink, StreamSummary};
pub use translators::{Dispatch, Outcome, Resolution, Translator};
pub use walker::{SceneWalker, Traversal, is_visible};
