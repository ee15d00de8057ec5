//! Error Types
//!
//! This module defines the error types used throughout the exporter.
//!
//! # Overview
//!
//! The main error type [`ExportError`] only covers *fatal* conditions, the ones
//! that abort a whole export session:
//! - An output stream that cannot be opened or written
//! - The render camera missing from the scene
//! - Invalid settings documents
//!
//! Per-node problems (unsupported kinds, broken triangulations, malformed UV
//! sets) never abort a session. They are logged and counted, and only the
//! geometry indexer reports them through its own [`IndexError`] type.
//!
//! # Usage
//!
//! All public APIs return [`Result<T>`] which is an alias for
//! `std::result::Result<T, ExportError>`.
//!
//! ```rust,ignore
//! use pbrt_export::errors::{ExportError, Result};
//!
//! fn write_scene() -> Result<()> {
//!     Ok(())
//! }
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// The main error type for an export session.
///
/// Every variant is fatal: the session stops at the point of failure and
/// leaves whatever output was already flushed on disk.
#[derive(Error, Debug)]
pub enum ExportError {
    // ========================================================================
    // Output Stream Errors
    // ========================================================================
    /// An output file could not be created.
    #[error("Failed to open {path:?} for writing: {source}")]
    StreamOpen {
        /// Path of the stream that failed to open
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// Writing or flushing an already open stream failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ========================================================================
    // Scene Lookup Errors
    // ========================================================================
    /// No camera node matches the configured render camera name.
    #[error("Could not find the camera: {0}")]
    CameraNotFound(String),

    /// A handle does not refer to a live node of the scene.
    #[error("Invalid scene handle: {0}")]
    InvalidHandle(String),

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Settings document could not be parsed.
    #[error("Settings parse error: {0}")]
    Settings(#[from] serde_json::Error),
}

/// Recoverable failures raised while indexing one polygon group.
///
/// None of these abort the session. [`IndexError::UnresolvedUv`] triggers a
/// retry without UVs inside the indexer; the others make the mesh translator
/// skip the whole mesh.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IndexError {
    /// A polygon has no triangulation, or a triangle names a point outside
    /// the polygon or the mesh.
    #[error("polygon {polygon} has an invalid triangulation")]
    InvalidTriangulation {
        /// Mesh-wide polygon index
        polygon: u32,
    },

    /// A polygon corner has no usable normal.
    #[error("polygon {polygon} corner {corner} has no normal")]
    MissingNormal {
        /// Mesh-wide polygon index
        polygon: u32,
        /// Face-relative corner index
        corner: u32,
    },

    /// A polygon corner has no usable UV in the active set.
    #[error("polygon {polygon} corner {corner} has no UV in set {set}")]
    UnresolvedUv {
        /// Mesh-wide polygon index
        polygon: u32,
        /// Face-relative corner index
        corner: u32,
        /// Active UV set index
        set: usize,
    },
}

/// Alias for `Result<T, ExportError>`.
pub type Result<T> = std::result::Result<T, ExportError>;
