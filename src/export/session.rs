//! Export Session
//!
//! Per-invocation state shared by every component of one export:
//! - the resolved [`ExportSettings`] and the [`CoordinateTransformer`] built from them
//! - the open output streams (main scene file plus up to two auxiliary files)
//! - per-collection counters
//! - the cooperative cancellation flag
//!
//! A session is created when an export starts and torn down by
//! [`ExportSession::finish`], which flushes and closes every stream. On a
//! fatal error the session is simply dropped; nothing is rolled back.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use rustc_hash::{FxHashMap, FxHashSet};

use crate::errors::Result;
use crate::export::coords::CoordinateTransformer;
use crate::export::sink::{OutputSink, StreamSummary};
use crate::scene::MeshKey;
use crate::settings::ExportSettings;

/// Shared cancellation flag, polled once per traversed node.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    #[inline]
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Identifies one of the session's output streams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamId {
    /// The scene file itself.
    Main,
    /// Bulk geometry, included from the main file.
    Geometry,
    /// Emissive meshes, included from the main file.
    AreaLights,
}

/// The streams of a session. Auxiliary streams are optional.
#[derive(Debug)]
pub struct SessionStreams {
    main: OutputSink,
    geometry: Option<OutputSink>,
    area_lights: Option<OutputSink>,
}

impl SessionStreams {
    #[must_use]
    pub fn new(main: OutputSink) -> Self {
        Self {
            main,
            geometry: None,
            area_lights: None,
        }
    }

    pub fn open(&mut self, id: StreamId, sink: OutputSink) {
        match id {
            StreamId::Main => self.main = sink,
            StreamId::Geometry => self.geometry = Some(sink),
            StreamId::AreaLights => self.area_lights = Some(sink),
        }
    }

    #[must_use]
    pub fn is_open(&self, id: StreamId) -> bool {
        self.get(id).is_some()
    }

    #[must_use]
    pub fn get(&self, id: StreamId) -> Option<&OutputSink> {
        match id {
            StreamId::Main => Some(&self.main),
            StreamId::Geometry => self.geometry.as_ref(),
            StreamId::AreaLights => self.area_lights.as_ref(),
        }
    }

    pub fn get_mut(&mut self, id: StreamId) -> Option<&mut OutputSink> {
        match id {
            StreamId::Main => Some(&mut self.main),
            StreamId::Geometry => self.geometry.as_mut(),
            StreamId::AreaLights => self.area_lights.as_mut(),
        }
    }

    #[inline]
    pub fn main(&mut self) -> &mut OutputSink {
        &mut self.main
    }

    /// Closes an auxiliary stream. The main stream closes with the session.
    pub fn close(&mut self, id: StreamId) -> Result<Option<StreamSummary>> {
        let sink = match id {
            StreamId::Main => None,
            StreamId::Geometry => self.geometry.take(),
            StreamId::AreaLights => self.area_lights.take(),
        };
        sink.map(OutputSink::finish).transpose()
    }
}

/// Outcome counters of one traversed collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollectionStats {
    /// Nodes whose text was written.
    pub exported: usize,
    /// Nodes hidden by themselves or an ancestor.
    pub invisible: usize,
    /// Nodes the factory declined.
    pub unsupported: usize,
    /// Nodes accepted but dropped by their translator (e.g. broken meshes).
    pub skipped: usize,
}

/// State handed to a translator while it writes.
#[derive(Debug)]
pub struct TranslateContext<'s> {
    pub settings: &'s ExportSettings,
    pub transformer: &'s CoordinateTransformer,
    /// Shared meshes whose `ObjectBegin` block has been written.
    pub emitted_objects: &'s mut FxHashSet<MeshKey>,
}

/// Process-wide state of one export invocation.
#[derive(Debug)]
pub struct ExportSession {
    pub settings: ExportSettings,
    pub transformer: CoordinateTransformer,
    pub streams: SessionStreams,
    stats: FxHashMap<&'static str, CollectionStats>,
    emitted_objects: FxHashSet<MeshKey>,
    cancel: CancelToken,
    cancelled: bool,
}

impl ExportSession {
    #[must_use]
    pub fn new(settings: ExportSettings, main: OutputSink, cancel: CancelToken) -> Self {
        Self {
            transformer: CoordinateTransformer::from_settings(&settings),
            settings,
            streams: SessionStreams::new(main),
            stats: FxHashMap::default(),
            emitted_objects: FxHashSet::default(),
            cancel,
            cancelled: false,
        }
    }

    /// Polls the cancellation flag, remembering a hit.
    pub fn poll_cancelled(&mut self) -> bool {
        if self.cancel.is_cancelled() {
            self.cancelled = true;
        }
        self.cancelled
    }

    #[inline]
    #[must_use]
    pub fn was_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Adds a collection's counters under its label.
    pub fn record(&mut self, label: &'static str, stats: CollectionStats) {
        let entry = self.stats.entry(label).or_default();
        entry.exported += stats.exported;
        entry.invisible += stats.invisible;
        entry.unsupported += stats.unsupported;
        entry.skipped += stats.skipped;
    }

    #[must_use]
    pub fn stats(&self, label: &str) -> CollectionStats {
        self.stats.get(label).copied().unwrap_or_default()
    }

    /// Borrows a stream together with the translation context.
    pub fn split(&mut self, stream: StreamId) -> Option<(TranslateContext<'_>, &mut OutputSink)> {
        let sink = self.streams.get_mut(stream)?;
        let ctx = TranslateContext {
            settings: &self.settings,
            transformer: &self.transformer,
            emitted_objects: &mut self.emitted_objects,
        };
        Some((ctx, sink))
    }

    /// Closes every remaining stream, main stream last.
    pub fn finish(mut self) -> Result<StreamSummary> {
        self.streams.close(StreamId::Geometry)?;
        self.streams.close(StreamId::AreaLights)?;
        self.streams.main.finish()
    }
}
