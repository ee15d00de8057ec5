//! Scene Walker
//!
//! Drives one traversal of the scene and routes the resulting text into the
//! session's streams.
//!
//! # Traversals
//!
//! - [`Traversal::Dag`] visits positioned nodes of one category in
//!   depth-first pre-order, dropping every node that is not visible.
//! - [`Traversal::Dependency`] visits shading nodes in creation order. They
//!   have no transform and no visibility.
//!
//! Output order is traversal order. Cancellation is polled before every
//! candidate; when it fires the walk stops and whatever was written stays.

use crate::errors::Result;
use crate::export::registry::Candidate;
use crate::export::session::{CollectionStats, ExportSession, StreamId};
use crate::export::translators::{Dispatch, Outcome, Resolution};
use crate::scene::{NodeCategory, NodeFlags, NodeHandle, Scene};

/// Which collection of nodes a walk visits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Traversal {
    Dag(NodeCategory),
    Dependency,
}

/// Whether a DAG node is exported: it and every ancestor must be locally
/// visible. The ownership chain is followed iteratively and the walk stops
/// at the first hidden node.
#[must_use]
pub fn is_visible(scene: &Scene, handle: NodeHandle) -> bool {
    let mut current = Some(handle);
    while let Some(h) = current {
        let Some(node) = scene.get_node(h) else {
            return false;
        };
        if node.flags.contains(NodeFlags::VISIBILITY_UNRESOLVED) {
            log::warn!(
                "Could not determine visibility of {}, treating it as hidden",
                scene.full_path(h)
            );
            return false;
        }
        if !node.is_locally_visible() {
            return false;
        }
        current = node.parent();
    }
    true
}

#[derive(Debug, Clone, Copy)]
pub struct SceneWalker<'a> {
    scene: &'a Scene,
}

impl<'a> SceneWalker<'a> {
    #[must_use]
    pub fn new(scene: &'a Scene) -> Self {
        Self { scene }
    }

    /// Candidates of a traversal, in output order.
    #[must_use]
    pub fn candidates(&self, traversal: Traversal) -> Vec<Candidate> {
        match traversal {
            Traversal::Dag(category) => self
                .scene
                .depth_first()
                .into_iter()
                .filter(|&h| self.scene.nodes[h].category() == category)
                .map(Candidate::Dag)
                .collect(),
            Traversal::Dependency => self.scene.shaders.keys().map(Candidate::Shading).collect(),
        }
    }

    /// Exports one collection and returns how many nodes were written.
    ///
    /// `streams` lists the streams this collection may write to; the factory
    /// sees only those that are currently open.
    pub fn export_collection<F>(
        &self,
        session: &mut ExportSession,
        traversal: Traversal,
        mut factory: F,
        label: &'static str,
        streams: &[StreamId],
    ) -> Result<usize>
    where
        F: FnMut(Candidate, &[StreamId]) -> Resolution<Dispatch<'a>>,
    {
        log::info!("Exporting {label} objects...");

        let open: Vec<StreamId> = streams
            .iter()
            .copied()
            .filter(|&id| session.streams.is_open(id))
            .collect();
        let mut stats = CollectionStats::default();

        for candidate in self.candidates(traversal) {
            if session.poll_cancelled() {
                log::warn!("Export cancelled while writing {label} objects");
                break;
            }

            if let Candidate::Dag(handle) = candidate
                && !is_visible(self.scene, handle)
            {
                stats.invisible += 1;
                continue;
            }

            let dispatch = match factory(candidate, &open) {
                Resolution::Supported(dispatch) => dispatch,
                Resolution::Unsupported { kind } => {
                    log::debug!("{label}: skipping unsupported {kind}");
                    stats.unsupported += 1;
                    continue;
                }
            };

            let Some((mut ctx, sink)) = session.split(dispatch.stream) else {
                log::debug!("{label}: stream {:?} is closed", dispatch.stream);
                stats.unsupported += 1;
                continue;
            };

            match dispatch.translator.write(&mut ctx, sink)? {
                Outcome::Written => stats.exported += 1,
                Outcome::Skipped => stats.skipped += 1,
            }
        }

        log::info!(
            "{label}: {} exported, {} hidden, {} unsupported, {} skipped",
            stats.exported,
            stats.invisible,
            stats.unsupported,
            stats.skipped
        );
        session.record(label, stats);
        Ok(stats.exported)
    }
}
