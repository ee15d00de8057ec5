//! Exporter
//!
//! The top-level pipeline. One call to [`Exporter::run`] produces a complete
//! scene file:
//!
//! 1. Render globals, then the render camera and `WorldBegin`
//! 2. Meshes into the auxiliary geometry / area-light files
//! 3. Materials, lights (or a default rig), locators into the scene file
//! 4. `Include` directives for the auxiliary files that received text
//! 5. `WorldEnd`
//!
//! Fatal errors (a stream that cannot be opened, a missing camera) abort the
//! run and leave partial output behind. Everything else is logged, counted
//! in the [`ExportReport`] and skipped.

use std::path::{Path, PathBuf};

use crate::errors::{ExportError, Result};
use crate::export::registry::{Candidate, TranslationRegistry};
use crate::export::session::{CancelToken, CollectionStats, ExportSession, StreamId};
use crate::export::sink::{OutputSink, StreamSummary};
use crate::export::translators::mesh::geo_factory;
use crate::export::translators::{
    CameraTranslator, Dispatch, GlobalsTranslator, Resolution, Translator, write_default_lighting,
};
use crate::export::walker::{SceneWalker, Traversal};
use crate::scene::{NodeCategory, NodeKind, Scene};
use crate::settings::ExportSettings;

pub const MESH_LABEL: &str = "Mesh";
pub const MATERIAL_LABEL: &str = "Material";
pub const LIGHT_LABEL: &str = "Light";
pub const LOCATOR_LABEL: &str = "Locator";

/// Where the scene text goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportTarget {
    /// Keep every stream in memory. Include directives still name the
    /// files that would have been written next to `scene_path`.
    Memory { scene_path: PathBuf },
    /// Stream into `scene_path` and its auxiliary files.
    Files { scene_path: PathBuf },
}

impl ExportTarget {
    #[must_use]
    pub fn memory(scene_path: impl Into<PathBuf>) -> Self {
        Self::Memory {
            scene_path: scene_path.into(),
        }
    }

    #[must_use]
    pub fn files(scene_path: impl Into<PathBuf>) -> Self {
        Self::Files {
            scene_path: scene_path.into(),
        }
    }

    #[must_use]
    pub fn scene_path(&self) -> &Path {
        match self {
            Self::Memory { scene_path } | Self::Files { scene_path } => scene_path,
        }
    }

    fn open(&self, path: PathBuf) -> Result<OutputSink> {
        match self {
            Self::Memory { .. } => Ok(OutputSink::buffered(path)),
            Self::Files { .. } => OutputSink::create(path),
        }
    }
}

/// `scene.pbrt` becomes `scene.<tag>.pbrt`.
#[must_use]
pub fn auxiliary_path(scene_path: &Path, tag: &str) -> PathBuf {
    let text = scene_path.to_string_lossy();
    match text.strip_suffix(".pbrt") {
        Some(stem) => PathBuf::from(format!("{stem}.{tag}.pbrt")),
        None => PathBuf::from(format!("{text}.{tag}.pbrt")),
    }
}

/// Summary of a finished export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    pub meshes: CollectionStats,
    pub materials: CollectionStats,
    pub lights: CollectionStats,
    pub locators: CollectionStats,
    /// The fallback light rig was written.
    pub default_lighting: bool,
    pub cancelled: bool,
    pub main: StreamSummary,
    pub geometry: Option<StreamSummary>,
    pub area_lights: Option<StreamSummary>,
    /// Auxiliary files referenced from the scene file.
    pub includes: Vec<PathBuf>,
}

impl ExportReport {
    /// Scene file text, in memory mode.
    #[must_use]
    pub fn scene_text(&self) -> Option<&str> {
        self.main.text.as_deref()
    }

    #[must_use]
    pub fn geometry_text(&self) -> Option<&str> {
        self.geometry.as_ref().and_then(|s| s.text.as_deref())
    }

    #[must_use]
    pub fn area_light_text(&self) -> Option<&str> {
        self.area_lights.as_ref().and_then(|s| s.text.as_deref())
    }
}

/// Exports one scene with one set of settings.
pub struct Exporter<'a> {
    scene: &'a Scene,
    settings: ExportSettings,
    registry: TranslationRegistry,
    cancel: CancelToken,
}

impl<'a> Exporter<'a> {
    #[must_use]
    pub fn new(scene: &'a Scene, settings: ExportSettings) -> Self {
        Self {
            scene,
            settings,
            registry: TranslationRegistry::new(),
            cancel: CancelToken::new(),
        }
    }

    #[must_use]
    pub fn with_registry(mut self, registry: TranslationRegistry) -> Self {
        self.registry = registry;
        self
    }

    #[must_use]
    pub fn with_cancel_token(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// A handle that can cancel this exporter's runs.
    #[must_use]
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    #[must_use]
    pub fn settings(&self) -> &ExportSettings {
        &self.settings
    }

    pub fn run(&self, target: &ExportTarget) -> Result<ExportReport> {
        self.run_session(target).inspect_err(|err| log::error!("Export failed: {err}"))
    }

    fn run_session(&self, target: &ExportTarget) -> Result<ExportReport> {
        let scene = self.scene;
        let settings = &self.settings;
        let registry = &self.registry;
        let scene_path = target.scene_path().to_path_buf();

        let main = target.open(scene_path.clone())?;
        let mut session = ExportSession::new(settings.clone(), main, self.cancel.clone());
        let walker = SceneWalker::new(scene);

        // -- Step 1: render globals --
        write_main(&mut session, &Translator::Globals(GlobalsTranslator::new()))?;

        // -- Step 2: camera --
        let camera_handle = scene
            .find_camera(&settings.camera_name)
            .ok_or_else(|| ExportError::CameraNotFound(settings.camera_name.clone()))?;
        let NodeKind::Camera(camera) = &scene.nodes[camera_handle].kind else {
            return Err(ExportError::InvalidHandle(settings.camera_name.clone()));
        };
        write_main(
            &mut session,
            &Translator::Camera(CameraTranslator::new(scene, camera_handle, camera)),
        )?;
        log::info!("Camera written");
        writeln!(session.streams.main(), "\nWorldBegin\n")?;

        // -- Step 3: meshes --
        if settings.export.meshes {
            let sink = target.open(auxiliary_path(&scene_path, "geo"))?;
            session.streams.open(StreamId::Geometry, sink);
        }
        if settings.export.area_lights {
            let sink = target.open(auxiliary_path(&scene_path, "areaLgt"))?;
            session.streams.open(StreamId::AreaLights, sink);
        }

        walker.export_collection(
            &mut session,
            Traversal::Dag(NodeCategory::Mesh),
            |candidate, open| match candidate {
                Candidate::Dag(handle) => geo_factory(scene, handle, open),
                Candidate::Shading(_) => Resolution::unsupported("shading node"),
            },
            MESH_LABEL,
            &[StreamId::Geometry, StreamId::AreaLights],
        )?;

        let geometry = session.streams.close(StreamId::Geometry)?;
        let area_lights = session.streams.close(StreamId::AreaLights)?;
        let area_lights_written = area_lights.as_ref().is_some_and(|s| !s.is_empty());

        let main_factory =
            |candidate: Candidate, _: &[StreamId]| registry.resolve(scene, candidate).map(Dispatch::main);

        // -- Step 4: materials --
        if settings.export.materials {
            walker.export_collection(
                &mut session,
                Traversal::Dependency,
                main_factory,
                MATERIAL_LABEL,
                &[StreamId::Main],
            )?;
        }

        // -- Step 5: lights --
        let mut default_lighting = false;
        if settings.export.lights {
            let exported = walker.export_collection(
                &mut session,
                Traversal::Dag(NodeCategory::Light),
                main_factory,
                LIGHT_LABEL,
                &[StreamId::Main],
            )?;
            if exported == 0
                && settings.export.default_lighting
                && !area_lights_written
                && !session.was_cancelled()
            {
                log::info!("No lights exported, writing default lighting");
                write_default_lighting(session.streams.main())?;
                default_lighting = true;
            }
        }

        // -- Step 6: locators --
        walker.export_collection(
            &mut session,
            Traversal::Dag(NodeCategory::Locator),
            main_factory,
            LOCATOR_LABEL,
            &[StreamId::Main],
        )?;

        // -- Step 7: includes and close --
        let includes: Vec<PathBuf> = [&geometry, &area_lights]
            .into_iter()
            .flatten()
            .filter(|summary| !summary.is_empty())
            .map(|summary| summary.path.clone())
            .collect();

        let main = session.streams.main();
        for path in &includes {
            writeln!(main, "Include \"{}\"", path.display())?;
        }
        writeln!(main, "\nWorldEnd")?;

        let report_stats = [MESH_LABEL, MATERIAL_LABEL, LIGHT_LABEL, LOCATOR_LABEL].map(|l| session.stats(l));
        let cancelled = session.was_cancelled();
        let main = session.finish()?;
        log::info!("Export complete: {}", main.path.display());

        let [meshes, materials, lights, locators] = report_stats;
        Ok(ExportReport {
            meshes,
            materials,
            lights,
            locators,
            default_lighting,
            cancelled,
            main,
            geometry,
            area_lights,
            includes,
        })
    }
}

fn write_main(session: &mut ExportSession, translator: &Translator<'_>) -> Result<()> {
    if let Some((mut ctx, sink)) = session.split(StreamId::Main) {
        translator.write(&mut ctx, sink)?;
    }
    Ok(())
}
