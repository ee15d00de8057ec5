//! Export Settings
//!
//! Typed configuration for one export session: output image, render camera,
//! axis convention, which scene categories to export and every render-global
//! block written at the top of the scene file.
//!
//! # Overview
//!
//! Settings are resolved once when a session starts and then handed to the
//! translators by reference. Every field has a default, so a partial JSON
//! document is a valid settings file:
//!
//! ```rust,ignore
//! let settings = ExportSettings::from_json_str(r#"{
//!     "camera_name": "renderCam",
//!     "sampler": { "type": "stratified", "xsamples": 4, "ysamples": 4 }
//! }"#)?;
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::Result;

// ============================================================================
// Top-level settings
// ============================================================================

/// Complete configuration of an export session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Output image description (`Film` block).
    pub image: ImageSettings,
    /// Name of the camera node (or its parent transform) to render through.
    pub camera_name: String,
    /// Vertical axis of the host scene.
    pub up_axis: UpAxis,
    /// Uniform scene scale applied to exported positions.
    pub scene_scale: f32,
    /// Category switches.
    pub export: ExportSwitches,
    /// Camera options not carried by the camera node itself.
    pub camera: CameraSettings,
    pub sampler: Sampler,
    pub filter: PixelFilter,
    pub renderer: Renderer,
    pub integrator: SurfaceIntegrator,
    pub accelerator: Accelerator,
    /// Free-form directives appended after the render globals.
    pub extra_commands: String,
}

impl ExportSettings {
    #[must_use]
    pub fn new() -> Self {
        Self {
            image: ImageSettings::default(),
            camera_name: "persp".to_string(),
            up_axis: UpAxis::Y,
            scene_scale: 1.0,
            export: ExportSwitches::default(),
            camera: CameraSettings::default(),
            sampler: Sampler::default(),
            filter: PixelFilter::default(),
            renderer: Renderer::default(),
            integrator: SurfaceIntegrator::default(),
            accelerator: Accelerator::default(),
            extra_commands: String::new(),
        }
    }

    /// Parses a (possibly partial) JSON settings document.
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Reads and parses a JSON settings file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self::new()
    }
}

/// Host up-axis convention. The target renderer is always Z-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpAxis {
    #[default]
    Y,
    Z,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageSettings {
    pub width: u32,
    pub height: u32,
    pub filename: String,
}

impl Default for ImageSettings {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            filename: "out.exr".to_string(),
        }
    }
}

/// Which scene categories are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSwitches {
    pub meshes: bool,
    pub area_lights: bool,
    pub lights: bool,
    pub materials: bool,
    /// Emit a fixed two-light rig when the scene has no lights at all.
    pub default_lighting: bool,
}

impl Default for ExportSwitches {
    fn default() -> Self {
        Self {
            meshes: true,
            area_lights: true,
            lights: true,
            materials: true,
            default_lighting: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PerspectiveType {
    #[default]
    Perspective,
    Environment,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    /// Projection used for non-orthographic cameras.
    pub projection: PerspectiveType,
    /// Pinhole camera: lens radius is forced to zero.
    pub infinite_focus: bool,
    /// Shutter close time.
    pub exposure_time: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            projection: PerspectiveType::Perspective,
            infinite_focus: true,
            exposure_time: 1.0,
        }
    }
}

// ============================================================================
// Sampler
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdaptiveMethod {
    Contrast,
    #[default]
    ShapeId,
}

impl AdaptiveMethod {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Contrast => "contrast",
            Self::ShapeId => "shapeid",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdaptiveParams {
    pub minsamples: u32,
    pub maxsamples: u32,
    pub method: AdaptiveMethod,
}

impl Default for AdaptiveParams {
    fn default() -> Self {
        Self {
            minsamples: 4,
            maxsamples: 32,
            method: AdaptiveMethod::ShapeId,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PixelSamples {
    pub pixelsamples: u32,
}

impl Default for PixelSamples {
    fn default() -> Self {
        Self { pixelsamples: 4 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StratifiedParams {
    pub jitter: bool,
    pub xsamples: u32,
    pub ysamples: u32,
}

impl Default for StratifiedParams {
    fn default() -> Self {
        Self {
            jitter: true,
            xsamples: 2,
            ysamples: 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Sampler {
    Adaptive(AdaptiveParams),
    BestCandidate(PixelSamples),
    Halton(PixelSamples),
    LowDiscrepancy(PixelSamples),
    Random(PixelSamples),
    Stratified(StratifiedParams),
}

impl Sampler {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Adaptive(_) => "adaptive",
            Self::BestCandidate(_) => "bestcandidate",
            Self::Halton(_) => "halton",
            Self::LowDiscrepancy(_) => "lowdiscrepancy",
            Self::Random(_) => "random",
            Self::Stratified(_) => "stratified",
        }
    }
}

impl Default for Sampler {
    fn default() -> Self {
        Self::LowDiscrepancy(PixelSamples::default())
    }
}

// ============================================================================
// Pixel filter
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterKind {
    Mitchell,
    #[default]
    Gaussian,
    Sinc,
    Triangle,
    Box,
}

impl FilterKind {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Mitchell => "mitchell",
            Self::Gaussian => "gaussian",
            Self::Sinc => "sinc",
            Self::Triangle => "triangle",
            Self::Box => "box",
        }
    }
}

/// Pixel filter. Only the parameters relevant to `kind` are written.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PixelFilter {
    pub kind: FilterKind,
    pub xwidth: f32,
    pub ywidth: f32,
    pub b: f32,
    pub c: f32,
    pub alpha: f32,
    pub tau: f32,
}

impl Default for PixelFilter {
    fn default() -> Self {
        Self {
            kind: FilterKind::Gaussian,
            xwidth: 2.0,
            ywidth: 2.0,
            b: 0.333_333,
            c: 0.333_333,
            alpha: 2.0,
            tau: 3.0,
        }
    }
}

// ============================================================================
// Renderer
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplerRendererParams {
    pub visualizeobjectids: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetropolisParams {
    pub largestepprobability: f32,
    pub samplesperpixel: u32,
    pub bootstrapsamples: u32,
    pub directsamples: u32,
    pub dodirectseparately: bool,
    pub maxconsecutiverejects: u32,
    pub maxdepth: u32,
    pub bidirectional: bool,
}

impl Default for MetropolisParams {
    fn default() -> Self {
        Self {
            largestepprobability: 0.25,
            samplesperpixel: 100,
            bootstrapsamples: 100_000,
            directsamples: 4,
            dodirectseparately: true,
            maxconsecutiverejects: 512,
            maxdepth: 7,
            bidirectional: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Renderer {
    AggregateTest,
    CreateProbes,
    Metropolis(MetropolisParams),
    Sampler(SamplerRendererParams),
    SurfacePoints,
}

impl Renderer {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::AggregateTest => "aggregatetest",
            Self::CreateProbes => "createprobes",
            Self::Metropolis(_) => "metropolis",
            Self::Sampler(_) => "sampler",
            Self::SurfacePoints => "surfacepoints",
        }
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::Sampler(SamplerRendererParams::default())
    }
}

// ============================================================================
// Surface integrator
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IrradianceCacheParams {
    pub minweight: f32,
    pub minpixelspacing: f32,
    pub maxpixelspacing: f32,
    pub maxangledifference: f32,
    pub maxspeculardepth: u32,
    pub maxindirectdepth: u32,
    pub nsamples: u32,
}

impl Default for IrradianceCacheParams {
    fn default() -> Self {
        Self {
            minweight: 0.5,
            minpixelspacing: 2.5,
            maxpixelspacing: 15.0,
            maxangledifference: 10.0,
            maxspeculardepth: 5,
            maxindirectdepth: 3,
            nsamples: 4096,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AmbientOcclusionParams {
    pub nsamples: u32,
    pub maxdist: f32,
}

impl Default for AmbientOcclusionParams {
    fn default() -> Self {
        Self {
            nsamples: 512,
            maxdist: 100_000.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IgiParams {
    pub maxdepth: u32,
    pub nlights: u32,
    pub nsets: u32,
    pub rrthreshold: f32,
    pub glimit: f32,
    pub gathersamples: u32,
}

impl Default for IgiParams {
    fn default() -> Self {
        Self {
            maxdepth: 5,
            nlights: 64,
            nsets: 4,
            rrthreshold: 0.0001,
            glimit: 10.0,
            gathersamples: 16,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SurfaceIntegrator {
    AmbientOcclusion(AmbientOcclusionParams),
    DiffusePrt,
    DipoleSubsurface,
    DirectLighting,
    GlossyPrt,
    Igi(IgiParams),
    IrradianceCache(IrradianceCacheParams),
    Path,
    PhotonMap,
    UseProbes,
    Whitted,
}

impl SurfaceIntegrator {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::AmbientOcclusion(_) => "ambientocclusion",
            Self::DiffusePrt => "diffuseprt",
            Self::DipoleSubsurface => "dipolesubsurface",
            Self::DirectLighting => "directlighting",
            Self::GlossyPrt => "glossyprt",
            Self::Igi(_) => "igi",
            Self::IrradianceCache(_) => "irradiancecache",
            Self::Path => "path",
            Self::PhotonMap => "photonmap",
            Self::UseProbes => "useprobes",
            Self::Whitted => "whitted",
        }
    }
}

impl Default for SurfaceIntegrator {
    fn default() -> Self {
        Self::DirectLighting
    }
}

// ============================================================================
// Accelerator
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitMethod {
    #[default]
    Sah,
    Middle,
    Equal,
}

impl SplitMethod {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Sah => "sah",
            Self::Middle => "middle",
            Self::Equal => "equal",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BvhParams {
    pub maxnodeprims: u32,
}

impl Default for BvhParams {
    fn default() -> Self {
        Self { maxnodeprims: 7 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GridParams {
    pub splitmethod: SplitMethod,
    pub refineimmediately: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KdTreeParams {
    pub intersectcost: i32,
    pub traversalcost: i32,
    pub emptybonus: f32,
    pub maxprims: i32,
    pub maxdepth: i32,
}

impl Default for KdTreeParams {
    fn default() -> Self {
        Self {
            intersectcost: 80,
            traversalcost: 1,
            emptybonus: 0.2,
            maxprims: 1,
            maxdepth: -1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Accelerator {
    Bvh(BvhParams),
    Grid(GridParams),
    KdTree(KdTreeParams),
}

impl Accelerator {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Bvh(_) => "bvh",
            Self::Grid(_) => "grid",
            Self::KdTree(_) => "kdtree",
        }
    }
}

impl Default for Accelerator {
    fn default() -> Self {
        Self::Bvh(BvhParams::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let settings = ExportSettings::from_json_str("{}").unwrap();
        assert_eq!(settings, ExportSettings::default());
        assert_eq!(settings.sampler.name(), "lowdiscrepancy");
        assert_eq!(settings.accelerator, Accelerator::Bvh(BvhParams { maxnodeprims: 7 }));
    }

    #[test]
    fn partial_variant_keeps_remaining_defaults() {
        let settings = ExportSettings::from_json_str(
            r#"{ "sampler": { "type": "stratified", "xsamples": 4 }, "up_axis": "z" }"#,
        )
        .unwrap();

        assert_eq!(
            settings.sampler,
            Sampler::Stratified(StratifiedParams { jitter: true, xsamples: 4, ysamples: 2 })
        );
        assert_eq!(settings.up_axis, UpAxis::Z);
        assert!(settings.export.meshes);
    }

    #[test]
    fn unit_variants_parse_from_tag() {
        let settings =
            ExportSettings::from_json_str(r#"{ "integrator": { "type": "path" } }"#).unwrap();
        assert_eq!(settings.integrator, SurfaceIntegrator::Path);
    }

    #[test]
    fn malformed_document_is_an_error() {
        assert!(ExportSettings::from_json_str("{ not json").is_err());
    }
}
