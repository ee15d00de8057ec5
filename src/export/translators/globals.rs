//! Render globals: the `Film` through `Accelerator` blocks that precede the
//! camera in every scene file.

use std::fmt::Display;

use crate::errors::Result;
use crate::export::format::{Bool, Fixed};
use crate::export::session::TranslateContext;
use crate::export::sink::OutputSink;
use crate::export::translators::Outcome;
use crate::settings::{Accelerator, FilterKind, Renderer, Sampler, SurfaceIntegrator};

/// Writes the render-global blocks described by the session settings.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlobalsTranslator;

fn param(sink: &mut OutputSink, ty: &str, name: &str, value: impl Display) -> Result<()> {
    writeln!(sink, "\t\"{ty} {name}\" [{value}]")
}

fn int(sink: &mut OutputSink, name: &str, value: impl Display) -> Result<()> {
    param(sink, "integer", name, value)
}

fn float(sink: &mut OutputSink, name: &str, value: f32) -> Result<()> {
    param(sink, "float", name, Fixed(value))
}

fn boolean(sink: &mut OutputSink, name: &str, value: bool) -> Result<()> {
    param(sink, "bool", name, Bool(value))
}

fn string(sink: &mut OutputSink, name: &str, value: &str) -> Result<()> {
    writeln!(sink, "\t\"string {name}\" [\"{value}\"]")
}

impl GlobalsTranslator {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    pub fn write(&self, ctx: &mut TranslateContext<'_>, sink: &mut OutputSink) -> Result<Outcome> {
        let settings = ctx.settings;

        // -- Film --
        writeln!(sink, "Film \"image\"")?;
        int(sink, "xresolution", settings.image.width)?;
        int(sink, "yresolution", settings.image.height)?;
        string(sink, "filename", &settings.image.filename)?;
        writeln!(sink)?;

        // -- Sampler --
        writeln!(sink, "Sampler \"{}\"", settings.sampler.name())?;
        match &settings.sampler {
            Sampler::Adaptive(p) => {
                int(sink, "minsamples", p.minsamples)?;
                int(sink, "maxsamples", p.maxsamples)?;
                string(sink, "method", p.method.name())?;
            }
            Sampler::BestCandidate(p) | Sampler::Halton(p) | Sampler::LowDiscrepancy(p) | Sampler::Random(p) => {
                int(sink, "pixelsamples", p.pixelsamples)?;
            }
            Sampler::Stratified(p) => {
                boolean(sink, "jitter", p.jitter)?;
                int(sink, "xsamples", p.xsamples)?;
                int(sink, "ysamples", p.ysamples)?;
            }
        }
        writeln!(sink)?;

        // -- Pixel filter --
        let filter = &settings.filter;
        writeln!(sink, "PixelFilter \"{}\"", filter.kind.name())?;
        float(sink, "xwidth", filter.xwidth)?;
        float(sink, "ywidth", filter.ywidth)?;
        match filter.kind {
            FilterKind::Mitchell => {
                float(sink, "B", filter.b)?;
                float(sink, "C", filter.c)?;
            }
            FilterKind::Gaussian => float(sink, "alpha", filter.alpha)?,
            FilterKind::Sinc => float(sink, "tau", filter.tau)?,
            FilterKind::Triangle | FilterKind::Box => {}
        }
        writeln!(sink)?;

        // -- Renderer --
        writeln!(sink, "Renderer \"{}\"", settings.renderer.name())?;
        match &settings.renderer {
            Renderer::Sampler(p) => boolean(sink, "visualizeobjectids", p.visualizeobjectids)?,
            Renderer::Metropolis(p) => {
                float(sink, "largestepprobability", p.largestepprobability)?;
                int(sink, "samplesperpixel", p.samplesperpixel)?;
                int(sink, "bootstrapsamples", p.bootstrapsamples)?;
                int(sink, "directsamples", p.directsamples)?;
                boolean(sink, "dodirectseparately", p.dodirectseparately)?;
                int(sink, "maxconsecutiverejects", p.maxconsecutiverejects)?;
                int(sink, "maxdepth", p.maxdepth)?;
                boolean(sink, "bidirectional", p.bidirectional)?;
            }
            Renderer::AggregateTest | Renderer::CreateProbes | Renderer::SurfacePoints => {}
        }
        writeln!(sink)?;

        // -- Surface integrator --
        writeln!(sink, "SurfaceIntegrator \"{}\"", settings.integrator.name())?;
        match &settings.integrator {
            SurfaceIntegrator::IrradianceCache(p) => {
                float(sink, "minweight", p.minweight)?;
                float(sink, "minpixelspacing", p.minpixelspacing)?;
                float(sink, "maxpixelspacing", p.maxpixelspacing)?;
                float(sink, "maxangledifference", p.maxangledifference)?;
                int(sink, "maxspeculardepth", p.maxspeculardepth)?;
                int(sink, "maxindirectdepth", p.maxindirectdepth)?;
                int(sink, "nsamples", p.nsamples)?;
            }
            SurfaceIntegrator::AmbientOcclusion(p) => {
                int(sink, "nsamples", p.nsamples)?;
                float(sink, "maxdist", p.maxdist)?;
            }
            SurfaceIntegrator::Igi(p) => {
                int(sink, "maxdepth", p.maxdepth)?;
                int(sink, "nlights", p.nlights)?;
                int(sink, "nsets", p.nsets)?;
                float(sink, "rrthreshold", p.rrthreshold)?;
                float(sink, "glimit", p.glimit)?;
                int(sink, "gathersamples", p.gathersamples)?;
            }
            _ => {}
        }
        writeln!(sink)?;

        // -- Accelerator --
        writeln!(sink, "Accelerator \"{}\"", settings.accelerator.name())?;
        match &settings.accelerator {
            Accelerator::Bvh(p) => int(sink, "maxnodeprims", p.maxnodeprims)?,
            Accelerator::Grid(p) => {
                string(sink, "splitmethod", p.splitmethod.name())?;
                boolean(sink, "refineimmediately", p.refineimmediately)?;
            }
            Accelerator::KdTree(p) => {
                int(sink, "intersectcost", p.intersectcost)?;
                int(sink, "traversalcost", p.traversalcost)?;
                float(sink, "emptybonus", p.emptybonus)?;
                int(sink, "maxprims", p.maxprims)?;
                int(sink, "maxdepth", p.maxdepth)?;
            }
        }
        writeln!(sink)?;

        if !settings.extra_commands.is_empty() {
            writeln!(sink, "{}", settings.extra_commands)?;
        }
        writeln!(sink)?;
        Ok(Outcome::Written)
    }
}
