use crate::errors::Result;
use crate::export::format::{ConcatTransform, Fixed, Triple};
use crate::export::session::TranslateContext;
use crate::export::sink::OutputSink;
use crate::export::translators::Outcome;
use crate::scene::{Light, LightKind, NodeHandle, Scene};

/// Writes one of the three light shapes the renderer understands.
#[derive(Debug, Clone, Copy)]
pub struct LightTranslator<'a> {
    scene: &'a Scene,
    handle: NodeHandle,
    light: &'a Light,
}

impl<'a> LightTranslator<'a> {
    #[must_use]
    pub fn new(scene: &'a Scene, handle: NodeHandle, light: &'a Light) -> Self {
        Self { scene, handle, light }
    }

    pub fn write(&self, ctx: &mut TranslateContext<'_>, sink: &mut OutputSink) -> Result<Outcome> {
        let (label, source, color_param) = match self.light.kind {
            LightKind::Directional => ("Directional", "distant", "L"),
            LightKind::Point => ("Point", "point", "I"),
            LightKind::Spot { .. } => ("Spot", "spot", "I"),
            LightKind::Ambient | LightKind::Area | LightKind::Volume => {
                log::warn!("Light type {} not supported", self.light.kind.type_name());
                return Ok(Outcome::Skipped);
            }
        };

        let world = ctx.transformer.to_target_matrix(&self.scene.world_matrix(self.handle));

        writeln!(sink, "# {label} Light {}", self.scene.full_path(self.handle))?;
        writeln!(sink, "TransformBegin")?;
        writeln!(sink, "{}", ConcatTransform(&world))?;
        writeln!(sink, "\tLightSource \"{source}\"")?;
        writeln!(sink, "\t\t\"color {color_param}\" [{}]", Triple(self.light.radiance()))?;

        match self.light.kind {
            LightKind::Directional => {
                writeln!(sink, "\t\t\"point from\" [0 0 0]")?;
                writeln!(sink, "\t\t\"point to\" [0 0 -1]")?;
            }
            LightKind::Spot { cone_angle, drop_off } => {
                writeln!(sink, "\t\t\"point from\" [0 0 0]")?;
                writeln!(sink, "\t\t\"point to\" [0 0 -1]")?;
                writeln!(sink, "\t\t\"float coneangle\" [{}]", Fixed(cone_angle.to_degrees()))?;
                writeln!(sink, "\t\t\"float conedeltaangle\" [{}]", Fixed(drop_off.to_degrees()))?;
            }
            _ => {}
        }

        writeln!(sink, "TransformEnd")?;
        writeln!(sink)?;
        Ok(Outcome::Written)
    }
}

/// Camera-relative two-light rig used when a scene exports no lights.
pub fn write_default_lighting(sink: &mut OutputSink) -> Result<()> {
    writeln!(sink, "AttributeBegin")?;
    writeln!(sink, "\tCoordSysTransform \"camera\"")?;
    writeln!(
        sink,
        "\tLightSource \"distant\" \"color L\" [ .7 .7 .5 ] \"point from\" [0 0 0] \"point to\" [1.0 -1.0 1.0]"
    )?;
    writeln!(
        sink,
        "\tLightSource \"distant\" \"color L\" [ .2 .2 .35 ] \"point from\" [0 0 0] \"point to\" [0.0 0.0 1.0]"
    )?;
    writeln!(sink, "AttributeEnd")?;
    writeln!(sink)?;
    Ok(())
}
