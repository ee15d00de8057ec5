//! Surface shader translation.
//!
//! The mapping is a best-effort approximation. Diffuse shaders become
//! `matte`, the specular family becomes `plastic` with a roughness taken from
//! whichever specular-shape attribute the shader has, and text nodes are
//! copied through verbatim.

use glam::Vec3;

use crate::errors::Result;
use crate::export::format::{Fixed, Triple};
use crate::export::sink::OutputSink;
use crate::export::translators::Outcome;
use crate::resources::{ShaderAttributes, ShadingNode};

/// Token replaced by the owning node's name in pass-through text.
pub const NODE_NAME_TOKEN: &str = "%NODE_NAME";

const DEFAULT_ROUGHNESS: f32 = 0.1;
const DEFAULT_DIFFUSE: Vec3 = Vec3::splat(0.5);
const DEFAULT_SPECULAR: Vec3 = Vec3::splat(0.5);

/// Target material a shader is translated into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterialModel {
    Matte,
    Plastic,
    /// Raw scene text authored on the node.
    Text,
}

#[derive(Debug, Clone, Copy)]
pub struct MaterialTranslator<'a> {
    shader: &'a ShadingNode,
    model: MaterialModel,
}

impl<'a> MaterialTranslator<'a> {
    #[must_use]
    pub fn new(shader: &'a ShadingNode, model: MaterialModel) -> Self {
        Self { shader, model }
    }

    #[must_use]
    pub fn matte(shader: &'a ShadingNode) -> Self {
        Self::new(shader, MaterialModel::Matte)
    }

    #[must_use]
    pub fn plastic(shader: &'a ShadingNode) -> Self {
        Self::new(shader, MaterialModel::Plastic)
    }

    #[must_use]
    pub fn text(shader: &'a ShadingNode) -> Self {
        Self::new(shader, MaterialModel::Text)
    }

    #[inline]
    #[must_use]
    pub fn model(&self) -> MaterialModel {
        self.model
    }

    pub fn write(&self, sink: &mut OutputSink) -> Result<Outcome> {
        let name = &self.shader.name;
        let attrs = &self.shader.attributes;

        match self.model {
            MaterialModel::Text => {
                writeln!(sink, "#pbrtTextNode {name}")?;
                if let Some(text) = attrs.text.as_deref().filter(|t| !t.is_empty()) {
                    writeln!(sink, "{}", substitute_node_name(text, name))?;
                }
            }
            MaterialModel::Matte => {
                writeln!(sink, "# Translated Lambert Material {name}")?;
                writeln!(sink, "MakeNamedMaterial \"{name}\" \"string type\" [\"matte\"]")?;
                writeln!(sink, "\t\"color Kd\" [{}]", Triple(attrs.color.unwrap_or(DEFAULT_DIFFUSE)))?;
            }
            MaterialModel::Plastic => {
                writeln!(sink, "# Translated Blinn Material {name}")?;
                writeln!(sink, "MakeNamedMaterial \"{name}\" \"string type\" [\"plastic\"]")?;
                writeln!(sink, "\t\"color Kd\" [{}]", Triple(attrs.color.unwrap_or(DEFAULT_DIFFUSE)))?;
                writeln!(
                    sink,
                    "\t\"color Ks\" [{}]",
                    Triple(attrs.specular_color.unwrap_or(DEFAULT_SPECULAR))
                )?;
                writeln!(sink, "\t\"float roughness\" [{}]", Fixed(plastic_roughness(attrs)))?;
            }
        }
        writeln!(sink)?;
        Ok(Outcome::Written)
    }
}

/// Roughness of the plastic approximation.
///
/// Priority: eccentricity, then roughness, then the reciprocal of the cosine
/// power, then a fixed default.
#[must_use]
pub fn plastic_roughness(attrs: &ShaderAttributes) -> f32 {
    if let Some(eccentricity) = attrs.eccentricity {
        eccentricity
    } else if let Some(roughness) = attrs.roughness {
        roughness
    } else if let Some(power) = attrs.cosine_power.filter(|&p| p > 0.0) {
        1.0 / power
    } else {
        DEFAULT_ROUGHNESS
    }
}

#[must_use]
pub fn substitute_node_name(text: &str, node_name: &str) -> String {
    text.replace(NODE_NAME_TOKEN, node_name)
}
