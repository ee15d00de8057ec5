//! Shading nodes: unpositioned dependency-graph nodes such as surface shaders.

use glam::Vec3;

/// Classification string carried by every surface shader.
pub const SURFACE_CLASSIFICATION: &str = "shader/surface";

/// Host type names the exporter knows about.
pub mod kinds {
    pub const LAMBERT: &str = "lambert";
    pub const BLINN: &str = "blinn";
    pub const PHONG: &str = "phong";
    pub const PHONG_E: &str = "phongE";
    pub const TEXT_NODE: &str = "pbrtTextNode";
    pub const AREA_LIGHT_MATERIAL: &str = "pbrtAreaLightMaterial";
}

/// Attribute values read from a shading node. Absent attributes stay `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShaderAttributes {
    pub color: Option<Vec3>,
    pub specular_color: Option<Vec3>,
    pub eccentricity: Option<f32>,
    pub roughness: Option<f32>,
    pub cosine_power: Option<f32>,
    pub intensity: Option<f32>,
    pub samples: Option<u32>,
    /// Raw scene text of pass-through nodes.
    pub text: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShadingNode {
    pub name: String,
    /// Host type name, the dispatch key for material translation.
    pub type_name: String,
    pub classification: String,
    pub attributes: ShaderAttributes,
}

impl ShadingNode {
    #[must_use]
    pub fn new(name: &str, type_name: &str, classification: &str) -> Self {
        Self {
            name: name.to_string(),
            type_name: type_name.to_string(),
            classification: classification.to_string(),
            attributes: ShaderAttributes::default(),
        }
    }

    /// A surface shader of an arbitrary host type.
    #[must_use]
    pub fn surface(name: &str, type_name: &str) -> Self {
        Self::new(name, type_name, SURFACE_CLASSIFICATION)
    }

    #[must_use]
    pub fn lambert(name: &str, color: Vec3) -> Self {
        let mut node = Self::surface(name, kinds::LAMBERT);
        node.attributes.color = Some(color);
        node
    }

    #[must_use]
    pub fn blinn(name: &str, color: Vec3, specular_color: Vec3, eccentricity: f32) -> Self {
        let mut node = Self::surface(name, kinds::BLINN);
        node.attributes.color = Some(color);
        node.attributes.specular_color = Some(specular_color);
        node.attributes.eccentricity = Some(eccentricity);
        node
    }

    #[must_use]
    pub fn phong(name: &str, color: Vec3, specular_color: Vec3, cosine_power: f32) -> Self {
        let mut node = Self::surface(name, kinds::PHONG);
        node.attributes.color = Some(color);
        node.attributes.specular_color = Some(specular_color);
        node.attributes.cosine_power = Some(cosine_power);
        node
    }

    #[must_use]
    pub fn text_node(name: &str, text: &str) -> Self {
        let mut node = Self::surface(name, kinds::TEXT_NODE);
        node.attributes.text = Some(text.to_string());
        node
    }

    #[must_use]
    pub fn area_light(name: &str, color: Vec3, intensity: f32, samples: u32) -> Self {
        let mut node = Self::surface(name, kinds::AREA_LIGHT_MATERIAL);
        node.attributes.color = Some(color);
        node.attributes.intensity = Some(intensity);
        node.attributes.samples = Some(samples);
        node
    }

    #[inline]
    #[must_use]
    pub fn is_surface_shader(&self) -> bool {
        self.classification.contains(SURFACE_CLASSIFICATION)
    }

    #[inline]
    #[must_use]
    pub fn is_area_light(&self) -> bool {
        self.type_name == kinds::AREA_LIGHT_MATERIAL
    }
}
