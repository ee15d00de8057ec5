//! Translation Registry
//!
//! Kind-tag dispatch from scene elements to translators. One table per
//! category:
//!
//! | Category | Key | Supported kinds |
//! |----------|-----|-----------------|
//! | Light | light type name | `directionalLight`, `pointLight`, `spotLight` |
//! | Shader | shader type name (surface shaders only) | `lambert`, `blinn`, `phong`, `phongE`, `pbrtTextNode` |
//! | Locator | locator type name | `pbrtTextObject` |
//!
//! Anything else resolves to [`Resolution::Unsupported`], a normal outcome
//! that the walker counts and moves past.

use rustc_hash::FxHashMap;

use crate::export::translators::{
    LightTranslator, LocatorTranslator, MaterialTranslator, Resolution, Translator,
};
use crate::resources::ShadingNode;
use crate::resources::shading::kinds;
use crate::scene::locator::TEXT_OBJECT;
use crate::scene::{Light, Locator, NodeHandle, NodeKind, Scene, ShaderKey};

pub type LightCtor = for<'a> fn(&'a Scene, NodeHandle, &'a Light) -> Translator<'a>;
pub type ShaderCtor = for<'a> fn(&'a ShadingNode) -> Translator<'a>;
pub type LocatorCtor = for<'a> fn(&'a Scene, NodeHandle, &'a Locator) -> Translator<'a>;

/// A node handed to the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Candidate {
    /// Positioned node of the DAG.
    Dag(NodeHandle),
    /// Shading node of the dependency graph.
    Shading(ShaderKey),
}

fn light_ctor<'a>(scene: &'a Scene, handle: NodeHandle, light: &'a Light) -> Translator<'a> {
    Translator::Light(LightTranslator::new(scene, handle, light))
}

fn matte_ctor(shader: &ShadingNode) -> Translator<'_> {
    Translator::Material(MaterialTranslator::matte(shader))
}

fn plastic_ctor(shader: &ShadingNode) -> Translator<'_> {
    Translator::Material(MaterialTranslator::plastic(shader))
}

fn text_ctor(shader: &ShadingNode) -> Translator<'_> {
    Translator::Material(MaterialTranslator::text(shader))
}

fn text_locator_ctor<'a>(scene: &'a Scene, handle: NodeHandle, locator: &'a Locator) -> Translator<'a> {
    Translator::Locator(LocatorTranslator::new(scene, handle, locator))
}

#[derive(Debug, Clone)]
pub struct TranslationRegistry {
    lights: FxHashMap<String, LightCtor>,
    shaders: FxHashMap<String, ShaderCtor>,
    locators: FxHashMap<String, LocatorCtor>,
}

impl TranslationRegistry {
    /// A registry with no translations at all.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            lights: FxHashMap::default(),
            shaders: FxHashMap::default(),
            locators: FxHashMap::default(),
        }
    }

    /// The stock set of translations.
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Self::empty();

        for light in ["directionalLight", "pointLight", "spotLight"] {
            registry.register_light(light, light_ctor);
        }

        registry.register_shader(kinds::LAMBERT, matte_ctor);
        registry.register_shader(kinds::BLINN, plastic_ctor);
        registry.register_shader(kinds::PHONG, plastic_ctor);
        registry.register_shader(kinds::PHONG_E, plastic_ctor);
        registry.register_shader(kinds::TEXT_NODE, text_ctor);

        registry.register_locator(TEXT_OBJECT, text_locator_ctor);
        registry
    }

    pub fn register_light(&mut self, kind: &str, ctor: LightCtor) {
        self.lights.insert(kind.to_string(), ctor);
    }

    pub fn register_shader(&mut self, kind: &str, ctor: ShaderCtor) {
        self.shaders.insert(kind.to_string(), ctor);
    }

    pub fn register_locator(&mut self, kind: &str, ctor: LocatorCtor) {
        self.locators.insert(kind.to_string(), ctor);
    }

    /// Resolves any candidate according to its category.
    pub fn resolve<'a>(&self, scene: &'a Scene, candidate: Candidate) -> Resolution<Translator<'a>> {
        match candidate {
            Candidate::Dag(handle) => {
                let Some(node) = scene.get_node(handle) else {
                    return Resolution::unsupported("dangling node");
                };
                match &node.kind {
                    NodeKind::Light(light) => self.resolve_light(scene, handle, light),
                    NodeKind::Locator(locator) => self.resolve_locator(scene, handle, locator),
                    other => Resolution::unsupported(format!("{:?}", other.category())),
                }
            }
            Candidate::Shading(key) => match scene.shader(key) {
                Some(shader) => self.resolve_shader(shader),
                None => Resolution::unsupported("dangling shading node"),
            },
        }
    }

    pub fn resolve_light<'a>(
        &self,
        scene: &'a Scene,
        handle: NodeHandle,
        light: &'a Light,
    ) -> Resolution<Translator<'a>> {
        let kind = light.kind.type_name();
        match self.lights.get(kind) {
            Some(ctor) => Resolution::Supported(ctor(scene, handle, light)),
            None => {
                log::warn!("Light type {kind} not supported");
                Resolution::unsupported(kind)
            }
        }
    }

    /// Only surface shaders are candidates; other shading nodes are
    /// declined without a warning.
    pub fn resolve_shader<'a>(&self, shader: &'a ShadingNode) -> Resolution<Translator<'a>> {
        let kind = shader.type_name.as_str();
        if !shader.is_surface_shader() {
            return Resolution::unsupported(kind);
        }
        if let Some(ctor) = self.shaders.get(kind) {
            return Resolution::Supported(ctor(shader));
        }
        if shader.is_area_light() {
            log::warn!("{kind} on {} is exported with its mesh", shader.name);
        } else {
            log::warn!("Shader type {kind} not supported");
        }
        Resolution::unsupported(kind)
    }

    pub fn resolve_locator<'a>(
        &self,
        scene: &'a Scene,
        handle: NodeHandle,
        locator: &'a Locator,
    ) -> Resolution<Translator<'a>> {
        match self.locators.get(locator.type_name.as_str()) {
            Some(ctor) => Resolution::Supported(ctor(scene, handle, locator)),
            None => {
                log::debug!("Locator type {} not supported", locator.type_name);
                Resolution::unsupported(locator.type_name.clone())
            }
        }
    }
}

impl Default for TranslationRegistry {
    fn default() -> Self {
        Self::new()
    }
}
