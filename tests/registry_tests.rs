//! Translation Registry Tests
//!
//! Tests for:
//! - Kind-tag dispatch for lights, shaders and locators
//! - Material heuristics (matte / plastic roughness priority / text pass-through)
//! - Unsupported kinds resolve without error
//! - Custom registrations

use glam::Vec3;

use pbrt_export::export::translators::material::{MaterialModel, plastic_roughness, substitute_node_name};
use pbrt_export::export::translators::{MaterialTranslator, Translator};
use pbrt_export::export::{Candidate, OutputSink, Resolution, TranslationRegistry};
use pbrt_export::resources::{ShaderAttributes, ShadingNode};
use pbrt_export::scene::{Light, LightKind, Locator, Scene};

const EPSILON: f32 = 1e-6;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn material_model(resolution: Resolution<Translator<'_>>) -> Option<MaterialModel> {
    match resolution {
        Resolution::Supported(Translator::Material(t)) => Some(t.model()),
        _ => None,
    }
}

fn plastic_everything(shader: &ShadingNode) -> Translator<'_> {
    Translator::Material(MaterialTranslator::plastic(shader))
}

fn write_material(translator: &MaterialTranslator<'_>) -> String {
    let mut sink = OutputSink::buffered("materials.pbrt");
    translator.write(&mut sink).unwrap();
    sink.exported_text().unwrap().to_string()
}

// ============================================================================
// Shader dispatch
// ============================================================================

#[test]
fn stock_shaders_map_to_material_models() {
    let registry = TranslationRegistry::new();
    let lambert = ShadingNode::lambert("lambert1", Vec3::ONE);
    let blinn = ShadingNode::blinn("blinn1", Vec3::ONE, Vec3::ONE, 0.3);
    let phong = ShadingNode::phong("phong1", Vec3::ONE, Vec3::ONE, 20.0);
    let phong_e = ShadingNode::surface("phongE1", "phongE");
    let text = ShadingNode::text_node("custom", "Material \"glass\"");

    assert_eq!(material_model(registry.resolve_shader(&lambert)), Some(MaterialModel::Matte));
    assert_eq!(material_model(registry.resolve_shader(&blinn)), Some(MaterialModel::Plastic));
    assert_eq!(material_model(registry.resolve_shader(&phong)), Some(MaterialModel::Plastic));
    assert_eq!(material_model(registry.resolve_shader(&phong_e)), Some(MaterialModel::Plastic));
    assert_eq!(material_model(registry.resolve_shader(&text)), Some(MaterialModel::Text));
}

#[test]
fn unknown_surface_shader_is_unsupported() {
    let registry = TranslationRegistry::new();
    let ramp = ShadingNode::surface("ramp1", "rampShader");

    let resolution = registry.resolve_shader(&ramp);
    assert!(!resolution.is_supported());
    assert!(matches!(resolution, Resolution::Unsupported { kind } if kind == "rampShader"));
}

#[test]
fn non_surface_nodes_are_declined() {
    let registry = TranslationRegistry::new();
    let texture = ShadingNode::new("file1", "lambert", "texture/2d");
    assert!(!registry.resolve_shader(&texture).is_supported());
}

#[test]
fn area_light_material_is_left_to_the_mesh() {
    let registry = TranslationRegistry::new();
    let emitter = ShadingNode::area_light("glow", Vec3::ONE, 4.0, 8);
    assert!(!registry.resolve_shader(&emitter).is_supported());
}

// ============================================================================
// Light and locator dispatch
// ============================================================================

#[test]
fn only_three_light_kinds_are_supported() {
    let mut scene = Scene::new();
    let registry = TranslationRegistry::new();

    let kinds = [
        (Light::new_directional(Vec3::ONE, 1.0), true),
        (Light::new_point(Vec3::ONE, 1.0), true),
        (Light::new_spot(Vec3::ONE, 1.0, 40.0, 2.0), true),
        (Light::new(LightKind::Ambient, Vec3::ONE, 1.0), false),
        (Light::new(LightKind::Area, Vec3::ONE, 1.0), false),
        (Light::new(LightKind::Volume, Vec3::ONE, 1.0), false),
    ];
    let handles: Vec<_> = kinds
        .iter()
        .map(|(light, supported)| (scene.build_node("light").with_light(light.clone()).build(), *supported))
        .collect();

    for (handle, supported) in handles {
        let resolution = registry.resolve(&scene, Candidate::Dag(handle));
        assert_eq!(resolution.is_supported(), supported);
    }
}

#[test]
fn text_locator_resolves_and_other_locators_do_not() {
    let mut scene = Scene::new();
    let registry = TranslationRegistry::new();
    let text = scene.build_node("text1").with_locator(Locator::default()).build();
    let plain = scene.build_node("locator1").with_locator(Locator::new("locator")).build();

    assert!(matches!(
        registry.resolve(&scene, Candidate::Dag(text)),
        Resolution::Supported(Translator::Locator(_))
    ));
    assert!(!registry.resolve(&scene, Candidate::Dag(plain)).is_supported());
}

#[test]
fn transforms_are_not_translated() {
    let mut scene = Scene::new();
    let group = scene.build_node("group1").build();
    assert!(!TranslationRegistry::new().resolve(&scene, Candidate::Dag(group)).is_supported());
}

#[test]
fn empty_registry_supports_nothing_until_registered() {
    let mut scene = Scene::new();
    let lambert = scene.add_shader(ShadingNode::lambert("lambert1", Vec3::ONE));

    let mut registry = TranslationRegistry::empty();
    assert!(!registry.resolve(&scene, Candidate::Shading(lambert)).is_supported());

    registry.register_shader("lambert", plastic_everything);
    assert_eq!(
        material_model(registry.resolve(&scene, Candidate::Shading(lambert))),
        Some(MaterialModel::Plastic)
    );
}

// ============================================================================
// Material output
// ============================================================================

#[test]
fn lambert_writes_matte() {
    let shader = ShadingNode::lambert("lambert1", Vec3::new(0.2, 0.4, 0.6));
    let text = write_material(&MaterialTranslator::matte(&shader));

    assert!(text.contains("MakeNamedMaterial \"lambert1\" \"string type\" [\"matte\"]"));
    assert!(text.contains("\"color Kd\" [0.200000 0.400000 0.600000]"));
    assert!(!text.contains("Ks"));
}

#[test]
fn blinn_writes_plastic_with_eccentricity() {
    let shader = ShadingNode::blinn("blinn1", Vec3::ONE, Vec3::splat(0.5), 0.3);
    let text = write_material(&MaterialTranslator::plastic(&shader));

    assert!(text.contains("[\"plastic\"]"));
    assert!(text.contains("\"color Ks\" [0.500000 0.500000 0.500000]"));
    assert!(text.contains("\"float roughness\" [0.300000]"));
}

#[test]
fn roughness_priority() {
    let mut attrs = ShaderAttributes {
        eccentricity: Some(0.3),
        roughness: Some(0.6),
        cosine_power: Some(20.0),
        ..ShaderAttributes::default()
    };
    assert!(approx(plastic_roughness(&attrs), 0.3));

    attrs.eccentricity = None;
    assert!(approx(plastic_roughness(&attrs), 0.6));

    attrs.roughness = None;
    assert!(approx(plastic_roughness(&attrs), 0.05));

    attrs.cosine_power = None;
    assert!(approx(plastic_roughness(&attrs), 0.1));
}

#[test]
fn text_node_substitutes_node_name() {
    let shader = ShadingNode::text_node("glass1", "MakeNamedMaterial \"%NODE_NAME\" \"string type\" [\"glass\"]");
    let text = write_material(&MaterialTranslator::text(&shader));

    assert!(text.starts_with("#pbrtTextNode glass1\n"));
    assert!(text.contains("MakeNamedMaterial \"glass1\""));
    assert!(!text.contains("%NODE_NAME"));
}

#[test]
fn substitution_replaces_every_token() {
    assert_eq!(substitute_node_name("%NODE_NAME/%NODE_NAME", "n"), "n/n");
    assert_eq!(substitute_node_name("plain", "n"), "plain");
}
