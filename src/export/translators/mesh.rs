//! Polygon mesh translation.
//!
//! Each shader group of a mesh becomes one `trianglemesh` (or `loopsubdiv`)
//! shape preceded by its material, or by an `AreaLightSource` when the group
//! is bound to an area-light material.
//!
//! # Instancing
//!
//! A mesh referenced by several DAG nodes is written once, wrapped in an
//! `ObjectBegin`/`ObjectEnd` block named after the shape, when its first
//! visible instance is reached. Every instance then writes only its
//! transform and an `ObjectInstance` reference. Emissive meshes are never
//! instanced, since area lights cannot live inside object blocks.

use crate::errors::Result;
use crate::export::format::{ConcatTransform, Pair, Triple};
use crate::export::indexer::{GeometryIndexer, IndexedMesh};
use crate::export::session::{StreamId, TranslateContext};
use crate::export::sink::OutputSink;
use crate::export::translators::{Dispatch, Outcome, Resolution, Translator};
use crate::resources::{PolygonGroup, PolygonMesh, ShadingNode};
use crate::scene::{MeshKey, NodeHandle, NodeKind, Scene};

/// Resolves a mesh node to the stream it belongs in.
///
/// Meshes whose first group uses an area-light material go to the area-light
/// stream, everything else to the geometry stream. A closed target stream
/// means that category is switched off and the node is declined.
pub fn geo_factory<'a>(scene: &'a Scene, handle: NodeHandle, open: &[StreamId]) -> Resolution<Dispatch<'a>> {
    let Some(NodeKind::Mesh(key)) = scene.get_node(handle).map(|n| &n.kind) else {
        return Resolution::unsupported("non-mesh node");
    };
    let key = *key;
    let Some(mesh) = scene.mesh(key) else {
        log::warn!("Mesh node {} references a missing shape", scene.full_path(handle));
        return Resolution::unsupported("missing mesh");
    };

    let area_light = mesh
        .primary_shader()
        .and_then(|k| scene.shader(k))
        .is_some_and(ShadingNode::is_area_light);
    let stream = if area_light { StreamId::AreaLights } else { StreamId::Geometry };

    if !open.contains(&stream) {
        return Resolution::unsupported(if area_light { "area light mesh" } else { "mesh" });
    }

    Resolution::Supported(Dispatch::new(
        Translator::Mesh(MeshTranslator {
            scene,
            handle,
            key,
            mesh,
            area_light,
        }),
        stream,
    ))
}

#[derive(Debug, Clone, Copy)]
pub struct MeshTranslator<'a> {
    scene: &'a Scene,
    handle: NodeHandle,
    key: MeshKey,
    mesh: &'a PolygonMesh,
    area_light: bool,
}

impl MeshTranslator<'_> {
    pub fn write(&self, ctx: &mut TranslateContext<'_>, sink: &mut OutputSink) -> Result<Outcome> {
        let path = self.scene.full_path(self.handle);

        if let Err(err) = self.mesh.validate() {
            log::warn!("Skipping mesh {path}: {err}");
            return Ok(Outcome::Skipped);
        }

        // Index every group before writing, so a failure leaves no partial block.
        let groups = self.mesh.shader_groups();
        let mut sets = Vec::with_capacity(groups.len());
        for (index, group) in groups.iter().enumerate() {
            if !check_group(&path, index, group) {
                continue;
            }
            match GeometryIndexer::new(self.mesh).index(group) {
                Ok(indexed) => sets.push((index, group, indexed)),
                Err(err) => {
                    log::warn!("Skipping mesh {path}: {err}");
                    return Ok(Outcome::Skipped);
                }
            }
        }
        if sets.is_empty() {
            log::warn!("Skipping mesh {path}: no polygon set to write");
            return Ok(Outcome::Skipped);
        }

        let world = ctx.transformer.to_target_matrix(&self.scene.world_matrix(self.handle));
        let instanced = !self.area_light && self.scene.instance_count(self.key) > 1;

        if instanced {
            let name = &self.mesh.name;
            if ctx.emitted_objects.insert(self.key) {
                writeln!(sink, "# Polygon Shape {path} (object)")?;
                writeln!(sink, "ObjectBegin \"{name}\"")?;
                for (_, group, indexed) in &sets {
                    self.write_group(sink, group, indexed)?;
                }
                writeln!(sink, "ObjectEnd")?;
                writeln!(sink)?;
            }

            writeln!(sink, "# Polygon Shape {path} (instance)")?;
            writeln!(sink, "AttributeBegin")?;
            writeln!(sink, "{}", ConcatTransform(&world))?;
            writeln!(sink, "\tObjectInstance \"{name}\"")?;
            writeln!(sink, "AttributeEnd")?;
            writeln!(sink)?;
        } else {
            for (index, group, indexed) in &sets {
                writeln!(sink, "# Polygon Shape {path} (set {index})")?;
                writeln!(sink, "AttributeBegin")?;
                writeln!(sink, "{}", ConcatTransform(&world))?;
                self.write_group(sink, group, indexed)?;
                writeln!(sink, "AttributeEnd")?;
                writeln!(sink)?;
            }
        }

        Ok(Outcome::Written)
    }

    fn write_group(&self, sink: &mut OutputSink, group: &PolygonGroup, indexed: &IndexedMesh) -> Result<()> {
        // -- Material or emission --
        match group.shader.and_then(|k| self.scene.shader(k)) {
            Some(shader) if shader.is_area_light() => write_area_light(sink, shader)?,
            Some(shader) => writeln!(sink, "\tNamedMaterial \"{}\"", shader.name)?,
            None => log::debug!("Mesh '{}' has a polygon set without a shader", self.mesh.name),
        }

        // -- Shape --
        let subdivided = self.mesh.subdivision_levels;
        match subdivided {
            Some(levels) => {
                writeln!(sink, "\tShape \"loopsubdiv\"")?;
                writeln!(sink, "\t\t\"integer nlevels\" [{levels}]")?;
            }
            None => writeln!(sink, "\tShape \"trianglemesh\"")?,
        }

        write_arrays(sink, indexed, subdivided.is_none())
    }
}

fn check_group(path: &str, index: usize, group: &PolygonGroup) -> bool {
    if group.is_empty() {
        log::warn!("Skipping empty polygon set {index} of {path}");
        return false;
    }
    true
}

fn write_area_light(sink: &mut OutputSink, shader: &ShadingNode) -> Result<()> {
    let attrs = &shader.attributes;
    let gain = attrs.intensity.unwrap_or(1.0);
    let color = attrs.color.unwrap_or(glam::Vec3::ONE) * gain;

    writeln!(sink, "\tAreaLightSource \"diffuse\"")?;
    writeln!(sink, "\t\t\"integer nsamples\" [{}]", attrs.samples.unwrap_or(1))?;
    writeln!(sink, "\t\t\"color L\" [{}]", Triple(color))
}

fn write_arrays(sink: &mut OutputSink, indexed: &IndexedMesh, with_normals: bool) -> Result<()> {
    writeln!(sink, "\t\"integer indices\" [")?;
    for tri in indexed.indices.chunks(3) {
        let line = tri.iter().map(u32::to_string).collect::<Vec<_>>().join(" ");
        writeln!(sink, "\t\t{line}")?;
    }
    writeln!(sink, "\t]")?;

    writeln!(sink, "\t\"point P\" [")?;
    for p in &indexed.points {
        writeln!(sink, "\t\t{}", Triple(*p))?;
    }
    writeln!(sink, "\t]")?;

    if let Some(uvs) = indexed.uvs.as_ref().filter(|uvs| !uvs.is_empty()) {
        writeln!(sink, "\t\"float uv\" [")?;
        for uv in uvs {
            writeln!(sink, "\t\t{}", Pair(*uv))?;
        }
        writeln!(sink, "\t]")?;
    }

    if with_normals {
        writeln!(sink, "\t\"normal N\" [")?;
        for n in &indexed.normals {
            writeln!(sink, "\t\t{}", Triple(*n))?;
        }
        writeln!(sink, "\t]")?;
    }
    Ok(())
}
