use crate::errors::Result;
use crate::export::format::ConcatTransform;
use crate::export::session::TranslateContext;
use crate::export::sink::OutputSink;
use crate::export::translators::Outcome;
use crate::export::translators::material::substitute_node_name;
use crate::scene::locator::DEFAULT_LOCATOR_TEXT;
use crate::scene::{Locator, NodeHandle, Scene};

/// Writes the user-authored text of a text locator under its transform.
#[derive(Debug, Clone, Copy)]
pub struct LocatorTranslator<'a> {
    scene: &'a Scene,
    handle: NodeHandle,
    locator: &'a Locator,
}

impl<'a> LocatorTranslator<'a> {
    #[must_use]
    pub fn new(scene: &'a Scene, handle: NodeHandle, locator: &'a Locator) -> Self {
        Self { scene, handle, locator }
    }

    pub fn write(&self, ctx: &mut TranslateContext<'_>, sink: &mut OutputSink) -> Result<Outcome> {
        let Some(node) = self.scene.get_node(self.handle) else {
            return Ok(Outcome::Skipped);
        };
        let world = ctx.transformer.to_target_matrix(&self.scene.world_matrix(self.handle));
        let text = self.locator.text.as_deref().unwrap_or(DEFAULT_LOCATOR_TEXT);

        writeln!(sink, "# Text Box {}", self.scene.full_path(self.handle))?;
        writeln!(sink, "TransformBegin")?;
        writeln!(sink, "{}", ConcatTransform(&world))?;
        writeln!(sink, "{}", substitute_node_name(text, &node.name))?;
        writeln!(sink, "TransformEnd")?;
        writeln!(sink)?;
        Ok(Outcome::Written)
    }
}
