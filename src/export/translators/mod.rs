//! Translators
//!
//! A translator turns one scene element into its block of scene text. Each
//! variant borrows the element it describes and writes on demand; none keeps
//! state of its own.

pub mod camera;
pub mod globals;
pub mod light;
pub mod locator;
pub mod material;
pub mod mesh;

pub use camera::CameraTranslator;
pub use globals::GlobalsTranslator;
pub use light::{LightTranslator, write_default_lighting};
pub use locator::LocatorTranslator;
pub use material::{MaterialModel, MaterialTranslator};
pub use mesh::MeshTranslator;

use crate::errors::Result;
use crate::export::session::{StreamId, TranslateContext};
use crate::export::sink::OutputSink;

/// Result of asking a factory for a translator.
#[derive(Debug)]
pub enum Resolution<T> {
    Supported(T),
    /// The node's kind has no translation. Never an error.
    Unsupported { kind: String },
}

impl<T> Resolution<T> {
    #[must_use]
    pub fn unsupported(kind: impl Into<String>) -> Self {
        Self::Unsupported { kind: kind.into() }
    }

    #[inline]
    #[must_use]
    pub fn is_supported(&self) -> bool {
        matches!(self, Self::Supported(_))
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Resolution<U> {
        match self {
            Self::Supported(value) => Resolution::Supported(f(value)),
            Self::Unsupported { kind } => Resolution::Unsupported { kind },
        }
    }
}

/// What a translator did with its element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Written,
    /// Recoverable problem, already logged; nothing counts as exported.
    Skipped,
}

#[derive(Debug)]
pub enum Translator<'a> {
    Light(LightTranslator<'a>),
    Material(MaterialTranslator<'a>),
    Locator(LocatorTranslator<'a>),
    Camera(CameraTranslator<'a>),
    Globals(GlobalsTranslator),
    Mesh(MeshTranslator<'a>),
}

impl Translator<'_> {
    pub fn write(&self, ctx: &mut TranslateContext<'_>, sink: &mut OutputSink) -> Result<Outcome> {
        match self {
            Self::Light(t) => t.write(ctx, sink),
            Self::Material(t) => t.write(sink),
            Self::Locator(t) => t.write(ctx, sink),
            Self::Camera(t) => t.write(ctx, sink),
            Self::Globals(t) => t.write(ctx, sink),
            Self::Mesh(t) => t.write(ctx, sink),
        }
    }
}

/// A translator bound to the stream it writes into.
#[derive(Debug)]
pub struct Dispatch<'a> {
    pub translator: Translator<'a>,
    pub stream: StreamId,
}

impl<'a> Dispatch<'a> {
    #[must_use]
    pub fn new(translator: Translator<'a>, stream: StreamId) -> Self {
        Self { translator, stream }
    }

    /// Routes to the main scene stream.
    #[must_use]
    pub fn main(translator: Translator<'a>) -> Self {
        Self::new(translator, StreamId::Main)
    }
}
