use glam::Vec3;

/// Host light shape types.
///
/// Only the first three have a counterpart in the target renderer; the rest
/// exist so the exporter can recognise and decline them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightKind {
    Directional,
    Point,
    Spot {
        /// Full cone angle in radians.
        cone_angle: f32,
        /// Penumbra falloff in radians.
        drop_off: f32,
    },
    Ambient,
    Area,
    Volume,
}

impl LightKind {
    /// Host type name, used in log messages.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Directional => "directionalLight",
            Self::Point => "pointLight",
            Self::Spot { .. } => "spotLight",
            Self::Ambient => "ambientLight",
            Self::Area => "areaLight",
            Self::Volume => "volumeLight",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Light {
    pub color: Vec3,
    pub intensity: f32,
    pub kind: LightKind,
}

impl Light {
    #[must_use]
    pub fn new(kind: LightKind, color: Vec3, intensity: f32) -> Self {
        Self {
            color,
            intensity,
            kind,
        }
    }

    #[must_use]
    pub fn new_directional(color: Vec3, intensity: f32) -> Self {
        Self::new(LightKind::Directional, color, intensity)
    }

    #[must_use]
    pub fn new_point(color: Vec3, intensity: f32) -> Self {
        Self::new(LightKind::Point, color, intensity)
    }

    /// Creates a spot light from cone and drop-off angles in degrees.
    #[must_use]
    pub fn new_spot(color: Vec3, intensity: f32, cone_angle: f32, drop_off: f32) -> Self {
        Self::new(
            LightKind::Spot {
                cone_angle: cone_angle.to_radians(),
                drop_off: drop_off.to_radians(),
            },
            color,
            intensity,
        )
    }

    /// Color scaled by intensity, as written to the scene file.
    #[inline]
    #[must_use]
    pub fn radiance(&self) -> Vec3 {
        self.color * self.intensity
    }
}
