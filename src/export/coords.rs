//! Coordinate Conversion
//!
//! The target renderer is Z-up. Hosts that work Y-up need every exported
//! position, direction and transform rotated by +90° about X, which maps
//! `(x, y, z)` to `(x, -z, y)`. After the axis change a uniform scene scale
//! is applied to positions: whole points, and the translation row of
//! matrices. Free vectors are never scaled.
//!
//! Every translator that writes geometry or transforms goes through one
//! [`CoordinateTransformer`] owned by the export session.

use glam::{Mat4, Vec3, Vec4};

use crate::settings::{ExportSettings, UpAxis};

/// Exact +90° rotation about X, written out to avoid `cos(pi/2)` residue.
const Y_UP_TO_Z_UP: Mat4 = Mat4::from_cols(Vec4::X, Vec4::Z, Vec4::NEG_Y, Vec4::W);

/// Converts host-space values into target-renderer space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateTransformer {
    up_axis: UpAxis,
    scale: f32,
}

impl CoordinateTransformer {
    #[must_use]
    pub fn new(up_axis: UpAxis, scale: f32) -> Self {
        Self { up_axis, scale }
    }

    #[must_use]
    pub fn from_settings(settings: &ExportSettings) -> Self {
        Self::new(settings.up_axis, settings.scene_scale)
    }

    #[inline]
    #[must_use]
    pub fn up_axis(&self) -> UpAxis {
        self.up_axis
    }

    #[inline]
    #[must_use]
    pub fn scale_factor(&self) -> f32 {
        self.scale
    }

    #[inline]
    #[allow(clippy::float_cmp)]
    fn is_unit_scale(&self) -> bool {
        self.scale == 1.0
    }

    /// True when conversion leaves every value untouched.
    #[inline]
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.up_axis == UpAxis::Z && self.is_unit_scale()
    }

    #[must_use]
    pub fn to_target_point(&self, p: Vec3) -> Vec3 {
        let p = self.to_target_vector(p);
        if self.is_unit_scale() { p } else { p * self.scale }
    }

    #[must_use]
    pub fn to_target_vector(&self, v: Vec3) -> Vec3 {
        match self.up_axis {
            UpAxis::Y => Vec3::new(v.x, -v.z, v.y),
            UpAxis::Z => v,
        }
    }

    /// Converts a world matrix: axis change on the rotational and
    /// translational parts, then scale on the translation only.
    #[must_use]
    pub fn to_target_matrix(&self, m: &Mat4) -> Mat4 {
        if self.is_identity() {
            return *m;
        }
        let mut out = match self.up_axis {
            UpAxis::Y => Y_UP_TO_Z_UP * *m,
            UpAxis::Z => *m,
        };
        if !self.is_unit_scale() {
            let translation = out.w_axis.truncate() * self.scale;
            out.w_axis = translation.extend(out.w_axis.w);
        }
        out
    }
}

impl Default for CoordinateTransformer {
    fn default() -> Self {
        Self::new(UpAxis::Z, 1.0)
    }
}
