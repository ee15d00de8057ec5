use glam::{Mat4, Vec2, Vec3};

/// Lens projection of a host camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectionType {
    Perspective,
    Orthographic,
}

/// Camera shape data. The camera looks down its local -Z axis with +Y up.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub projection_type: ProjectionType,
    /// Horizontal field of view in radians.
    pub horizontal_fov: f32,
    /// Vertical field of view in radians.
    pub vertical_fov: f32,
    /// Width of the orthographic view volume.
    pub ortho_width: f32,
    /// Distance from the eye to the aim point.
    pub center_of_interest: f32,
    /// Focal length in millimetres.
    pub focal_length: f32,
    pub f_stop: f32,
    /// Film offset as a fraction of the film size.
    pub film_translate: Vec2,
}

impl Camera {
    /// Creates a perspective camera from field-of-view angles in degrees.
    #[must_use]
    pub fn new_perspective(horizontal_fov: f32, vertical_fov: f32) -> Self {
        Self {
            projection_type: ProjectionType::Perspective,
            horizontal_fov: horizontal_fov.to_radians(),
            vertical_fov: vertical_fov.to_radians(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn new_orthographic(ortho_width: f32) -> Self {
        Self {
            projection_type: ProjectionType::Orthographic,
            ortho_width,
            ..Self::default()
        }
    }

    #[inline]
    #[must_use]
    pub fn is_ortho(&self) -> bool {
        self.projection_type == ProjectionType::Orthographic
    }

    // ========================================================================
    // World-space framing
    // ========================================================================

    #[must_use]
    pub fn eye_point(&self, world: &Mat4) -> Vec3 {
        world.transform_point3(Vec3::ZERO)
    }

    #[must_use]
    pub fn view_direction(&self, world: &Mat4) -> Vec3 {
        world.transform_vector3(Vec3::NEG_Z).normalize_or_zero()
    }

    #[must_use]
    pub fn up_direction(&self, world: &Mat4) -> Vec3 {
        world.transform_vector3(Vec3::Y).normalize_or_zero()
    }

    /// The aim point, `center_of_interest` units along the view direction.
    #[must_use]
    pub fn center_of_interest_point(&self, world: &Mat4) -> Vec3 {
        self.eye_point(world) + self.view_direction(world) * self.center_of_interest
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            projection_type: ProjectionType::Perspective,
            horizontal_fov: 54.43_f32.to_radians(),
            vertical_fov: 42.18_f32.to_radians(),
            ortho_width: 30.0,
            center_of_interest: 5.0,
            focal_length: 35.0,
            f_stop: 5.6,
            film_translate: Vec2::ZERO,
        }
    }
}
