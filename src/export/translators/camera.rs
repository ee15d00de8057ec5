use crate::errors::Result;
use crate::export::format::{Fixed, Triple};
use crate::export::session::TranslateContext;
use crate::export::sink::OutputSink;
use crate::export::translators::Outcome;
use crate::scene::{Camera, NodeHandle, Scene};
use crate::settings::{PerspectiveType, UpAxis};

/// Millimetres per scene unit used to turn focal length into a lens radius.
const LENS_UNITS: f32 = 1000.0;

/// Writes the `LookAt` framing and the `Camera` block of the render camera.
#[derive(Debug, Clone, Copy)]
pub struct CameraTranslator<'a> {
    scene: &'a Scene,
    handle: NodeHandle,
    camera: &'a Camera,
}

impl<'a> CameraTranslator<'a> {
    #[must_use]
    pub fn new(scene: &'a Scene, handle: NodeHandle, camera: &'a Camera) -> Self {
        Self { scene, handle, camera }
    }

    pub fn write(&self, ctx: &mut TranslateContext<'_>, sink: &mut OutputSink) -> Result<Outcome> {
        let transformer = ctx.transformer;
        if transformer.up_axis() == UpAxis::Y {
            writeln!(sink, "Scale -1 1 1")?;
        }

        let world = self.scene.world_matrix(self.handle);
        let eye = transformer.to_target_point(self.camera.eye_point(&world));
        let at = transformer.to_target_point(self.camera.center_of_interest_point(&world));
        let up = transformer.to_target_vector(self.camera.up_direction(&world));

        writeln!(sink, "LookAt {}", Triple(eye))?;
        writeln!(sink, "\t{}", Triple(at))?;
        writeln!(sink, "\t{}", Triple(up))?;
        writeln!(sink)?;

        let image = &ctx.settings.image;
        let mut screen_scale = 1.0;
        if self.camera.is_ortho() {
            screen_scale = self.camera.ortho_width / 2.0;
            writeln!(sink, "Camera \"orthographic\"")?;
        } else {
            match ctx.settings.camera.projection {
                PerspectiveType::Perspective => {
                    let fov = if image.height < image.width {
                        self.camera.horizontal_fov
                    } else {
                        self.camera.vertical_fov
                    };
                    writeln!(sink, "Camera \"perspective\"")?;
                    writeln!(sink, "\t\"float fov\" [{}]", Fixed(fov.to_degrees()))?;
                }
                PerspectiveType::Environment => {
                    writeln!(sink, "Camera \"environment\"")?;
                }
            }
        }

        self.write_common(ctx, sink, screen_scale)?;
        writeln!(sink)?;
        Ok(Outcome::Written)
    }

    fn write_common(&self, ctx: &TranslateContext<'_>, sink: &mut OutputSink, screen_scale: f32) -> Result<()> {
        let settings = ctx.settings;
        let camera = self.camera;

        writeln!(
            sink,
            "\t\"float focaldistance\" [{}]",
            Fixed(camera.center_of_interest * ctx.transformer.scale_factor())
        )?;

        let lens_radius = if settings.camera.infinite_focus || camera.f_stop <= 0.0 {
            0.0
        } else {
            (camera.focal_length / LENS_UNITS) / (2.0 * camera.f_stop)
        };
        writeln!(sink, "\t\"float lensradius\" [{}]", Fixed(lens_radius))?;

        let [x0, x1, y0, y1] = screen_window(
            settings.image.width,
            settings.image.height,
            camera.film_translate.x,
            camera.film_translate.y,
            screen_scale,
        );
        writeln!(
            sink,
            "\t\"float screenwindow\" [{} {} {} {}]",
            Fixed(x0),
            Fixed(x1),
            Fixed(y0),
            Fixed(y1)
        )?;
        writeln!(sink, "\t\"float shutteropen\" [{}]", Fixed(0.0))?;
        writeln!(sink, "\t\"float shutterclose\" [{}]", Fixed(settings.camera.exposure_time))?;
        Ok(())
    }
}

/// Screen window `[x0 x1 y0 y1]` for the image aspect ratio, shifted by the
/// film translation (a fraction of the film size).
#[must_use]
pub fn screen_window(width: u32, height: u32, shift_x: f32, shift_y: f32, scale: f32) -> [f32; 4] {
    let ratio = width.max(1) as f32 / height.max(1) as f32;
    let (half_x, half_y) = if ratio > 1.0 { (1.0, 1.0 / ratio) } else { (ratio, 1.0) };

    [
        (2.0 * shift_x - half_x) * scale,
        (2.0 * shift_x + half_x) * scale,
        (2.0 * shift_y - half_y) * scale,
        (2.0 * shift_y + half_y) * scale,
    ]
}
