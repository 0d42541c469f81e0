use glam::{Mat4, Vec3, Vec4};

use crate::options::CameraOptions;

/// Perspective camera defined by eye position, target, and projection
/// parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Eye (camera) position in world space.
    pub eye: Vec3,
    /// Look-at target position.
    pub target: Vec3,
    /// Up direction vector.
    pub up: Vec3,
    /// Viewport aspect ratio (width / height).
    pub aspect: f32,
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
}

impl Camera {
    /// Camera on the +Z axis looking at the origin.
    #[must_use]
    pub fn from_options(options: &CameraOptions, aspect: f32) -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, options.distance),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect,
            fovy: options.fovy,
            znear: options.znear,
            zfar: options.zfar,
        }
    }

    /// Build the combined view-projection matrix.
    #[must_use]
    pub fn build_matrix(&self) -> Mat4 {
        let view = Mat4::look_at_rh(self.eye, self.target, self.up);
        // perspective_rh uses a [0,1] depth range
        let proj = Mat4::perspective_rh(
            self.fovy.to_radians(),
            self.aspect,
            self.znear,
            self.zfar,
        );
        proj * view
    }

    /// World-space ray `(origin, direction)` through a pixel.
    #[must_use]
    pub fn screen_to_ray(
        &self,
        screen_x: f32,
        screen_y: f32,
        screen_width: f32,
        screen_height: f32,
    ) -> (Vec3, Vec3) {
        // Convert to NDC (-1 to 1), y flipped for screen coordinates
        let ndc_x = (screen_x / screen_width) * 2.0 - 1.0;
        let ndc_y = 1.0 - (screen_y / screen_height) * 2.0;

        let inv_view_proj = self.build_matrix().inverse();
        let near = inv_view_proj * Vec4::new(ndc_x, ndc_y, 0.0, 1.0);
        let far = inv_view_proj * Vec4::new(ndc_x, ndc_y, 1.0, 1.0);

        let origin = near.truncate() / near.w;
        let far = far.truncate() / far.w;
        (origin, (far - origin).normalize())
    }

    /// Pixel → point on the plane through the target facing the camera.
    ///
    /// Returns `None` for a zero-sized viewport or a ray parallel to the
    /// plane.
    #[must_use]
    pub fn pointer_to_world(
        &self,
        screen_x: f32,
        screen_y: f32,
        screen_width: f32,
        screen_height: f32,
    ) -> Option<Vec3> {
        if screen_width <= 0.0 || screen_height <= 0.0 {
            return None;
        }
        let (origin, dir) =
            self.screen_to_ray(screen_x, screen_y, screen_width, screen_height);
        let normal = (self.eye - self.target).normalize();
        let denom = dir.dot(normal);
        if denom.abs() < 1e-6 {
            return None;
        }
        let t = (self.target - origin).dot(normal) / denom;
        (t >= 0.0).then(|| origin + dir * t)
    }
}
