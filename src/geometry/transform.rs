use glam::{Affine3A, EulerRot, Quat, Vec3};

/// Placement of a model's raw geometry before it is sampled.
///
/// Applied as scale, then rotation (XYZ Euler), then translation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelTransform {
    /// Per-axis scale factors.
    pub scale: Vec3,
    /// Euler rotation in radians, applied in X, Y, Z order.
    pub rotation: Vec3,
    /// World-space offset.
    pub translation: Vec3,
}

impl ModelTransform {
    /// Identity transform.
    pub const IDENTITY: Self = Self {
        scale: Vec3::ONE,
        rotation: Vec3::ZERO,
        translation: Vec3::ZERO,
    };

    /// Uniform scale with no rotation or offset.
    #[must_use]
    pub fn uniform_scale(factor: f32) -> Self {
        Self {
            scale: Vec3::splat(factor),
            ..Self::IDENTITY
        }
    }

    /// Build from the degree-based rotation used in option files.
    #[must_use]
    pub fn from_degrees(
        scale: [f32; 3],
        rotation_degrees: [f32; 3],
        translation: [f32; 3],
    ) -> Self {
        let [rx, ry, rz] = rotation_degrees;
        Self {
            scale: Vec3::from_array(scale),
            rotation: Vec3::new(
                rx.to_radians(),
                ry.to_radians(),
                rz.to_radians(),
            ),
            translation: Vec3::from_array(translation),
        }
    }

    /// The affine matrix for this transform.
    #[must_use]
    pub fn to_affine(&self) -> Affine3A {
        let rotation = Quat::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        );
        Affine3A::from_scale_rotation_translation(
            self.scale,
            rotation,
            self.translation,
        )
    }

    /// Whether applying this transform would leave geometry unchanged.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }
}

impl Default for ModelTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}
