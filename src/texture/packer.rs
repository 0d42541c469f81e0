//! Packing of sample buffers into square RGBA float textures.
//!
//! Every texel of the output is populated: texels without a real point get
//! a random fallback point on a sphere around the origin so particles never
//! collapse onto `(0, 0, 0)`.

use glam::Vec3;
use rand::Rng;

use super::{atlas_side, ColorGradient};
use crate::error::MorphError;
use crate::options::{
    ColorWeight, FallbackDistribution, SamplingOptions, SlotPolicy,
};
use crate::sampling::{random_in_ball, random_on_sphere};

/// Square texture of RGBA `f32` texels, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleTexture {
    side: u32,
    data: Vec<f32>,
}

impl ParticleTexture {
    fn zeroed(side: u32) -> Self {
        let texels = side as usize * side as usize;
        Self {
            side,
            data: vec![0.0; texels * 4],
        }
    }

    /// Width and height in texels.
    #[must_use]
    pub fn side(&self) -> u32 {
        self.side
    }

    /// Number of texels (`side * side`).
    #[must_use]
    pub fn texel_count(&self) -> usize {
        self.data.len() / 4
    }

    /// Flat RGBA data, `side * side * 4` floats.
    #[must_use]
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Raw bytes for upload as an `Rgba32Float` texture.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.data)
    }

    /// RGBA channels of texel `index`, or `None` past the last texel.
    #[must_use]
    pub fn texel(&self, index: usize) -> Option<[f32; 4]> {
        let base = index.checked_mul(4)?;
        let rgba = self.data.get(base..base.checked_add(4)?)?;
        rgba.try_into().ok()
    }

    fn write(&mut self, index: usize, rgb: [f32; 3], alpha: f32) {
        let base = index * 4;
        self.data[base..base + 3].copy_from_slice(&rgb);
        self.data[base + 3] = alpha;
    }
}

/// Positions and colors of one model, ready for the particle shader.
#[derive(Debug, Clone, PartialEq)]
pub struct PackedModel {
    /// XYZ per texel; alpha unused (0).
    pub positions: ParticleTexture,
    /// RGB per texel; alpha always 1.
    pub colors: ParticleTexture,
    /// Texels holding real sampled points.
    pub sample_count: usize,
    /// Texels filled with fallback points.
    pub fallback_count: usize,
}

/// Packs flat XYZ sample buffers into fixed-size texture pairs.
#[derive(Debug, Clone)]
pub struct TexturePacker {
    side: u32,
    fallback_radius: f32,
    fallback: FallbackDistribution,
    slot_policy: SlotPolicy,
    color_weight: ColorWeight,
    gradient: ColorGradient,
}

impl TexturePacker {
    /// Packer for textures of `side × side` texels with default settings.
    #[must_use]
    pub fn new(side: u32) -> Self {
        Self::from_options(side, &SamplingOptions::default())
    }

    /// Packer whose atlas can hold `max_points` points.
    #[must_use]
    pub fn for_point_count(max_points: usize) -> Self {
        Self::new(atlas_side(max_points))
    }

    /// Packer for `side` configured from sampling options.
    #[must_use]
    pub fn from_options(side: u32, options: &SamplingOptions) -> Self {
        Self {
            side,
            fallback_radius: options.fallback_radius,
            fallback: options.fallback_distribution,
            slot_policy: options.slot_policy,
            color_weight: options.color_weight,
            gradient: ColorGradient {
                inner: options.inner_color,
                outer: options.outer_color,
            },
        }
    }

    /// Override the empty-slot rule.
    #[must_use]
    pub fn with_slot_policy(mut self, policy: SlotPolicy) -> Self {
        self.slot_policy = policy;
        self
    }

    /// Override fallback placement.
    #[must_use]
    pub fn with_fallback(
        mut self,
        distribution: FallbackDistribution,
        radius: f32,
    ) -> Self {
        self.fallback = distribution;
        self.fallback_radius = radius;
        self
    }

    /// Override the color weight rule.
    #[must_use]
    pub fn with_color_weight(mut self, weight: ColorWeight) -> Self {
        self.color_weight = weight;
        self
    }

    /// Override the color ramp.
    #[must_use]
    pub fn with_gradient(mut self, gradient: ColorGradient) -> Self {
        self.gradient = gradient;
        self
    }

    /// Texture side length.
    #[must_use]
    pub fn side(&self) -> u32 {
        self.side
    }

    /// Texels per texture.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.side as usize * self.side as usize
    }

    /// Pack `samples`, coloring each texel from the gradient.
    pub fn pack<R: Rng + ?Sized>(
        &self,
        samples: &[f32],
        rng: &mut R,
    ) -> Result<PackedModel, MorphError> {
        self.fill(samples, rng, |_, position, rng| {
            let weight = match self.color_weight {
                ColorWeight::Random => rng.random::<f32>(),
                ColorWeight::Radial => {
                    position.length() / self.fallback_radius
                }
            };
            self.gradient.at(weight)
        })
    }

    /// Pack `samples` with an explicit per-texel color assignment.
    pub fn pack_with<R, F>(
        &self,
        samples: &[f32],
        rng: &mut R,
        mut color: F,
    ) -> Result<PackedModel, MorphError>
    where
        R: Rng + ?Sized,
        F: FnMut(usize) -> [f32; 3],
    {
        self.fill(samples, rng, |index, _, _| color(index))
    }

    fn fill<R, F>(
        &self,
        samples: &[f32],
        rng: &mut R,
        mut color: F,
    ) -> Result<PackedModel, MorphError>
    where
        R: Rng + ?Sized,
        F: FnMut(usize, Vec3, &mut R) -> [f32; 3],
    {
        if samples.len() % 3 != 0 {
            return Err(MorphError::InvalidSampleBuffer(samples.len()));
        }
        if !(self.fallback_radius.is_finite() && self.fallback_radius > 0.0) {
            return Err(MorphError::InvalidFallbackRadius(self.fallback_radius));
        }
        let point_count = samples.len() / 3;
        let capacity = self.capacity();
        if point_count > capacity {
            return Err(MorphError::AtlasOverflow {
                points: point_count,
                capacity,
            });
        }

        let mut positions = ParticleTexture::zeroed(self.side);
        let mut colors = ParticleTexture::zeroed(self.side);
        let mut fallback_count = 0;

        for i in 0..capacity {
            let position = if let Some(p) = self.real_point(samples, i) {
                p
            } else {
                fallback_count += 1;
                self.fallback_point(rng)
            };
            positions.write(i, position.to_array(), 0.0);
            colors.write(i, color(i, position, &mut *rng), 1.0);
        }

        log::debug!(
            "packed {point_count} points into {side}x{side} texture \
             ({fallback_count} fallback texels)",
            side = self.side
        );

        Ok(PackedModel {
            positions,
            colors,
            sample_count: capacity - fallback_count,
            fallback_count,
        })
    }

    /// The sampled point for texel `index`, or `None` if the slot is empty.
    fn real_point(&self, samples: &[f32], index: usize) -> Option<Vec3> {
        let xyz = samples.get(index * 3..index * 3 + 3)?;
        let point = Vec3::from_slice(xyz);
        match self.slot_policy {
            SlotPolicy::ValidCount => Some(point),
            SlotPolicy::ZeroAsEmpty => {
                let empty = xyz.iter().any(|&c| c == 0.0 || c.is_nan());
                (!empty).then_some(point)
            }
        }
    }

    fn fallback_point<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec3 {
        match self.fallback {
            FallbackDistribution::Shell => {
                random_on_sphere(rng, self.fallback_radius)
            }
            FallbackDistribution::Volume => {
                random_in_ball(rng, self.fallback_radius)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(2024)
    }

    #[test]
    fn texture_sizes_follow_atlas_side() {
        let packer = TexturePacker::for_point_count(5);
        assert_eq!(packer.side(), 4);

        let samples = vec![1.0; 5 * 3];
        let packed = packer.pack(&samples, &mut rng()).unwrap();
        assert_eq!(packed.positions.data().len(), 4 * 4 * 4);
        assert_eq!(packed.colors.data().len(), 4 * 4 * 4);
        assert_eq!(packed.positions.as_bytes().len(), 4 * 4 * 4 * 4);
        assert_eq!(packed.sample_count, 5);
        assert_eq!(packed.fallback_count, 11);
    }

    #[test]
    fn texel_past_the_end_is_none() {
        let packed = TexturePacker::new(2).pack(&[], &mut rng()).unwrap();
        assert!(packed.positions.texel(3).is_some());
        assert!(packed.positions.texel(4).is_none());
        assert!(packed.colors.texel(usize::MAX).is_none());
    }

    #[test]
    fn real_points_are_copied_in_order() {
        let samples = [1.0, 2.0, 3.0, -4.0, 5.0, -6.0];
        let packed = TexturePacker::new(2).pack(&samples, &mut rng()).unwrap();
        assert_eq!(packed.positions.texel(0).unwrap(), [1.0, 2.0, 3.0, 0.0]);
        assert_eq!(packed.positions.texel(1).unwrap(), [-4.0, 5.0, -6.0, 0.0]);
    }

    #[test]
    fn trailing_texels_get_shell_fallbacks() {
        let samples = [1.0, 1.0, 1.0];
        let packer = TexturePacker::new(8);
        let packed = packer.pack(&samples, &mut rng()).unwrap();
        for i in 1..packed.positions.texel_count() {
            let [x, y, z, _] = packed.positions.texel(i).unwrap();
            let distance = Vec3::new(x, y, z).length();
            assert!((distance - 100.0).abs() < 1e-2, "texel {i}: {distance}");
        }
    }

    #[test]
    fn volume_fallbacks_stay_inside_radius() {
        let packer = TexturePacker::new(16)
            .with_fallback(FallbackDistribution::Volume, 10.0);
        let packed = packer.pack(&[], &mut rng()).unwrap();
        assert_eq!(packed.fallback_count, 256);
        for i in 0..packed.positions.texel_count() {
            let [x, y, z, _] = packed.positions.texel(i).unwrap();
            assert!(Vec3::new(x, y, z).length() <= 10.0 + 1e-4);
        }
    }

    #[test]
    fn color_alpha_is_always_one() {
        let samples: Vec<f32> = (1..=30).map(|i| i as f32).collect();
        let packed = TexturePacker::new(8).pack(&samples, &mut rng()).unwrap();
        for i in 0..packed.colors.texel_count() {
            assert_eq!(packed.colors.texel(i).unwrap()[3], 1.0);
        }
    }

    #[test]
    fn colors_lie_on_the_gradient() {
        let gradient = ColorGradient {
            inner: [0.0, 0.0, 0.0],
            outer: [1.0, 1.0, 1.0],
        };
        let packed = TexturePacker::new(4)
            .with_gradient(gradient)
            .pack(&[], &mut rng())
            .unwrap();
        for i in 0..packed.colors.texel_count() {
            let [r, g, b, _] = packed.colors.texel(i).unwrap();
            assert!((0.0..1.0).contains(&r));
            assert_eq!(r, g);
            assert_eq!(g, b);
        }
    }

    #[test]
    fn radial_weight_tracks_distance() {
        let gradient = ColorGradient {
            inner: [0.0, 0.0, 0.0],
            outer: [1.0, 1.0, 1.0],
        };
        let samples = [50.0, 0.5, 0.5];
        let packed = TexturePacker::new(2)
            .with_gradient(gradient)
            .with_color_weight(ColorWeight::Radial)
            .pack(&samples, &mut rng())
            .unwrap();
        let expected = Vec3::new(50.0, 0.5, 0.5).length() / 100.0;
        assert!((packed.colors.texel(0).unwrap()[0] - expected).abs() < 1e-6);
        // Fallback points sit on the shell, i.e. at full weight
        assert!((packed.colors.texel(1).unwrap()[0] - 1.0).abs() < 1e-4);
    }

    #[test]
    fn explicit_color_assignment_receives_texel_index() {
        let packed = TexturePacker::new(2)
            .pack_with(&[1.0, 1.0, 1.0], &mut rng(), |i| {
                [i as f32, 0.0, 0.0]
            })
            .unwrap();
        for i in 0..4 {
            assert_eq!(packed.colors.texel(i).unwrap(), [i as f32, 0.0, 0.0, 1.0]);
        }
    }

    #[test]
    fn valid_count_keeps_zero_coordinates() {
        let samples = [0.0, 2.0, 3.0];
        let packed = TexturePacker::new(1).pack(&samples, &mut rng()).unwrap();
        assert_eq!(packed.positions.texel(0).unwrap(), [0.0, 2.0, 3.0, 0.0]);
        assert_eq!(packed.fallback_count, 0);
    }

    #[test]
    fn zero_as_empty_replaces_zero_coordinates() {
        let samples = [0.0, 2.0, 3.0, 1.0, f32::NAN, 1.0, 4.0, 5.0, 6.0];
        let packed = TexturePacker::new(2)
            .with_slot_policy(SlotPolicy::ZeroAsEmpty)
            .pack(&samples, &mut rng())
            .unwrap();
        assert_eq!(packed.sample_count, 1);
        assert_eq!(packed.fallback_count, 3);
        assert_eq!(packed.positions.texel(2).unwrap(), [4.0, 5.0, 6.0, 0.0]);
        for i in [0, 1, 3] {
            let [x, y, z, _] = packed.positions.texel(i).unwrap();
            assert!((Vec3::new(x, y, z).length() - 100.0).abs() < 1e-2);
        }
    }

    #[test]
    fn degenerate_fallback_radius_is_rejected() {
        for radius in [0.0, -1.0, f32::NAN] {
            let packer = TexturePacker::new(4)
                .with_fallback(FallbackDistribution::Shell, radius)
                .with_color_weight(ColorWeight::Radial);
            assert!(matches!(
                packer.pack(&[1.0, 1.0, 1.0], &mut rng()),
                Err(MorphError::InvalidFallbackRadius(_))
            ));
        }
    }

    #[test]
    fn ragged_buffer_is_rejected() {
        let err = TexturePacker::new(2).pack(&[1.0, 2.0], &mut rng());
        assert!(matches!(err, Err(MorphError::InvalidSampleBuffer(2))));
    }

    #[test]
    fn overflow_is_rejected() {
        let samples = vec![1.0; 5 * 3];
        let err = TexturePacker::new(2).pack(&samples, &mut rng());
        assert!(matches!(
            err,
            Err(MorphError::AtlasOverflow {
                points: 5,
                capacity: 4
            })
        ));
    }
}
