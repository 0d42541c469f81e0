use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::MorphError;

/// Which texels count as populated when packing a sample buffer.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default,
    JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum SlotPolicy {
    /// Texel `i` holds a real point iff `i < sample_count`.
    #[default]
    ValidCount,
    /// Any point with a coordinate equal to `0.0` or NaN is treated as an
    /// empty slot and replaced by a fallback point. Reproduces the legacy
    /// look pixel for pixel.
    ZeroAsEmpty,
}

/// Where fallback points for empty texels are placed.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default,
    JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum FallbackDistribution {
    /// On the sphere surface, exactly at the fallback radius.
    #[default]
    Shell,
    /// Anywhere inside the ball, uniform in volume.
    Volume,
}

/// How the gradient weight for a point's color is chosen.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default,
    JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum ColorWeight {
    /// Uniform random weight per texel, independent of position.
    #[default]
    Random,
    /// Distance from the origin divided by the fallback radius.
    Radial,
}

/// Point sampling and texture packing parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Sampling", inline)]
#[serde(default)]
pub struct SamplingOptions {
    /// Radius of the sphere that fallback points are drawn on.
    #[schemars(title = "Fallback Radius", range(min = 1.0, max = 1000.0))]
    pub fallback_radius: f32,
    /// Shell or volume placement of fallback points.
    pub fallback_distribution: FallbackDistribution,
    /// Empty-texel detection rule.
    pub slot_policy: SlotPolicy,
    /// Color weight rule.
    pub color_weight: ColorWeight,
    /// Gradient color at weight 0.
    #[schemars(skip)]
    pub inner_color: [f32; 3],
    /// Gradient color at weight 1.
    #[schemars(skip)]
    pub outer_color: [f32; 3],
    /// Randomize point order before packing.
    #[schemars(title = "Shuffle Points")]
    pub shuffle_points: bool,
}

impl SamplingOptions {
    /// Reject settings the packer cannot honor.
    pub fn validate(&self) -> Result<(), MorphError> {
        if self.fallback_radius.is_finite() && self.fallback_radius > 0.0 {
            Ok(())
        } else {
            Err(MorphError::InvalidFallbackRadius(self.fallback_radius))
        }
    }
}

impl Default for SamplingOptions {
    fn default() -> Self {
        Self {
            fallback_radius: 100.0,
            fallback_distribution: FallbackDistribution::Shell,
            slot_policy: SlotPolicy::ValidCount,
            color_weight: ColorWeight::Random,
            inner_color: [1.0, 0.42, 0.16],
            outer_color: [0.2, 0.38, 1.0],
            shuffle_points: true,
        }
    }
}
