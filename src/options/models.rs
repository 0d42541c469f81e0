use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::geometry::ModelTransform;

/// One morph target: which mesh to load, how to place it and how many
/// points to sample from it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(default)]
pub struct ModelOptions {
    /// Identifier used in logs and exported file names.
    pub name: String,
    /// Asset name handed to the mesh source.
    pub mesh: String,
    /// Number of surface points to sample.
    pub sample_count: usize,
    /// Per-axis scale.
    pub scale: [f32; 3],
    /// XYZ Euler rotation in degrees.
    pub rotation_degrees: [f32; 3],
    /// World-space offset.
    pub translation: [f32; 3],
}

impl ModelOptions {
    /// Model sampling `sample_count` points from `mesh`, scaled uniformly.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        mesh: impl Into<String>,
        sample_count: usize,
        scale: f32,
    ) -> Self {
        Self {
            name: name.into(),
            mesh: mesh.into(),
            sample_count,
            scale: [scale; 3],
            ..Self::default()
        }
    }

    /// Transform applied to the raw mesh before sampling.
    #[must_use]
    pub fn transform(&self) -> ModelTransform {
        ModelTransform::from_degrees(
            self.scale,
            self.rotation_degrees,
            self.translation,
        )
    }
}

impl Default for ModelOptions {
    fn default() -> Self {
        Self {
            name: String::new(),
            mesh: String::new(),
            sample_count: 10_000,
            scale: [1.0; 3],
            rotation_degrees: [0.0; 3],
            translation: [0.0; 3],
        }
    }
}

/// The morph sequence shown when no preset overrides it.
pub(super) fn default_models() -> Vec<ModelOptions> {
    vec![
        ModelOptions::new("sphere", "sphere", 60_000, 120.0),
        ModelOptions {
            rotation_degrees: [35.0, 45.0, 0.0],
            ..ModelOptions::new("cube", "cube", 40_000, 90.0)
        },
        ModelOptions {
            rotation_degrees: [70.0, 0.0, 0.0],
            ..ModelOptions::new("torus", "torus", 50_000, 140.0)
        },
        ModelOptions::new("octahedron", "octahedron", 30_000, 130.0),
    ]
}
