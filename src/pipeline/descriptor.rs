use crate::geometry::ModelTransform;
use crate::options::ModelOptions;
use crate::texture::PackedModel;

/// Where a model is in its load → sample → pack lifecycle.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelState {
    /// Geometry has not arrived yet.
    Pending,
    /// Sampled and packed; only the textures are kept.
    Packed(PackedModel),
    /// Geometry failed to load or could not be sampled.
    Failed(String),
}

/// One morph target of a [`MorphSet`](super::MorphSet).
#[derive(Debug, Clone, PartialEq)]
pub struct ModelDescriptor {
    /// Model identifier.
    pub name: String,
    /// Asset name the geometry is loaded from.
    pub mesh: String,
    /// Placement applied before sampling.
    pub transform: ModelTransform,
    /// Number of surface points to sample.
    pub sample_count: usize,
    /// Lifecycle state.
    pub state: ModelState,
}

impl ModelDescriptor {
    /// Pending descriptor built from configuration.
    #[must_use]
    pub fn from_options(options: &ModelOptions) -> Self {
        Self {
            name: options.name.clone(),
            mesh: options.mesh.clone(),
            transform: options.transform(),
            sample_count: options.sample_count,
            state: ModelState::Pending,
        }
    }

    /// Packed textures, once available.
    #[must_use]
    pub fn packed(&self) -> Option<&PackedModel> {
        match &self.state {
            ModelState::Packed(packed) => Some(packed),
            _ => None,
        }
    }

    /// Whether geometry has not arrived yet.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.state == ModelState::Pending
    }
}
