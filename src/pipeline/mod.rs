//! Model lifecycle from geometry load to packed textures.
//!
//! A [`MorphSet`] is configured with every morph target up front, which
//! fixes the shared texture size. Geometry then arrives model by model
//! (in any order) through [`MorphSet::on_geometry_loaded`]; each model is
//! transformed, sampled and packed on arrival and its raw samples dropped.
//! The particle system can be built once the last load has reported in.

mod descriptor;
mod join;

pub use descriptor::{ModelDescriptor, ModelState};
pub use join::{JoinStatus, LoadJoin};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rustc_hash::FxHashMap;

use crate::error::MorphError;
use crate::geometry::{MeshSource, TriangleMesh};
use crate::options::{ModelOptions, Options, SamplingOptions};
use crate::sampling::{sample_with_rng, shuffle_points};
use crate::texture::{atlas_side, PackedModel, TexturePacker};

/// The configured morph targets and their load progress.
#[derive(Debug)]
pub struct MorphSet {
    models: Vec<ModelDescriptor>,
    by_name: FxHashMap<String, usize>,
    join: LoadJoin,
    packer: TexturePacker,
    shuffle: bool,
    rng: StdRng,
}

impl MorphSet {
    /// Set for the models and sampling parameters in `options`.
    pub fn new(options: &Options) -> Result<Self, MorphError> {
        Self::from_models(&options.models, &options.sampling)
    }

    /// Set for an explicit model list.
    ///
    /// The texture side is derived from the largest sample count so every
    /// model packs into textures of identical size.
    pub fn from_models(
        models: &[ModelOptions],
        sampling: &SamplingOptions,
    ) -> Result<Self, MorphError> {
        sampling.validate()?;
        let mut by_name = FxHashMap::default();
        for (i, model) in models.iter().enumerate() {
            if by_name.insert(model.name.clone(), i).is_some() {
                return Err(MorphError::DuplicateModel(model.name.clone()));
            }
        }

        let max_samples =
            models.iter().map(|m| m.sample_count).max().unwrap_or(0);
        let side = atlas_side(max_samples);
        log::debug!(
            "morph set: {} models, {side}x{side} textures",
            models.len()
        );

        Ok(Self {
            models: models.iter().map(ModelDescriptor::from_options).collect(),
            by_name,
            join: LoadJoin::new(models.len()),
            packer: TexturePacker::from_options(side, sampling),
            shuffle: sampling.shuffle_points,
            rng: StdRng::from_rng(&mut rand::rng()),
        })
    }

    /// Use a fixed seed for sampling, shuffling and fallback points.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Shared texture side length.
    #[must_use]
    pub fn side(&self) -> u32 {
        self.packer.side()
    }

    /// All descriptors in configuration order.
    #[must_use]
    pub fn models(&self) -> &[ModelDescriptor] {
        &self.models
    }

    /// Descriptor by model name.
    #[must_use]
    pub fn model(&self, name: &str) -> Option<&ModelDescriptor> {
        self.by_name.get(name).map(|&i| &self.models[i])
    }

    /// Fan-in join status.
    #[must_use]
    pub fn status(&self) -> JoinStatus {
        self.join.status()
    }

    fn pending_index(&self, name: &str) -> Result<usize, MorphError> {
        let &index = self
            .by_name
            .get(name)
            .ok_or_else(|| MorphError::UnknownModel(name.to_owned()))?;
        if self.models[index].is_pending() {
            Ok(index)
        } else {
            Err(MorphError::DuplicateLoad(name.to_owned()))
        }
    }

    /// Geometry for model `name` arrived: transform, sample and pack it.
    ///
    /// A mesh that cannot be sampled marks the model as failed.
    pub fn on_geometry_loaded(
        &mut self,
        name: &str,
        mesh: &TriangleMesh,
    ) -> Result<(), MorphError> {
        let index = self.pending_index(name)?;
        match self.sample_and_pack(index, mesh) {
            Ok(packed) => {
                log::debug!(
                    "model '{name}': {} points, {} fallback texels",
                    packed.sample_count,
                    packed.fallback_count
                );
                self.models[index].state = ModelState::Packed(packed);
                self.join.record_success();
                if self.join.is_ready() {
                    log::info!(
                        "all {} models packed into {side}x{side} textures",
                        self.models.len(),
                        side = self.side()
                    );
                }
                Ok(())
            }
            Err(e) => {
                self.fail(index, e.to_string());
                Err(e)
            }
        }
    }

    /// Geometry for model `name` could not be loaded.
    pub fn on_load_failed(
        &mut self,
        name: &str,
        reason: impl Into<String>,
    ) -> Result<(), MorphError> {
        let index = self.pending_index(name)?;
        self.fail(index, reason.into());
        Ok(())
    }

    fn fail(&mut self, index: usize, reason: String) {
        let model = &mut self.models[index];
        log::warn!("model '{}' failed to load: {reason}", model.name);
        model.state = ModelState::Failed(reason);
        self.join.record_failure();
    }

    fn sample_and_pack(
        &mut self,
        index: usize,
        mesh: &TriangleMesh,
    ) -> Result<PackedModel, MorphError> {
        let model = &self.models[index];
        let placed;
        let mesh = if model.transform.is_identity() {
            mesh
        } else {
            placed = mesh.transformed(&model.transform.to_affine());
            &placed
        };

        let mut samples =
            sample_with_rng(mesh, model.sample_count, &mut self.rng)?;
        if self.shuffle {
            shuffle_points(&mut samples, &mut self.rng)?;
        }
        // `samples` is dropped here; only the textures outlive packing
        self.packer.pack(&samples, &mut self.rng)
    }

    /// Load every pending model from `source`, one after another.
    ///
    /// Individual failures are recorded on their models; the returned
    /// status tells whether the set became ready.
    pub fn load_all(&mut self, source: &impl MeshSource) -> JoinStatus {
        let pending: Vec<(String, String)> = self
            .models
            .iter()
            .filter(|m| m.is_pending())
            .map(|m| (m.name.clone(), m.mesh.clone()))
            .collect();

        for (name, mesh_name) in pending {
            let result = match source.load(&mesh_name) {
                Ok(mesh) => self.on_geometry_loaded(&name, &mesh),
                Err(e) => self.on_load_failed(&name, e.to_string()),
            };
            if let Err(e) = result {
                log::error!("model '{name}': {e}");
            }
        }

        let status = self.status();
        if let JoinStatus::Stalled { failed, total, .. } = status {
            log::warn!(
                "{failed} of {total} model loads failed; particle system \
                 will not be built"
            );
        }
        status
    }

    /// The packed models in scroll order, once every load succeeded.
    pub fn particle_system(&self) -> Result<ParticleSystem<'_>, MorphError> {
        match self.join.status() {
            JoinStatus::Ready => Ok(ParticleSystem {
                side: self.side(),
                models: self
                    .models
                    .iter()
                    .filter_map(|m| Some((m.name.as_str(), m.packed()?)))
                    .collect(),
            }),
            JoinStatus::Waiting { completed, total } => {
                Err(MorphError::NotReady { completed, total })
            }
            JoinStatus::Stalled { .. } => Err(MorphError::Stalled(
                self.models
                    .iter()
                    .filter(|m| matches!(m.state, ModelState::Failed(_)))
                    .map(|m| m.name.clone())
                    .collect(),
            )),
        }
    }
}

/// Every model's textures, all `side × side`, ready for the shader.
#[derive(Debug, Clone)]
pub struct ParticleSystem<'a> {
    side: u32,
    models: Vec<(&'a str, &'a PackedModel)>,
}

impl<'a> ParticleSystem<'a> {
    /// Shared texture side length.
    #[must_use]
    pub fn side(&self) -> u32 {
        self.side
    }

    /// Number of particles (one per texel).
    #[must_use]
    pub fn particle_count(&self) -> usize {
        self.side as usize * self.side as usize
    }

    /// Number of morph targets.
    #[must_use]
    pub fn model_count(&self) -> usize {
        self.models.len()
    }

    /// Name and textures of model `index`.
    #[must_use]
    pub fn model(&self, index: usize) -> Option<(&'a str, &'a PackedModel)> {
        self.models.get(index).copied()
    }

    /// Models in scroll order.
    pub fn models(
        &self,
    ) -> impl Iterator<Item = (&'a str, &'a PackedModel)> + '_ {
        self.models.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::geometry::primitives::cube;
    use crate::geometry::MeshLibrary;

    fn small_options() -> Options {
        Options {
            models: vec![
                ModelOptions::new("a", "cube", 100, 10.0),
                ModelOptions::new("b", "sphere", 300, 10.0),
                ModelOptions::new("c", "torus", 50, 10.0),
            ],
            ..Options::default()
        }
    }

    #[test]
    fn side_comes_from_largest_model() {
        let set = MorphSet::new(&small_options()).unwrap();
        // ceil(sqrt(300)) = 18 -> 32
        assert_eq!(set.side(), 32);
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let models = vec![
            ModelOptions::new("a", "cube", 10, 1.0),
            ModelOptions::new("a", "sphere", 10, 1.0),
        ];
        let err = MorphSet::from_models(&models, &SamplingOptions::default())
            .unwrap_err();
        assert!(matches!(err, MorphError::DuplicateModel(name) if name == "a"));
    }

    #[test]
    fn zero_fallback_radius_is_rejected_before_loading() {
        let options: Options = toml::from_str(
            r#"
[sampling]
fallback_radius = 0.0
color_weight = "radial"

[[models]]
name = "cube"
mesh = "cube"
sample_count = 5
"#,
        )
        .unwrap();
        assert!(matches!(
            MorphSet::new(&options),
            Err(MorphError::InvalidFallbackRadius(r)) if r == 0.0
        ));
    }

    #[test]
    fn ready_only_after_last_load() {
        let mut set = MorphSet::new(&small_options()).unwrap().with_seed(1);
        let library = MeshLibrary::with_primitives();

        set.on_geometry_loaded("c", &library.load("torus").unwrap())
            .unwrap();
        set.on_geometry_loaded("a", &library.load("cube").unwrap())
            .unwrap();
        assert!(matches!(
            set.particle_system(),
            Err(MorphError::NotReady {
                completed: 2,
                total: 3
            })
        ));

        set.on_geometry_loaded("b", &library.load("sphere").unwrap())
            .unwrap();
        let system = set.particle_system().unwrap();
        assert_eq!(system.model_count(), 3);
        assert_eq!(system.particle_count(), 32 * 32);
        let names: Vec<&str> = system.models().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn every_model_shares_texture_size() {
        let mut set = MorphSet::new(&small_options()).unwrap().with_seed(2);
        assert_eq!(
            set.load_all(&MeshLibrary::with_primitives()),
            JoinStatus::Ready
        );
        let system = set.particle_system().unwrap();
        for (_, packed) in system.models() {
            assert_eq!(packed.positions.side(), 32);
            assert_eq!(packed.colors.data().len(), 32 * 32 * 4);
        }
        let (_, b) = system.model(1).unwrap();
        assert_eq!(b.sample_count, 300);
    }

    #[test]
    fn transform_is_applied_before_sampling() {
        let models = vec![ModelOptions {
            translation: [50.0, 0.0, 0.0],
            ..ModelOptions::new("moved", "cube", 64, 2.0)
        }];
        let mut set =
            MorphSet::from_models(&models, &SamplingOptions::default())
                .unwrap()
                .with_seed(3);
        set.on_geometry_loaded("moved", &cube(1.0)).unwrap();

        let packed = set.model("moved").unwrap().packed().unwrap();
        assert_eq!(packed.fallback_count, 0);
        for i in 0..packed.positions.texel_count() {
            let [x, y, z, _] = packed.positions.texel(i).unwrap();
            assert!((49.0 - 1e-4..=51.0 + 1e-4).contains(&x));
            assert!(Vec3::new(0.0, y, z).length() <= 2.0_f32.sqrt() + 1e-4);
        }
    }

    #[test]
    fn failed_load_stalls_the_set() {
        let mut set = MorphSet::new(&small_options()).unwrap().with_seed(4);
        let mut library = MeshLibrary::with_primitives();
        library.insert("sphere", TriangleMesh::default());

        assert_eq!(
            set.load_all(&library),
            JoinStatus::Stalled {
                completed: 2,
                failed: 1,
                total: 3
            }
        );
        assert!(matches!(
            set.model("b").unwrap().state,
            ModelState::Failed(_)
        ));
        match set.particle_system() {
            Err(MorphError::Stalled(names)) => assert_eq!(names, vec!["b"]),
            other => panic!("expected stall, got {other:?}"),
        }
    }

    #[test]
    fn missing_mesh_is_reported_as_failure() {
        let models = vec![ModelOptions::new("ghost", "teapot", 10, 1.0)];
        let mut set =
            MorphSet::from_models(&models, &SamplingOptions::default())
                .unwrap();
        let status = set.load_all(&MeshLibrary::with_primitives());
        assert!(matches!(status, JoinStatus::Stalled { failed: 1, .. }));
    }

    #[test]
    fn load_events_are_validated() {
        let mut set = MorphSet::new(&small_options()).unwrap().with_seed(5);
        let mesh = cube(1.0);
        assert!(matches!(
            set.on_geometry_loaded("zzz", &mesh),
            Err(MorphError::UnknownModel(_))
        ));
        set.on_geometry_loaded("a", &mesh).unwrap();
        assert!(matches!(
            set.on_geometry_loaded("a", &mesh),
            Err(MorphError::DuplicateLoad(_))
        ));
        assert!(matches!(
            set.on_load_failed("a", "late failure"),
            Err(MorphError::DuplicateLoad(_))
        ));
    }

    #[test]
    fn end_to_end_unit_cube_at_full_resolution() {
        let models = vec![ModelOptions::new("cube", "cube", 150_000, 1.0)];
        let mut set =
            MorphSet::from_models(&models, &SamplingOptions::default())
                .unwrap()
                .with_seed(6);
        assert_eq!(set.side(), 512);
        assert_eq!(
            set.load_all(&MeshLibrary::with_primitives()),
            JoinStatus::Ready
        );

        let system = set.particle_system().unwrap();
        let (_, packed) = system.model(0).unwrap();
        assert_eq!(packed.positions.data().len(), 1_048_576);
        assert_eq!(packed.sample_count, 150_000);
        assert_eq!(packed.fallback_count, 512 * 512 - 150_000);
    }
}
