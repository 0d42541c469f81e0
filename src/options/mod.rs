//! Centralized sampling/animation options with TOML preset support.
//!
//! All tweakable settings (point sampling, texture packing, scroll
//! animation, camera, and the morph sequence itself) are consolidated here.
//! Options serialize to/from TOML so a whole morph setup can live in one
//! preset file.

mod animation;
mod camera;
mod models;
mod sampling;

use std::path::Path;

pub use animation::AnimationOptions;
pub use camera::CameraOptions;
pub use models::ModelOptions;
pub use sampling::{
    ColorWeight, FallbackDistribution, SamplingOptions, SlotPolicy,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::MorphError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[animation]`) work correctly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(default)]
pub struct Options {
    /// Point sampling and texture packing parameters.
    pub sampling: SamplingOptions,
    /// Scroll timeline and shader animation parameters.
    pub animation: AnimationOptions,
    /// Camera used for pointer projection.
    pub camera: CameraOptions,
    /// Morph targets in scroll order.
    #[schemars(skip)]
    pub models: Vec<ModelOptions>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            sampling: SamplingOptions::default(),
            animation: AnimationOptions::default(),
            camera: CameraOptions::default(),
            models: models::default_models(),
        }
    }
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, MorphError> {
        let content = std::fs::read_to_string(path).map_err(MorphError::Io)?;
        let options: Self = toml::from_str(&content)
            .map_err(|e| MorphError::OptionsParse(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    /// Check values that parse but cannot be used.
    pub fn validate(&self) -> Result<(), MorphError> {
        self.sampling.validate()
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), MorphError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| MorphError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(MorphError::Io)?;
        }
        std::fs::write(path, content).map_err(MorphError::Io)
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }

    /// Largest configured sample count; sizes the shared texture atlas.
    #[must_use]
    pub fn max_sample_count(&self) -> usize {
        self.models
            .iter()
            .map(|m| m.sample_count)
            .max()
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::EasingFunction;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r#"
[sampling]
slot_policy = "zero_as_empty"

[animation]
easing = "linear"
"#;
        let opts: Options = toml::from_str(toml_str).unwrap();
        assert_eq!(opts.sampling.slot_policy, SlotPolicy::ZeroAsEmpty);
        assert_eq!(opts.animation.easing, EasingFunction::Linear);
        // Everything else should be default
        assert_eq!(opts.sampling.fallback_radius, 100.0);
        assert_eq!(opts.animation.mouse_radius, 20.0);
        assert_eq!(opts.models.len(), 4);
    }

    #[test]
    fn model_list_replaces_defaults() {
        let toml_str = r#"
[[models]]
name = "a"
mesh = "cube"
sample_count = 500

[[models]]
name = "b"
mesh = "sphere"
rotation_degrees = [0.0, 90.0, 0.0]
"#;
        let opts: Options = toml::from_str(toml_str).unwrap();
        assert_eq!(opts.models.len(), 2);
        assert_eq!(opts.models[0].sample_count, 500);
        assert_eq!(opts.models[0].scale, [1.0; 3]);
        assert_eq!(opts.models[1].sample_count, 10_000);
        assert_eq!(opts.max_sample_count(), 10_000);
    }

    #[test]
    fn default_atlas_is_driven_by_largest_model() {
        assert_eq!(Options::default().max_sample_count(), 60_000);
        let empty = Options {
            models: Vec::new(),
            ..Options::default()
        };
        assert_eq!(empty.max_sample_count(), 0);
    }

    #[test]
    fn save_then_load_preserves_options() {
        let dir = std::env::temp_dir()
            .join(format!("pointmorph-options-{}", std::process::id()));
        let path = dir.join("preset.toml");
        let mut opts = Options::default();
        opts.sampling.fallback_distribution = FallbackDistribution::Volume;
        opts.save(&path).unwrap();

        assert_eq!(Options::load(&path).unwrap(), opts);
        assert_eq!(Options::list_presets(&dir), vec!["preset".to_owned()]);
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn zero_fallback_radius_is_rejected_on_load() {
        let dir = std::env::temp_dir()
            .join(format!("pointmorph-radius-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("bad.toml");
        std::fs::write(
            &path,
            "[sampling]\nfallback_radius = 0.0\ncolor_weight = \"radial\"\n",
        )
        .unwrap();

        let result = Options::load(&path);
        std::fs::remove_dir_all(&dir).unwrap();
        assert!(matches!(
            result,
            Err(MorphError::InvalidFallbackRadius(r)) if r == 0.0
        ));
    }

    #[test]
    fn non_finite_or_negative_radius_fails_validation() {
        for radius in [-5.0, f32::NAN, f32::INFINITY] {
            let mut opts = Options::default();
            opts.sampling.fallback_radius = radius;
            assert!(opts.validate().is_err(), "{radius} accepted");
        }
        assert!(Options::default().validate().is_ok());
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();

        assert!(props.contains_key("sampling"));
        assert!(props.contains_key("animation"));
        assert!(props.contains_key("camera"));
        // Model list is edited in preset files, not the UI
        assert!(!props.contains_key("models"));

        let sampling = &props["sampling"]["properties"];
        assert!(sampling.get("fallback_radius").is_some());
        assert!(sampling.get("inner_color").is_none());
    }
}
