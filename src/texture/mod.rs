//! Square float textures holding packed particle positions and colors.
//!
//! All models of one morph set share a single power-of-two side so a shader
//! can cross-fade any two of them texel by texel.

mod packer;
mod palette;
mod size;

pub use packer::{PackedModel, ParticleTexture, TexturePacker};
pub use palette::ColorGradient;
pub use size::{atlas_side, next_power_of_two_ceil};
