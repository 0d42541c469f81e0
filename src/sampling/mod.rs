//! Random point generation: mesh surfaces, spheres and point shuffling.

mod shuffle;
mod sphere;
mod surface;

pub use shuffle::{shuffle, shuffle_points};
pub use sphere::{random_in_ball, random_on_sphere};
pub use surface::{sample, sample_with_rng, SurfaceSampler};
