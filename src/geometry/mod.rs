//! Triangle meshes, model transforms and procedural primitives.
//!
//! [`TriangleMesh`] is the only geometry type the sampler understands.
//! Meshes arrive from a [`MeshSource`](primitives::MeshSource) by name and are
//! placed in the scene with a [`ModelTransform`] before sampling.

mod mesh;
pub mod primitives;
mod transform;

pub use mesh::TriangleMesh;
pub use primitives::{MeshLibrary, MeshSource};
pub use transform::ModelTransform;
