//! Crate-level error types.

use std::fmt;

/// Errors produced by the pointmorph crate.
#[derive(Debug)]
pub enum MorphError {
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// A mesh without any triangles was handed to the sampler.
    EmptyMesh,
    /// Mesh topology references a vertex that does not exist.
    InvalidMesh {
        /// Offending vertex index.
        index: u32,
        /// Number of vertices in the mesh.
        vertex_count: usize,
    },
    /// Sample buffer length is not a multiple of three.
    InvalidSampleBuffer(usize),
    /// Fallback radius is zero, negative or not finite.
    InvalidFallbackRadius(f32),
    /// More points than the texture atlas can hold.
    AtlasOverflow {
        /// Number of points offered to the packer.
        points: usize,
        /// Texel capacity of the atlas (`side * side`).
        capacity: usize,
    },
    /// Two configured models share a name.
    DuplicateModel(String),
    /// A load event named a model that was never configured.
    UnknownModel(String),
    /// A model received a second load event.
    DuplicateLoad(String),
    /// A mesh source has no geometry under the requested name.
    MeshNotFound(String),
    /// The particle system was requested before every load completed.
    NotReady {
        /// Loads completed so far.
        completed: usize,
        /// Loads expected in total.
        total: usize,
    },
    /// At least one load failed, so the fan-in join can never complete.
    Stalled(Vec<String>),
}

impl fmt::Display for MorphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::EmptyMesh => write!(f, "mesh has no triangles to sample"),
            Self::InvalidMesh {
                index,
                vertex_count,
            } => write!(
                f,
                "triangle index {index} out of range for {vertex_count} \
                 vertices"
            ),
            Self::InvalidSampleBuffer(len) => write!(
                f,
                "sample buffer length {len} is not a multiple of 3"
            ),
            Self::InvalidFallbackRadius(radius) => write!(
                f,
                "fallback radius must be positive and finite, got {radius}"
            ),
            Self::AtlasOverflow { points, capacity } => write!(
                f,
                "{points} points do not fit a {capacity}-texel atlas"
            ),
            Self::DuplicateModel(name) => {
                write!(f, "model '{name}' is configured twice")
            }
            Self::UnknownModel(name) => write!(f, "unknown model '{name}'"),
            Self::DuplicateLoad(name) => {
                write!(f, "model '{name}' was already loaded")
            }
            Self::MeshNotFound(name) => write!(f, "no mesh named '{name}'"),
            Self::NotReady { completed, total } => write!(
                f,
                "particle system not ready: {completed}/{total} loads done"
            ),
            Self::Stalled(names) => write!(
                f,
                "loads failed, particle system will never be built: {}",
                names.join(", ")
            ),
        }
    }
}

impl std::error::Error for MorphError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for MorphError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
