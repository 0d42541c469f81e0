// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Point-cloud morphing core for scroll-driven particle animations.
//!
//! Meshes are sampled into point clouds, the points are packed into square
//! RGBA float textures sharing one power-of-two size, and a scroll-driven
//! timeline picks which pair of textures a particle shader blends between.
//!
//! # Key entry points
//!
//! - [`sampling::sample`] - area-weighted random points on a mesh surface
//! - [`texture::TexturePacker`] - packs samples and colors into textures
//! - [`pipeline::MorphSet`] - per-model lifecycle and the load fan-in join
//! - [`animation::AnimationController`] - scroll/mouse/time state that feeds
//!   the shader uniforms
//! - [`options::Options`] - TOML-backed configuration
//!
//! # Data flow
//!
//! geometry load → transform → surface sampling → texture packing → shader.
//! Every model is sampled and packed as soon as its geometry arrives; the
//! particle system becomes available once the last load has completed.

pub mod animation;
pub mod camera;
pub mod error;
pub mod geometry;
pub mod options;
pub mod pipeline;
pub mod sampling;
pub mod texture;
pub mod util;
