//! Scroll-driven morph animation.
//!
//! The page scroll position is mapped onto a [`ScrollTimeline`] whose output
//! is a transition value: its integer part selects which pair of model
//! textures the shader blends and its fractional part is the blend factor.
//! [`AnimationController`] owns that value together with the shader clock
//! and mouse state, and is advanced explicitly once per frame.

mod controller;
mod easing;
mod timeline;
mod uniforms;

pub use controller::AnimationController;
pub use easing::EasingFunction;
pub use timeline::{scroll_progress, ScrollTimeline, TransitionPair};
pub use uniforms::ParticleUniforms;
