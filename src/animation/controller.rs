//! Animation controller: the single owner of per-frame morph state.

use glam::Vec3;

use super::{scroll_progress, ParticleUniforms, ScrollTimeline, TransitionPair};
use crate::options::AnimationOptions;

/// Below this distance the displayed transition snaps onto its target.
const SETTLE_EPSILON: f32 = 1e-4;

/// Owns the transition, shader clock and mouse state of one particle
/// system.
///
/// Input handlers call the `set_*` methods whenever scroll or pointer
/// state changes; the render loop calls [`update`](Self::update) once per
/// frame with the elapsed time and then reads [`uniforms`](Self::uniforms).
#[derive(Debug, Clone)]
pub struct AnimationController {
    timeline: ScrollTimeline,
    /// Transition value implied by the latest scroll position.
    target: f32,
    /// Transition value currently shown.
    current: f32,
    scrub_seconds: f32,
    time: f32,
    time_scale: f32,
    mouse: Option<Vec3>,
    mouse_radius: f32,
}

impl AnimationController {
    /// Controller for `model_count` models.
    #[must_use]
    pub fn new(model_count: usize, options: &AnimationOptions) -> Self {
        Self {
            timeline: ScrollTimeline::new(model_count, options.easing),
            target: 0.0,
            current: 0.0,
            scrub_seconds: options.scrub_seconds.max(0.0),
            time: 0.0,
            time_scale: options.time_scale,
            mouse: None,
            mouse_radius: options.mouse_radius,
        }
    }

    /// The timeline mapping scroll progress to transition values.
    #[must_use]
    pub fn timeline(&self) -> &ScrollTimeline {
        &self.timeline
    }

    /// Record a new page scroll position.
    pub fn set_scroll(
        &mut self,
        scroll_y: f32,
        document_height: f32,
        viewport_height: f32,
    ) {
        self.set_progress(scroll_progress(
            scroll_y,
            document_height,
            viewport_height,
        ));
    }

    /// Record a new normalized timeline progress in `[0, 1]`.
    ///
    /// Non-finite values are ignored.
    pub fn set_progress(&mut self, progress: f32) {
        if !progress.is_finite() {
            return;
        }
        self.target = self.timeline.transition_at(progress);
    }

    /// Move the repulsion center, or remove it with `None` when the
    /// pointer leaves the view.
    pub fn set_mouse(&mut self, world: Option<Vec3>) {
        self.mouse = world;
    }

    /// Change the repulsion radius.
    pub fn set_mouse_radius(&mut self, radius: f32) {
        self.mouse_radius = radius.max(0.0);
    }

    /// Jump the displayed transition straight to its target.
    pub fn snap(&mut self) {
        self.current = self.target;
    }

    /// Advance by `dt` seconds.
    ///
    /// Returns `true` while the displayed transition is still catching up
    /// with the scroll target.
    pub fn update(&mut self, dt: f32) -> bool {
        let dt = dt.max(0.0);
        self.time += dt * self.time_scale;

        if self.scrub_seconds <= 0.0 {
            self.current = self.target;
        } else {
            let alpha = 1.0 - (-dt / self.scrub_seconds).exp();
            self.current += (self.target - self.current) * alpha;
        }

        if (self.target - self.current).abs() < SETTLE_EPSILON {
            self.current = self.target;
        }
        !self.is_settled()
    }

    /// Whether the displayed transition has reached its target.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.current == self.target
    }

    /// Transition value currently shown.
    #[must_use]
    pub fn transition(&self) -> f32 {
        self.current
    }

    /// Transition value the animation is heading for.
    #[must_use]
    pub fn target_transition(&self) -> f32 {
        self.target
    }

    /// Accumulated shader time in seconds.
    #[must_use]
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Texture pair for the current transition.
    #[must_use]
    pub fn pair(&self) -> TransitionPair {
        TransitionPair::from_transition(
            self.current,
            self.timeline.model_count(),
        )
    }

    /// Uniform block for the current frame.
    #[must_use]
    pub fn uniforms(&self) -> ParticleUniforms {
        let (mouse, radius) = self
            .mouse
            .map_or(([0.0; 3], 0.0), |p| (p.to_array(), self.mouse_radius));
        ParticleUniforms::new(self.current, self.time, mouse, radius)
    }
}
