//! Scroll position → transition value mapping.
//!
//! With `n` models the timeline is split into `n - 1` equal segments. Within
//! segment `i` the transition value runs from `i` to `i + 1`, shaped by the
//! configured easing, so every model gets a resting point at a segment
//! boundary.

use super::EasingFunction;

/// Normalized scroll progress in `[0, 1]`.
///
/// `scroll_y / (document_height - viewport_height)`, or `0` when the
/// document is not taller than the viewport.
#[must_use]
pub fn scroll_progress(
    scroll_y: f32,
    document_height: f32,
    viewport_height: f32,
) -> f32 {
    let scrollable = document_height - viewport_height;
    if scrollable <= 0.0 {
        return 0.0;
    }
    (scroll_y / scrollable).clamp(0.0, 1.0)
}

/// Pair of model indices a transition value blends between.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionPair {
    /// Source model (bound to `u_positions1` / `u_colors1`).
    pub from: usize,
    /// Target model (bound to `u_positions2` / `u_colors2`).
    pub to: usize,
    /// Blend factor in `[0, 1]`.
    pub blend: f32,
}

impl TransitionPair {
    /// Split `value` into a model pair and blend factor.
    ///
    /// The value is clamped to `[0, model_count - 1]`. At the upper end the
    /// last pair is returned with `blend == 1` rather than a pair pointing
    /// past the final model.
    #[must_use]
    pub fn from_transition(value: f32, model_count: usize) -> Self {
        if model_count < 2 {
            return Self {
                from: 0,
                to: 0,
                blend: 0.0,
            };
        }
        let last_pair = model_count - 2;
        let value = value.clamp(0.0, (model_count - 1) as f32);
        let from = (value.floor() as usize).min(last_pair);
        Self {
            from,
            to: from + 1,
            blend: value - from as f32,
        }
    }
}

/// Maps scroll progress to an eased transition value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollTimeline {
    model_count: usize,
    easing: EasingFunction,
}

impl ScrollTimeline {
    /// Timeline over `model_count` models.
    #[must_use]
    pub fn new(model_count: usize, easing: EasingFunction) -> Self {
        Self {
            model_count,
            easing,
        }
    }

    /// Number of models on the timeline.
    #[must_use]
    pub fn model_count(&self) -> usize {
        self.model_count
    }

    /// Number of model-to-model segments.
    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.model_count.saturating_sub(1)
    }

    /// Largest transition value (`model_count - 1`).
    #[must_use]
    pub fn max_transition(&self) -> f32 {
        self.segment_count() as f32
    }

    /// Transition value for scroll `progress` in `[0, 1]`.
    #[must_use]
    pub fn transition_at(&self, progress: f32) -> f32 {
        let segments = self.segment_count();
        if segments == 0 {
            return 0.0;
        }
        let scaled = progress.clamp(0.0, 1.0) * segments as f32;
        let segment = (scaled.floor() as usize).min(segments - 1);
        let local = scaled - segment as f32;
        segment as f32 + self.easing.evaluate(local)
    }

    /// Scroll progress at which model `index` is shown unblended.
    #[must_use]
    pub fn progress_for_model(&self, index: usize) -> f32 {
        let segments = self.segment_count();
        if segments == 0 {
            return 0.0;
        }
        index.min(segments) as f32 / segments as f32
    }
}
