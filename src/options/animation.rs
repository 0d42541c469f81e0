use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::animation::EasingFunction;

/// Scroll timeline and shader animation parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Animation", inline)]
#[serde(default)]
pub struct AnimationOptions {
    /// Easing applied within each model-to-model segment.
    pub easing: EasingFunction,
    /// Time constant with which the displayed transition catches up with
    /// the scroll position. `0` follows the scroll immediately.
    #[schemars(title = "Scrub", range(min = 0.0, max = 5.0), extend("step" = 0.05))]
    pub scrub_seconds: f32,
    /// Multiplier on wall-clock time fed to `u_time`.
    #[schemars(title = "Time Scale", range(min = 0.0, max = 4.0), extend("step" = 0.05))]
    pub time_scale: f32,
    /// World-space radius of the mouse repulsion field.
    #[schemars(title = "Mouse Radius", range(min = 0.0, max = 200.0), extend("step" = 1.0))]
    pub mouse_radius: f32,
    /// Longest frame delta accepted from the frame clock, in seconds.
    #[schemars(skip)]
    pub max_frame_delta: f32,
}

impl Default for AnimationOptions {
    fn default() -> Self {
        Self {
            easing: EasingFunction::CubicInOut,
            scrub_seconds: 0.6,
            time_scale: 1.0,
            mouse_radius: 20.0,
            max_frame_delta: 0.1,
        }
    }
}
