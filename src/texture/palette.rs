/// Two-stop linear color ramp.
///
/// `t = 0` maps to `inner`, `t = 1` to `outer`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorGradient {
    /// Color at `t = 0`.
    pub inner: [f32; 3],
    /// Color at `t = 1`.
    pub outer: [f32; 3],
}

impl ColorGradient {
    /// Interpolate at `t`, clamped to `[0, 1]`.
    #[must_use]
    pub fn at(&self, t: f32) -> [f32; 3] {
        let t = t.clamp(0.0, 1.0);
        let s = 1.0 - t;
        let [a, b] = [self.inner, self.outer];
        [
            a[0] * s + b[0] * t,
            a[1] * s + b[1] * t,
            a[2] * s + b[2] * t,
        ]
    }
}

impl Default for ColorGradient {
    /// Warm orange core → cool blue rim
    fn default() -> Self {
        Self {
            inner: [1.0, 0.42, 0.16],
            outer: [0.2, 0.38, 1.0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_and_midpoint() {
        let g = ColorGradient {
            inner: [0.0, 0.0, 0.0],
            outer: [1.0, 0.5, 0.25],
        };
        assert_eq!(g.at(0.0), g.inner);
        assert_eq!(g.at(1.0), g.outer);
        assert_eq!(g.at(0.5), [0.5, 0.25, 0.125]);
    }

    #[test]
    fn endpoints_are_exact_for_default_colors() {
        let g = ColorGradient::default();
        assert_eq!(g.at(0.0), [1.0, 0.42, 0.16]);
        assert_eq!(g.at(1.0), [0.2, 0.38, 1.0]);
    }

    #[test]
    fn weight_is_clamped() {
        let g = ColorGradient::default();
        assert_eq!(g.at(-1.0), g.inner);
        assert_eq!(g.at(2.0), g.outer);
    }
}
