#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
/// GPU uniform block for the particle morph shader.
///
/// Texture bindings (`u_positions1/2`, `u_colors1/2`) are chosen from
/// [`TransitionPair`](super::TransitionPair); everything else lives here.
pub struct ParticleUniforms {
    /// `u_mouse`: repulsion center in world space.
    pub mouse: [f32; 3],
    /// `u_mouseRadius`: repulsion radius; `0` disables the effect.
    pub mouse_radius: f32,
    /// `u_transition`: integer part picks the pair, fraction blends it.
    pub transition: f32,
    /// `u_time`: animation phase in seconds.
    pub time: f32,
    /// Padding for GPU alignment.
    pub(crate) _pad: [f32; 2],
}

impl ParticleUniforms {
    /// Uniform block with every field set explicitly.
    #[must_use]
    pub fn new(
        transition: f32,
        time: f32,
        mouse: [f32; 3],
        mouse_radius: f32,
    ) -> Self {
        Self {
            mouse,
            mouse_radius,
            transition,
            time,
            _pad: [0.0; 2],
        }
    }

    /// Bytes for a uniform buffer write.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_is_sixteen_byte_aligned() {
        assert_eq!(size_of::<ParticleUniforms>(), 32);
        assert_eq!(size_of::<ParticleUniforms>() % 16, 0);
    }

    #[test]
    fn bytes_follow_field_order() {
        let u = ParticleUniforms::new(1.5, 2.0, [3.0, 4.0, 5.0], 6.0);
        let floats: &[f32] = bytemuck::cast_slice(u.as_bytes());
        assert_eq!(floats, &[3.0, 4.0, 5.0, 6.0, 1.5, 2.0, 0.0, 0.0]);
    }
}
