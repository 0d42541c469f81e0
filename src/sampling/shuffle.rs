use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::MorphError;

/// Uniformly permute `items` in place. Slices of length 0 or 1 are left
/// untouched.
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    if items.len() > 1 {
        items.shuffle(rng);
    }
}

/// Permute the XYZ triples of a flat sample buffer, keeping each triple
/// intact.
///
/// Randomizing point order decorrelates which point of one model a particle
/// morphs into on the next.
pub fn shuffle_points<R: Rng + ?Sized>(
    samples: &mut [f32],
    rng: &mut R,
) -> Result<(), MorphError> {
    let len = samples.len();
    let points: &mut [[f32; 3]] = bytemuck::try_cast_slice_mut(samples)
        .map_err(|_| MorphError::InvalidSampleBuffer(len))?;
    shuffle(points, rng);
    Ok(())
}
