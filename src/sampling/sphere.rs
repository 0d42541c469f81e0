use std::f32::consts::TAU;

use glam::Vec3;
use rand::Rng;

/// Uniform random direction on the unit sphere (inverse-CDF in `cos phi`,
/// no rejection).
fn random_direction<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let theta = TAU * rng.random::<f32>();
    let phi = (2.0 * rng.random::<f32>() - 1.0).clamp(-1.0, 1.0).acos();
    let (sin_phi, cos_phi) = phi.sin_cos();
    Vec3::new(sin_phi * theta.cos(), sin_phi * theta.sin(), cos_phi)
}

/// Uniform random point on the surface of a sphere of `radius` centered on
/// the origin.
pub fn random_on_sphere<R: Rng + ?Sized>(rng: &mut R, radius: f32) -> Vec3 {
    random_direction(rng) * radius
}

/// Uniform random point inside a ball of `radius` centered on the origin.
pub fn random_in_ball<R: Rng + ?Sized>(rng: &mut R, radius: f32) -> Vec3 {
    let direction = random_direction(rng);
    direction * rng.random::<f32>().cbrt() * radius
}
