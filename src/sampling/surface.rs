//! Area-weighted random sampling of triangle mesh surfaces.
//!
//! A triangle is picked with probability proportional to its area by
//! binary-searching a cumulative area table, then a uniform point inside it
//! is produced from two folded uniforms. The result is an even point density
//! over the whole surface regardless of how the mesh is tessellated.

use glam::Vec3;
use rand::Rng;

use crate::error::MorphError;
use crate::geometry::TriangleMesh;

/// Precomputed area distribution over a mesh's triangles.
#[derive(Debug, Clone)]
pub struct SurfaceSampler<'a> {
    mesh: &'a TriangleMesh,
    /// `cumulative[i]` is the summed area of triangles `0..=i`.
    cumulative: Vec<f64>,
}

impl<'a> SurfaceSampler<'a> {
    /// Build the cumulative area table for `mesh`.
    ///
    /// Zero-area meshes are accepted and produce degenerate points; a mesh
    /// with no triangles at all is rejected.
    pub fn new(mesh: &'a TriangleMesh) -> Result<Self, MorphError> {
        if mesh.is_empty() {
            return Err(MorphError::EmptyMesh);
        }

        let mut total = 0.0_f64;
        let cumulative = mesh
            .face_areas()
            .into_iter()
            .map(|area| {
                total += f64::from(area);
                total
            })
            .collect();

        Ok(Self { mesh, cumulative })
    }

    /// Total surface area covered by the distribution.
    #[must_use]
    pub fn total_area(&self) -> f64 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    /// Triangle index owning cumulative position `r` in
    /// `[0, total_area)`.
    fn pick_triangle(&self, r: f64) -> usize {
        self.cumulative
            .partition_point(|&c| c <= r)
            .min(self.cumulative.len() - 1)
    }

    /// Draw one point on the surface.
    pub fn sample_point<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec3 {
        let r = rng.random::<f64>() * self.total_area();
        let [a, b, c] = self.mesh.triangle(self.pick_triangle(r));

        let mut u = rng.random::<f32>();
        let mut v = rng.random::<f32>();
        if u + v > 1.0 {
            u = 1.0 - u;
            v = 1.0 - v;
        }

        a + (b - a) * u + (c - a) * v
    }

    /// Append `count` points to `out` as flat XYZ triples.
    pub fn sample_into<R: Rng + ?Sized>(
        &self,
        count: usize,
        rng: &mut R,
        out: &mut Vec<f32>,
    ) {
        out.reserve(count * 3);
        for _ in 0..count {
            out.extend_from_slice(&self.sample_point(rng).to_array());
        }
    }
}

/// Sample `count` surface points of `mesh` into a flat `count * 3` buffer
/// using the thread-local RNG.
pub fn sample(
    mesh: &TriangleMesh,
    count: usize,
) -> Result<Vec<f32>, MorphError> {
    sample_with_rng(mesh, count, &mut rand::rng())
}

/// [`sample`] with a caller-provided RNG, for reproducible point sets.
pub fn sample_with_rng<R: Rng + ?Sized>(
    mesh: &TriangleMesh,
    count: usize,
    rng: &mut R,
) -> Result<Vec<f32>, MorphError> {
    let sampler = SurfaceSampler::new(mesh)?;
    let mut out = Vec::with_capacity(count * 3);
    sampler.sample_into(count, rng, &mut out);
    log::debug!(
        "sampled {count} points over {} triangles (area {:.3})",
        mesh.triangle_count(),
        sampler.total_area()
    );
    Ok(out)
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::geometry::primitives::cube;

    fn two_triangles(small: f32, large: f32) -> TriangleMesh {
        TriangleMesh::from_triangle_soup(vec![
            Vec3::ZERO,
            Vec3::new(small, 0.0, 0.0),
            Vec3::new(0.0, small, 0.0),
            Vec3::new(0.0, 0.0, 10.0),
            Vec3::new(large, 0.0, 10.0),
            Vec3::new(0.0, large, 10.0),
        ])
    }

    #[test]
    fn output_length_is_three_per_point() {
        let mesh = cube(1.0);
        let mut rng = StdRng::seed_from_u64(7);
        for n in [0, 1, 2, 17, 1000] {
            let samples = sample_with_rng(&mesh, n, &mut rng).unwrap();
            assert_eq!(samples.len(), n * 3);
        }
    }

    #[test]
    fn points_lie_on_cube_surface() {
        let mesh = cube(2.0);
        let mut rng = StdRng::seed_from_u64(1);
        let samples = sample_with_rng(&mesh, 500, &mut rng).unwrap();
        for p in samples.chunks_exact(3) {
            let max = p.iter().fold(0.0_f32, |m, c| m.max(c.abs()));
            assert!((max - 1.0).abs() < 1e-5, "{p:?} is off the surface");
        }
    }

    #[test]
    fn triangles_are_picked_by_area() {
        // Second triangle has 9x the area of the first
        let mesh = two_triangles(1.0, 3.0);
        let mut rng = StdRng::seed_from_u64(42);
        let samples = sample_with_rng(&mesh, 10_000, &mut rng).unwrap();
        let on_large = samples
            .chunks_exact(3)
            .filter(|p| (p[2] - 10.0).abs() < 1e-4)
            .count();
        let fraction = on_large as f32 / 10_000.0;
        assert!((fraction - 0.9).abs() < 0.02, "fraction {fraction}");
    }

    #[test]
    fn points_stay_inside_their_triangle() {
        let mesh = two_triangles(1.0, 1.0);
        let mut rng = StdRng::seed_from_u64(3);
        let samples = sample_with_rng(&mesh, 2000, &mut rng).unwrap();
        for p in samples.chunks_exact(3) {
            assert!(p[0] >= 0.0 && p[1] >= 0.0);
            assert!(p[0] + p[1] <= 1.0 + 1e-5);
        }
    }

    #[test]
    fn zero_area_mesh_yields_degenerate_points() {
        let point = Vec3::new(1.0, 2.0, 3.0);
        let mesh = TriangleMesh::from_triangle_soup(vec![point; 3]);
        let samples = sample(&mesh, 4).unwrap();
        for p in samples.chunks_exact(3) {
            assert_eq!(Vec3::from_slice(p), point);
        }
    }

    #[test]
    fn empty_mesh_is_rejected() {
        let mesh = TriangleMesh::default();
        assert!(matches!(sample(&mesh, 10), Err(MorphError::EmptyMesh)));
    }

    #[test]
    fn seeded_sampling_is_reproducible() {
        let mesh = cube(1.0);
        let a = sample_with_rng(&mesh, 64, &mut StdRng::seed_from_u64(9));
        let b = sample_with_rng(&mesh, 64, &mut StdRng::seed_from_u64(9));
        assert_eq!(a.unwrap(), b.unwrap());
    }
}
