use glam::{Affine3A, Vec3};

use crate::error::MorphError;

/// Indexed triangle mesh.
///
/// Winding is irrelevant to sampling; only triangle areas and corner
/// positions matter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriangleMesh {
    positions: Vec<Vec3>,
    triangles: Vec<[u32; 3]>,
}

impl TriangleMesh {
    /// Build a mesh from vertex positions and triangle corner indices.
    ///
    /// Every index must reference an existing vertex.
    pub fn new(
        positions: Vec<Vec3>,
        triangles: Vec<[u32; 3]>,
    ) -> Result<Self, MorphError> {
        let vertex_count = positions.len();
        if let Some(&index) = triangles
            .iter()
            .flatten()
            .find(|&&i| i as usize >= vertex_count)
        {
            return Err(MorphError::InvalidMesh {
                index,
                vertex_count,
            });
        }
        Ok(Self {
            positions,
            triangles,
        })
    }

    /// Trusted constructor for generators that produce valid indices.
    pub(super) fn from_parts(
        positions: Vec<Vec3>,
        triangles: Vec<[u32; 3]>,
    ) -> Self {
        Self {
            positions,
            triangles,
        }
    }

    /// Build a mesh from a flat index list (three indices per triangle).
    ///
    /// A trailing partial triangle is ignored.
    pub fn from_flat_indices(
        positions: Vec<Vec3>,
        indices: &[u32],
    ) -> Result<Self, MorphError> {
        let triangles = indices
            .chunks_exact(3)
            .map(|tri| [tri[0], tri[1], tri[2]])
            .collect();
        Self::new(positions, triangles)
    }

    /// Build a non-indexed mesh where every three positions form a triangle.
    #[must_use]
    pub fn from_triangle_soup(positions: Vec<Vec3>) -> Self {
        let count = (positions.len() / 3) as u32;
        let triangles = (0..count)
            .map(|t| [t * 3, t * 3 + 1, t * 3 + 2])
            .collect();
        Self {
            positions,
            triangles,
        }
    }

    /// Vertex positions.
    #[must_use]
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Triangle corner indices.
    #[must_use]
    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    /// Number of triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Whether the mesh has no triangles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Corner positions of triangle `index`.
    #[must_use]
    pub fn triangle(&self, index: usize) -> [Vec3; 3] {
        let [a, b, c] = self.triangles[index];
        [
            self.positions[a as usize],
            self.positions[b as usize],
            self.positions[c as usize],
        ]
    }

    /// Area of every triangle, in triangle order.
    #[must_use]
    pub fn face_areas(&self) -> Vec<f32> {
        (0..self.triangles.len())
            .map(|i| {
                let [a, b, c] = self.triangle(i);
                0.5 * (b - a).cross(c - a).length()
            })
            .collect()
    }

    /// Total surface area.
    #[must_use]
    pub fn surface_area(&self) -> f32 {
        self.face_areas().iter().sum()
    }

    /// Axis-aligned bounds as `(min, max)`, or `None` for a mesh without
    /// vertices.
    #[must_use]
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let first = *self.positions.first()?;
        Some(
            self.positions
                .iter()
                .fold((first, first), |(lo, hi), &p| (lo.min(p), hi.max(p))),
        )
    }

    /// Return a copy with every vertex mapped through `transform`.
    #[must_use]
    pub fn transformed(&self, transform: &Affine3A) -> Self {
        Self {
            positions: self
                .positions
                .iter()
                .map(|&p| transform.transform_point3(p))
                .collect(),
            triangles: self.triangles.clone(),
        }
    }
}
