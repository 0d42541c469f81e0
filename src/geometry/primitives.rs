//! Procedural meshes and the named mesh source the pipeline loads from.
//!
//! Real deployments decode compressed assets elsewhere and hand the
//! resulting triangles to [`MeshLibrary::insert`]; the built-in primitives
//! keep the crate usable headless and in tests.

use std::f32::consts::TAU;

use glam::Vec3;
use rustc_hash::FxHashMap;

use super::TriangleMesh;
use crate::error::MorphError;

/// Anything that can produce a mesh for an asset name.
pub trait MeshSource {
    /// Load (or decode) the mesh registered under `name`.
    fn load(&self, name: &str) -> Result<TriangleMesh, MorphError>;
}

/// In-memory name → mesh map.
#[derive(Debug, Clone, Default)]
pub struct MeshLibrary {
    meshes: FxHashMap<String, TriangleMesh>,
}

impl MeshLibrary {
    /// Empty library.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Library pre-populated with `cube`, `sphere`, `torus` and
    /// `octahedron`, each roughly spanning the unit cube.
    #[must_use]
    pub fn with_primitives() -> Self {
        let mut library = Self::new();
        library.insert("cube", cube(1.0));
        library.insert("sphere", icosphere(0.5, 3));
        library.insert("torus", torus(0.35, 0.15, 48, 24));
        library.insert("octahedron", octahedron(0.5));
        library
    }

    /// Register `mesh` under `name`, replacing any previous entry.
    pub fn insert(&mut self, name: impl Into<String>, mesh: TriangleMesh) {
        let name = name.into();
        if self.meshes.insert(name.clone(), mesh).is_some() {
            log::debug!("replaced mesh '{name}'");
        }
    }

    /// Registered mesh names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> =
            self.meshes.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl MeshSource for MeshLibrary {
    fn load(&self, name: &str) -> Result<TriangleMesh, MorphError> {
        self.meshes
            .get(name)
            .cloned()
            .ok_or_else(|| MorphError::MeshNotFound(name.to_owned()))
    }
}

/// Axis-aligned cube of edge length `size` centered on the origin.
#[must_use]
pub fn cube(size: f32) -> TriangleMesh {
    let h = size * 0.5;
    let positions: Vec<Vec3> = (0..8)
        .map(|i| {
            Vec3::new(
                if i & 1 == 0 { -h } else { h },
                if i & 2 == 0 { -h } else { h },
                if i & 4 == 0 { -h } else { h },
            )
        })
        .collect();

    // Two triangles per face; corner bits are x=1, y=2, z=4
    let triangles = vec![
        [0, 2, 3], [0, 3, 1], // -z
        [4, 5, 7], [4, 7, 6], // +z
        [0, 1, 5], [0, 5, 4], // -y
        [2, 6, 7], [2, 7, 3], // +y
        [0, 4, 6], [0, 6, 2], // -x
        [1, 3, 7], [1, 7, 5], // +x
    ];

    TriangleMesh::from_parts(positions, triangles)
}

/// Regular octahedron with vertices at distance `radius` on each axis.
#[must_use]
pub fn octahedron(radius: f32) -> TriangleMesh {
    let positions = vec![
        Vec3::X * radius,
        Vec3::NEG_X * radius,
        Vec3::Y * radius,
        Vec3::NEG_Y * radius,
        Vec3::Z * radius,
        Vec3::NEG_Z * radius,
    ];
    let triangles = vec![
        [0, 2, 4], [2, 1, 4], [1, 3, 4], [3, 0, 4],
        [2, 0, 5], [1, 2, 5], [3, 1, 5], [0, 3, 5],
    ];
    TriangleMesh::from_parts(positions, triangles)
}

/// Subdivided icosahedron projected onto a sphere of `radius`.
#[must_use]
pub fn icosphere(radius: f32, subdivisions: u32) -> TriangleMesh {
    // Golden ratio for icosahedron vertices
    let phi = (1.0 + 5.0_f32.sqrt()) / 2.0;

    let mut positions: Vec<Vec3> = [
        (-1.0, phi, 0.0),
        (1.0, phi, 0.0),
        (-1.0, -phi, 0.0),
        (1.0, -phi, 0.0),
        (0.0, -1.0, phi),
        (0.0, 1.0, phi),
        (0.0, -1.0, -phi),
        (0.0, 1.0, -phi),
        (phi, 0.0, -1.0),
        (phi, 0.0, 1.0),
        (-phi, 0.0, -1.0),
        (-phi, 0.0, 1.0),
    ]
    .iter()
    .map(|&(x, y, z)| Vec3::new(x, y, z).normalize())
    .collect();

    let mut triangles: Vec<[u32; 3]> = vec![
        [0, 11, 5], [0, 5, 1], [0, 1, 7], [0, 7, 10], [0, 10, 11],
        [1, 5, 9], [5, 11, 4], [11, 10, 2], [10, 7, 6], [7, 1, 8],
        [3, 9, 4], [3, 4, 2], [3, 2, 6], [3, 6, 8], [3, 8, 9],
        [4, 9, 5], [2, 4, 11], [6, 2, 10], [8, 6, 7], [9, 8, 1],
    ];

    let mut midpoints: FxHashMap<(u32, u32), u32> = FxHashMap::default();
    for _ in 0..subdivisions {
        let mut next = Vec::with_capacity(triangles.len() * 4);
        for &[v0, v1, v2] in &triangles {
            let a = midpoint(&mut positions, &mut midpoints, v0, v1);
            let b = midpoint(&mut positions, &mut midpoints, v1, v2);
            let c = midpoint(&mut positions, &mut midpoints, v2, v0);
            next.extend_from_slice(&[
                [v0, a, c],
                [v1, b, a],
                [v2, c, b],
                [a, b, c],
            ]);
        }
        triangles = next;
    }

    for p in &mut positions {
        *p *= radius;
    }
    TriangleMesh::from_parts(positions, triangles)
}

/// Unit-sphere midpoint of edge `(a, b)`, shared between neighbours.
fn midpoint(
    positions: &mut Vec<Vec3>,
    cache: &mut FxHashMap<(u32, u32), u32>,
    a: u32,
    b: u32,
) -> u32 {
    let key = (a.min(b), a.max(b));
    *cache.entry(key).or_insert_with(|| {
        let mid = (positions[a as usize] + positions[b as usize]).normalize();
        positions.push(mid);
        (positions.len() - 1) as u32
    })
}

/// Torus around the Y axis.
///
/// `major` is the distance from the center to the tube center, `minor` the
/// tube radius.
#[must_use]
pub fn torus(
    major: f32,
    minor: f32,
    radial_segments: u32,
    tubular_segments: u32,
) -> TriangleMesh {
    let radial = radial_segments.max(3);
    let tubular = tubular_segments.max(3);

    let mut positions = Vec::with_capacity((radial * tubular) as usize);
    for i in 0..radial {
        let u = i as f32 / radial as f32 * TAU;
        for j in 0..tubular {
            let v = j as f32 / tubular as f32 * TAU;
            let ring = major + minor * v.cos();
            positions.push(Vec3::new(
                ring * u.cos(),
                minor * v.sin(),
                ring * u.sin(),
            ));
        }
    }

    let index = |i: u32, j: u32| (i % radial) * tubular + (j % tubular);
    let mut triangles = Vec::with_capacity((radial * tubular * 2) as usize);
    for i in 0..radial {
        for j in 0..tubular {
            let a = index(i, j);
            let b = index(i + 1, j);
            let c = index(i + 1, j + 1);
            let d = index(i, j + 1);
            triangles.push([a, b, d]);
            triangles.push([b, c, d]);
        }
    }

    TriangleMesh::from_parts(positions, triangles)
}
