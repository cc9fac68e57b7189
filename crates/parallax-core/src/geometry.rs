//! Procedural meshes for the three section objects.
//!
//! Polyhedra are flat-shaded (each face owns its vertices and carries the
//! face normal); the capsule is a smooth lathe. All meshes are centred on
//! the origin with counter-clockwise front faces.

use crate::constants::{CAPSULE_CAP_SEGMENTS, CAPSULE_LENGTH, CAPSULE_RADIAL_SEGMENTS, SHAPE_RADIUS};
use glam::Vec3;
use smallvec::SmallVec;
use std::f32::consts::{FRAC_PI_2, TAU};

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

#[derive(Clone, Debug, Default)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Triangle corner positions, in index order.
    pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        self.indices.chunks_exact(3).map(move |tri| {
            let p = |i: u32| Vec3::from(self.vertices[i as usize].position);
            [p(tri[0]), p(tri[1]), p(tri[2])]
        })
    }

    /// Append a flat triangle, flipping it if needed so it faces away from
    /// the origin. Only valid for convex shapes around the origin.
    fn push_flat_triangle(&mut self, a: Vec3, b: Vec3, c: Vec3, normal_hint: Option<Vec3>) {
        let (mut b, mut c) = (b, c);
        let mut n = (b - a).cross(c - a).normalize_or_zero();
        if n.dot(a + b + c) < 0.0 {
            std::mem::swap(&mut b, &mut c);
            n = -n;
        }
        let n = normal_hint.unwrap_or(n);
        let base = self.vertices.len() as u32;
        for p in [a, b, c] {
            self.vertices.push(Vertex {
                position: p.to_array(),
                normal: n.to_array(),
            });
        }
        self.indices.extend_from_slice(&[base, base + 1, base + 2]);
    }
}

/// Section object silhouettes, one per slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Shape {
    Dodecahedron,
    Capsule,
    Icosahedron,
}

impl Shape {
    pub const BY_SLOT: [Shape; 3] = [Shape::Dodecahedron, Shape::Capsule, Shape::Icosahedron];

    pub fn build_mesh(self) -> Mesh {
        match self {
            Shape::Dodecahedron => dodecahedron(SHAPE_RADIUS),
            Shape::Capsule => capsule(
                SHAPE_RADIUS,
                CAPSULE_LENGTH,
                CAPSULE_CAP_SEGMENTS,
                CAPSULE_RADIAL_SEGMENTS,
            ),
            Shape::Icosahedron => icosahedron(SHAPE_RADIUS),
        }
    }
}

const ICO_FACES: [[usize; 3]; 20] = [
    [0, 11, 5],
    [0, 5, 1],
    [0, 1, 7],
    [0, 7, 10],
    [0, 10, 11],
    [1, 5, 9],
    [5, 11, 4],
    [11, 10, 2],
    [10, 7, 6],
    [7, 1, 8],
    [3, 9, 4],
    [3, 4, 2],
    [3, 2, 6],
    [3, 6, 8],
    [3, 8, 9],
    [4, 9, 5],
    [2, 4, 11],
    [6, 2, 10],
    [8, 6, 7],
    [9, 8, 1],
];

fn ico_unit_vertices() -> [Vec3; 12] {
    let t = (1.0 + 5.0_f32.sqrt()) / 2.0;
    [
        Vec3::new(-1.0, t, 0.0),
        Vec3::new(1.0, t, 0.0),
        Vec3::new(-1.0, -t, 0.0),
        Vec3::new(1.0, -t, 0.0),
        Vec3::new(0.0, -1.0, t),
        Vec3::new(0.0, 1.0, t),
        Vec3::new(0.0, -1.0, -t),
        Vec3::new(0.0, 1.0, -t),
        Vec3::new(t, 0.0, -1.0),
        Vec3::new(t, 0.0, 1.0),
        Vec3::new(-t, 0.0, -1.0),
        Vec3::new(-t, 0.0, 1.0),
    ]
    .map(Vec3::normalize)
}

/// Regular icosahedron with its vertices on a sphere of `radius`.
pub fn icosahedron(radius: f32) -> Mesh {
    let v = ico_unit_vertices();
    let mut mesh = Mesh::default();
    for [a, b, c] in ICO_FACES {
        mesh.push_flat_triangle(v[a] * radius, v[b] * radius, v[c] * radius, None);
    }
    mesh
}

/// Regular dodecahedron built as the dual of the icosahedron: one pentagon
/// per icosahedron vertex, through the centres of its five adjacent faces.
pub fn dodecahedron(radius: f32) -> Mesh {
    let v = ico_unit_vertices();
    let centres: Vec<Vec3> = ICO_FACES
        .iter()
        .map(|[a, b, c]| ((v[*a] + v[*b] + v[*c]) / 3.0).normalize())
        .collect();
    let mut mesh = Mesh::default();
    for (vi, axis) in v.iter().enumerate() {
        let mut ring: SmallVec<[Vec3; 5]> = ICO_FACES
            .iter()
            .zip(&centres)
            .filter(|(face, _)| face.contains(&vi))
            .map(|(_, c)| *c)
            .collect();
        let u = (ring[0] - *axis * ring[0].dot(*axis)).normalize();
        let w = axis.cross(u);
        ring.sort_by(|p, q| {
            let ap = p.dot(w).atan2(p.dot(u));
            let aq = q.dot(w).atan2(q.dot(u));
            ap.total_cmp(&aq)
        });
        for i in 1..ring.len() - 1 {
            mesh.push_flat_triangle(
                ring[0] * radius,
                ring[i] * radius,
                ring[i + 1] * radius,
                Some(*axis),
            );
        }
    }
    mesh
}

/// Capsule along the y axis: a cylinder of `length` capped by hemispheres.
pub fn capsule(radius: f32, length: f32, cap_segments: u32, radial_segments: u32) -> Mesh {
    let cap_segments = cap_segments.max(1);
    let radial_segments = radial_segments.max(3);
    let half = length * 0.5;

    // Profile from the bottom pole to the top pole: (ring radius, y, normal in the xz/y plane).
    let mut profile: Vec<(f32, f32, f32, f32)> = Vec::new();
    for i in 0..=cap_segments {
        let theta = -FRAC_PI_2 + FRAC_PI_2 * i as f32 / cap_segments as f32;
        let (s, c) = theta.sin_cos();
        profile.push((radius * c, -half + radius * s, c, s));
    }
    for i in 0..=cap_segments {
        let theta = FRAC_PI_2 * i as f32 / cap_segments as f32;
        let (s, c) = theta.sin_cos();
        profile.push((radius * c, half + radius * s, c, s));
    }

    let cols = radial_segments + 1;
    let mut mesh = Mesh::default();
    for &(rho, y, nr, ny) in &profile {
        for j in 0..cols {
            let phi = TAU * j as f32 / radial_segments as f32;
            let (sp, cp) = phi.sin_cos();
            mesh.vertices.push(Vertex {
                position: [rho * sp, y, rho * cp],
                normal: Vec3::new(nr * sp, ny, nr * cp).normalize().to_array(),
            });
        }
    }

    let pole = radius * 1e-4;
    for i in 0..profile.len() as u32 - 1 {
        let lower_pole = profile[i as usize].0 < pole;
        let upper_pole = profile[i as usize + 1].0 < pole;
        for j in 0..radial_segments {
            let a = i * cols + j;
            let b = (i + 1) * cols + j;
            let c = (i + 1) * cols + j + 1;
            let d = i * cols + j + 1;
            if !lower_pole {
                mesh.indices.extend_from_slice(&[a, d, b]);
            }
            if !upper_pole {
                mesh.indices.extend_from_slice(&[b, d, c]);
            }
        }
    }
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_outward(mesh: &Mesh) {
        for [a, b, c] in mesh.triangles() {
            let n = (b - a).cross(c - a);
            assert!(n.length() > 1e-6, "degenerate triangle");
            assert!(n.dot(a + b + c) > 0.0, "inward-facing triangle");
        }
    }

    #[test]
    fn icosahedron_is_closed_and_outward() {
        let m = icosahedron(1.0);
        assert_eq!(m.triangle_count(), 20);
        assert_outward(&m);
        for v in &m.vertices {
            assert!((Vec3::from(v.position).length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn dodecahedron_has_twelve_flat_pentagons() {
        let m = dodecahedron(2.0);
        assert_eq!(m.triangle_count(), 36);
        assert_outward(&m);
        for v in &m.vertices {
            assert!((Vec3::from(v.position).length() - 2.0).abs() < 1e-4);
        }
        // every triangle lies in the plane of its pentagon
        for (tri, idx) in m.triangles().zip(m.indices.chunks_exact(3)) {
            let n = Vec3::from(m.vertices[idx[0] as usize].normal);
            let face_n = (tri[1] - tri[0]).cross(tri[2] - tri[0]).normalize();
            assert!(face_n.dot(n) > 0.999);
        }
    }

    #[test]
    fn capsule_surface_is_radius_from_axis_segment() {
        let (r, len) = (1.0, 1.0);
        let m = capsule(r, len, 4, 8);
        assert_outward(&m);
        for v in &m.vertices {
            let p = Vec3::from(v.position);
            let on_axis = Vec3::new(0.0, p.y.clamp(-len / 2.0, len / 2.0), 0.0);
            assert!(((p - on_axis).length() - r).abs() < 1e-4);
            assert!((Vec3::from(v.normal).length() - 1.0).abs() < 1e-4);
        }
        let top = m.vertices.iter().map(|v| v.position[1]).fold(f32::MIN, f32::max);
        assert!((top - (len / 2.0 + r)).abs() < 1e-5);
    }
}
