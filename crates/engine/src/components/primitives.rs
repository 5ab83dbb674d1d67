//! Procedural primitive meshes. All generators emit counter-clockwise
//! front faces with outward normals.

use crate::prelude::*;
use std::f32::consts::{PI, TAU};

impl Mesh {
    /// UV sphere centered at the origin
    pub fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> Self {
        let width_segments = width_segments.max(3);
        let height_segments = height_segments.max(2);
        let row = width_segments + 1;
        let mut mesh = Self::with_capacity(
            (row * (height_segments + 1)) as usize,
            (width_segments * height_segments * 6) as usize,
        );

        for iy in 0..=height_segments {
            let v = iy as f32 / height_segments as f32;
            let theta = v * PI;
            for ix in 0..=width_segments {
                let u = ix as f32 / width_segments as f32;
                let phi = u * TAU;
                let normal = Vector3::new(
                    -phi.cos() * theta.sin(),
                    theta.cos(),
                    phi.sin() * theta.sin(),
                );
                let position = normal * radius;
                mesh.vertices.push(Vertex {
                    position: position.into(),
                    uv: [u, 1.0 - v],
                    normal: normal.into(),
                });
            }
        }

        for iy in 0..height_segments {
            for ix in 0..width_segments {
                let a = iy * row + ix + 1;
                let b = iy * row + ix;
                let c = (iy + 1) * row + ix;
                let d = (iy + 1) * row + ix + 1;

                // The pole rows collapse to a single point, so each only needs one triangle
                if iy != 0 {
                    mesh.indices.extend_from_slice(&[a, b, d]);
                }
                if iy != height_segments - 1 {
                    mesh.indices.extend_from_slice(&[b, c, d]);
                }
            }
        }

        mesh
    }

    /// Axis-aligned box centered at the origin with per-face normals
    pub fn cuboid(width: f32, height: f32, depth: f32) -> Self {
        let half = Vector3::new(width, height, depth) / 2.0;
        let mut mesh = Self::with_capacity(24, 36);

        // (normal, u, v) with u x v == normal
        let faces = [
            (Vector3::x(), -Vector3::z(), Vector3::y()),
            (-Vector3::x(), Vector3::z(), Vector3::y()),
            (Vector3::y(), Vector3::x(), -Vector3::z()),
            (-Vector3::y(), Vector3::x(), Vector3::z()),
            (Vector3::z(), Vector3::x(), Vector3::y()),
            (-Vector3::z(), -Vector3::x(), Vector3::y()),
        ];

        for (normal, u, v) in faces {
            let center = normal.component_mul(&half);
            let hu = u.abs().dot(&half);
            let hv = v.abs().dot(&half);
            let corners = [
                (center - u * hu - v * hv, [0.0, 1.0]),
                (center + u * hu - v * hv, [1.0, 1.0]),
                (center + u * hu + v * hv, [1.0, 0.0]),
                (center - u * hu + v * hv, [0.0, 0.0]),
            ];

            let base = mesh.vertices.len() as Index;
            for (corner, uv) in corners {
                mesh.vertices.push(Vertex {
                    position: corner.into(),
                    uv,
                    normal: normal.into(),
                });
            }
            mesh.indices
                .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        }

        mesh
    }

    /// Torus around the Z axis. `radius` is measured to the center of the tube.
    pub fn torus(radius: f32, tube: f32, radial_segments: u32, tubular_segments: u32) -> Self {
        let radial_segments = radial_segments.max(3);
        let tubular_segments = tubular_segments.max(3);
        let row = tubular_segments + 1;
        let mut mesh = Self::with_capacity(
            (row * (radial_segments + 1)) as usize,
            (radial_segments * tubular_segments * 6) as usize,
        );

        for j in 0..=radial_segments {
            let v = j as f32 / radial_segments as f32 * TAU;
            for i in 0..=tubular_segments {
                let u = i as f32 / tubular_segments as f32 * TAU;
                let (sin_u, cos_u) = u.sin_cos();
                let (sin_v, cos_v) = v.sin_cos();

                let position = Vector3::new(
                    (radius + tube * cos_v) * cos_u,
                    (radius + tube * cos_v) * sin_u,
                    tube * sin_v,
                );
                let center = Vector3::new(radius * cos_u, radius * sin_u, 0.0);
                let normal = (position - center).normalize();

                mesh.vertices.push(Vertex {
                    position: position.into(),
                    uv: [
                        i as f32 / tubular_segments as f32,
                        j as f32 / radial_segments as f32,
                    ],
                    normal: normal.into(),
                });
            }
        }

        for j in 1..=radial_segments {
            for i in 1..=tubular_segments {
                let a = row * j + i - 1;
                let b = row * (j - 1) + i - 1;
                let c = row * (j - 1) + i;
                let d = row * j + i;
                mesh.indices.extend_from_slice(&[a, b, d, b, c, d]);
            }
        }

        mesh
    }

    /// Single quad in the XY plane facing +Z
    pub fn plane(width: f32, height: f32) -> Self {
        let (hw, hh) = (width / 2.0, height / 2.0);
        let normal = [0.0, 0.0, 1.0];

        Self {
            vertices: vec![
                Vertex {
                    position: [-hw, hh, 0.0],
                    uv: [0.0, 0.0],
                    normal,
                },
                Vertex {
                    position: [hw, hh, 0.0],
                    uv: [1.0, 0.0],
                    normal,
                },
                Vertex {
                    position: [-hw, -hh, 0.0],
                    uv: [0.0, 1.0],
                    normal,
                },
                Vertex {
                    position: [hw, -hh, 0.0],
                    uv: [1.0, 1.0],
                    normal,
                },
            ],
            indices: vec![0, 2, 1, 2, 3, 1],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position(mesh: &Mesh, index: Index) -> Vector3<f32> {
        Vector3::from(mesh.vertices[index as usize].position)
    }

    fn normal(mesh: &Mesh, index: Index) -> Vector3<f32> {
        Vector3::from(mesh.vertices[index as usize].normal)
    }

    /// Every non-degenerate triangle winds counter-clockwise around its vertex normals
    fn assert_outward_winding(mesh: &Mesh) {
        for triangle in mesh.indices.chunks(3) {
            let (a, b, c) = (triangle[0], triangle[1], triangle[2]);
            let face = (position(mesh, b) - position(mesh, a))
                .cross(&(position(mesh, c) - position(mesh, a)));
            if face.norm() < 1e-7 {
                continue;
            }
            let average = normal(mesh, a) + normal(mesh, b) + normal(mesh, c);
            assert!(face.dot(&average) > 0.0, "triangle {:?} faces inward", triangle);
        }
    }

    fn assert_indices_in_bounds(mesh: &Mesh) {
        assert_eq!(mesh.indices.len() % 3, 0);
        assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.vertex_count()));
    }

    #[test]
    fn sphere_counts() {
        let mesh = Mesh::sphere(0.5, 32, 32);
        assert_eq!(mesh.vertex_count(), 33 * 33);
        assert_eq!(mesh.triangle_count(), 32 * (2 * 32 - 2));
        assert_indices_in_bounds(&mesh);
    }

    #[test]
    fn sphere_vertices_lie_on_radius() {
        let mesh = Mesh::sphere(0.5, 16, 8);
        for vertex in &mesh.vertices {
            let length = Vector3::from(vertex.position).norm();
            assert!((length - 0.5).abs() < 1e-5);
        }
        assert_outward_winding(&mesh);
    }

    #[test]
    fn cuboid_counts_and_extent() {
        let mesh = Mesh::cuboid(0.75, 0.75, 0.75);
        assert_eq!(mesh.vertex_count(), 24);
        assert_eq!(mesh.indices.len(), 36);
        assert_indices_in_bounds(&mesh);
        for vertex in &mesh.vertices {
            assert!(vertex.position.iter().all(|c| (c.abs() - 0.375).abs() < 1e-6));
        }
        assert_outward_winding(&mesh);
    }

    #[test]
    fn torus_counts() {
        let mesh = Mesh::torus(0.3, 0.2, 32, 64);
        assert_eq!(mesh.vertex_count(), 33 * 65);
        assert_eq!(mesh.triangle_count(), 32 * 64 * 2);
        assert_indices_in_bounds(&mesh);
        assert_outward_winding(&mesh);
    }

    #[test]
    fn plane_faces_positive_z() {
        let mesh = Mesh::plane(5.0, 5.0);
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.triangle_count(), 2);
        assert_indices_in_bounds(&mesh);
        assert_outward_winding(&mesh);
    }

    #[test]
    fn segments_are_clamped() {
        let mesh = Mesh::sphere(1.0, 0, 0);
        assert!(!mesh.is_empty());
        let mesh = Mesh::torus(1.0, 0.1, 0, 0);
        assert!(!mesh.is_empty());
    }
}
