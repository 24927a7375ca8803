//! Procedural meshes for the scene: torus, UV sphere, and box.
//!
//! Parameterization and triangle order follow the usual web 3D conventions
//! (counter-clockwise front faces, seam duplicated so UVs wrap cleanly).
//! UVs are stored in texture space: `v = 0` is the top row of the image.

use std::f32::consts::{PI, TAU};

use glam::Vec3;

// ==================== VERTEX FORMAT ====================

/// 48-byte mesh vertex shared by every scene pipeline.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    /// Object-space position.
    pub position: [f32; 3],
    /// Unit object-space normal.
    pub normal: [f32; 3],
    /// Texture coordinate.
    pub uv: [f32; 2],
    /// Direction of increasing `u`; `w` is the bitangent sign.
    pub tangent: [f32; 4],
}

/// Per-vertex buffer layout (locations 0-3).
pub fn mesh_vertex_buffer_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: size_of::<MeshVertex>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x3,
                offset: 0,
                shader_location: 0, // position
            },
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x3,
                offset: 12,
                shader_location: 1, // normal
            },
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x2,
                offset: 24,
                shader_location: 2, // uv
            },
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x4,
                offset: 32,
                shader_location: 3, // tangent
            },
        ],
    }
}

/// Per-instance world offset (location 4).
pub fn instance_offset_buffer_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: size_of::<[f32; 3]>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Instance,
        attributes: &[wgpu::VertexAttribute {
            format: wgpu::VertexFormat::Float32x3,
            offset: 0,
            shader_location: 4,
        }],
    }
}

// ==================== MESH DATA ====================

/// CPU-side indexed triangle mesh.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    /// Vertex data.
    pub vertices: Vec<MeshVertex>,
    /// Triangle list indices into `vertices`.
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Number of indices as the GPU draw count.
    #[must_use]
    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }

    /// Torus in the XY plane around the Z axis.
    ///
    /// `radial_segments` split the tube cross-section, `tubular_segments`
    /// run around the ring.
    #[must_use]
    pub fn torus(
        radius: f32,
        tube: f32,
        radial_segments: u32,
        tubular_segments: u32,
    ) -> Self {
        let radial = radial_segments.max(2);
        let tubular = tubular_segments.max(3);
        let mut mesh = Self::default();

        for j in 0..=radial {
            let fv = j as f32 / radial as f32;
            let v = fv * TAU;
            for i in 0..=tubular {
                let fu = i as f32 / tubular as f32;
                let u = fu * TAU;

                let ring = radius + tube * v.cos();
                let position = Vec3::new(ring * u.cos(), ring * u.sin(), tube * v.sin());
                let center = Vec3::new(radius * u.cos(), radius * u.sin(), 0.0);
                let normal = (position - center).normalize_or_zero();
                let tangent = Vec3::new(-u.sin(), u.cos(), 0.0);

                mesh.vertices.push(MeshVertex {
                    position: position.to_array(),
                    normal: normal.to_array(),
                    uv: [fu, 1.0 - fv],
                    tangent: tangent.extend(1.0).to_array(),
                });
            }
        }

        let row = tubular + 1;
        for j in 1..=radial {
            for i in 1..=tubular {
                let a = row * j + i - 1;
                let b = row * (j - 1) + i - 1;
                let c = row * (j - 1) + i;
                let d = row * j + i;
                mesh.indices.extend_from_slice(&[a, b, d, b, c, d]);
            }
        }
        mesh
    }

    /// UV sphere centred on the origin, poles on the Y axis.
    #[must_use]
    pub fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> Self {
        let width = width_segments.max(3);
        let height = height_segments.max(2);
        let mut mesh = Self::default();

        for iy in 0..=height {
            let fv = iy as f32 / height as f32;
            let theta = fv * PI;
            // Pole vertices sit mid-segment so each pole triangle gets its
            // own texel column.
            let u_offset = if iy == 0 {
                0.5 / width as f32
            } else if iy == height {
                -0.5 / width as f32
            } else {
                0.0
            };

            for ix in 0..=width {
                let fu = ix as f32 / width as f32;
                let phi = fu * TAU;
                let position = Vec3::new(
                    -radius * phi.cos() * theta.sin(),
                    radius * theta.cos(),
                    radius * phi.sin() * theta.sin(),
                );
                let normal = position.normalize_or_zero();
                let tangent = Vec3::new(phi.sin(), 0.0, phi.cos());

                mesh.vertices.push(MeshVertex {
                    position: position.to_array(),
                    normal: normal.to_array(),
                    uv: [fu + u_offset, fv],
                    tangent: tangent.extend(1.0).to_array(),
                });
            }
        }

        let row = width + 1;
        for iy in 0..height {
            for ix in 0..width {
                let a = row * iy + ix + 1;
                let b = row * iy + ix;
                let c = row * (iy + 1) + ix;
                let d = row * (iy + 1) + ix + 1;
                if iy != 0 {
                    mesh.indices.extend_from_slice(&[a, b, d]);
                }
                if iy != height - 1 {
                    mesh.indices.extend_from_slice(&[b, c, d]);
                }
            }
        }
        mesh
    }

    /// Axis-aligned box with one quad (and the full texture) per face.
    #[must_use]
    pub fn cuboid(width: f32, height: f32, depth: f32) -> Self {
        let half = Vec3::new(width, height, depth) * 0.5;
        let mut mesh = Self::default();

        for face in &BOX_FACES {
            let base = mesh.vertices.len() as u32;
            let tangent_sign =
                if face.normal.cross(face.u_axis).dot(-face.v_axis) < 0.0 {
                    -1.0
                } else {
                    1.0
                };

            for iy in 0..=1u8 {
                for ix in 0..=1u8 {
                    let su = f32::from(ix) * 2.0 - 1.0;
                    let sv = f32::from(iy) * 2.0 - 1.0;
                    let position =
                        (face.normal + face.u_axis * su + face.v_axis * sv) * half;
                    mesh.vertices.push(MeshVertex {
                        position: position.to_array(),
                        normal: face.normal.to_array(),
                        uv: [f32::from(ix), f32::from(iy)],
                        tangent: face.u_axis.extend(tangent_sign).to_array(),
                    });
                }
            }

            let (a, b, c, d) = (base, base + 2, base + 3, base + 1);
            mesh.indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
        mesh
    }
}

/// One box face: outward normal, direction of increasing texture `u`,
/// direction of increasing texture `v` (image rows, downward).
struct BoxFace {
    normal: Vec3,
    u_axis: Vec3,
    v_axis: Vec3,
}

const BOX_FACES: [BoxFace; 6] = [
    BoxFace {
        normal: Vec3::X,
        u_axis: Vec3::NEG_Z,
        v_axis: Vec3::NEG_Y,
    },
    BoxFace {
        normal: Vec3::NEG_X,
        u_axis: Vec3::Z,
        v_axis: Vec3::NEG_Y,
    },
    BoxFace {
        normal: Vec3::Y,
        u_axis: Vec3::X,
        v_axis: Vec3::Z,
    },
    BoxFace {
        normal: Vec3::NEG_Y,
        u_axis: Vec3::X,
        v_axis: Vec3::NEG_Z,
    },
    BoxFace {
        normal: Vec3::Z,
        u_axis: Vec3::X,
        v_axis: Vec3::NEG_Y,
    },
    BoxFace {
        normal: Vec3::NEG_Z,
        u_axis: Vec3::NEG_X,
        v_axis: Vec3::NEG_Y,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_well_formed(mesh: &MeshData) {
        let n = mesh.vertices.len() as u32;
        assert_eq!(mesh.indices.len() % 3, 0);
        assert!(mesh.indices.iter().all(|&i| i < n));
        for v in &mesh.vertices {
            let len = Vec3::from_array(v.normal).length();
            assert!((len - 1.0).abs() < 1e-4, "normal length {len}");
            // Pole vertices may overhang in u by half a segment.
            assert!((-1e-6..=1.0 + 1e-6).contains(&v.uv[1]));
        }
    }

    /// Every triangle's winding should agree with its vertex normals
    /// (counter-clockwise seen from outside).
    fn assert_outward_winding(mesh: &MeshData) {
        for tri in mesh.indices.chunks_exact(3) {
            let p = |i: u32| Vec3::from_array(mesh.vertices[i as usize].position);
            let face = (p(tri[1]) - p(tri[0])).cross(p(tri[2]) - p(tri[0]));
            if face.length_squared() < 1e-10 {
                continue;
            }
            let normal: Vec3 = tri
                .iter()
                .map(|&i| Vec3::from_array(mesh.vertices[i as usize].normal))
                .sum();
            assert!(face.dot(normal) > 0.0, "inward triangle {tri:?}");
        }
    }

    #[test]
    fn vertex_layout_is_48_bytes() {
        assert_eq!(size_of::<MeshVertex>(), 48);
        assert_eq!(mesh_vertex_buffer_layout().array_stride, 48);
    }

    #[test]
    fn torus_counts() {
        let mesh = MeshData::torus(10.0, 3.0, 16, 100);
        assert_eq!(mesh.vertices.len(), 17 * 101);
        assert_eq!(mesh.indices.len(), 16 * 100 * 6);
        assert_well_formed(&mesh);
        assert_outward_winding(&mesh);
    }

    #[test]
    fn torus_extent() {
        let mesh = MeshData::torus(10.0, 3.0, 16, 100);
        let max_r = mesh
            .vertices
            .iter()
            .map(|v| Vec3::from_array(v.position).truncate().length())
            .fold(0.0_f32, f32::max);
        let max_z = mesh
            .vertices
            .iter()
            .map(|v| v.position[2].abs())
            .fold(0.0_f32, f32::max);
        assert!((max_r - 13.0).abs() < 1e-3);
        assert!((max_z - 3.0).abs() < 0.05);
    }

    #[test]
    fn sphere_counts() {
        let mesh = MeshData::sphere(3.0, 32, 32);
        assert_eq!(mesh.vertices.len(), 33 * 33);
        assert_eq!(mesh.indices.len(), 32 * 30 * 6 + 32 * 6);
        assert_well_formed(&mesh);
        assert_outward_winding(&mesh);
    }

    #[test]
    fn sphere_vertices_on_surface() {
        let mesh = MeshData::sphere(0.25, 24, 24);
        for v in &mesh.vertices {
            let r = Vec3::from_array(v.position).length();
            assert!((r - 0.25).abs() < 1e-5);
        }
    }

    #[test]
    fn sphere_top_row_is_north_pole() {
        let mesh = MeshData::sphere(1.0, 8, 8);
        assert!((mesh.vertices[0].position[1] - 1.0).abs() < 1e-6);
        assert_eq!(mesh.vertices[0].uv[1], 0.0);
    }

    #[test]
    fn cuboid_counts() {
        let mesh = MeshData::cuboid(2.0, 2.0, 2.0);
        assert_eq!(mesh.vertices.len(), 24);
        assert_eq!(mesh.indices.len(), 36);
        assert_well_formed(&mesh);
        assert_outward_winding(&mesh);
    }

    #[test]
    fn cuboid_corners_at_half_extent() {
        let mesh = MeshData::cuboid(2.0, 2.0, 2.0);
        for v in &mesh.vertices {
            assert!(v.position.iter().all(|c| (c.abs() - 1.0).abs() < 1e-6));
        }
    }

    #[test]
    fn cuboid_faces_show_image_upright() {
        let mesh = MeshData::cuboid(2.0, 2.0, 2.0);
        // +Z face: top-left texel at (-x, +y).
        let front = &mesh.vertices[16..20];
        let top_left = front.iter().find(|v| v.uv == [0.0, 0.0]).unwrap();
        assert_eq!(top_left.position, [-1.0, 1.0, 1.0]);
    }

    #[test]
    fn tangents_follow_u() {
        let mesh = MeshData::cuboid(2.0, 2.0, 2.0);
        for v in &mesh.vertices {
            let t = Vec3::from_array([v.tangent[0], v.tangent[1], v.tangent[2]]);
            assert!(t.dot(Vec3::from_array(v.normal)).abs() < 1e-6);
            assert_eq!(v.tangent[3].abs(), 1.0);
        }
    }
}
