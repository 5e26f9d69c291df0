use bytemuck::{Pod, Zeroable};
use lightlab_kernel::Shape;
use std::f32::consts::{PI, TAU};

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

/// Triangle list with shared vertices.
#[derive(Debug, Clone, Default)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn for_shape(shape: &Shape) -> Self {
        match *shape {
            Shape::Sphere {
                radius,
                width_segments,
                height_segments,
            } => sphere(radius, width_segments, height_segments),
            Shape::Box {
                width,
                height,
                depth,
            } => cuboid(width, height, depth),
            Shape::Torus {
                radius,
                tube,
                radial_segments,
                tubular_segments,
            } => torus(radius, tube, radial_segments, tubular_segments),
            Shape::Plane { width, height } => plane(width, height),
        }
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// UV sphere centered at the origin.
pub fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> MeshData {
    let ws = width_segments.max(3);
    let hs = height_segments.max(2);
    let mut mesh = MeshData::default();

    for y in 0..=hs {
        let v = y as f32 / hs as f32;
        let polar = v * PI;
        for x in 0..=ws {
            let u = x as f32 / ws as f32;
            let azimuth = u * TAU;
            let n = [
                -azimuth.cos() * polar.sin(),
                polar.cos(),
                azimuth.sin() * polar.sin(),
            ];
            mesh.vertices.push(Vertex {
                position: [n[0] * radius, n[1] * radius, n[2] * radius],
                normal: n,
            });
        }
    }

    let row = ws + 1;
    for y in 0..hs {
        for x in 0..ws {
            let a = y * row + x + 1;
            let b = y * row + x;
            let c = (y + 1) * row + x;
            let d = (y + 1) * row + x + 1;
            if y != 0 {
                mesh.indices.extend([a, b, d]);
            }
            if y != hs - 1 {
                mesh.indices.extend([b, c, d]);
            }
        }
    }
    mesh
}

/// Axis-aligned box centered at the origin, four vertices per face.
pub fn cuboid(width: f32, height: f32, depth: f32) -> MeshData {
    let (x, y, z) = (width * 0.5, height * 0.5, depth * 0.5);
    // (normal, right, up) for each face; right × up = normal
    let faces: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
        ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ([0.0, 0.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ([1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),
        ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
        ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]),
        ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
    ];
    let half = [x, y, z];
    let scale = |v: [f32; 3]| [v[0] * half[0], v[1] * half[1], v[2] * half[2]];

    let mut mesh = MeshData::default();
    for (normal, right, up) in faces {
        let base = mesh.vertices.len() as u32;
        for (sr, su) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
            let p = [
                normal[0] + right[0] * sr + up[0] * su,
                normal[1] + right[1] * sr + up[1] * su,
                normal[2] + right[2] * sr + up[2] * su,
            ];
            mesh.vertices.push(Vertex {
                position: scale(p),
                normal,
            });
        }
        mesh.indices
            .extend([base, base + 1, base + 2, base + 2, base + 3, base]);
    }
    mesh
}

/// Torus around the z axis.
pub fn torus(radius: f32, tube: f32, radial_segments: u32, tubular_segments: u32) -> MeshData {
    let rs = radial_segments.max(3);
    let ts = tubular_segments.max(3);
    let mut mesh = MeshData::default();

    for j in 0..=rs {
        let v = j as f32 / rs as f32 * TAU;
        for i in 0..=ts {
            let u = i as f32 / ts as f32 * TAU;
            let position = [
                (radius + tube * v.cos()) * u.cos(),
                (radius + tube * v.cos()) * u.sin(),
                tube * v.sin(),
            ];
            let center = [radius * u.cos(), radius * u.sin(), 0.0];
            let d = [
                position[0] - center[0],
                position[1] - center[1],
                position[2] - center[2],
            ];
            let len = (d[0] * d[0] + d[1] * d[1] + d[2] * d[2]).sqrt().max(f32::EPSILON);
            mesh.vertices.push(Vertex {
                position,
                normal: [d[0] / len, d[1] / len, d[2] / len],
            });
        }
    }

    let row = ts + 1;
    for j in 1..=rs {
        for i in 1..=ts {
            let a = row * j + i - 1;
            let b = row * (j - 1) + i - 1;
            let c = row * (j - 1) + i;
            let d = row * j + i;
            mesh.indices.extend([a, b, d, b, c, d]);
        }
    }
    mesh
}

/// Single quad in the xy plane facing +z.
pub fn plane(width: f32, height: f32) -> MeshData {
    let (x, y) = (width * 0.5, height * 0.5);
    let normal = [0.0, 0.0, 1.0];
    MeshData {
        vertices: vec![
            Vertex { position: [-x, -y, 0.0], normal },
            Vertex { position: [x, -y, 0.0], normal },
            Vertex { position: [x, y, 0.0], normal },
            Vertex { position: [-x, y, 0.0], normal },
        ],
        indices: vec![0, 1, 2, 2, 3, 0],
    }
}
