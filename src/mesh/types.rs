use bytemuck::{Pod, Zeroable};
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

pub type Pt3 = Point3<f32>;
pub type Vec3 = Vector3<f32>;

/// One isoline piece, both endpoints already in world space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Pt3,
    pub end: Pt3,
}

impl Segment {
    pub fn new(start: Pt3, end: Pt3) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f32 {
        (self.end - self.start).magnitude()
    }
}

/// Vertex layout used by [`ContourMesh::to_bytes`]: little-endian `f32` bit patterns.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
struct PackedPosition {
    position: [u32; 3],
}

/// Triangle mesh output: vertex positions plus a stride-3 index list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContourMesh {
    pub vertices: Vec<Pt3>,
    pub indices: Vec<u32>,
}

impl ContourMesh {
    pub fn new(vertices: Vec<Pt3>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Iterate triangles as vertex position triples.
    pub fn triangles(&self) -> impl Iterator<Item = [Pt3; 3]> + '_ {
        self.indices.chunks_exact(3).map(move |tri| {
            [
                self.vertices[tri[0] as usize],
                self.vertices[tri[1] as usize],
                self.vertices[tri[2] as usize],
            ]
        })
    }

    /// Total unsigned surface area of all triangles.
    pub fn area(&self) -> f32 {
        self.triangles()
            .map(|[a, b, c]| (b - a).cross(&(c - a)).magnitude() * 0.5)
            .sum()
    }

    /// Compute per-vertex normals from the triangle list.
    /// Face normals are accumulated unnormalized, so larger faces weigh more.
    pub fn compute_normals(&self) -> Vec<Vec3> {
        let mut normals = vec![Vec3::zeros(); self.vertices.len()];

        for tri in self.indices.chunks_exact(3) {
            let i0 = tri[0] as usize;
            let i1 = tri[1] as usize;
            let i2 = tri[2] as usize;

            let edge1 = self.vertices[i1] - self.vertices[i0];
            let edge2 = self.vertices[i2] - self.vertices[i0];
            let normal = edge1.cross(&edge2);

            for &idx in &[i0, i1, i2] {
                normals[idx] += normal;
            }
        }

        for normal in &mut normals {
            let len = normal.magnitude();
            if len > 0.0001 {
                *normal /= len;
            }
        }

        normals
    }

    /// Serialize into one byte buffer for upload:
    /// `[vertex_bytes: u32][index_bytes: u32][positions as f32 x3][indices as u32]`,
    /// all little-endian.
    pub fn to_bytes(&self) -> Vec<u8> {
        let packed: Vec<PackedPosition> = self
            .vertices
            .iter()
            .map(|p| PackedPosition {
                position: [p.x, p.y, p.z].map(|c| c.to_bits().to_le()),
            })
            .collect();
        let indices: Vec<u32> = self.indices.iter().map(|i| i.to_le()).collect();

        let vertex_data: &[u8] = bytemuck::cast_slice(&packed);
        let index_data: &[u8] = bytemuck::cast_slice(&indices);

        let mut bytes = Vec::with_capacity(8 + vertex_data.len() + index_data.len());
        bytes.extend_from_slice(&(vertex_data.len() as u32).to_le_bytes());
        bytes.extend_from_slice(&(index_data.len() as u32).to_le_bytes());
        bytes.extend_from_slice(vertex_data);
        bytes.extend_from_slice(index_data);

        bytes
    }
}

/// Quad mesh output of dual contouring: one vertex per cell, quads index into it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuadMesh {
    pub vertices: Vec<Pt3>,
    pub quads: Vec<[u32; 4]>,
}

impl QuadMesh {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn quad_count(&self) -> usize {
        self.quads.len()
    }

    /// Flat quad index list (stride 4).
    pub fn indices(&self) -> Vec<u32> {
        self.quads.iter().flatten().copied().collect()
    }

    /// Normal of a quad from its first three corners (unnormalized winding test).
    pub fn quad_normal(&self, quad: &[u32; 4]) -> Vec3 {
        let v0 = self.vertices[quad[0] as usize];
        let v1 = self.vertices[quad[1] as usize];
        let v2 = self.vertices[quad[2] as usize];
        let v3 = self.vertices[quad[3] as usize];
        // Sum of both fan triangles keeps bent quads well defined.
        (v1 - v0).cross(&(v2 - v0)) + (v2 - v0).cross(&(v3 - v0))
    }

    /// Split every quad into two triangles along its shorter diagonal.
    /// Vertices are shared, winding is preserved.
    pub fn triangulate(&self) -> ContourMesh {
        let mut indices = Vec::with_capacity(self.quads.len() * 6);

        for &[a, b, c, d] in &self.quads {
            let diag_ac = distance(&self.vertices[a as usize], &self.vertices[c as usize]);
            let diag_bd = distance(&self.vertices[b as usize], &self.vertices[d as usize]);

            if diag_ac <= diag_bd {
                indices.extend_from_slice(&[a, b, c, a, c, d]);
            } else {
                indices.extend_from_slice(&[a, b, d, b, c, d]);
            }
        }

        ContourMesh::new(self.vertices.clone(), indices)
    }
}

fn distance(a: &Pt3, b: &Pt3) -> f32 {
    (a - b).magnitude()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_square() -> ContourMesh {
        ContourMesh::new(
            vec![
                Pt3::new(0.0, 0.0, 0.0),
                Pt3::new(1.0, 0.0, 0.0),
                Pt3::new(1.0, 1.0, 0.0),
                Pt3::new(0.0, 1.0, 0.0),
            ],
            vec![0, 1, 2, 0, 2, 3],
        )
    }

    #[test]
    fn test_area_and_counts() {
        let mesh = unit_square();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.triangle_count(), 2);
        assert_relative_eq!(mesh.area(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_compute_normals() {
        let normals = unit_square().compute_normals();
        for n in normals {
            assert_relative_eq!(n.z, 1.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_to_bytes_layout() {
        let mesh = unit_square();
        let bytes = mesh.to_bytes();
        let vertex_len = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        let index_len = u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
        assert_eq!(vertex_len, 4 * 3 * 4);
        assert_eq!(index_len, 6 * 4);
        assert_eq!(bytes.len(), 8 + 48 + 24);

        let word = |at: usize| [bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]];
        let le_f32 = |at: usize| f32::from_le_bytes(word(at));
        let le_u32 = |at: usize| u32::from_le_bytes(word(at));
        // Second vertex is (1, 0, 0).
        assert_eq!(le_f32(8 + 12), 1.0);
        assert_eq!(le_f32(8 + 16), 0.0);
        for (i, &index) in mesh.indices.iter().enumerate() {
            assert_eq!(le_u32(8 + 48 + 4 * i), index);
        }
    }

    #[test]
    fn test_triangulate_picks_short_diagonal() {
        // Kite: a-c diagonal is long, b-d short.
        let quads = QuadMesh {
            vertices: vec![
                Pt3::new(0.0, 0.0, 0.0),
                Pt3::new(1.0, -0.2, 0.0),
                Pt3::new(2.0, 0.0, 0.0),
                Pt3::new(1.0, 0.2, 0.0),
            ],
            quads: vec![[0, 1, 2, 3]],
        };
        let mesh = quads.triangulate();
        assert_eq!(mesh.indices, vec![0, 1, 3, 1, 2, 3]);
        assert_eq!(quads.indices(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_segment_length() {
        let seg = Segment::new(Pt3::new(0.0, 0.0, 0.0), Pt3::new(3.0, 4.0, 0.0));
        assert_relative_eq!(seg.length(), 5.0);
    }
}
