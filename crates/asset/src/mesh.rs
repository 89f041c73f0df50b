//! CPU-side mesh representation used by loaders.

use anyhow::{Result, bail};

/// Vertex with position/normal/uv. Values are in object space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl MeshVertex {
    pub fn new(position: [f32; 3], normal: [f32; 3], uv: [f32; 2]) -> Self {
        Self {
            position,
            normal,
            uv,
        }
    }
}

/// Indexed triangle mesh with tightly-packed vertices.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn new(vertices: Vec<MeshVertex>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    /// Returns `true` if both vertex and index buffers are non-empty.
    pub fn is_valid(&self) -> bool {
        !self.vertices.is_empty() && !self.indices.is_empty()
    }

    /// Check that the index buffer is a triangle list referencing existing vertices.
    pub fn validate(&self) -> Result<()> {
        if !self.is_valid() {
            bail!("Mesh has no geometry");
        }
        if self.indices.len() % 3 != 0 {
            bail!(
                "Index count {} is not a multiple of three",
                self.indices.len()
            );
        }
        let count = self.vertices.len();
        if let Some(bad) = self.indices.iter().find(|&&i| i as usize >= count) {
            bail!("Index {} out of range for {} vertices", bad, count);
        }
        Ok(())
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// `true` when every index fits a 16-bit index buffer.
    pub fn index_format_fits_u16(&self) -> bool {
        self.vertices.len() <= u16::MAX as usize + 1
    }

    /// Axis-aligned bounds as (min, max).
    pub fn bounds(&self) -> Option<([f32; 3], [f32; 3])> {
        let first = self.vertices.first()?.position;
        let bounds = self
            .vertices
            .iter()
            .skip(1)
            .fold((first, first), |(mut lo, mut hi), v| {
                for axis in 0..3 {
                    lo[axis] = lo[axis].min(v.position[axis]);
                    hi[axis] = hi[axis].max(v.position[axis]);
                }
                (lo, hi)
            });
        Some(bounds)
    }

    /// Replace all normals with area-weighted face normals.
    pub fn recompute_normals(&mut self) {
        let mut acc = vec![[0.0f32; 3]; self.vertices.len()];
        for tri in self.indices.chunks_exact(3) {
            let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
            if a >= acc.len() || b >= acc.len() || c >= acc.len() {
                continue;
            }
            let (pa, pb, pc) = (
                self.vertices[a].position,
                self.vertices[b].position,
                self.vertices[c].position,
            );
            let e1 = sub(pb, pa);
            let e2 = sub(pc, pa);
            let n = cross(e1, e2);
            for idx in [a, b, c] {
                for axis in 0..3 {
                    acc[idx][axis] += n[axis];
                }
            }
        }
        for (vertex, n) in self.vertices.iter_mut().zip(acc) {
            let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
            vertex.normal = if len > f32::EPSILON {
                [n[0] / len, n[1] / len, n[2] / len]
            } else {
                [0.0, 0.0, 1.0]
            };
        }
    }
}

fn sub(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

fn cross(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad() -> MeshData {
        let v = |x: f32, y: f32| MeshVertex::new([x, y, 0.0], [0.0; 3], [x, y]);
        MeshData::new(
            vec![v(0.0, 0.0), v(1.0, 0.0), v(1.0, 1.0), v(0.0, 1.0)],
            vec![0, 1, 2, 0, 2, 3],
        )
    }

    #[test]
    fn mesh_data_validity() {
        let data = MeshData::new(vec![MeshVertex::default()], vec![0]);
        assert!(data.is_valid());
        assert!(data.validate().is_err(), "single index is not a triangle list");
        assert!(quad().validate().is_ok());
    }

    #[test]
    fn validate_rejects_dangling_index() {
        let mut mesh = quad();
        mesh.indices[5] = 4;
        let err = mesh.validate().unwrap_err().to_string();
        assert!(err.contains("out of range"), "{err}");
    }

    #[test]
    fn normals_point_out_of_ccw_faces() {
        let mut mesh = quad();
        mesh.recompute_normals();
        for v in &mesh.vertices {
            assert_eq!(v.normal, [0.0, 0.0, 1.0]);
        }
        assert_eq!(mesh.bounds(), Some(([0.0, 0.0, 0.0], [1.0, 1.0, 0.0])));
        assert_eq!(mesh.triangle_count(), 2);
    }

    #[test]
    fn u16_indices_cover_exactly_65536_vertices() {
        let mut mesh = MeshData::new(vec![MeshVertex::default(); 65536], vec![0, 1, 65535]);
        assert!(mesh.index_format_fits_u16());
        assert_eq!(mesh.indices[2] as u16, u16::MAX);

        mesh.vertices.push(MeshVertex::default());
        mesh.indices.push(65536);
        assert!(!mesh.index_format_fits_u16());
    }
}
