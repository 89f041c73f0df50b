//! Indexed-vertex deduplication for triangle soups.

use std::collections::HashMap;

use crate::mesh::{MeshData, MeshVertex};

/// Bit pattern of every attribute; equal keys mean identical vertices.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
struct VertexKey([u32; 8]);

impl From<&MeshVertex> for VertexKey {
    fn from(v: &MeshVertex) -> Self {
        let [px, py, pz] = v.position;
        let [nx, ny, nz] = v.normal;
        let [u, w] = v.uv;
        // -0.0 and 0.0 must collapse to one vertex.
        let bits = |f: f32| (f + 0.0).to_bits();
        VertexKey([
            bits(px),
            bits(py),
            bits(pz),
            bits(nx),
            bits(ny),
            bits(nz),
            bits(u),
            bits(w),
        ])
    }
}

/// Collapse a non-indexed triangle list into unique vertices plus indices.
///
/// Vertices keep the order of their first appearance.
pub fn index_vertices(soup: &[MeshVertex]) -> MeshData {
    let mut lookup: HashMap<VertexKey, u32> = HashMap::with_capacity(soup.len());
    let mut vertices = Vec::new();
    let mut indices = Vec::with_capacity(soup.len());

    for vertex in soup {
        let index = *lookup.entry(VertexKey::from(vertex)).or_insert_with(|| {
            vertices.push(*vertex);
            (vertices.len() - 1) as u32
        });
        indices.push(index);
    }

    MeshData::new(vertices, indices)
}

/// Re-index an existing mesh, merging vertices that turned out identical.
pub fn reindex(mesh: &MeshData) -> MeshData {
    let soup: Vec<MeshVertex> = mesh
        .indices
        .iter()
        .filter_map(|&i| mesh.vertices.get(i as usize).copied())
        .collect();
    index_vertices(&soup)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(p: [f32; 3], uv: [f32; 2]) -> MeshVertex {
        MeshVertex::new(p, [0.0, 1.0, 0.0], uv)
    }

    #[test]
    fn collapses_repeated_corners() {
        let a = v([0.0, 0.0, 0.0], [0.0, 0.0]);
        let b = v([1.0, 0.0, 0.0], [1.0, 0.0]);
        let c = v([1.0, 0.0, 1.0], [1.0, 1.0]);
        let d = v([0.0, 0.0, 1.0], [0.0, 1.0]);
        let mesh = index_vertices(&[a, b, c, a, c, d]);
        assert_eq!(mesh.vertices, vec![a, b, c, d]);
        assert_eq!(mesh.indices, vec![0, 1, 2, 0, 2, 3]);
    }

    #[test]
    fn attribute_difference_keeps_vertices_apart() {
        let a = v([0.0, 0.0, 0.0], [0.0, 0.0]);
        let seam = v([0.0, 0.0, 0.0], [1.0, 0.0]);
        let mesh = index_vertices(&[a, seam, a]);
        assert_eq!(mesh.vertices.len(), 2);
        assert_eq!(mesh.indices, vec![0, 1, 0]);
    }

    #[test]
    fn negative_zero_matches_positive_zero() {
        let a = v([0.0, 0.0, 0.0], [0.0, 0.0]);
        let b = v([-0.0, 0.0, 0.0], [0.0, -0.0]);
        assert_eq!(index_vertices(&[a, b]).vertices.len(), 1);
    }

    #[test]
    fn reindex_merges_duplicated_vertices() {
        let a = v([0.0, 0.0, 0.0], [0.0, 0.0]);
        let b = v([1.0, 0.0, 0.0], [1.0, 0.0]);
        let c = v([0.0, 0.0, 1.0], [0.0, 1.0]);
        let mesh = MeshData::new(vec![a, b, c, a], vec![0, 1, 2, 3, 2, 1]);
        let merged = reindex(&mesh);
        assert_eq!(merged.vertices.len(), 3);
        assert_eq!(merged.indices, vec![0, 1, 2, 0, 2, 1]);
    }
}
