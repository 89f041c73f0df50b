//! Multi-mesh importer built on `tobj`.
//!
//! Every object/group in the file becomes one [`ImportedMesh`], in file order.
//! Polygons are triangulated and identical vertices joined.

use std::path::Path;

use anyhow::{Context, Result, bail};

use crate::{
    indexer,
    mesh::{MeshData, MeshVertex},
};

#[derive(Clone, Debug, PartialEq)]
pub struct ImportedMesh {
    pub name: String,
    pub mesh: MeshData,
}

/// Import all meshes from a model file.
pub fn import_meshes(path: impl AsRef<Path>) -> Result<Vec<ImportedMesh>> {
    let path = path.as_ref();
    log::info!("Importing meshes from {}", path.display());

    let options = tobj::LoadOptions {
        triangulate: true,
        single_index: true,
        ignore_points: true,
        ignore_lines: true,
        ..Default::default()
    };
    let (models, materials) = tobj::load_obj(path, &options)
        .with_context(|| format!("Failed to import model: {}", path.display()))?;
    if let Err(err) = materials {
        log::debug!("{}: materials not loaded ({})", path.display(), err);
    }

    let mut meshes = Vec::with_capacity(models.len());
    for model in models {
        match convert(&model.mesh) {
            Some(mesh) => {
                log::debug!(
                    "Mesh #{} '{}': {} vertices, {} triangles, bounds {:?}",
                    meshes.len(),
                    model.name,
                    mesh.vertices.len(),
                    mesh.triangle_count(),
                    mesh.bounds()
                );
                meshes.push(ImportedMesh {
                    name: model.name,
                    mesh,
                });
            }
            None => log::warn!("Skipping mesh '{}' without triangles", model.name),
        }
    }

    if meshes.is_empty() {
        bail!("{} contained no meshes", path.display());
    }
    Ok(meshes)
}

fn convert(src: &tobj::Mesh) -> Option<MeshData> {
    let vertex_count = src.positions.len() / 3;
    if vertex_count == 0 || src.indices.len() < 3 {
        return None;
    }
    let has_normals = src.normals.len() == vertex_count * 3;
    let has_uvs = src.texcoords.len() == vertex_count * 2;

    let vertices: Vec<MeshVertex> = (0..vertex_count)
        .map(|i| {
            let position = [
                src.positions[i * 3],
                src.positions[i * 3 + 1],
                src.positions[i * 3 + 2],
            ];
            let normal = if has_normals {
                [src.normals[i * 3], src.normals[i * 3 + 1], src.normals[i * 3 + 2]]
            } else {
                [0.0, 0.0, 1.0]
            };
            let uv = if has_uvs {
                [src.texcoords[i * 2], src.texcoords[i * 2 + 1]]
            } else {
                [0.0, 0.0]
            };
            MeshVertex::new(position, normal, uv)
        })
        .collect();

    let mut mesh = MeshData::new(vertices, src.indices.clone());
    mesh.indices.truncate(mesh.indices.len() - mesh.indices.len() % 3);
    if !has_normals {
        mesh.recompute_normals();
    }
    let mesh = indexer::reindex(&mesh);
    mesh.is_valid().then_some(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tobj_mesh(positions: Vec<f32>, indices: Vec<u32>) -> tobj::Mesh {
        tobj::Mesh {
            positions,
            indices,
            ..Default::default()
        }
    }

    #[test]
    fn missing_normals_are_computed() {
        let src = tobj_mesh(
            vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
            vec![0, 1, 2],
        );
        let mesh = convert(&src).expect("triangle");
        assert_eq!(mesh.vertices.len(), 3);
        assert!(mesh.vertices.iter().all(|v| v.normal == [0.0, 0.0, 1.0]));
        assert!(mesh.vertices.iter().all(|v| v.uv == [0.0, 0.0]));
    }

    #[test]
    fn empty_mesh_is_skipped() {
        assert!(convert(&tobj_mesh(Vec::new(), Vec::new())).is_none());
    }
}
