//! Minimal OBJ parser supporting positions, normals and texture coordinates.
//!
//! Vertices are deduplicated on the fly by their (position, uv, normal) index
//! triple, so the output is already an indexed mesh.

use std::{
    collections::HashMap,
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
};

use anyhow::{Context, Result, anyhow};

use crate::mesh::{MeshData, MeshVertex};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ObjOptions {
    /// Store texture V as `1 - v` (for images whose first row is the bottom).
    pub flip_v: bool,
}

/// Load an OBJ mesh from a file path.
pub fn load_obj_from_path(path: impl AsRef<Path>, options: &ObjOptions) -> Result<MeshData> {
    let path = path.as_ref();
    log::info!("Loading OBJ file {}", path.display());
    let file = File::open(path)
        .with_context(|| format!("Failed to open OBJ file: {}", path.display()))?;
    let mesh = load_obj_from_reader(BufReader::new(file), options)
        .with_context(|| format!("Failed to parse OBJ file: {}", path.display()))?;
    log::debug!(
        "{}: {} vertices, {} triangles, bounds {:?}",
        path.display(),
        mesh.vertices.len(),
        mesh.triangle_count(),
        mesh.bounds()
    );
    Ok(mesh)
}

/// Load an OBJ mesh from a [`BufRead`] implementation.
pub fn load_obj_from_reader<R: BufRead>(reader: R, options: &ObjOptions) -> Result<MeshData> {
    parse_obj(reader, options)
}

/// Convenience helper to parse an OBJ string literal.
pub fn load_obj_from_str(contents: &str) -> Result<MeshData> {
    parse_obj(io::Cursor::new(contents), &ObjOptions::default())
}

fn parse_obj<R: BufRead>(reader: R, options: &ObjOptions) -> Result<MeshData> {
    let mut positions: Vec<[f32; 3]> = Vec::new();
    let mut normals: Vec<[f32; 3]> = Vec::new();
    let mut texcoords: Vec<[f32; 2]> = Vec::new();

    #[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
    struct Key(usize, Option<usize>, Option<usize>);

    let mut unique: HashMap<Key, u32> = HashMap::new();
    let mut vertices: Vec<MeshVertex> = Vec::new();
    let mut indices: Vec<u32> = Vec::new();
    let mut face_indices: Vec<u32> = Vec::new();

    for (line_no, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read line {}", line_no + 1))?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let mut parts = trimmed.split_whitespace();
        let tag = parts
            .next()
            .ok_or_else(|| anyhow!("Malformed OBJ line {}: '{}'", line_no + 1, trimmed))?;

        match tag {
            "v" => {
                let x = parse_f32(parts.next(), line_no, "x coordinate")?;
                let y = parse_f32(parts.next(), line_no, "y coordinate")?;
                let z = parse_f32(parts.next(), line_no, "z coordinate")?;
                positions.push([x, y, z]);
            }
            "vt" => {
                let u = parse_f32(parts.next(), line_no, "u coordinate")?;
                // V is optional in `vt` records.
                let v = parts
                    .next()
                    .map_or(Ok(0.0), |t| parse_f32(Some(t), line_no, "v coordinate"))?;
                let v = if options.flip_v { 1.0 - v } else { v };
                texcoords.push([u, v]);
            }
            "vn" => {
                let nx = parse_f32(parts.next(), line_no, "nx coordinate")?;
                let ny = parse_f32(parts.next(), line_no, "ny coordinate")?;
                let nz = parse_f32(parts.next(), line_no, "nz coordinate")?;
                normals.push([nx, ny, nz]);
            }
            "f" => {
                face_indices.clear();
                for part in parts {
                    let (vi, vti, vni) = parse_face_vertex(
                        part,
                        positions.len(),
                        texcoords.len(),
                        normals.len(),
                        line_no,
                    )?;
                    let key = Key(vi, vti, vni);
                    let index = match unique.get(&key) {
                        Some(&idx) => idx,
                        None => {
                            let position = positions[vi];
                            let uv = vti.map_or([0.0, 0.0], |i| texcoords[i]);
                            let normal = vni.map_or([0.0, 0.0, 1.0], |i| normals[i]);

                            let idx = u32::try_from(vertices.len())
                                .map_err(|_| anyhow!("Too many vertices in OBJ (>{})", u32::MAX))?;
                            vertices.push(MeshVertex::new(position, normal, uv));
                            unique.insert(key, idx);
                            idx
                        }
                    };
                    face_indices.push(index);
                }

                if face_indices.len() < 3 {
                    log::warn!(
                        "Skipping degenerate face with {} vertices on line {}",
                        face_indices.len(),
                        line_no + 1
                    );
                    continue;
                }
                // Triangulate fan
                for tri in 1..(face_indices.len() - 1) {
                    indices.push(face_indices[0]);
                    indices.push(face_indices[tri]);
                    indices.push(face_indices[tri + 1]);
                }
            }
            _ => {
                // o/g/s/usemtl/mtllib carry nothing we render
            }
        }
    }

    if vertices.is_empty() || indices.is_empty() {
        anyhow::bail!("OBJ contained no triangles");
    }

    Ok(MeshData::new(vertices, indices))
}

fn parse_f32(value: Option<&str>, line_no: usize, what: &str) -> Result<f32> {
    let token = value.ok_or_else(|| anyhow!("Missing {} on line {}", what, line_no + 1))?;
    token
        .parse::<f32>()
        .with_context(|| format!("Failed to parse {} on line {}", what, line_no + 1))
}

fn parse_face_vertex(
    token: &str,
    pos_count: usize,
    tex_count: usize,
    norm_count: usize,
    line_no: usize,
) -> Result<(usize, Option<usize>, Option<usize>)> {
    let mut split = token.split('/');
    let pos = split
        .next()
        .ok_or_else(|| anyhow!("Malformed face element '{}' on line {}", token, line_no + 1))?;
    let pos_idx = resolve_index(pos, pos_count, line_no)?;

    let tex_idx = match split.next() {
        Some(value) if !value.is_empty() => Some(resolve_index(value, tex_count, line_no)?),
        _ => None,
    };

    let norm_idx = match split.next() {
        Some(value) if !value.is_empty() => Some(resolve_index(value, norm_count, line_no)?),
        _ => None,
    };

    Ok((pos_idx, tex_idx, norm_idx))
}

fn resolve_index(token: &str, len: usize, line_no: usize) -> Result<usize> {
    let raw = token
        .parse::<i64>()
        .with_context(|| format!("Invalid index '{}' on line {}", token, line_no + 1))?;
    if raw == 0 {
        anyhow::bail!("OBJ indices are 1-based; found 0 on line {}", line_no + 1);
    }

    let idx = if raw > 0 { raw - 1 } else { len as i64 + raw };

    if idx < 0 || idx as usize >= len {
        anyhow::bail!(
            "OBJ index {} resolved out of bounds (len={}) on line {}",
            raw,
            len,
            line_no + 1
        );
    }

    Ok(idx as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_triangle() {
        let src = r#"
            v 0.0 0.0 0.0
            v 1.0 0.0 0.0
            v 0.0 1.0 0.0
            vn 0.0 0.0 1.0
            vt 0.0 0.0
            vt 1.0 0.0
            vt 0.0 1.0
            f 1/1/1 2/2/1 3/3/1
        "#;
        let mesh = load_obj_from_str(src).expect("parse triangle");
        assert_eq!(mesh.vertices.len(), 3);
        assert_eq!(mesh.indices.len(), 3);
        assert!(mesh.is_valid());
    }

    #[test]
    fn shared_corners_are_deduplicated() {
        // Quad written as two triangles sharing an edge.
        let src = "
            v 0 0 0
            v 1 0 0
            v 1 1 0
            v 0 1 0
            vt 0 0
            vt 1 0
            vt 1 1
            vt 0 1
            vn 0 0 1
            f 1/1/1 2/2/1 3/3/1
            f 1/1/1 3/3/1 4/4/1
        ";
        let mesh = load_obj_from_str(src).expect("parse quad");
        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.indices, vec![0, 1, 2, 0, 2, 3]);
        mesh.validate().expect("valid index buffer");
    }

    #[test]
    fn polygons_are_fan_triangulated_with_relative_indices() {
        let src = "
            v 0 0 0
            v 1 0 0
            v 1 1 0
            v 0 1 0
            v -1 1 0
            f -5 -4 -3 -2 -1
        ";
        let mesh = load_obj_from_str(src).expect("parse pentagon");
        assert_eq!(mesh.triangle_count(), 3);
        assert_eq!(mesh.indices, vec![0, 1, 2, 0, 2, 3, 0, 3, 4]);
        // No normals in the file: default to +Z.
        assert!(mesh.vertices.iter().all(|v| v.normal == [0.0, 0.0, 1.0]));
    }

    #[test]
    fn same_position_different_uv_stays_distinct() {
        let src = "
            v 0 0 0
            v 1 0 0
            v 0 1 0
            vt 0 0
            vt 0.5 0.5
            f 1/1 2/1 3/1
            f 1/2 3/1 2/1
        ";
        let mesh = load_obj_from_str(src).expect("parse");
        assert_eq!(mesh.vertices.len(), 4);
    }

    #[test]
    fn flip_v_mirrors_texture_rows() {
        let src = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0.25 0.2\nf 1/1 2/1 3/1\n";
        let options = ObjOptions { flip_v: true };
        let mesh = load_obj_from_reader(io::Cursor::new(src), &options).expect("parse");
        let uv = mesh.vertices[0].uv;
        assert_eq!(uv[0], 0.25);
        assert!((uv[1] - 0.8).abs() < 1e-6);
    }

    #[test]
    fn texture_v_defaults_to_zero() {
        let src = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0.5\nf 1/1 2/1 3/1\n";
        let mesh = load_obj_from_str(src).expect("parse u-only texcoord");
        assert_eq!(mesh.vertices.len(), 3);
        assert_eq!(mesh.vertices[0].uv, [0.5, 0.0]);

        let options = ObjOptions { flip_v: true };
        let mesh = load_obj_from_reader(io::Cursor::new(src), &options).expect("parse");
        assert_eq!(mesh.vertices[0].uv, [0.5, 1.0]);
    }

    #[test]
    fn reports_line_of_bad_records() {
        let err = load_obj_from_str("v 0 0 0\nv 1 0 oops\n").unwrap_err();
        assert!(format!("{err:#}").contains("line 2"), "{err:#}");

        let err = load_obj_from_str("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 0\n").unwrap_err();
        assert!(err.to_string().contains("1-based"), "{err}");

        let err = load_obj_from_str("v 0 0 0\nf 1 2 3\n").unwrap_err();
        assert!(err.to_string().contains("out of bounds"), "{err}");
    }

    #[test]
    fn rejects_files_without_faces() {
        let err = load_obj_from_str("# only a comment\nv 0 0 0\n").unwrap_err();
        assert!(err.to_string().contains("no triangles"));
    }
}
