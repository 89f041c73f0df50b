//! Asset loading/parsers (meshes, textures, scene manifest).
//! OBJ files are read either by the hand-rolled parser in [`obj`] or through
//! the multi-object importer in [`import`]; both yield indexed [`mesh::MeshData`].

pub mod import;
pub mod indexer;
pub mod mesh;
pub mod obj;
pub mod scene;
pub mod texture;
