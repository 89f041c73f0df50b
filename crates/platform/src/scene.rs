//! Turns decoded assets into GPU resources and world entities.

use anyhow::Result;
use asset::{mesh::MeshData, scene::LoadedScene, texture::TextureData};
use corelib::{
    chess,
    ecs::{MeshId, Renderable, TextureId, World},
};
use renderer::GpuState;

/// Destination for uploads; the GPU in the app, a recorder in tests.
pub trait Uploader {
    fn upload_mesh(&mut self, label: &str, mesh: &MeshData) -> Result<MeshId>;
    fn upload_texture(&mut self, label: &str, texture: &TextureData) -> Result<TextureId>;
}

impl Uploader for GpuState {
    fn upload_mesh(&mut self, label: &str, mesh: &MeshData) -> Result<MeshId> {
        GpuState::upload_mesh(self, label, mesh)
    }

    fn upload_texture(&mut self, label: &str, texture: &TextureData) -> Result<TextureId> {
        GpuState::upload_texture(self, label, texture)
    }
}

/// Upload every mesh/texture once and spawn the board plus all placed pieces.
pub fn build_world(scene: &LoadedScene, gpu: &mut impl Uploader) -> Result<World> {
    let mut world = World::new();

    let board = Renderable {
        mesh: gpu.upload_mesh("Board", &scene.board)?,
        texture: gpu.upload_texture("Board", &scene.board_texture)?,
    };
    world.spawn(chess::board_transform(), Some(board));

    let mut pieces = Vec::with_capacity(scene.pieces.len());
    for (imported, texture) in scene.pieces.iter().zip(&scene.piece_textures) {
        pieces.push(Renderable {
            mesh: gpu.upload_mesh(&imported.name, &imported.mesh)?,
            texture: gpu.upload_texture(&imported.name, texture)?,
        });
    }

    let mut missing = 0usize;
    for placement in chess::layout() {
        match pieces.get(placement.piece.mesh_index()) {
            Some(renderable) => {
                world.spawn(placement.transform, Some(*renderable));
            }
            None => missing += 1,
        }
    }
    if missing > 0 {
        log::warn!(
            "{} placements skipped: pieces model only has {} meshes",
            missing,
            pieces.len()
        );
    }

    log::info!("Scene ready: {} objects", world.len());
    Ok(world)
}
