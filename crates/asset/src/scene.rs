//! Asset manifest for the chess scene and a loader that resolves it.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::{
    import::{self, ImportedMesh},
    mesh::MeshData,
    obj::{self, ObjOptions},
    texture::{TextureData, TextureLoad},
};

/// Piece textures in the mesh order of the pieces model.
pub const PIECE_TEXTURES: [&str; 12] = [
    "Chess/woodlig3.bmp",
    "Chess/wooddar3.bmp",
    "Chess/woodlig2.bmp",
    "Chess/wooddar2.bmp",
    "Chess/woodlig0.bmp",
    "Chess/wooddar0.bmp",
    "Chess/woodlig5.bmp",
    "Chess/wooddar5.bmp",
    "Chess/woodlig4.bmp",
    "Chess/wooddar4.bmp",
    "Chess/woodlig1.bmp",
    "Chess/wooddar1.bmp",
];

pub const BOARD_MODEL: &str = "Stone_Chess_Board/12951_Stone_Chess_Board_v1_L3.obj";
pub const BOARD_TEXTURE: &str = "Stone_Chess_Board/12951_Stone_Chess_Board_diff.bmp";
pub const PIECES_MODEL: &str = "Chess/chess.obj";

/// Size of the checkerboard substituted for textures that fail to load.
const FALLBACK_TEXTURE_SIZE: u32 = 64;

// Decoded image rows run top-down while OBJ texture V runs bottom-up.
const TEXTURE_LOAD: TextureLoad = TextureLoad { flip_y: true };

/// File locations for every asset the scene needs.
#[derive(Clone, Debug, PartialEq)]
pub struct ChessAssets {
    pub board_model: PathBuf,
    pub board_texture: PathBuf,
    pub pieces_model: PathBuf,
    pub piece_textures: Vec<PathBuf>,
}

/// Everything decoded and ready for GPU upload.
#[derive(Clone, Debug)]
pub struct LoadedScene {
    pub board: MeshData,
    pub board_texture: TextureData,
    pub pieces: Vec<ImportedMesh>,
    /// One texture per entry in `pieces`.
    pub piece_textures: Vec<TextureData>,
}

impl ChessAssets {
    /// The stock asset layout below `root`.
    pub fn standard(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            board_model: root.join(BOARD_MODEL),
            board_texture: root.join(BOARD_TEXTURE),
            pieces_model: root.join(PIECES_MODEL),
            piece_textures: PIECE_TEXTURES.iter().map(|p| root.join(p)).collect(),
        }
    }

    /// Load meshes and textures. Missing meshes are fatal, missing textures
    /// fall back to a checkerboard.
    pub fn load(&self) -> Result<LoadedScene> {
        let board = obj::load_obj_from_path(&self.board_model, &ObjOptions::default())
            .context("Failed to load board model")?;
        board.validate().context("Board mesh is invalid")?;
        let board_texture = load_or_fallback(&self.board_texture);

        let pieces = import::import_meshes(&self.pieces_model).context("Failed to load pieces")?;
        for piece in &pieces {
            piece
                .mesh
                .validate()
                .with_context(|| format!("Piece mesh '{}' is invalid", piece.name))?;
        }
        if pieces.len() != self.piece_textures.len() {
            log::warn!(
                "Pieces model has {} meshes but {} textures are listed",
                pieces.len(),
                self.piece_textures.len()
            );
        }

        let piece_textures = (0..pieces.len())
            .map(|i| match self.piece_textures.get(i) {
                Some(path) => load_or_fallback(path),
                None => {
                    log::warn!("No texture file defined for mesh {}", i);
                    TextureData::create_test_texture(FALLBACK_TEXTURE_SIZE)
                }
            })
            .collect();

        Ok(LoadedScene {
            board,
            board_texture,
            pieces,
            piece_textures,
        })
    }
}

fn load_or_fallback(path: &Path) -> TextureData {
    TextureData::load(path, TEXTURE_LOAD).unwrap_or_else(|err| {
        log::warn!("{:#}; using fallback texture", err);
        TextureData::create_test_texture(FALLBACK_TEXTURE_SIZE)
    })
}
