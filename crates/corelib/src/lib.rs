//! Core types: math re-exports, Transform, cameras, orbit controls and the
//! literal chess scene layout.

pub use glam::{EulerRot, Mat4, Quat, Vec2, Vec3, vec3};
use thiserror::Error;

pub mod camera;
pub mod chess;
pub mod controls;
pub mod ecs;
pub mod light;
pub mod transform;

#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    #[error("Invalid camera parameters: {0}")]
    InvalidCamera(String),
    #[error("No chess piece is bound to mesh index {0}")]
    UnknownMeshIndex(usize),
}

pub type CoreResult<T> = Result<T, CoreError>;
