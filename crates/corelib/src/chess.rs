//! Literal chess scene layout.
//!
//! The piece meshes are authored with their own pivots, so the offsets below
//! are scene constants rather than board-square arithmetic.

use crate::{CoreError, CoreResult, Vec3, transform::Transform, vec3};

/// Distance between neighbouring files.
pub const SPACING: f32 = 5.5;

/// Number of distinct piece meshes (six kinds, two sides).
pub const PIECE_MESH_COUNT: usize = 12;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Light,
    Dark,
}

impl Side {
    #[inline]
    pub const fn slot(self) -> usize {
        match self {
            Side::Light => 0,
            Side::Dark => 1,
        }
    }
}

/// Piece kinds in the order their meshes appear in the pieces model.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Bishop,
    Knight,
    Pawn,
    Queen,
    King,
    Rook,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Bishop,
        PieceKind::Knight,
        PieceKind::Pawn,
        PieceKind::Queen,
        PieceKind::King,
        PieceKind::Rook,
    ];

    #[inline]
    pub const fn slot(self) -> usize {
        match self {
            PieceKind::Bishop => 0,
            PieceKind::Knight => 1,
            PieceKind::Pawn => 2,
            PieceKind::Queen => 3,
            PieceKind::King => 4,
            PieceKind::Rook => 5,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PieceId {
    pub side: Side,
    pub kind: PieceKind,
}

impl PieceId {
    pub const fn new(side: Side, kind: PieceKind) -> Self {
        Self { side, kind }
    }

    /// Index of this piece's mesh (and texture) in the imported model.
    #[inline]
    pub const fn mesh_index(self) -> usize {
        self.kind.slot() * 2 + self.side.slot()
    }

    pub fn from_mesh_index(index: usize) -> CoreResult<Self> {
        if index >= PIECE_MESH_COUNT {
            return Err(CoreError::UnknownMeshIndex(index));
        }
        let kind = PieceKind::ALL[index / 2];
        let side = if index % 2 == 0 { Side::Light } else { Side::Dark };
        Ok(Self { side, kind })
    }
}

/// One drawn instance of a piece mesh.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub piece: PieceId,
    pub transform: Transform,
}

/// The board model is authored Z-up; tip it over and lift it slightly.
pub fn board_transform() -> Transform {
    Transform::identity()
        .then_rotate(Vec3::X, (-90f32).to_radians())
        .then_translate(vec3(0.0, 0.0, 0.5))
}

/// All 32 piece placements of the starting position.
pub fn layout() -> Vec<Placement> {
    let mut out = Vec::with_capacity(32);
    place_dark(&mut out);
    place_light(&mut out);
    out
}

fn place_dark(out: &mut Vec<Placement>) {
    let mut push = |kind, transform| {
        out.push(Placement {
            piece: PieceId::new(Side::Dark, kind),
            transform,
        })
    };

    for col in 0..8 {
        let t = Transform::identity()
            .then_translate(vec3((col - 1) as f32 * SPACING, 0.0, 30.0))
            .then_translate(vec3(-27.3, 0.0, 0.0));
        push(PieceKind::Pawn, t);
    }
    for (kind, stride, offset_x) in [
        (PieceKind::Knight, 5.0, 22.0),
        (PieceKind::Bishop, 3.0, 11.5),
        (PieceKind::Rook, 7.0, 34.0),
    ] {
        for i in 0..=1 {
            let t = Transform::identity()
                .then_translate(vec3((i - 1) as f32 * SPACING * stride, 0.0, 25.0))
                .then_translate(vec3(offset_x, 0.0, 0.0));
            push(kind, t);
        }
    }
    push(
        PieceKind::King,
        Transform::identity().then_translate(vec3(0.0, 0.0, 25.0)),
    );
    push(
        PieceKind::Queen,
        Transform::identity()
            .then_translate(vec3(0.0, 0.0, 25.0))
            .then_translate(vec3(-11.0, 0.0, 0.0)),
    );
}

fn place_light(out: &mut Vec<Placement>) {
    let mut push = |kind, transform| {
        out.push(Placement {
            piece: PieceId::new(Side::Light, kind),
            transform,
        })
    };
    let turned = |t: Transform| {
        t.then_translate(vec3(5.3, 0.0, 0.0))
            .then_translate(vec3(0.0, 0.0, -12.0))
            .then_rotate(Vec3::Y, 180f32.to_radians())
    };

    let start_x = 5.0;
    for col in 0..8 {
        let t = Transform::identity()
            .then_translate(vec3(start_x + (col - 1) as f32 * SPACING, 0.0, 45.0))
            .then_translate(vec3(-32.0, 0.0, 0.0));
        push(PieceKind::Pawn, t);
    }
    for (kind, stride) in [
        (PieceKind::Knight, 5.0),
        (PieceKind::Bishop, 3.0),
        (PieceKind::Rook, 7.0),
    ] {
        for i in 0..=1 {
            let t = Transform::identity().then_translate(vec3(
                (i - 1) as f32 * SPACING * stride,
                0.0,
                0.0,
            ));
            push(kind, turned(t));
        }
    }
    push(PieceKind::King, turned(Transform::identity()));
    push(PieceKind::Queen, turned(Transform::identity()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Mat4;

    fn count(placements: &[Placement], side: Side, kind: PieceKind) -> usize {
        placements
            .iter()
            .filter(|p| p.piece == PieceId::new(side, kind))
            .count()
    }

    #[test]
    fn layout_has_a_full_set_per_side() {
        let placements = layout();
        assert_eq!(placements.len(), 32);
        for side in [Side::Light, Side::Dark] {
            assert_eq!(count(&placements, side, PieceKind::Pawn), 8);
            assert_eq!(count(&placements, side, PieceKind::Knight), 2);
            assert_eq!(count(&placements, side, PieceKind::Bishop), 2);
            assert_eq!(count(&placements, side, PieceKind::Rook), 2);
            assert_eq!(count(&placements, side, PieceKind::Queen), 1);
            assert_eq!(count(&placements, side, PieceKind::King), 1);
        }
    }

    #[test]
    fn dark_pawn_row_starts_left_of_the_board() {
        let placements = layout();
        let first = placements[0];
        assert_eq!(first.piece, PieceId::new(Side::Dark, PieceKind::Pawn));
        assert!((first.transform.translation.x - (-SPACING - 27.3)).abs() < 1e-4);
        assert!((first.transform.translation.z - 30.0).abs() < 1e-6);
    }

    #[test]
    fn light_rook_is_turned_around() {
        let rook = layout()
            .into_iter()
            .find(|p| p.piece == PieceId::new(Side::Light, PieceKind::Rook))
            .expect("light rook placed");
        let expected = Mat4::from_translation(vec3(-SPACING * 7.0, 0.0, 0.0))
            * Mat4::from_translation(vec3(5.3, 0.0, 0.0))
            * Mat4::from_translation(vec3(0.0, 0.0, -12.0))
            * Mat4::from_rotation_y(180f32.to_radians());
        assert!(rook.transform.matrix().abs_diff_eq(expected, 1e-4));
    }

    #[test]
    fn board_is_tipped_onto_the_xz_plane() {
        let m = board_transform().matrix();
        let expected = Mat4::from_rotation_x((-90f32).to_radians())
            * Mat4::from_translation(vec3(0.0, 0.0, 0.5));
        assert!(m.abs_diff_eq(expected, 1e-5));
        // Model +Z (up in the authoring tool) becomes world +Y.
        assert!(m.transform_vector3(Vec3::Z).abs_diff_eq(Vec3::Y, 1e-5));
    }

    #[test]
    fn mesh_indices_follow_texture_order() {
        assert_eq!(PieceId::new(Side::Light, PieceKind::Bishop).mesh_index(), 0);
        assert_eq!(PieceId::new(Side::Dark, PieceKind::Pawn).mesh_index(), 5);
        assert_eq!(PieceId::new(Side::Dark, PieceKind::Rook).mesh_index(), 11);
        let id = PieceId::from_mesh_index(9).expect("king slot");
        assert_eq!(id, PieceId::new(Side::Dark, PieceKind::King));
        assert_eq!(
            PieceId::from_mesh_index(12),
            Err(CoreError::UnknownMeshIndex(12))
        );
    }
}
