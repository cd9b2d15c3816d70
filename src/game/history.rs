use super::{
    action::Move,
    castling_rights::CastlingRights,
    piece::{Piece, PieceKind},
    square::Square,
};

/// Records the information lost when making a move, so that it can be undone.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveRecord {
    pub played: Move,
    /// The moving piece as it was before the move.
    pub piece: Piece,
    pub captured: Option<Piece>,
    pub castling_rights: CastlingRights,
    pub en_passant: Option<Square>,
    /// Kind the pawn was promoted to, if the move was a promotion.
    pub promotion: Option<PieceKind>,
}
impl MoveRecord {
    /// Origin of the move.
    pub fn from(&self) -> Square {
        self.played.from
    }

    /// Target of the move.
    pub fn to(&self) -> Square {
        self.played.to
    }
}
