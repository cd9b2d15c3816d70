//! # Actions (or moves)

use super::square::Square;

/// Moves available to a single piece. A queen in the middle of an empty board
/// has 27 of them, a king at most 10 including castling.
pub type MoveList = heapless::Vec<Move, 32>;

/// Which rook takes part in a castling move.
#[derive(Clone, Copy, Hash, Eq, PartialEq, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CastleSide {
    KingSide,
    QueenSide,
}
impl CastleSide {
    /// Column the rook starts from.
    pub const fn rook_home_col(self) -> u8 {
        match self {
            Self::KingSide => 7,
            Self::QueenSide => 0,
        }
    }

    /// Column the rook lands on after castling.
    pub const fn rook_castled_col(self) -> u8 {
        match self {
            Self::KingSide => 5,
            Self::QueenSide => 3,
        }
    }

    /// Column the king lands on after castling.
    pub const fn king_target_col(self) -> u8 {
        match self {
            Self::KingSide => 6,
            Self::QueenSide => 2,
        }
    }

    /// Columns that must be empty between the king and the rook.
    pub const fn empty_cols(self) -> &'static [u8] {
        match self {
            Self::KingSide => &[5, 6],
            Self::QueenSide => &[1, 2, 3],
        }
    }

    /// Columns the king crosses or lands on, which may not be attacked.
    pub const fn transit_cols(self) -> [u8; 2] {
        match self {
            Self::KingSide => [5, 6],
            Self::QueenSide => [3, 2],
        }
    }

    /// Returns the side whose rook starts on `col`, if any.
    pub const fn from_rook_home(col: u8) -> Option<Self> {
        match col {
            7 => Some(Self::KingSide),
            0 => Some(Self::QueenSide),
            _ => None,
        }
    }
}

/// Special behaviour attached to a move.
#[derive(Clone, Copy, Hash, Eq, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveKind {
    /// Plain displacement, possibly capturing on the target square.
    Normal,
    /// Two-square pawn advance, opening an en passant opportunity.
    DoublePush,
    /// Pawn capture of a pawn that just double pushed past the target square.
    EnPassant,
    /// King move of two squares, bringing the rook along.
    Castle(CastleSide),
}

/// Describes a move using a from-to approach, with all relevant information.
#[derive(Clone, Copy, Hash, Eq, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub capture: bool,
    pub kind: MoveKind,
}
impl Move {
    /// Creates a new quiet move.
    #[inline(always)]
    pub const fn new_quiet(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            capture: false,
            kind: MoveKind::Normal,
        }
    }

    /// Creates a new capture.
    #[inline(always)]
    pub const fn new_capture(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            capture: true,
            kind: MoveKind::Normal,
        }
    }

    /// Creates a new double push.
    #[inline(always)]
    pub const fn new_double_push(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            capture: false,
            kind: MoveKind::DoublePush,
        }
    }

    /// Creates an en passant capture.
    #[inline(always)]
    pub const fn new_en_passant(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            capture: true,
            kind: MoveKind::EnPassant,
        }
    }

    /// Creates a castling move, described by the king's displacement.
    #[inline(always)]
    pub const fn new_castle(from: Square, to: Square, side: CastleSide) -> Self {
        Self {
            from,
            to,
            capture: false,
            kind: MoveKind::Castle(side),
        }
    }

    /// Checks if this move is a capture, en passant included.
    #[inline(always)]
    pub const fn is_capture(self) -> bool {
        self.capture
    }

    /// Checks if this move is a pawn double push.
    #[inline(always)]
    pub const fn is_double_push(self) -> bool {
        matches!(self.kind, MoveKind::DoublePush)
    }

    /// Checks if this move is an en passant capture.
    #[inline(always)]
    pub const fn is_en_passant(self) -> bool {
        matches!(self.kind, MoveKind::EnPassant)
    }

    /// Returns the castling side if this move is a castle.
    #[inline(always)]
    pub const fn castle_side(self) -> Option<CastleSide> {
        match self.kind {
            MoveKind::Castle(side) => Some(side),
            _ => None,
        }
    }

    /// Square on which the captured piece sits before the move is played.
    ///
    /// This is the target square, except for en passant captures where the
    /// captured pawn sits next to the capturing one.
    pub const fn capture_square(self) -> Square {
        if self.is_en_passant() {
            Square::at(self.from.row(), self.to.col())
        } else {
            self.to
        }
    }

    /// Square the rook leaves and the square it lands on, for castling moves.
    pub const fn rook_displacement(self) -> Option<(Square, Square)> {
        match self.kind {
            MoveKind::Castle(side) => Some((
                Square::at(self.from.row(), side.rook_home_col()),
                Square::at(self.from.row(), side.rook_castled_col()),
            )),
            _ => None,
        }
    }
}
impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn en_passant_captures_beside_the_target() {
        let mv = Move::new_en_passant(Square::at(3, 4), Square::at(2, 3));
        assert_eq!(mv.capture_square(), Square::at(3, 3));
        assert!(mv.is_capture());
        assert_eq!(mv.to_string(), "e5d6");
    }

    #[test]
    fn castling_rook_displacement() {
        let king_side = Move::new_castle(Square::at(7, 4), Square::at(7, 6), CastleSide::KingSide);
        assert_eq!(
            king_side.rook_displacement(),
            Some((Square::at(7, 7), Square::at(7, 5)))
        );
        let queen_side =
            Move::new_castle(Square::at(0, 4), Square::at(0, 2), CastleSide::QueenSide);
        assert_eq!(
            queen_side.rook_displacement(),
            Some((Square::at(0, 0), Square::at(0, 3)))
        );
        assert_eq!(Move::new_quiet(Square::at(6, 4), Square::at(5, 4)).rook_displacement(), None);
    }
}
