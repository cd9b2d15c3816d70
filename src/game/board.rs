//! Piece placement on an 8x8 grid, and attack detection on that placement.
//!
//! The grid is a flat, `Copy` array so that hypothetical positions can be
//! built by copying it once and then touching only the cells a move changes.

use super::{
    colour::Colour,
    piece::{Piece, PieceKind},
    square::{Delta, Square, NUM_SQUARES},
};

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Piece placement, indexed by [`Square::index`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Board {
    cells: [Option<Piece>; NUM_SQUARES],
}
impl Default for Board {
    /// A board with no pieces.
    fn default() -> Self {
        Self::empty()
    }
}
impl Board {
    /// A board with no pieces.
    pub const fn empty() -> Self {
        Self {
            cells: [None; NUM_SQUARES],
        }
    }

    /// The standard starting placement.
    pub fn initial() -> Self {
        let mut board = Self::empty();
        for colour in Colour::COLOURS {
            for (col, kind) in BACK_RANK.into_iter().enumerate() {
                board.put(
                    Square::at(colour.back_rank(), col as u8),
                    Piece::new(kind, colour),
                );
                board.put(
                    Square::at(colour.pawn_rank(), col as u8),
                    Piece::new(PieceKind::Pawn, colour),
                );
            }
        }
        board
    }

    /// Returns the piece sitting on a given square if any.
    #[inline]
    pub fn piece_on(&self, square: Square) -> Option<Piece> {
        self.cells[square.index()]
    }

    /// Places a piece on a square, returning what was there before.
    #[inline]
    pub fn put(&mut self, square: Square, piece: Piece) -> Option<Piece> {
        self.cells[square.index()].replace(piece)
    }

    /// Empties a square, returning what was there before.
    #[inline]
    pub fn take(&mut self, square: Square) -> Option<Piece> {
        self.cells[square.index()].take()
    }

    /// Overwrites a square with the given content.
    #[inline]
    pub fn set(&mut self, square: Square, content: Option<Piece>) {
        self.cells[square.index()] = content
    }

    /// Checks if a square is empty.
    #[inline]
    pub fn is_empty(&self, square: Square) -> bool {
        self.cells[square.index()].is_none()
    }

    /// Iterator over all pieces on the board along with their squares.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::squares_iter().filter_map(|sq| self.piece_on(sq).map(|p| (sq, p)))
    }

    /// Iterator over the pieces of one colour along with their squares.
    pub fn pieces_of(&self, colour: Colour) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.pieces().filter(move |(_, p)| p.colour == colour)
    }

    /// Finds the king of a given colour by scanning the board.
    pub fn find_king(&self, colour: Colour) -> Option<Square> {
        self.pieces_of(colour)
            .find(|(_, p)| p.kind == PieceKind::King)
            .map(|(sq, _)| sq)
    }

    /// Checks if a piece of `attacker` could capture on `target` with its next move.
    ///
    /// Whose turn it is does not matter. Only raw attack patterns are scanned,
    /// so this never recurses into move generation.
    pub fn is_square_attacked(&self, target: Square, attacker: Colour) -> bool {
        self.attacked_by_pawn(target, attacker)
            || self.attacked_by_knight(target, attacker)
            || self.attacked_along(
                target,
                attacker,
                &Delta::DIAGONAL_DELTAS,
                PieceKind::is_diagonal_slider,
            )
            || self.attacked_along(
                target,
                attacker,
                &Delta::ORTHOGONAL_DELTAS,
                PieceKind::is_orthogonal_slider,
            )
            || self.attacked_by_king(target, attacker)
    }

    fn holds(&self, square: Option<Square>, colour: Colour, kind: PieceKind) -> bool {
        square
            .and_then(|sq| self.piece_on(sq))
            .is_some_and(|p| p.colour == colour && p.kind == kind)
    }

    fn attacked_by_pawn(&self, target: Square, attacker: Colour) -> bool {
        // Attacking pawns sit one row behind the target, from their point of view.
        let rows = -attacker.forward();
        [-1, 1].into_iter().any(|cols| {
            self.holds(
                target.translate(Delta::new(rows, cols)),
                attacker,
                PieceKind::Pawn,
            )
        })
    }

    fn attacked_by_knight(&self, target: Square, attacker: Colour) -> bool {
        Delta::KNIGHT_DELTAS
            .into_iter()
            .any(|d| self.holds(target.translate(d), attacker, PieceKind::Knight))
    }

    fn attacked_by_king(&self, target: Square, attacker: Colour) -> bool {
        Delta::QUEEN_DELTAS
            .into_iter()
            .any(|d| self.holds(target.translate(d), attacker, PieceKind::King))
    }

    fn attacked_along(
        &self,
        target: Square,
        attacker: Colour,
        deltas: &[Delta],
        slides: fn(PieceKind) -> bool,
    ) -> bool {
        deltas.iter().any(|&delta| {
            let mut current = target.translate(delta);
            while let Some(sq) = current {
                if let Some(piece) = self.piece_on(sq) {
                    return piece.colour == attacker && slides(piece.kind);
                }
                current = sq.translate(delta);
            }
            false
        })
    }
}
impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..8 {
            write!(f, "{} ", 8 - row)?;
            for col in 0..8 {
                match self.piece_on(Square::at(row, col)) {
                    Some(piece) => write!(f, "{piece} ")?,
                    None => write!(f, ". ")?,
                }
            }
            writeln!(f)?
        }
        write!(f, "  a b c d e f g h")
    }
}
