//! Simplified algebraic notation for move logs.
//!
//! Moves are written as the piece letter, the origin square, an `x` for
//! captures and the target square (`Ng1f3`, `Bf5xc2`). Pawns have no letter:
//! quiet pawn moves show both squares (`e2e4`) and pawn captures show the
//! origin file only (`exd5`). Disambiguation, check markers and castling
//! notation are not produced.

use super::{piece::PieceKind, position::Position, square::Square};

/// Letter naming a piece kind in notation, `None` for pawns.
pub fn piece_letter(kind: PieceKind) -> Option<char> {
    match kind {
        PieceKind::Pawn => None,
        PieceKind::Knight => Some('N'),
        other => other
            .name()
            .chars()
            .next()
            .map(|c| c.to_ascii_uppercase()),
    }
}

/// Writes a move of a `kind` piece in simplified algebraic notation.
pub fn notation(kind: PieceKind, from: Square, to: Square, capture: bool) -> String {
    let mut written = String::with_capacity(6);
    match piece_letter(kind) {
        Some(letter) => {
            written.push(letter);
            written.push_str(&from.to_string());
        }
        None if capture => written.push(from.file()),
        None => written.push_str(&from.to_string()),
    }
    if capture {
        written.push('x');
    }
    written.push_str(&to.to_string());
    written
}

impl Position {
    /// Writes the move of the piece on `from` to `to` in simplified algebraic
    /// notation, as it would be played in the current position.
    ///
    /// The move is not checked for legality. Returns `None` if `from` is empty.
    pub fn algebraic_notation(&self, from: Square, to: Square) -> Option<String> {
        let piece = self.piece_on(from)?;
        let takes_piece = self.piece_on(to).is_some_and(|p| p.colour != piece.colour);
        let takes_en_passant = piece.kind == PieceKind::Pawn
            && from.col() != to.col()
            && self.en_passant_target() == Some(to);
        Some(notation(piece.kind, from, to, takes_piece || takes_en_passant))
    }
}
