//! Move generation.
//!
//! Moves are first generated from each piece's raw movement pattern
//! (pseudo-legal moves), then filtered by playing them on a scratch copy of the
//! board and checking that the mover's king is not left under attack.

use super::{
    action::{CastleSide, Move, MoveList},
    board::Board,
    colour::Colour,
    piece::{Piece, PieceKind},
    position::Position,
    square::{Delta, Square},
};

#[inline(always)]
fn push(moves: &mut MoveList, mv: Move) {
    // SAFETY: a single piece never has more moves than a `MoveList` can hold.
    unsafe { moves.push_unchecked(mv) }
}

impl Position {
    /// Legal moves of the piece on `from`, whatever the side to move.
    ///
    /// Returns an empty list if the square is empty.
    pub(crate) fn moves_for(&self, from: Square) -> MoveList {
        let Some(piece) = self.board().piece_on(from) else {
            return MoveList::new();
        };

        let mut scratch = *self.board();
        let mut moves = self.pseudo_legal_moves(from, piece);
        moves.retain(|&mv| self.keeps_king_safe(&mut scratch, mv, piece));
        moves
    }

    /// Checks if the side to move has at least one legal move.
    pub(crate) fn has_legal_moves(&self, colour: Colour) -> bool {
        self.board()
            .pieces_of(colour)
            .any(|(sq, _)| !self.moves_for(sq).is_empty())
    }

    /// Plays `mv` on `scratch`, tests the mover's king, and puts every touched
    /// cell back.
    ///
    /// `scratch` must hold the same placement as the position's board.
    fn keeps_king_safe(&self, scratch: &mut Board, mv: Move, piece: Piece) -> bool {
        let captured_on = mv.capture_square();
        let saved = [
            (mv.from, scratch.piece_on(mv.from)),
            (mv.to, scratch.piece_on(mv.to)),
            (captured_on, scratch.piece_on(captured_on)),
        ];

        scratch.take(captured_on);
        scratch.take(mv.from);
        scratch.put(mv.to, piece);
        let rook = mv.rook_displacement().map(|(home, castled)| {
            let rook = scratch.take(home);
            scratch.set(castled, rook);
            (home, castled, rook)
        });

        let king = if piece.kind == PieceKind::King {
            mv.to
        } else {
            self.king_square(piece.colour)
        };
        let safe = !scratch.is_square_attacked(king, piece.colour.inverse());

        if let Some((home, castled, rook)) = rook {
            scratch.set(castled, None);
            scratch.set(home, rook);
        }
        for (square, content) in saved.into_iter().rev() {
            scratch.set(square, content)
        }

        safe
    }

    /// Moves following the piece's movement pattern, before checking that
    /// they leave their own king safe.
    pub(crate) fn pseudo_legal_moves(&self, from: Square, piece: Piece) -> MoveList {
        let mut moves = MoveList::new();
        match piece.kind {
            PieceKind::Pawn => self.generate_pawn_moves(&mut moves, from, piece.colour),
            PieceKind::Knight => {
                self.generate_step_moves(&mut moves, from, piece.colour, &Delta::KNIGHT_DELTAS)
            }
            PieceKind::Bishop => {
                self.generate_sliding_moves(&mut moves, from, piece.colour, &Delta::DIAGONAL_DELTAS)
            }
            PieceKind::Rook => self.generate_sliding_moves(
                &mut moves,
                from,
                piece.colour,
                &Delta::ORTHOGONAL_DELTAS,
            ),
            PieceKind::Queen => {
                self.generate_sliding_moves(&mut moves, from, piece.colour, &Delta::QUEEN_DELTAS)
            }
            PieceKind::King => {
                self.generate_step_moves(&mut moves, from, piece.colour, &Delta::QUEEN_DELTAS);
                self.generate_castles(&mut moves, from, piece.colour);
            }
        }
        moves
    }

    fn generate_pawn_moves(&self, moves: &mut MoveList, from: Square, colour: Colour) {
        let board = self.board();
        let forward = Delta::new(colour.forward(), 0);

        if let Some(single) = from.translate(forward).filter(|&sq| board.is_empty(sq)) {
            push(moves, Move::new_quiet(from, single));

            if from.row() == colour.pawn_rank() {
                if let Some(double) = single.translate(forward).filter(|&sq| board.is_empty(sq)) {
                    push(moves, Move::new_double_push(from, double))
                }
            }
        }

        for cols in [-1, 1] {
            let Some(target) = from.translate(Delta::new(colour.forward(), cols)) else {
                continue;
            };
            match board.piece_on(target) {
                Some(p) if p.colour != colour => push(moves, Move::new_capture(from, target)),
                None if self.en_passant_target() == Some(target) => {
                    let mv = Move::new_en_passant(from, target);
                    let passed = board.piece_on(mv.capture_square());
                    if passed.is_some_and(|p| p.kind == PieceKind::Pawn && p.colour != colour) {
                        push(moves, mv)
                    }
                }
                _ => (),
            }
        }
    }

    /// Knights and kings: one step along each delta, onto empty or enemy squares.
    fn generate_step_moves(
        &self,
        moves: &mut MoveList,
        from: Square,
        colour: Colour,
        deltas: &[Delta],
    ) {
        for target in deltas.iter().filter_map(|&d| from.translate(d)) {
            match self.board().piece_on(target) {
                None => push(moves, Move::new_quiet(from, target)),
                Some(p) if p.colour != colour => push(moves, Move::new_capture(from, target)),
                Some(_) => (),
            }
        }
    }

    /// Sliders: walk each ray until the first occupied square, which is included
    /// only if it holds an enemy piece.
    fn generate_sliding_moves(
        &self,
        moves: &mut MoveList,
        from: Square,
        colour: Colour,
        deltas: &[Delta],
    ) {
        for &delta in deltas {
            let mut current = from.translate(delta);
            while let Some(target) = current {
                match self.board().piece_on(target) {
                    None => push(moves, Move::new_quiet(from, target)),
                    Some(p) => {
                        if p.colour != colour {
                            push(moves, Move::new_capture(from, target))
                        }
                        break;
                    }
                }
                current = target.translate(delta);
            }
        }
    }

    fn generate_castles(&self, moves: &mut MoveList, from: Square, colour: Colour) {
        let board = self.board();
        let row = colour.back_rank();
        let them = colour.inverse();
        if from != Square::at(row, 4) || board.is_square_attacked(from, them) {
            return;
        }

        for side in [CastleSide::KingSide, CastleSide::QueenSide] {
            if !self.castling_rights().allowed(side, colour) {
                continue;
            }
            let rook = board.piece_on(Square::at(row, side.rook_home_col()));
            if !rook.is_some_and(|p| p.kind == PieceKind::Rook && p.colour == colour) {
                continue;
            }
            if !side
                .empty_cols()
                .iter()
                .all(|&col| board.is_empty(Square::at(row, col)))
            {
                continue;
            }
            if side
                .transit_cols()
                .iter()
                .any(|&col| board.is_square_attacked(Square::at(row, col), them))
            {
                continue;
            }
            push(
                moves,
                Move::new_castle(from, Square::at(row, side.king_target_col()), side),
            )
        }
    }
}

#[cfg(test)]
mod test {
    use crate::game::{position::Position, square::Square};

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    #[test]
    fn scratch_board_is_restored() {
        let position =
            Position::from_fen("r3k2r/8/8/3pP3/8/8/8/R3K2R w KQkq d6 0 1").unwrap();
        let before = *position.board();
        for square in Square::squares_iter() {
            position.moves_for(square);
        }
        assert_eq!(*position.board(), before);
        assert_eq!(position.moves_for(sq("e5")).len(), 2);
        assert_eq!(position.moves_for(sq("e1")).len(), 7);
    }

    #[test]
    fn sliders_stop_at_first_piece() {
        let position = Position::from_fen("4k3/8/8/8/1p1R2P1/8/8/4K3 w - - 0 1").unwrap();
        let targets: Vec<_> = position
            .moves_for(sq("d4"))
            .iter()
            .map(|m| m.to.to_string())
            .collect();
        assert!(targets.contains(&"b4".to_string()));
        assert!(!targets.contains(&"a4".to_string()));
        assert!(targets.contains(&"f4".to_string()));
        assert!(!targets.contains(&"g4".to_string()));
        assert_eq!(targets.len(), 4 + 7);
    }
}
