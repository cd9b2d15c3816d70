//! Main API to represent and interact with a chess game.
//!
//! This includes making and undoing moves, querying legal moves, detecting
//! check, checkmate, stalemate and draws, and suggesting moves.

use rand::{seq::SliceRandom, Rng};
use thiserror::Error;

use super::{
    action::{CastleSide, Move, MoveList},
    board::Board,
    castling_rights::CastlingRights,
    colour::{Colour, NUM_COLOURS},
    fen::{Fen, FenError},
    history::MoveRecord,
    piece::{Piece, PieceKind, PromotionTarget},
    square::Square,
};

/// Number of plies after which the game is declared drawn.
///
/// This approximates the fifty-move rule: it counts every ply played, not only
/// those without captures or pawn moves.
pub const MOVE_LIMIT: usize = 100;

/// A command the position refused. The position is left untouched.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Error)]
pub enum MoveError {
    #[error("Not your piece")]
    NotYourPiece,
    #[error("Illegal move")]
    IllegalMove,
    #[error("No moves to undo")]
    NothingToUndo,
}

/// Possible result of the game.
#[derive(Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub enum GameResult {
    /// A side is in checkmate. The value in this variant indicates which side **is in checkmate**,
    /// not the side that won.
    Checkmate(Colour),
    /// A draw was reached. The value in this variant indicates the type of draw.
    Draw(DrawKind),
}

/// All possible kinds of draw.
#[derive(Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub enum DrawKind {
    /// One side has no legal moves, yet is not in check.
    Stalemate,
    /// [`MOVE_LIMIT`] plies have been played.
    FiftyMoveRule,
    /// None of the players can force checkmate.
    InsufficientMaterial,
}

/// A suggested move.
#[derive(Clone, Copy, Hash, PartialEq, Eq, Debug)]
pub struct Hint {
    pub piece: Piece,
    pub from: Square,
    pub to: Square,
}

/// State of a game of chess, and the API to play it.
///
/// Each game owns its position; there is no state shared between games.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct Position {
    board: Board,
    side_to_move: Colour,
    castling_rights: CastlingRights,
    en_passant: Option<Square>,
    // Always equal to the squares the kings sit on.
    kings: [Square; NUM_COLOURS],
    history: Vec<MoveRecord>,
    // Indexed by the colour of the captured pieces.
    captured: [Vec<Piece>; NUM_COLOURS],
}
impl Default for Position {
    /// The initial position of chess.
    fn default() -> Self {
        Self::new_game()
    }
}
impl Position {
    /// Starts a new game from the initial position, white to move.
    pub fn new_game() -> Self {
        Self {
            board: Board::initial(),
            side_to_move: Colour::White,
            castling_rights: CastlingRights::full(),
            en_passant: None,
            kings: [Square::at(7, 4), Square::at(0, 4)],
            history: Vec::new(),
            captured: [Vec::new(), Vec::new()],
        }
    }

    /// The initial position of chess.
    pub fn initial() -> Self {
        Self::new_game()
    }

    /// Resets this game to the initial position.
    pub fn reset(&mut self) {
        *self = Self::new_game();
        log::debug!("new game");
    }

    /// Creates a position from a FEN string.
    ///
    /// The history and captured pieces of the resulting game are empty.
    /// # Errors
    /// This function returns an error if the FEN string is badly formatted or
    /// if either side does not have exactly one king.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let fen: Fen = fen.parse()?;

        let mut kings = [Square::at(7, 4), Square::at(0, 4)];
        for colour in Colour::COLOURS {
            let mut found = fen
                .board
                .pieces_of(colour)
                .filter(|(_, p)| p.kind == PieceKind::King);
            let (square, _) = found.next().ok_or(FenError::MissingKing(colour))?;
            if found.next().is_some() {
                return Err(FenError::TooManyKings(colour));
            }
            kings[colour as usize] = square;
        }

        log::debug!("loaded position, {} to move", fen.side_to_move);
        Ok(Self {
            board: fen.board,
            side_to_move: fen.side_to_move,
            castling_rights: fen.castling_rights,
            en_passant: fen.en_passant,
            kings,
            history: Vec::new(),
            captured: [Vec::new(), Vec::new()],
        })
    }

    /// Returns the piece placement.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the piece sitting on a given square if any.
    pub fn piece_on(&self, square: Square) -> Option<Piece> {
        self.board.piece_on(square)
    }

    /// Returns the current side to move.
    pub fn side_to_move(&self) -> Colour {
        self.side_to_move
    }

    /// Returns the remaining castling rights of both sides.
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    /// Square a pawn skipped over with a double push on the previous ply, if any.
    pub fn en_passant_target(&self) -> Option<Square> {
        self.en_passant
    }

    /// Returns the square the king of a given colour sits on.
    pub fn king_square(&self, colour: Colour) -> Square {
        self.kings[colour as usize]
    }

    /// Moves played so far, oldest first.
    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    /// The last move played, if any.
    pub fn last_move(&self) -> Option<Move> {
        self.history.last().map(|record| record.played)
    }

    /// Pieces of `colour` taken by the opponent, in the order they were taken.
    pub fn captured_pieces(&self, colour: Colour) -> &[Piece] {
        &self.captured[colour as usize]
    }

    /// Legal moves of the piece on `square`.
    ///
    /// Returns an empty list if the square is empty or holds a piece of the side
    /// not to move.
    pub fn legal_moves(&self, square: Square) -> MoveList {
        match self.board.piece_on(square) {
            Some(piece) if piece.colour == self.side_to_move => self.moves_for(square),
            _ => MoveList::new(),
        }
    }

    /// All legal moves of the pieces of `colour`, whatever the side to move.
    pub fn all_legal_moves(&self, colour: Colour) -> Vec<Move> {
        self.board
            .pieces_of(colour)
            .flat_map(|(square, _)| self.moves_for(square))
            .collect()
    }

    /// Checks if a piece of `attacker` could capture on `square` with its next move.
    ///
    /// Use [`Board::is_square_attacked`] to ask the same question about a
    /// hypothetical placement.
    pub fn is_square_attacked(&self, square: Square, attacker: Colour) -> bool {
        self.board.is_square_attacked(square, attacker)
    }

    /// Makes a move on the board, promoting pawns to queens.
    /// # Errors
    /// Returns an error, leaving the position untouched, if `from` does not hold a
    /// piece of the side to move, or if `to` is not one of its legal targets.
    pub fn make_move(&mut self, from: Square, to: Square) -> Result<Move, MoveError> {
        self.make_move_promoting(from, to, PromotionTarget::Queen)
    }

    /// Makes a move on the board, promoting pawns reaching the last rank to
    /// `promotion`.
    /// # Errors
    /// Same as [`Position::make_move`].
    pub fn make_move_promoting(
        &mut self,
        from: Square,
        to: Square,
        promotion: PromotionTarget,
    ) -> Result<Move, MoveError> {
        if !self
            .board
            .piece_on(from)
            .is_some_and(|p| p.colour == self.side_to_move)
        {
            log::trace!("rejected {from}{to}: not a piece of {}", self.side_to_move);
            return Err(MoveError::NotYourPiece);
        }

        let Some(mv) = self.legal_moves(from).iter().find(|mv| mv.to == to).copied() else {
            log::trace!("rejected {from}{to}: illegal");
            return Err(MoveError::IllegalMove);
        };

        self.play(mv, promotion);
        log::debug!("{} played {mv}", self.side_to_move.inverse());
        Ok(mv)
    }

    /// Plays a move known to be legal.
    pub(crate) fn play(&mut self, mv: Move, promotion: PromotionTarget) {
        let us = self.side_to_move;
        let Some(piece) = self.board.take(mv.from) else {
            log::error!("no piece to move on {}", mv.from);
            return;
        };

        let captured_on = mv.capture_square();
        let captured = if mv.is_capture() {
            self.board.take(captured_on)
        } else {
            None
        };
        let mut record = MoveRecord {
            played: mv,
            piece,
            captured,
            castling_rights: self.castling_rights,
            en_passant: self.en_passant,
            promotion: None,
        };
        self.en_passant = None;

        let mut landed = piece.with_moved(true);
        if piece.kind == PieceKind::Pawn && mv.to.row() == us.promotion_rank() {
            landed.kind = promotion.to_piece_kind();
            record.promotion = Some(landed.kind);
        }
        self.board.put(mv.to, landed);

        match piece.kind {
            PieceKind::King => {
                self.kings[us as usize] = mv.to;
                self.castling_rights.disallow(us);
            }
            PieceKind::Rook if mv.from.row() == us.back_rank() => {
                if let Some(side) = CastleSide::from_rook_home(mv.from.col()) {
                    self.castling_rights.disallow_side(side, us)
                }
            }
            _ => (),
        }

        if let Some((home, castled)) = mv.rook_displacement() {
            if let Some(rook) = self.board.take(home) {
                self.board.put(castled, rook.with_moved(true));
            }
        }

        if let Some(captured) = captured {
            // A rook taken on its home square can no longer castle.
            if captured.kind == PieceKind::Rook && captured_on.row() == captured.colour.back_rank()
            {
                if let Some(side) = CastleSide::from_rook_home(captured_on.col()) {
                    self.castling_rights.disallow_side(side, captured.colour)
                }
            }
            self.captured[captured.colour as usize].push(captured);
        }

        if mv.is_double_push() {
            self.en_passant = Some(Square::at(
                (mv.from.row() + mv.to.row()) / 2,
                mv.from.col(),
            ));
        }

        self.history.push(record);
        self.side_to_move.invert();
    }

    /// Undoes the last move played, restoring the position as it was prior to
    /// the move, and returns what was undone.
    ///
    /// Castling moves bring their rook back, promotions give the pawn back, and
    /// en passant captures put the taken pawn back on its own square.
    /// # Errors
    /// Returns an error if no move was played.
    pub fn undo_move(&mut self) -> Result<MoveRecord, MoveError> {
        let record = self.history.pop().ok_or(MoveError::NothingToUndo)?;
        let mv = record.played;
        let colour = record.piece.colour;

        self.board.take(mv.to);
        self.board.put(mv.from, record.piece);

        if let Some((home, castled)) = mv.rook_displacement() {
            if let Some(rook) = self.board.take(castled) {
                self.board.put(home, rook.with_moved(false));
            }
        }

        if let Some(captured) = record.captured {
            self.board.put(mv.capture_square(), captured);
            let list = &mut self.captured[captured.colour as usize];
            if let Some(index) = list.iter().position(|p| p.same_identity(&captured)) {
                list.remove(index);
            }
        }

        if record.piece.kind == PieceKind::King {
            self.kings[colour as usize] = mv.from;
        }
        self.castling_rights = record.castling_rights;
        self.en_passant = record.en_passant;
        self.side_to_move = colour;

        log::debug!("{colour} took back {mv}");
        Ok(record)
    }

    /// Checks if the king of `colour` is attacked.
    pub fn is_in_check(&self, colour: Colour) -> bool {
        self.board
            .is_square_attacked(self.king_square(colour), colour.inverse())
    }

    /// Checks if `colour` is in check and none of its pieces has a legal move.
    pub fn is_checkmate(&self, colour: Colour) -> bool {
        self.is_in_check(colour) && !self.has_legal_moves(colour)
    }

    /// Checks if `colour` is not in check but none of its pieces has a legal move.
    pub fn is_stalemate(&self, colour: Colour) -> bool {
        !self.is_in_check(colour) && !self.has_legal_moves(colour)
    }

    /// Checks if the game is drawn by insufficient material or by reaching
    /// [`MOVE_LIMIT`] plies.
    pub fn is_draw(&self) -> bool {
        self.insufficient_material() || self.history.len() >= MOVE_LIMIT
    }

    /// Checks if only kings remain, possibly with a single bishop or knight.
    pub fn insufficient_material(&self) -> bool {
        let mut others = self
            .board
            .pieces()
            .filter(|(_, p)| p.kind != PieceKind::King);
        match (others.next(), others.next()) {
            (None, _) => true,
            (Some((_, piece)), None) => piece.kind.is_minor(),
            _ => false,
        }
    }

    /// Returns the result of the game if it is over, from the point of view of
    /// the side to move.
    pub fn status(&self) -> Option<GameResult> {
        let us = self.side_to_move;
        if !self.has_legal_moves(us) {
            return Some(if self.is_in_check(us) {
                GameResult::Checkmate(us)
            } else {
                GameResult::Draw(DrawKind::Stalemate)
            });
        }
        if self.insufficient_material() {
            Some(GameResult::Draw(DrawKind::InsufficientMaterial))
        } else if self.history.len() >= MOVE_LIMIT {
            Some(GameResult::Draw(DrawKind::FiftyMoveRule))
        } else {
            None
        }
    }

    /// Suggests a random legal move for `colour`.
    ///
    /// Returns `None` if `colour` has no legal move.
    pub fn hint(&self, colour: Colour) -> Option<Hint> {
        self.hint_with_rng(colour, &mut rand::thread_rng())
    }

    /// Suggests a legal move for `colour`: a piece that can move is picked
    /// uniformly, then one of its moves.
    pub fn hint_with_rng<R: Rng + ?Sized>(&self, colour: Colour, rng: &mut R) -> Option<Hint> {
        let candidates: Vec<(Square, Piece, MoveList)> = self
            .board
            .pieces_of(colour)
            .map(|(square, piece)| (square, piece, self.moves_for(square)))
            .filter(|(_, _, moves)| !moves.is_empty())
            .collect();

        let (from, piece, moves) = candidates.choose(rng)?;
        let mv = moves.choose(rng)?;
        Some(Hint {
            piece: *piece,
            from: *from,
            to: mv.to,
        })
    }
}
impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.board)?;
        writeln!(f, "side to move: {}", self.side_to_move)?;
        writeln!(f, "castling rights: {}", self.castling_rights)?;
        write!(
            f,
            "en passant: {}",
            match self.en_passant {
                Some(square) => square.to_string(),
                None => "-".to_string(),
            }
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    #[test]
    fn rejected_commands_leave_the_position_untouched() {
        let mut position = Position::initial();
        let before = position.clone();

        assert_eq!(position.make_move(sq("e7"), sq("e5")), Err(MoveError::NotYourPiece));
        assert_eq!(position.make_move(sq("e4"), sq("e5")), Err(MoveError::NotYourPiece));
        assert_eq!(position.make_move(sq("e2"), sq("e5")), Err(MoveError::IllegalMove));
        assert_eq!(position.undo_move(), Err(MoveError::NothingToUndo));
        assert_eq!(position, before);
    }

    #[test]
    fn error_messages() {
        assert_eq!(MoveError::NotYourPiece.to_string(), "Not your piece");
        assert_eq!(MoveError::IllegalMove.to_string(), "Illegal move");
        assert_eq!(MoveError::NothingToUndo.to_string(), "No moves to undo");
    }

    #[test]
    fn fen_matches_new_game() {
        let position =
            Position::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1")
                .unwrap();
        assert_eq!(position, Position::new_game());
    }

    #[test]
    fn fen_requires_one_king_each() {
        assert_eq!(
            Position::from_fen("8/8/8/8/8/8/8/4K3 w - -"),
            Err(FenError::MissingKing(Colour::Black))
        );
        assert_eq!(
            Position::from_fen("k7/8/8/8/8/8/8/4K2K w - -"),
            Err(FenError::TooManyKings(Colour::White))
        );
    }

    #[test]
    fn sides_alternate_and_last_move_follows_history() {
        let mut position = Position::initial();
        assert_eq!(position.last_move(), None);

        let first = position.make_move(sq("g1"), sq("f3")).unwrap();
        assert_eq!(position.side_to_move(), Colour::Black);
        let second = position.make_move(sq("g8"), sq("f6")).unwrap();
        assert_eq!(position.side_to_move(), Colour::White);
        assert_eq!(position.last_move(), Some(second));

        position.undo_move().unwrap();
        assert_eq!(position.last_move(), Some(first));
        assert_eq!(position.side_to_move(), Colour::Black);
        position.undo_move().unwrap();
        assert_eq!(position.last_move(), None);
    }

    #[test]
    fn king_square_follows_the_king() {
        let mut position = Position::initial();
        position.make_move(sq("e2"), sq("e4")).unwrap();
        position.make_move(sq("e7"), sq("e5")).unwrap();
        position.make_move(sq("e1"), sq("e2")).unwrap();
        assert_eq!(position.king_square(Colour::White), sq("e2"));
        assert_eq!(position.board().find_king(Colour::White), Some(sq("e2")));
        assert!(!position.castling_rights().kingside_castle_allowed(Colour::White));
        assert!(!position.castling_rights().queenside_castle_allowed(Colour::White));

        position.undo_move().unwrap();
        assert_eq!(position.king_square(Colour::White), sq("e1"));
        assert_eq!(position.castling_rights(), CastlingRights::full());
    }

    #[test]
    fn rook_moves_revoke_their_side_only() {
        let mut position = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        position.make_move(sq("h1"), sq("h4")).unwrap();
        assert!(!position.castling_rights().kingside_castle_allowed(Colour::White));
        assert!(position.castling_rights().queenside_castle_allowed(Colour::White));

        position.make_move(sq("a8"), sq("a1")).unwrap();
        assert!(!position.castling_rights().queenside_castle_allowed(Colour::Black));
        // The white rook taken on a1 cannot castle anymore either.
        assert!(!position.castling_rights().queenside_castle_allowed(Colour::White));
        assert!(position.castling_rights().kingside_castle_allowed(Colour::Black));
        assert_eq!(
            position.captured_pieces(Colour::White),
            &[Piece::new(PieceKind::Rook, Colour::White)]
        );
    }

    #[test]
    fn insufficient_material() {
        for (fen, expected) in [
            ("4k3/8/8/8/8/8/8/4K3 w - -", true),
            ("4k3/8/8/8/8/8/8/2B1K3 w - -", true),
            ("4k3/8/8/3n4/8/8/8/4K3 w - -", true),
            ("4k3/8/8/8/8/8/8/3QK3 w - -", false),
            ("4k3/8/8/8/8/8/4P3/4K3 w - -", false),
            ("4k3/8/8/3n4/8/8/8/2B1K3 w - -", false),
        ] {
            let position = Position::from_fen(fen).unwrap();
            assert_eq!(position.insufficient_material(), expected, "{fen}");
            assert_eq!(position.is_draw(), expected, "{fen}");
        }
    }

    #[test]
    fn move_limit_draw() {
        let mut position = Position::initial();
        let shuffle = [("g1", "f3"), ("g8", "f6"), ("f3", "g1"), ("f6", "g8")];
        for (from, to) in shuffle.iter().cycle().take(MOVE_LIMIT - 1) {
            position.make_move(sq(from), sq(to)).unwrap();
        }
        assert!(!position.is_draw());
        assert_eq!(position.status(), None);

        position.make_move(sq("f6"), sq("g8")).unwrap();
        assert!(position.is_draw());
        assert_eq!(
            position.status(),
            Some(GameResult::Draw(DrawKind::FiftyMoveRule))
        );
    }
}
