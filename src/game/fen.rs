//! # FEN string utilities
//!
//! Used to set a game up from an arbitrary position. The halfmove clock and
//! fullmove counter are validated when present, but not kept.

use std::str::FromStr;

use thiserror::Error;

use super::{
    board::Board,
    castling_rights::{CastlingRights, CastlingRightsParseError},
    colour::Colour,
    piece::{Piece, PieceKind, PieceParseError},
    square::{Square, SquareParseError},
};

/// FEN parsing errors.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Error)]
pub enum FenError {
    #[error("FEN string missing the {0} section")]
    Incomplete(&'static str),
    #[error("Unexpected character in the piece section: {0}")]
    InvalidPiece(#[from] PieceParseError),
    #[error("Piece section row {row} defines {squares} squares out of 8")]
    BadRowLength { row: u8, squares: u8 },
    #[error("Piece section defines {0} rows out of 8")]
    BadRowCount(u8),
    #[error("Side to move should be w or b, got {0}")]
    InvalidSideToMove(char),
    #[error("Invalid castling rights: {0}")]
    InvalidCastlingRights(#[from] CastlingRightsParseError),
    #[error("Invalid en passant square: {0}")]
    InvalidEnPassant(#[from] SquareParseError),
    #[error("Invalid move counter")]
    InvalidCounter,
    #[error("Trailing data after the move counters")]
    TrailingData,
    #[error("{0} has no king")]
    MissingKing(Colour),
    #[error("{0} has more than one king")]
    TooManyKings(Colour),
}

/// A parsed FEN string.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct Fen {
    pub board: Board,
    pub side_to_move: Colour,
    pub castling_rights: CastlingRights,
    pub en_passant: Option<Square>,
}
impl Fen {
    /// Parses a FEN string.
    pub fn parse(fen: &str) -> Result<Self, FenError> {
        fen.parse()
    }
}

/// Whether a piece of this kind found on `square` is away from every square it
/// could have started the game on.
fn is_away_from_home(kind: PieceKind, colour: Colour, square: Square) -> bool {
    let home_cols: &[u8] = match kind {
        PieceKind::Pawn => return square.row() != colour.pawn_rank(),
        PieceKind::Rook => &[0, 7],
        PieceKind::Knight => &[1, 6],
        PieceKind::Bishop => &[2, 5],
        PieceKind::Queen => &[3],
        PieceKind::King => &[4],
    };
    square.row() != colour.back_rank() || !home_cols.contains(&square.col())
}

fn parse_placement(section: &str) -> Result<Board, FenError> {
    let mut board = Board::empty();
    let rows: Vec<&str> = section.split('/').collect();
    if rows.len() != 8 {
        return Err(FenError::BadRowCount(rows.len() as u8));
    }

    for (row, description) in rows.into_iter().enumerate() {
        let row = row as u8;
        let mut col = 0u8;
        for c in description.chars() {
            if let Some(skip) = c.to_digit(10).filter(|d| (1..=8).contains(d)) {
                col += skip as u8;
            } else {
                let piece = Piece::try_from(c)?;
                let Some(square) = Square::new(row, col) else {
                    return Err(FenError::BadRowLength { row, squares: col + 1 });
                };
                let moved = is_away_from_home(piece.kind, piece.colour, square);
                board.put(square, piece.with_moved(moved));
                col += 1;
            }
            if col > 8 {
                return Err(FenError::BadRowLength { row, squares: col });
            }
        }
        if col != 8 {
            return Err(FenError::BadRowLength { row, squares: col });
        }
    }

    Ok(board)
}

impl FromStr for Fen {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut sections = s.split_whitespace();

        let board = parse_placement(sections.next().ok_or(FenError::Incomplete("pieces"))?)?;

        let side_to_move = match sections.next().ok_or(FenError::Incomplete("side to move"))? {
            "w" => Colour::White,
            "b" => Colour::Black,
            other => return Err(FenError::InvalidSideToMove(other.chars().next().unwrap_or(' '))),
        };

        let castling_rights = sections
            .next()
            .ok_or(FenError::Incomplete("castling rights"))?
            .parse()?;

        let en_passant = match sections.next().ok_or(FenError::Incomplete("en passant"))? {
            "-" => None,
            square => Some(square.parse()?),
        };

        // Move counters are optional.
        for counter in sections.by_ref().take(2) {
            counter.parse::<u16>().map_err(|_| FenError::InvalidCounter)?;
        }
        if sections.next().is_some() {
            return Err(FenError::TrailingData);
        }

        Ok(Self {
            board,
            side_to_move,
            castling_rights,
            en_passant,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn initial_position() {
        let fen = Fen::parse("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1").unwrap();
        assert_eq!(fen.board, Board::initial());
        assert_eq!(fen.side_to_move, Colour::White);
        assert_eq!(fen.castling_rights, CastlingRights::full());
        assert_eq!(fen.en_passant, None);
    }

    #[test]
    fn counters_are_optional() {
        let fen = Fen::parse("4k3/8/8/8/4Pp2/8/8/4K3 b - e3").unwrap();
        assert_eq!(fen.en_passant, Some(Square::at(5, 4)));
        assert_eq!(fen.side_to_move, Colour::Black);
        assert_eq!(
            fen.board.piece_on(Square::at(4, 4)),
            Some(Piece::new(PieceKind::Pawn, Colour::White).with_moved(true))
        );
    }

    #[test]
    fn malformed() {
        assert_eq!(Fen::parse(""), Err(FenError::Incomplete("pieces")));
        assert_eq!(
            Fen::parse("8/8/8/8/8/8/8 w - -"),
            Err(FenError::BadRowCount(7))
        );
        assert_eq!(
            Fen::parse("9/8/8/8/8/8/8/8 w - -"),
            Err(FenError::InvalidPiece(PieceParseError::InvalidPieceSymbol('9')))
        );
        assert_eq!(
            Fen::parse("ppppppppp/8/8/8/8/8/8/8 w - -"),
            Err(FenError::BadRowLength { row: 0, squares: 9 })
        );
        assert_eq!(
            Fen::parse("8/8/8/8/8/8/8/8 x - -"),
            Err(FenError::InvalidSideToMove('x'))
        );
        assert_eq!(
            Fen::parse("8/8/8/8/8/8/8/8 w - - 0 1 extra"),
            Err(FenError::TrailingData)
        );
    }
}
