//! Piece types encoding.

use std::str::FromStr;

use thiserror::Error;

use super::colour::Colour;

/// Total number of different piece kinds (6).
pub const NUM_PIECES: usize = 6;

const PIECE_SYMBOLS: [char; 12] = ['P', 'N', 'B', 'R', 'Q', 'K', 'p', 'n', 'b', 'r', 'q', 'k'];
const PIECE_SYMBOLS_UNICODE: [char; 12] =
    ['♙', '♘', '♗', '♖', '♕', '♔', '♟', '♞', '♝', '♜', '♛', '♚'];

/// A piece sitting on the board: its kind, colour, and whether it has moved
/// since the game started.
///
/// # Parsing
/// Pieces can be parsed from their symbol ('p', 'n', 'b', 'r', 'q', 'k' for black,
/// uppercase for white) or unicode symbols. Parsed pieces have not moved.
/// ```
/// # use vintage_chess::game::piece::*;
/// # use vintage_chess::game::colour::*;
/// assert_eq!("p".parse(), Ok(Piece::new(PieceKind::Pawn, Colour::Black)));
/// assert_eq!("♕".parse(), Ok(Piece::new(PieceKind::Queen, Colour::White)));
/// ```
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Piece {
    pub kind: PieceKind,
    pub colour: Colour,
    pub moved: bool,
}
impl Piece {
    /// Creates a new `kind` piece of the given `colour` that has not moved yet.
    pub const fn new(kind: PieceKind, colour: Colour) -> Self {
        Self {
            kind,
            colour,
            moved: false,
        }
    }

    /// Returns the same piece, flagged as having moved.
    pub const fn with_moved(self, moved: bool) -> Self {
        Self { moved, ..self }
    }

    /// Checks if two pieces share kind and colour, regardless of their history.
    pub fn same_identity(&self, other: &Piece) -> bool {
        self.kind == other.kind && self.colour == other.colour
    }

    /// Returns the piece's symbol.
    /// # Example
    /// ```
    /// # use vintage_chess::game::piece::*;
    /// # use vintage_chess::game::colour::*;
    /// assert_eq!(Piece::new(PieceKind::Pawn, Colour::Black).symbol(), 'p');
    /// ```
    pub fn symbol(&self) -> char {
        PIECE_SYMBOLS[self.colour as usize * NUM_PIECES + self.kind as usize]
    }

    /// Returns the piece's Unicode symbol.
    pub fn unicode_symbol(&self) -> char {
        PIECE_SYMBOLS_UNICODE[self.colour as usize * NUM_PIECES + self.kind as usize]
    }
}
impl std::fmt::Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Error)]
pub enum PieceParseError {
    #[error("{0} is not a valid piece symbol")]
    InvalidPieceSymbol(char),
    #[error("Empty input")]
    EmptyInput,
    #[error("A piece can only be one character long")]
    InputTooLong,
    #[error("{0} is not a valid promotion target")]
    InvalidPromotionTarget(PieceKind),
}

/// Reads exactly one character out of `s`.
fn single_char(s: &str) -> Result<char, PieceParseError> {
    let mut chars = s.chars();
    let symbol = chars.next().ok_or(PieceParseError::EmptyInput)?;
    if chars.next().is_some() {
        return Err(PieceParseError::InputTooLong);
    }
    Ok(symbol)
}

impl TryFrom<char> for Piece {
    type Error = PieceParseError;

    fn try_from(symbol: char) -> Result<Self, Self::Error> {
        let colour = Colour::from(symbol.is_ascii_lowercase() || ('♚'..='♟').contains(&symbol));
        Ok(Self::new(PieceKind::try_from(symbol)?, colour))
    }
}
impl FromStr for Piece {
    type Err = PieceParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(single_char(s)?)
    }
}

/// The kind of a piece, one of Pawn, Knight, Bishop, Rook, Queen or King.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PieceKind {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    King = 5,
}
impl PieceKind {
    /// All piece kinds.
    pub const PIECE_KINDS: [Self; NUM_PIECES] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// Only minor pieces (knights and bishops).
    pub const MINOR_PIECES: [Self; 2] = [Self::Knight, Self::Bishop];

    /// Checks if this piece kind is a diagonal slider (bishops and queens).
    #[inline(always)]
    pub fn is_diagonal_slider(self) -> bool {
        matches!(self, PieceKind::Bishop | PieceKind::Queen)
    }

    /// Checks if this piece kind is an orthogonal slider (rooks and queens).
    #[inline(always)]
    pub fn is_orthogonal_slider(self) -> bool {
        matches!(self, PieceKind::Rook | PieceKind::Queen)
    }

    /// Checks if this piece kind is a minor piece (knights and bishops).
    pub fn is_minor(self) -> bool {
        Self::MINOR_PIECES.contains(&self)
    }

    /// Iterator over all piece kinds.
    pub fn iter() -> impl Iterator<Item = Self> {
        Self::PIECE_KINDS.into_iter()
    }

    /// Lowercase english name of the piece kind.
    pub fn name(self) -> &'static str {
        match self {
            Self::Pawn => "pawn",
            Self::Knight => "knight",
            Self::Bishop => "bishop",
            Self::Rook => "rook",
            Self::Queen => "queen",
            Self::King => "king",
        }
    }
}
impl std::fmt::Display for PieceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", PIECE_SYMBOLS[NUM_PIECES + *self as usize])
    }
}
impl TryFrom<char> for PieceKind {
    type Error = PieceParseError;

    fn try_from(symbol: char) -> Result<Self, Self::Error> {
        Ok(match symbol {
            'p' | '♟' | 'P' | '♙' => PieceKind::Pawn,
            'n' | '♞' | 'N' | '♘' => PieceKind::Knight,
            'b' | '♝' | 'B' | '♗' => PieceKind::Bishop,
            'r' | '♜' | 'R' | '♖' => PieceKind::Rook,
            'q' | '♛' | 'Q' | '♕' => PieceKind::Queen,
            'k' | '♚' | 'K' | '♔' => PieceKind::King,
            _ => Err(PieceParseError::InvalidPieceSymbol(symbol))?,
        })
    }
}
impl FromStr for PieceKind {
    type Err = PieceParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(single_char(s)?)
    }
}

/// Special type that only contains valid promotion targets
/// (knight, bishop, rook and queen).
///
/// Pawns reaching the last rank become queens unless the caller asks for one
/// of the other targets explicitly.
#[derive(Clone, Copy, Debug, Default, Hash, Eq, PartialEq, PartialOrd, Ord)]
pub enum PromotionTarget {
    Knight,
    Bishop,
    Rook,
    #[default]
    Queen,
}
impl PromotionTarget {
    /// Converts a piece kind into a promotion target if such a transformation is valid.
    pub fn from_piece_kind(kind: PieceKind) -> Option<Self> {
        match kind {
            PieceKind::Knight => Some(Self::Knight),
            PieceKind::Bishop => Some(Self::Bishop),
            PieceKind::Rook => Some(Self::Rook),
            PieceKind::Queen => Some(Self::Queen),
            PieceKind::Pawn | PieceKind::King => None,
        }
    }

    /// Converts this promotion target to the corresponding piece kind.
    pub fn to_piece_kind(self) -> PieceKind {
        PieceKind::from(self)
    }
}
impl From<PromotionTarget> for PieceKind {
    fn from(value: PromotionTarget) -> Self {
        match value {
            PromotionTarget::Knight => PieceKind::Knight,
            PromotionTarget::Bishop => PieceKind::Bishop,
            PromotionTarget::Rook => PieceKind::Rook,
            PromotionTarget::Queen => PieceKind::Queen,
        }
    }
}
impl FromStr for PromotionTarget {
    type Err = PieceParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let kind: PieceKind = s.parse()?;
        Self::from_piece_kind(kind).ok_or(PieceParseError::InvalidPromotionTarget(kind))
    }
}
impl std::fmt::Display for PromotionTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_piece_kind())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parse_pieces() {
        assert_eq!(
            "K".parse::<Piece>(),
            Ok(Piece::new(PieceKind::King, Colour::White))
        );
        assert_eq!(
            "♞".parse::<Piece>(),
            Ok(Piece::new(PieceKind::Knight, Colour::Black))
        );
        assert_eq!("x".parse::<Piece>(), Err(PieceParseError::InvalidPieceSymbol('x')));
        assert_eq!("".parse::<Piece>(), Err(PieceParseError::EmptyInput));
        assert_eq!("qq".parse::<Piece>(), Err(PieceParseError::InputTooLong));
    }

    #[test]
    fn promotion_targets() {
        assert_eq!("n".parse(), Ok(PromotionTarget::Knight));
        assert_eq!(
            "k".parse::<PromotionTarget>(),
            Err(PieceParseError::InvalidPromotionTarget(PieceKind::King))
        );
        assert_eq!(PromotionTarget::default().to_piece_kind(), PieceKind::Queen);
    }

    #[test]
    fn moved_flag_is_not_identity() {
        let rook = Piece::new(PieceKind::Rook, Colour::White);
        assert!(rook.same_identity(&rook.with_moved(true)));
        assert_ne!(rook, rook.with_moved(true));
    }
}
