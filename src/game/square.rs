//! Board coordinates and the directions pieces move along.
//!
//! Squares are addressed by `(row, col)` with row 0 being black's back rank and
//! row 7 white's back rank. Column 0 is the a-file.

use std::str::FromStr;

use thiserror::Error;

/// Number of squares on a board (64).
pub const NUM_SQUARES: usize = 64;

const FILES: [char; 8] = ['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h'];

/// A square of the board.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Square {
    row: u8,
    col: u8,
}
impl Square {
    /// Creates a square from its coordinates.
    ///
    /// Returns `None` if either coordinate is more than 7.
    #[inline]
    pub const fn new(row: u8, col: u8) -> Option<Self> {
        if row < 8 && col < 8 {
            Some(Self { row, col })
        } else {
            None
        }
    }

    /// Creates a square from coordinates known to be on the board.
    ///
    /// # Panics
    /// Panics if either coordinate is more than 7.
    #[inline]
    pub const fn at(row: u8, col: u8) -> Self {
        assert!(row < 8 && col < 8, "square out of the board");
        Self { row, col }
    }

    /// Creates a square from its index in a row-major grid.
    #[inline]
    pub const fn from_index(index: usize) -> Option<Self> {
        if index < NUM_SQUARES {
            Some(Self {
                row: (index / 8) as u8,
                col: (index % 8) as u8,
            })
        } else {
            None
        }
    }

    /// Row of the square, 0 being black's back rank.
    #[inline]
    pub const fn row(self) -> u8 {
        self.row
    }

    /// Column of the square, 0 being the a-file.
    #[inline]
    pub const fn col(self) -> u8 {
        self.col
    }

    /// Index of the square in a row-major grid.
    #[inline]
    pub const fn index(self) -> usize {
        self.row as usize * 8 + self.col as usize
    }

    /// File letter of the square.
    #[inline]
    pub const fn file(self) -> char {
        FILES[self.col as usize]
    }

    /// Rank number of the square as printed in algebraic notation (1 to 8).
    #[inline]
    pub const fn rank(self) -> u8 {
        8 - self.row
    }

    /// Translates this square by a given delta.
    ///
    /// Returns `None` if the translation would go out of the board.
    #[inline]
    pub const fn translate(self, delta: Delta) -> Option<Self> {
        let row = self.row as i8 + delta.rows;
        let col = self.col as i8 + delta.cols;
        if row < 0 || col < 0 {
            None
        } else {
            Self::new(row as u8, col as u8)
        }
    }

    /// An iterator over all squares, row by row starting from black's back rank.
    pub fn squares_iter() -> impl Iterator<Item = Self> {
        (0..NUM_SQUARES).filter_map(Self::from_index)
    }
}
impl std::fmt::Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.file(), self.rank())
    }
}

/// Errors returned when parsing a square from algebraic coordinates.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Error)]
pub enum SquareParseError {
    #[error("A square is written as a file and a rank, like e4")]
    BadLength,
    #[error("{0} is not a valid file")]
    InvalidFile(char),
    #[error("{0} is not a valid rank")]
    InvalidRank(char),
}
impl FromStr for Square {
    type Err = SquareParseError;

    /// Parses algebraic coordinates such as `e4`.
    /// ```
    /// # use vintage_chess::game::square::Square;
    /// let e4: Square = "e4".parse().unwrap();
    /// assert_eq!((e4.row(), e4.col()), (4, 4));
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(SquareParseError::BadLength);
        };
        let col = FILES
            .iter()
            .position(|&f| f == file.to_ascii_lowercase())
            .ok_or(SquareParseError::InvalidFile(file))?;
        let row = match rank.to_digit(10) {
            Some(r @ 1..=8) => 8 - r,
            _ => return Err(SquareParseError::InvalidRank(rank)),
        };
        Ok(Self::at(row as u8, col as u8))
    }
}

/// Deltas represent directions in which pieces can move.
///
/// North points towards black's back rank (row 0).
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub struct Delta {
    pub rows: i8,
    pub cols: i8,
}
impl Delta {
    pub const NORTH: Self = Self::new(-1, 0);
    pub const SOUTH: Self = Self::new(1, 0);
    pub const EAST: Self = Self::new(0, 1);
    pub const WEST: Self = Self::new(0, -1);
    pub const NORTH_EAST: Self = Self::new(-1, 1);
    pub const NORTH_WEST: Self = Self::new(-1, -1);
    pub const SOUTH_EAST: Self = Self::new(1, 1);
    pub const SOUTH_WEST: Self = Self::new(1, -1);

    pub const ORTHOGONAL_DELTAS: [Self; 4] = [Self::NORTH, Self::SOUTH, Self::EAST, Self::WEST];
    pub const DIAGONAL_DELTAS: [Self; 4] = [
        Self::NORTH_EAST,
        Self::NORTH_WEST,
        Self::SOUTH_EAST,
        Self::SOUTH_WEST,
    ];
    pub const QUEEN_DELTAS: [Self; 8] = [
        Self::NORTH,
        Self::SOUTH,
        Self::EAST,
        Self::WEST,
        Self::NORTH_EAST,
        Self::NORTH_WEST,
        Self::SOUTH_EAST,
        Self::SOUTH_WEST,
    ];
    pub const KNIGHT_DELTAS: [Self; 8] = [
        Self::new(-2, 1),
        Self::new(-2, -1),
        Self::new(2, 1),
        Self::new(2, -1),
        Self::new(-1, 2),
        Self::new(-1, -2),
        Self::new(1, 2),
        Self::new(1, -2),
    ];

    pub const fn new(rows: i8, cols: i8) -> Self {
        Self { rows, cols }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn algebraic_round_trip() {
        for square in Square::squares_iter() {
            assert_eq!(square.to_string().parse::<Square>(), Ok(square));
        }
        assert_eq!(Square::at(7, 0).to_string(), "a1");
        assert_eq!(Square::at(0, 7).to_string(), "h8");
    }

    #[test]
    fn bad_squares() {
        assert_eq!("e".parse::<Square>(), Err(SquareParseError::BadLength));
        assert_eq!("e44".parse::<Square>(), Err(SquareParseError::BadLength));
        assert_eq!("z4".parse::<Square>(), Err(SquareParseError::InvalidFile('z')));
        assert_eq!("e9".parse::<Square>(), Err(SquareParseError::InvalidRank('9')));
        assert_eq!("e0".parse::<Square>(), Err(SquareParseError::InvalidRank('0')));
    }

    #[test]
    fn translation_stays_on_board() {
        let a8 = Square::at(0, 0);
        assert_eq!(a8.translate(Delta::NORTH), None);
        assert_eq!(a8.translate(Delta::WEST), None);
        assert_eq!(a8.translate(Delta::SOUTH_EAST), Some(Square::at(1, 1)));
        assert_eq!(Square::at(7, 7).translate(Delta::new(2, 1)), None);
    }
}
