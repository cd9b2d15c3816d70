//! # Representation of castling rights

use std::str::FromStr;

use thiserror::Error;

use super::{action::CastleSide, colour::Colour};

/// Efficient representation of castling rights.
///
/// Once a right is revoked during play it is never granted again; only undoing
/// the move that revoked it brings it back, by restoring the copy saved in the
/// history.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CastlingRights(u8);
impl CastlingRights {
    const KINGSIDE_BLACK: u8 = 0b0001;
    const QUEENSIDE_BLACK: u8 = 0b0010;
    const KINGSIDE_WHITE: u8 = 0b0100;
    const QUEENSIDE_WHITE: u8 = 0b1000;
    const FULL: u8 =
        Self::KINGSIDE_BLACK | Self::KINGSIDE_WHITE | Self::QUEENSIDE_BLACK | Self::QUEENSIDE_WHITE;
    const EMPTY: u8 = 0;

    /// Full castling rights for both sides.
    pub const fn full() -> Self {
        Self(Self::FULL)
    }

    /// No castling rights for any sides.
    pub const fn none() -> Self {
        Self(Self::EMPTY)
    }

    /// Returns `true` if none of the sides can castle.
    pub const fn is_none(self) -> bool {
        self.0 == Self::EMPTY
    }

    const fn flag(side: CastleSide, colour: Colour) -> u8 {
        match (side, colour) {
            (CastleSide::KingSide, Colour::White) => Self::KINGSIDE_WHITE,
            (CastleSide::KingSide, Colour::Black) => Self::KINGSIDE_BLACK,
            (CastleSide::QueenSide, Colour::White) => Self::QUEENSIDE_WHITE,
            (CastleSide::QueenSide, Colour::Black) => Self::QUEENSIDE_BLACK,
        }
    }

    /// Checks if castling towards `side` is still allowed for a certain colour.
    #[inline(always)]
    pub const fn allowed(self, side: CastleSide, colour: Colour) -> bool {
        self.0 & Self::flag(side, colour) != 0
    }

    /// Checks if kingside castling is allowed for a certain colour.
    #[inline(always)]
    pub const fn kingside_castle_allowed(self, colour: Colour) -> bool {
        self.allowed(CastleSide::KingSide, colour)
    }

    /// Checks if queenside castling is allowed for a certain colour.
    #[inline(always)]
    pub const fn queenside_castle_allowed(self, colour: Colour) -> bool {
        self.allowed(CastleSide::QueenSide, colour)
    }

    /// Disallows castling towards `side` for a given colour.
    #[inline(always)]
    pub fn disallow_side(&mut self, side: CastleSide, colour: Colour) {
        self.0 &= !Self::flag(side, colour)
    }

    /// Disallows both castling moves for a given colour.
    pub fn disallow(&mut self, colour: Colour) {
        self.disallow_side(CastleSide::KingSide, colour);
        self.disallow_side(CastleSide::QueenSide, colour);
    }
}
impl Default for CastlingRights {
    fn default() -> Self {
        Self::full()
    }
}

#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Error)]
pub enum CastlingRightsParseError {
    #[error("{0} is not a valid castling right")]
    InvalidToken(char),
    #[error("Castling right {0} appears twice")]
    Duplicate(char),
    #[error("Empty castling rights")]
    EmptyInput,
}
impl FromStr for CastlingRights {
    type Err = CastlingRightsParseError;

    /// Parses the FEN castling field, either `-` or a subset of `KQkq`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "-" {
            return Ok(Self::none());
        }
        if s.is_empty() {
            return Err(CastlingRightsParseError::EmptyInput);
        }

        let mut rights = Self::none();
        for c in s.chars() {
            let flag = match c {
                'k' => Self::KINGSIDE_BLACK,
                'q' => Self::QUEENSIDE_BLACK,
                'K' => Self::KINGSIDE_WHITE,
                'Q' => Self::QUEENSIDE_WHITE,
                _ => return Err(CastlingRightsParseError::InvalidToken(c)),
            };
            if rights.0 & flag != 0 {
                return Err(CastlingRightsParseError::Duplicate(c));
            }
            rights.0 |= flag
        }
        Ok(rights)
    }
}
impl std::fmt::Display for CastlingRights {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_none() {
            return write!(f, "-");
        }

        if self.kingside_castle_allowed(Colour::White) {
            write!(f, "K")?
        }
        if self.queenside_castle_allowed(Colour::White) {
            write!(f, "Q")?
        }
        if self.kingside_castle_allowed(Colour::Black) {
            write!(f, "k")?
        }
        if self.queenside_castle_allowed(Colour::Black) {
            write!(f, "q")?
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parse_and_print() {
        for s in ["KQkq", "Kq", "k", "-"] {
            assert_eq!(s.parse::<CastlingRights>().unwrap().to_string(), s);
        }
        assert_eq!(
            "KK".parse::<CastlingRights>(),
            Err(CastlingRightsParseError::Duplicate('K'))
        );
        assert_eq!(
            "Kx".parse::<CastlingRights>(),
            Err(CastlingRightsParseError::InvalidToken('x'))
        );
    }

    #[test]
    fn revoking_one_side_keeps_the_other() {
        let mut rights = CastlingRights::full();
        rights.disallow_side(CastleSide::QueenSide, Colour::White);
        assert!(rights.kingside_castle_allowed(Colour::White));
        assert!(!rights.queenside_castle_allowed(Colour::White));
        assert!(rights.queenside_castle_allowed(Colour::Black));

        rights.disallow(Colour::Black);
        assert_eq!(rights.to_string(), "K");
    }
}
