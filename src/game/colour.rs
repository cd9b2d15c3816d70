//! Colours for each players and their pieces.

/// Number of different colours (2).
pub const NUM_COLOURS: usize = 2;

/// Colour enumeration.
#[repr(u8)]
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Colour {
    White = 0,
    Black = 1,
}
impl Colour {
    /// Both colours, white first.
    pub const COLOURS: [Self; NUM_COLOURS] = [Colour::White, Colour::Black];

    /// Inverts the colour in place.
    /// # Example
    /// ```
    /// # use vintage_chess::game::colour::Colour;
    /// let mut side_to_move = Colour::White;
    /// side_to_move.invert();
    /// assert_eq!(side_to_move, Colour::Black);
    /// ```
    #[inline]
    pub fn invert(&mut self) {
        *self = self.inverse()
    }

    /// Returns the inverse of this colour.
    /// # Example
    /// ```
    /// # use vintage_chess::game::colour::Colour;
    /// assert_eq!(Colour::White.inverse(), Colour::Black);
    /// ```
    #[inline]
    pub const fn inverse(&self) -> Self {
        if self.is_black() {
            Colour::White
        } else {
            Colour::Black
        }
    }

    /// Checks if the colour variant is white.
    #[inline]
    pub const fn is_white(&self) -> bool {
        matches!(self, Colour::White)
    }

    /// Checks if the colour variant is black.
    #[inline]
    pub const fn is_black(&self) -> bool {
        matches!(self, Colour::Black)
    }

    /// Row delta of a pawn push for this colour. White pawns walk towards row 0.
    #[inline]
    pub const fn forward(&self) -> i8 {
        if self.is_white() {
            -1
        } else {
            1
        }
    }

    /// Row holding this colour's king and rooks at the start of the game.
    #[inline]
    pub const fn back_rank(&self) -> u8 {
        if self.is_white() {
            7
        } else {
            0
        }
    }

    /// Row holding this colour's pawns at the start of the game.
    #[inline]
    pub const fn pawn_rank(&self) -> u8 {
        if self.is_white() {
            6
        } else {
            1
        }
    }

    /// Row on which this colour's pawns promote.
    #[inline]
    pub const fn promotion_rank(&self) -> u8 {
        self.inverse().back_rank()
    }
}
impl std::fmt::Display for Colour {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", if self.is_black() { "Black" } else { "White" })
    }
}
impl From<bool> for Colour {
    fn from(value: bool) -> Self {
        if value {
            Self::Black
        } else {
            Self::White
        }
    }
}
