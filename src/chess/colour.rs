//! Colours for each players and their pieces.

/// Number of different colours (2).
pub const NUM_COLOURS: usize = 2;

/// Colour enumeration.
#[repr(u8)]
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug, Hash)]
pub enum Colour {
    White = 0,
    Black = 1,
}
impl Colour {
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

    /// Single bit used for this colour in packed words: 1 for white, 0 for black.
    #[inline]
    pub(crate) const fn packed_bit(self) -> u8 {
        match self {
            Colour::White => 1,
            Colour::Black => 0,
        }
    }

    /// Inverse of [`Colour::packed_bit`], only the lowest bit is considered.
    #[inline]
    pub(crate) const fn from_packed_bit(bit: u8) -> Self {
        if bit & 1 == 1 {
            Colour::White
        } else {
            Colour::Black
        }
    }

    /// FEN symbol of the colour as side to move.
    pub const fn symbol(self) -> char {
        match self {
            Colour::White => 'w',
            Colour::Black => 'b',
        }
    }
}
impl std::fmt::Display for Colour {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn packed_bit_is_one_for_white() {
        assert_eq!(Colour::White.packed_bit(), 1);
        assert_eq!(Colour::Black.packed_bit(), 0);
        assert_eq!(Colour::from_packed_bit(1), Colour::White);
        assert_eq!(Colour::from_packed_bit(0), Colour::Black);
    }
}
