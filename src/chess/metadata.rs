//! # Packed position metadata
//! Everything about a position that is not piece placement fits in one 32-bit
//! word.
//!
//! | bits  | width | field |
//! |-------|-------|-------|
//! | 0     | 1     | side to move, 1 for white |
//! | 1-4   | 4     | castling rights, `K` `Q` `k` `q` from low to high |
//! | 5-10  | 6     | en passant target square, 0 when there is none |
//! | 11-18 | 8     | halfmove clock |
//! | 19-31 | 13    | fullmove number |

use thiserror::Error;

use super::{castling_rights::CastlingRights, colour::Colour, square::Square};

/// Bit range of one field of the metadata word.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Field {
    shift: u32,
    width: u32,
}
impl Field {
    const fn mask(self) -> u32 {
        ((1u32 << self.width) - 1) << self.shift
    }

    const fn get(self, word: u32) -> u32 {
        (word & self.mask()) >> self.shift
    }

    const fn put(self, value: u32) -> u32 {
        (value << self.shift) & self.mask()
    }
}

const SIDE_TO_MOVE: Field = Field { shift: 0, width: 1 };
const CASTLING_RIGHTS: Field = Field { shift: 1, width: 4 };
const EN_PASSANT: Field = Field { shift: 5, width: 6 };
const HALFMOVE_CLOCK: Field = Field { shift: 11, width: 8 };
const FULLMOVE_NUMBER: Field = Field {
    shift: 19,
    width: 13,
};

/// Packed metadata of a position.
///
/// Immutable: every constructor validates its inputs, and accessors only read.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "fen-compression",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "u32", into = "u32")
)]
pub struct Metadata(u32);
impl Metadata {
    /// Raw en passant value meaning that no en passant capture is possible.
    ///
    /// Square 0 is A8, which can never be an en passant target.
    pub const NO_EN_PASSANT: u8 = 0;
    /// Largest halfmove clock that fits in the word.
    pub const MAX_HALFMOVE_CLOCK: u8 = u8::MAX;
    /// Largest fullmove number that fits in the word.
    pub const MAX_FULLMOVE_NUMBER: u16 = (1 << 13) - 1;

    /// Packs metadata fields.
    ///
    /// Returns `None` if the fullmove number is 0 or above
    /// [`Metadata::MAX_FULLMOVE_NUMBER`], or if the en passant square is A8.
    /// # Example
    /// ```
    /// # use horsey_state::chess::{metadata::*, colour::*, castling_rights::*, square::*};
    /// let metadata = Metadata::new(Colour::Black, CastlingRights::full(), Some(Square::E3), 0, 1).unwrap();
    /// assert_eq!(metadata.side_to_move(), Colour::Black);
    /// assert_eq!(metadata.en_passant(), Some(Square::E3));
    /// ```
    pub fn new(
        side_to_move: Colour,
        castling_rights: CastlingRights,
        en_passant: Option<Square>,
        halfmove_clock: u8,
        fullmove_number: u16,
    ) -> Option<Self> {
        if fullmove_number == 0
            || fullmove_number > Self::MAX_FULLMOVE_NUMBER
            || en_passant == Some(Square::A8)
        {
            return None;
        }

        let en_passant = en_passant.map_or(Self::NO_EN_PASSANT, Square::index);
        Some(Self(
            SIDE_TO_MOVE.put(side_to_move.packed_bit() as u32)
                | CASTLING_RIGHTS.put(castling_rights.bits() as u32)
                | EN_PASSANT.put(en_passant as u32)
                | HALFMOVE_CLOCK.put(halfmove_clock as u32)
                | FULLMOVE_NUMBER.put(fullmove_number as u32),
        ))
    }

    /// Reinterprets a raw word.
    ///
    /// Returns `None` if the fullmove number field is 0.
    pub fn from_bits(bits: u32) -> Option<Self> {
        if FULLMOVE_NUMBER.get(bits) == 0 {
            None
        } else {
            Some(Self(bits))
        }
    }

    /// The raw 32-bit word.
    #[inline]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Side to move (bit 0).
    #[inline]
    pub const fn side_to_move(self) -> Colour {
        Colour::from_packed_bit(SIDE_TO_MOVE.get(self.0) as u8)
    }

    /// Castling rights (bits 1-4).
    #[inline]
    pub const fn castling_rights(self) -> CastlingRights {
        CastlingRights::from_bits(CASTLING_RIGHTS.get(self.0) as u8)
    }

    /// Raw en passant square index (bits 5-10), [`Metadata::NO_EN_PASSANT`] if
    /// there is none.
    ///
    /// Squares are numbered in FEN reading order like the cells: A8 is 0, H8 is
    /// 7, E3 is 44 and H1 is 63.
    #[inline]
    pub const fn en_passant_bits(self) -> u8 {
        EN_PASSANT.get(self.0) as u8
    }

    /// En passant target square, if any.
    #[inline]
    pub const fn en_passant(self) -> Option<Square> {
        match self.en_passant_bits() {
            Self::NO_EN_PASSANT => None,
            index => Square::from_index(index),
        }
    }

    /// Halfmove clock (bits 11-18).
    #[inline]
    pub const fn halfmove_clock(self) -> u8 {
        HALFMOVE_CLOCK.get(self.0) as u8
    }

    /// Fullmove number (bits 19-31).
    #[inline]
    pub const fn fullmove_number(self) -> u16 {
        FULLMOVE_NUMBER.get(self.0) as u16
    }
}

/// A raw metadata word holding a fullmove number of 0.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Error)]
#[error("Invalid metadata word {0:#010x}: the fullmove number is 0")]
pub struct InvalidMetadataBits(pub u32);

impl TryFrom<u32> for Metadata {
    type Error = InvalidMetadataBits;

    fn try_from(bits: u32) -> Result<Self, Self::Error> {
        Self::from_bits(bits).ok_or(InvalidMetadataBits(bits))
    }
}
impl From<Metadata> for u32 {
    fn from(metadata: Metadata) -> Self {
        metadata.bits()
    }
}
impl std::fmt::Debug for Metadata {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Metadata")
            .field("side_to_move", &self.side_to_move())
            .field("castling_rights", &self.castling_rights())
            .field("en_passant", &self.en_passant())
            .field("halfmove_clock", &self.halfmove_clock())
            .field("fullmove_number", &self.fullmove_number())
            .finish()
    }
}
