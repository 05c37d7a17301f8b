//! # Packed piece cells
//! One occupied square in 16 bits.
//!
//! | bits  | field |
//! |-------|-------|
//! | 0-5   | reserved per-piece flags, always zero for now |
//! | 6-11  | square index |
//! | 12    | colour, 1 for white |
//! | 13-15 | [`PieceKind`], 0 for an empty cell |

use thiserror::Error;

use super::{
    colour::Colour,
    piece::{Piece, PieceCode, PieceKind},
    square::Square,
};

/// A square and the piece standing on it, or nothing.
///
/// The default cell is empty and is all zeroes.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "fen-compression",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "u16", into = "u16")
)]
pub struct PackedCell(u16);
impl PackedCell {
    const FLAGS_MASK: u16 = 0x003F;
    const SQUARE_SHIFT: u16 = 6;
    const SQUARE_MASK: u16 = 0x003F;
    // The piece code sits right above the square, colour bit first.
    const CODE_SHIFT: u16 = 12;
    const KIND_SHIFT: u16 = 13;
    const KIND_MASK: u16 = 0x0007;

    /// The empty cell.
    pub const EMPTY: Self = Self(0);

    /// Packs an occupied square.
    pub const fn new(square: Square, code: PieceCode) -> Self {
        Self(
            ((code.bits() as u16) << Self::CODE_SHIFT)
                | ((square.index() as u16) << Self::SQUARE_SHIFT),
        )
    }

    /// Reinterprets a raw value.
    ///
    /// Returns `None` if the reserved flags are set, if the piece kind bits hold
    /// the unused value 7, or if an empty cell carries a square or colour.
    pub const fn from_bits(bits: u16) -> Option<Self> {
        let kind = (bits >> Self::KIND_SHIFT) & Self::KIND_MASK;
        if bits & Self::FLAGS_MASK != 0 || kind == 7 || (kind == 0 && bits != 0) {
            None
        } else {
            Some(Self(bits))
        }
    }

    /// The raw 16-bit value.
    #[inline]
    pub const fn bits(self) -> u16 {
        self.0
    }

    /// Returns `true` if no piece is stored in this cell.
    #[inline]
    pub const fn is_empty(self) -> bool {
        (self.0 >> Self::KIND_SHIFT) & Self::KIND_MASK == 0
    }

    /// Square of the piece (bits 6-11).
    ///
    /// Empty cells return `None`.
    #[inline]
    pub const fn square(self) -> Option<Square> {
        if self.is_empty() {
            None
        } else {
            Square::from_index(((self.0 >> Self::SQUARE_SHIFT) & Self::SQUARE_MASK) as u8)
        }
    }

    /// Colour of the piece (bit 12).
    #[inline]
    pub const fn colour(self) -> Option<Colour> {
        if self.is_empty() {
            None
        } else {
            Some(Colour::from_packed_bit((self.0 >> Self::CODE_SHIFT) as u8))
        }
    }

    /// Kind of the piece (bits 13-15).
    #[inline]
    pub const fn kind(self) -> Option<PieceKind> {
        PieceKind::from_bits(((self.0 >> Self::KIND_SHIFT) & Self::KIND_MASK) as u8)
    }

    /// The piece stored in the cell, if any.
    #[inline]
    pub fn piece(self) -> Option<Piece> {
        Some(Piece::new(self.kind()?, self.colour()?))
    }

    /// Reserved per-piece flags (bits 0-5).
    #[inline]
    pub const fn flags(self) -> u8 {
        (self.0 & Self::FLAGS_MASK) as u8
    }
}

/// A raw cell value rejected by [`PackedCell::from_bits`].
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Error)]
#[error("Invalid packed cell {0:#06x}")]
pub struct InvalidCellBits(pub u16);

impl TryFrom<u16> for PackedCell {
    type Error = InvalidCellBits;

    fn try_from(bits: u16) -> Result<Self, Self::Error> {
        Self::from_bits(bits).ok_or(InvalidCellBits(bits))
    }
}
impl From<PackedCell> for u16 {
    fn from(cell: PackedCell) -> Self {
        cell.bits()
    }
}
impl std::fmt::Debug for PackedCell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.piece(), self.square()) {
            (Some(piece), Some(square)) => write!(f, "{piece}@{square}"),
            _ => write!(f, "Empty"),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn empty_cell_is_zero() {
        assert_eq!(PackedCell::default(), PackedCell::EMPTY);
        assert_eq!(PackedCell::EMPTY.bits(), 0);
        assert!(PackedCell::EMPTY.is_empty());
        assert_eq!(PackedCell::EMPTY.piece(), None);
        assert_eq!(PackedCell::EMPTY.square(), None);
    }

    #[test]
    fn layout() {
        let white_rook = Piece::new(PieceKind::Rook, Colour::White);
        let cell = PackedCell::new(Square::A1, white_rook.code());
        assert_eq!(cell.bits(), (0b001 << 13) | (1 << 12) | (56 << 6));
        assert_eq!(cell.square(), Some(Square::A1));
        assert_eq!(cell.piece(), Some(white_rook));
        assert_eq!(cell.flags(), 0);

        // A black rook on A8 is still distinguishable from an empty cell.
        let black_rook = Piece::new(PieceKind::Rook, Colour::Black);
        let cell = PackedCell::new(Square::A8, black_rook.code());
        assert!(!cell.is_empty());
        assert_eq!(cell.bits(), 0b001 << 13);
        assert_eq!(cell.colour(), Some(Colour::Black));
    }

    #[test]
    fn every_piece_on_every_square() {
        for square in Square::squares_fen_iter() {
            for kind in PieceKind::iter() {
                for colour in [Colour::White, Colour::Black] {
                    let piece = Piece::new(kind, colour);
                    let cell = PackedCell::new(square, piece.code());
                    assert_eq!(cell.square(), Some(square));
                    assert_eq!(cell.piece(), Some(piece));
                    assert_eq!(PackedCell::from_bits(cell.bits()), Some(cell));
                }
            }
        }
    }

    #[test]
    fn reject_invalid_bits() {
        assert_eq!(PackedCell::from_bits(0), Some(PackedCell::EMPTY));
        assert_eq!(PackedCell::from_bits(0b111 << 13), None);
        assert_eq!(PackedCell::from_bits((0b001 << 13) | 1), None);
        assert_eq!(PackedCell::from_bits(5 << 6), None);
        assert_eq!(PackedCell::try_from(0xE001u16), Err(InvalidCellBits(0xE001)));
    }

    #[cfg(feature = "fen-compression")]
    #[test]
    fn deserialize_checks_bits() {
        let white_rook = Piece::new(PieceKind::Rook, Colour::White);
        let cell = PackedCell::new(Square::A1, white_rook.code());
        let json = serde_json::to_string(&cell).unwrap();
        assert_eq!(json, cell.bits().to_string());
        assert_eq!(serde_json::from_str::<PackedCell>(&json).unwrap(), cell);
        assert_eq!(
            serde_json::from_str::<PackedCell>("0").unwrap(),
            PackedCell::EMPTY
        );

        for bits in [
            // Kind 7 with a flag set.
            0xE001u16,
            // Kind 7 alone.
            0b111 << 13,
            // A rook with a flag set.
            (0b001 << 13) | 1,
            // An empty cell carrying a square.
            5 << 6,
        ] {
            assert!(
                serde_json::from_str::<PackedCell>(&bits.to_string()).is_err(),
                "{bits:#06x}"
            );
        }
    }
}
