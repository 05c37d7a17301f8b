//! Piece types encoding.
//!
//! Pieces are packed into 4-bit [`PieceCode`]s: the lowest bit holds the colour
//! (1 for white) and the three bits above it hold the [`PieceKind`]. The
//! [`PieceCodec`] maps FEN letters to those codes through a table computed at
//! compile time.

use super::colour::Colour;

/// Total number of different piece kinds (6).
pub const NUM_PIECES: usize = 6;

/// Symbols of the pieces, indexed by `colour * 6 + kind - 1`.
const PIECE_SYMBOLS: [char; 2 * NUM_PIECES] =
    ['R', 'N', 'B', 'Q', 'P', 'K', 'r', 'n', 'b', 'q', 'p', 'k'];

/// The kind of a piece, one of Rook, Knight, Bishop, Queen, Pawn or King.
///
/// The discriminant is the 3-bit value stored in packed cells. Zero is left out
/// so that an all-zero cell always reads as empty.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, PartialOrd, Ord)]
pub enum PieceKind {
    Rook = 1,
    Knight = 2,
    Bishop = 3,
    Queen = 4,
    Pawn = 5,
    King = 6,
}
impl PieceKind {
    /// All piece kinds.
    pub const PIECE_KINDS: [Self; NUM_PIECES] = [
        PieceKind::Rook,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Queen,
        PieceKind::Pawn,
        PieceKind::King,
    ];

    /// Piece kind from its 3-bit packed value.
    ///
    /// Returns `None` for 0 (empty) and 7 (unused).
    #[inline]
    pub const fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            1..=6 => Some(Self::PIECE_KINDS[bits as usize - 1]),
            _ => None,
        }
    }

    /// Iterator over all piece kinds.
    pub fn iter() -> impl Iterator<Item = Self> {
        Self::PIECE_KINDS.into_iter()
    }
}
impl std::fmt::Display for PieceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", PIECE_SYMBOLS[NUM_PIECES + *self as usize - 1])
    }
}

/// Complete set of information for identifying a piece.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Piece {
    pub kind: PieceKind,
    pub colour: Colour,
}
impl Piece {
    /// Creates a new `kind` piece of the given `colour`.
    pub const fn new(kind: PieceKind, colour: Colour) -> Self {
        Self { kind, colour }
    }

    /// Returns the piece's FEN symbol.
    /// # Example
    /// ```
    /// # use horsey_state::chess::piece::*;
    /// # use horsey_state::chess::colour::*;
    /// assert_eq!(Piece::new(PieceKind::Pawn, Colour::Black).symbol(), 'p');
    /// assert_eq!(Piece::new(PieceKind::Knight, Colour::White).symbol(), 'N');
    /// ```
    pub fn symbol(&self) -> char {
        PIECE_SYMBOLS[self.colour as usize * NUM_PIECES + self.kind as usize - 1]
    }

    /// Returns the packed code of this piece.
    pub const fn code(self) -> PieceCode {
        PieceCode::new(self)
    }
}
impl std::fmt::Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A piece packed on 4 bits.
///
/// | bits | field  |
/// |------|--------|
/// | 0    | colour, 1 for white |
/// | 1-3  | [`PieceKind`] |
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub struct PieceCode(u8);
impl PieceCode {
    const COLOUR_MASK: u8 = 0b0001;
    const KIND_SHIFT: u8 = 1;
    const KIND_MASK: u8 = 0b0111;

    /// Packs a piece.
    pub const fn new(piece: Piece) -> Self {
        Self(((piece.kind as u8) << Self::KIND_SHIFT) | piece.colour.packed_bit())
    }

    /// Raw 4-bit value.
    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Colour of the piece (bit 0).
    #[inline]
    pub const fn colour(self) -> Colour {
        Colour::from_packed_bit(self.0 & Self::COLOUR_MASK)
    }

    /// Kind of the piece (bits 1-3).
    #[inline]
    pub fn kind(self) -> PieceKind {
        // Codes are only built from a valid `Piece`.
        match PieceKind::from_bits((self.0 >> Self::KIND_SHIFT) & Self::KIND_MASK) {
            Some(kind) => kind,
            None => unreachable!("piece code {:#06b} holds no piece kind", self.0),
        }
    }

    /// Unpacks the code into a piece.
    #[inline]
    pub fn decode(self) -> Piece {
        Piece::new(self.kind(), self.colour())
    }

    /// FEN letter of the packed piece.
    #[inline]
    pub fn symbol(self) -> char {
        self.decode().symbol()
    }
}

/// Lookup table from ASCII FEN letters to [`PieceCode`]s.
///
/// The table is immutable once built. Use the shared [`PIECE_CODEC`] rather than
/// building new ones.
#[derive(Clone, Debug)]
pub struct PieceCodec {
    // Zero marks a character that is not a piece letter.
    table: [u8; 128],
}
impl PieceCodec {
    /// Builds the table for the twelve standard FEN letters.
    pub const fn new() -> Self {
        let mut table = [0u8; 128];
        let mut colour_index = 0;
        while colour_index < 2 {
            let colour = Colour::from_packed_bit(colour_index as u8 ^ 1);
            let mut kind_index = 0;
            while kind_index < NUM_PIECES {
                let kind = PieceKind::PIECE_KINDS[kind_index];
                let symbol = PIECE_SYMBOLS[colour_index * NUM_PIECES + kind_index];
                table[symbol as usize] = PieceCode::new(Piece::new(kind, colour)).0;
                kind_index += 1;
            }
            colour_index += 1;
        }
        Self { table }
    }

    /// Looks up the code of a FEN piece letter.
    ///
    /// Uppercase letters are white pieces and lowercase ones are black. Returns
    /// `None` for anything that is not one of `RNBQPKrnbqpk`.
    /// # Example
    /// ```
    /// # use horsey_state::chess::piece::*;
    /// # use horsey_state::chess::colour::*;
    /// let code = PIECE_CODEC.encode('R').unwrap();
    /// assert_eq!(code.decode(), Piece::new(PieceKind::Rook, Colour::White));
    /// assert_eq!(PIECE_CODEC.encode('x'), None);
    /// assert_eq!(PIECE_CODEC.encode('8'), None);
    /// ```
    #[inline]
    pub fn encode(&self, c: char) -> Option<PieceCode> {
        match self.table.get(c as usize) {
            Some(&code) if code != 0 => Some(PieceCode(code)),
            _ => None,
        }
    }
}
impl Default for PieceCodec {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared piece letter table.
pub static PIECE_CODEC: PieceCodec = PieceCodec::new();
