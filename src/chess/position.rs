//! Fixed-width representation of a chess position.
//!
//! A [`PackedPosition`] is one [`Metadata`] word followed by 32 [`PackedCell`]s.
//! No sequence of legal moves can add pieces to the board, so 32 cells are
//! always enough. Occupied cells come first, in FEN reading order, and the
//! remaining ones are empty.

use thiserror::Error;

use super::{
    cell::PackedCell,
    colour::Colour,
    metadata::Metadata,
    piece::Piece,
    square::Square,
    zobrist,
};

/// Maximum number of pieces, and number of cells, in a packed position.
pub const MAX_CELLS: usize = 32;

/// Cells being filled by a decoder, in the order they will be stored.
pub(crate) type CellList = heapless::Vec<PackedCell, MAX_CELLS>;

/// A decoded chess position.
///
/// Once built a position is never modified: there are no mutable accessors.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "fen-compression", derive(serde::Serialize))]
pub struct PackedPosition {
    metadata: Metadata,
    cells: [PackedCell; MAX_CELLS],
}
impl PackedPosition {
    /// Assembles a position, padding the cells with empty ones.
    pub(crate) fn from_parts(metadata: Metadata, placed: &CellList) -> Self {
        let mut cells = [PackedCell::EMPTY; MAX_CELLS];
        cells[..placed.len()].copy_from_slice(placed);
        Self { metadata, cells }
    }

    /// Builds a position from raw cells.
    /// # Errors
    /// Fails if an occupied cell follows an empty one, or if the occupied cells
    /// are not in strictly increasing FEN reading order.
    pub fn from_cells(
        metadata: Metadata,
        cells: [PackedCell; MAX_CELLS],
    ) -> Result<Self, PositionError> {
        let len = cells
            .iter()
            .position(|cell| cell.is_empty())
            .unwrap_or(MAX_CELLS);
        if let Some(offset) = cells[len..].iter().position(|cell| !cell.is_empty()) {
            return Err(PositionError::CellAfterGap {
                index: len + offset,
            });
        }
        for (index, pair) in cells[..len].windows(2).enumerate() {
            if pair[0].square() >= pair[1].square() {
                return Err(PositionError::CellOutOfOrder { index: index + 1 });
            }
        }
        Ok(Self { metadata, cells })
    }

    /// Parses a FEN string into a packed position.
    /// # Errors
    /// Fails if the FEN string is malformed. The position it describes is not
    /// checked for legality.
    /// # Example
    /// ```
    /// # use horsey_state::chess::{position::*, square::*, piece::*, colour::*};
    /// let position = PackedPosition::from_fen("8/8/8/4k3/8/8/8/4K3 b - - 12 40").unwrap();
    /// assert_eq!(position.len(), 2);
    /// assert_eq!(position.piece_on(Square::E1), Some(Piece::new(PieceKind::King, Colour::White)));
    /// assert_eq!(position.metadata().halfmove_clock(), 12);
    /// ```
    pub fn from_fen(fen: &str) -> Result<Self, super::fen::FenError> {
        fen.parse()
    }

    /// Packed metadata of the position.
    #[inline]
    pub fn metadata(&self) -> Metadata {
        self.metadata
    }

    /// The occupied cells, in FEN reading order.
    #[inline]
    pub fn cells(&self) -> &[PackedCell] {
        &self.cells[..self.len()]
    }

    /// All cells, including the empty trailing ones.
    #[inline]
    pub fn raw_cells(&self) -> &[PackedCell; MAX_CELLS] {
        &self.cells
    }

    /// Number of pieces on the board.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells
            .iter()
            .position(|cell| cell.is_empty())
            .unwrap_or(MAX_CELLS)
    }

    /// Returns `true` if the board holds no piece at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells[0].is_empty()
    }

    /// Iterator over the pieces of the position and their squares, in FEN
    /// reading order.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.cells()
            .iter()
            .filter_map(|cell| Some((cell.square()?, cell.piece()?)))
    }

    /// Returns the piece on a given square, if any.
    ///
    /// This walks the cells, callers doing many lookups should index the
    /// result of [`PackedPosition::pieces`] themselves.
    pub fn piece_on(&self, square: Square) -> Option<Piece> {
        self.pieces()
            .find_map(|(sq, piece)| (sq == square).then_some(piece))
    }

    /// Side to move, from the metadata.
    #[inline]
    pub fn side_to_move(&self) -> Colour {
        self.metadata.side_to_move()
    }

    /// Zobrist hash of the position.
    ///
    /// Covers the pieces, side to move, castling rights and en passant file. The
    /// clocks are left out so that transpositions hash equally.
    pub fn zobrist_hash(&self) -> u64 {
        let mut hash = self
            .pieces()
            .fold(0, |hash, (square, piece)| hash ^ zobrist::piece_hash(piece, square));
        if self.metadata.side_to_move().is_black() {
            hash ^= zobrist::side_to_move_hash()
        }
        hash ^= zobrist::castling_rights_hash(self.metadata.castling_rights());
        if let Some(ep) = self.metadata.en_passant() {
            hash ^= zobrist::en_passant_file_hash(ep.file())
        }
        hash
    }
}

/// Raw cells that do not form a valid packed position.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Error)]
pub enum PositionError {
    #[error("Occupied cell {index} follows an empty cell")]
    CellAfterGap { index: usize },
    #[error("Cell {index} does not come after the previous cell in reading order")]
    CellOutOfOrder { index: usize },
}

#[cfg(feature = "fen-compression")]
impl<'de> serde::Deserialize<'de> for PackedPosition {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(serde::Deserialize)]
        #[serde(rename = "PackedPosition")]
        struct RawPosition {
            metadata: Metadata,
            cells: [PackedCell; MAX_CELLS],
        }

        let raw = RawPosition::deserialize(deserializer)?;
        Self::from_cells(raw.metadata, raw.cells).map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Debug for PackedPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PackedPosition")
            .field("metadata", &self.metadata)
            .field("cells", &self.cells())
            .finish()
    }
}
