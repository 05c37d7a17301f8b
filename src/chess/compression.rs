//! # Streaming compression of packed positions
//! Positions can be written to and read from bit streams, which is convenient for
//! storing large datasets.
//!
//! Layout, most significant bit first:
//! - the 32-bit metadata word,
//! - the number of pieces on 6 bits,
//! - for each piece, in reading order, its square on 6 bits, its colour on 1 bit
//!   and its kind on 3 bits.
//!
//! The reserved per-piece flags are not written since they are always zero.

use std::io::{Error, ErrorKind};

use bitstream_io::{BitRead, BitWrite};

use super::{
    cell::PackedCell,
    colour::Colour,
    metadata::Metadata,
    piece::{Piece, PieceKind},
    position::{CellList, PackedPosition, MAX_CELLS},
    square::Square,
};

impl PackedPosition {
    /// Compresses a position for efficient storage.
    pub fn compress<W: BitWrite>(&self, stream: &mut W) -> std::io::Result<()> {
        stream.write(32, self.metadata().bits())?;
        stream.write(6, self.len() as u8)?;
        for (square, piece) in self.pieces() {
            stream.write(6, square.index())?;
            stream.write_bit(piece.colour.is_white())?;
            stream.write(3, piece.kind as u8)?;
        }
        Ok(())
    }

    /// Decompresses a position from a packed storage.
    ///
    /// Fails with [`ErrorKind::InvalidData`] if the stream does not hold a
    /// position written by [`PackedPosition::compress`].
    pub fn decompress<R: BitRead>(stream: &mut R) -> std::io::Result<Self> {
        let metadata = Metadata::from_bits(stream.read::<u32>(32)?)
            .ok_or_else(|| invalid_data("fullmove number of 0"))?;

        let len = stream.read::<u8>(6)? as usize;
        if len > MAX_CELLS {
            return Err(invalid_data("more than 32 pieces"));
        }

        let mut cells = CellList::new();
        let mut previous: Option<Square> = None;
        for _ in 0..len {
            let square = Square::from_index(stream.read::<u8>(6)?)
                .ok_or_else(|| invalid_data("square out of the board"))?;
            if previous.is_some_and(|previous| previous >= square) {
                return Err(invalid_data("pieces are not in reading order"));
            }
            previous = Some(square);

            let colour = if stream.read_bit()? {
                Colour::White
            } else {
                Colour::Black
            };
            let kind = PieceKind::from_bits(stream.read::<u8>(3)?)
                .ok_or_else(|| invalid_data("unknown piece kind"))?;

            cells
                .push(PackedCell::new(square, Piece::new(kind, colour).code()))
                .map_err(|_| invalid_data("more than 32 pieces"))?;
        }

        Ok(Self::from_parts(metadata, &cells))
    }
}

fn invalid_data(reason: &str) -> Error {
    Error::new(
        ErrorKind::InvalidData,
        format!("invalid compressed position: {reason}"),
    )
}
