//! # Core chess state
//! This module contains the packed position representation and everything needed
//! to build it from FEN strings: colours, squares, pieces, castling rights, and
//! the position history.

pub mod castling_rights;
pub mod cell;
pub mod colour;
#[cfg(feature = "fen-compression")]
pub mod compression;
pub mod fen;
pub mod history;
pub mod metadata;
pub mod piece;
pub mod position;
pub mod square;
mod zobrist;
