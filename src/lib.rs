//! # Horsey state
//! Compact encoding of chess positions and their history.
//!
//! Positions come in as FEN strings and are stored as fixed-width
//! [`PackedPosition`](chess::position::PackedPosition)s: one 32-bit metadata word
//! and up to 32 packed piece cells. A [`PositionStore`](chess::history::PositionStore)
//! keeps every decoded position in an append-only arena addressed by index.
//!
//! ```
//! # use horsey_state::chess::history::PositionStore;
//! let mut store = PositionStore::new();
//! let index = store
//!     .load_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1")
//!     .unwrap();
//! assert_eq!(store.get_position(index).unwrap().len(), 32);
//! ```

pub mod chess;
pub mod parsing;
