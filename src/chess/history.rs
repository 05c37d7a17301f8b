//! # Position history
//! An append-only arena of [`PackedPosition`]s.
//!
//! Positions are referred to by [`PositionIndex`] rather than by reference, which
//! keeps the store free to grow and lets higher layers record indices for undo or
//! transposition bookkeeping.

use thiserror::Error;

use super::{fen::FenError, position::PackedPosition};

/// Index of a position within a [`PositionStore`].
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, PartialOrd, Ord)]
pub struct PositionIndex(usize);
impl PositionIndex {
    /// Builds an index, which may or may not exist in a given store.
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Raw value of the index.
    pub const fn get(self) -> usize {
        self.0
    }
}
impl std::fmt::Display for PositionIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Errors returned by a [`PositionStore`].
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Error)]
pub enum StoreError {
    #[error("Malformed FEN string: {0}")]
    MalformedFen(#[from] FenError),
    #[error("Position {index} does not exist, the history holds {len} positions")]
    IndexOutOfRange { index: PositionIndex, len: usize },
}

/// Ordered history of decoded positions.
///
/// [`PositionStore::load_fen`] is the only way to modify the store and needs a
/// unique borrow, while reads share one. Wrap the store in a
/// [`RwLock`](std::sync::RwLock) to use it from several threads.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PositionStore {
    history: Vec<PackedPosition>,
}
impl PositionStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty store able to hold `capacity` positions before reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            history: Vec::with_capacity(capacity),
        }
    }

    /// Decodes a FEN string and appends the resulting position to the history.
    ///
    /// Returns the index of the new position. Nothing is appended if decoding
    /// fails.
    /// # Errors
    /// [`StoreError::MalformedFen`] if the string does not hold exactly six fields
    /// or if any of them is malformed.
    /// # Example
    /// ```
    /// # use horsey_state::chess::history::*;
    /// let mut store = PositionStore::new();
    /// assert!(store.load_fen("rnbqkbnr/pppppppp w KQkq - 0 1").is_err());
    /// assert_eq!(store.history_len(), 0);
    /// ```
    pub fn load_fen(&mut self, fen: &str) -> Result<PositionIndex, StoreError> {
        let position = match fen.parse::<PackedPosition>() {
            Ok(position) => position,
            Err(e) => {
                log::debug!("Rejected FEN {fen:?}: {e}");
                return Err(e.into());
            }
        };

        self.history.push(position);
        let index = PositionIndex(self.history.len() - 1);
        log::debug!("Stored position {index} from FEN {fen:?}");
        Ok(index)
    }

    /// Returns the position stored at a given index.
    /// # Errors
    /// [`StoreError::IndexOutOfRange`] if no position was stored at that index.
    pub fn get_position(&self, index: PositionIndex) -> Result<&PackedPosition, StoreError> {
        self.history
            .get(index.0)
            .ok_or(StoreError::IndexOutOfRange {
                index,
                len: self.history.len(),
            })
    }

    /// Number of stored positions.
    #[inline]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Returns `true` if no position was stored yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// The most recently stored position, if any.
    pub fn latest(&self) -> Option<(PositionIndex, &PackedPosition)> {
        let index = self.history.len().checked_sub(1)?;
        Some((PositionIndex(index), &self.history[index]))
    }

    /// Iterator over the stored positions, oldest first.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (PositionIndex, &PackedPosition)> {
        self.history
            .iter()
            .enumerate()
            .map(|(i, position)| (PositionIndex(i), position))
    }

    /// Counts the positions up to and including `index` that hash like the one
    /// at `index`. A position seen for the first time counts 1.
    /// # Errors
    /// [`StoreError::IndexOutOfRange`] if no position was stored at that index.
    pub fn repetitions(&self, index: PositionIndex) -> Result<usize, StoreError> {
        let hash = self.get_position(index)?.zobrist_hash();
        Ok(self.history[..=index.0]
            .iter()
            .filter(|position| position.zobrist_hash() == hash)
            .count())
    }
}
