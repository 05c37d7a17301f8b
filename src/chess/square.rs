//! Enumerations of chessboard accessing constants, such as files, ranks and squares.
//!
//! Squares are numbered in FEN reading order: `A8` is 0, `H8` is 7, `A1` is 56
//! and `H1` is 63. Every packed structure of this crate uses that numbering.

use std::str::FromStr;

use thiserror::Error;

use crate::parsing::PartialFromStr;

/// Files of a chessboard (A-H).
#[repr(u8)]
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, PartialOrd, Ord)]
pub enum File {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
}
impl File {
    const FILES: [Self; 8] = [
        Self::A,
        Self::B,
        Self::C,
        Self::D,
        Self::E,
        Self::F,
        Self::G,
        Self::H,
    ];
}
impl std::fmt::Display for File {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", (b'a' + *self as u8) as char)
    }
}
impl PartialFromStr for File {
    type Err = SquareParseError;

    fn partial_from_str(s: &str) -> Result<(Self, &str), Self::Err> {
        let c = s.chars().next().ok_or(SquareParseError::EmptyInput)?;
        let file = match c {
            'a'..='h' => Self::FILES[(c as u8 - b'a') as usize],
            _ => Err(SquareParseError::InvalidFile(c))?,
        };
        Ok((file, &s[c.len_utf8()..]))
    }
}

/// Ranks of a chessboard (1-8).
#[repr(u8)]
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, PartialOrd, Ord)]
pub enum Rank {
    One,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
}
impl Rank {
    const RANKS: [Self; 8] = [
        Self::One,
        Self::Two,
        Self::Three,
        Self::Four,
        Self::Five,
        Self::Six,
        Self::Seven,
        Self::Eight,
    ];

    /// Iterator over all ranks, from the first to the eighth.
    pub fn iter() -> impl DoubleEndedIterator<Item = Self> {
        Self::RANKS.into_iter()
    }

    /// Position of this rank in FEN reading order (0 for the eighth rank).
    #[inline]
    pub const fn row(self) -> u8 {
        7 - self as u8
    }
}
impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", 1 + *self as u8)
    }
}
impl PartialFromStr for Rank {
    type Err = SquareParseError;

    fn partial_from_str(s: &str) -> Result<(Self, &str), Self::Err> {
        let c = s.chars().next().ok_or(SquareParseError::EmptyInput)?;
        let rank = match c {
            '1'..='8' => Self::RANKS[(c as u8 - b'1') as usize],
            _ => Err(SquareParseError::InvalidRank(c))?,
        };
        Ok((rank, &s[c.len_utf8()..]))
    }
}

/// General square indexing, in FEN reading order.
#[repr(u8)]
#[rustfmt::skip]
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, PartialOrd, Ord)]
pub enum Square {
    A8, B8, C8, D8, E8, F8, G8, H8,
    A7, B7, C7, D7, E7, F7, G7, H7,
    A6, B6, C6, D6, E6, F6, G6, H6,
    A5, B5, C5, D5, E5, F5, G5, H5,
    A4, B4, C4, D4, E4, F4, G4, H4,
    A3, B3, C3, D3, E3, F3, G3, H3,
    A2, B2, C2, D2, E2, F2, G2, H2,
    A1, B1, C1, D1, E1, F1, G1, H1,
}
impl Square {
    /// Number of squares on the board.
    pub const COUNT: usize = 64;

    /// Instantiates a new square based on file and rank.
    #[inline]
    pub const fn new(file: File, rank: Rank) -> Self {
        // SAFETY: both the row and the file are below 8, so the index is below 64.
        unsafe { Self::from_index_unchecked((rank.row() << 3) | file as u8) }
    }

    /// Instantiates a new square from its index.
    ///
    /// Returns `None` if the index is more than 63.
    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        if index < 64 {
            // SAFETY: the index was checked just above.
            Some(unsafe { Self::from_index_unchecked(index) })
        } else {
            None
        }
    }

    /// Instantiates a new square from its index.
    /// # Safety
    /// If the index is more than 63, causes undefined behavior.
    #[inline]
    pub const unsafe fn from_index_unchecked(index: u8) -> Self {
        std::mem::transmute(index)
    }

    /// Index of the square, in FEN reading order.
    #[inline]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Returns the rank of the square.
    #[inline]
    pub const fn rank(self) -> Rank {
        Rank::RANKS[(7 - ((self as u8) >> 3)) as usize]
    }

    /// Returns the file of the square.
    #[inline]
    pub const fn file(self) -> File {
        File::FILES[((self as u8) & 7) as usize]
    }

    /// An iterator over all squares in FEN reading order, from A8 to H1.
    pub fn squares_fen_iter() -> impl Iterator<Item = Self> {
        // SAFETY: all indices are below 64.
        (0..64).map(|i| unsafe { Self::from_index_unchecked(i) })
    }
}
impl std::fmt::Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.file(), self.rank())
    }
}

/// Errors that can occur when parsing a square.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Error)]
pub enum SquareParseError {
    #[error("{0} is not a valid file")]
    InvalidFile(char),
    #[error("{0} is not a valid rank")]
    InvalidRank(char),
    #[error("Empty input")]
    EmptyInput,
    #[error("A square is exactly two characters long")]
    InputTooLong,
}

impl PartialFromStr for Square {
    type Err = SquareParseError;

    fn partial_from_str(s: &str) -> Result<(Self, &str), Self::Err> {
        let (file, s) = File::partial_from_str(s)?;
        let (rank, s) = Rank::partial_from_str(s)?;
        Ok((Self::new(file, rank), s))
    }
}
impl FromStr for Square {
    type Err = SquareParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::partial_from_str(s).and_then(|(square, rest)| {
            if rest.is_empty() {
                Ok(square)
            } else {
                Err(SquareParseError::InputTooLong)
            }
        })
    }
}
