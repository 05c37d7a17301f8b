//! # Representation of castling rights

use std::str::FromStr;

use thiserror::Error;

use crate::parsing::PartialFromStr;

use super::colour::Colour;

/// Efficient representation of castling rights, as the 4-bit value stored in the
/// packed metadata word.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct CastlingRights(u8);
impl CastlingRights {
    const KINGSIDE_WHITE: u8 = 0b0001;
    const QUEENSIDE_WHITE: u8 = 0b0010;
    const KINGSIDE_BLACK: u8 = 0b0100;
    const QUEENSIDE_BLACK: u8 = 0b1000;
    const FULL: u8 =
        Self::KINGSIDE_WHITE | Self::QUEENSIDE_WHITE | Self::KINGSIDE_BLACK | Self::QUEENSIDE_BLACK;
    const EMPTY: u8 = 0;

    /// Full castling rights for both sides.
    pub const fn full() -> Self {
        Self(Self::FULL)
    }

    /// No castling rights for any sides.
    pub const fn none() -> Self {
        Self(Self::EMPTY)
    }

    /// Builds castling rights from their 4-bit packed form, higher bits are ignored.
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & Self::FULL)
    }

    /// The 4-bit packed form: bit 0 `K`, bit 1 `Q`, bit 2 `k`, bit 3 `q`.
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Returns `true` if none of the sides can castle.
    pub const fn is_none(self) -> bool {
        self.0 == Self::EMPTY
    }

    /// Checks if kingside castling is allowed for a certain colour.
    #[inline(always)]
    pub const fn kingside_castle_allowed(self, colour: Colour) -> bool {
        if colour.is_black() {
            self.0 & Self::KINGSIDE_BLACK != 0
        } else {
            self.0 & Self::KINGSIDE_WHITE != 0
        }
    }

    /// Checks if queenside castling is allowed for a certain colour.
    #[inline(always)]
    pub const fn queenside_castle_allowed(self, colour: Colour) -> bool {
        if colour.is_black() {
            self.0 & Self::QUEENSIDE_BLACK != 0
        } else {
            self.0 & Self::QUEENSIDE_WHITE != 0
        }
    }
}

/// Castling rights were neither `-` nor a subset of `KQkq`.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Error)]
#[error("Castling rights must be `-` or a non-repeating subset of `KQkq`")]
pub struct CastlingParseError;

impl PartialFromStr for CastlingRights {
    type Err = CastlingParseError;

    fn partial_from_str(mut s: &str) -> Result<(Self, &str), Self::Err> {
        if let Some(rest) = s.strip_prefix('-') {
            return Ok((Self::none(), rest));
        }

        let mut rights = Self::EMPTY;
        while let Some(c) = s.chars().next() {
            match c {
                'K' if rights & Self::KINGSIDE_WHITE == 0 => rights |= Self::KINGSIDE_WHITE,
                'Q' if rights & Self::QUEENSIDE_WHITE == 0 => rights |= Self::QUEENSIDE_WHITE,
                'k' if rights & Self::KINGSIDE_BLACK == 0 => rights |= Self::KINGSIDE_BLACK,
                'q' if rights & Self::QUEENSIDE_BLACK == 0 => rights |= Self::QUEENSIDE_BLACK,
                _ => break,
            }
            s = &s[1..]
        }
        if rights == Self::EMPTY {
            Err(CastlingParseError)
        } else {
            Ok((Self(rights), s))
        }
    }
}
impl FromStr for CastlingRights {
    type Err = CastlingParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::partial_from_str(s).and_then(|(rights, rest)| {
            if rest.is_empty() {
                Ok(rights)
            } else {
                Err(CastlingParseError)
            }
        })
    }
}
impl std::fmt::Display for CastlingRights {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_none() {
            return write!(f, "-");
        }

        if self.kingside_castle_allowed(Colour::White) {
            write!(f, "K")?
        }
        if self.queenside_castle_allowed(Colour::White) {
            write!(f, "Q")?
        }
        if self.kingside_castle_allowed(Colour::Black) {
            write!(f, "k")?
        }
        if self.queenside_castle_allowed(Colour::Black) {
            write!(f, "q")?
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parse_full_and_none() {
        assert_eq!("KQkq".parse(), Ok(CastlingRights::full()));
        assert_eq!("-".parse(), Ok(CastlingRights::none()));
        assert_eq!(CastlingRights::full().bits(), 0b1111);
    }

    #[test]
    fn parse_subsets() {
        let rights: CastlingRights = "Kq".parse().unwrap();
        assert!(rights.kingside_castle_allowed(Colour::White));
        assert!(!rights.queenside_castle_allowed(Colour::White));
        assert!(!rights.kingside_castle_allowed(Colour::Black));
        assert!(rights.queenside_castle_allowed(Colour::Black));
        assert_eq!(rights.bits(), 0b1001);
        assert_eq!(CastlingRights::from_bits(0b1001), rights);
    }

    #[test]
    fn reject_invalid() {
        assert_eq!("".parse::<CastlingRights>(), Err(CastlingParseError));
        assert_eq!("KK".parse::<CastlingRights>(), Err(CastlingParseError));
        assert_eq!("KQx".parse::<CastlingRights>(), Err(CastlingParseError));
        assert_eq!("-K".parse::<CastlingRights>(), Err(CastlingParseError));
        assert_eq!("abc".parse::<CastlingRights>(), Err(CastlingParseError));
    }

    #[test]
    fn display_is_canonical() {
        for s in ["KQkq", "K", "Qk", "kq", "-", "KQ"] {
            assert_eq!(s.parse::<CastlingRights>().unwrap().to_string(), s);
        }
        assert_eq!("qkQK".parse::<CastlingRights>().unwrap().to_string(), "KQkq");
    }
}
