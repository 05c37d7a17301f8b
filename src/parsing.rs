//! # Parsing
//! FEN is made of small, fixed-shape tokens (squares, castling rights, clocks).
//! Horsey-state makes these parsable from raw strings using the standard Rust
//! [`FromStr`](std::str::FromStr) trait.
//!
//! On top of that, token types implement the [`PartialFromStr`] trait, which
//! allows parser combinators.
//!
//! Unlike [`FromStr`], the `Ok` variant returned by [`PartialFromStr`] contains two
//! values:
//! - The parsed value
//! - A suffix of the input that was not part of the parsed value.
//!
//! A string like "e3rest" would return `Ok(Square::E3, "rest")` when parsed.

pub trait PartialFromStr: Sized {
    type Err;

    fn partial_from_str(s: &str) -> Result<(Self, &str), Self::Err>;
}

/// Parses a value made entirely of ASCII digits, consuming the whole input.
///
/// Returns `None` for signs, whitespace, empty inputs and any value above `max`.
pub(crate) fn parse_bounded_u32(src: &str, max: u32) -> Option<u32> {
    if src.is_empty() {
        return None;
    }

    let mut result = 0u32;
    for c in src.chars() {
        let digit = c.to_digit(10)?;
        result = result
            .checked_mul(10)
            .and_then(|r| r.checked_add(digit))
            .filter(|&r| r <= max)?;
    }
    Some(result)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn bounded_u32() {
        assert_eq!(parse_bounded_u32("0", 255), Some(0));
        assert_eq!(parse_bounded_u32("255", 255), Some(255));
        assert_eq!(parse_bounded_u32("007", 255), Some(7));
        assert_eq!(parse_bounded_u32("256", 255), None);
        assert_eq!(parse_bounded_u32("", 255), None);
        assert_eq!(parse_bounded_u32("+3", 255), None);
        assert_eq!(parse_bounded_u32("-1", 255), None);
        assert_eq!(parse_bounded_u32("99999999999999", u32::MAX), None);
    }
}
