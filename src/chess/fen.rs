//! # Forsyth-Edwards Notation (FEN) utilities.
//!
//! Decodes FEN strings into [`PackedPosition`]s and encodes them back.
//!
//! A FEN string has six fields separated by spaces: piece placement, side to
//! move, castling rights, en passant target square, halfmove clock and fullmove
//! number. All six are required.

use thiserror::Error;

use crate::parsing::parse_bounded_u32;

use super::{
    castling_rights::{CastlingParseError, CastlingRights},
    cell::PackedCell,
    colour::Colour,
    metadata::Metadata,
    piece::{Piece, PIECE_CODEC},
    position::{CellList, PackedPosition},
    square::{Rank, Square, SquareParseError},
};

/// FEN string of the initial chess position.
pub const INITIAL_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

const FEN_FIELDS: usize = 6;
const RANKS: usize = 8;

/// FEN parsing errors.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Error)]
pub enum FenError {
    #[error("Found a non-ASCII character")]
    NonAscii,
    #[error("Expected 6 space separated fields, found {0}")]
    FieldCount(usize),
    #[error("Failed to parse the side to move")]
    InvalidSideToMove,
    #[error("Castling rights could not be parsed: {0}")]
    InvalidCastlingRights(CastlingParseError),
    #[error("En passant square could not be parsed: {0}")]
    InvalidEnPassantSquare(SquareParseError),
    #[error("a8 can never be an en passant target")]
    ReservedEnPassantSquare,
    #[error("Halfmove clock is not an integer between 0 and {}", Metadata::MAX_HALFMOVE_CLOCK)]
    InvalidHalfmoveClock,
    #[error("Fullmove number is not an integer between 1 and {}", Metadata::MAX_FULLMOVE_NUMBER)]
    InvalidFullmoveNumber,
    #[error("The piece section defines {0} ranks out of 8")]
    RankCount(usize),
    #[error("{0} is not a valid piece symbol")]
    InvalidPiece(char),
    #[error("{0} is not a valid run of empty squares")]
    InvalidEmptyRun(char),
    #[error("Rank {rank} of the piece section defines more than 8 squares")]
    RankOverflow { rank: Rank },
    #[error("Rank {rank} of the piece section is missing {missing} squares")]
    IncompleteRank { rank: Rank, missing: u8 },
    #[error("The piece section holds more than 32 pieces")]
    TooManyPieces,
}

/// The six fields of a FEN string, not parsed yet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct FenFields<'a> {
    pub placement: &'a str,
    pub side_to_move: &'a str,
    pub castling_rights: &'a str,
    pub en_passant: &'a str,
    pub halfmove_clock: &'a str,
    pub fullmove_number: &'a str,
}
impl<'a> FenFields<'a> {
    /// Splits a FEN string on whitespace.
    ///
    /// Fails unless there are exactly six fields.
    pub fn split(fen: &'a str) -> Result<Self, FenError> {
        if !fen.is_ascii() {
            return Err(FenError::NonAscii);
        }

        let mut fields = heapless::Vec::<&str, FEN_FIELDS>::new();
        for field in fen.split_ascii_whitespace() {
            fields
                .push(field)
                .map_err(|_| FenError::FieldCount(fen.split_ascii_whitespace().count()))?;
        }

        let &[placement, side_to_move, castling_rights, en_passant, halfmove_clock, fullmove_number] =
            fields.as_slice()
        else {
            return Err(FenError::FieldCount(fields.len()));
        };
        Ok(Self {
            placement,
            side_to_move,
            castling_rights,
            en_passant,
            halfmove_clock,
            fullmove_number,
        })
    }
}

/// Parses fields 2 to 6 into a metadata word.
pub(crate) fn decode_metadata(fields: &FenFields) -> Result<Metadata, FenError> {
    let side_to_move = match fields.side_to_move {
        "w" => Colour::White,
        "b" => Colour::Black,
        _ => return Err(FenError::InvalidSideToMove),
    };

    let castling_rights = fields
        .castling_rights
        .parse::<CastlingRights>()
        .map_err(FenError::InvalidCastlingRights)?;

    // A8 doubles as the "no en passant" value in the packed word.
    let en_passant = match fields.en_passant {
        "-" => None,
        s => match s.parse::<Square>() {
            Ok(Square::A8) => return Err(FenError::ReservedEnPassantSquare),
            Ok(square) => Some(square),
            Err(e) => return Err(FenError::InvalidEnPassantSquare(e)),
        },
    };

    let halfmove_clock = parse_bounded_u32(
        fields.halfmove_clock,
        Metadata::MAX_HALFMOVE_CLOCK as u32,
    )
    .ok_or(FenError::InvalidHalfmoveClock)?;
    let fullmove_number = parse_bounded_u32(
        fields.fullmove_number,
        Metadata::MAX_FULLMOVE_NUMBER as u32,
    )
    .ok_or(FenError::InvalidFullmoveNumber)?;

    Metadata::new(
        side_to_move,
        castling_rights,
        en_passant,
        halfmove_clock as u8,
        fullmove_number as u16,
    )
    .ok_or(FenError::InvalidFullmoveNumber)
}

/// Parses the piece placement field into packed cells, in reading order.
///
/// The running square index starts at A8 and keeps increasing across rank
/// separators. Each rank must describe exactly 8 squares.
pub(crate) fn decode_placement(placement: &str) -> Result<CellList, FenError> {
    let mut ranks = heapless::Vec::<&str, RANKS>::new();
    for rank in placement.split('/') {
        ranks
            .push(rank)
            .map_err(|_| FenError::RankCount(placement.split('/').count()))?;
    }
    if ranks.len() != RANKS {
        return Err(FenError::RankCount(ranks.len()));
    }

    let mut cells = CellList::new();
    let mut index = 0u8;
    for (rank, symbols) in Rank::iter().rev().zip(ranks) {
        let rank_end = index + 8;
        for c in symbols.chars() {
            if let Some(run) = c.to_digit(10) {
                if !(1..=8).contains(&run) {
                    return Err(FenError::InvalidEmptyRun(c));
                }
                index += run as u8;
                if index > rank_end {
                    return Err(FenError::RankOverflow { rank });
                }
            } else {
                if index >= rank_end {
                    return Err(FenError::RankOverflow { rank });
                }
                let code = PIECE_CODEC.encode(c).ok_or(FenError::InvalidPiece(c))?;
                let square = Square::from_index(index).ok_or(FenError::RankOverflow { rank })?;
                cells
                    .push(PackedCell::new(square, code))
                    .map_err(|_| FenError::TooManyPieces)?;
                index += 1;
            }
        }
        if index < rank_end {
            return Err(FenError::IncompleteRank {
                rank,
                missing: rank_end - index,
            });
        }
    }

    Ok(cells)
}

impl std::str::FromStr for PackedPosition {
    type Err = FenError;

    fn from_str(fen: &str) -> Result<Self, Self::Err> {
        let fields = FenFields::split(fen)?;
        let metadata = decode_metadata(&fields)?;
        let cells = decode_placement(fields.placement)?;
        Ok(Self::from_parts(metadata, &cells))
    }
}

/// Writes the position back as a FEN string.
///
/// Runs of empty squares are always written as a single digit.
impl std::fmt::Display for PackedPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut board: [Option<Piece>; Square::COUNT] = [None; Square::COUNT];
        for (square, piece) in self.pieces() {
            board[square as usize] = Some(piece)
        }

        for (row, squares) in board.chunks(8).enumerate() {
            let mut skip = 0;
            for square in squares {
                match square {
                    Some(piece) => {
                        if skip != 0 {
                            write!(f, "{skip}")?;
                            skip = 0
                        }
                        write!(f, "{piece}")?
                    }
                    None => skip += 1,
                }
            }
            if skip != 0 {
                write!(f, "{skip}")?
            }
            if row != RANKS - 1 {
                write!(f, "/")?
            }
        }

        let metadata = self.metadata();
        write!(
            f,
            " {} {} {} {} {}",
            metadata.side_to_move(),
            metadata.castling_rights(),
            if let Some(ep) = metadata.en_passant() {
                ep.to_string()
            } else {
                String::from("-")
            },
            metadata.halfmove_clock(),
            metadata.fullmove_number()
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::chess::piece::PieceKind;

    #[test]
    fn initial_position() {
        let position: PackedPosition = INITIAL_FEN.parse().unwrap();
        assert_eq!(position.len(), 32);

        let metadata = position.metadata();
        assert_eq!(metadata.side_to_move(), Colour::White);
        assert_eq!(metadata.castling_rights(), CastlingRights::full());
        assert_eq!(metadata.en_passant(), None);
        assert_eq!(metadata.en_passant_bits(), Metadata::NO_EN_PASSANT);
        assert_eq!(metadata.halfmove_clock(), 0);
        assert_eq!(metadata.fullmove_number(), 1);

        assert_eq!(
            position.piece_on(Square::A1),
            Some(Piece::new(PieceKind::Rook, Colour::White))
        );
        assert_eq!(
            position.piece_on(Square::E8),
            Some(Piece::new(PieceKind::King, Colour::Black))
        );
        assert_eq!(
            position.piece_on(Square::D1),
            Some(Piece::new(PieceKind::Queen, Colour::White))
        );
        assert_eq!(position.piece_on(Square::E4), None);
    }

    #[test]
    fn cells_follow_reading_order() {
        let position: PackedPosition = INITIAL_FEN.parse().unwrap();
        let squares = position
            .cells()
            .iter()
            .map(|cell| cell.square().unwrap().index())
            .collect::<Vec<_>>();
        let expected = (0..16).chain(48..64).collect::<Vec<u8>>();
        assert_eq!(squares, expected);
        assert_eq!(position.cells()[0].piece().unwrap().symbol(), 'r');
        assert_eq!(position.cells()[31].piece().unwrap().symbol(), 'R');
    }

    #[test]
    fn encode_back() {
        for fen in [
            INITIAL_FEN,
            "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq e6 0 2",
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
            "8/8/8/8/8/8/8/8 b - - 99 500",
            "4k3/8/8/8/8/8/8/4K2R w K - 0 1",
        ] {
            let position: PackedPosition = fen.parse().unwrap();
            assert_eq!(position.to_string(), fen);
        }
    }

    #[test]
    fn split_runs_are_normalized() {
        let position: PackedPosition = "44/8/8/8/8/8/8/3k4 w - - 0 1".parse().unwrap();
        assert_eq!(position.to_string(), "8/8/8/8/8/8/8/3k4 w - - 0 1");
    }

    #[test]
    fn en_passant_square() {
        let position: PackedPosition =
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"
                .parse()
                .unwrap();
        let metadata = position.metadata();
        assert_eq!(metadata.en_passant(), Some(Square::E3));
        assert_eq!(metadata.en_passant_bits(), 4 + 8 * 5);
        assert_eq!(metadata.side_to_move(), Colour::Black);
    }

    #[test]
    fn metadata_is_deterministic() {
        let fen = "r3k2r/8/8/8/8/8/8/R3K2R b Kq - 17 33";
        let a: PackedPosition = fen.parse().unwrap();
        let b: PackedPosition = fen.parse().unwrap();
        assert_eq!(a.metadata().bits(), b.metadata().bits());
        assert_eq!(a, b);
    }

    #[test]
    fn field_count() {
        assert_eq!(
            "8/8/8/8/8/8/8/8 w - - 0".parse::<PackedPosition>(),
            Err(FenError::FieldCount(5))
        );
        assert_eq!(
            "8/8/8/8/8/8/8/8 w - - 0 1 extra".parse::<PackedPosition>(),
            Err(FenError::FieldCount(7))
        );
        assert_eq!("".parse::<PackedPosition>(), Err(FenError::FieldCount(0)));
        assert_eq!(
            "8/8/8/8/8/8/8/8 w - - 0 1 a b c d".parse::<PackedPosition>(),
            Err(FenError::FieldCount(10))
        );
    }

    #[test]
    fn extra_whitespace_is_tolerated() {
        let position: PackedPosition = "  8/8/8/8/8/8/8/4K3   w  -  -  0  1 \n".parse().unwrap();
        assert_eq!(position.len(), 1);
    }

    #[test]
    fn metadata_errors() {
        let cases = [
            ("8/8/8/8/8/8/8/8 x - - 0 1", FenError::InvalidSideToMove),
            ("8/8/8/8/8/8/8/8 W - - 0 1", FenError::InvalidSideToMove),
            (
                "8/8/8/8/8/8/8/8 w KX - 0 1",
                FenError::InvalidCastlingRights(CastlingParseError),
            ),
            (
                "8/8/8/8/8/8/8/8 w - i3 0 1",
                FenError::InvalidEnPassantSquare(SquareParseError::InvalidFile('i')),
            ),
            (
                "8/8/8/8/8/8/8/8 w - e9 0 1",
                FenError::InvalidEnPassantSquare(SquareParseError::InvalidRank('9')),
            ),
            (
                "8/8/8/8/8/8/8/8 w - e33 0 1",
                FenError::InvalidEnPassantSquare(SquareParseError::InputTooLong),
            ),
            ("8/8/8/8/8/8/8/8 w - a8 0 1", FenError::ReservedEnPassantSquare),
            ("8/8/8/8/8/8/8/8 w - - x 1", FenError::InvalidHalfmoveClock),
            ("8/8/8/8/8/8/8/8 w - - -1 1", FenError::InvalidHalfmoveClock),
            ("8/8/8/8/8/8/8/8 w - - 256 1", FenError::InvalidHalfmoveClock),
            ("8/8/8/8/8/8/8/8 w - - 0 0", FenError::InvalidFullmoveNumber),
            ("8/8/8/8/8/8/8/8 w - - 0 8192", FenError::InvalidFullmoveNumber),
            ("8/8/8/8/8/8/8/8 w - - 0 one", FenError::InvalidFullmoveNumber),
            ("8/8/8/8/8/8/8/8 w - - 0 1é", FenError::NonAscii),
        ];
        for (fen, expected) in cases {
            assert_eq!(fen.parse::<PackedPosition>(), Err(expected), "{fen}");
        }
    }

    #[test]
    fn placement_errors() {
        let cases = [
            ("rnbqkbnr/pppppppp w KQkq - 0 1", FenError::RankCount(2)),
            ("8/8/8/8/8/8/8/8/8 w - - 0 1", FenError::RankCount(9)),
            ("8/8/8/8/8/8/8/8/8/8/8 w - - 0 1", FenError::RankCount(11)),
            ("8/8/8/8/8/8/8/7x w - - 0 1", FenError::InvalidPiece('x')),
            ("8/8/8/8/8/8/8/80 w - - 0 1", FenError::InvalidEmptyRun('0')),
            ("9/8/8/8/8/8/8/8 w - - 0 1", FenError::InvalidEmptyRun('9')),
            (
                "8/8/8/54/8/8/8/8 w - - 0 1",
                FenError::RankOverflow { rank: Rank::Five },
            ),
            (
                "8/8/8/8/8/8/8/8K w - - 0 1",
                FenError::RankOverflow { rank: Rank::One },
            ),
            (
                "8/8/7/8/8/8/8/8 w - - 0 1",
                FenError::IncompleteRank {
                    rank: Rank::Six,
                    missing: 1,
                },
            ),
            (
                "8/8/8/8/8//8/8 w - - 0 1",
                FenError::IncompleteRank {
                    rank: Rank::Three,
                    missing: 8,
                },
            ),
            (
                "pppppppp/pppppppp/pppppppp/pppppppp/p7/8/8/8 w - - 0 1",
                FenError::TooManyPieces,
            ),
        ];
        for (fen, expected) in cases {
            assert_eq!(fen.parse::<PackedPosition>(), Err(expected), "{fen}");
        }
    }

    #[test]
    fn full_board_of_pieces_fits() {
        let fen = "pppppppp/pppppppp/pppppppp/pppppppp/8/8/8/8 w - - 0 1";
        let position: PackedPosition = fen.parse().unwrap();
        assert_eq!(position.len(), 32);
        assert_eq!(position.raw_cells()[31].square(), Some(Square::H5));
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            FenError::IncompleteRank {
                rank: Rank::Six,
                missing: 1
            }
            .to_string(),
            "Rank 6 of the piece section is missing 1 squares"
        );
        assert_eq!(
            FenError::FieldCount(2).to_string(),
            "Expected 6 space separated fields, found 2"
        );
    }
}
