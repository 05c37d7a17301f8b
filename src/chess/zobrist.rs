//! # Zobrist hashing keys and utilities

use std::sync::LazyLock;

use rand::{rngs::SmallRng, Rng, SeedableRng};

use super::{
    castling_rights::CastlingRights,
    colour::NUM_COLOURS,
    piece::{Piece, NUM_PIECES},
    square::{File, Square},
};

// We need :
// - one number for each piece on each square (64 * 12)
// - one number for side to move
// - four numbers for castling rights
// - eight numbers for en passant file
const PIECE_KEYS: usize = NUM_COLOURS * NUM_PIECES * Square::COUNT;
const SIDE_TO_MOVE_OFFSET: usize = PIECE_KEYS;
const CASTLING_RIGHTS_OFFSET: usize = SIDE_TO_MOVE_OFFSET + 1;
const EN_PASSANT_OFFSET: usize = CASTLING_RIGHTS_OFFSET + 4;
const NUM_KEYS: usize = EN_PASSANT_OFFSET + 8;

static ZOBRIST_KEYS: LazyLock<[u64; NUM_KEYS]> = LazyLock::new(|| {
    let mut rng = SmallRng::seed_from_u64(0x6F2DF0EAF362C1ED);
    let mut keys = [0; NUM_KEYS];
    for key in &mut keys {
        *key = rng.gen()
    }
    keys
});

#[inline(always)]
pub(crate) fn piece_hash(piece: Piece, square: Square) -> u64 {
    let piece_index = piece.colour as usize * NUM_PIECES + piece.kind as usize - 1;
    ZOBRIST_KEYS[piece_index * Square::COUNT + square as usize]
}

#[inline(always)]
pub(crate) fn side_to_move_hash() -> u64 {
    ZOBRIST_KEYS[SIDE_TO_MOVE_OFFSET]
}

#[inline(always)]
pub(crate) fn castling_rights_hash(rights: CastlingRights) -> u64 {
    let mut hash = 0;
    for i in 0..4 {
        if rights.bits() & (1 << i) != 0 {
            hash ^= ZOBRIST_KEYS[CASTLING_RIGHTS_OFFSET + i]
        }
    }
    hash
}

#[inline(always)]
pub(crate) fn en_passant_file_hash(file: File) -> u64 {
    ZOBRIST_KEYS[EN_PASSANT_OFFSET + file as usize]
}
