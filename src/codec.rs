//! Compact text key for a board: placement plus castling rights.
//!
//! The key is 65 lowercase hexadecimal digits. The first packs the castling
//! rights (white king-side, white queen-side, black king-side, black
//! queen-side, most significant bit first). Each following digit describes
//! one square in row-major order from a1: `f` for an empty square, otherwise
//! the color bit (black = 1) followed by the 3-bit piece code.
//!
//! Counters, the repetition history and en passant flags are not part of the
//! key, so [`decode`] only restores what [`encode`] stored.

use tracing::trace;

use crate::{
    board::Board, castling_right::CastlingRight, coord::Coord, error::DecodeError, piece::Piece,
};

const EMPTY: u8 = 0b_1111;
const KEY_LENGTH: usize = 65;

fn hex_digit(nibble: u8) -> char {
    char::from_digit(nibble.into(), 16).unwrap_or('f')
}

pub fn encode(board: &Board) -> String {
    let mut key = String::with_capacity(KEY_LENGTH);
    key.push(hex_digit(board.castling_right.nibble()));
    key.extend(
        Coord::all().map(|position| hex_digit(board[position].map_or(EMPTY, Piece::nibble))),
    );
    key
}

pub fn decode(key: &str) -> Result<Board, DecodeError> {
    let length = key.chars().count();
    if length != KEY_LENGTH {
        return Err(DecodeError::InvalidLength(length));
    }
    let mut nibbles = key.chars().enumerate().map(|(index, symbol)| {
        symbol
            .to_digit(16)
            .map(|digit| (digit as u8, symbol))
            .ok_or(DecodeError::InvalidSymbol { index, symbol })
    });
    let mut board = Board::empty();
    if let Some(castling) = nibbles.next() {
        board.castling_right = CastlingRight::from_nibble(castling?.0);
    }
    for (position, nibble) in Coord::all().zip(nibbles) {
        let (nibble, symbol) = nibble?;
        if nibble != EMPTY {
            let piece = Piece::from_nibble(nibble).ok_or(DecodeError::InvalidPiece {
                at: position,
                symbol,
            })?;
            board[position] = Some(piece);
        }
    }
    trace!(key, "decoded board");
    Ok(board)
}
#[cfg(test)]
mod test {
    use crate::{
        board::Board,
        castling_right::Side,
        codec::{decode, encode},
        color::Color,
        coord::Coord,
        error::DecodeError,
        piece::{Piece, PieceKind},
    };

    const STARTING_KEY: &str =
        "f4235632411111111ffffffffffffffffffffffffffffffff99999999cabdebac";

    #[test]
    fn starting_position_key() {
        assert_eq!(encode(&Board::starting_position()), STARTING_KEY);
    }
    #[test]
    fn decode_restores_placement_and_castling_only() {
        let mut board = Board::starting_position();
        board.castling_right.remove(Color::Black, Side::QueenSide);
        board[Coord::new(1, 4)] = None;
        board[Coord::new(3, 4)] = Some(Piece {
            kind: PieceKind::Pawn,
            color: Color::White,
            en_passant_vulnerable: true,
        });
        board.fifty_move_counter = 17;
        board.record(encode(&board));

        let decoded = decode(&encode(&board)).unwrap();
        assert!(decoded.same_position(&board));
        assert_eq!(decoded.fifty_move_counter, 0);
        assert_eq!(decoded.recorded(&encode(&board)), 0);
        assert_eq!(
            decoded[Coord::new(3, 4)],
            Some(Piece::new(Color::White, PieceKind::Pawn))
        );
        assert_eq!(encode(&decoded), encode(&board));
    }
    #[test]
    fn rejects_malformed_keys() {
        assert_eq!(decode("f"), Err(DecodeError::InvalidLength(1)));
        let mut key = STARTING_KEY.to_owned();
        key.replace_range(10..11, "z");
        assert_eq!(
            decode(&key),
            Err(DecodeError::InvalidSymbol {
                index: 10,
                symbol: 'z'
            })
        );
        let mut key = STARTING_KEY.to_owned();
        key.replace_range(20..21, "7");
        assert!(matches!(
            decode(&key),
            Err(DecodeError::InvalidPiece { symbol: '7', .. })
        ));
    }
}
