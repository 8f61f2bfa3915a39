use std::ops::{Index, IndexMut};

use rustc_hash::FxHashMap;
use tracing::error;

use crate::{
    castling_right::CastlingRight,
    color::Color,
    coord::{Coord, home_rank, pawn_home_rank},
    error::RulesError,
    piece::{Piece, PieceKind},
};

/// The authoritative game state the rules operate on.
///
/// Besides placement and castling rights it owns the fifty-move counter and
/// the repetition history; both are only mutated by
/// [`apply_move`](crate::apply::apply_move).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    squares: [[Option<Piece>; 8]; 8],
    pub castling_right: CastlingRight,
    /// Half-moves since the last capture or pawn move.
    pub fifty_move_counter: u32,
    repetitions: FxHashMap<String, u32>,
}
impl Board {
    pub fn empty() -> Self {
        Board {
            squares: [[None; 8]; 8],
            castling_right: CastlingRight::none(),
            fifty_move_counter: 0,
            repetitions: FxHashMap::default(),
        }
    }
    pub fn starting_position() -> Self {
        let mut board = Board::empty();
        for color in Color::ALL {
            for (col, kind) in (0..).zip(PieceKind::STARTING_CONFIGURATION) {
                board[Coord::new(home_rank(color), col)] = Some(Piece::new(color, kind));
                board[Coord::new(pawn_home_rank(color), col)] =
                    Some(Piece::new(color, PieceKind::Pawn));
            }
        }
        board.castling_right = CastlingRight::all();
        board
    }
    /// Deep copy of everything that can influence move generation and check
    /// tests. The repetition history is left behind.
    pub fn snapshot(&self) -> Self {
        Board {
            squares: self.squares,
            castling_right: self.castling_right,
            fifty_move_counter: self.fifty_move_counter,
            repetitions: FxHashMap::default(),
        }
    }
    pub fn pieces(&self) -> impl Iterator<Item = (Coord, Piece)> + '_ {
        Coord::all().filter_map(|position| self[position].map(|piece| (position, piece)))
    }
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Coord, Piece)> + '_ {
        self.pieces().filter(move |(_, piece)| piece.color == color)
    }
    pub fn king_of(&self, color: Color) -> Result<Coord, RulesError> {
        self.pieces_of(color)
            .find(|(_, piece)| piece.kind == PieceKind::King)
            .map(|(position, _)| position)
            .ok_or_else(|| {
                error!(%color, "king missing from board");
                RulesError::KingNotFound(color)
            })
    }
    pub fn clear_en_passant_flags(&mut self) {
        for piece in self.squares.iter_mut().flatten().flatten() {
            piece.en_passant_vulnerable = false;
        }
    }
    /// Counts one more occurrence of `key` and returns the new count.
    pub fn record(&mut self, key: String) -> u32 {
        let count = self.repetitions.entry(key).or_default();
        *count += 1;
        *count
    }
    /// How many times `key` has been recorded by applied moves.
    pub fn recorded(&self, key: &str) -> u32 {
        self.repetitions.get(key).copied().unwrap_or_default()
    }
    /// Occurrences of `key` counting the present position, which is only
    /// recorded once a move leaves it.
    pub fn occurrences(&self, key: &str) -> u32 {
        self.recorded(key) + 1
    }
    pub fn same_position(&self, other: &Board) -> bool {
        self.castling_right == other.castling_right
            && Coord::all().all(|position| {
                self[position].map(|piece| (piece.color, piece.kind))
                    == other[position].map(|piece| (piece.color, piece.kind))
            })
    }
}
impl Default for Board {
    fn default() -> Self {
        Board::starting_position()
    }
}
impl Index<Coord> for Board {
    type Output = Option<Piece>;

    fn index(&self, index: Coord) -> &Self::Output {
        &self.squares[index.row as usize][index.col as usize]
    }
}
impl IndexMut<Coord> for Board {
    fn index_mut(&mut self, index: Coord) -> &mut Self::Output {
        &mut self.squares[index.row as usize][index.col as usize]
    }
}
