//! Pseudo-legal move enumeration, one generator per piece kind.
//!
//! Moves produced here may leave the mover's king attacked. Pawn diagonals
//! are emitted whether or not something can be captured there; the
//! [`legality`](crate::legality) filter prunes them down to real captures.

use std::fmt::{self, Display, Formatter};

use crate::{
    attack::is_attacked,
    board::Board,
    castling_right::Side,
    coord::{Coord, Vector, home_rank, pawn_home_rank},
    piece::{Piece, PieceKind},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Castle {
    pub rook_from: Coord,
    pub rook_to: Coord,
}

/// A move as produced by the generator. Promotion is decided when the move is
/// applied, not stored here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub piece: Piece,
    pub from: Coord,
    pub to: Coord,
    pub castle: Option<Castle>,
    /// Square of the pawn removed by an en passant capture.
    pub en_passant_captured: Option<Coord>,
}
impl Move {
    pub fn new(piece: Piece, from: Coord, to: Coord) -> Self {
        Move {
            piece,
            from,
            to,
            castle: None,
            en_passant_captured: None,
        }
    }
    pub fn is_diagonal_pawn_move(self) -> bool {
        self.piece.kind == PieceKind::Pawn && self.from.col != self.to.col
    }
    pub fn is_double_pawn_advance(self) -> bool {
        self.piece.kind == PieceKind::Pawn
            && self.from.row == pawn_home_rank(self.piece.color)
            && self.to - self.from == Vector::pawn_double_move(self.piece.color)
    }
}
/// Long algebraic notation, castling written as the king's two-square step.
impl Display for Move {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        Ok(())
    }
}

pub fn pseudo_moves(piece: Piece, from: Coord, board: &Board) -> Vec<Move> {
    let mut moves = Vec::new();
    match piece.kind {
        PieceKind::Pawn => pawn_moves(piece, from, board, &mut moves),
        PieceKind::Knight => step_moves(piece, from, board, &Vector::KNIGHT_MOVES, &mut moves),
        PieceKind::Bishop => {
            directional_moves(piece, from, board, &Vector::BISHOP_DIRECTIONS, &mut moves);
        }
        PieceKind::Rook => {
            directional_moves(piece, from, board, &Vector::ROOK_DIRECTIONS, &mut moves);
        }
        PieceKind::Queen => {
            directional_moves(piece, from, board, &Vector::BISHOP_DIRECTIONS, &mut moves);
            directional_moves(piece, from, board, &Vector::ROOK_DIRECTIONS, &mut moves);
        }
        PieceKind::King => {
            step_moves(piece, from, board, &Vector::KING_MOVES, &mut moves);
            castling_moves(piece, from, board, &mut moves);
        }
    }
    moves
}
fn pawn_moves(piece: Piece, from: Coord, board: &Board, moves: &mut Vec<Move>) {
    let forward = Vector::pawn_single_move(piece.color);
    if let Some(single) = from.move_by(forward)
        && board[single].is_none()
    {
        moves.push(Move::new(piece, from, single));
        if from.row == pawn_home_rank(piece.color)
            && let Some(double) = single.move_by(forward)
            && board[double].is_none()
        {
            moves.push(Move::new(piece, from, double));
        }
    }
    moves.extend(
        Vector::pawn_attacks(piece.color)
            .into_iter()
            .filter_map(|attack| from.move_by(attack))
            .map(|destination| Move::new(piece, from, destination)),
    );
    for side in [-1, 1] {
        let Some(beside) = from.move_by(Vector { row: 0, col: side }) else {
            continue;
        };
        let vulnerable = board[beside].is_some_and(|other| {
            other.color != piece.color
                && other.kind == PieceKind::Pawn
                && other.en_passant_vulnerable
        });
        if vulnerable && let Some(destination) = beside.move_by(forward) {
            moves.push(Move {
                en_passant_captured: Some(beside),
                ..Move::new(piece, from, destination)
            });
        }
    }
}
fn step_moves(piece: Piece, from: Coord, board: &Board, offsets: &[Vector], moves: &mut Vec<Move>) {
    moves.extend(
        offsets
            .iter()
            .filter_map(|offset| from.move_by(*offset))
            .filter(|destination| board[*destination].is_none_or(|other| other.color != piece.color))
            .map(|destination| Move::new(piece, from, destination)),
    );
}
fn directional_moves(
    piece: Piece,
    from: Coord,
    board: &Board,
    directions: &[Vector],
    moves: &mut Vec<Move>,
) {
    for direction in directions {
        for destination in from.line(*direction) {
            match board[destination] {
                None => moves.push(Move::new(piece, from, destination)),
                Some(other) => {
                    if other.color != piece.color {
                        moves.push(Move::new(piece, from, destination));
                    }
                    break;
                }
            }
        }
    }
}
fn castling_moves(piece: Piece, from: Coord, board: &Board, moves: &mut Vec<Move>) {
    let color = piece.color;
    if from != Coord::new(home_rank(color), 4) || is_attacked(board, from, color) {
        return;
    }
    for side in Side::ALL {
        if !board.castling_right.get(color, side) {
            continue;
        }
        let rook_from = side.rook_origin(color);
        if !board[rook_from].is_some_and(|rook| rook.is(color, PieceKind::Rook)) {
            continue;
        }
        let between = match side {
            Side::KingSide => 5..7,
            Side::QueenSide => 1..4,
        };
        let rook_to = side.rook_destination(color);
        let transit = rook_to;
        if between
            .map(|col| Coord::new(from.row, col))
            .all(|position| board[position].is_none())
            && !is_attacked(board, transit, color)
        {
            moves.push(Move {
                castle: Some(Castle { rook_from, rook_to }),
                ..Move::new(piece, from, side.king_destination(color))
            });
        }
    }
}
#[cfg(test)]
mod test {
    use crate::{
        board::Board,
        color::Color,
        coord::Coord,
        game::Game,
        movegen::{Castle, Move, pseudo_moves},
        piece::{Piece, PieceKind},
    };

    fn moves_from(board: &Board, from: &str) -> Vec<Move> {
        let from: Coord = from.parse().unwrap();
        pseudo_moves(board[from].unwrap(), from, board)
    }
    fn destinations(moves: &[Move]) -> Vec<String> {
        let mut destinations: Vec<_> = moves.iter().map(|movement| movement.to.to_string()).collect();
        destinations.sort();
        destinations
    }

    #[test]
    fn pawn_emits_diagonals_unconditionally() {
        let board = Board::starting_position();
        assert_eq!(destinations(&moves_from(&board, "e2")), ["d3", "e3", "e4", "f3"]);
        assert_eq!(destinations(&moves_from(&board, "a7")), ["a5", "a6", "b6"]);
    }
    #[test]
    fn blocked_pawn() {
        let board = Game::from_fen("4k3/8/8/8/8/4n3/4P3/4K3 w - - 0 1")
            .unwrap()
            .board()
            .clone();
        assert_eq!(destinations(&moves_from(&board, "e2")), ["d3", "f3"]);
    }
    #[test]
    fn en_passant_move_carries_captured_square() {
        let mut board = Board::empty();
        board[Coord::new(3, 3)] = Some(Piece::new(Color::Black, PieceKind::Pawn));
        board[Coord::new(3, 4)] = Some(Piece {
            en_passant_vulnerable: true,
            ..Piece::new(Color::White, PieceKind::Pawn)
        });
        let moves = moves_from(&board, "d4");
        let en_passant: Vec<_> = moves
            .iter()
            .filter(|movement| movement.en_passant_captured.is_some())
            .collect();
        assert_eq!(en_passant.len(), 1);
        assert_eq!(en_passant[0].to, Coord::new(2, 4));
        assert_eq!(en_passant[0].en_passant_captured, Some(Coord::new(3, 4)));
    }
    #[test]
    fn sliders_stop_at_first_piece() {
        let board = Game::from_fen("4k3/8/8/8/1p6/8/8/R3K3 w - - 0 1")
            .unwrap()
            .board()
            .clone();
        assert_eq!(
            destinations(&moves_from(&board, "a1")),
            ["a2", "a3", "a4", "a5", "a6", "a7", "a8", "b1", "c1", "d1"]
        );
        let board = Game::from_fen("4k3/8/8/8/1p6/8/8/Q3K3 w - - 0 1")
            .unwrap()
            .board()
            .clone();
        let queen = moves_from(&board, "a1");
        assert!(queen.iter().any(|movement| movement.to.to_string() == "b2"));
        assert!(queen.iter().any(|movement| movement.to.to_string() == "a8"));
        assert!(!queen.iter().any(|movement| movement.to.to_string() == "e1"));
    }
    #[test]
    fn knight_in_corner() {
        let board = Board::starting_position();
        assert_eq!(destinations(&moves_from(&board, "b1")), ["a3", "c3"]);
    }
    #[test]
    fn king_side_castle_is_generated() {
        let board = Game::from_fen("4k3/8/8/8/8/8/8/R3K2R w KQ - 0 1")
            .unwrap()
            .board()
            .clone();
        let moves = moves_from(&board, "e1");
        let castles: Vec<_> = moves.iter().filter_map(|movement| movement.castle).collect();
        assert_eq!(
            castles,
            [
                Castle {
                    rook_from: Coord::new(0, 7),
                    rook_to: Coord::new(0, 5),
                },
                Castle {
                    rook_from: Coord::new(0, 0),
                    rook_to: Coord::new(0, 3),
                },
            ]
        );
        assert!(moves.iter().any(|movement| movement.castle.is_some() && movement.to == Coord::new(0, 6)));
    }
    #[test]
    fn castle_needs_free_and_safe_transit() {
        // f1 attacked by the bishop, b1 occupied
        let board = Game::from_fen("4k3/8/8/8/8/7b/8/RN2K2R w KQ - 0 1")
            .unwrap()
            .board()
            .clone();
        assert!(moves_from(&board, "e1").iter().all(|movement| movement.castle.is_none()));
    }
    #[test]
    fn no_castle_while_in_check() {
        let board = Game::from_fen("4k3/4r3/8/8/8/8/8/4K2R w K - 0 1")
            .unwrap()
            .board()
            .clone();
        assert!(moves_from(&board, "e1").iter().all(|movement| movement.castle.is_none()));
    }
    #[test]
    fn no_castle_without_right() {
        let board = Game::from_fen("4k3/8/8/8/8/8/8/R3K2R w - - 0 1")
            .unwrap()
            .board()
            .clone();
        assert!(moves_from(&board, "e1").iter().all(|movement| movement.castle.is_none()));
    }
}
