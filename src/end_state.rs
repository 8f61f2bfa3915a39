use std::fmt::{self, Display, Formatter};

use crate::{
    attack::is_attacked,
    board::Board,
    codec::encode,
    color::Color,
    error::RulesError,
    legality::{is_valid_pawn_diagonal, leaves_king_safe},
    movegen::pseudo_moves,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawReason {
    Repetition,
    FiftyMove,
    Stalemate,
}
impl Display for DrawReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            DrawReason::Repetition => write!(f, "threefold repetition")?,
            DrawReason::FiftyMove => write!(f, "fifty-move rule")?,
            DrawReason::Stalemate => write!(f, "stalemate")?,
        }
        Ok(())
    }
}
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EndState {
    Checkmate { winner: Color },
    Draw(DrawReason),
}
impl Display for EndState {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            EndState::Checkmate { winner } => write!(f, "checkmate, {winner} wins")?,
            EndState::Draw(reason) => write!(f, "draw by {reason}")?,
        }
        Ok(())
    }
}

/// Half-moves without capture or pawn move after which the game is drawn.
pub const FIFTY_MOVE_LIMIT: u32 = 100;
pub const REPETITION_LIMIT: u32 = 3;

pub fn is_check(board: &Board, color: Color) -> Result<bool, RulesError> {
    Ok(is_attacked(board, board.king_of(color)?, color))
}
fn has_legal_move(board: &Board, color: Color) -> Result<bool, RulesError> {
    for (position, piece) in board.pieces_of(color) {
        for movement in pseudo_moves(piece, position, board) {
            if is_valid_pawn_diagonal(&movement, board) && leaves_king_safe(&movement, board)? {
                return Ok(true);
            }
        }
    }
    Ok(false)
}
pub fn is_checkmate(board: &Board, color: Color) -> Result<bool, RulesError> {
    Ok(is_check(board, color)? && !has_legal_move(board, color)?)
}
fn is_stalemate(board: &Board, color: Color) -> Result<bool, RulesError> {
    Ok(!is_check(board, color)? && !has_legal_move(board, color)?)
}
fn draw_reason(board: &Board, color: Color) -> Result<Option<DrawReason>, RulesError> {
    let reason = if board.occurrences(&encode(board)) >= REPETITION_LIMIT {
        Some(DrawReason::Repetition)
    } else if board.fifty_move_counter >= FIFTY_MOVE_LIMIT {
        Some(DrawReason::FiftyMove)
    } else if is_stalemate(board, color)? {
        Some(DrawReason::Stalemate)
    } else {
        None
    };
    Ok(reason)
}
pub fn is_draw(board: &Board, color: Color) -> Result<bool, RulesError> {
    Ok(draw_reason(board, color)?.is_some())
}
/// How the game stands with `color` to move. Checkmate takes precedence over
/// the draw rules.
pub fn outcome(board: &Board, color: Color) -> Result<Option<EndState>, RulesError> {
    if is_checkmate(board, color)? {
        return Ok(Some(EndState::Checkmate { winner: !color }));
    }
    Ok(draw_reason(board, color)?.map(EndState::Draw))
}
