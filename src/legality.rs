use tracing::trace;

use crate::{
    apply::apply_move,
    board::Board,
    color::Color,
    end_state::is_check,
    error::RulesError,
    movegen::{Move, pseudo_moves},
    piece::PromotionChoice,
};

/// Diagonal pawn moves are only real when they capture something.
pub(crate) fn is_valid_pawn_diagonal(movement: &Move, board: &Board) -> bool {
    !movement.is_diagonal_pawn_move()
        || movement.en_passant_captured.is_some()
        || board[movement.to].is_some_and(|piece| piece.color != movement.piece.color)
}
/// Plays `movement` on a snapshot of `board` and reports whether the mover's
/// king is left unattacked. The promotion is irrelevant to the check test, so
/// a queen stands in.
pub(crate) fn leaves_king_safe(movement: &Move, board: &Board) -> Result<bool, RulesError> {
    let mut simulation = board.snapshot();
    apply_move(movement, &mut simulation, || PromotionChoice::Queen)?;
    let safe = !is_check(&simulation, movement.piece.color)?;
    trace!(%movement, safe, "simulated move");
    Ok(safe)
}
pub fn is_legal(movement: &Move, board: &Board) -> Result<bool, RulesError> {
    if !is_valid_pawn_diagonal(movement, board) {
        return Ok(false);
    }
    leaves_king_safe(movement, board)
}
/// Every legal move of `color`, grouped by origin square in row-major order
/// from a1.
pub fn legal_moves(board: &Board, color: Color) -> Result<Vec<Move>, RulesError> {
    let mut moves = Vec::new();
    for (position, piece) in board.pieces_of(color) {
        for movement in pseudo_moves(piece, position, board) {
            if is_legal(&movement, board)? {
                moves.push(movement);
            }
        }
    }
    Ok(moves)
}
