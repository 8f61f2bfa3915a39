use crate::{
    board::Board,
    color::Color,
    coord::{Coord, Vector},
    piece::PieceKind,
};

fn line_has<const N: usize>(
    board: &Board,
    mut line: impl Iterator<Item = Coord>,
    attacker: Color,
    kinds: [PieceKind; N],
) -> bool {
    line.find_map(|position| board[position])
        .is_some_and(|piece| piece.color == attacker && kinds.contains(&piece.kind))
}
fn any_square_has(
    board: &Board,
    position: Coord,
    offsets: &[Vector],
    attacker: Color,
    kind: PieceKind,
) -> bool {
    offsets
        .iter()
        .filter_map(|offset| position.move_by(*offset))
        .any(|position| board[position].is_some_and(|piece| piece.is(attacker, kind)))
}

/// Whether any piece of the opponent of `defender` attacks `position`.
///
/// Rays stop at the first occupied square. Pawns are looked up on the two
/// squares diagonally ahead of `position` from the defender's point of view.
pub fn is_attacked(board: &Board, position: Coord, defender: Color) -> bool {
    let attacker = !defender;
    Vector::ROOK_DIRECTIONS.into_iter().any(|direction| {
        line_has(
            board,
            position.line(direction),
            attacker,
            [PieceKind::Rook, PieceKind::Queen],
        )
    }) || Vector::BISHOP_DIRECTIONS.into_iter().any(|direction| {
        line_has(
            board,
            position.line(direction),
            attacker,
            [PieceKind::Bishop, PieceKind::Queen],
        )
    }) || any_square_has(
        board,
        position,
        &Vector::KNIGHT_MOVES,
        attacker,
        PieceKind::Knight,
    ) || any_square_has(
        board,
        position,
        &Vector::KING_MOVES,
        attacker,
        PieceKind::King,
    ) || any_square_has(
        board,
        position,
        &Vector::pawn_attacks(defender),
        attacker,
        PieceKind::Pawn,
    )
}
