use tracing::{debug, error};

use crate::{
    board::Board,
    codec::encode,
    coord::pawn_promotion_rank,
    error::RulesError,
    movegen::Move,
    piece::{PieceKind, PromotionChoice},
};

/// Plays `movement` on `board` in place and returns the same board.
///
/// The move must come from [`legal_moves`](crate::legality::legal_moves);
/// its provenance is not re-validated. `promote` is called exactly once, and
/// only when a pawn lands on its last rank. Capturing a king aborts the move
/// with [`RulesError::KingCaptured`] before anything is touched.
pub fn apply_move<'a>(
    movement: &Move,
    board: &'a mut Board,
    promote: impl FnOnce() -> PromotionChoice,
) -> Result<&'a mut Board, RulesError> {
    let captured = board[movement.to];
    if let Some(piece) = captured
        && piece.kind == PieceKind::King
    {
        error!(%movement, "move captures a king");
        return Err(RulesError::KingCaptured { at: movement.to });
    }
    let key = encode(board);
    let repetition = board.record(key);

    let piece = board[movement.from].take().unwrap_or(movement.piece);
    let is_capture = captured.is_some() || movement.en_passant_captured.is_some();
    if is_capture || piece.kind == PieceKind::Pawn {
        board.fifty_move_counter = 0;
    } else {
        board.fifty_move_counter = board.fifty_move_counter.saturating_add(1);
    }
    board[movement.to] = Some(piece);

    if let Some(castle) = movement.castle {
        let rook = board[castle.rook_from].take();
        board[castle.rook_to] = rook;
        board.castling_right.clear(piece.color);
    }
    match piece.kind {
        PieceKind::King => board.castling_right.clear(piece.color),
        PieceKind::Rook => board
            .castling_right
            .remove_for_rook_at(piece.color, movement.from),
        _ => (),
    }
    if let Some(captured) = captured
        && captured.kind == PieceKind::Rook
    {
        board
            .castling_right
            .remove_for_rook_at(captured.color, movement.to);
    }
    if let Some(position) = movement.en_passant_captured {
        board[position] = None;
    }

    board.clear_en_passant_flags();
    if movement.is_double_pawn_advance()
        && let Some(pawn) = &mut board[movement.to]
    {
        pawn.en_passant_vulnerable = true;
    }

    if piece.kind == PieceKind::Pawn
        && movement.to.row == pawn_promotion_rank(piece.color)
        && let Some(pawn) = &mut board[movement.to]
    {
        let choice = promote();
        pawn.kind = choice.into();
        debug!(%movement, kind = %pawn.kind, "promoted");
    }
    debug!(
        %movement,
        capture = is_capture,
        counter = board.fifty_move_counter,
        repetition,
        "applied move"
    );
    Ok(board)
}
#[cfg(test)]
mod test {
    use std::cell::Cell;

    use crate::{
        apply::apply_move,
        board::Board,
        castling_right::Side,
        codec::encode,
        color::Color,
        coord::Coord,
        error::RulesError,
        game::Game,
        legality::legal_moves,
        movegen::Move,
        piece::{Piece, PieceKind, PromotionChoice},
    };

    fn board(fen: &str) -> Board {
        Game::from_fen(fen).unwrap().board().clone()
    }
    fn find(board: &Board, color: Color, lan: &str) -> Move {
        legal_moves(board, color)
            .unwrap()
            .into_iter()
            .find(|movement| movement.to_string() == lan)
            .unwrap()
    }
    fn at(name: &str) -> Coord {
        name.parse().unwrap()
    }

    #[test]
    fn records_pre_move_key() {
        let mut board = Board::starting_position();
        let key = encode(&board);
        let movement = find(&board, Color::White, "g1f3");
        apply_move(&movement, &mut board, || PromotionChoice::Queen).unwrap();
        assert_eq!(board.recorded(&key), 1);
        assert_eq!(board.recorded(&encode(&board)), 0);
        assert_eq!(board.fifty_move_counter, 1);
    }
    #[test]
    fn fifty_move_counter_resets() {
        let mut board = board("4k3/8/8/3p4/8/8/4P3/R3K3 w - - 0 1");
        board.fifty_move_counter = 40;
        let movement = find(&board, Color::White, "a1a4");
        apply_move(&movement, &mut board, || PromotionChoice::Queen).unwrap();
        assert_eq!(board.fifty_move_counter, 41);
        let movement = find(&board, Color::White, "e2e3");
        apply_move(&movement, &mut board, || PromotionChoice::Queen).unwrap();
        assert_eq!(board.fifty_move_counter, 0);
        let movement = find(&board, Color::Black, "d5d4");
        apply_move(&movement, &mut board, || PromotionChoice::Queen).unwrap();
        board.fifty_move_counter = 12;
        let movement = find(&board, Color::White, "a4d4");
        apply_move(&movement, &mut board, || PromotionChoice::Queen).unwrap();
        assert_eq!(board.fifty_move_counter, 0);
    }
    #[test]
    fn imported_counter_saturates() {
        let mut board = board("4k3/8/8/8/8/8/8/4K3 w - - 4294967295 1");
        assert_eq!(legal_moves(&board, Color::White).unwrap().len(), 5);
        let movement = find(&board, Color::White, "e1d1");
        apply_move(&movement, &mut board, || PromotionChoice::Queen).unwrap();
        assert_eq!(board.fifty_move_counter, u32::MAX);
    }
    #[test]
    fn castling_moves_rook_and_clears_rights() {
        let mut board = board("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        let movement = find(&board, Color::White, "e1g1");
        apply_move(&movement, &mut board, || PromotionChoice::Queen).unwrap();
        assert_eq!(
            board[at("g1")],
            Some(Piece::new(Color::White, PieceKind::King))
        );
        assert_eq!(
            board[at("f1")],
            Some(Piece::new(Color::White, PieceKind::Rook))
        );
        assert_eq!(board[at("h1")], None);
        assert_eq!(board[at("e1")], None);
        assert!(!board.castling_right.get(Color::White, Side::KingSide));
        assert!(!board.castling_right.get(Color::White, Side::QueenSide));
        assert!(board.castling_right.get(Color::Black, Side::QueenSide));

        let movement = find(&board, Color::Black, "e8c8");
        apply_move(&movement, &mut board, || PromotionChoice::Queen).unwrap();
        assert_eq!(
            board[at("d8")],
            Some(Piece::new(Color::Black, PieceKind::Rook))
        );
        assert_eq!(board[at("a8")], None);
        assert_eq!(board.castling_right.to_string(), "-");
    }
    #[test]
    fn rook_moves_and_captures_clear_one_side() {
        let mut board = board("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        let movement = find(&board, Color::White, "h1h8");
        apply_move(&movement, &mut board, || PromotionChoice::Queen).unwrap();
        assert_eq!(board.castling_right.to_string(), "Qq");
    }
    #[test]
    fn en_passant_flag_lifecycle() {
        let mut board = board("4k3/3p4/8/4P3/8/8/8/4K3 b - - 0 1");
        let movement = find(&board, Color::Black, "d7d5");
        apply_move(&movement, &mut board, || PromotionChoice::Queen).unwrap();
        assert!(board[at("d5")].is_some_and(|pawn| pawn.en_passant_vulnerable));

        let movement = find(&board, Color::White, "e5d6");
        assert_eq!(movement.en_passant_captured, Some(at("d5")));
        apply_move(&movement, &mut board, || PromotionChoice::Queen).unwrap();
        assert_eq!(board[at("d5")], None);
        assert_eq!(
            board[at("d6")],
            Some(Piece::new(Color::White, PieceKind::Pawn))
        );
        assert_eq!(board.fifty_move_counter, 0);
    }
    #[test]
    fn flag_expires_after_one_move() {
        let mut board = board("4k3/3p4/8/4P3/8/8/8/4K3 b - - 0 1");
        let movement = find(&board, Color::Black, "d7d5");
        apply_move(&movement, &mut board, || PromotionChoice::Queen).unwrap();
        let movement = find(&board, Color::White, "e1e2");
        apply_move(&movement, &mut board, || PromotionChoice::Queen).unwrap();
        assert!(board.pieces().all(|(_, piece)| !piece.en_passant_vulnerable));
    }
    #[test]
    fn promotion_asks_exactly_once() {
        let mut board = board("4k3/1P6/8/8/8/8/8/4K3 w - - 0 1");
        let calls = Cell::new(0);
        let movement = find(&board, Color::White, "b7b8");
        apply_move(&movement, &mut board, || {
            calls.set(calls.get() + 1);
            PromotionChoice::Knight
        })
        .unwrap();
        assert_eq!(calls.get(), 1);
        assert_eq!(
            board[at("b8")],
            Some(Piece::new(Color::White, PieceKind::Knight))
        );

        let movement = find(&board, Color::Black, "e8e7");
        apply_move(&movement, &mut board, || {
            calls.set(calls.get() + 1);
            PromotionChoice::Queen
        })
        .unwrap();
        assert_eq!(calls.get(), 1);
    }
    #[test]
    fn king_capture_is_fatal() {
        let mut board = board("4k3/8/8/8/8/8/8/4K2R w - - 0 1");
        let before = board.clone();
        let movement = Move::new(
            Piece::new(Color::White, PieceKind::Rook),
            at("h1"),
            at("e8"),
        );
        assert_eq!(
            apply_move(&movement, &mut board, || PromotionChoice::Queen).map(|_| ()),
            Err(RulesError::KingCaptured { at: at("e8") })
        );
        assert_eq!(board, before);
    }
}
