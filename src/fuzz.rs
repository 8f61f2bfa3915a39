//! Seeded random playouts. The legal move set of every visited position is
//! compared with the `chess` crate's generator, using FEN as the bridge, and
//! the board-level properties are checked along the way.

use rustc_hash::FxHashSet;

use crate::{
    apply::apply_move,
    board_display::BoardDisplay,
    codec::{decode, encode},
    coord::Coord,
    end_state::{is_check, is_checkmate},
    game::Game,
    piece::PromotionChoice,
    strategy::RandomMover,
};

const GAMES: u64 = 40;
const MAX_PLIES: usize = 300;

impl From<chess::Square> for Coord {
    fn from(value: chess::Square) -> Self {
        Coord::new(
            value.get_rank().to_index().try_into().unwrap(),
            value.get_file().to_index().try_into().unwrap(),
        )
    }
}
fn reference_moves(game: &Game) -> FxHashSet<(Coord, Coord)> {
    let board: chess::Board = game.to_string().parse().unwrap();
    chess::MoveGen::new_legal(&board)
        .map(|movement| (movement.get_source().into(), movement.get_dest().into()))
        .collect()
}
fn check_position(game: &Game) {
    let board = game.board();
    let moves = game.legal_moves().unwrap();
    let found: FxHashSet<_> = moves.iter().map(|movement| (movement.from, movement.to)).collect();
    assert_eq!(found.len(), moves.len(), "duplicate moves\n{game}");
    let expected = reference_moves(game);
    if let Some((from, to)) = found.difference(&expected).next() {
        panic!(
            "found {from}{to} but it's not a legal move\n{}\n{game}",
            BoardDisplay::new(board)
        );
    }
    if let Some((from, to)) = expected.difference(&found).next() {
        panic!("{from}{to} not found\n{}\n{game}", BoardDisplay::new(board));
    }

    assert!(decode(&encode(board)).unwrap().same_position(board));
    for movement in &moves {
        let mut simulation = board.snapshot();
        apply_move(movement, &mut simulation, || PromotionChoice::Queen).unwrap();
        assert!(!is_check(&simulation, game.turn()).unwrap(), "{movement} leaves the king in check\n{game}");
    }
    assert_eq!(
        is_checkmate(board, game.turn()).unwrap(),
        game.is_check().unwrap() && moves.is_empty(),
        "{game}"
    );
}
#[test]
fn random_games_match_reference() {
    for seed in 0..GAMES {
        let mut game = Game::new();
        let mut mover = RandomMover::seeded(seed);
        for _ in 0..MAX_PLIES {
            check_position(&game);
            if game.play_with(&mut mover).unwrap().is_none() {
                break;
            }
        }
    }
}
#[test]
fn tactical_positions_match_reference() {
    let positions = [
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
        "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
        "8/8/8/2k5/3Pp3/8/8/4K3 b - d3 0 1",
    ];
    for (seed, fen) in (0..).zip(positions) {
        let mut game = Game::from_fen(fen).unwrap();
        let mut mover = RandomMover::seeded(seed);
        for _ in 0..60 {
            check_position(&game);
            if game.play_with(&mut mover).unwrap().is_none() {
                break;
            }
        }
    }
}
