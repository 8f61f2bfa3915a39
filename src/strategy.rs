use rand::{Rng, SeedableRng, rngs::SmallRng};

use crate::{
    board::Board,
    color::Color,
    error::RulesError,
    legality::legal_moves,
    movegen::Move,
    piece::PromotionChoice,
};

/// Something that picks moves for one side. The rules never choose moves
/// themselves.
pub trait Strategy {
    /// One of the legal moves of `color`, or `None` if it has none.
    fn select(&mut self, board: &Board, color: Color) -> Result<Option<Move>, RulesError>;
    fn promote(&mut self) -> PromotionChoice;
}

/// Plays a uniformly random legal move and promotes to a random piece.
#[derive(Debug, Clone)]
pub struct RandomMover {
    rng: SmallRng,
}
impl RandomMover {
    pub fn new() -> Self {
        RandomMover {
            rng: SmallRng::from_os_rng(),
        }
    }
    pub fn seeded(seed: u64) -> Self {
        RandomMover {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}
impl Default for RandomMover {
    fn default() -> Self {
        RandomMover::new()
    }
}
impl Strategy for RandomMover {
    fn select(&mut self, board: &Board, color: Color) -> Result<Option<Move>, RulesError> {
        let moves = legal_moves(board, color)?;
        if moves.is_empty() {
            return Ok(None);
        }
        Ok(Some(moves[self.rng.random_range(0..moves.len())]))
    }
    fn promote(&mut self) -> PromotionChoice {
        PromotionChoice::ALL[self.rng.random_range(0..PromotionChoice::ALL.len())]
    }
}
