use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use thiserror::Error;

use crate::{
    apply::apply_move,
    board::Board,
    color::Color,
    coord::{Coord, ParseCoordError},
    end_state::{EndState, is_check, outcome},
    error::RulesError,
    fen::{Fen, ParseFenError},
    legality::legal_moves,
    movegen::Move,
    piece::PromotionChoice,
    strategy::Strategy,
};

/// Move written the way it is typed: origin, destination and an optional
/// promotion letter, like `e2e4` or `e7e8q`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Lan {
    pub from: Coord,
    pub to: Coord,
    pub promotion: Option<PromotionChoice>,
}
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ParseLanError {
    #[error(transparent)]
    Coord(#[from] ParseCoordError),
    #[error("provided string have length of {0} characters, 4 or 5 were expected")]
    InvalidLength(usize),
    #[error("found `{0}`, expected one of `q`, `r`, `b`, or `n`")]
    InvalidPromotion(char),
}
impl FromStr for Lan {
    type Err = ParseLanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s.chars().collect();
        let (squares, promotion) = match chars.as_slice() {
            [a, b, c, d] => ([*a, *b, *c, *d], None),
            [a, b, c, d, e] => ([*a, *b, *c, *d], Some(*e)),
            chars => return Err(ParseLanError::InvalidLength(chars.len())),
        };
        let [from_file, from_rank, to_file, to_rank] = squares;
        let promotion = promotion
            .map(|c| PromotionChoice::from_fen(c).ok_or(ParseLanError::InvalidPromotion(c)))
            .transpose()?;
        Ok(Lan {
            from: Coord::from_chars(from_file, from_rank)?,
            to: Coord::from_chars(to_file, to_rank)?,
            promotion,
        })
    }
}
impl Display for Lan {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(promotion) = self.promotion {
            write!(f, "{}", promotion.lowercase())?;
        }
        Ok(())
    }
}

/// A game in progress: the authoritative board plus whose turn it is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    board: Board,
    turn: Color,
    full_move: u32,
}
impl Game {
    pub fn new() -> Self {
        Game {
            board: Board::starting_position(),
            turn: Color::White,
            full_move: 1,
        }
    }
    pub fn from_fen(fen: &str) -> Result<Self, ParseFenError> {
        Ok(fen.parse::<Fen>()?.into())
    }
    pub fn board(&self) -> &Board {
        &self.board
    }
    pub fn turn(&self) -> Color {
        self.turn
    }
    pub fn legal_moves(&self) -> Result<Vec<Move>, RulesError> {
        legal_moves(&self.board, self.turn)
    }
    /// The legal move of the side to move going from `from` to `to`, if any.
    pub fn find_move(&self, from: Coord, to: Coord) -> Result<Option<Move>, RulesError> {
        Ok(self
            .legal_moves()?
            .into_iter()
            .find(|movement| movement.from == from && movement.to == to))
    }
    /// Applies a move obtained from [`Game::legal_moves`] and passes the turn.
    pub fn play(
        &mut self,
        movement: &Move,
        promote: impl FnOnce() -> PromotionChoice,
    ) -> Result<(), RulesError> {
        apply_move(movement, &mut self.board, promote)?;
        if self.turn == Color::Black {
            self.full_move += 1;
        }
        self.turn = !self.turn;
        Ok(())
    }
    /// Lets `strategy` pick and play a move for the side to move. Returns
    /// `None` once the game is over, draws included.
    pub fn play_with(&mut self, strategy: &mut impl Strategy) -> Result<Option<Move>, RulesError> {
        if self.outcome()?.is_some() {
            return Ok(None);
        }
        let Some(movement) = strategy.select(&self.board, self.turn)? else {
            return Ok(None);
        };
        self.play(&movement, || strategy.promote())?;
        Ok(Some(movement))
    }
    pub fn is_check(&self) -> Result<bool, RulesError> {
        is_check(&self.board, self.turn)
    }
    pub fn outcome(&self) -> Result<Option<EndState>, RulesError> {
        outcome(&self.board, self.turn)
    }
    pub fn fen(&self) -> Fen {
        Fen {
            board: self.board.clone(),
            turn: self.turn,
            full_move: self.full_move,
        }
    }
}
impl Default for Game {
    fn default() -> Self {
        Game::new()
    }
}
impl From<Fen> for Game {
    fn from(value: Fen) -> Self {
        Game {
            board: value.board,
            turn: value.turn,
            full_move: value.full_move,
        }
    }
}
impl Display for Game {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.fen())?;
        Ok(())
    }
}
