use thiserror::Error;

use crate::{color::Color, coord::Coord};

/// Broken board invariants. These only surface when a caller bypasses the
/// legality filter or hands over a corrupted board; the operation is aborted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum RulesError {
    #[error("no {0} king found on the board")]
    KingNotFound(Color),
    #[error("attempted to capture the king on {at}")]
    KingCaptured { at: Coord },
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
pub enum DecodeError {
    #[error("encoded board must be 65 symbols long, found {0}")]
    InvalidLength(usize),
    #[error("`{symbol}` at index {index} is not a hexadecimal digit")]
    InvalidSymbol { index: usize, symbol: char },
    #[error("symbol `{symbol}` for square {at} does not describe a piece")]
    InvalidPiece { at: Coord, symbol: char },
}
