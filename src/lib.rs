#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]

pub mod apply;
pub mod attack;
pub mod board;
pub mod board_display;
pub mod castling_right;
pub mod codec;
pub mod color;
pub mod coord;
pub mod end_state;
pub mod error;
pub mod fen;
pub mod game;
pub mod legality;
mod misc;
pub mod movegen;
pub mod piece;
pub mod repl;
pub mod strategy;

#[cfg(test)]
mod fuzz;
