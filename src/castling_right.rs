use std::fmt::{self, Display, Formatter};

use crate::{
    color::Color,
    coord::{Coord, home_rank},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    KingSide,
    QueenSide,
}
impl Side {
    pub const ALL: [Self; 2] = [Side::KingSide, Side::QueenSide];

    fn bit(self) -> u8 {
        match self {
            Side::KingSide => 0b_01,
            Side::QueenSide => 0b_10,
        }
    }
    pub fn rook_file(self) -> u8 {
        match self {
            Side::KingSide => 7,
            Side::QueenSide => 0,
        }
    }
    pub fn from_rook_file(col: u8) -> Option<Self> {
        match col {
            7 => Some(Side::KingSide),
            0 => Some(Side::QueenSide),
            _ => None,
        }
    }
    pub fn rook_origin(self, color: Color) -> Coord {
        Coord::new(home_rank(color), self.rook_file())
    }
    pub fn rook_destination(self, color: Color) -> Coord {
        match self {
            Side::KingSide => Coord::new(home_rank(color), 5),
            Side::QueenSide => Coord::new(home_rank(color), 3),
        }
    }
    pub fn king_destination(self, color: Color) -> Coord {
        match self {
            Side::KingSide => Coord::new(home_rank(color), 6),
            Side::QueenSide => Coord::new(home_rank(color), 2),
        }
    }
}

/// Per-color, per-side castling permission. Rights are only ever removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CastlingRight {
    white: u8,
    black: u8,
}
impl CastlingRight {
    pub fn none() -> Self {
        CastlingRight { white: 0, black: 0 }
    }
    pub fn all() -> Self {
        CastlingRight {
            white: 0b_11,
            black: 0b_11,
        }
    }
    fn byte(self, color: Color) -> u8 {
        match color {
            Color::White => self.white,
            Color::Black => self.black,
        }
    }
    fn byte_mut(&mut self, color: Color) -> &mut u8 {
        match color {
            Color::White => &mut self.white,
            Color::Black => &mut self.black,
        }
    }
    pub fn get(self, color: Color, side: Side) -> bool {
        self.byte(color) & side.bit() != 0
    }
    pub(crate) fn add(&mut self, color: Color, side: Side) {
        *self.byte_mut(color) |= side.bit();
    }
    pub fn remove(&mut self, color: Color, side: Side) {
        *self.byte_mut(color) &= !side.bit();
    }
    pub fn clear(&mut self, color: Color) {
        *self.byte_mut(color) = 0;
    }
    /// Drops the right tied to a rook standing on its original corner.
    pub fn remove_for_rook_at(&mut self, color: Color, position: Coord) {
        if position.row == home_rank(color)
            && let Some(side) = Side::from_rook_file(position.col)
        {
            self.remove(color, side);
        }
    }
    /// White king-side, white queen-side, black king-side, black queen-side, most significant first.
    pub fn nibble(self) -> u8 {
        [
            (Color::White, Side::KingSide),
            (Color::White, Side::QueenSide),
            (Color::Black, Side::KingSide),
            (Color::Black, Side::QueenSide),
        ]
        .into_iter()
        .fold(0, |nibble, (color, side)| {
            (nibble << 1) | u8::from(self.get(color, side))
        })
    }
    pub fn from_nibble(nibble: u8) -> Self {
        let mut castling_right = CastlingRight::none();
        for (bit, color, side) in [
            (0b_1000, Color::White, Side::KingSide),
            (0b_0100, Color::White, Side::QueenSide),
            (0b_0010, Color::Black, Side::KingSide),
            (0b_0001, Color::Black, Side::QueenSide),
        ] {
            if nibble & bit != 0 {
                castling_right.add(color, side);
            }
        }
        castling_right
    }
}
impl Default for CastlingRight {
    fn default() -> Self {
        CastlingRight::none()
    }
}
/// FEN form: `KQkq`, or `-` when nobody may castle.
impl Display for CastlingRight {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut written = false;
        for color in Color::ALL {
            for side in Side::ALL {
                if self.get(color, side) {
                    let c = match side {
                        Side::KingSide => 'K',
                        Side::QueenSide => 'Q',
                    };
                    let c = match color {
                        Color::White => c,
                        Color::Black => c.to_ascii_lowercase(),
                    };
                    written = true;
                    write!(f, "{c}")?;
                }
            }
        }
        if !written {
            write!(f, "-")?;
        }
        Ok(())
    }
}
