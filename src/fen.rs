use std::{
    fmt::{self, Display, Formatter},
    num::ParseIntError,
    str::FromStr,
};

use thiserror::Error;

use crate::{
    board::Board,
    castling_right::{CastlingRight, Side},
    color::Color,
    coord::{Coord, ParseCoordError, Vector},
    piece::{Piece, PieceKind},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fen {
    pub board: Board,
    pub turn: Color,
    pub full_move: u32,
}
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseFenError {
    #[error("a row has less than 8 squares")]
    NotEnoughSquaresOnRow,
    #[error("a row has more than 8 squares")]
    ExceedingSquaresOnRow,
    #[error("unexpected `{0}`")]
    UnexpectedChar(char),
    #[error("unexpected end of position")]
    UnexpectedEol,
    #[error("unexpected `{0}` after the position")]
    TrailingField(String),
    #[error("invalid en passant target: {0}")]
    EnPassant(#[from] ParseCoordError),
    #[error("no pawn can be captured en passant behind {0}")]
    NoEnPassantPawn(Coord),
    #[error("invalid move counter: {0}")]
    Counter(#[from] ParseIntError),
}
fn parse_placement(placement: &str, board: &mut Board) -> Result<(), ParseFenError> {
    let mut rows = placement.split('/');
    for row in (0..8).rev() {
        let text = rows.next().ok_or(ParseFenError::UnexpectedEol)?;
        let mut x: u8 = 0;
        for c in text.chars() {
            if let Some(skip) = c.to_digit(10).filter(|skip| (1..=8).contains(skip)) {
                x += skip as u8;
                if x > 8 {
                    return Err(ParseFenError::ExceedingSquaresOnRow);
                }
            } else {
                let piece = Piece::from_fen(c).map_err(|_| ParseFenError::UnexpectedChar(c))?;
                if x >= 8 {
                    return Err(ParseFenError::ExceedingSquaresOnRow);
                }
                board[Coord::new(row, x)] = Some(piece);
                x += 1;
            }
        }
        if x < 8 {
            return Err(ParseFenError::NotEnoughSquaresOnRow);
        }
    }
    if rows.next().is_some() {
        return Err(ParseFenError::UnexpectedChar('/'));
    }
    Ok(())
}
fn parse_castling(field: &str) -> Result<CastlingRight, ParseFenError> {
    let mut castling_right = CastlingRight::none();
    if field == "-" {
        return Ok(castling_right);
    }
    for c in field.chars() {
        let (color, side) = match c {
            'K' => (Color::White, Side::KingSide),
            'Q' => (Color::White, Side::QueenSide),
            'k' => (Color::Black, Side::KingSide),
            'q' => (Color::Black, Side::QueenSide),
            c => return Err(ParseFenError::UnexpectedChar(c)),
        };
        castling_right.add(color, side);
    }
    Ok(castling_right)
}
impl FromStr for Fen {
    type Err = ParseFenError;

    /// Placement and side to move are required. The remaining fields default
    /// to `- - 0 1`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut fields = s.split_ascii_whitespace();
        let mut board = Board::empty();
        parse_placement(
            fields.next().ok_or(ParseFenError::UnexpectedEol)?,
            &mut board,
        )?;
        let turn_field = fields.next().ok_or(ParseFenError::UnexpectedEol)?;
        let turn: Color = turn_field.parse().map_err(|_| {
            ParseFenError::UnexpectedChar(turn_field.chars().next().unwrap_or(' '))
        })?;
        if let Some(field) = fields.next() {
            board.castling_right = parse_castling(field)?;
        }
        if let Some(field) = fields.next()
            && field != "-"
        {
            let target: Coord = field.parse()?;
            // the pawn that just moved belongs to the side not on move
            let pawn = target
                .move_by(Vector::pawn_single_move(!turn))
                .filter(|position| {
                    board[*position].is_some_and(|piece| piece.is(!turn, PieceKind::Pawn))
                })
                .ok_or(ParseFenError::NoEnPassantPawn(target))?;
            if let Some(piece) = &mut board[pawn] {
                piece.en_passant_vulnerable = true;
            }
        }
        if let Some(field) = fields.next() {
            board.fifty_move_counter = field.parse()?;
        }
        let full_move = match fields.next() {
            Some(field) => field.parse()?,
            None => 1,
        };
        if let Some(field) = fields.next() {
            return Err(ParseFenError::TrailingField(field.to_owned()));
        }
        Ok(Fen {
            board,
            turn,
            full_move,
        })
    }
}
impl Display for Fen {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for row in (0..8).rev() {
            let mut empty = 0;
            for col in 0..8 {
                match self.board[Coord::new(row, col)] {
                    Some(piece) => {
                        if empty > 0 {
                            write!(f, "{empty}")?;
                            empty = 0;
                        }
                        write!(f, "{}", piece.fen())?;
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                write!(f, "{empty}")?;
            }
            if row > 0 {
                write!(f, "/")?;
            }
        }
        write!(f, " {}", self.turn.lowercase())?;
        write!(f, " {}", self.board.castling_right)?;
        let target = self
            .board
            .pieces()
            .find(|(_, piece)| piece.en_passant_vulnerable)
            .and_then(|(position, piece)| position.move_by(Vector::pawn_single_move(!piece.color)));
        match target {
            Some(position) => write!(f, " {position}")?,
            None => write!(f, " -")?,
        }
        write!(f, " {} {}", self.board.fifty_move_counter, self.full_move)?;
        Ok(())
    }
}
