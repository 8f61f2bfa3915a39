use std::{
    fmt::{self, Display, Formatter},
    io::{self, BufRead, Write, stderr, stdin, stdout},
    str::FromStr,
};

use thiserror::Error;
use tracing::{debug, info};

use crate::{
    board_display::BoardDisplay,
    codec::encode,
    color::Color,
    coord::Coord,
    error::RulesError,
    fen::{Fen, ParseFenError},
    game::{Game, Lan, ParseLanError},
    misc::strip_prefix_token,
    movegen::Move,
    piece::PromotionChoice,
    strategy::RandomMover,
};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Input {
    Help,
    Flip,
    Restart,
    Quit,
    Import(Box<Fen>),
    ExportFen,
    ExportKey,
    Coord(Coord),
    Move(Lan),
    Bot,
}
impl Display for Input {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Input::Help => write!(f, "help")?,
            Input::Flip => write!(f, "flip")?,
            Input::Restart => write!(f, "restart")?,
            Input::Quit => write!(f, "quit")?,
            Input::Import(fen) => write!(f, "import {fen}")?,
            Input::ExportFen => write!(f, "fen")?,
            Input::ExportKey => write!(f, "key")?,
            Input::Coord(position) => write!(f, "{position}")?,
            Input::Move(movement) => write!(f, "{movement}")?,
            Input::Bot => write!(f, "bot")?,
        }
        Ok(())
    }
}
impl FromStr for Input {
    type Err = ParseInputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "help" => Ok(Input::Help),
            "flip" => Ok(Input::Flip),
            "restart" => Ok(Input::Restart),
            "quit" => Ok(Input::Quit),
            "fen" => Ok(Input::ExportFen),
            "key" => Ok(Input::ExportKey),
            "bot" => Ok(Input::Bot),
            s => {
                if let Some(s) = strip_prefix_token(s, "import") {
                    Ok(Input::Import(Box::new(s.parse()?)))
                } else if let Ok(position) = s.parse() {
                    Ok(Input::Coord(position))
                } else {
                    Ok(Input::Move(s.parse()?))
                }
            }
        }
    }
}
#[derive(Debug, Clone, PartialEq, Eq, Error)]
enum ParseInputError {
    #[error(transparent)]
    Fen(#[from] ParseFenError),
    #[error(transparent)]
    Move(#[from] ParseLanError),
}

fn status(game: &Game, moves: &mut Vec<Move>) -> Result<String, RulesError> {
    moves.clear();
    if let Some(end_state) = game.outcome()? {
        info!(%end_state, "game over");
        return Ok(format!("{end_state}\n"));
    }
    moves.extend(game.legal_moves()?);
    let mut info = format!("{} plays\n", game.turn());
    if game.is_check()? {
        info.push_str("check\n");
    }
    Ok(info)
}
fn to_io_error(error: RulesError) -> io::Error {
    io::Error::other(error)
}
#[allow(
    clippy::too_many_lines,
    reason = "further decomposition could potentially hurt readability"
)]
pub fn repl() -> io::Result<()> {
    let input = stdin().lock();
    let mut output = stdout().lock();
    let mut error = stderr().lock();

    let mut lines = input.lines();

    let mut game = Game::new();
    let mut info = String::new();
    let mut highlighted = Vec::new();
    let mut valid_moves = Vec::new();
    let mut update = true;
    let mut view = Color::White;
    let mut first_time = true;
    let mut bot = RandomMover::new();
    info!("new game");
    loop {
        if update {
            info = status(&game, &mut valid_moves).map_err(to_io_error)?;
        }
        if first_time {
            info.push_str("type `help` for instructions\n");
            first_time = false;
        }
        update = false;
        writeln!(
            output,
            "{}",
            BoardDisplay {
                board: game.board(),
                view,
                highlighted: &highlighted,
                info: &info,
            },
        )?;
        loop {
            write!(output, "> ")?;
            output.flush()?;
            let Some(text) = lines.next() else {
                return Ok(());
            };
            let text = text?;
            let input = match text.trim().parse() {
                Ok(input) => input,
                Err(err) => {
                    writeln!(error, "Error: {err}")?;
                    writeln!(error, "for available command, enter `help`")?;
                    continue;
                }
            };
            debug!(%input, "command");
            match input {
                Input::Help => {
                    writeln!(output, "flip           - flip the board")?;
                    writeln!(output, "restart        - reset to starting position")?;
                    writeln!(output, "quit           - quit the game")?;
                    writeln!(output, "import <fen>   - import a position")?;
                    writeln!(output, "fen            - export the position as fen")?;
                    writeln!(output, "key            - export the position as a board key")?;
                    writeln!(output, "e2             - view valid moves")?;
                    writeln!(output, "e2e4           - play the move")?;
                    writeln!(output, "e7e8q          - move and promote")?;
                    writeln!(output, "e1g1           - perform castling")?;
                    writeln!(output, "bot            - let a random bot play")?;
                }
                Input::Flip => {
                    view = !view;
                }
                Input::Restart => {
                    game = Game::new();
                    info!("new game");
                    update = true;
                    highlighted.clear();
                }
                Input::Quit => return Ok(()),
                Input::Import(fen) => {
                    info!(%fen, "imported position");
                    game = Game::from(*fen);
                    update = true;
                    highlighted.clear();
                }
                Input::ExportFen => {
                    writeln!(output, "{game}")?;
                }
                Input::ExportKey => {
                    writeln!(output, "{}", encode(game.board()))?;
                }
                Input::Coord(position) => {
                    if let Some(piece) = game.board()[position] {
                        if piece.color != game.turn() {
                            writeln!(error, "Error: It is {}'s turn", game.turn())?;
                            continue;
                        }
                        highlighted.clear();
                        highlighted.extend(
                            valid_moves
                                .iter()
                                .filter(|movement| movement.from == position)
                                .map(|movement| movement.to),
                        );
                    } else {
                        writeln!(error, "Error: No piece found on {position}")?;
                        continue;
                    }
                }
                Input::Move(lan) => {
                    let Some(movement) = valid_moves
                        .iter()
                        .find(|movement| movement.from == lan.from && movement.to == lan.to)
                    else {
                        writeln!(error, "Error: {lan} is an invalid move")?;
                        continue;
                    };
                    game.play(movement, || {
                        lan.promotion.unwrap_or(PromotionChoice::Queen)
                    })
                    .map_err(to_io_error)?;
                    highlighted.clear();
                    highlighted.push(lan.from);
                    highlighted.push(lan.to);
                    update = true;
                }
                Input::Bot => {
                    if let Some(end_state) = game.outcome().map_err(to_io_error)? {
                        writeln!(error, "Error: the game is over ({end_state})")?;
                        continue;
                    }
                    let Some(movement) = game.play_with(&mut bot).map_err(to_io_error)? else {
                        continue;
                    };
                    writeln!(output, "bot plays {movement}")?;
                    highlighted.clear();
                    highlighted.push(movement.from);
                    highlighted.push(movement.to);
                    update = true;
                }
            }
            break;
        }
    }
}
