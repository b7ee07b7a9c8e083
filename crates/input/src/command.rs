//! Line mapping from typed commands to game actions.

use thiserror::Error;

use crate::core::packing::{PackingAction, PackingPuzzle};
use crate::core::pieces::PieceId;
use crate::core::sliding::{SlidingAction, SlidingPuzzle};
use crate::core::types::Coordinate;
use crate::core::{GameAction, GameState};

/// What the host should do with a line of input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Feed this action to the engine
    Play(GameAction),
    /// Put every packing piece back in the tray
    Reset,
    /// Show the next step of a packing solution
    Hint,
    /// Redraw the board
    Show,
    Help,
    Quit,
}

/// Why a line could not be turned into a command
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("empty input")]
    Empty,
    #[error("unknown command `{0}` (type `help`)")]
    Unknown(String),
    #[error("`{0}` is not a number")]
    NotANumber(String),
    #[error("position {row} {col} is off the board")]
    OffBoard { row: usize, col: usize },
    #[error("no tile labelled {0}")]
    NoSuchTile(usize),
    #[error("no piece named `{0}`")]
    NoSuchPiece(String),
    #[error("nothing selected to rotate")]
    NothingSelected,
    #[error("`{0}` only applies to the packing puzzle")]
    PackingOnly(&'static str),
}

/// Map a line of input to a command for `game`
pub fn parse_command(line: &str, game: &GameState) -> Result<Command, CommandError> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let Some(first) = words.first() else {
        return Err(CommandError::Empty);
    };

    match first.to_ascii_lowercase().as_str() {
        "q" | "quit" | "exit" => return Ok(Command::Quit),
        "show" | "board" => return Ok(Command::Show),
        "help" | "?" => return Ok(Command::Help),
        _ => {}
    }

    match game {
        GameState::Sliding(puzzle) => parse_sliding(&words, puzzle),
        GameState::Packing(puzzle) => parse_packing(&words, puzzle),
    }
}

fn parse_sliding(words: &[&str], puzzle: &SlidingPuzzle) -> Result<Command, CommandError> {
    let size = puzzle.size();
    let index = match words {
        ["reset"] => return Err(CommandError::PackingOnly("reset")),
        ["hint"] => return Err(CommandError::PackingOnly("hint")),
        [label] => {
            let label = number(label)?;
            puzzle
                .grid()
                .iter()
                .position(|tile| tile.map(usize::from) == Some(label))
                .ok_or(CommandError::NoSuchTile(label))?
        }
        [row, col] => position(row, col, size)?.to_index(size),
        _ => return Err(CommandError::Unknown(words.join(" "))),
    };
    Ok(Command::Play(SlidingAction::Tap(index).into()))
}

fn parse_packing(words: &[&str], puzzle: &PackingPuzzle) -> Result<Command, CommandError> {
    let size = puzzle.board().size();
    let verb = words[0].to_ascii_lowercase();
    let action = match (verb.as_str(), &words[1..]) {
        ("s" | "select", [piece]) => PackingAction::SelectPiece(piece_id(piece, puzzle)?),
        ("r" | "rotate", []) => {
            PackingAction::SelectPiece(puzzle.selected().ok_or(CommandError::NothingSelected)?)
        }
        ("p" | "place" | "t" | "tap", [row, col]) => PackingAction::TapCell(position(row, col, size)?),
        ("reset", []) => return Ok(Command::Reset),
        ("hint", []) => return Ok(Command::Hint),
        _ => return Err(CommandError::Unknown(words.join(" "))),
    };
    Ok(Command::Play(action.into()))
}

fn number(word: &str) -> Result<usize, CommandError> {
    word.parse()
        .map_err(|_| CommandError::NotANumber(word.to_string()))
}

/// 1-based `row col` to a board coordinate
fn position(row: &str, col: &str, size: usize) -> Result<Coordinate, CommandError> {
    let (row, col) = (number(row)?, number(col)?);
    if row == 0 || col == 0 || row > size || col > size {
        return Err(CommandError::OffBoard { row, col });
    }
    Ok(Coordinate::new(row - 1, col - 1))
}

/// A tray piece by display name (`T4`) or tray number (1-based)
fn piece_id(word: &str, puzzle: &PackingPuzzle) -> Result<PieceId, CommandError> {
    if let Some(piece) = puzzle.piece_by_name(word) {
        return Ok(piece.id);
    }
    word.parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|idx| puzzle.pieces().get(idx))
        .map(|piece| piece.id)
        .ok_or_else(|| CommandError::NoSuchPiece(word.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::GameMode;

    #[test]
    fn test_common_commands() {
        let game = GameState::new(GameMode::Daily15, 1);
        assert_eq!(parse_command("quit", &game), Ok(Command::Quit));
        assert_eq!(parse_command(" Q ", &game), Ok(Command::Quit));
        assert_eq!(parse_command("show", &game), Ok(Command::Show));
        assert_eq!(parse_command("?", &game), Ok(Command::Help));
        assert_eq!(parse_command("   ", &game), Err(CommandError::Empty));
    }

    #[test]
    fn test_sliding_label_and_position() {
        let game = GameState::new(GameMode::QuickBlitz, 77);
        let puzzle = game.as_sliding().unwrap();
        let index = puzzle.grid().iter().position(|t| *t == Some(5)).unwrap();

        assert_eq!(
            parse_command("5", &game),
            Ok(Command::Play(GameAction::Sliding(SlidingAction::Tap(index))))
        );
        assert_eq!(
            parse_command("2 3", &game),
            Ok(Command::Play(GameAction::Sliding(SlidingAction::Tap(5))))
        );
        assert_eq!(parse_command("9", &game), Err(CommandError::NoSuchTile(9)));
        assert_eq!(
            parse_command("4 1", &game),
            Err(CommandError::OffBoard { row: 4, col: 1 })
        );
        assert_eq!(
            parse_command("x", &game),
            Err(CommandError::NotANumber("x".to_string()))
        );
        assert_eq!(parse_command("reset", &game), Err(CommandError::PackingOnly("reset")));
    }

    #[test]
    fn test_packing_commands() {
        let mut game = GameState::new(GameMode::BlockLogic, 3);
        assert_eq!(
            parse_command("select t4", &game),
            Ok(Command::Play(GameAction::Packing(PackingAction::SelectPiece(PieceId(5)))))
        );
        assert_eq!(
            parse_command("s 1", &game),
            Ok(Command::Play(GameAction::Packing(PackingAction::SelectPiece(PieceId(0)))))
        );
        assert_eq!(
            parse_command("p 6 6", &game),
            Ok(Command::Play(GameAction::Packing(PackingAction::TapCell(Coordinate::new(5, 5)))))
        );
        assert_eq!(parse_command("rotate", &game), Err(CommandError::NothingSelected));
        assert_eq!(parse_command("reset", &game), Ok(Command::Reset));
        assert_eq!(parse_command("hint", &game), Ok(Command::Hint));
        assert_eq!(
            parse_command("s X9", &game),
            Err(CommandError::NoSuchPiece("X9".to_string()))
        );

        game.apply_action(PackingAction::SelectPiece(PieceId(2)).into(), 0);
        assert_eq!(
            parse_command("r", &game),
            Ok(Command::Play(GameAction::Packing(PackingAction::SelectPiece(PieceId(2)))))
        );
    }
}
