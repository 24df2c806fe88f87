//! Line-command input
//!
//! Each prompt line is parsed as a clap multicall command line: the first
//! word names the command. Board cells are written `row,col`, hand slots
//! `h0`..`h4`.

use clap::{Parser, Subcommand};

use crate::sim::piece::Rotation;
use crate::sim::session::{Action, Slot};

/// Read a slot written as `row,col` or `h<index>`.
///
/// Indices are not range-checked here; the session rejects bad addresses.
pub fn parse_slot(text: &str) -> Result<Slot, String> {
    let bad = || format!("expected a slot like `1,2` or `h0`, got `{text}`");
    if let Some(index) = text.strip_prefix('h') {
        return index.parse().map(Slot::hand).map_err(|_| bad());
    }
    let (row, col) = text.split_once(',').ok_or_else(bad)?;
    match (row.trim().parse(), col.trim().parse()) {
        (Ok(row), Ok(col)) => Ok(Slot::cell(row, col)),
        _ => Err(bad()),
    }
}

#[derive(Debug, Parser)]
#[command(multicall = true, help_template = "commands:\n{subcommands}")]
struct Prompt {
    #[command(subcommand)]
    command: Command,
}

/// Something the prompt loop should do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Lift a piece into your grip
    #[command(visible_alias = "take")]
    Pick {
        #[arg(value_parser = parse_slot)]
        slot: Slot,
    },
    /// Put the held piece into an empty slot
    #[command(visible_alias = "put")]
    Drop {
        #[arg(value_parser = parse_slot)]
        slot: Slot,
    },
    /// Let go of the held piece; it returns to its origin if the slot is taken
    Release {
        #[arg(value_parser = parse_slot)]
        slot: Option<Slot>,
    },
    /// Rotate clockwise: the piece at SLOT, or the held piece
    #[command(visible_aliases = ["rot", "rotate"])]
    Cw {
        #[arg(value_parser = parse_slot)]
        slot: Option<Slot>,
    },
    /// Rotate counter-clockwise: the piece at SLOT, or the held piece
    Ccw {
        #[arg(value_parser = parse_slot)]
        slot: Option<Slot>,
    },
    /// Switch the beam on
    #[command(visible_aliases = ["f", "on"])]
    Fire,
    /// Switch the beam off
    #[command(visible_aliases = ["c", "off"])]
    Clear,
    /// Go to the next level
    #[command(visible_alias = "n")]
    Next,
    /// Go to the previous level
    #[command(visible_aliases = ["p", "previous"])]
    Prev,
    /// Jump to level NUMBER
    #[command(visible_alias = "go")]
    Level { number: usize },
    /// Reload the current level
    Restart,
    /// Redraw the board
    #[command(visible_alias = "s")]
    Show,
    /// Show the answer
    #[command(visible_alias = "answer")]
    Solution,
    /// List piece glyphs
    Pieces,
    /// Leave the game
    #[command(visible_aliases = ["q", "exit"])]
    Quit,
}

impl Command {
    /// The session action this command performs, if any
    pub fn action(self) -> Option<Action> {
        let rotate = |slot: Option<Slot>, rotation| match slot {
            Some(slot) => Action::Rotate(slot, rotation),
            None => Action::RotateHeld(rotation),
        };
        Some(match self {
            Command::Pick { slot } => Action::PickUp(slot),
            Command::Drop { slot } => Action::Drop(slot),
            Command::Release { slot } => Action::Release(slot),
            Command::Cw { slot } => rotate(slot, Rotation::Clockwise),
            Command::Ccw { slot } => rotate(slot, Rotation::CounterClockwise),
            Command::Fire => Action::FireBeam,
            Command::Clear => Action::ClearBeam,
            Command::Next => Action::NextLevel,
            Command::Prev => Action::PreviousLevel,
            Command::Level { number } => Action::GoToLevel(number),
            Command::Restart => Action::Restart,
            Command::Show | Command::Solution | Command::Pieces | Command::Quit => return None,
        })
    }
}

/// Parse one prompt line. Blank lines redraw the board.
///
/// `help` comes back as an error of kind `DisplayHelp`; printing it shows
/// the command list.
pub fn parse_line(line: &str) -> Result<Command, clap::Error> {
    if line.trim().is_empty() {
        return Ok(Command::Show);
    }
    Prompt::try_parse_from(line.split_whitespace()).map(|prompt| prompt.command)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    fn play(line: &str) -> Action {
        match parse_line(line).map(Command::action) {
            Ok(Some(action)) => action,
            other => panic!("{line:?} parsed to {other:?}"),
        }
    }

    #[test]
    fn test_slot_forms() {
        assert_eq!(parse_slot("1,2"), Ok(Slot::cell(1, 2)));
        assert_eq!(parse_slot("h3"), Ok(Slot::hand(3)));
        assert!(parse_slot("3").is_err());
        assert!(parse_slot("x,1").is_err());
        assert!(parse_slot("h").is_err());
        assert_eq!(play("pick 1,2"), Action::PickUp(Slot::cell(1, 2)));
        assert_eq!(play("take h3"), Action::PickUp(Slot::hand(3)));
        assert_eq!(play("drop 0,4"), Action::Drop(Slot::cell(0, 4)));
    }

    #[test]
    fn test_out_of_range_slots_still_parse() {
        // The session decides bounds
        assert_eq!(play("pick 9,9"), Action::PickUp(Slot::cell(9, 9)));
        assert_eq!(play("pick h7"), Action::PickUp(Slot::hand(7)));
    }

    #[test]
    fn test_rotate_forms() {
        assert_eq!(play("rot"), Action::RotateHeld(Rotation::Clockwise));
        assert_eq!(play("ccw"), Action::RotateHeld(Rotation::CounterClockwise));
        assert_eq!(play("cw 2,3"), Action::Rotate(Slot::cell(2, 3), Rotation::Clockwise));
        assert_eq!(
            play("ccw h1"),
            Action::Rotate(Slot::hand(1), Rotation::CounterClockwise)
        );
    }

    #[test]
    fn test_release_target_is_optional() {
        assert_eq!(play("release"), Action::Release(None));
        assert_eq!(play("release 3,3"), Action::Release(Some(Slot::cell(3, 3))));
    }

    #[test]
    fn test_navigation_and_beam() {
        assert_eq!(play("next"), Action::NextLevel);
        assert_eq!(play("p"), Action::PreviousLevel);
        assert_eq!(play("level 12"), Action::GoToLevel(12));
        assert_eq!(play("go 3"), Action::GoToLevel(3));
        assert_eq!(play("restart"), Action::Restart);
        assert_eq!(play("fire"), Action::FireBeam);
        assert_eq!(play("off"), Action::ClearBeam);
    }

    #[test]
    fn test_non_play_commands() {
        assert_eq!(parse_line("").ok(), Some(Command::Show));
        assert_eq!(parse_line("   ").ok(), Some(Command::Show));
        assert_eq!(parse_line("answer").ok(), Some(Command::Solution));
        assert_eq!(parse_line("q").ok(), Some(Command::Quit));
        assert_eq!(parse_line("pieces").ok().and_then(Command::action), None);
    }

    #[test]
    fn test_help_lists_commands() {
        let err = parse_line("help").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
        let text = err.to_string();
        assert!(text.contains("pick"));
        assert!(text.contains("release"));
    }

    #[test]
    fn test_errors() {
        assert!(parse_line("jump").is_err());
        assert_eq!(
            parse_line("pick").unwrap_err().kind(),
            ErrorKind::MissingRequiredArgument
        );
        assert!(parse_line("pick x,1").is_err());
        assert!(parse_line("pick 3").is_err());
        assert!(parse_line("level two").is_err());
        assert!(parse_line("fire now").is_err());
    }
}
