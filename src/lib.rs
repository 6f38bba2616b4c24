use std::num::ParseIntError;

use thiserror::Error;

mod board;
mod command;
pub mod config;
mod game;
mod session;

pub use board::{evaluate, Board, Coord, Mark, SQUARES};
pub use command::{Command, Controls};
pub use game::{Game, HistoryEntry, Intent, Snapshot, Status};
pub use session::Session;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    #[error("invalid square: {0}! choose 1-9")]
    InvalidSquare(usize),

    #[error("invalid index: {0}!")]
    InvalidIndex(usize),

    #[error("invalid step: {0} is past the end of the history!")]
    InvalidStep(usize),

    #[error("invalid input: {0}!")]
    InvalidInteger(ParseIntError),

    #[error("unknown command: {0:?}")]
    UnknownCommand(String),

    #[error("missing argument: {0}")]
    MissingArgument(&'static str),
}
