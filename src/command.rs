use std::str::FromStr;

use sodium::Stream;

use crate::{game::Intent, Error, SQUARES};

/// A line of player input.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Zero-based square index; typed as 1-9.
    Play(usize),
    Jump(usize),
    History,
    Quit,
}

impl Command {
    pub fn intent(&self) -> Option<Intent> {
        match self {
            Command::Play(index) => Some(Intent::Move(*index)),
            Command::Jump(step) => Some(Intent::Jump(*step)),
            Command::History | Command::Quit => None,
        }
    }
}

impl FromStr for Command {
    type Err = Error;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let word = words.next().unwrap_or_default();

        match word.to_ascii_lowercase().as_str() {
            "j" | "jump" => {
                let step = words.next().ok_or(Error::MissingArgument("step"))?;
                step.parse::<usize>()
                    .map(Command::Jump)
                    .map_err(Error::InvalidInteger)
            }
            "start" => Ok(Command::Jump(0)),
            "h" | "history" => Ok(Command::History),
            "q" | "quit" => Ok(Command::Quit),
            _ if word.starts_with(|c: char| c.is_ascii_digit() || c == '-' || c == '+') => {
                let square = word.parse::<usize>().map_err(Error::InvalidInteger)?;
                if (1..=SQUARES).contains(&square) {
                    Ok(Command::Play(square - 1))
                } else {
                    Err(Error::InvalidSquare(square))
                }
            }
            _ => Err(Error::UnknownCommand(line.trim().to_string())),
        }
    }
}

/// Keyboard lines split into game intents and the front-end-only requests.
pub struct Controls {
    pub intents: Stream<Intent>,
    pub show_history: Stream<()>,
    pub quit: Stream<()>,
    pub error: Stream<Error>,
}

impl Controls {
    pub fn new(kb_input: &Stream<String>) -> Controls {
        let parsed_stream = kb_input
            .filter(|line: &String| !line.trim().is_empty())
            .map(|line: &String| line.parse::<Command>());

        let command_stream = parsed_stream
            .map(|res: &Result<Command, Error>| res.clone().ok())
            .filter_option();
        let error_stream = parsed_stream
            .map(|res: &Result<Command, Error>| res.clone().err())
            .filter_option();

        let intent_stream = command_stream
            .map(|command: &Command| command.intent())
            .filter_option();
        let show_history = command_stream
            .filter(|command: &Command| matches!(command, Command::History))
            .map(|_: &Command| ());
        let quit = command_stream
            .filter(|command: &Command| matches!(command, Command::Quit))
            .map(|_: &Command| ());

        Controls {
            intents: intent_stream,
            show_history,
            quit,
            error: error_stream,
        }
    }
}
