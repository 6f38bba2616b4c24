use std::fmt;

use tracing::{debug, info, trace, warn};

use crate::board::{Board, Coord, Mark, SQUARES};

/// One entry in the game history: a board and the move that produced it.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub board: Board,
    /// `None` only for the empty board at step 0.
    pub coord: Option<Coord>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Intent {
    Move(usize),
    Jump(usize),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Status {
    Winner(Mark),
    NextPlayer(Mark),
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Winner(mark) => write!(f, "Winner: {}", mark),
            Status::NextPlayer(mark) => write!(f, "Next player: {}", mark),
        }
    }
}

/// A history line as a view would list it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryEntry {
    pub step: usize,
    pub description: String,
    pub is_current: bool,
}

/// Tic-tac-toe with a linear move history that can be revisited.
///
/// `step` points at the snapshot on display. Making a move from an earlier
/// step throws away everything after it before appending; jumping alone
/// never changes the history.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Game {
    history: Vec<Snapshot>,
    step: usize,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    pub fn new() -> Self {
        Self {
            history: vec![Snapshot::default()],
            step: 0,
        }
    }

    pub fn history(&self) -> &[Snapshot] {
        &self.history
    }

    pub fn step(&self) -> usize {
        self.step
    }

    pub fn current(&self) -> &Snapshot {
        &self.history[self.step]
    }

    pub fn board(&self) -> &Board {
        &self.current().board
    }

    /// Whose mark goes down next, from the parity of the current step.
    pub fn turn(&self) -> Mark {
        Mark::for_step(self.step)
    }

    pub fn winner(&self) -> Option<Mark> {
        self.board().get_winner()
    }

    pub fn status(&self) -> Status {
        match self.winner() {
            Some(mark) => Status::Winner(mark),
            None => Status::NextPlayer(self.turn()),
        }
    }

    /// Whether [`Game::attempt_move`] would accept `index` right now.
    pub fn can_move(&self, index: usize) -> bool {
        self.winner().is_none() && self.board().is_valid_move(index)
    }

    /// Places the current player's mark at `index`, dropping any history
    /// after the current step first.
    ///
    /// Returns `false` and leaves the game untouched if the position is
    /// already won or the square is taken.
    pub fn attempt_move(&mut self, index: usize) -> bool {
        if let Some(winner) = self.winner() {
            trace!(index, %winner, "move ignored, game already won");
            return false;
        }
        if !self.board().is_valid_move(index) {
            trace!(index, "move ignored, square unavailable");
            return false;
        }

        let mark = self.turn();
        let snapshot = Snapshot {
            board: self.board().mark(index, mark),
            coord: Some(Coord::from_index(index)),
        };
        self.history.truncate(self.step + 1);
        self.history.push(snapshot);
        self.step = self.history.len() - 1;
        debug!(index, %mark, step = self.step, "move played");

        if let Some(winner) = self.winner() {
            info!(%winner, step = self.step, "game won");
        }
        true
    }

    /// Moves the current step to `step` without touching the history.
    ///
    /// Steps past the end of the history are refused.
    pub fn jump_to(&mut self, step: usize) -> bool {
        if step >= self.history.len() {
            warn!(step, len = self.history.len(), "jump past end of history refused");
            return false;
        }
        self.step = step;
        debug!(step, "jumped");
        true
    }

    /// The game after `intent`, or `None` if it would change nothing.
    pub fn apply(&self, intent: Intent) -> Option<Game> {
        let mut next = self.clone();
        let changed = match intent {
            Intent::Move(index) => next.attempt_move(index),
            Intent::Jump(step) => next.jump_to(step) && step != self.step,
        };
        changed.then_some(next)
    }

    pub fn move_descriptor(&self, index: usize) -> Option<String> {
        let snapshot = self.history.get(index)?;
        Some(match snapshot.coord {
            Some(coord) if index > 0 => format!("Go to move #{}, position {}", index, coord),
            _ => "Go to game start".to_string(),
        })
    }

    pub fn entries(&self) -> Vec<HistoryEntry> {
        (0..self.history.len())
            .filter_map(|step| {
                self.move_descriptor(step).map(|description| HistoryEntry {
                    step,
                    description,
                    is_current: step == self.step,
                })
            })
            .collect()
    }
}

/// Squares the game accepts: `0..SQUARES`.
pub fn is_square(index: usize) -> bool {
    index < SQUARES
}

#[cfg(test)]
mod tests {
    use super::*;

    fn played(moves: &[usize]) -> Game {
        let mut game = Game::new();
        for index in moves {
            assert!(game.attempt_move(*index), "move {} refused", index);
        }
        game
    }

    #[test]
    fn starts_empty_with_x_to_move() {
        let game = Game::new();
        assert_eq!(game.history().len(), 1);
        assert_eq!(game.step(), 0);
        assert_eq!(game.current().coord, None);
        assert_eq!(game.status(), Status::NextPlayer(Mark::X));
    }

    #[test]
    fn move_records_mark_and_coord() {
        let game = played(&[5]);
        assert_eq!(game.board().get(5), Some(Mark::X));
        assert_eq!(game.current().coord, Some(Coord { col: 2, row: 1 }));
        assert_eq!(game.turn(), Mark::O);
    }

    #[test]
    fn occupied_square_is_ignored() {
        let mut game = played(&[4]);
        let before = game.clone();
        assert!(!game.attempt_move(4));
        assert!(!game.attempt_move(4));
        assert_eq!(game, before);
    }

    #[test]
    fn out_of_range_square_is_ignored() {
        let mut game = Game::new();
        assert!(!game.attempt_move(9));
        assert_eq!(game, Game::new());
    }

    #[test]
    fn no_moves_after_a_win() {
        let mut game = played(&[0, 3, 1, 4, 2]);
        assert_eq!(game.status(), Status::Winner(Mark::X));
        assert!(!game.can_move(8));
        assert!(!game.attempt_move(8));
        assert_eq!(game.history().len(), 6);
    }

    #[test]
    fn jump_does_not_truncate() {
        let mut game = played(&[0, 3, 1, 4, 2]);
        assert!(game.jump_to(0));
        assert_eq!(game.board(), &Board::new());
        assert_eq!(game.turn(), Mark::X);
        assert_eq!(game.history().len(), 6);
    }

    #[test]
    fn jump_past_end_is_refused() {
        let mut game = played(&[0, 1]);
        assert!(!game.jump_to(3));
        assert_eq!(game.step(), 2);
    }

    #[test]
    fn move_after_jump_truncates() {
        let mut game = played(&[0, 3, 1, 4, 2]);
        assert!(game.jump_to(2));
        assert!(game.attempt_move(8));
        assert_eq!(game.history().len(), 4);
        assert_eq!(game.step(), 3);
        assert_eq!(game.board().get(8), Some(Mark::X));
        assert_eq!(game.board().get(1), None);
    }

    #[test]
    fn jumping_before_a_win_reopens_the_game() {
        let mut game = played(&[0, 3, 1, 4, 2]);
        game.jump_to(4);
        assert_eq!(game.status(), Status::NextPlayer(Mark::X));
        assert!(game.attempt_move(8));
        assert_eq!(game.winner(), None);
        assert_eq!(game.history().len(), 6);
    }

    #[test]
    fn apply_reports_no_ops() {
        let game = played(&[0]);
        assert_eq!(game.apply(Intent::Move(0)), None);
        assert_eq!(game.apply(Intent::Jump(1)), None);
        assert_eq!(game.apply(Intent::Jump(7)), None);

        let jumped = game.apply(Intent::Jump(0)).expect("jump to start");
        assert_eq!(jumped.step(), 0);
        assert_eq!(game.step(), 1);
    }

    #[test]
    fn descriptors() {
        let game = played(&[0, 7]);
        assert_eq!(game.move_descriptor(0).as_deref(), Some("Go to game start"));
        assert_eq!(
            game.move_descriptor(2).as_deref(),
            Some("Go to move #2, position (1,2)")
        );
        assert_eq!(game.move_descriptor(3), None);
    }

    #[test]
    fn entries_mark_the_current_step() {
        let mut game = played(&[0, 7]);
        game.jump_to(1);
        let current: Vec<usize> = game
            .entries()
            .iter()
            .filter(|entry| entry.is_current)
            .map(|entry| entry.step)
            .collect();
        assert_eq!(current, vec![1]);
        assert_eq!(game.entries().len(), 3);
    }

    #[test]
    fn status_text() {
        assert_eq!(Game::new().status().to_string(), "Next player: X");
        assert_eq!(played(&[0, 3, 1, 4, 2]).status().to_string(), "Winner: X");
    }
}
