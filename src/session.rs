use sodium::{Cell, CellLoop, SodiumCtx, Stream};

use crate::{
    board::{Board, Mark},
    game::{is_square, Game, HistoryEntry, Intent, Status},
    Error,
};

/// A game driven by a stream of intents.
///
/// Everything a view needs is exposed as a `Cell` to sample or a `Stream`
/// to listen to. Each intent is handled in its own transaction, so the
/// cells always agree with each other.
pub struct Session {
    pub game: Cell<Game>,
    pub board: Cell<Board>,
    pub turn: Cell<Mark>,
    pub status: Cell<Status>,
    pub history: Cell<Vec<HistoryEntry>>,
    /// Accepted moves and the mark placed.
    pub moves: Stream<(usize, Mark)>,
    /// Fires when a move completes a line.
    pub winner: Stream<Mark>,
    pub error: Stream<Error>,
}

struct IntentValidator {
    valid_intent_stream: Stream<Intent>,
    error_stream: Stream<Error>,
}

impl Session {
    pub fn new(ctx: &SodiumCtx, intents: &Stream<Intent>) -> Session {
        ctx.transaction(|| {
            let game_cell_loop: CellLoop<Game> = ctx.new_cell_loop();
            let game_cell_fwd = game_cell_loop.cell();

            let IntentValidator {
                valid_intent_stream,
                error_stream,
            } = IntentValidator::new(intents, &game_cell_fwd);

            // Only intents that change something make it past here
            let change_stream = valid_intent_stream
                .snapshot(&game_cell_fwd, |intent: &Intent, game: &Game| {
                    game.apply(*intent).map(|next| (*intent, next))
                })
                .filter_option();

            let game_cell = change_stream
                .map(|(_, game): &(Intent, Game)| game.clone())
                .hold(Game::new());
            game_cell_loop.loop_(&game_cell);

            let move_stream = change_stream
                .map(|(intent, game): &(Intent, Game)| match intent {
                    Intent::Move(index) => game.board().get(*index).map(|mark| (*index, mark)),
                    Intent::Jump(_) => None,
                })
                .filter_option();

            let winner_stream = change_stream
                .map(|(intent, game): &(Intent, Game)| match intent {
                    Intent::Move(_) => game.winner(),
                    Intent::Jump(_) => None,
                })
                .filter_option();

            Session {
                board: game_cell.map(|game: &Game| *game.board()),
                turn: game_cell.map(|game: &Game| game.turn()),
                status: game_cell.map(|game: &Game| game.status()),
                history: game_cell.map(|game: &Game| game.entries()),
                game: game_cell,
                moves: move_stream,
                winner: winner_stream,
                error: error_stream,
            }
        })
    }
}

impl IntentValidator {
    fn new(intent_stream: &Stream<Intent>, game_cell: &Cell<Game>) -> IntentValidator {
        let checked_stream =
            intent_stream.snapshot(game_cell, |intent: &Intent, game: &Game| check(*intent, game));

        let valid_intent_stream = checked_stream
            .map(|res: &Result<Intent, Error>| res.clone().ok())
            .filter_option();
        let error_stream = checked_stream
            .map(|res: &Result<Intent, Error>| res.clone().err())
            .filter_option();

        IntentValidator {
            valid_intent_stream,
            error_stream,
        }
    }
}

fn check(intent: Intent, game: &Game) -> Result<Intent, Error> {
    match intent {
        Intent::Move(index) if !is_square(index) => Err(Error::InvalidIndex(index)),
        Intent::Jump(step) if step >= game.history().len() => Err(Error::InvalidStep(step)),
        _ => Ok(intent),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_rejects_out_of_range() {
        let game = Game::new();
        assert_eq!(check(Intent::Move(9), &game), Err(Error::InvalidIndex(9)));
        assert_eq!(check(Intent::Jump(1), &game), Err(Error::InvalidStep(1)));
        assert_eq!(check(Intent::Jump(0), &game), Ok(Intent::Jump(0)));
    }

    #[test]
    fn check_lets_occupied_squares_through() {
        let mut game = Game::new();
        game.attempt_move(0);
        assert_eq!(check(Intent::Move(0), &game), Ok(Intent::Move(0)));
    }
}
