use std::io::{self, BufRead};

use clap::Parser;
use sodium::{SodiumCtx, StreamSink};
use tracing::info;

use timetoe::{config::Args, Board, Controls, Error, HistoryEntry, Mark, Session, Status};

fn print_history(entries: &[HistoryEntry]) {
    for entry in entries {
        let marker = if entry.is_current { ">" } else { " " };
        println!("{} {:>2}. {}", marker, entry.step, entry.description);
    }
}

fn main() -> io::Result<()> {
    let args = Args::parse();
    args.init_tracing(None)?;

    let ctx = SodiumCtx::new();

    let (boot, kb_input, quit, _listeners) = ctx.transaction(|| {
        let mut listeners = Vec::new();

        let boot: StreamSink<()> = ctx.new_stream_sink();
        let kb_input: StreamSink<String> = ctx.new_stream_sink();

        let controls = Controls::new(&kb_input.stream());
        let session = Session::new(&ctx, &controls.intents);

        listeners.push(boot.stream().listen({
            let board = session.board.clone();
            let status = session.status.clone();
            move |_: &()| {
                println!("Welcome to Tic Tac Toe!\n");
                println!("Squares are numbered 1-9, left to right, top to bottom.");
                println!("Commands: <1-9>, jump <step>, start, history, quit\n");
                println!("{}", board.sample());
                println!("{}", status.sample());
            }
        }));

        listeners.push(controls.error.listen(|err: &Error| println!("{}", err)));
        listeners.push(session.error.listen(|err: &Error| println!("{}", err)));

        listeners.push(session.moves.listen(|(index, mark): &(usize, Mark)| {
            println!("\n{}s took square {}:", mark, index + 1)
        }));

        listeners.push(
            session
                .board
                .updates()
                .listen(|board: &Board| println!("{}", board)),
        );

        listeners.push(
            session
                .status
                .updates()
                .listen(|status: &Status| println!("{}", status)),
        );

        listeners.push(
            session
                .winner
                .listen(|mark: &Mark| println!("{} has won the game!", mark)),
        );

        listeners.push(
            controls
                .show_history
                .snapshot(
                    &session.history,
                    |_: &(), entries: &Vec<HistoryEntry>| entries.clone(),
                )
                .listen(|entries: &Vec<HistoryEntry>| print_history(entries)),
        );

        let quit = controls.quit.map(|_: &()| true).hold(false);

        (boot, kb_input, quit, listeners)
    });

    boot.send(());

    let stdin = io::stdin().lock();
    for line in stdin.lines() {
        kb_input.send(line?);
        if quit.sample() {
            break;
        }
    }
    info!("session over");

    Ok(())
}
