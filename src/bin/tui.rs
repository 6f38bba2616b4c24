use std::{io, path::PathBuf};

use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use sodium as na;
use timetoe::{config::Args, Board, Coord, Error, Game, HistoryEntry, Intent, Session, Status};
use tracing::info;
use tui::{
    backend::{Backend, CrosstermBackend},
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame, Terminal,
};

const HELP: &str = "1-9 play a square\n←/→ step through history\nHome/End first/latest\nq quit";

fn main() -> io::Result<()> {
    let args = Args::parse();
    args.init_tracing(Some(PathBuf::from("ttt-tui.log")))?;

    let ctx = na::SodiumCtx::new();

    let (intents, ui) = ctx.transaction(|| {
        let intents: na::StreamSink<Intent> = ctx.new_stream_sink();
        let Session {
            game,
            board,
            status,
            history,
            error,
            ..
        } = Session::new(&ctx, &intents.stream());

        // Cleared by the next change that goes through
        let notice = error
            .map(|err: &Error| Some(err.to_string()))
            .or_else(&game.updates().map(|_: &Game| None::<String>))
            .hold(None);

        let ui = Ui {
            game,
            board,
            status,
            history,
            notice,
        };
        (intents, ui)
    });

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    info!("starting tui");
    let result = run(&mut terminal, &ui, &intents);

    // restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run<B: Backend>(
    terminal: &mut Terminal<B>,
    ui: &Ui,
    intents: &na::StreamSink<Intent>,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui.draw(f))?;

        let key = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => key,
            _ => continue,
        };
        if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
            return Ok(());
        }
        if let Some(intent) = key_intent(key.code, &ui.game.sample()) {
            intents.send(intent);
        }
    }
}

fn key_intent(code: KeyCode, game: &Game) -> Option<Intent> {
    let last = game.history().len() - 1;
    match code {
        KeyCode::Char(c) => c
            .to_digit(10)
            .filter(|square| (1..=9).contains(square))
            .map(|square| Intent::Move(square as usize - 1)),
        KeyCode::Left => game.step().checked_sub(1).map(Intent::Jump),
        KeyCode::Right if game.step() < last => Some(Intent::Jump(game.step() + 1)),
        KeyCode::Home => Some(Intent::Jump(0)),
        KeyCode::End => Some(Intent::Jump(last)),
        _ => None,
    }
}

struct Ui {
    game: na::Cell<Game>,
    board: na::Cell<Board>,
    status: na::Cell<Status>,
    history: na::Cell<Vec<HistoryEntry>>,
    notice: na::Cell<Option<String>>,
}

impl Ui {
    fn draw<B: Backend>(&self, f: &mut Frame<B>) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .margin(2)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)].as_ref())
            .split(f.size());
        let block = Block::default().title("Board").borders(Borders::ALL);
        self.draw_board(f, block.inner(chunks[0]));
        f.render_widget(block, chunks[0]);

        let block = Block::default().title("Game Info").borders(Borders::ALL);
        self.draw_info(f, block.inner(chunks[1]));
        f.render_widget(block, chunks[1]);
    }

    fn draw_board<B: Backend>(&self, f: &mut Frame<B>, area: Rect) {
        let thirds = [Constraint::Ratio(1, 3); 3];
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(thirds.as_ref())
            .split(area);

        let board = self.board.sample();
        for (row, row_area) in rows.iter().enumerate() {
            let squares = Layout::default()
                .direction(Direction::Horizontal)
                .constraints(thirds.as_ref())
                .split(*row_area);
            for (col, square_area) in squares.iter().enumerate() {
                let coord = Coord { col, row };
                let block = Block::default().borders(square_borders(coord));
                let inner = block.inner(*square_area);
                f.render_widget(render_square(&board, coord, inner.height), inner);
                f.render_widget(block, *square_area);
            }
        }
    }

    fn draw_info<B: Backend>(&self, f: &mut Frame<B>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(
                [
                    Constraint::Length(2),
                    Constraint::Min(3),
                    Constraint::Length(4),
                ]
                .as_ref(),
            )
            .split(area);

        let bold = Style::default().add_modifier(Modifier::BOLD);
        let mut lines = vec![Spans::from(Span::styled(self.status.sample().to_string(), bold))];
        if let Some(notice) = self.notice.sample() {
            lines.push(Spans::from(Span::styled(
                notice,
                Style::default().fg(Color::Red),
            )));
        }
        f.render_widget(Paragraph::new(lines), chunks[0]);

        let items: Vec<ListItem> = self
            .history
            .sample()
            .into_iter()
            .map(|entry| {
                if entry.is_current {
                    ListItem::new(Span::styled(format!("> {}", entry.description), bold))
                } else {
                    ListItem::new(format!("  {}", entry.description))
                }
            })
            .collect();
        let history = List::new(items).block(Block::default().title("History").borders(Borders::TOP));
        f.render_widget(history, chunks[1]);

        f.render_widget(
            Paragraph::new(HELP).style(Style::default().add_modifier(Modifier::DIM)),
            chunks[2],
        );
    }
}

/// Only the inner grid lines are drawn.
fn square_borders(coord: Coord) -> Borders {
    let mut borders = Borders::ALL;
    if coord.row == 0 {
        borders.remove(Borders::TOP);
    }
    if coord.row == 2 {
        borders.remove(Borders::BOTTOM);
    }
    if coord.col == 0 {
        borders.remove(Borders::LEFT);
    }
    if coord.col == 2 {
        borders.remove(Borders::RIGHT);
    }
    borders
}

fn render_square(board: &Board, coord: Coord, height: u16) -> Paragraph<'static> {
    let index = coord.index();
    let label = match board.get(index) {
        Some(mark) => Span::styled(mark.to_string(), Style::default().add_modifier(Modifier::BOLD)),
        None => Span::styled(
            (index + 1).to_string(),
            Style::default().add_modifier(Modifier::DIM),
        ),
    };

    let padding = height.saturating_sub(1) / 2;
    let mut lines = vec![Spans::from(""); padding as usize];
    lines.push(Spans::from(label));
    Paragraph::new(lines).alignment(Alignment::Center)
}
