use std::fmt;

const WIN_SEQUENCES: [[usize; 3]; 8] = [
    // Horizontal
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    // Vertical
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    // Diagonal
    [0, 4, 8],
    [2, 4, 6],
];

pub const SQUARES: usize = 9;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    /// The mark that moves at `step`: X on even steps, O on odd ones.
    pub fn for_step(step: usize) -> Mark {
        if step % 2 == 0 {
            Mark::X
        } else {
            Mark::O
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mark::X => f.write_str("X"),
            Mark::O => f.write_str("O"),
        }
    }
}

/// Column and row of a square, both zero-based, row 0 at the top.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Coord {
    pub col: usize,
    pub row: usize,
}

impl Coord {
    pub fn from_index(index: usize) -> Coord {
        Coord {
            col: index % 3,
            row: index / 3,
        }
    }

    pub fn index(&self) -> usize {
        self.row * 3 + self.col
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.col, self.row)
    }
}

/// Returns the mark holding the first completed line, checking rows, then
/// columns, then the two diagonals.
///
/// A full board with no line is `None`, same as a board still in play; use
/// [`Board::is_full`] to tell them apart.
pub fn evaluate(squares: &[Option<Mark>; SQUARES]) -> Option<Mark> {
    for seq in WIN_SEQUENCES {
        let first = squares[seq[0]];
        if first.is_some() && seq.iter().map(|i| squares[*i]).all(|x| x == first) {
            return first;
        }
    }
    None
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Board {
    squares: [Option<Mark>; SQUARES],
}

impl Board {
    pub fn new() -> Self {
        let squares = [None; SQUARES];
        Self { squares }
    }

    /// Copy of this board with `mark` placed at `index`.
    pub fn mark(&self, index: usize, mark: Mark) -> Board {
        let mut new_board = *self;
        new_board.squares[index] = Some(mark);
        new_board
    }

    pub fn get(&self, index: usize) -> Option<Mark> {
        self.squares.get(index).copied().flatten()
    }

    pub fn squares(&self) -> &[Option<Mark>; SQUARES] {
        &self.squares
    }

    fn display_squares(&self) -> [&'static str; SQUARES] {
        let mut display = [""; SQUARES];
        for (dsquare, square) in display.iter_mut().zip(self.squares.iter()) {
            match square {
                Some(Mark::X) => *dsquare = "X",
                Some(Mark::O) => *dsquare = "O",
                None => *dsquare = " ",
            }
        }
        display
    }

    /// Whether `index` names a square on the board that is still empty.
    pub fn is_valid_move(&self, index: usize) -> bool {
        index < SQUARES && self.squares[index].is_none()
    }

    pub fn is_full(&self) -> bool {
        self.squares.iter().all(Option::is_some)
    }

    pub fn get_winner(&self) -> Option<Mark> {
        evaluate(&self.squares)
    }

    /// Index of the single square where `self` and `other` differ, if
    /// exactly one does.
    pub fn single_difference(&self, other: &Board) -> Option<usize> {
        let mut diffs = self
            .squares
            .iter()
            .zip(other.squares.iter())
            .enumerate()
            .filter(|(_, (a, b))| a != b)
            .map(|(i, _)| i);
        match (diffs.next(), diffs.next()) {
            (Some(index), None) => Some(index),
            _ => None,
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ds = self.display_squares();
        writeln!(f, " {} | {} | {}", ds[0], ds[1], ds[2])?;
        f.write_str("---+---+---\n")?;
        writeln!(f, " {} | {} | {}", ds[3], ds[4], ds[5])?;
        f.write_str("---+---+---\n")?;
        writeln!(f, " {} | {} | {}", ds[6], ds[7], ds[8])?;
        Ok(())
    }
}
