//! The 3x3 board: marks, cells, and line detection.
//!
//! Cells are numbered 0-8, row by row:
//!
//! ```text
//!  0 | 1 | 2
//! -----------
//!  3 | 4 | 5
//! -----------
//!  6 | 7 | 8
//! ```

/// Number of cells on the board.
pub const CELLS: usize = 9;

/// The 8 winning lines: 3 rows, 3 columns, 2 diagonals.
const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// A player's mark. The first seat of every game plays `X`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    /// The other mark.
    pub fn opponent(self) -> Self {
        match self {
            Self::X => Self::O,
            Self::O => Self::X,
        }
    }

    /// The character drawn on the board.
    pub fn symbol(self) -> char {
        match self {
            Self::X => 'X',
            Self::O => 'O',
        }
    }
}

/// Nine cells, each empty or holding a [`Mark`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Board {
    pub(crate) cells: [Option<Mark>; CELLS],
}

impl Board {
    /// An empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the mark in `cell`, or `None` if the cell is empty or out
    /// of range.
    pub fn get(&self, cell: usize) -> Option<Mark> {
        self.cells.get(cell).copied().flatten()
    }

    /// Returns `true` if `cell` is on the board and empty.
    pub fn is_open(&self, cell: usize) -> bool {
        matches!(self.cells.get(cell), Some(None))
    }

    /// Writes `mark` into `cell`. Callers have already checked the cell
    /// is open.
    pub(crate) fn place(&mut self, cell: usize, mark: Mark) {
        self.cells[cell] = Some(mark);
    }

    /// Returns `true` if `mark` fills any of the 8 lines.
    pub fn has_line(&self, mark: Mark) -> bool {
        LINES
            .iter()
            .any(|line| line.iter().all(|&c| self.cells[c] == Some(mark)))
    }

    /// Returns `true` if no cell is empty.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Indices of the empty cells, in ascending order.
    pub fn open_cells(&self) -> impl Iterator<Item = usize> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_none())
            .map(|(i, _)| i)
    }

    /// How many cells hold `mark`.
    pub fn count(&self, mark: Mark) -> usize {
        self.cells.iter().filter(|c| **c == Some(mark)).count()
    }

    /// The lowest-numbered open cell that would complete a line for
    /// `mark`, if any.
    pub fn winning_cell(&self, mark: Mark) -> Option<usize> {
        self.open_cells().find(|&cell| {
            let mut trial = self.clone();
            trial.place(cell, mark);
            trial.has_line(mark)
        })
    }

    /// Renders the board as three rows of `c | c | c` separated by dashes.
    /// Empty cells are drawn as a space. The result ends with a newline.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(64);
        for row in 0..3 {
            for col in 0..3 {
                let symbol = self.cells[row * 3 + col].map_or(' ', Mark::symbol);
                out.push(symbol);
                if col < 2 {
                    out.push_str(" | ");
                }
            }
            out.push('\n');
            if row < 2 {
                out.push_str("-----------\n");
            }
        }
        out
    }
}
