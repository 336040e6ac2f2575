use std::{fmt, str::FromStr};

/// Number of cells on the board.
pub const CELL_COUNT: usize = 9;

/// The 8 winning lines: 3 rows, 3 columns, 2 diagonals.
pub const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// One of the two playing symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum Symbol {
    X,
    O,
}

impl Symbol {
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Symbol::X => Symbol::O,
            Symbol::O => Symbol::X,
        }
    }
}

/// Error returned when parsing a board string fails.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("invalid board: {reason}")]
pub struct ParseBoardError {
    #[error(not(source))]
    reason: String,
}

/// A 3x3 board: 9 cells in row-major order, each empty or holding a
/// symbol.
///
/// Boards are small copyable values; the search operates on copies, so a
/// cell, once set, is never cleared in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Board {
    cells: [Option<Symbol>; CELL_COUNT],
}

impl Board {
    pub const EMPTY: Self = Self {
        cells: [None; CELL_COUNT],
    };

    #[must_use]
    pub const fn from_cells(cells: [Option<Symbol>; CELL_COUNT]) -> Self {
        Self { cells }
    }

    #[must_use]
    pub const fn cell(&self, index: usize) -> Option<Symbol> {
        self.cells[index]
    }

    /// Returns a copy of the board with `symbol` placed at `index`.
    ///
    /// # Panics
    ///
    /// Panics in debug mode if the cell is already occupied.
    #[must_use]
    pub fn with(mut self, index: usize, symbol: Symbol) -> Self {
        debug_assert!(self.cells[index].is_none(), "cell {index} is occupied");
        self.cells[index] = Some(symbol);
        self
    }

    /// Iterates over the indices of empty cells in increasing order.
    pub fn empty_cells(&self) -> impl Iterator<Item = usize> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_none())
            .map(|(index, _)| index)
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Returns the symbol completing any winning line, if one exists.
    #[must_use]
    pub fn winner(&self) -> Option<Symbol> {
        WINNING_LINES.iter().find_map(|&[a, b, c]| {
            let first = self.cells[a]?;
            (self.cells[b] == Some(first) && self.cells[c] == Some(first)).then_some(first)
        })
    }

    /// Whether the position is terminal: a completed line or a full board.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.winner().is_some() || self.is_full()
    }
}

impl FromStr for Board {
    type Err = ParseBoardError;

    /// Parses a board from 9 characters (`X`, `O`, or `.` for empty) in
    /// row-major order.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() != CELL_COUNT {
            return Err(ParseBoardError {
                reason: format!("expected {CELL_COUNT} cells, got {}", chars.len()),
            });
        }
        let mut cells = [None; CELL_COUNT];
        for (index, c) in chars.into_iter().enumerate() {
            cells[index] = match c {
                'X' | 'x' => Some(Symbol::X),
                'O' | 'o' => Some(Symbol::O),
                '.' => None,
                other => {
                    return Err(ParseBoardError {
                        reason: format!("unexpected cell character {other:?} at index {index}"),
                    });
                }
            };
        }
        Ok(Self { cells })
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for cell in &self.cells {
            match cell {
                Some(symbol) => write!(f, "{symbol}")?,
                None => write!(f, ".")?,
            }
        }
        Ok(())
    }
}
