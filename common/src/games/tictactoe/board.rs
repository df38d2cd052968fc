use std::fmt;
use std::str::FromStr;

use super::types::{BoardParseError, Mark};

pub const BOARD_SIDE: usize = 3;
pub const CELL_COUNT: usize = BOARD_SIDE * BOARD_SIDE;

/// A 3x3 board stored row-major: row `r`, column `c` is cell `3 * r + c`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Board {
    cells: [Mark; CELL_COUNT],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cells(cells: [Mark; CELL_COUNT]) -> Self {
        Self { cells }
    }

    /// Builds a board from per-cell symbols (`"X"`, `"O"`, `""`), the shape a
    /// form post of the board takes.
    pub fn from_symbols<S: AsRef<str>>(symbols: &[S]) -> Result<Self, BoardParseError> {
        if symbols.len() != CELL_COUNT {
            return Err(BoardParseError::WrongCellCount {
                found: symbols.len(),
                expected: CELL_COUNT,
            });
        }

        let mut cells = [Mark::Empty; CELL_COUNT];
        for (index, symbol) in symbols.iter().enumerate() {
            let symbol = symbol.as_ref();
            cells[index] = Mark::from_symbol(symbol).ok_or_else(|| BoardParseError::InvalidMark {
                index,
                value: symbol.to_string(),
            })?;
        }
        Ok(Self::from_cells(cells))
    }

    pub fn cells(&self) -> &[Mark; CELL_COUNT] {
        &self.cells
    }

    pub fn get(&self, index: usize) -> Option<Mark> {
        self.cells.get(index).copied()
    }

    pub fn set(&mut self, index: usize, mark: Mark) {
        self.cells[index] = mark;
    }

    pub fn is_empty_at(&self, index: usize) -> bool {
        self.cells[index] == Mark::Empty
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|&cell| cell != Mark::Empty)
    }

    pub fn empty_cells(&self) -> impl Iterator<Item = usize> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| **cell == Mark::Empty)
            .map(|(index, _)| index)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Mark]> {
        self.cells.chunks(BOARD_SIDE)
    }
}

pub fn get_available_moves(board: &Board) -> Vec<usize> {
    board.empty_cells().collect()
}

/// Compact text form: nine of `X`, `O` and `.` (or `-`, `_`), whitespace ignored.
impl FromStr for Board {
    type Err = BoardParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let symbols: Vec<char> = s.chars().filter(|c| !c.is_whitespace()).collect();
        if symbols.len() != CELL_COUNT {
            return Err(BoardParseError::WrongCellCount {
                found: symbols.len(),
                expected: CELL_COUNT,
            });
        }

        let mut cells = [Mark::Empty; CELL_COUNT];
        for (index, symbol) in symbols.into_iter().enumerate() {
            cells[index] = match symbol {
                'X' | 'x' => Mark::X,
                'O' | 'o' => Mark::O,
                '.' | '-' | '_' => Mark::Empty,
                other => {
                    return Err(BoardParseError::InvalidMark {
                        index,
                        value: other.to_string(),
                    });
                }
            };
        }
        Ok(Self::from_cells(cells))
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row_index, row) in self.rows().enumerate() {
            if row_index > 0 {
                writeln!(f)?;
            }
            for cell in row {
                write!(f, "{}", cell)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new();
        assert!(board.cells().iter().all(|&cell| cell == Mark::Empty));
        assert!(!board.is_full());
        assert_eq!(get_available_moves(&board), (0..CELL_COUNT).collect::<Vec<_>>());
    }

    #[test]
    fn test_from_symbols_matches_compact_form() {
        let from_symbols = Board::from_symbols(&["X", "O", "X", "O", "X", "O", "O", "X", "O"]).unwrap();
        let from_str: Board = "XOX OXO OXO".parse().unwrap();
        assert_eq!(from_symbols, from_str);
        assert!(from_symbols.is_full());

        let mut cells = [Mark::Empty; CELL_COUNT];
        cells[0] = Mark::X;
        cells[4] = Mark::O;
        assert_eq!(Board::from_cells(cells), "X.. .O. ...".parse::<Board>().unwrap());
    }

    #[test]
    fn test_available_moves_are_ascending_empty_cells() {
        let board: Board = "XO. .X. ...".parse().unwrap();
        assert_eq!(get_available_moves(&board), vec![2, 3, 5, 6, 7, 8]);
        assert!(board.is_empty_at(2));
        assert!(!board.is_empty_at(0));
    }

    #[test]
    fn test_parse_rejects_wrong_length() {
        let result = Board::from_symbols(&["X", "O"]);
        assert!(matches!(result, Err(BoardParseError::WrongCellCount { found: 2, expected: 9 })));

        let result = "XOXOXOXOXO".parse::<Board>();
        assert!(matches!(result, Err(BoardParseError::WrongCellCount { found: 10, .. })));
    }

    #[test]
    fn test_parse_rejects_unknown_marks() {
        let result = Board::from_symbols(&["X", "", "", "", "Z", "", "", "", ""]);
        assert!(matches!(result, Err(BoardParseError::InvalidMark { index: 4, .. })));

        let result = "X?.......".parse::<Board>();
        assert!(matches!(result, Err(BoardParseError::InvalidMark { index: 1, .. })));
    }

    #[test]
    fn test_display_renders_rows() {
        let board: Board = "XO. .X. ..O".parse().unwrap();
        assert_eq!(board.to_string(), "XO.\n.X.\n..O");
    }
}
