use std::fmt;

use super::board::Board;
use super::win_detector::check_win;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mark {
    #[default]
    Empty,
    X,
    O,
}

impl Mark {
    pub fn opponent(&self) -> Option<Mark> {
        match self {
            Mark::X => Some(Mark::O),
            Mark::O => Some(Mark::X),
            Mark::Empty => None,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Mark::X => "X",
            Mark::O => "O",
            Mark::Empty => "",
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Mark> {
        match symbol.trim() {
            "X" | "x" => Some(Mark::X),
            "O" | "o" => Some(Mark::O),
            "" => Some(Mark::Empty),
            _ => None,
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mark::Empty => write!(f, "."),
            _ => write!(f, "{}", self.symbol()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    XWon,
    OWon,
    Draw,
}

impl GameStatus {
    pub fn from_board(board: &Board) -> Self {
        match check_win(board) {
            Some(Mark::X) => GameStatus::XWon,
            Some(Mark::O) => GameStatus::OWon,
            Some(Mark::Empty) => unreachable!(),
            None if board.is_full() => GameStatus::Draw,
            None => GameStatus::InProgress,
        }
    }

    pub fn is_over(&self) -> bool {
        *self != GameStatus::InProgress
    }

    pub fn winner(&self) -> Option<Mark> {
        match self {
            GameStatus::XWon => Some(Mark::X),
            GameStatus::OWon => Some(Mark::O),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WinningLine {
    pub mark: Mark,
    pub cells: [usize; 3],
}

impl WinningLine {
    pub fn new(mark: Mark, cells: [usize; 3]) -> Self {
        Self { mark, cells }
    }

    pub fn contains(&self, index: usize) -> bool {
        self.cells.contains(&index)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    GameOver,
    OutOfBounds { index: usize },
    CellOccupied { index: usize },
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveError::GameOver => write!(f, "Game is already over"),
            MoveError::OutOfBounds { index } => write!(f, "Position {} is out of bounds", index),
            MoveError::CellOccupied { index } => write!(f, "Cell {} is already marked", index),
        }
    }
}

impl std::error::Error for MoveError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardParseError {
    WrongCellCount { found: usize, expected: usize },
    InvalidMark { index: usize, value: String },
}

impl fmt::Display for BoardParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardParseError::WrongCellCount { found, expected } => {
                write!(f, "Board must have {} cells, found {}", expected, found)
            }
            BoardParseError::InvalidMark { index, value } => {
                write!(f, "Invalid mark {:?} at cell {}", value, index)
            }
        }
    }
}

impl std::error::Error for BoardParseError {}
