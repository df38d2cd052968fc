mod board;
mod bot_controller;
mod game_state;
mod types;
mod win_detector;

pub use board::{BOARD_SIDE, Board, CELL_COUNT, get_available_moves};
pub use bot_controller::{BotInput, BotType, calculate_minimax_move, calculate_move};
pub use game_state::{TicTacToeGameState, TurnResult};
pub use types::{BoardParseError, GameStatus, Mark, MoveError, WinningLine};
pub use win_detector::{WINNING_LINES, check_win, check_win_with_line};
