use serde::{Deserialize, Serialize};

use crate::games::SessionRng;
use super::board::{Board, CELL_COUNT, get_available_moves};
use super::game_state::TicTacToeGameState;
use super::types::Mark;
use super::win_detector::check_win;

const WIN_SCORE: i32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BotType {
    #[default]
    Minimax,
    Random,
}

pub struct BotInput {
    pub board: Board,
    pub current_mark: Mark,
}

impl BotInput {
    pub fn from_game_state(state: &TicTacToeGameState) -> Self {
        Self {
            board: state.board,
            current_mark: state.bot_mark,
        }
    }
}

pub fn calculate_move(bot_type: BotType, input: &BotInput, rng: &mut SessionRng) -> Option<usize> {
    match bot_type {
        BotType::Random => calculate_random_move(input, rng),
        BotType::Minimax => calculate_minimax_move(&input.board, input.current_mark),
    }
}

fn calculate_random_move(input: &BotInput, rng: &mut SessionRng) -> Option<usize> {
    let available_moves = get_available_moves(&input.board);
    if available_moves.is_empty() {
        return None;
    }
    let idx = rng.random_range(0..available_moves.len());
    Some(available_moves[idx])
}

/// Full-depth minimax for `bot_mark`. Candidates are tried in ascending cell
/// order and only a strictly better score replaces the current best, so ties
/// go to the lowest index.
pub fn calculate_minimax_move(board: &Board, bot_mark: Mark) -> Option<usize> {
    let opponent_mark = bot_mark.opponent()?;
    let available_moves = get_available_moves(board);

    if available_moves.is_empty() {
        return None;
    }

    let mut board = *board;
    let mut best_move = None;
    let mut best_score = i32::MIN;

    for index in available_moves {
        board.set(index, bot_mark);
        let score = minimax(&mut board, 0, false, bot_mark, opponent_mark);
        board.set(index, Mark::Empty);

        if score > best_score {
            best_score = score;
            best_move = Some(index);
        }
    }

    best_move
}

fn minimax(
    board: &mut Board,
    depth: i32,
    is_maximizing: bool,
    bot_mark: Mark,
    opponent_mark: Mark,
) -> i32 {
    if let Some(winner) = check_win(board) {
        return if winner == bot_mark {
            WIN_SCORE - depth
        } else {
            depth - WIN_SCORE
        };
    }

    if board.is_full() {
        return 0;
    }

    if is_maximizing {
        let mut max_eval = i32::MIN;
        for index in 0..CELL_COUNT {
            if !board.is_empty_at(index) {
                continue;
            }
            board.set(index, bot_mark);
            let eval = minimax(board, depth + 1, false, bot_mark, opponent_mark);
            board.set(index, Mark::Empty);

            max_eval = max_eval.max(eval);
        }
        max_eval
    } else {
        let mut min_eval = i32::MAX;
        for index in 0..CELL_COUNT {
            if !board.is_empty_at(index) {
                continue;
            }
            board.set(index, opponent_mark);
            let eval = minimax(board, depth + 1, true, bot_mark, opponent_mark);
            board.set(index, Mark::Empty);

            min_eval = min_eval.min(eval);
        }
        min_eval
    }
}
