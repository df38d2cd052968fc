use crate::games::SessionRng;
use super::board::{Board, CELL_COUNT};
use super::bot_controller::{BotInput, BotType, calculate_move};
use super::types::{GameStatus, Mark, MoveError, WinningLine};
use super::win_detector::check_win_with_line;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnResult {
    pub player_move: usize,
    pub bot_move: Option<usize>,
    pub status: GameStatus,
}

/// One human-vs-bot game. The human always holds `X` and moves first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicTacToeGameState {
    pub board: Board,
    pub player_mark: Mark,
    pub bot_mark: Mark,
    pub status: GameStatus,
    pub last_move: Option<usize>,
    pub bot_last_move: Option<usize>,
}

impl Default for TicTacToeGameState {
    fn default() -> Self {
        Self::new()
    }
}

impl TicTacToeGameState {
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            player_mark: Mark::X,
            bot_mark: Mark::O,
            status: GameStatus::InProgress,
            last_move: None,
            bot_last_move: None,
        }
    }

    pub fn place_mark(&mut self, index: usize) -> Result<(), MoveError> {
        self.place(self.player_mark, index)?;
        self.last_move = Some(index);
        Ok(())
    }

    /// Applies the player's move and, if the game is still running, the bot's
    /// reply.
    pub fn play_turn(
        &mut self,
        index: usize,
        bot_type: BotType,
        rng: &mut SessionRng,
    ) -> Result<TurnResult, MoveError> {
        self.place_mark(index)?;

        let mut bot_move = None;
        if self.status == GameStatus::InProgress {
            let input = BotInput::from_game_state(self);
            if let Some(bot_index) = calculate_move(bot_type, &input, rng) {
                self.place(self.bot_mark, bot_index)?;
                self.bot_last_move = Some(bot_index);
                bot_move = Some(bot_index);
            }
        }

        Ok(TurnResult {
            player_move: index,
            bot_move,
            status: self.status,
        })
    }

    fn place(&mut self, mark: Mark, index: usize) -> Result<(), MoveError> {
        if self.status.is_over() {
            return Err(MoveError::GameOver);
        }

        if index >= CELL_COUNT {
            return Err(MoveError::OutOfBounds { index });
        }

        if !self.board.is_empty_at(index) {
            return Err(MoveError::CellOccupied { index });
        }

        self.board.set(index, mark);
        self.status = GameStatus::from_board(&self.board);
        Ok(())
    }

    pub fn is_over(&self) -> bool {
        self.status.is_over()
    }

    pub fn player_won(&self) -> bool {
        self.status.winner() == Some(self.player_mark)
    }

    pub fn winning_line(&self) -> Option<WinningLine> {
        check_win_with_line(&self.board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with(board: &str) -> TicTacToeGameState {
        let board: Board = board.parse().unwrap();
        TicTacToeGameState {
            board,
            status: GameStatus::from_board(&board),
            ..TicTacToeGameState::new()
        }
    }

    #[test]
    fn test_new_game_is_in_progress() {
        let state = TicTacToeGameState::new();
        assert_eq!(state.status, GameStatus::InProgress);
        assert_eq!(state.board, Board::new());
        assert!(state.winning_line().is_none());
    }

    #[test]
    fn test_play_turn_places_both_marks() {
        let mut state = TicTacToeGameState::new();
        let mut rng = SessionRng::new(1);
        let result = state.play_turn(4, BotType::Minimax, &mut rng).unwrap();

        assert_eq!(result.player_move, 4);
        assert_eq!(result.bot_move, Some(0));
        assert_eq!(result.status, GameStatus::InProgress);
        assert_eq!(state.board.get(4), Some(Mark::X));
        assert_eq!(state.board.get(0), Some(Mark::O));
        assert_eq!(state.last_move, Some(4));
        assert_eq!(state.bot_last_move, Some(0));
    }

    #[test]
    fn test_occupied_cell_is_rejected_without_changes() {
        let mut state = state_with("X.. .O. ...");
        let before = state.clone();
        let mut rng = SessionRng::new(1);
        let result = state.play_turn(4, BotType::Minimax, &mut rng);
        assert_eq!(result, Err(MoveError::CellOccupied { index: 4 }));
        assert_eq!(state, before);
    }

    #[test]
    fn test_out_of_bounds_is_rejected() {
        let mut state = TicTacToeGameState::new();
        assert_eq!(state.place_mark(9), Err(MoveError::OutOfBounds { index: 9 }));
    }

    #[test]
    fn test_player_win_skips_bot_move() {
        let mut state = state_with("XX. OO. ...");
        let mut rng = SessionRng::new(1);
        let result = state.play_turn(2, BotType::Minimax, &mut rng).unwrap();
        assert_eq!(result.status, GameStatus::XWon);
        assert_eq!(result.bot_move, None);
        assert!(state.player_won());
        assert_eq!(state.winning_line().map(|l| l.cells), Some([0, 1, 2]));
    }

    #[test]
    fn test_bot_win_ends_game() {
        let mut state = state_with("X.. OO. X..");
        let mut rng = SessionRng::new(1);
        let result = state.play_turn(8, BotType::Minimax, &mut rng).unwrap();
        assert_eq!(result.bot_move, Some(5));
        assert_eq!(result.status, GameStatus::OWon);
        assert!(!state.player_won());
        assert_eq!(state.place_mark(1), Err(MoveError::GameOver));
    }

    #[test]
    fn test_filling_last_cell_is_draw() {
        let mut state = state_with("XOX XOO OX.");
        let mut rng = SessionRng::new(1);
        let result = state.play_turn(8, BotType::Minimax, &mut rng).unwrap();
        assert_eq!(result.status, GameStatus::Draw);
        assert_eq!(result.bot_move, None);
        assert!(state.is_over());
    }

    #[test]
    fn test_game_against_minimax_never_ends_in_player_win() {
        let mut rng = SessionRng::new(3);
        let mut state = TicTacToeGameState::new();
        let mut player_rng = SessionRng::new(99);
        while !state.is_over() {
            let moves: Vec<usize> = state.board.empty_cells().collect();
            let index = moves[player_rng.random_range(0..moves.len())];
            state.play_turn(index, BotType::Minimax, &mut rng).unwrap();
        }
        assert!(!state.player_won());
    }
}
