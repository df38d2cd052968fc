use super::board::Board;
use super::types::{Mark, WinningLine};

/// Rows, then columns, then diagonals. The first complete line wins.
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

pub fn check_win(board: &Board) -> Option<Mark> {
    check_win_with_line(board).map(|line| line.mark)
}

pub fn check_win_with_line(board: &Board) -> Option<WinningLine> {
    let cells = board.cells();

    for line in WINNING_LINES {
        let [a, b, c] = line;
        let mark = cells[a];
        if mark != Mark::Empty && cells[b] == mark && cells[c] == mark {
            return Some(WinningLine::new(mark, line));
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::board::CELL_COUNT;

    fn parse(s: &str) -> Board {
        s.parse().unwrap()
    }

    #[test]
    fn test_empty_board_has_no_winner() {
        assert_eq!(check_win(&Board::new()), None);
    }

    #[test]
    fn test_top_row_wins_for_x() {
        let board = Board::from_symbols(&["X", "X", "X", "", "", "", "", "", ""]).unwrap();
        assert_eq!(check_win(&board), Some(Mark::X));
        assert_eq!(check_win_with_line(&board).map(|l| l.cells), Some([0, 1, 2]));
    }

    #[test]
    fn test_full_board_without_line_has_no_winner() {
        let board = Board::from_symbols(&["X", "O", "X", "O", "X", "O", "O", "X", "O"]).unwrap();
        assert!(board.is_full());
        assert_eq!(check_win(&board), None);
    }

    #[test]
    fn test_every_line_wins_for_both_marks() {
        for mark in [Mark::X, Mark::O] {
            for line in WINNING_LINES {
                let mut board = Board::new();
                for index in line {
                    board.set(index, mark);
                }
                let found = check_win_with_line(&board);
                assert_eq!(found, Some(WinningLine::new(mark, line)), "line {:?}", line);
            }
        }
    }

    #[test]
    fn test_line_with_one_opponent_mark_does_not_win() {
        for line in WINNING_LINES {
            let mut board = Board::new();
            board.set(line[0], Mark::X);
            board.set(line[1], Mark::X);
            board.set(line[2], Mark::O);
            assert_eq!(check_win(&board), None, "line {:?}", line);
        }
    }

    #[test]
    fn test_no_winner_on_boards_without_three_in_a_row() {
        // Every board with at most two marks per side cannot hold a line.
        for first in 0..CELL_COUNT {
            for second in 0..CELL_COUNT {
                if first == second {
                    continue;
                }
                let mut board = Board::new();
                board.set(first, Mark::X);
                board.set(second, Mark::X);
                assert_eq!(check_win(&board), None);
            }
        }
    }

    #[test]
    fn test_first_line_in_order_is_reported() {
        // Not reachable in legal play, but the scan order is fixed.
        let board = parse("XXX OOO ...");
        assert_eq!(check_win_with_line(&board), Some(WinningLine::new(Mark::X, [0, 1, 2])));

        let board = parse("OOO XXX ...");
        assert_eq!(check_win(&board), Some(Mark::O));
    }

    #[test]
    fn test_diagonal_win_for_o() {
        let board = parse("X.O XO. O.X");
        assert_eq!(check_win_with_line(&board), Some(WinningLine::new(Mark::O, [2, 4, 6])));
    }
}
