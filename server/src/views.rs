use common::Nickname;
use common::games::tictactoe::{CELL_COUNT, GameStatus, Mark, TicTacToeGameState};

use crate::player_store::Player;

const STYLE: &str = "\
body { font-family: sans-serif; max-width: 32rem; margin: 2rem auto; }
table.leaderboard { border-collapse: collapse; width: 100%; }
table.leaderboard td, table.leaderboard th { border-bottom: 1px solid #ccc; padding: 0.3rem; text-align: left; }
.board { display: grid; grid-template-columns: repeat(3, 5rem); gap: 0.3rem; }
.board button, .board span { width: 5rem; height: 5rem; font-size: 2.5rem; }
.board span { display: flex; align-items: center; justify-content: center; border: 1px solid #999; }
.board .win { background: #ffe680; }
.error { color: #b00020; }
.result { font-size: 1.4rem; font-weight: bold; }
";

pub fn html_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n<style>\n{}</style>\n</head>\n<body>\n{}</body>\n</html>\n",
        html_escape(title),
        STYLE,
        body
    )
}

pub fn render_index(players: &[Player], current: Option<&Nickname>, error: Option<&str>) -> String {
    let mut body = String::from("<h1>Tic-tac-toe</h1>\n");

    if let Some(error) = error {
        body.push_str(&format!("<p class=\"error\">{}</p>\n", html_escape(error)));
    }

    match current {
        Some(nickname) => body.push_str(&format!(
            "<p>Playing as <b>{}</b>. <a href=\"/game\">Play</a> | <a href=\"/logout\">Log out</a></p>\n",
            html_escape(nickname.as_str())
        )),
        None => body.push_str(
            "<form method=\"post\" action=\"/\">\n\
             <label>Nickname <input name=\"nickname\" maxlength=\"50\" required></label>\n\
             <button type=\"submit\">Play</button>\n\
             </form>\n",
        ),
    }

    body.push_str("<h2>Leaderboard</h2>\n");
    if players.is_empty() {
        body.push_str("<p>No players yet.</p>\n");
    } else {
        body.push_str("<table class=\"leaderboard\">\n<tr><th>#</th><th>Player</th><th>Wins</th></tr>\n");
        for (rank, player) in players.iter().enumerate() {
            body.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                rank + 1,
                html_escape(&player.nickname),
                player.wins
            ));
        }
        body.push_str("</table>\n");
    }

    page("Tic-tac-toe", &body)
}

fn result_message(status: GameStatus, game: &TicTacToeGameState) -> Option<&'static str> {
    match status {
        GameStatus::InProgress => None,
        GameStatus::Draw => Some("Draw!"),
        _ if game.player_won() => Some("You win!"),
        _ => Some("Computer wins!"),
    }
}

pub fn render_game(game: &TicTacToeGameState, nickname: &Nickname, error: Option<&str>) -> String {
    let mut body = format!(
        "<h1>Tic-tac-toe</h1>\n<p>{} ({}) vs computer ({})</p>\n",
        html_escape(nickname.as_str()),
        game.player_mark.symbol(),
        game.bot_mark.symbol()
    );

    if let Some(error) = error {
        body.push_str(&format!("<p class=\"error\">{}</p>\n", html_escape(error)));
    }
    if let Some(message) = result_message(game.status, game) {
        body.push_str(&format!("<p class=\"result\">{}</p>\n", message));
    }

    let winning_line = game.winning_line();
    body.push_str("<form method=\"post\" action=\"/game\" class=\"board\">\n");
    for index in 0..CELL_COUNT {
        let mark = game.board.get(index).unwrap_or(Mark::Empty);
        let highlighted = winning_line.is_some_and(|line| line.contains(index));
        if mark == Mark::Empty && !game.is_over() {
            body.push_str(&format!(
                "<button type=\"submit\" name=\"move\" value=\"{}\"></button>\n",
                index
            ));
        } else {
            body.push_str(&format!(
                "<span data-cell=\"{}\"{}>{}</span>\n",
                index,
                if highlighted { " class=\"win\"" } else { "" },
                mark.symbol()
            ));
        }
    }
    body.push_str("</form>\n");

    body.push_str("<p><a href=\"/game\">New game</a> | <a href=\"/\">Leaderboard</a> | <a href=\"/logout\">Log out</a></p>\n");

    page("Tic-tac-toe", &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use common::games::tictactoe::Board;

    fn player(id: u64, nickname: &str, wins: u32) -> Player {
        Player {
            id,
            nickname: nickname.to_string(),
            wins,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_escape_covers_markup() {
        assert_eq!(html_escape("<b>\"Tom\" & 'Jerry'</b>"), "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;");
    }

    #[test]
    fn test_index_escapes_nicknames_and_ranks_players() {
        let players = vec![player(2, "<script>", 3), player(1, "bob", 1)];
        let html = render_index(&players, None, None);
        assert!(html.contains("<td>1</td><td>&lt;script&gt;</td><td>3</td>"));
        assert!(html.contains("<td>2</td><td>bob</td><td>1</td>"));
        assert!(!html.contains("<script>"));
        assert!(html.contains("name=\"nickname\""));
    }

    #[test]
    fn test_game_view_offers_only_empty_cells() {
        let mut game = TicTacToeGameState::new();
        game.place_mark(4).unwrap();
        let html = render_game(&game, &Nickname::parse("alice").unwrap(), None);
        assert!(!html.contains("value=\"4\""));
        assert!(html.contains("<span data-cell=\"4\">X</span>"));
        assert_eq!(html.matches("name=\"move\"").count(), 8);
    }

    #[test]
    fn test_finished_game_shows_result_and_line() {
        let board: Board = "XXX OO. ...".parse().unwrap();
        let game = TicTacToeGameState {
            board,
            status: GameStatus::from_board(&board),
            ..TicTacToeGameState::new()
        };
        let html = render_game(&game, &Nickname::parse("alice").unwrap(), None);
        assert!(html.contains("You win!"));
        assert!(html.contains("<span data-cell=\"0\" class=\"win\">X</span>"));
        assert!(!html.contains("name=\"move\""));
    }
}
