use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    Form, Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
};
use serde::Deserialize;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
};

use common::games::SessionRng;
use common::games::tictactoe::{BotType, GameStatus, TicTacToeGameState};
use common::{Nickname, SessionId, log, log_error};

use crate::player_store::{PlayerRepository, StoreError};
use crate::session_manager::SessionManager;
use crate::views::{render_game, render_index};

#[derive(Clone)]
pub struct WebServerState {
    pub session_manager: SessionManager,
    pub players: Arc<dyn PlayerRepository>,
    pub bot_type: BotType,
    pub cookie_name: String,
}

impl WebServerState {
    pub fn new(
        session_manager: SessionManager,
        players: Arc<dyn PlayerRepository>,
        bot_type: BotType,
        cookie_name: String,
    ) -> Self {
        Self {
            session_manager,
            players,
            bot_type,
            cookie_name,
        }
    }

    fn session_id(&self, headers: &HeaderMap) -> Option<SessionId> {
        session_id_from_headers(headers, &self.cookie_name)
    }

    fn session_cookie(&self, session_id: &SessionId) -> String {
        format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax",
            self.cookie_name, session_id
        )
    }

    fn expired_cookie(&self) -> String {
        format!("{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0", self.cookie_name)
    }
}

#[derive(Deserialize)]
pub struct LoginForm {
    nickname: String,
}

#[derive(Deserialize)]
pub struct MoveForm {
    #[serde(rename = "move")]
    cell: String,
}

pub fn session_id_from_headers(headers: &HeaderMap, cookie_name: &str) -> Option<SessionId> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == cookie_name && !value.is_empty())
        .map(|(_, value)| SessionId::new(value.to_string()))
}

pub fn build_router(state: WebServerState, static_dir: Option<PathBuf>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .route("/api/leaderboard", get(leaderboard_handler))
        .layer(cors);

    let mut app = Router::new()
        .route("/", get(index_handler).post(login_handler))
        .route("/game", get(new_game_handler).post(move_handler))
        .route("/logout", get(logout_handler))
        .merge(api);

    if let Some(static_dir) = static_dir {
        app = app.nest_service("/static", ServeDir::new(static_dir));
    }

    app.with_state(state)
}

pub async fn run_web_server(
    state: WebServerState,
    static_dir: Option<PathBuf>,
    addr: SocketAddr,
    shutdown_signal: impl Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    let app = build_router(state, static_dir);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    log!("Web server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await
}

/// Runs a player store call on the blocking pool; the YAML store writes the
/// file while holding its lock.
async fn with_players<T, F>(state: &WebServerState, f: F) -> Result<T, StoreError>
where
    T: Send + 'static,
    F: FnOnce(&dyn PlayerRepository) -> Result<T, StoreError> + Send + 'static,
{
    let players = Arc::clone(&state.players);
    tokio::task::spawn_blocking(move || f(players.as_ref()))
        .await
        .map_err(|err| StoreError::Io(std::io::Error::other(err)))?
}

fn store_error_response(err: StoreError) -> Response {
    log_error!("Player store error: {}", err);
    (StatusCode::INTERNAL_SERVER_ERROR, "Player store unavailable").into_response()
}

async fn index_handler(State(state): State<WebServerState>, headers: HeaderMap) -> Response {
    let current = match state.session_id(&headers) {
        Some(id) => state.session_manager.nickname(&id).await,
        None => None,
    };

    match with_players(&state, |players| players.leaderboard()).await {
        Ok(players) => Html(render_index(&players, current.as_ref(), None)).into_response(),
        Err(err) => store_error_response(err),
    }
}

async fn login_handler(
    State(state): State<WebServerState>,
    headers: HeaderMap,
    Form(form): Form<LoginForm>,
) -> Response {
    let nickname = match Nickname::parse(&form.nickname) {
        Ok(nickname) => nickname,
        Err(message) => {
            return match with_players(&state, |players| players.leaderboard()).await {
                Ok(players) => (
                    StatusCode::BAD_REQUEST,
                    Html(render_index(&players, None, Some(&message))),
                )
                    .into_response(),
                Err(err) => store_error_response(err),
            };
        }
    };

    let login_nickname = nickname.clone();
    let registered = with_players(&state, move |players| players.find_or_create(&login_nickname)).await;
    let player = match registered {
        Ok(player) => player,
        Err(err) => return store_error_response(err),
    };

    let session_id = state
        .session_manager
        .resume_or_create(state.session_id(&headers))
        .await;
    state
        .session_manager
        .set_nickname(&session_id, nickname)
        .await;

    log!("Player {} (wins: {}) logged in", player.nickname, player.wins);

    (
        [(header::SET_COOKIE, state.session_cookie(&session_id))],
        Redirect::to("/game"),
    )
        .into_response()
}

async fn new_game_handler(State(state): State<WebServerState>, headers: HeaderMap) -> Response {
    let Some(session_id) = state.session_id(&headers) else {
        return Redirect::to("/").into_response();
    };
    let Some(nickname) = state.session_manager.nickname(&session_id).await else {
        return Redirect::to("/").into_response();
    };

    let game = TicTacToeGameState::new();
    state.session_manager.store_game(&session_id, game.clone()).await;

    Html(render_game(&game, &nickname, None)).into_response()
}

async fn move_handler(
    State(state): State<WebServerState>,
    headers: HeaderMap,
    Form(form): Form<MoveForm>,
) -> Response {
    let Some(session_id) = state.session_id(&headers) else {
        return Redirect::to("/").into_response();
    };
    let Some(session) = state.session_manager.get(&session_id).await else {
        return Redirect::to("/").into_response();
    };
    let Some(nickname) = session.nickname else {
        return Redirect::to("/").into_response();
    };

    let game = session.game.unwrap_or_default();

    let Ok(index) = form.cell.trim().parse::<usize>() else {
        let message = format!("Invalid move {:?}", form.cell);
        return (
            StatusCode::BAD_REQUEST,
            Html(render_game(&game, &nickname, Some(&message))),
        )
            .into_response();
    };

    let bot_type = state.bot_type;
    let mut next = game.clone();
    let turn = tokio::task::spawn_blocking(move || {
        let mut rng = SessionRng::from_random();
        let result = next.play_turn(index, bot_type, &mut rng);
        (next, result)
    })
    .await;

    let (next, result) = match turn {
        Ok(turn) => turn,
        Err(err) => {
            log_error!("Move calculation failed: {}", err);
            return (StatusCode::INTERNAL_SERVER_ERROR, "Move calculation failed").into_response();
        }
    };

    let result = match result {
        Ok(result) => result,
        Err(err) => {
            log!("Ignoring move from {}: {}", nickname, err);
            return Html(render_game(&game, &nickname, None)).into_response();
        }
    };

    if !state
        .session_manager
        .commit_game(&session_id, &game, next.clone())
        .await
    {
        // Another request on this session moved first; show its board.
        log!("Dropping stale move from {}", nickname);
        let Some(session) = state.session_manager.get(&session_id).await else {
            return Redirect::to("/").into_response();
        };
        let current = session.game.unwrap_or_default();
        return Html(render_game(&current, &nickname, None)).into_response();
    }

    if result.status.is_over() {
        log!("Game of {} finished: {:?}", nickname, result.status);
    }

    if result.status == GameStatus::XWon {
        let winner = nickname.clone();
        match with_players(&state, move |players| players.record_win(&winner)).await {
            Ok(Some(player)) => log!("{} now has {} wins", player.nickname, player.wins),
            Ok(None) => log_error!("Win for unregistered player {}", nickname),
            Err(err) => return store_error_response(err),
        }
    }

    Html(render_game(&next, &nickname, None)).into_response()
}

async fn logout_handler(State(state): State<WebServerState>, headers: HeaderMap) -> Response {
    if let Some(session_id) = state.session_id(&headers) {
        state.session_manager.remove(&session_id).await;
    }

    (
        [(header::SET_COOKIE, state.expired_cookie())],
        Redirect::to("/"),
    )
        .into_response()
}

async fn leaderboard_handler(State(state): State<WebServerState>) -> Response {
    match with_players(&state, |players| players.leaderboard()).await {
        Ok(players) => Json(players).into_response(),
        Err(err) => store_error_response(err),
    }
}
