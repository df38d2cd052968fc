use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

use common::games::tictactoe::TicTacToeGameState;
use common::id_generator::generate_session_id;
use common::{Nickname, SessionId};

#[derive(Debug, Clone)]
pub struct BrowserSession {
    pub nickname: Option<Nickname>,
    pub game: Option<TicTacToeGameState>,
    last_activity: Instant,
}

impl BrowserSession {
    fn new() -> Self {
        Self {
            nickname: None,
            game: None,
            last_activity: Instant::now(),
        }
    }

    fn touch(&mut self) {
        self.last_activity = Instant::now();
    }
}

/// Browser sessions keyed by the session cookie. Each session remembers who
/// is playing and the board of the current game.
#[derive(Debug, Clone, Default)]
pub struct SessionManager {
    sessions: Arc<Mutex<HashMap<SessionId, BrowserSession>>>,
}

impl SessionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `session_id` if it is still live, otherwise opens a new session.
    pub async fn resume_or_create(&self, session_id: Option<SessionId>) -> SessionId {
        let mut sessions = self.sessions.lock().await;

        if let Some(id) = session_id
            && let Some(session) = sessions.get_mut(&id)
        {
            session.touch();
            return id;
        }

        let id = generate_session_id();
        sessions.insert(id.clone(), BrowserSession::new());
        id
    }

    pub async fn get(&self, session_id: &SessionId) -> Option<BrowserSession> {
        let mut sessions = self.sessions.lock().await;
        let session = sessions.get_mut(session_id)?;
        session.touch();
        Some(session.clone())
    }

    pub async fn nickname(&self, session_id: &SessionId) -> Option<Nickname> {
        self.get(session_id).await.and_then(|s| s.nickname)
    }

    pub async fn set_nickname(&self, session_id: &SessionId, nickname: Nickname) -> bool {
        self.update(session_id, |session| {
            session.nickname = Some(nickname);
            session.game = None;
        })
        .await
        .is_some()
    }

    pub async fn store_game(&self, session_id: &SessionId, game: TicTacToeGameState) -> bool {
        self.update(session_id, |session| session.game = Some(game))
            .await
            .is_some()
    }

    /// Stores `next` only if the session's game still equals `expected`. A
    /// turn computed from a board that another request has since changed is
    /// dropped.
    pub async fn commit_game(
        &self,
        session_id: &SessionId,
        expected: &TicTacToeGameState,
        next: TicTacToeGameState,
    ) -> bool {
        self.update(session_id, |session| {
            let unchanged = match &session.game {
                Some(game) => game == expected,
                None => *expected == TicTacToeGameState::new(),
            };
            if unchanged {
                session.game = Some(next);
            }
            unchanged
        })
        .await
        .unwrap_or(false)
    }

    pub async fn update<R>(
        &self,
        session_id: &SessionId,
        f: impl FnOnce(&mut BrowserSession) -> R,
    ) -> Option<R> {
        let mut sessions = self.sessions.lock().await;
        let session = sessions.get_mut(session_id)?;
        session.touch();
        Some(f(session))
    }

    pub async fn remove(&self, session_id: &SessionId) -> bool {
        self.sessions.lock().await.remove(session_id).is_some()
    }

    pub async fn count(&self) -> usize {
        self.sessions.lock().await.len()
    }

    pub async fn remove_inactive(&self, inactivity_timeout: Duration) -> Vec<SessionId> {
        let mut sessions = self.sessions.lock().await;
        let now = Instant::now();

        let inactive: Vec<SessionId> = sessions
            .iter()
            .filter(|(_, session)| now.duration_since(session.last_activity) > inactivity_timeout)
            .map(|(id, _)| id.clone())
            .collect();

        for id in &inactive {
            sessions.remove(id);
        }
        inactive
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unknown_session_id_gets_replaced() {
        let manager = SessionManager::new();
        let stale = SessionId::new("stale".to_string());
        let id = manager.resume_or_create(Some(stale.clone())).await;
        assert_ne!(id, stale);
        assert_eq!(manager.resume_or_create(Some(id.clone())).await, id);
        assert_eq!(manager.count().await, 1);
    }

    #[tokio::test]
    async fn test_nickname_binding_resets_game() {
        let manager = SessionManager::new();
        let id = manager.resume_or_create(None).await;
        assert!(manager.store_game(&id, TicTacToeGameState::new()).await);

        let nickname = Nickname::parse("alice").unwrap();
        assert!(manager.set_nickname(&id, nickname.clone()).await);

        let session = manager.get(&id).await.unwrap();
        assert_eq!(session.nickname, Some(nickname));
        assert!(session.game.is_none());
    }

    #[tokio::test]
    async fn test_updates_on_missing_session_are_ignored() {
        let manager = SessionManager::new();
        let missing = SessionId::new("missing".to_string());
        assert!(!manager.store_game(&missing, TicTacToeGameState::new()).await);
        assert!(manager.nickname(&missing).await.is_none());
        assert!(!manager.remove(&missing).await);
    }

    #[tokio::test]
    async fn test_commit_game_rejects_stale_turns() {
        let manager = SessionManager::new();
        let id = manager.resume_or_create(None).await;
        let start = TicTacToeGameState::new();

        let mut first = start.clone();
        first.place_mark(4).unwrap();
        let mut second = start.clone();
        second.place_mark(0).unwrap();

        // A session without a game counts as a fresh one.
        assert!(manager.commit_game(&id, &start, first.clone()).await);
        assert!(!manager.commit_game(&id, &start, second).await);
        assert_eq!(manager.get(&id).await.unwrap().game, Some(first));

        let missing = SessionId::new("missing".to_string());
        assert!(!manager.commit_game(&missing, &start, start.clone()).await);
    }

    #[tokio::test]
    async fn test_remove_inactive_evicts_idle_sessions() {
        let manager = SessionManager::new();
        let id = manager.resume_or_create(None).await;

        assert!(manager.remove_inactive(Duration::from_secs(60)).await.is_empty());

        tokio::time::sleep(Duration::from_millis(20)).await;
        let removed = manager.remove_inactive(Duration::from_millis(1)).await;
        assert_eq!(removed, vec![id]);
        assert_eq!(manager.count().await, 0);
    }
}
