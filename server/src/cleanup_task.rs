use std::time::Duration;

use common::log;

use crate::session_manager::SessionManager;

pub struct CleanupTask {
    session_manager: SessionManager,
    check_interval: Duration,
    inactivity_timeout: Duration,
}

impl CleanupTask {
    pub fn new(
        session_manager: SessionManager,
        check_interval: Duration,
        inactivity_timeout: Duration,
    ) -> Self {
        Self {
            session_manager,
            check_interval,
            inactivity_timeout,
        }
    }

    pub async fn run(&self) {
        let mut interval = tokio::time::interval(self.check_interval);

        loop {
            interval.tick().await;
            self.cleanup_inactive().await;
        }
    }

    async fn cleanup_inactive(&self) -> usize {
        let removed = self
            .session_manager
            .remove_inactive(self.inactivity_timeout)
            .await;

        if !removed.is_empty() {
            log!("Cleaned up {} inactive sessions", removed.len());
        }
        removed.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_cleanup_keeps_active_sessions() {
        common::logger::init_logger(None);
        let manager = SessionManager::new();
        manager.resume_or_create(None).await;

        let task = CleanupTask::new(manager.clone(), Duration::from_secs(1), Duration::from_secs(60));
        assert_eq!(task.cleanup_inactive().await, 0);
        assert_eq!(manager.count().await, 1);
    }

    #[tokio::test]
    async fn test_cleanup_removes_idle_sessions() {
        common::logger::init_logger(None);
        let manager = SessionManager::new();
        manager.resume_or_create(None).await;
        tokio::time::sleep(Duration::from_millis(20)).await;

        let task = CleanupTask::new(manager.clone(), Duration::from_secs(1), Duration::from_millis(1));
        assert_eq!(task.cleanup_inactive().await, 1);
        assert_eq!(manager.count().await, 0);
    }
}
