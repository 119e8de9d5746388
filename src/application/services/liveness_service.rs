use crate::domain::entities::ChatSession;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::ports::{
    chat_session_repository::ChatSessionRepository, time_service::TimeService,
};
use std::sync::Arc;

/// Sweeps a session may go without a client poll before it is marked inactive
pub const DEFAULT_POLL_LIMIT: u32 = 3;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LivenessReport {
    /// Sessions whose counter was advanced this sweep
    pub advanced: usize,
    /// Sessions that reached the limit and were marked inactive this sweep
    pub expired: usize,
}

/// Detects queued chats whose client stopped polling
#[derive(Clone)]
pub struct LivenessService {
    session_repo: Arc<dyn ChatSessionRepository>,
    time_service: Arc<dyn TimeService>,
    poll_limit: u32,
}

impl LivenessService {
    pub fn new(
        session_repo: Arc<dyn ChatSessionRepository>,
        time_service: Arc<dyn TimeService>,
        poll_limit: u32,
    ) -> Self {
        Self {
            session_repo,
            time_service,
            poll_limit,
        }
    }

    /// Advance or expire the poll counter of every queued session.
    ///
    /// A counter at the limit marks the session inactive and stays where it is.
    pub async fn monitor_polling(&self) -> DomainResult<LivenessReport> {
        let sessions = self.session_repo.fetch_queued_sessions().await?;
        let mut report = LivenessReport::default();

        for mut session in sessions {
            if session.poll_count >= self.poll_limit {
                // Already expired: rewriting would only bump the version
                if !session.is_active {
                    continue;
                }
                tracing::info!(
                    "Chat {} missed {} polls, marking inactive",
                    session.id,
                    session.poll_count
                );
                session.is_active = false;
                self.session_repo.update_session(&session).await?;
                report.expired += 1;
            } else {
                session.poll_count += 1;
                self.session_repo.update_session(&session).await?;
                report.advanced += 1;
            }
        }

        metrics::counter!("chatdesk_sessions_expired_total").increment(report.expired as u64);
        tracing::debug!(
            "Liveness sweep: {} advanced, {} expired",
            report.advanced,
            report.expired
        );

        Ok(report)
    }

    /// Heartbeat from the client: reset the counter and re-activate the session.
    pub async fn record_poll(&self, session_id: &str) -> DomainResult<ChatSession> {
        let mut session = self
            .session_repo
            .fetch_session_by_id(session_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Chat session {} not found", session_id)))?;

        session.record_poll(self.time_service.now());
        self.session_repo.update_session(&session).await?;
        session.version += 1;

        Ok(session)
    }
}
