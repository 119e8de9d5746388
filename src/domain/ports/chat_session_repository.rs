use crate::domain::entities::ChatSession;
use crate::domain::errors::DomainResult;
use async_trait::async_trait;

#[async_trait]
pub trait ChatSessionRepository: Send + Sync {
    /// Sessions with status `Queued`, oldest first
    async fn fetch_queued_sessions(&self) -> DomainResult<Vec<ChatSession>>;
    async fn create_session(&self, session: &ChatSession) -> DomainResult<()>;
    /// Versioned update: fails with `Conflict` when `session.version` is stale.
    async fn update_session(&self, session: &ChatSession) -> DomainResult<()>;
    async fn fetch_session_by_id(&self, session_id: &str) -> DomainResult<Option<ChatSession>>;
    async fn count_active_sessions_for_agent(&self, agent_id: &str) -> DomainResult<u32>;
}
