use crate::domain::entities::{Agent, ChatSession};
use crate::domain::errors::DomainResult;

/// Repository for assignment operations
#[async_trait::async_trait]
pub trait AssignmentRepository: Send + Sync {
    /// Persist an assigned session together with its agent's new load.
    ///
    /// Both rows are written atomically under their version checks; if either is
    /// stale nothing is written and `Conflict` is returned.
    async fn commit_assignment(&self, session: &ChatSession, agent: &Agent) -> DomainResult<()>;
}
