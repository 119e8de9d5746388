use crate::domain::entities::{Agent, ChatSession};
use crate::domain::errors::DomainResult;
use crate::domain::ports::assignment_repository::AssignmentRepository;
use crate::infrastructure::persistence::{
    agents::write_agent, chat_sessions::write_session, classify_missed_update, Database,
};
use async_trait::async_trait;

#[async_trait]
impl AssignmentRepository for Database {
    async fn commit_assignment(&self, session: &ChatSession, agent: &Agent) -> DomainResult<()> {
        let mut tx = self.pool.begin().await?;

        if write_session(&mut *tx, session).await? == 0 {
            tx.rollback().await?;
            return Err(classify_missed_update(&self.pool, "chat_sessions", &session.id).await);
        }

        if write_agent(&mut *tx, agent).await? == 0 {
            tx.rollback().await?;
            return Err(classify_missed_update(&self.pool, "agents", &agent.id).await);
        }

        tx.commit().await?;
        Ok(())
    }
}
