use crate::domain::entities::Agent;
use crate::domain::errors::DomainResult;
use async_trait::async_trait;

#[async_trait]
pub trait AgentRepository: Send + Sync {
    /// Agents whose status is `Available`
    async fn fetch_available_agents(&self) -> DomainResult<Vec<Agent>>;
    /// Every agent on the given shift, whatever their status
    async fn fetch_agents_by_shift(&self, shift_number: u32) -> DomainResult<Vec<Agent>>;
    async fn get_agent_by_id(&self, agent_id: &str) -> DomainResult<Option<Agent>>;
    async fn create_agent(&self, agent: &Agent) -> DomainResult<()>;
    /// Versioned update: fails with `Conflict` when `agent.version` is stale.
    /// On success the stored version is `agent.version + 1`.
    async fn update_agent(&self, agent: &Agent) -> DomainResult<()>;
}
