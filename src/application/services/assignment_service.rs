use crate::application::services::capacity::CapacityPolicy;
use crate::domain::entities::Agent;
use crate::domain::errors::DomainResult;
use crate::domain::ports::{
    agent_repository::AgentRepository, assignment_repository::AssignmentRepository,
    chat_session_repository::ChatSessionRepository,
};
use std::sync::Arc;

/// Outcome of one assignment sweep
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AssignmentReport {
    pub assigned: usize,
    /// Sessions still waiting because every agent was full
    pub left_queued: usize,
}

/// Service for distributing queued chats to available agents
#[derive(Clone)]
pub struct AssignmentService {
    agent_repo: Arc<dyn AgentRepository>,
    session_repo: Arc<dyn ChatSessionRepository>,
    assignment_repo: Arc<dyn AssignmentRepository>,
    policy: CapacityPolicy,
}

impl AssignmentService {
    pub fn new(
        agent_repo: Arc<dyn AgentRepository>,
        session_repo: Arc<dyn ChatSessionRepository>,
        assignment_repo: Arc<dyn AssignmentRepository>,
        policy: CapacityPolicy,
    ) -> Self {
        Self {
            agent_repo,
            session_repo,
            assignment_repo,
            policy,
        }
    }

    /// Index of the agent that should take the next chat: lowest level first,
    /// then the lightest load. Ties keep snapshot order.
    pub fn select_agent(agents: &[Agent], limit: u32) -> Option<usize> {
        agents
            .iter()
            .enumerate()
            .filter(|(_, agent)| agent.has_capacity_within(limit))
            .min_by_key(|(_, agent)| (agent.level, agent.current_chats))
            .map(|(index, _)| index)
    }

    /// Run one sweep over the queue.
    ///
    /// Sessions are taken in the order the store returns them. The sweep stops at the
    /// first session no agent can take; later sessions wait for the next sweep.
    pub async fn assign_pending(&self) -> DomainResult<AssignmentReport> {
        let queued = self.session_repo.fetch_queued_sessions().await?;
        let mut agents = self.agent_repo.fetch_available_agents().await?;
        let total = queued.len();
        let mut report = AssignmentReport::default();

        for mut session in queued {
            let Some(index) = Self::select_agent(&agents, self.policy.nominal_concurrency) else {
                break;
            };
            let agent = &mut agents[index];

            session.assign_to(&agent.id);
            agent.current_chats += 1;

            self.assignment_repo.commit_assignment(&session, agent).await?;
            agent.version += 1;

            tracing::debug!(
                "Assigned chat {} to agent {} ({}, {} chats)",
                session.id,
                agent.id,
                agent.level,
                agent.current_chats
            );
            report.assigned += 1;
        }
        report.left_queued = total - report.assigned;

        metrics::counter!("chatdesk_assignments_total").increment(report.assigned as u64);
        if total > 0 {
            tracing::info!(
                "Assignment sweep: {} assigned, {} left queued",
                report.assigned,
                report.left_queued
            );
        }

        Ok(report)
    }

    /// Reset each available agent's load to the number of active sessions the store
    /// actually holds for them. Returns how many agents were corrected.
    pub async fn reconcile_agent_loads(&self) -> DomainResult<usize> {
        let agents = self.agent_repo.fetch_available_agents().await?;
        let mut corrected = 0;

        for mut agent in agents {
            let actual = self
                .session_repo
                .count_active_sessions_for_agent(&agent.id)
                .await?;
            if actual == agent.current_chats {
                continue;
            }

            tracing::warn!(
                "Agent {} load drifted: recorded {}, active {}",
                agent.id,
                agent.current_chats,
                actual
            );
            agent.current_chats = actual;
            self.agent_repo.update_agent(&agent).await?;
            corrected += 1;
        }

        Ok(corrected)
    }
}
