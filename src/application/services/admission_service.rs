use crate::application::services::capacity::CapacityPolicy;
use crate::domain::entities::{ChatSession, ChatStatus};
use crate::domain::errors::DomainResult;
use crate::domain::ports::{
    agent_repository::AgentRepository, chat_session_repository::ChatSessionRepository,
};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdmissionDecision {
    /// Fits within the team's own queue limit
    Accepted,
    /// Only fits because office-hours overflow was drawn on
    AcceptedWithOverflow,
    Rejected,
}

impl AdmissionDecision {
    pub fn is_accepted(&self) -> bool {
        !matches!(self, AdmissionDecision::Rejected)
    }

    fn as_label(&self) -> &'static str {
        match self {
            AdmissionDecision::Accepted => "accepted",
            AdmissionDecision::AcceptedWithOverflow => "accepted_overflow",
            AdmissionDecision::Rejected => "rejected",
        }
    }
}

/// Decides whether an incoming chat may enter the queue
#[derive(Clone)]
pub struct AdmissionService {
    agent_repo: Arc<dyn AgentRepository>,
    session_repo: Arc<dyn ChatSessionRepository>,
    policy: CapacityPolicy,
}

impl AdmissionService {
    pub fn new(
        agent_repo: Arc<dyn AgentRepository>,
        session_repo: Arc<dyn ChatSessionRepository>,
        policy: CapacityPolicy,
    ) -> Self {
        Self {
            agent_repo,
            session_repo,
            policy,
        }
    }

    /// Pure admission rule.
    ///
    /// Outside office hours a full queue rejects straight away; during office hours
    /// the fixed overflow reserve is added before deciding.
    pub fn evaluate(
        policy: &CapacityPolicy,
        team_capacity: u32,
        queued_count: usize,
        is_office_hours: bool,
    ) -> AdmissionDecision {
        let queued = queued_count as u64;
        let mut total = u64::from(policy.queue_limit(team_capacity));

        if queued < total {
            return AdmissionDecision::Accepted;
        }

        if !is_office_hours {
            return AdmissionDecision::Rejected;
        }

        total += u64::from(policy.overflow_capacity());
        if queued < total {
            AdmissionDecision::AcceptedWithOverflow
        } else {
            AdmissionDecision::Rejected
        }
    }

    /// Admit `session` into the queue if capacity allows.
    ///
    /// Returns `Ok(false)` when the queue is full; only store failures are errors.
    pub async fn queue_session(
        &self,
        session: ChatSession,
        is_office_hours: bool,
    ) -> DomainResult<bool> {
        let agents = self.agent_repo.fetch_available_agents().await?;
        let team_capacity = self.policy.team_capacity(&agents);
        let queued_count = self.session_repo.fetch_queued_sessions().await?.len();

        let decision = Self::evaluate(&self.policy, team_capacity, queued_count, is_office_hours);
        metrics::counter!("chatdesk_admissions_total", "outcome" => decision.as_label())
            .increment(1);

        if !decision.is_accepted() {
            tracing::info!(
                "Rejected chat {}: {} queued, team capacity {}, office hours: {}",
                session.id,
                queued_count,
                team_capacity,
                is_office_hours
            );
            return Ok(false);
        }

        // The queue only ever holds fresh, unassigned sessions
        let session = ChatSession {
            assigned_agent_id: None,
            status: ChatStatus::Queued,
            poll_count: 0,
            ..session
        };
        self.session_repo.create_session(&session).await?;

        tracing::info!(
            "Queued chat {} ({}): {} already queued, team capacity {}",
            session.id,
            decision.as_label(),
            queued_count,
            team_capacity
        );

        Ok(true)
    }
}
