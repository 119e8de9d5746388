use crate::application::services::{AdmissionService, AssignmentService, LivenessService};
use crate::config::Config;
use crate::domain::entities::{ChatSession, OfficeHours};
use crate::domain::errors::DomainResult;
use crate::domain::ports::agent_repository::AgentRepository;
use crate::domain::ports::assignment_repository::AssignmentRepository;
use crate::domain::ports::chat_session_repository::ChatSessionRepository;
use crate::domain::ports::task_spawner::TaskSpawner;
use crate::domain::ports::time_service::TimeService;
use crate::infrastructure::persistence::Database;
use crate::infrastructure::runtime::tokio::{TokioTaskSpawner, TokioTimeService};
use crate::infrastructure::workers::{Sweep, SweepWorker};
use std::sync::Arc;

/// Services a host wires into its request handlers
#[derive(Clone)]
pub struct AppState {
    pub admission_service: AdmissionService,
    pub assignment_service: AssignmentService,
    pub liveness_service: LivenessService,
    pub office_hours: OfficeHours,
    pub time_service: Arc<dyn TimeService>,
}

impl AppState {
    /// Admit a chat using the configured office-hours calendar for the overflow decision.
    pub async fn queue_session_now(&self, session: ChatSession) -> DomainResult<bool> {
        let is_office_hours = self.office_hours.is_open_at(self.time_service.now())?;
        self.admission_service
            .queue_session(session, is_office_hours)
            .await
    }
}

pub fn build_app_state(db: Database, config: &Config) -> AppState {
    let agent_repo = Arc::new(db.clone()) as Arc<dyn AgentRepository>;
    let session_repo = Arc::new(db.clone()) as Arc<dyn ChatSessionRepository>;
    let assignment_repo = Arc::new(db) as Arc<dyn AssignmentRepository>;
    let time_service = Arc::new(TokioTimeService::new()) as Arc<dyn TimeService>;
    let policy = config.capacity_policy();

    let admission_service =
        AdmissionService::new(agent_repo.clone(), session_repo.clone(), policy.clone());
    tracing::info!("Admission service initialized");

    let assignment_service =
        AssignmentService::new(agent_repo, session_repo.clone(), assignment_repo, policy);
    tracing::info!("Assignment service initialized");

    let liveness_service =
        LivenessService::new(session_repo, time_service.clone(), config.poll_limit);
    tracing::info!(
        "Liveness service initialized (poll limit {})",
        config.poll_limit
    );

    AppState {
        admission_service,
        assignment_service,
        liveness_service,
        office_hours: config.office_hours.clone(),
        time_service,
    }
}

/// Spawn the periodic assignment, liveness and reconciliation sweeps.
pub fn start_background_sweeps(state: &AppState, config: &Config) {
    let task_spawner = Arc::new(TokioTaskSpawner::new()) as Arc<dyn TaskSpawner>;

    let workers = [
        SweepWorker::new(
            Sweep::Assignment(state.assignment_service.clone()),
            config.assignment_interval,
            state.time_service.clone(),
        ),
        SweepWorker::new(
            Sweep::Liveness(state.liveness_service.clone()),
            config.liveness_interval,
            state.time_service.clone(),
        ),
        SweepWorker::new(
            Sweep::Reconciliation(state.assignment_service.clone()),
            config.reconciliation_interval,
            state.time_service.clone(),
        ),
    ];

    for worker in workers {
        worker.start(task_spawner.as_ref());
    }
}
