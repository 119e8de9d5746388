use crate::application::services::{AssignmentService, LivenessService};
use crate::domain::errors::DomainResult;
use crate::domain::ports::task_spawner::TaskSpawner;
use crate::domain::ports::time_service::TimeService;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

/// One of the periodic passes over the queue
#[derive(Clone)]
pub enum Sweep {
    Assignment(AssignmentService),
    Liveness(LivenessService),
    /// Compensating pass that re-derives agent loads from active sessions
    Reconciliation(AssignmentService),
}

impl Sweep {
    pub fn name(&self) -> &'static str {
        match self {
            Sweep::Assignment(_) => "assignment_sweep",
            Sweep::Liveness(_) => "liveness_sweep",
            Sweep::Reconciliation(_) => "reconciliation_sweep",
        }
    }

    pub async fn run_once(&self) -> DomainResult<()> {
        match self {
            Sweep::Assignment(service) => service.assign_pending().await.map(|_| ()),
            Sweep::Liveness(service) => service.monitor_polling().await.map(|_| ()),
            Sweep::Reconciliation(service) => {
                let corrected = service.reconcile_agent_loads().await?;
                if corrected > 0 {
                    info!("Reconciled load for {} agents", corrected);
                }
                Ok(())
            }
        }
    }
}

/// Runs a sweep on a fixed interval until the process exits
pub struct SweepWorker {
    sweep: Sweep,
    interval: Duration,
    time_service: Arc<dyn TimeService>,
}

impl SweepWorker {
    pub fn new(sweep: Sweep, interval: Duration, time_service: Arc<dyn TimeService>) -> Self {
        Self {
            sweep,
            interval,
            time_service,
        }
    }

    /// Run a single pass, logging instead of propagating failures. Returns whether it succeeded.
    pub async fn tick(&self) -> bool {
        match self.sweep.run_once().await {
            Ok(()) => true,
            Err(e) => {
                error!("{} failed: {}", self.sweep.name(), e);
                false
            }
        }
    }

    pub async fn run(&self) {
        info!(
            "Starting {} every {:?}",
            self.sweep.name(),
            self.interval
        );
        loop {
            // Store errors are retried on the next tick; the sweep itself never retries
            self.tick().await;
            self.time_service.sleep(self.interval).await;
        }
    }

    pub fn start(self, spawner: &dyn TaskSpawner) {
        let name = self.sweep.name();
        spawner.spawn(name, Box::pin(async move { self.run().await }));
    }
}
