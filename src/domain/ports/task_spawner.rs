use futures::future::BoxFuture;

/// Runs background sweeps without tying the services to a specific runtime
pub trait TaskSpawner: Send + Sync {
    /// Spawn a detached task; `name` is only used for logging
    fn spawn(&self, name: &'static str, future: BoxFuture<'static, ()>);
}
