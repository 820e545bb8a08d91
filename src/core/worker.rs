//! Lifecycle of the background worker.
//!
//! The worker exists so the app qualifies as installable. It never handles
//! fetches; it only moves itself from installing to active as fast as the
//! platform allows.

use crate::error::WorkerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WorkerPhase {
    #[default]
    Installing,
    Active,
}

/// The worker's view of its global scope.
pub trait WorkerScope {
    /// Ask to activate without waiting for existing pages to close.
    fn skip_waiting(&self) -> Result<(), WorkerError>;

    /// Take control of already open pages without a reload.
    fn claim_clients(&self) -> Result<(), WorkerError>;
}

#[derive(Debug, Default)]
pub struct WorkerLifecycle {
    phase: WorkerPhase,
}

impl WorkerLifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> WorkerPhase {
        self.phase
    }

    /// Install hook. Skip-waiting is requested before this returns.
    pub fn on_install<W: WorkerScope>(&mut self, scope: &W) -> Result<(), WorkerError> {
        tracing::info!("worker installed");
        scope.skip_waiting()
    }

    /// Activate hook. Claims open pages immediately.
    pub fn on_activate<W: WorkerScope>(&mut self, scope: &W) -> Result<(), WorkerError> {
        self.phase = WorkerPhase::Active;
        tracing::info!("worker activated");
        scope.claim_clients()
    }
}
