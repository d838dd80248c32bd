//! Shutdown coordination for the manager.

use std::future::Future;
use std::sync::atomic::{AtomicU8, Ordering};

use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

use crate::services::ServiceSupervisor;

/// Shutdown progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ShutdownPhase {
    Running = 0,
    ShuttingDown = 1,
    ShutDown = 2,
}

/// Process-wide shutdown flag with an atomic check-and-set transition.
#[derive(Debug, Default)]
pub struct ShutdownState {
    phase: AtomicU8,
}

impl ShutdownState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> ShutdownPhase {
        match self.phase.load(Ordering::Acquire) {
            0 => ShutdownPhase::Running,
            1 => ShutdownPhase::ShuttingDown,
            _ => ShutdownPhase::ShutDown,
        }
    }

    /// Move from `Running` to `ShuttingDown`. Only one caller ever wins.
    pub fn try_begin(&self) -> bool {
        self.phase
            .compare_exchange(
                ShutdownPhase::Running as u8,
                ShutdownPhase::ShuttingDown as u8,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_ok()
    }

    pub fn finish(&self) {
        self.phase.store(ShutdownPhase::ShutDown as u8, Ordering::Release);
    }
}

/// Cancellation signal shared by every shutdown trigger.
///
/// Cloning is cheap; all clones observe the same trigger.
#[derive(Debug, Clone, Default)]
pub struct Shutdown {
    token: CancellationToken,
}

impl Shutdown {
    /// Create a new shutdown signal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Trigger the shutdown signal.
    pub fn trigger(&self) {
        self.token.cancel();
    }

    pub fn is_triggered(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Wait until the signal has been triggered.
    pub async fn triggered(&self) {
        self.token.cancelled().await;
    }
}

/// Runs the stop sequence exactly once, however many triggers arrive.
pub struct ShutdownCoordinator {
    signal: Shutdown,
    state: ShutdownState,
    supervisor: Mutex<ServiceSupervisor>,
}

impl ShutdownCoordinator {
    pub fn new(supervisor: ServiceSupervisor) -> Self {
        Self {
            signal: Shutdown::new(),
            state: ShutdownState::new(),
            supervisor: Mutex::new(supervisor),
        }
    }

    /// Handle for triggering shutdown from elsewhere (signals, tests).
    pub fn signal(&self) -> Shutdown {
        self.signal.clone()
    }

    pub fn phase(&self) -> ShutdownPhase {
        self.state.phase()
    }

    pub fn supervisor(&self) -> &Mutex<ServiceSupervisor> {
        &self.supervisor
    }

    /// Run `stop` if no other invocation has started shutdown yet.
    ///
    /// Returns `true` for the invocation that performed the stop.
    pub async fn run_once<F, Fut>(&self, stop: F) -> bool
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = ()>,
    {
        if !self.state.try_begin() {
            tracing::debug!("Shutdown already in progress");
            return false;
        }
        self.signal.trigger();

        stop().await;

        self.state.finish();
        tracing::info!("Server stopped");
        true
    }

    /// Stop both services, once.
    pub async fn shutdown(&self) -> bool {
        self.run_once(|| async {
            self.supervisor.lock().await.stop_all().await;
        })
        .await
    }

    /// Idle until a shutdown trigger arrives, then run the stop sequence.
    pub async fn wait(&self) -> bool {
        self.signal.triggered().await;
        tracing::info!("Shutdown signal received");
        self.shutdown().await
    }
}
