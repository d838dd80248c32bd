//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load options → Validate server dir → Load DB options → Access gate
//!         → Start data API → Start web panel
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Shutdown::trigger
//!
//! Shutdown (shutdown.rs):
//!     Shutdown triggered → ShutdownCoordinator (once) → stop both services
//! ```
//!
//! # Design Decisions
//! - Ordered startup: nothing binds until the access gate allows it
//! - Every startup failure is fatal with a single exit code
//! - Every shutdown trigger feeds one cancellation signal, consumed once

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::{Shutdown, ShutdownCoordinator, ShutdownPhase, ShutdownState};
pub use startup::Bootstrapper;
