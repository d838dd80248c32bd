//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems emit tracing events
//!     → logging.rs
//!         → console (LEVEL - message)
//!         → logs/<YYYY-MM-DD>.log next to the executable
//! ```
//!
//! # Design Decisions
//! - `--nologs` installs no subscriber at all
//! - Logging setup never fails startup; a missing log file degrades to console only

pub mod logging;
