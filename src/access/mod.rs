//! Remote entitlement check.
//!
//! # Data Flow
//! ```text
//! ProcessOptions + DatabaseConfig
//!     → AccessRequest (serviceDir, dayzDir, dbPort, webPort)
//!     → POST <gate>/access/check
//!     → AccessDecision::Allow | AccessDecision::Deny
//! ```
//!
//! # Design Decisions
//! - Fails closed: transport errors, timeouts and unexpected bodies all deny
//! - Single attempt, no retry
//! - Gate address is fixed at build time

pub mod gate;

pub use gate::{default_gate_address, AccessDecision, AccessGate, AccessRequest};
