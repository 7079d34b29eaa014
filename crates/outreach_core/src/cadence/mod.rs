//! Communication cadence engine.
//!
//! # Responsibility
//! - Derive, per company, the recent-history view and the next-due
//!   communication from configured methods, periodicity and the log.
//!
//! # Invariants
//! - Derivation is a pure function of its inputs plus the caller-supplied
//!   `today`. Nothing is cached or persisted.
//! - Output ordering is deterministic for identical inputs.
//! - A call either returns a complete status or fails outright.

mod engine;
mod error;
mod status;

pub use engine::{compute_status, order_history, HISTORY_LIMIT};
pub use error::{CadenceError, ConfigurationIssue};
pub use status::{CommunicationSummary, CompanyCommunicationStatus, ScheduledCommunication};
