//! Core domain logic for outreach cadence tracking.
//! This crate is the single source of truth for registry, catalog and
//! communication-log invariants, and for the cadence derivation.

pub mod cadence;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use cadence::{
    compute_status, CadenceError, CommunicationSummary, CompanyCommunicationStatus,
    ConfigurationIssue, ScheduledCommunication,
};
pub use config::CoreConfig;
pub use logging::{default_log_level, init_logging, logging_status, LogLevel};
pub use model::communication::{CommunicationDraft, CommunicationEvent, CommunicationId};
pub use model::company::{Company, CompanyId};
pub use model::method::{CommunicationMethod, MethodId};
pub use model::ValidationError;
pub use repo::communication_repo::{CommunicationRepository, SqliteCommunicationRepository};
pub use repo::company_repo::{CompanyHeader, CompanyRepository, SqliteCompanyRepository};
pub use repo::method_repo::{MethodRepository, SqliteMethodRepository};
pub use repo::{RepoError, RepoResult};
pub use service::communication_service::CommunicationService;
pub use service::company_service::CompanyService;
pub use service::dashboard_service::{DashboardFailure, DashboardReport, DashboardService};
pub use service::method_service::MethodService;
pub use service::{ServiceError, ServiceResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
