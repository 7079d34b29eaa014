//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Enforce cross-record rules that a single repository cannot see
//!   (sequence uniqueness, method ownership).
//! - Feed the cadence engine and isolate per-company failures.
//!
//! # Invariants
//! - Unknown ids surface as `NotFound`, never as empty results.
//! - Configuration violations surface as `InvalidConfiguration` and are not
//!   retryable. Ownership violations on writes have their own variants.
//! - Only a busy or locked database is retryable.

use crate::cadence::{CadenceError, ConfigurationIssue};
use crate::db::DbError;
use crate::model::communication::CommunicationValidationError;
use crate::model::company::{CompanyId, CompanyValidationError};
use crate::model::method::{MethodId, MethodValidationError};
use crate::model::ValidationError;
use crate::repo::RepoError;
use rusqlite::ErrorCode;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub mod communication_service;
pub mod company_service;
pub mod dashboard_service;
pub mod method_service;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Errors returned by every use-case service.
#[derive(Debug)]
pub enum ServiceError {
    NotFound { entity: &'static str, id: Uuid },
    InvalidConfiguration(ConfigurationIssue),
    /// A communication references a method owned by a different company.
    MethodCompanyMismatch {
        method_id: MethodId,
        company_id: CompanyId,
    },
    /// An edit tried to move a method to a different company.
    MethodOwnerChanged(MethodId),
    Validation(ValidationError),
    Repo(RepoError),
}

impl ServiceError {
    pub(crate) fn not_found(entity: &'static str, id: Uuid) -> Self {
        Self::NotFound { entity, id }
    }

    /// Whether repeating the same call could succeed without changing input.
    pub fn is_retryable(&self) -> bool {
        let Self::Repo(RepoError::Db(DbError::Sqlite(err))) = self else {
            return false;
        };
        matches!(
            err.sqlite_error_code(),
            Some(ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked)
        )
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::InvalidConfiguration(issue) => write!(f, "invalid configuration: {issue}"),
            Self::MethodCompanyMismatch {
                method_id,
                company_id,
            } => write!(
                f,
                "method {method_id} is not configured for company {company_id}"
            ),
            Self::MethodOwnerChanged(id) => {
                write!(f, "method {id} cannot be moved to another company")
            }
            Self::Validation(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound { entity, id } => Self::NotFound { entity, id },
            RepoError::Validation(err) => Self::Validation(err),
            other => Self::Repo(other),
        }
    }
}

impl From<CadenceError> for ServiceError {
    fn from(value: CadenceError) -> Self {
        match value {
            CadenceError::InvalidConfiguration { issue, .. } => Self::InvalidConfiguration(issue),
        }
    }
}

impl From<CompanyValidationError> for ServiceError {
    fn from(value: CompanyValidationError) -> Self {
        Self::Validation(value.into())
    }
}

impl From<MethodValidationError> for ServiceError {
    fn from(value: MethodValidationError) -> Self {
        Self::Validation(value.into())
    }
}

impl From<CommunicationValidationError> for ServiceError {
    fn from(value: CommunicationValidationError) -> Self {
        Self::Validation(value.into())
    }
}
