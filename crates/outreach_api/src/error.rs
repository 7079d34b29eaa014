use outreach_core::db::DbError;
use outreach_core::repo::RepoError;
use outreach_core::ServiceError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ApiResult<T> = Result<T, ApiError>;

/// Error returned by every API call.
#[derive(Debug)]
pub enum ApiError {
    /// The database could not be opened or migrated.
    Db(DbError),
    Service(ServiceError),
    /// Caller input could not be parsed (ids, dates, levels).
    InvalidInput(String),
    Serialization(serde_json::Error),
    Logging(String),
}

impl ApiError {
    /// Stable machine-readable code for callers that branch on failures.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Db(_) => "db_error",
            Self::Service(ServiceError::NotFound { .. }) => "not_found",
            Self::Service(
                ServiceError::InvalidConfiguration(_)
                | ServiceError::MethodCompanyMismatch { .. }
                | ServiceError::MethodOwnerChanged(_),
            ) => "invalid_configuration",
            Self::Service(ServiceError::Validation(_)) => "invalid_input",
            Self::Service(ServiceError::Repo(RepoError::Conflict(_))) => "conflict",
            Self::Service(ServiceError::Repo(RepoError::InvalidData(_))) => "invalid_data",
            Self::Service(ServiceError::Repo(_)) => "db_error",
            Self::InvalidInput(_) => "invalid_input",
            Self::Serialization(_) => "serialization_error",
            Self::Logging(_) => "logging_error",
        }
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "database unavailable: {err}"),
            Self::Service(err) => write!(f, "{err}"),
            Self::InvalidInput(message) => write!(f, "invalid input: {message}"),
            Self::Serialization(err) => write!(f, "serialization failed: {err}"),
            Self::Logging(message) => write!(f, "logging setup failed: {message}"),
        }
    }
}

impl Error for ApiError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Service(err) => Some(err),
            Self::Serialization(err) => Some(err),
            Self::InvalidInput(_) | Self::Logging(_) => None,
        }
    }
}

impl From<DbError> for ApiError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<ServiceError> for ApiError {
    fn from(value: ServiceError) -> Self {
        Self::Service(value)
    }
}

impl From<RepoError> for ApiError {
    fn from(value: RepoError) -> Self {
        Self::Service(value.into())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization(value)
    }
}
