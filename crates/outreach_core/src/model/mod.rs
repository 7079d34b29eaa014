//! Domain model for outreach tracking.
//!
//! # Responsibility
//! - Define the canonical records stored by the registry, catalog and log.
//! - Own write-time validation rules for each record.
//!
//! # Invariants
//! - Every record is identified by a stable, non-nil UUID.
//! - Records referencing a company do so by id only.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod communication;
pub mod company;
pub mod method;

use communication::CommunicationValidationError;
use company::CompanyValidationError;
use method::MethodValidationError;

/// Validation failure for any record accepted by the storage layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Company(CompanyValidationError),
    Method(MethodValidationError),
    Communication(CommunicationValidationError),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Company(err) => write!(f, "{err}"),
            Self::Method(err) => write!(f, "{err}"),
            Self::Communication(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ValidationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Company(err) => Some(err),
            Self::Method(err) => Some(err),
            Self::Communication(err) => Some(err),
        }
    }
}

impl From<CompanyValidationError> for ValidationError {
    fn from(value: CompanyValidationError) -> Self {
        Self::Company(value)
    }
}

impl From<MethodValidationError> for ValidationError {
    fn from(value: MethodValidationError) -> Self {
        Self::Method(value)
    }
}

impl From<CommunicationValidationError> for ValidationError {
    fn from(value: CommunicationValidationError) -> Self {
        Self::Communication(value)
    }
}
