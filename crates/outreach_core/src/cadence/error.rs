use crate::model::communication::CommunicationId;
use crate::model::company::CompanyId;
use crate::model::method::MethodId;
use chrono::NaiveDate;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Why a company's configuration cannot drive the cadence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationIssue {
    /// Two methods of one company share an escalation rank.
    DuplicateSequence {
        sequence: u8,
        existing: MethodId,
        conflicting: MethodId,
    },
    /// A method handed to the engine belongs to another company.
    ForeignMethod(MethodId),
    /// A logged communication handed to the engine belongs to another company.
    ForeignCommunication(CommunicationId),
    ZeroPeriodicity,
    /// `reference_date + periodicity_days` is not a representable date.
    DueDateOverflow {
        reference_date: NaiveDate,
        periodicity_days: u32,
    },
}

impl Display for ConfigurationIssue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateSequence {
                sequence,
                existing,
                conflicting,
            } => write!(
                f,
                "sequence {sequence} is used by both method {existing} and method {conflicting}"
            ),
            Self::ForeignMethod(id) => write!(f, "method {id} belongs to another company"),
            Self::ForeignCommunication(id) => {
                write!(f, "communication {id} belongs to another company")
            }
            Self::ZeroPeriodicity => write!(f, "periodicity must be at least one day"),
            Self::DueDateOverflow {
                reference_date,
                periodicity_days,
            } => write!(
                f,
                "due date overflows calendar: {reference_date} + {periodicity_days} days"
            ),
        }
    }
}

/// Failure of a single cadence derivation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CadenceError {
    /// Non-retryable: the inputs violate a catalog or registry invariant.
    InvalidConfiguration {
        company_id: CompanyId,
        issue: ConfigurationIssue,
    },
}

impl CadenceError {
    pub fn issue(&self) -> &ConfigurationIssue {
        match self {
            Self::InvalidConfiguration { issue, .. } => issue,
        }
    }
}

impl Display for CadenceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidConfiguration { company_id, issue } => write!(
                f,
                "invalid communication configuration for company {company_id}: {issue}"
            ),
        }
    }
}

impl Error for CadenceError {}
