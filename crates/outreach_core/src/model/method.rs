//! Communication method domain model.
//!
//! # Responsibility
//! - Define one escalation step configured for a company.
//! - Provide the predefined method set offered to operators.
//!
//! # Invariants
//! - `sequence` lies in `MIN_SEQUENCE..=MAX_SEQUENCE`.
//! - `sequence` is unique per company. Storage enforces this; a single record
//!   cannot.
//! - `name` is not blank.

use crate::model::company::CompanyId;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a communication method.
pub type MethodId = Uuid;

pub const MIN_SEQUENCE: u8 = 1;
pub const MAX_SEQUENCE: u8 = 5;

/// Predefined escalation ladder, in sequence order, with mandatory flags.
pub const PREDEFINED_METHODS: [(&str, bool); 5] = [
    ("LinkedIn Post", true),
    ("LinkedIn Message", true),
    ("Email", true),
    ("Phone Call", true),
    ("Other", false),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MethodValidationError {
    NilId,
    NilCompany,
    BlankName,
    SequenceOutOfRange(u8),
}

impl Display for MethodValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "method id must not be nil"),
            Self::NilCompany => write!(f, "method company id must not be nil"),
            Self::BlankName => write!(f, "method name must not be blank"),
            Self::SequenceOutOfRange(sequence) => write!(
                f,
                "sequence {sequence} is outside {MIN_SEQUENCE}..={MAX_SEQUENCE}"
            ),
        }
    }
}

impl Error for MethodValidationError {}

/// One configured communication method for a company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommunicationMethod {
    pub id: MethodId,
    pub company_id: CompanyId,
    /// Escalation rank; lower runs first.
    pub sequence: u8,
    /// Mandatory steps gate the cadence; the rest are informational.
    pub mandatory: bool,
    pub name: String,
    pub description: String,
}

impl CommunicationMethod {
    pub fn new(
        company_id: CompanyId,
        sequence: u8,
        name: impl Into<String>,
        mandatory: bool,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            company_id,
            sequence,
            mandatory,
            name: name.into(),
            description: String::new(),
        }
    }

    /// Checks record-local invariants. Sequence uniqueness is a catalog rule.
    pub fn validate(&self) -> Result<(), MethodValidationError> {
        if self.id.is_nil() {
            return Err(MethodValidationError::NilId);
        }
        if self.company_id.is_nil() {
            return Err(MethodValidationError::NilCompany);
        }
        if self.name.trim().is_empty() {
            return Err(MethodValidationError::BlankName);
        }
        if !(MIN_SEQUENCE..=MAX_SEQUENCE).contains(&self.sequence) {
            return Err(MethodValidationError::SequenceOutOfRange(self.sequence));
        }
        Ok(())
    }
}

/// Builds the predefined method ladder for one company.
pub fn predefined_methods(company_id: CompanyId) -> Vec<CommunicationMethod> {
    PREDEFINED_METHODS
        .iter()
        .zip(MIN_SEQUENCE..=MAX_SEQUENCE)
        .map(|((name, mandatory), sequence)| {
            CommunicationMethod::new(company_id, sequence, *name, *mandatory)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{predefined_methods, CommunicationMethod, MethodValidationError};
    use uuid::Uuid;

    #[test]
    fn validate_rejects_sequence_outside_range() {
        let company_id = Uuid::new_v4();
        for sequence in [0_u8, 6] {
            let method = CommunicationMethod::new(company_id, sequence, "Email", true);
            assert_eq!(
                method.validate(),
                Err(MethodValidationError::SequenceOutOfRange(sequence))
            );
        }
    }

    #[test]
    fn predefined_methods_follow_escalation_order() {
        let company_id = Uuid::new_v4();
        let methods = predefined_methods(company_id);
        let ranks: Vec<u8> = methods.iter().map(|m| m.sequence).collect();
        assert_eq!(ranks, vec![1, 2, 3, 4, 5]);
        assert_eq!(methods[0].name, "LinkedIn Post");
        assert!(!methods[4].mandatory);
        assert!(methods.iter().all(|m| m.validate().is_ok()));
    }
}
