//! Communication log domain model.
//!
//! # Responsibility
//! - Define the write shape (`CommunicationDraft`) and the read shape
//!   (`CommunicationEvent`) of a completed communication.
//!
//! # Invariants
//! - `insertion_seq` is assigned by storage and strictly increases with
//!   insertion order. It is the tie-break between events on the same date.
//! - An event references exactly one method of its own company.

use crate::model::company::CompanyId;
use crate::model::method::MethodId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a logged communication.
pub type CommunicationId = Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommunicationValidationError {
    NilId,
    NilCompany,
    NilMethod,
}

impl Display for CommunicationValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "communication id must not be nil"),
            Self::NilCompany => write!(f, "communication company id must not be nil"),
            Self::NilMethod => write!(f, "communication method id must not be nil"),
        }
    }
}

impl Error for CommunicationValidationError {}

/// Operator input for logging or editing a completed communication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommunicationDraft {
    pub id: CommunicationId,
    pub company_id: CompanyId,
    pub method_id: MethodId,
    /// Calendar date the communication happened.
    pub date: NaiveDate,
    pub notes: Option<String>,
}

impl CommunicationDraft {
    pub fn new(company_id: CompanyId, method_id: MethodId, date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            company_id,
            method_id,
            date,
            notes: None,
        }
    }

    pub fn validate(&self) -> Result<(), CommunicationValidationError> {
        if self.id.is_nil() {
            return Err(CommunicationValidationError::NilId);
        }
        if self.company_id.is_nil() {
            return Err(CommunicationValidationError::NilCompany);
        }
        if self.method_id.is_nil() {
            return Err(CommunicationValidationError::NilMethod);
        }
        Ok(())
    }
}

/// Logged communication as read back from storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommunicationEvent {
    pub id: CommunicationId,
    pub company_id: CompanyId,
    pub method_id: MethodId,
    /// Method name resolved from the catalog at read time.
    pub method_name: String,
    pub date: NaiveDate,
    pub notes: Option<String>,
    /// Storage-assigned insertion rank.
    pub insertion_seq: i64,
}

impl CommunicationEvent {
    /// Returns the editable part of this event.
    pub fn to_draft(&self) -> CommunicationDraft {
        CommunicationDraft {
            id: self.id,
            company_id: self.company_id,
            method_id: self.method_id,
            date: self.date,
            notes: self.notes.clone(),
        }
    }
}
