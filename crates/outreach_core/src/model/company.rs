//! Company domain model.
//!
//! # Responsibility
//! - Define the company record held by the registry.
//! - Validate contact fields and the communication periodicity.
//!
//! # Invariants
//! - `id` is stable and never nil.
//! - `name` is not blank.
//! - `periodicity_days` is at least 1.
//! - Every entry in `emails` looks like `local@domain.tld`.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a company record.
pub type CompanyId = Uuid;

/// Smallest accepted gap between required communications.
pub const MIN_PERIODICITY_DAYS: u32 = 1;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"));
static CONTACT_SEPARATOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[,;\n\r]+").expect("valid contact separator regex"));

/// Validation failures for company records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompanyValidationError {
    NilId,
    BlankName,
    ZeroPeriodicity,
    InvalidEmail(String),
}

impl Display for CompanyValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "company id must not be nil"),
            Self::BlankName => write!(f, "company name must not be blank"),
            Self::ZeroPeriodicity => write!(
                f,
                "periodicity_days must be >= {MIN_PERIODICITY_DAYS}"
            ),
            Self::InvalidEmail(value) => write!(f, "invalid email address `{value}`"),
        }
    }
}

impl Error for CompanyValidationError {}

/// Company tracked by the outreach dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CompanyWire")]
pub struct Company {
    pub id: CompanyId,
    pub name: String,
    pub location: String,
    /// LinkedIn profile URL or handle, free form.
    pub linkedin: String,
    pub emails: Vec<String>,
    pub phone_numbers: Vec<String>,
    pub comments: String,
    /// Minimum number of days between consecutive required communications.
    pub periodicity_days: u32,
}

#[derive(Deserialize)]
struct CompanyWire {
    id: CompanyId,
    name: String,
    #[serde(default)]
    location: String,
    #[serde(default)]
    linkedin: String,
    #[serde(default)]
    emails: Vec<String>,
    #[serde(default)]
    phone_numbers: Vec<String>,
    #[serde(default)]
    comments: String,
    periodicity_days: u32,
}

impl TryFrom<CompanyWire> for Company {
    type Error = CompanyValidationError;

    fn try_from(wire: CompanyWire) -> Result<Self, Self::Error> {
        let company = Self {
            id: wire.id,
            name: wire.name,
            location: wire.location,
            linkedin: wire.linkedin,
            emails: wire.emails,
            phone_numbers: wire.phone_numbers,
            comments: wire.comments,
            periodicity_days: wire.periodicity_days,
        };
        company.validate()?;
        Ok(company)
    }
}

impl Company {
    /// Creates a company with a generated id and empty contact fields.
    pub fn new(name: impl Into<String>, periodicity_days: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            location: String::new(),
            linkedin: String::new(),
            emails: Vec::new(),
            phone_numbers: Vec::new(),
            comments: String::new(),
            periodicity_days,
        }
    }

    /// Creates a company with a caller-provided id.
    ///
    /// Used by import paths where identity already exists externally.
    pub fn with_id(
        id: CompanyId,
        name: impl Into<String>,
        periodicity_days: u32,
    ) -> Result<Self, CompanyValidationError> {
        if id.is_nil() {
            return Err(CompanyValidationError::NilId);
        }
        let mut company = Self::new(name, periodicity_days);
        company.id = id;
        Ok(company)
    }

    /// Checks every write-time invariant of the record.
    pub fn validate(&self) -> Result<(), CompanyValidationError> {
        if self.id.is_nil() {
            return Err(CompanyValidationError::NilId);
        }
        if self.name.trim().is_empty() {
            return Err(CompanyValidationError::BlankName);
        }
        if self.periodicity_days < MIN_PERIODICITY_DAYS {
            return Err(CompanyValidationError::ZeroPeriodicity);
        }
        if let Some(bad) = self.emails.iter().find(|email| !EMAIL_RE.is_match(email)) {
            return Err(CompanyValidationError::InvalidEmail(bad.clone()));
        }
        Ok(())
    }
}

/// Splits a free-form contact list (`a@x.io, b@y.io; ...`) into trimmed entries.
///
/// Commas, semicolons and line breaks separate entries; blanks are dropped.
pub fn parse_contact_list(raw: &str) -> Vec<String> {
    CONTACT_SEPARATOR_RE
        .split(raw)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .collect()
}
