//! Derived dashboard view types.
//!
//! Field names serialize to the dashboard wire contract:
//! `companyName`, `lastFiveCommunications`, `nextScheduledCommunication`,
//! each communication as `{ "type", "date" }` with ISO dates.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One history entry on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommunicationSummary {
    #[serde(rename = "type")]
    pub method_name: String,
    pub date: NaiveDate,
}

/// The next communication a company is due for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledCommunication {
    #[serde(rename = "type")]
    pub method_name: String,
    #[serde(rename = "date")]
    pub due_date: NaiveDate,
}

/// Per-company cadence result. Recomputed on every read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyCommunicationStatus {
    pub company_name: String,
    /// Most recent first, at most `HISTORY_LIMIT` entries.
    pub last_five_communications: Vec<CommunicationSummary>,
    /// `None` when the company has no configured methods.
    pub next_scheduled_communication: Option<ScheduledCommunication>,
}
