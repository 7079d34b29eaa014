//! History selection and next-due derivation.
//!
//! # Invariants
//! - History is ordered by `date DESC, insertion_seq DESC`.
//! - The next method is the lowest-sequence mandatory method not yet
//!   performed on or after the reference date. When all mandatory methods are
//!   satisfied the ladder restarts at the lowest mandatory rank. Without any
//!   mandatory method the lowest rank wins.
//! - Due date is `reference_date + periodicity_days`, or `today` when the
//!   company has no logged communication.

use super::error::{CadenceError, ConfigurationIssue};
use super::status::{CommunicationSummary, CompanyCommunicationStatus, ScheduledCommunication};
use crate::model::communication::CommunicationEvent;
use crate::model::company::Company;
use crate::model::method::{CommunicationMethod, MethodId};
use chrono::{Days, NaiveDate};
use std::collections::{BTreeMap, HashSet};

/// Number of history entries surfaced per company.
pub const HISTORY_LIMIT: usize = 5;

/// Computes the dashboard status for one company.
///
/// `methods` and `events` must all belong to `company`; order does not matter.
///
/// # Errors
/// - `InvalidConfiguration` when two methods share a sequence, when any input
///   belongs to another company, when periodicity is zero, or when the due date
///   cannot be represented.
pub fn compute_status(
    company: &Company,
    methods: &[CommunicationMethod],
    events: &[CommunicationEvent],
    today: NaiveDate,
) -> Result<CompanyCommunicationStatus, CadenceError> {
    let invalid = |issue| CadenceError::InvalidConfiguration {
        company_id: company.id,
        issue,
    };

    if company.periodicity_days == 0 {
        return Err(invalid(ConfigurationIssue::ZeroPeriodicity));
    }
    if let Some(foreign) = events.iter().find(|event| event.company_id != company.id) {
        return Err(invalid(ConfigurationIssue::ForeignCommunication(foreign.id)));
    }
    let ladder = escalation_ladder(company, methods).map_err(invalid)?;

    let history = order_history(events);
    let last_five_communications = history
        .iter()
        .take(HISTORY_LIMIT)
        .map(|event| CommunicationSummary {
            method_name: event.method_name.clone(),
            date: event.date,
        })
        .collect();

    let reference_date = history.first().map(|event| event.date);
    let next_scheduled_communication = match select_next_method(&ladder, events, reference_date)
    {
        None => None,
        Some(method) => Some(ScheduledCommunication {
            method_name: method.name.clone(),
            due_date: due_date(company, reference_date, today).map_err(invalid)?,
        }),
    };

    Ok(CompanyCommunicationStatus {
        company_name: company.name.clone(),
        last_five_communications,
        next_scheduled_communication,
    })
}

/// Orders events most recent first; equal dates put the later insertion first.
///
/// Events with equal date and equal `insertion_seq` fall back to id order so
/// the result never depends on input order.
pub fn order_history(events: &[CommunicationEvent]) -> Vec<&CommunicationEvent> {
    let mut ordered: Vec<&CommunicationEvent> = events.iter().collect();
    ordered.sort_by(|a, b| {
        b.date
            .cmp(&a.date)
            .then_with(|| b.insertion_seq.cmp(&a.insertion_seq))
            .then_with(|| b.id.cmp(&a.id))
    });
    ordered
}

/// Sorts methods by sequence, rejecting foreign methods and rank collisions.
fn escalation_ladder<'m>(
    company: &Company,
    methods: &'m [CommunicationMethod],
) -> Result<Vec<&'m CommunicationMethod>, ConfigurationIssue> {
    let mut by_sequence: BTreeMap<u8, &CommunicationMethod> = BTreeMap::new();
    for method in methods {
        if method.company_id != company.id {
            return Err(ConfigurationIssue::ForeignMethod(method.id));
        }
        if let Some(existing) = by_sequence.insert(method.sequence, method) {
            return Err(ConfigurationIssue::DuplicateSequence {
                sequence: method.sequence,
                existing: existing.id,
                conflicting: method.id,
            });
        }
    }
    Ok(by_sequence.into_values().collect())
}

fn select_next_method<'m>(
    ladder: &[&'m CommunicationMethod],
    events: &[CommunicationEvent],
    reference_date: Option<NaiveDate>,
) -> Option<&'m CommunicationMethod> {
    let mut mandatory = ladder.iter().copied().filter(|method| method.mandatory);
    let Some(first_mandatory) = mandatory.next() else {
        return ladder.first().copied();
    };

    let satisfied: HashSet<MethodId> = match reference_date {
        Some(reference) => events
            .iter()
            .filter(|event| event.date >= reference)
            .map(|event| event.method_id)
            .collect(),
        None => HashSet::new(),
    };

    std::iter::once(first_mandatory)
        .chain(mandatory)
        .find(|method| !satisfied.contains(&method.id))
        .or(Some(first_mandatory))
}

fn due_date(
    company: &Company,
    reference_date: Option<NaiveDate>,
    today: NaiveDate,
) -> Result<NaiveDate, ConfigurationIssue> {
    let Some(reference_date) = reference_date else {
        return Ok(today);
    };
    reference_date
        .checked_add_days(Days::new(u64::from(company.periodicity_days)))
        .ok_or(ConfigurationIssue::DueDateOverflow {
            reference_date,
            periodicity_days: company.periodicity_days,
        })
}
