//! Plain-text rendering for terminal output.

use chrono::NaiveDate;
use outreach_api::{classify_due, DueState};
use outreach_core::{
    CommunicationEvent, CommunicationMethod, Company, CompanyCommunicationStatus, DashboardReport,
};

const NAME_WIDTH: usize = 24;
const HISTORY_PREVIEW: usize = 3;

pub fn dashboard(report: &DashboardReport, today: NaiveDate) -> String {
    let mut out = String::new();
    if report.statuses.is_empty() && report.failures.is_empty() {
        out.push_str("No companies registered.\n");
        return out;
    }

    out.push_str(&format!(
        "{:<2} {:<NAME_WIDTH$} {:<20} {:<10} {}\n",
        "", "COMPANY", "NEXT", "DUE", "RECENT"
    ));
    for status in &report.statuses {
        out.push_str(&status_row(status, today));
        out.push('\n');
    }
    for failure in &report.failures {
        out.push_str(&format!(
            "{:<2} {:<NAME_WIDTH$} error: {}\n",
            "x",
            truncate(&failure.company_name, NAME_WIDTH),
            failure.message
        ));
    }
    out
}

fn status_row(status: &CompanyCommunicationStatus, today: NaiveDate) -> String {
    let (marker, next, due) = match &status.next_scheduled_communication {
        Some(scheduled) => (
            urgency_marker(classify_due(scheduled.due_date, today)),
            scheduled.method_name.clone(),
            scheduled.due_date.to_string(),
        ),
        None => (" ", "-".to_string(), "-".to_string()),
    };
    let recent = status
        .last_five_communications
        .iter()
        .take(HISTORY_PREVIEW)
        .map(|entry| format!("{} {}", entry.method_name, entry.date))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "{:<2} {:<NAME_WIDTH$} {:<20} {:<10} {}",
        marker,
        truncate(&status.company_name, NAME_WIDTH),
        truncate(&next, 20),
        due,
        if recent.is_empty() { "-" } else { &recent }
    )
}

fn urgency_marker(state: DueState) -> &'static str {
    match state {
        DueState::Overdue => "!",
        DueState::DueToday => "*",
        DueState::Upcoming => " ",
    }
}

pub fn companies(companies: &[Company]) -> String {
    companies
        .iter()
        .map(|company| {
            format!(
                "{}  {:<NAME_WIDTH$} every {} day(s)",
                company.id,
                truncate(&company.name, NAME_WIDTH),
                company.periodicity_days
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn methods(methods: &[CommunicationMethod]) -> String {
    methods
        .iter()
        .map(|method| {
            format!(
                "{}  {}. {}{}",
                method.id,
                method.sequence,
                method.name,
                if method.mandatory { " (mandatory)" } else { "" }
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn communications(events: &[CommunicationEvent]) -> String {
    events
        .iter()
        .map(|event| {
            let mut line = format!("{}  {}  {}", event.id, event.date, event.method_name);
            if let Some(notes) = &event.notes {
                line.push_str(&format!("  ({notes})"));
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn truncate(value: &str, max_chars: usize) -> String {
    if value.chars().count() <= max_chars {
        return value.to_string();
    }
    let mut shortened: String = value.chars().take(max_chars.saturating_sub(1)).collect();
    shortened.push('~');
    shortened
}
