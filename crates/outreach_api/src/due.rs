//! Urgency classification for scheduled communications.

use chrono::NaiveDate;
use serde::Serialize;

/// How a due date relates to the viewing day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DueState {
    Overdue,
    DueToday,
    Upcoming,
}

impl DueState {
    pub fn label(self) -> &'static str {
        match self {
            Self::Overdue => "overdue",
            Self::DueToday => "due today",
            Self::Upcoming => "upcoming",
        }
    }
}

/// Classifies `due` against `today`.
pub fn classify_due(due: NaiveDate, today: NaiveDate) -> DueState {
    match due.cmp(&today) {
        std::cmp::Ordering::Less => DueState::Overdue,
        std::cmp::Ordering::Equal => DueState::DueToday,
        std::cmp::Ordering::Greater => DueState::Upcoming,
    }
}

#[cfg(test)]
mod tests {
    use super::{classify_due, DueState};
    use chrono::NaiveDate;

    #[test]
    fn classify_due_compares_against_today() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        let yesterday = NaiveDate::from_ymd_opt(2024, 6, 9).unwrap();
        let tomorrow = NaiveDate::from_ymd_opt(2024, 6, 11).unwrap();

        assert_eq!(classify_due(yesterday, today), DueState::Overdue);
        assert_eq!(classify_due(today, today), DueState::DueToday);
        assert_eq!(classify_due(tomorrow, today), DueState::Upcoming);
        assert_eq!(DueState::DueToday.label(), "due today");
    }
}
