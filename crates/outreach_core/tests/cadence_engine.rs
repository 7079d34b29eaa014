use chrono::{Days, NaiveDate};
use outreach_core::cadence::HISTORY_LIMIT;
use outreach_core::{
    compute_status, CadenceError, CommunicationEvent, CommunicationMethod, Company,
    ConfigurationIssue,
};
use uuid::Uuid;

fn day(offset: u64) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .checked_add_days(Days::new(offset))
        .unwrap()
}

struct Log {
    events: Vec<CommunicationEvent>,
}

impl Log {
    fn new() -> Self {
        Self { events: Vec::new() }
    }

    fn record(&mut self, company: &Company, method: &CommunicationMethod, date: NaiveDate) -> Uuid {
        let event = CommunicationEvent {
            id: Uuid::new_v4(),
            company_id: company.id,
            method_id: method.id,
            method_name: method.name.clone(),
            date,
            notes: None,
            insertion_seq: self.events.len() as i64 + 1,
        };
        let id = event.id;
        self.events.push(event);
        id
    }
}

#[test]
fn history_length_is_capped_and_sorted_by_date() {
    let company = Company::new("Acme", 7);
    let email = CommunicationMethod::new(company.id, 1, "Email", true);

    for total in 1..=9_u64 {
        let mut log = Log::new();
        // Scrambled insertion order so sorting is actually exercised.
        for index in 0..total {
            log.record(&company, &email, day((index * 7) % 11));
        }

        let status = compute_status(
            &company,
            std::slice::from_ref(&email),
            &log.events,
            day(30),
        )
        .unwrap();
        let history = &status.last_five_communications;
        assert_eq!(history.len(), (total as usize).min(HISTORY_LIMIT));
        assert!(history.windows(2).all(|pair| pair[0].date >= pair[1].date));

        let newest = log.events.iter().map(|event| event.date).max().unwrap();
        assert_eq!(history[0].date, newest);
    }
}

#[test]
fn empty_history_is_due_today() {
    let company = Company::new("Acme", 7);
    let methods = vec![
        CommunicationMethod::new(company.id, 1, "LinkedIn Post", true),
        CommunicationMethod::new(company.id, 2, "Email", true),
    ];

    let status = compute_status(&company, &methods, &[], day(12)).unwrap();
    assert!(status.last_five_communications.is_empty());
    let next = status.next_scheduled_communication.unwrap();
    assert_eq!(next.due_date, day(12));
    assert_eq!(next.method_name, "LinkedIn Post");
}

#[test]
fn no_methods_means_nothing_scheduled_regardless_of_history() {
    let company = Company::new("Acme", 7);
    let retired = CommunicationMethod::new(company.id, 1, "Email", true);
    let mut log = Log::new();
    log.record(&company, &retired, day(1));
    log.record(&company, &retired, day(2));

    let with_history = compute_status(&company, &[], &log.events, day(3)).unwrap();
    assert!(with_history.next_scheduled_communication.is_none());
    assert_eq!(with_history.last_five_communications.len(), 2);

    let without_history = compute_status(&company, &[], &[], day(3)).unwrap();
    assert!(without_history.next_scheduled_communication.is_none());
}

#[test]
fn unsatisfied_lower_mandatory_rank_wins_over_higher_one() {
    let company = Company::new("Acme", 5);
    let post = CommunicationMethod::new(company.id, 1, "LinkedIn Post", false);
    let message = CommunicationMethod::new(company.id, 2, "LinkedIn Message", true);
    let email = CommunicationMethod::new(company.id, 3, "Email", false);
    let call = CommunicationMethod::new(company.id, 4, "Phone Call", true);
    let methods = vec![call.clone(), email.clone(), message.clone(), post.clone()];

    let mut log = Log::new();
    log.record(&company, &message, day(0));
    log.record(&company, &call, day(10));
    log.record(&company, &post, day(10));

    let status = compute_status(&company, &methods, &log.events, day(11)).unwrap();
    let next = status.next_scheduled_communication.unwrap();
    assert_eq!(next.method_name, "LinkedIn Message");
    assert_eq!(next.due_date, day(15));
}

#[test]
fn without_mandatory_methods_lowest_rank_is_scheduled() {
    let company = Company::new("Acme", 3);
    let methods = vec![
        CommunicationMethod::new(company.id, 4, "Other", false),
        CommunicationMethod::new(company.id, 2, "Email", false),
        CommunicationMethod::new(company.id, 5, "Phone Call", false),
    ];
    let mut log = Log::new();
    log.record(&company, &methods[1], day(4));

    let status = compute_status(&company, &methods, &log.events, day(4)).unwrap();
    let next = status.next_scheduled_communication.unwrap();
    assert_eq!(next.method_name, "Email");
    assert_eq!(next.due_date, day(7));
}

#[test]
fn derivation_is_idempotent() {
    let company = Company::new("Acme", 7);
    let email = CommunicationMethod::new(company.id, 1, "Email", true);
    let call = CommunicationMethod::new(company.id, 2, "Phone Call", true);
    let methods = vec![email.clone(), call.clone()];
    let mut log = Log::new();
    log.record(&company, &email, day(3));
    log.record(&company, &call, day(3));
    log.record(&company, &email, day(1));

    let first = compute_status(&company, &methods, &log.events, day(4)).unwrap();
    let second = compute_status(&company, &methods, &log.events, day(4)).unwrap();
    assert_eq!(first, second);

    let mut reversed = log.events.clone();
    reversed.reverse();
    let third = compute_status(&company, &methods, &reversed, day(4)).unwrap();
    assert_eq!(first, third);
}

#[test]
fn single_event_schedules_same_method_one_period_later() {
    let company = Company::new("Acme", 7);
    let email = CommunicationMethod::new(company.id, 1, "Email", true);
    let mut log = Log::new();
    log.record(&company, &email, day(0));

    let status = compute_status(
        &company,
        std::slice::from_ref(&email),
        &log.events,
        day(2),
    )
    .unwrap();
    assert_eq!(status.last_five_communications.len(), 1);
    let next = status.next_scheduled_communication.unwrap();
    assert_eq!(next.method_name, "Email");
    assert_eq!(next.due_date, day(7));
}

#[test]
fn same_date_events_are_listed_later_inserted_first() {
    let company = Company::new("Acme", 7);
    let email = CommunicationMethod::new(company.id, 1, "Email", true);
    let call = CommunicationMethod::new(company.id, 2, "Phone Call", true);
    let mut log = Log::new();
    log.record(&company, &email, day(5));
    log.record(&company, &call, day(5));

    let status = compute_status(&company, &[email, call], &log.events, day(5)).unwrap();
    let names: Vec<&str> = status
        .last_five_communications
        .iter()
        .map(|entry| entry.method_name.as_str())
        .collect();
    assert_eq!(names, vec!["Phone Call", "Email"]);
}

#[test]
fn duplicate_sequence_is_invalid_configuration() {
    let company = Company::new("Acme", 7);
    let email = CommunicationMethod::new(company.id, 2, "Email", true);
    let call = CommunicationMethod::new(company.id, 2, "Phone Call", true);

    let err = compute_status(&company, &[email.clone(), call.clone()], &[], day(0)).unwrap_err();
    assert_eq!(
        err,
        CadenceError::InvalidConfiguration {
            company_id: company.id,
            issue: ConfigurationIssue::DuplicateSequence {
                sequence: 2,
                existing: email.id,
                conflicting: call.id,
            },
        }
    );
}

#[test]
fn inputs_from_other_companies_are_rejected() {
    let acme = Company::new("Acme", 7);
    let globex = Company::new("Globex", 7);
    let foreign_method = CommunicationMethod::new(globex.id, 1, "Email", true);

    let err = compute_status(&acme, std::slice::from_ref(&foreign_method), &[], day(0))
        .unwrap_err();
    assert_eq!(
        err.issue(),
        &ConfigurationIssue::ForeignMethod(foreign_method.id)
    );

    let mut log = Log::new();
    let foreign_event = log.record(&globex, &foreign_method, day(0));
    let err = compute_status(&acme, &[], &log.events, day(0)).unwrap_err();
    assert_eq!(
        err.issue(),
        &ConfigurationIssue::ForeignCommunication(foreign_event)
    );
}

#[test]
fn due_date_past_calendar_end_is_reported() {
    let mut company = Company::new("Acme", 7);
    company.periodicity_days = u32::MAX;
    let email = CommunicationMethod::new(company.id, 1, "Email", true);
    let mut log = Log::new();
    log.record(&company, &email, NaiveDate::MAX);

    let err = compute_status(&company, std::slice::from_ref(&email), &log.events, day(0))
        .unwrap_err();
    assert!(matches!(
        err.issue(),
        ConfigurationIssue::DueDateOverflow { .. }
    ));
}

#[test]
fn future_dated_event_sets_reference_date() {
    let company = Company::new("Acme", 10);
    let email = CommunicationMethod::new(company.id, 1, "Email", true);
    let mut log = Log::new();
    log.record(&company, &email, day(20));

    let status = compute_status(
        &company,
        std::slice::from_ref(&email),
        &log.events,
        day(0),
    )
    .unwrap();
    assert_eq!(
        status.next_scheduled_communication.unwrap().due_date,
        day(30)
    );
}
