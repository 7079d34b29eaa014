//! Use-case API over the outreach core.
//!
//! # Responsibility
//! - Expose stable, use-case-level functions to front ends (CLI today).
//! - Translate plain caller input into validated core records.
//!
//! # Invariants
//! - Every call receives its database location through `ApiContext`; no
//!   process-wide session or path state exists.
//! - Each call opens its own connection and never panics.
//! - `today` is always supplied by the caller.

use crate::error::{ApiError, ApiResult};
use chrono::NaiveDate;
use log::{debug, warn};
use outreach_core::model::company::parse_contact_list;
use outreach_core::{
    CommunicationDraft, CommunicationEvent, CommunicationId, CommunicationMethod,
    CommunicationService, Company, CompanyCommunicationStatus, CompanyId, CompanyService,
    CoreConfig, DashboardReport, DashboardService, LogLevel, MethodId, MethodService,
    SqliteCommunicationRepository, SqliteCompanyRepository, SqliteMethodRepository,
};
use rusqlite::Connection;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Instant;
use uuid::Uuid;

const DATE_FORMAT: &str = "%Y-%m-%d";

type Catalog<'conn> = MethodService<SqliteCompanyRepository<'conn>, SqliteMethodRepository<'conn>>;
type CommunicationLog<'conn> = CommunicationService<
    SqliteCompanyRepository<'conn>,
    SqliteMethodRepository<'conn>,
    SqliteCommunicationRepository<'conn>,
>;
type Dashboard<'conn> = DashboardService<
    SqliteCompanyRepository<'conn>,
    SqliteMethodRepository<'conn>,
    SqliteCommunicationRepository<'conn>,
>;

/// Request-scoped context passed to every call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiContext {
    db_path: PathBuf,
}

impl ApiContext {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }

    pub fn from_config(config: &CoreConfig) -> Self {
        Self::new(config.db_path.clone())
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }
}

/// Company fields as entered by an operator.
///
/// `emails` and `phone_numbers` are free-form lists separated by commas,
/// semicolons or line breaks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CompanyInput {
    pub name: String,
    pub location: String,
    pub linkedin: String,
    pub emails: String,
    pub phone_numbers: String,
    pub comments: String,
    pub periodicity_days: u32,
}

impl CompanyInput {
    fn into_company(self, id: CompanyId) -> Company {
        Company {
            id,
            name: self.name.trim().to_string(),
            location: self.location.trim().to_string(),
            linkedin: self.linkedin.trim().to_string(),
            emails: parse_contact_list(&self.emails),
            phone_numbers: parse_contact_list(&self.phone_numbers),
            comments: self.comments,
            periodicity_days: self.periodicity_days,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MethodInput {
    pub sequence: u8,
    pub mandatory: bool,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CommunicationInput {
    pub method_id: MethodId,
    pub date: NaiveDate,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Returns the core crate version.
pub fn core_version() -> String {
    outreach_core::core_version().to_owned()
}

/// Initializes core file logging once per process.
///
/// Safe to repeat with the same `level + log_dir`; reconfiguration fails.
pub fn init_logging(level: &str, log_dir: &str) -> ApiResult<()> {
    let level: LogLevel = level.parse().map_err(ApiError::InvalidInput)?;
    outreach_core::init_logging(level, log_dir).map_err(ApiError::Logging)
}

/// Parses a record id typed by an operator.
pub fn parse_id(raw: &str) -> ApiResult<Uuid> {
    Uuid::parse_str(raw.trim())
        .map_err(|_| ApiError::InvalidInput(format!("`{}` is not a valid id", raw.trim())))
}

/// Parses an ISO `YYYY-MM-DD` date.
pub fn parse_date(raw: &str) -> ApiResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).map_err(|_| {
        ApiError::InvalidInput(format!("`{}` is not a YYYY-MM-DD date", raw.trim()))
    })
}

/// Derives every company's status as of `today`.
pub fn dashboard(ctx: &ApiContext, today: NaiveDate) -> ApiResult<DashboardReport> {
    with_connection(ctx, "dashboard", |conn| {
        Ok(dashboard_service(conn)?.build_dashboard(today)?)
    })
}

/// Dashboard wire payload: a JSON array of company statuses.
///
/// Companies that failed derivation are omitted here; use [`dashboard`] to
/// see them.
pub fn dashboard_json(ctx: &ApiContext, today: NaiveDate) -> ApiResult<String> {
    let report = dashboard(ctx, today)?;
    Ok(serde_json::to_string_pretty(&report.statuses)?)
}

pub fn company_status(
    ctx: &ApiContext,
    company_id: CompanyId,
    today: NaiveDate,
) -> ApiResult<CompanyCommunicationStatus> {
    with_connection(ctx, "company_status", |conn| {
        Ok(dashboard_service(conn)?.company_status(company_id, today)?)
    })
}

pub fn create_company(ctx: &ApiContext, input: CompanyInput) -> ApiResult<Company> {
    let company = input.into_company(Uuid::new_v4());
    with_connection(ctx, "company_create", |conn| {
        Ok(company_service(conn)?.create_company(&company)?)
    })
}

/// Replaces every editable field of an existing company.
pub fn update_company(
    ctx: &ApiContext,
    company_id: CompanyId,
    input: CompanyInput,
) -> ApiResult<Company> {
    let company = input.into_company(company_id);
    with_connection(ctx, "company_update", |conn| {
        Ok(company_service(conn)?.update_company(&company)?)
    })
}

pub fn get_company(ctx: &ApiContext, company_id: CompanyId) -> ApiResult<Company> {
    with_connection(ctx, "company_get", |conn| {
        Ok(company_service(conn)?.get_company(company_id)?)
    })
}

pub fn list_companies(ctx: &ApiContext) -> ApiResult<Vec<Company>> {
    with_connection(ctx, "company_list", |conn| {
        Ok(company_service(conn)?.list_companies()?)
    })
}

pub fn delete_company(ctx: &ApiContext, company_id: CompanyId) -> ApiResult<()> {
    with_connection(ctx, "company_delete", |conn| {
        Ok(company_service(conn)?.delete_company(company_id)?)
    })
}

pub fn add_method(
    ctx: &ApiContext,
    company_id: CompanyId,
    input: MethodInput,
) -> ApiResult<CommunicationMethod> {
    let mut method =
        CommunicationMethod::new(company_id, input.sequence, input.name.trim(), input.mandatory);
    method.description = input.description;
    with_connection(ctx, "method_create", |conn| {
        Ok(method_service(conn)?.create_method(&method)?)
    })
}

/// Rewrites rank, flag, name and description of an existing method.
pub fn update_method(
    ctx: &ApiContext,
    method_id: MethodId,
    input: MethodInput,
) -> ApiResult<CommunicationMethod> {
    with_connection(ctx, "method_update", |conn| {
        let service = method_service(conn)?;
        let mut method = service.get_method(method_id)?;
        method.sequence = input.sequence;
        method.mandatory = input.mandatory;
        method.name = input.name.trim().to_string();
        method.description = input.description;
        Ok(service.update_method(&method)?)
    })
}

pub fn list_methods(
    ctx: &ApiContext,
    company_id: CompanyId,
) -> ApiResult<Vec<CommunicationMethod>> {
    with_connection(ctx, "method_list", |conn| {
        Ok(method_service(conn)?.list_methods(company_id)?)
    })
}

pub fn delete_method(ctx: &ApiContext, method_id: MethodId) -> ApiResult<()> {
    with_connection(ctx, "method_delete", |conn| {
        Ok(method_service(conn)?.delete_method(method_id)?)
    })
}

/// Installs the predefined ladder for a company with no conflicting ranks.
pub fn seed_default_methods(
    ctx: &ApiContext,
    company_id: CompanyId,
) -> ApiResult<Vec<CommunicationMethod>> {
    with_connection(ctx, "method_seed", |conn| {
        Ok(method_service(conn)?.seed_default_methods(company_id)?)
    })
}

pub fn log_communication(
    ctx: &ApiContext,
    company_id: CompanyId,
    input: CommunicationInput,
) -> ApiResult<CommunicationEvent> {
    let mut draft = CommunicationDraft::new(company_id, input.method_id, input.date);
    draft.notes = normalize_notes(input.notes);
    with_connection(ctx, "communication_log", |conn| {
        Ok(log_service(conn)?.log_communication(&draft)?)
    })
}

/// Rewrites method, date and notes; the company and insertion rank stay.
pub fn update_communication(
    ctx: &ApiContext,
    communication_id: CommunicationId,
    input: CommunicationInput,
) -> ApiResult<CommunicationEvent> {
    with_connection(ctx, "communication_update", |conn| {
        let service = log_service(conn)?;
        let mut draft = service.get_communication(communication_id)?.to_draft();
        draft.method_id = input.method_id;
        draft.date = input.date;
        draft.notes = normalize_notes(input.notes);
        Ok(service.update_communication(&draft)?)
    })
}

pub fn list_communications(
    ctx: &ApiContext,
    company_id: CompanyId,
) -> ApiResult<Vec<CommunicationEvent>> {
    with_connection(ctx, "communication_list", |conn| {
        Ok(log_service(conn)?.list_communications(company_id)?)
    })
}

pub fn delete_communication(ctx: &ApiContext, communication_id: CommunicationId) -> ApiResult<()> {
    with_connection(ctx, "communication_delete", |conn| {
        Ok(log_service(conn)?.delete_communication(communication_id)?)
    })
}

fn normalize_notes(notes: Option<String>) -> Option<String> {
    notes
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn with_connection<T>(
    ctx: &ApiContext,
    operation: &'static str,
    f: impl FnOnce(&Connection) -> ApiResult<T>,
) -> ApiResult<T> {
    let started_at = Instant::now();
    let result = outreach_core::db::open_db(&ctx.db_path)
        .map_err(ApiError::from)
        .and_then(|conn| f(&conn));

    match &result {
        Ok(_) => debug!(
            "event=api_call module=api status=ok operation={operation} duration_ms={}",
            started_at.elapsed().as_millis()
        ),
        Err(err) => warn!(
            "event=api_call module=api status=error operation={operation} duration_ms={} error_code={}",
            started_at.elapsed().as_millis(),
            err.code()
        ),
    }
    result
}

fn company_service(conn: &Connection) -> ApiResult<CompanyService<SqliteCompanyRepository<'_>>> {
    Ok(CompanyService::new(SqliteCompanyRepository::try_new(conn)?))
}

fn method_service(conn: &Connection) -> ApiResult<Catalog<'_>> {
    Ok(MethodService::new(
        SqliteCompanyRepository::try_new(conn)?,
        SqliteMethodRepository::try_new(conn)?,
    ))
}

fn log_service(conn: &Connection) -> ApiResult<CommunicationLog<'_>> {
    Ok(CommunicationService::new(
        SqliteCompanyRepository::try_new(conn)?,
        SqliteMethodRepository::try_new(conn)?,
        SqliteCommunicationRepository::try_new(conn)?,
    ))
}

fn dashboard_service(conn: &Connection) -> ApiResult<Dashboard<'_>> {
    Ok(DashboardService::new(
        SqliteCompanyRepository::try_new(conn)?,
        SqliteMethodRepository::try_new(conn)?,
        SqliteCommunicationRepository::try_new(conn)?,
    ))
}

#[cfg(test)]
mod tests {
    use super::{
        add_method, create_company, dashboard, dashboard_json, delete_company, init_logging,
        list_communications, log_communication, parse_date, parse_id, seed_default_methods,
        update_communication, update_method, ApiContext, CommunicationInput, CompanyInput,
        MethodInput,
    };
    use serde_json::{json, Value};
    use tempfile::TempDir;

    fn context() -> (TempDir, ApiContext) {
        let dir = tempfile::tempdir().unwrap();
        let ctx = ApiContext::new(dir.path().join("outreach.sqlite3"));
        (dir, ctx)
    }

    fn company(name: &str, periodicity_days: u32) -> CompanyInput {
        CompanyInput {
            name: name.to_string(),
            periodicity_days,
            ..CompanyInput::default()
        }
    }

    #[test]
    fn init_logging_rejects_unsupported_level_and_relative_dir() {
        let err = init_logging("verbose", "/tmp/outreach-logs").unwrap_err();
        assert_eq!(err.code(), "invalid_input");
        let err = init_logging("info", "tmp/logs").unwrap_err();
        assert_eq!(err.code(), "logging_error");
    }

    #[test]
    fn parse_helpers_report_invalid_input() {
        assert_eq!(parse_id("nope").unwrap_err().code(), "invalid_input");
        assert_eq!(parse_date("2024-13-01").unwrap_err().code(), "invalid_input");
        assert_eq!(
            parse_date(" 2024-02-29 ").unwrap().to_string(),
            "2024-02-29"
        );
    }

    #[test]
    fn company_input_splits_contact_lists() {
        let (_dir, ctx) = context();
        let created = create_company(
            &ctx,
            CompanyInput {
                emails: "a@acme.io; b@acme.io".to_string(),
                phone_numbers: "+1 555 0100\n+1 555 0101".to_string(),
                ..company("  Acme  ", 7)
            },
        )
        .unwrap();

        assert_eq!(created.name, "Acme");
        assert_eq!(created.emails, vec!["a@acme.io", "b@acme.io"]);
        assert_eq!(created.phone_numbers.len(), 2);
    }

    #[test]
    fn dashboard_json_follows_wire_contract() {
        let (_dir, ctx) = context();
        let acme = create_company(&ctx, company("Acme", 7)).unwrap();
        let ladder = seed_default_methods(&ctx, acme.id).unwrap();
        let today = parse_date("2024-04-10").unwrap();

        log_communication(
            &ctx,
            acme.id,
            CommunicationInput {
                method_id: ladder[0].id,
                date: parse_date("2024-04-08").unwrap(),
                notes: Some("  ".to_string()),
            },
        )
        .unwrap();

        let payload: Value = serde_json::from_str(&dashboard_json(&ctx, today).unwrap()).unwrap();
        assert_eq!(
            payload,
            json!([{
                "companyName": "Acme",
                "lastFiveCommunications": [{ "type": "LinkedIn Post", "date": "2024-04-08" }],
                "nextScheduledCommunication": { "type": "LinkedIn Message", "date": "2024-04-15" }
            }])
        );

        let logged = list_communications(&ctx, acme.id).unwrap();
        assert_eq!(logged[0].notes, None);
    }

    #[test]
    fn errors_map_to_stable_codes() {
        let (_dir, ctx) = context();
        let acme = create_company(&ctx, company("Acme", 7)).unwrap();

        assert_eq!(
            create_company(&ctx, company("Zero", 0)).unwrap_err().code(),
            "invalid_input"
        );

        let email = add_method(
            &ctx,
            acme.id,
            MethodInput {
                sequence: 1,
                mandatory: true,
                name: "Email".to_string(),
                description: String::new(),
            },
        )
        .unwrap();
        let clash = MethodInput {
            sequence: 1,
            mandatory: false,
            name: "Other".to_string(),
            description: String::new(),
        };
        assert_eq!(
            add_method(&ctx, acme.id, clash).unwrap_err().code(),
            "invalid_configuration"
        );
        assert_eq!(
            delete_company(&ctx, acme.id).unwrap_err().code(),
            "conflict"
        );
        assert_eq!(
            delete_company(&ctx, uuid::Uuid::new_v4()).unwrap_err().code(),
            "not_found"
        );

        let globex = create_company(&ctx, company("Globex", 7)).unwrap();
        let misrouted = CommunicationInput {
            method_id: email.id,
            date: parse_date("2024-01-01").unwrap(),
            notes: None,
        };
        assert_eq!(
            log_communication(&ctx, globex.id, misrouted).unwrap_err().code(),
            "invalid_configuration"
        );

        let renamed = update_method(
            &ctx,
            email.id,
            MethodInput {
                sequence: 2,
                mandatory: true,
                name: "Cold Email".to_string(),
                description: "first touch".to_string(),
            },
        )
        .unwrap();
        assert_eq!(renamed.company_id, acme.id);
        assert_eq!(renamed.sequence, 2);
    }

    #[test]
    fn update_communication_moves_date_and_keeps_company() {
        let (_dir, ctx) = context();
        let acme = create_company(&ctx, company("Acme", 7)).unwrap();
        let ladder = seed_default_methods(&ctx, acme.id).unwrap();
        let logged = log_communication(
            &ctx,
            acme.id,
            CommunicationInput {
                method_id: ladder[2].id,
                date: parse_date("2024-01-01").unwrap(),
                notes: None,
            },
        )
        .unwrap();

        let edited = update_communication(
            &ctx,
            logged.id,
            CommunicationInput {
                method_id: ladder[3].id,
                date: parse_date("2024-01-03").unwrap(),
                notes: Some("follow-up call".to_string()),
            },
        )
        .unwrap();
        assert_eq!(edited.company_id, acme.id);
        assert_eq!(edited.method_name, "Phone Call");
        assert_eq!(edited.insertion_seq, logged.insertion_seq);

        let report = dashboard(&ctx, parse_date("2024-01-04").unwrap()).unwrap();
        assert!(report.failures.is_empty());
        assert_eq!(
            report.statuses[0].last_five_communications[0].method_name,
            "Phone Call"
        );
    }

    #[test]
    fn contexts_are_isolated() {
        let (_first_dir, first) = context();
        let (_second_dir, second) = context();
        create_company(&first, company("Acme", 7)).unwrap();

        let today = parse_date("2024-01-01").unwrap();
        assert_eq!(dashboard(&first, today).unwrap().statuses.len(), 1);
        assert!(dashboard(&second, today).unwrap().statuses.is_empty());
        assert!(parse_id(&uuid::Uuid::new_v4().to_string()).is_ok());
    }
}
