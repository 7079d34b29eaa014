//! Company registry contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD over the `companies` table.
//!
//! # Invariants
//! - Write paths call `Company::validate()` before SQL mutations.
//! - Listing is deterministic: `name COLLATE NOCASE ASC, uuid ASC`.
//! - `list_company_headers` reads only `uuid` and `name`, so rows with
//!   invalid contact data still show up there.
//! - Deleting a company that still owns methods or communications is a
//!   `Conflict`; nothing cascades.

use super::{ensure_connection_ready, map_write_error, parse_uuid, RepoError, RepoResult};
use crate::model::company::{Company, CompanyId};
use rusqlite::{params, Connection, OptionalExtension, Row};

const COMPANY_SELECT_SQL: &str = "SELECT
    uuid,
    name,
    location,
    linkedin,
    emails_json,
    phone_numbers_json,
    comments,
    periodicity_days
FROM companies";

/// Identity of one registry row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyHeader {
    pub id: CompanyId,
    pub name: String,
}

/// Repository interface for the company registry.
pub trait CompanyRepository {
    fn create_company(&self, company: &Company) -> RepoResult<CompanyId>;
    fn update_company(&self, company: &Company) -> RepoResult<()>;
    fn get_company(&self, id: CompanyId) -> RepoResult<Option<Company>>;
    fn list_companies(&self) -> RepoResult<Vec<Company>>;
    /// Same order as `list_companies`, without decoding or validating rows.
    fn list_company_headers(&self) -> RepoResult<Vec<CompanyHeader>>;
    fn delete_company(&self, id: CompanyId) -> RepoResult<()>;
}

/// SQLite-backed company registry.
pub struct SqliteCompanyRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCompanyRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl CompanyRepository for SqliteCompanyRepository<'_> {
    fn create_company(&self, company: &Company) -> RepoResult<CompanyId> {
        company.validate()?;

        self.conn
            .execute(
                "INSERT INTO companies (
                    uuid,
                    name,
                    location,
                    linkedin,
                    emails_json,
                    phone_numbers_json,
                    comments,
                    periodicity_days
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8);",
                params![
                    company.id.to_string(),
                    company.name.trim(),
                    company.location.as_str(),
                    company.linkedin.as_str(),
                    encode_list(&company.emails)?,
                    encode_list(&company.phone_numbers)?,
                    company.comments.as_str(),
                    company.periodicity_days,
                ],
            )
            .map_err(|err| {
                map_write_error(err, || format!("company {} already exists", company.id))
            })?;

        Ok(company.id)
    }

    fn update_company(&self, company: &Company) -> RepoResult<()> {
        company.validate()?;

        let changed = self.conn.execute(
            "UPDATE companies
             SET
                name = ?1,
                location = ?2,
                linkedin = ?3,
                emails_json = ?4,
                phone_numbers_json = ?5,
                comments = ?6,
                periodicity_days = ?7,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?8;",
            params![
                company.name.trim(),
                company.location.as_str(),
                company.linkedin.as_str(),
                encode_list(&company.emails)?,
                encode_list(&company.phone_numbers)?,
                company.comments.as_str(),
                company.periodicity_days,
                company.id.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "company",
                id: company.id,
            });
        }

        Ok(())
    }

    fn get_company(&self, id: CompanyId) -> RepoResult<Option<Company>> {
        let row = self
            .conn
            .query_row(
                &format!("{COMPANY_SELECT_SQL} WHERE uuid = ?1;"),
                [id.to_string()],
                |row| Ok(parse_company_row(row)),
            )
            .optional()?;

        row.transpose()
    }

    fn list_companies(&self) -> RepoResult<Vec<Company>> {
        let mut stmt = self.conn.prepare(&format!(
            "{COMPANY_SELECT_SQL} ORDER BY name COLLATE NOCASE ASC, uuid ASC;"
        ))?;
        let mut rows = stmt.query([])?;
        let mut companies = Vec::new();

        while let Some(row) = rows.next()? {
            companies.push(parse_company_row(row)?);
        }

        Ok(companies)
    }

    fn list_company_headers(&self) -> RepoResult<Vec<CompanyHeader>> {
        let mut stmt = self.conn.prepare(
            "SELECT uuid, name FROM companies ORDER BY name COLLATE NOCASE ASC, uuid ASC;",
        )?;
        let mut rows = stmt.query([])?;
        let mut headers = Vec::new();

        while let Some(row) = rows.next()? {
            let uuid_text: String = row.get("uuid")?;
            headers.push(CompanyHeader {
                id: parse_uuid(&uuid_text, "companies.uuid")?,
                name: row.get("name")?,
            });
        }

        Ok(headers)
    }

    fn delete_company(&self, id: CompanyId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM companies WHERE uuid = ?1;", [id.to_string()])
            .map_err(|err| {
                map_write_error(err, || {
                    format!("company {id} still owns communication methods or communications")
                })
            })?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "company",
                id,
            });
        }

        Ok(())
    }
}

fn parse_company_row(row: &Row<'_>) -> RepoResult<Company> {
    let uuid_text: String = row.get("uuid")?;
    let periodicity: i64 = row.get("periodicity_days")?;
    let periodicity_days = u32::try_from(periodicity).map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid periodicity `{periodicity}` in companies.periodicity_days"
        ))
    })?;

    let company = Company {
        id: parse_uuid(&uuid_text, "companies.uuid")?,
        name: row.get("name")?,
        location: row.get("location")?,
        linkedin: row.get("linkedin")?,
        emails: decode_list(&row.get::<_, String>("emails_json")?, "companies.emails_json")?,
        phone_numbers: decode_list(
            &row.get::<_, String>("phone_numbers_json")?,
            "companies.phone_numbers_json",
        )?,
        comments: row.get("comments")?,
        periodicity_days,
    };
    company.validate()?;
    Ok(company)
}

fn encode_list(values: &[String]) -> RepoResult<String> {
    serde_json::to_string(values)
        .map_err(|err| RepoError::InvalidData(format!("contact list not encodable: {err}")))
}

fn decode_list(raw: &str, column: &str) -> RepoResult<Vec<String>> {
    serde_json::from_str(raw)
        .map_err(|err| RepoError::InvalidData(format!("invalid list in {column}: {err}")))
}
