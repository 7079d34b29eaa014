//! Communication log contracts and SQLite implementation.
//!
//! # Responsibility
//! - Record completed communications and read them back with method names.
//!
//! # Invariants
//! - `insertion_seq` is the table rowid: assigned on insert, never rewritten.
//! - Listing order is `performed_on DESC, insertion_seq DESC`.
//! - Dates are stored as ISO `YYYY-MM-DD` text.

use super::{ensure_connection_ready, map_write_error, parse_uuid, RepoError, RepoResult};
use crate::model::communication::{CommunicationDraft, CommunicationEvent, CommunicationId};
use crate::model::company::CompanyId;
use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension, Row};

const DATE_FORMAT: &str = "%Y-%m-%d";

const EVENT_SELECT_SQL: &str = "SELECT
    c.insertion_seq AS insertion_seq,
    c.uuid AS uuid,
    c.company_uuid AS company_uuid,
    c.method_uuid AS method_uuid,
    m.name AS method_name,
    c.performed_on AS performed_on,
    c.notes AS notes
FROM communications c
INNER JOIN communication_methods m ON m.uuid = c.method_uuid";

/// Repository interface for the communication log.
pub trait CommunicationRepository {
    fn create_communication(&self, draft: &CommunicationDraft) -> RepoResult<CommunicationEvent>;
    /// Rewrites method, date and notes. Company and insertion rank are fixed.
    fn update_communication(&self, draft: &CommunicationDraft) -> RepoResult<()>;
    fn get_communication(&self, id: CommunicationId) -> RepoResult<Option<CommunicationEvent>>;
    fn list_communications(&self, company_id: CompanyId) -> RepoResult<Vec<CommunicationEvent>>;
    fn delete_communication(&self, id: CommunicationId) -> RepoResult<()>;
}

/// SQLite-backed communication log.
pub struct SqliteCommunicationRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCommunicationRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl CommunicationRepository for SqliteCommunicationRepository<'_> {
    fn create_communication(&self, draft: &CommunicationDraft) -> RepoResult<CommunicationEvent> {
        draft.validate()?;

        self.conn
            .execute(
                "INSERT INTO communications (
                    uuid,
                    company_uuid,
                    method_uuid,
                    performed_on,
                    notes
                ) VALUES (?1, ?2, ?3, ?4, ?5);",
                params![
                    draft.id.to_string(),
                    draft.company_id.to_string(),
                    draft.method_id.to_string(),
                    draft.date.format(DATE_FORMAT).to_string(),
                    draft.notes.as_deref(),
                ],
            )
            .map_err(|err| {
                map_write_error(err, || {
                    format!(
                        "communication {} duplicates an id or references unknown records",
                        draft.id
                    )
                })
            })?;

        self.get_communication(draft.id)?.ok_or_else(|| {
            RepoError::InvalidData("logged communication missing on read-back".to_string())
        })
    }

    fn update_communication(&self, draft: &CommunicationDraft) -> RepoResult<()> {
        draft.validate()?;

        let changed = self
            .conn
            .execute(
                "UPDATE communications
                 SET
                    method_uuid = ?1,
                    performed_on = ?2,
                    notes = ?3,
                    updated_at = (strftime('%s', 'now') * 1000)
                 WHERE uuid = ?4
                   AND company_uuid = ?5;",
                params![
                    draft.method_id.to_string(),
                    draft.date.format(DATE_FORMAT).to_string(),
                    draft.notes.as_deref(),
                    draft.id.to_string(),
                    draft.company_id.to_string(),
                ],
            )
            .map_err(|err| {
                map_write_error(err, || format!("method {} is unknown", draft.method_id))
            })?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "communication",
                id: draft.id,
            });
        }

        Ok(())
    }

    fn get_communication(&self, id: CommunicationId) -> RepoResult<Option<CommunicationEvent>> {
        self.conn
            .query_row(
                &format!("{EVENT_SELECT_SQL} WHERE c.uuid = ?1;"),
                [id.to_string()],
                |row| Ok(parse_event_row(row)),
            )
            .optional()?
            .transpose()
    }

    fn list_communications(&self, company_id: CompanyId) -> RepoResult<Vec<CommunicationEvent>> {
        let mut stmt = self.conn.prepare(&format!(
            "{EVENT_SELECT_SQL}
             WHERE c.company_uuid = ?1
             ORDER BY c.performed_on DESC, c.insertion_seq DESC;"
        ))?;
        let mut rows = stmt.query([company_id.to_string()])?;
        let mut events = Vec::new();
        while let Some(row) = rows.next()? {
            events.push(parse_event_row(row)?);
        }
        Ok(events)
    }

    fn delete_communication(&self, id: CommunicationId) -> RepoResult<()> {
        let changed = self.conn.execute(
            "DELETE FROM communications WHERE uuid = ?1;",
            [id.to_string()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "communication",
                id,
            });
        }

        Ok(())
    }
}

fn parse_event_row(row: &Row<'_>) -> RepoResult<CommunicationEvent> {
    let uuid_text: String = row.get("uuid")?;
    let company_text: String = row.get("company_uuid")?;
    let method_text: String = row.get("method_uuid")?;
    let date_text: String = row.get("performed_on")?;
    let date = NaiveDate::parse_from_str(&date_text, DATE_FORMAT).map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid date `{date_text}` in communications.performed_on"
        ))
    })?;

    Ok(CommunicationEvent {
        id: parse_uuid(&uuid_text, "communications.uuid")?,
        company_id: parse_uuid(&company_text, "communications.company_uuid")?,
        method_id: parse_uuid(&method_text, "communications.method_uuid")?,
        method_name: row.get("method_name")?,
        date,
        notes: row.get("notes")?,
        insertion_seq: row.get("insertion_seq")?,
    })
}
