//! Communication method catalog contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD over `communication_methods`.
//! - Insert a whole method ladder atomically.
//!
//! # Invariants
//! - Per-company listing is ordered by `sequence ASC`.
//! - `(company_uuid, sequence)` is unique; storage reports collisions as
//!   `Conflict`. The catalog service rejects them before they reach SQL.
//! - A method's owning company never changes after creation.

use super::{
    bool_to_int, ensure_connection_ready, int_to_bool, map_write_error, parse_uuid, RepoError,
    RepoResult,
};
use crate::model::company::CompanyId;
use crate::model::method::{CommunicationMethod, MethodId};
use rusqlite::{params, Connection, OptionalExtension, Row};

const METHOD_SELECT_SQL: &str = "SELECT
    uuid,
    company_uuid,
    sequence,
    mandatory,
    name,
    description
FROM communication_methods";

/// Repository interface for the method catalog.
pub trait MethodRepository {
    fn create_method(&self, method: &CommunicationMethod) -> RepoResult<MethodId>;
    /// Inserts all methods or none of them.
    fn create_methods(&self, methods: &[CommunicationMethod]) -> RepoResult<()>;
    /// Updates sequence, flag, name and description. Ownership is fixed.
    fn update_method(&self, method: &CommunicationMethod) -> RepoResult<()>;
    fn get_method(&self, id: MethodId) -> RepoResult<Option<CommunicationMethod>>;
    fn list_methods(&self, company_id: CompanyId) -> RepoResult<Vec<CommunicationMethod>>;
    fn list_all_methods(&self) -> RepoResult<Vec<CommunicationMethod>>;
    fn delete_method(&self, id: MethodId) -> RepoResult<()>;
}

/// SQLite-backed method catalog.
pub struct SqliteMethodRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteMethodRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }

    fn query_methods(
        &self,
        sql: &str,
        params: impl rusqlite::Params,
    ) -> RepoResult<Vec<CommunicationMethod>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params)?;
        let mut methods = Vec::new();
        while let Some(row) = rows.next()? {
            methods.push(parse_method_row(row)?);
        }
        Ok(methods)
    }
}

impl MethodRepository for SqliteMethodRepository<'_> {
    fn create_method(&self, method: &CommunicationMethod) -> RepoResult<MethodId> {
        insert_method(self.conn, method)?;
        Ok(method.id)
    }

    fn create_methods(&self, methods: &[CommunicationMethod]) -> RepoResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        for method in methods {
            insert_method(&tx, method)?;
        }
        tx.commit()?;
        Ok(())
    }

    fn update_method(&self, method: &CommunicationMethod) -> RepoResult<()> {
        method.validate()?;

        let changed = self
            .conn
            .execute(
                "UPDATE communication_methods
                 SET
                    sequence = ?1,
                    mandatory = ?2,
                    name = ?3,
                    description = ?4,
                    updated_at = (strftime('%s', 'now') * 1000)
                 WHERE uuid = ?5
                   AND company_uuid = ?6;",
                params![
                    method.sequence,
                    bool_to_int(method.mandatory),
                    method.name.trim(),
                    method.description.as_str(),
                    method.id.to_string(),
                    method.company_id.to_string(),
                ],
            )
            .map_err(|err| {
                map_write_error(err, || format!("sequence {} is taken", method.sequence))
            })?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "communication method",
                id: method.id,
            });
        }

        Ok(())
    }

    fn get_method(&self, id: MethodId) -> RepoResult<Option<CommunicationMethod>> {
        self.conn
            .query_row(
                &format!("{METHOD_SELECT_SQL} WHERE uuid = ?1;"),
                [id.to_string()],
                |row| Ok(parse_method_row(row)),
            )
            .optional()?
            .transpose()
    }

    fn list_methods(&self, company_id: CompanyId) -> RepoResult<Vec<CommunicationMethod>> {
        self.query_methods(
            &format!("{METHOD_SELECT_SQL} WHERE company_uuid = ?1 ORDER BY sequence ASC;"),
            [company_id.to_string()],
        )
    }

    fn list_all_methods(&self) -> RepoResult<Vec<CommunicationMethod>> {
        self.query_methods(
            &format!("{METHOD_SELECT_SQL} ORDER BY company_uuid ASC, sequence ASC;"),
            [],
        )
    }

    fn delete_method(&self, id: MethodId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute(
                "DELETE FROM communication_methods WHERE uuid = ?1;",
                [id.to_string()],
            )
            .map_err(|err| {
                map_write_error(err, || format!("method {id} has logged communications"))
            })?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "communication method",
                id,
            });
        }

        Ok(())
    }
}

fn parse_method_row(row: &Row<'_>) -> RepoResult<CommunicationMethod> {
    let uuid_text: String = row.get("uuid")?;
    let company_text: String = row.get("company_uuid")?;
    let raw_sequence: i64 = row.get("sequence")?;
    let sequence = u8::try_from(raw_sequence).map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid sequence `{raw_sequence}` in communication_methods.sequence"
        ))
    })?;

    let method = CommunicationMethod {
        id: parse_uuid(&uuid_text, "communication_methods.uuid")?,
        company_id: parse_uuid(&company_text, "communication_methods.company_uuid")?,
        sequence,
        mandatory: int_to_bool(row.get("mandatory")?, "communication_methods.mandatory")?,
        name: row.get("name")?,
        description: row.get("description")?,
    };
    method.validate()?;
    Ok(method)
}

fn insert_method(conn: &Connection, method: &CommunicationMethod) -> RepoResult<()> {
    method.validate()?;
    conn.execute(
        "INSERT INTO communication_methods (
            uuid,
            company_uuid,
            sequence,
            mandatory,
            name,
            description
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
        params![
            method.id.to_string(),
            method.company_id.to_string(),
            method.sequence,
            bool_to_int(method.mandatory),
            method.name.trim(),
            method.description.as_str(),
        ],
    )
    .map_err(|err| {
        map_write_error(err, || {
            format!(
                "sequence {} is taken or company {} is unknown",
                method.sequence, method.company_id
            )
        })
    })?;
    Ok(())
}
