//! Repository layer contracts and SQLite implementations.
//!
//! # Responsibility
//! - Define per-entity data access contracts.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Write paths call the record's `validate()` before SQL mutations.
//! - Comic writes verify all three owner rows inside one immediate
//!   transaction and report the first missing one as `MissingReference`.
//! - Owner deletes report how many comics the foreign-key cascade removed.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::validation::ValidationError;
use crate::model::EntityKind;
use rusqlite::types::Value;
use rusqlite::{Connection, Transaction, TransactionBehavior};
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

pub mod author_repo;
pub mod comic_repo;
pub mod genre_repo;
pub mod publisher_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for catalog persistence and query operations.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Db(#[from] DbError),
    #[error("{entity} not found: {id}")]
    NotFound { entity: EntityKind, id: Uuid },
    /// A comic names an author/publisher/genre row that does not exist.
    #[error("referenced {entity} does not exist: {id}")]
    MissingReference { entity: EntityKind, id: Uuid },
    #[error("catalog repository requires schema version {expected_version}, got {actual_version}")]
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    #[error("catalog repository requires table `{0}`")]
    MissingRequiredTable(&'static str),
    #[error("catalog repository requires column `{column}` in table `{table}`")]
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
    #[error("invalid persisted catalog data: {0}")]
    InvalidData(String),
}

impl RepoError {
    /// Stable, content-free code used in log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_failed",
            Self::Db(_) => "db_error",
            Self::NotFound { .. } => "not_found",
            Self::MissingReference { .. } => "missing_reference",
            Self::UninitializedConnection { .. } => "uninitialized_connection",
            Self::MissingRequiredTable(_) | Self::MissingRequiredColumn { .. } => "schema_mismatch",
            Self::InvalidData(_) => "invalid_data",
        }
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Pagination options for list queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageQuery {
    /// `None` returns every remaining row.
    pub limit: Option<u32>,
    pub offset: u32,
}

/// Result of deleting an author, publisher or genre.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteOutcome {
    /// Comics removed by the `ON DELETE CASCADE` foreign key.
    pub cascaded_comics: usize,
}

pub(crate) fn push_pagination(sql: &mut String, bind_values: &mut Vec<Value>, page: PageQuery) {
    if let Some(limit) = page.limit {
        sql.push_str(" LIMIT ?");
        bind_values.push(Value::Integer(i64::from(limit)));
        if page.offset > 0 {
            sql.push_str(" OFFSET ?");
            bind_values.push(Value::Integer(i64::from(page.offset)));
        }
    } else if page.offset > 0 {
        sql.push_str(" LIMIT -1 OFFSET ?");
        bind_values.push(Value::Integer(i64::from(page.offset)));
    }
}

pub(crate) fn parse_id<T: FromStr>(value: &str, column: &'static str) -> RepoResult<T> {
    T::from_str(value)
        .map_err(|_| RepoError::InvalidData(format!("invalid uuid `{value}` in {column}")))
}

pub(crate) fn row_exists(conn: &Connection, entity: EntityKind, id: Uuid) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        &format!(
            "SELECT EXISTS(SELECT 1 FROM {} WHERE id = ?1);",
            entity.table()
        ),
        [id.to_string()],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

/// Deletes one owner row and reports how many comics cascaded with it.
///
/// Counting and deleting share one immediate transaction so the reported
/// number matches the rows the foreign key actually removed.
pub(crate) fn delete_owner_cascading(
    conn: &Connection,
    entity: EntityKind,
    comic_fk_column: &'static str,
    id: Uuid,
) -> RepoResult<DeleteOutcome> {
    let id_text = id.to_string();
    let tx = Transaction::new_unchecked(conn, TransactionBehavior::Immediate)?;

    let dependents: i64 = tx.query_row(
        &format!("SELECT COUNT(*) FROM comics WHERE {comic_fk_column} = ?1;"),
        [id_text.as_str()],
        |row| row.get(0),
    )?;

    let changed = tx.execute(
        &format!("DELETE FROM {} WHERE id = ?1;", entity.table()),
        [id_text.as_str()],
    )?;
    if changed == 0 {
        return Err(RepoError::NotFound { entity, id });
    }

    tx.commit()?;
    let cascaded_comics = usize::try_from(dependents)
        .map_err(|_| RepoError::InvalidData(format!("negative comic count `{dependents}`")))?;
    Ok(DeleteOutcome { cascaded_comics })
}

/// Verifies the connection is migrated and carries the expected columns.
pub(crate) fn ensure_connection_ready(
    conn: &Connection,
    tables: &[(&'static str, &[&'static str])],
) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    for &(table, columns) in tables {
        if !table_exists(conn, table)? {
            return Err(RepoError::MissingRequiredTable(table));
        }
        for &column in columns {
            if !table_has_column(conn, table, column)? {
                return Err(RepoError::MissingRequiredColumn { table, column });
            }
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}

pub(crate) const AUTHOR_COLUMNS: &[&str] = &["id", "name", "bio"];
pub(crate) const PUBLISHER_COLUMNS: &[&str] = &["id", "name", "address"];
pub(crate) const GENRE_COLUMNS: &[&str] = &["id", "name", "description"];
pub(crate) const COMIC_COLUMNS: &[&str] = &[
    "id",
    "title",
    "author_id",
    "publisher_id",
    "genre_id",
    "release_date",
];
