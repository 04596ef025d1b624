//! Publisher repository contract and SQLite implementation.
//!
//! # Invariants
//! - Listing order is `name COLLATE NOCASE ASC, id ASC`.
//! - Deleting a publisher removes every comic it published.

use crate::model::publisher::Publisher;
use crate::model::{EntityKind, PublisherId};
use crate::repo::{
    delete_owner_cascading, ensure_connection_ready, parse_id, push_pagination, DeleteOutcome,
    PageQuery, RepoError, RepoResult, PUBLISHER_COLUMNS,
};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};

const PUBLISHER_SELECT_SQL: &str = "SELECT id, name, address FROM publishers";

/// Repository interface for publisher CRUD operations.
pub trait PublisherRepository {
    fn create_publisher(&self, publisher: &Publisher) -> RepoResult<PublisherId>;
    fn update_publisher(&self, publisher: &Publisher) -> RepoResult<()>;
    fn get_publisher(&self, id: PublisherId) -> RepoResult<Option<Publisher>>;
    fn list_publishers(&self, page: PageQuery) -> RepoResult<Vec<Publisher>>;
    fn delete_publisher(&self, id: PublisherId) -> RepoResult<DeleteOutcome>;
}

/// SQLite-backed publisher repository.
pub struct SqlitePublisherRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqlitePublisherRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &[("publishers", PUBLISHER_COLUMNS)])?;
        Ok(Self { conn })
    }
}

impl PublisherRepository for SqlitePublisherRepository<'_> {
    fn create_publisher(&self, publisher: &Publisher) -> RepoResult<PublisherId> {
        publisher.validate()?;

        self.conn.execute(
            "INSERT INTO publishers (id, name, address) VALUES (?1, ?2, ?3);",
            params![
                publisher.id.to_string(),
                publisher.name.as_str(),
                publisher.address.as_str()
            ],
        )?;

        Ok(publisher.id)
    }

    fn update_publisher(&self, publisher: &Publisher) -> RepoResult<()> {
        publisher.validate()?;

        let changed = self.conn.execute(
            "UPDATE publishers SET name = ?1, address = ?2 WHERE id = ?3;",
            params![
                publisher.name.as_str(),
                publisher.address.as_str(),
                publisher.id.to_string()
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: EntityKind::Publisher,
                id: publisher.id.as_uuid(),
            });
        }

        Ok(())
    }

    fn get_publisher(&self, id: PublisherId) -> RepoResult<Option<Publisher>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PUBLISHER_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_publisher_row(row)?)),
            None => Ok(None),
        }
    }

    fn list_publishers(&self, page: PageQuery) -> RepoResult<Vec<Publisher>> {
        let mut sql = format!("{PUBLISHER_SELECT_SQL} ORDER BY name COLLATE NOCASE ASC, id ASC");
        let mut bind_values: Vec<Value> = Vec::new();
        push_pagination(&mut sql, &mut bind_values, page);

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut publishers = Vec::new();
        while let Some(row) = rows.next()? {
            publishers.push(parse_publisher_row(row)?);
        }

        Ok(publishers)
    }

    fn delete_publisher(&self, id: PublisherId) -> RepoResult<DeleteOutcome> {
        delete_owner_cascading(
            self.conn,
            EntityKind::Publisher,
            "publisher_id",
            id.as_uuid(),
        )
    }
}

fn parse_publisher_row(row: &Row<'_>) -> RepoResult<Publisher> {
    let id_text: String = row.get("id")?;
    let publisher = Publisher {
        id: parse_id(&id_text, "publishers.id")?,
        name: row.get("name")?,
        address: row.get("address")?,
    };
    publisher.validate()?;
    Ok(publisher)
}
