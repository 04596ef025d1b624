//! Author repository contract and SQLite implementation.
//!
//! # Invariants
//! - Listing order is `name COLLATE NOCASE ASC, id ASC`.
//! - Deleting an author removes every comic that references it.

use crate::model::author::Author;
use crate::model::{AuthorId, EntityKind};
use crate::repo::{
    delete_owner_cascading, ensure_connection_ready, parse_id, push_pagination, DeleteOutcome,
    PageQuery, RepoError, RepoResult, AUTHOR_COLUMNS,
};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};

const AUTHOR_SELECT_SQL: &str = "SELECT id, name, bio FROM authors";

/// Repository interface for author CRUD operations.
pub trait AuthorRepository {
    fn create_author(&self, author: &Author) -> RepoResult<AuthorId>;
    fn update_author(&self, author: &Author) -> RepoResult<()>;
    fn get_author(&self, id: AuthorId) -> RepoResult<Option<Author>>;
    fn list_authors(&self, page: PageQuery) -> RepoResult<Vec<Author>>;
    /// Deletes the author together with all of their comics.
    fn delete_author(&self, id: AuthorId) -> RepoResult<DeleteOutcome>;
}

/// SQLite-backed author repository.
pub struct SqliteAuthorRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteAuthorRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &[("authors", AUTHOR_COLUMNS)])?;
        Ok(Self { conn })
    }
}

impl AuthorRepository for SqliteAuthorRepository<'_> {
    fn create_author(&self, author: &Author) -> RepoResult<AuthorId> {
        author.validate()?;

        self.conn.execute(
            "INSERT INTO authors (id, name, bio) VALUES (?1, ?2, ?3);",
            params![
                author.id.to_string(),
                author.name.as_str(),
                author.bio.as_str()
            ],
        )?;

        Ok(author.id)
    }

    fn update_author(&self, author: &Author) -> RepoResult<()> {
        author.validate()?;

        let changed = self.conn.execute(
            "UPDATE authors SET name = ?1, bio = ?2 WHERE id = ?3;",
            params![
                author.name.as_str(),
                author.bio.as_str(),
                author.id.to_string()
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: EntityKind::Author,
                id: author.id.as_uuid(),
            });
        }

        Ok(())
    }

    fn get_author(&self, id: AuthorId) -> RepoResult<Option<Author>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{AUTHOR_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_author_row(row)?));
        }

        Ok(None)
    }

    fn list_authors(&self, page: PageQuery) -> RepoResult<Vec<Author>> {
        let mut sql = format!("{AUTHOR_SELECT_SQL} ORDER BY name COLLATE NOCASE ASC, id ASC");
        let mut bind_values: Vec<Value> = Vec::new();
        push_pagination(&mut sql, &mut bind_values, page);

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut authors = Vec::new();
        while let Some(row) = rows.next()? {
            authors.push(parse_author_row(row)?);
        }

        Ok(authors)
    }

    fn delete_author(&self, id: AuthorId) -> RepoResult<DeleteOutcome> {
        delete_owner_cascading(self.conn, EntityKind::Author, "author_id", id.as_uuid())
    }
}

fn parse_author_row(row: &Row<'_>) -> RepoResult<Author> {
    let id_text: String = row.get("id")?;
    let author = Author {
        id: parse_id(&id_text, "authors.id")?,
        name: row.get("name")?,
        bio: row.get("bio")?,
    };
    author.validate()?;
    Ok(author)
}
