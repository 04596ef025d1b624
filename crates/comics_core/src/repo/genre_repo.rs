//! Genre repository contract and SQLite implementation.

use crate::model::genre::Genre;
use crate::model::{EntityKind, GenreId};
use crate::repo::{
    delete_owner_cascading, ensure_connection_ready, parse_id, push_pagination, DeleteOutcome,
    PageQuery, RepoError, RepoResult, GENRE_COLUMNS,
};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};

const GENRE_SELECT_SQL: &str = "SELECT id, name, description FROM genres";

/// Repository interface for genre CRUD operations.
pub trait GenreRepository {
    fn create_genre(&self, genre: &Genre) -> RepoResult<GenreId>;
    fn update_genre(&self, genre: &Genre) -> RepoResult<()>;
    fn get_genre(&self, id: GenreId) -> RepoResult<Option<Genre>>;
    fn list_genres(&self, page: PageQuery) -> RepoResult<Vec<Genre>>;
    fn delete_genre(&self, id: GenreId) -> RepoResult<DeleteOutcome>;
}

/// SQLite-backed genre repository.
pub struct SqliteGenreRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteGenreRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &[("genres", GENRE_COLUMNS)])?;
        Ok(Self { conn })
    }
}

impl GenreRepository for SqliteGenreRepository<'_> {
    fn create_genre(&self, genre: &Genre) -> RepoResult<GenreId> {
        genre.validate()?;

        self.conn.execute(
            "INSERT INTO genres (id, name, description) VALUES (?1, ?2, ?3);",
            params![
                genre.id.to_string(),
                genre.name.as_str(),
                genre.description.as_str()
            ],
        )?;

        Ok(genre.id)
    }

    fn update_genre(&self, genre: &Genre) -> RepoResult<()> {
        genre.validate()?;

        let changed = self.conn.execute(
            "UPDATE genres SET name = ?1, description = ?2 WHERE id = ?3;",
            params![
                genre.name.as_str(),
                genre.description.as_str(),
                genre.id.to_string()
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: EntityKind::Genre,
                id: genre.id.as_uuid(),
            });
        }

        Ok(())
    }

    fn get_genre(&self, id: GenreId) -> RepoResult<Option<Genre>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{GENRE_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_genre_row(row)?));
        }
        Ok(None)
    }

    fn list_genres(&self, page: PageQuery) -> RepoResult<Vec<Genre>> {
        let mut sql = format!("{GENRE_SELECT_SQL} ORDER BY name COLLATE NOCASE ASC, id ASC");
        let mut bind_values: Vec<Value> = Vec::new();
        push_pagination(&mut sql, &mut bind_values, page);

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut genres = Vec::new();
        while let Some(row) = rows.next()? {
            genres.push(parse_genre_row(row)?);
        }
        Ok(genres)
    }

    fn delete_genre(&self, id: GenreId) -> RepoResult<DeleteOutcome> {
        delete_owner_cascading(self.conn, EntityKind::Genre, "genre_id", id.as_uuid())
    }
}

fn parse_genre_row(row: &Row<'_>) -> RepoResult<Genre> {
    let id_text: String = row.get("id")?;
    let genre = Genre {
        id: parse_id(&id_text, "genres.id")?,
        name: row.get("name")?,
        description: row.get("description")?,
    };
    genre.validate()?;
    Ok(genre)
}
