//! Comic repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD APIs over `comics` storage.
//! - Own default catalog ordering, reverse lookups by owner and
//!   release-date windows.
//!
//! # Invariants
//! - A comic row is only written after its author, publisher and genre
//!   rows are confirmed inside the same immediate transaction.
//! - Listing without an explicit order is `release_date DESC`, ties broken
//!   by `title ASC, id ASC`.

use crate::model::comic::Comic;
use crate::model::validation::{parse_release_date, RELEASE_DATE_FORMAT};
use crate::model::{AuthorId, ComicId, EntityKind, GenreId, PublisherId};
use crate::repo::{
    ensure_connection_ready, parse_id, push_pagination, row_exists, PageQuery, RepoError,
    RepoResult, AUTHOR_COLUMNS, COMIC_COLUMNS, GENRE_COLUMNS, PUBLISHER_COLUMNS,
};
use chrono::NaiveDate;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row, Transaction, TransactionBehavior};

const COMIC_SELECT_SQL: &str = "SELECT
    id,
    title,
    author_id,
    publisher_id,
    genre_id,
    release_date
FROM comics";

/// Ordering applied to comic listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ComicOrder {
    /// Most recent release first. Catalog default.
    #[default]
    ReleaseDateDesc,
    ReleaseDateAsc,
    /// Case-insensitive title order.
    TitleAsc,
}

impl ComicOrder {
    fn order_by_sql(self) -> &'static str {
        match self {
            Self::ReleaseDateDesc => " ORDER BY release_date DESC, title ASC, id ASC",
            Self::ReleaseDateAsc => " ORDER BY release_date ASC, title ASC, id ASC",
            Self::TitleAsc => " ORDER BY title COLLATE NOCASE ASC, release_date DESC, id ASC",
        }
    }
}

/// Filter, ordering and pagination options for listing comics.
///
/// Filters combine with AND; an empty query lists the whole catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComicListQuery {
    pub author_id: Option<AuthorId>,
    pub publisher_id: Option<PublisherId>,
    pub genre_id: Option<GenreId>,
    /// Inclusive lower bound on `release_date`.
    pub released_on_or_after: Option<NaiveDate>,
    /// Exclusive upper bound on `release_date`.
    pub released_before: Option<NaiveDate>,
    /// `None` applies `ComicOrder::default()`.
    pub order: Option<ComicOrder>,
    pub page: PageQuery,
}

impl ComicListQuery {
    /// Comics written by one author.
    pub fn by_author(author_id: AuthorId) -> Self {
        Self {
            author_id: Some(author_id),
            ..Self::default()
        }
    }

    /// Comics released by one publisher.
    pub fn by_publisher(publisher_id: PublisherId) -> Self {
        Self {
            publisher_id: Some(publisher_id),
            ..Self::default()
        }
    }

    /// Comics filed under one genre.
    pub fn by_genre(genre_id: GenreId) -> Self {
        Self {
            genre_id: Some(genre_id),
            ..Self::default()
        }
    }

    /// Comics released on or after `date`.
    pub fn released_since(date: NaiveDate) -> Self {
        Self {
            released_on_or_after: Some(date),
            ..Self::default()
        }
    }
}

/// Repository interface for comic CRUD operations.
pub trait ComicRepository {
    fn create_comic(&self, comic: &Comic) -> RepoResult<ComicId>;
    /// Replaces every field, including owner references.
    fn update_comic(&self, comic: &Comic) -> RepoResult<()>;
    fn get_comic(&self, id: ComicId) -> RepoResult<Option<Comic>>;
    fn list_comics(&self, query: &ComicListQuery) -> RepoResult<Vec<Comic>>;
    /// Counts comics matching the filters; ordering and paging are ignored.
    fn count_comics(&self, query: &ComicListQuery) -> RepoResult<u64>;
    fn delete_comic(&self, id: ComicId) -> RepoResult<()>;
}

/// SQLite-backed comic repository.
pub struct SqliteComicRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteComicRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(
            conn,
            &[
                ("authors", AUTHOR_COLUMNS),
                ("publishers", PUBLISHER_COLUMNS),
                ("genres", GENRE_COLUMNS),
                ("comics", COMIC_COLUMNS),
            ],
        )?;
        Ok(Self { conn })
    }
}

impl ComicRepository for SqliteComicRepository<'_> {
    fn create_comic(&self, comic: &Comic) -> RepoResult<ComicId> {
        comic.validate()?;

        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        ensure_owners_exist(&tx, comic)?;
        tx.execute(
            "INSERT INTO comics (
                id,
                title,
                author_id,
                publisher_id,
                genre_id,
                release_date
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                comic.id.to_string(),
                comic.title.as_str(),
                comic.author_id.to_string(),
                comic.publisher_id.to_string(),
                comic.genre_id.to_string(),
                comic.release_date,
            ],
        )?;
        tx.commit()?;

        Ok(comic.id)
    }

    fn update_comic(&self, comic: &Comic) -> RepoResult<()> {
        comic.validate()?;

        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        if !row_exists(&tx, EntityKind::Comic, comic.id.as_uuid())? {
            return Err(RepoError::NotFound {
                entity: EntityKind::Comic,
                id: comic.id.as_uuid(),
            });
        }
        ensure_owners_exist(&tx, comic)?;
        tx.execute(
            "UPDATE comics
             SET
                title = ?1,
                author_id = ?2,
                publisher_id = ?3,
                genre_id = ?4,
                release_date = ?5
             WHERE id = ?6;",
            params![
                comic.title.as_str(),
                comic.author_id.to_string(),
                comic.publisher_id.to_string(),
                comic.genre_id.to_string(),
                comic.release_date,
                comic.id.to_string(),
            ],
        )?;
        tx.commit()?;

        Ok(())
    }

    fn get_comic(&self, id: ComicId) -> RepoResult<Option<Comic>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{COMIC_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_comic_row(row)?));
        }

        Ok(None)
    }

    fn list_comics(&self, query: &ComicListQuery) -> RepoResult<Vec<Comic>> {
        let mut sql = format!("{COMIC_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values = push_filters(&mut sql, query);

        sql.push_str(query.order.unwrap_or_default().order_by_sql());
        push_pagination(&mut sql, &mut bind_values, query.page);

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut comics = Vec::new();
        while let Some(row) = rows.next()? {
            comics.push(parse_comic_row(row)?);
        }

        Ok(comics)
    }

    fn count_comics(&self, query: &ComicListQuery) -> RepoResult<u64> {
        let mut sql = String::from("SELECT COUNT(*) FROM comics WHERE 1 = 1");
        let bind_values = push_filters(&mut sql, query);

        let count: i64 = self
            .conn
            .query_row(&sql, params_from_iter(bind_values), |row| row.get(0))?;
        u64::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative comic count `{count}`")))
    }

    fn delete_comic(&self, id: ComicId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM comics WHERE id = ?1;", [id.to_string()])?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: EntityKind::Comic,
                id: id.as_uuid(),
            });
        }

        Ok(())
    }
}

fn push_filters(sql: &mut String, query: &ComicListQuery) -> Vec<Value> {
    let mut bind_values = Vec::new();
    if let Some(author_id) = query.author_id {
        sql.push_str(" AND author_id = ?");
        bind_values.push(Value::Text(author_id.to_string()));
    }
    if let Some(publisher_id) = query.publisher_id {
        sql.push_str(" AND publisher_id = ?");
        bind_values.push(Value::Text(publisher_id.to_string()));
    }
    if let Some(genre_id) = query.genre_id {
        sql.push_str(" AND genre_id = ?");
        bind_values.push(Value::Text(genre_id.to_string()));
    }
    // Stored dates are four-digit ISO text, so text comparison is date comparison.
    if let Some(since) = query.released_on_or_after {
        sql.push_str(" AND release_date >= ?");
        bind_values.push(Value::Text(since.format(RELEASE_DATE_FORMAT).to_string()));
    }
    if let Some(before) = query.released_before {
        sql.push_str(" AND release_date < ?");
        bind_values.push(Value::Text(before.format(RELEASE_DATE_FORMAT).to_string()));
    }
    bind_values
}

fn ensure_owners_exist(conn: &Connection, comic: &Comic) -> RepoResult<()> {
    let owners = [
        (EntityKind::Author, comic.author_id.as_uuid()),
        (EntityKind::Publisher, comic.publisher_id.as_uuid()),
        (EntityKind::Genre, comic.genre_id.as_uuid()),
    ];
    for (entity, id) in owners {
        if !row_exists(conn, entity, id)? {
            return Err(RepoError::MissingReference { entity, id });
        }
    }
    Ok(())
}

fn parse_comic_row(row: &Row<'_>) -> RepoResult<Comic> {
    let id_text: String = row.get("id")?;
    let author_text: String = row.get("author_id")?;
    let publisher_text: String = row.get("publisher_id")?;
    let genre_text: String = row.get("genre_id")?;
    let date_text: String = row.get("release_date")?;
    let release_date = parse_release_date(&date_text).map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid release date `{date_text}` in comics.release_date"
        ))
    })?;

    let comic = Comic {
        id: parse_id(&id_text, "comics.id")?,
        title: row.get("title")?,
        author_id: parse_id(&author_text, "comics.author_id")?,
        publisher_id: parse_id(&publisher_text, "comics.publisher_id")?,
        genre_id: parse_id(&genre_text, "comics.genre_id")?,
        release_date,
    };
    comic.validate()?;
    Ok(comic)
}
