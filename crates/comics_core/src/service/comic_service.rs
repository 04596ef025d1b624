//! Comic use-case service.
//!
//! # Responsibility
//! - Create comics from request models, including textual release dates.
//! - Expose catalog listings with the default newest-first order and
//!   reverse lookups by author, publisher or genre.
//! - Answer the "recent releases" window relative to a caller-supplied day.

use crate::model::comic::Comic;
use crate::model::validation::{parse_release_date, ValidationError};
use crate::model::{AuthorId, ComicId, GenreId, PublisherId};
use crate::repo::comic_repo::{ComicListQuery, ComicRepository};
use crate::repo::{RepoError, RepoResult};
use crate::service::log_outcome;
use chrono::{Months, NaiveDate};

/// Width of the recent-releases window.
pub const RECENT_RELEASE_YEARS: u32 = 10;

/// Request model for creating a comic under existing owners.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComic {
    pub title: String,
    pub author_id: AuthorId,
    pub publisher_id: PublisherId,
    pub genre_id: GenreId,
    pub release_date: NaiveDate,
}

impl NewComic {
    /// Builds a request from a `YYYY-MM-DD` release date string.
    pub fn parse(
        title: impl Into<String>,
        author_id: AuthorId,
        publisher_id: PublisherId,
        genre_id: GenreId,
        release_date: &str,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            title: title.into(),
            author_id,
            publisher_id,
            genre_id,
            release_date: parse_release_date(release_date)?,
        })
    }
}

/// Use-case service wrapper for comic operations.
pub struct ComicService<R: ComicRepository> {
    repo: R,
}

impl<R: ComicRepository> ComicService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Validates and persists a new comic, returning the stored record.
    ///
    /// Fails with `RepoError::MissingReference` when any owner is absent.
    pub fn create_comic(&self, request: &NewComic) -> RepoResult<Comic> {
        let result = Comic::new(
            request.title.clone(),
            request.author_id,
            request.publisher_id,
            request.genre_id,
            request.release_date,
        )
        .map_err(RepoError::from)
        .and_then(|comic| self.repo.create_comic(&comic).map(|_| comic));
        log_outcome("comic_create", result)
    }

    /// Updates title, date and any owner reference of an existing comic.
    pub fn update_comic(&self, comic: &Comic) -> RepoResult<()> {
        log_outcome("comic_update", self.repo.update_comic(comic))
    }

    pub fn get_comic(&self, id: ComicId) -> RepoResult<Option<Comic>> {
        self.repo.get_comic(id)
    }

    pub fn list_comics(&self, query: &ComicListQuery) -> RepoResult<Vec<Comic>> {
        self.repo.list_comics(query)
    }

    /// Whole catalog, newest release first.
    pub fn list_catalog(&self) -> RepoResult<Vec<Comic>> {
        self.repo.list_comics(&ComicListQuery::default())
    }

    pub fn comics_by_author(&self, author_id: AuthorId) -> RepoResult<Vec<Comic>> {
        self.repo.list_comics(&ComicListQuery::by_author(author_id))
    }

    pub fn comics_by_publisher(&self, publisher_id: PublisherId) -> RepoResult<Vec<Comic>> {
        self.repo
            .list_comics(&ComicListQuery::by_publisher(publisher_id))
    }

    pub fn comics_by_genre(&self, genre_id: GenreId) -> RepoResult<Vec<Comic>> {
        self.repo.list_comics(&ComicListQuery::by_genre(genre_id))
    }

    /// Comics released within `RECENT_RELEASE_YEARS` of `today`, newest first.
    pub fn recent_releases(&self, today: NaiveDate) -> RepoResult<Vec<Comic>> {
        let since = today
            .checked_sub_months(Months::new(RECENT_RELEASE_YEARS * 12))
            .unwrap_or(NaiveDate::MIN);
        self.repo.list_comics(&ComicListQuery::released_since(since))
    }

    pub fn count_comics(&self, query: &ComicListQuery) -> RepoResult<u64> {
        self.repo.count_comics(query)
    }

    pub fn delete_comic(&self, id: ComicId) -> RepoResult<()> {
        log_outcome("comic_delete", self.repo.delete_comic(id))
    }
}
