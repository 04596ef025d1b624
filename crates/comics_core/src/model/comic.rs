//! Comic record.
//!
//! # Responsibility
//! - Hold one issue/volume with its three required owner references.
//!
//! # Invariants
//! - `title` is non-blank and at most 200 characters.
//! - `author_id`, `publisher_id` and `genre_id` are never nil. Whether they
//!   point at existing rows is enforced by the repository/storage layer.
//! - `release_date` falls in years 1 through 9999 so its ISO text sorts by date.
//! - Default catalog order is `release_date` descending.

use crate::model::validation::{
    require_release_year, require_short_text, ValidationError, TITLE_MAX_CHARS,
};
use crate::model::{AuthorId, ComicId, EntityKind, GenreId, PublisherId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// A comic book and the author/publisher/genre it depends on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comic {
    pub id: ComicId,
    pub title: String,
    pub author_id: AuthorId,
    pub publisher_id: PublisherId,
    pub genre_id: GenreId,
    /// Calendar date without time component, serialized as `YYYY-MM-DD`.
    pub release_date: NaiveDate,
}

impl Comic {
    /// Creates a validated comic with a generated id.
    pub fn new(
        title: impl Into<String>,
        author_id: AuthorId,
        publisher_id: PublisherId,
        genre_id: GenreId,
        release_date: NaiveDate,
    ) -> Result<Self, ValidationError> {
        Self::with_id(
            ComicId::new_v4(),
            title,
            author_id,
            publisher_id,
            genre_id,
            release_date,
        )
    }

    /// Creates a validated comic with a caller-provided id.
    pub fn with_id(
        id: ComicId,
        title: impl Into<String>,
        author_id: AuthorId,
        publisher_id: PublisherId,
        genre_id: GenreId,
        release_date: NaiveDate,
    ) -> Result<Self, ValidationError> {
        let comic = Self {
            id,
            title: title.into(),
            author_id,
            publisher_id,
            genre_id,
            release_date,
        };
        comic.validate()?;
        Ok(comic)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let ids = [
            (self.id.is_nil(), EntityKind::Comic),
            (self.author_id.is_nil(), EntityKind::Author),
            (self.publisher_id.is_nil(), EntityKind::Publisher),
            (self.genre_id.is_nil(), EntityKind::Genre),
        ];
        if let Some((_, entity)) = ids.into_iter().find(|(nil, _)| *nil) {
            return Err(ValidationError::NilId { entity });
        }
        require_short_text(EntityKind::Comic, "title", &self.title, TITLE_MAX_CHARS)?;
        require_release_year(self.release_date)
    }
}

impl Display for Comic {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)
    }
}
