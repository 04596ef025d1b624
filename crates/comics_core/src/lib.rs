//! Core persistence layer for the comics catalog.
//! Authors, publishers and genres own comics; deleting an owner deletes its comics.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::author::Author;
pub use model::comic::Comic;
pub use model::genre::Genre;
pub use model::publisher::Publisher;
pub use model::validation::{parse_release_date, ValidationError};
pub use model::{AuthorId, ComicId, EntityKind, GenreId, PublisherId};
pub use repo::author_repo::{AuthorRepository, SqliteAuthorRepository};
pub use repo::comic_repo::{ComicListQuery, ComicOrder, ComicRepository, SqliteComicRepository};
pub use repo::genre_repo::{GenreRepository, SqliteGenreRepository};
pub use repo::publisher_repo::{PublisherRepository, SqlitePublisherRepository};
pub use repo::{DeleteOutcome, PageQuery, RepoError, RepoResult};
pub use service::comic_service::{ComicService, NewComic, RECENT_RELEASE_YEARS};
pub use service::owner_service::{AuthorService, GenreService, PublisherService};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
