//! Author, publisher and genre use-case services.
//!
//! The three owner records share one lifecycle: created and edited
//! independently, and deleting one silently removes its comics.

use crate::model::author::Author;
use crate::model::genre::Genre;
use crate::model::publisher::Publisher;
use crate::model::{AuthorId, GenreId, PublisherId};
use crate::repo::author_repo::AuthorRepository;
use crate::repo::genre_repo::GenreRepository;
use crate::repo::publisher_repo::PublisherRepository;
use crate::repo::{DeleteOutcome, PageQuery, RepoError, RepoResult};
use crate::service::{log_delete_outcome, log_outcome};

/// Use-case service for authors.
pub struct AuthorService<R: AuthorRepository> {
    repo: R,
}

impl<R: AuthorRepository> AuthorService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Validates and persists a new author, returning the stored record.
    pub fn create_author(
        &self,
        name: impl Into<String>,
        bio: impl Into<String>,
    ) -> RepoResult<Author> {
        let result = Author::new(name, bio)
            .map_err(RepoError::from)
            .and_then(|author| self.repo.create_author(&author).map(|_| author));
        log_outcome("author_create", result)
    }

    pub fn update_author(&self, author: &Author) -> RepoResult<()> {
        log_outcome("author_update", self.repo.update_author(author))
    }

    pub fn get_author(&self, id: AuthorId) -> RepoResult<Option<Author>> {
        self.repo.get_author(id)
    }

    pub fn list_authors(&self, page: PageQuery) -> RepoResult<Vec<Author>> {
        self.repo.list_authors(page)
    }

    /// Deletes an author and, through the cascade, all of their comics.
    pub fn delete_author(&self, id: AuthorId) -> RepoResult<DeleteOutcome> {
        log_delete_outcome("author_delete", "author_id", id, self.repo.delete_author(id))
    }
}

/// Use-case service for publishers.
pub struct PublisherService<R: PublisherRepository> {
    repo: R,
}

impl<R: PublisherRepository> PublisherService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn create_publisher(
        &self,
        name: impl Into<String>,
        address: impl Into<String>,
    ) -> RepoResult<Publisher> {
        let result = Publisher::new(name, address)
            .map_err(RepoError::from)
            .and_then(|publisher| {
                self.repo
                    .create_publisher(&publisher)
                    .map(|_| publisher)
            });
        log_outcome("publisher_create", result)
    }

    pub fn update_publisher(&self, publisher: &Publisher) -> RepoResult<()> {
        log_outcome("publisher_update", self.repo.update_publisher(publisher))
    }

    pub fn get_publisher(&self, id: PublisherId) -> RepoResult<Option<Publisher>> {
        self.repo.get_publisher(id)
    }

    pub fn list_publishers(&self, page: PageQuery) -> RepoResult<Vec<Publisher>> {
        self.repo.list_publishers(page)
    }

    pub fn delete_publisher(&self, id: PublisherId) -> RepoResult<DeleteOutcome> {
        log_delete_outcome(
            "publisher_delete",
            "publisher_id",
            id,
            self.repo.delete_publisher(id),
        )
    }
}

/// Use-case service for genres.
pub struct GenreService<R: GenreRepository> {
    repo: R,
}

impl<R: GenreRepository> GenreService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn create_genre(
        &self,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> RepoResult<Genre> {
        let result = Genre::new(name, description)
            .map_err(RepoError::from)
            .and_then(|genre| self.repo.create_genre(&genre).map(|_| genre));
        log_outcome("genre_create", result)
    }

    pub fn update_genre(&self, genre: &Genre) -> RepoResult<()> {
        log_outcome("genre_update", self.repo.update_genre(genre))
    }

    pub fn get_genre(&self, id: GenreId) -> RepoResult<Option<Genre>> {
        self.repo.get_genre(id)
    }

    pub fn list_genres(&self, page: PageQuery) -> RepoResult<Vec<Genre>> {
        self.repo.list_genres(page)
    }

    pub fn delete_genre(&self, id: GenreId) -> RepoResult<DeleteOutcome> {
        log_delete_outcome("genre_delete", "genre_id", id, self.repo.delete_genre(id))
    }
}
