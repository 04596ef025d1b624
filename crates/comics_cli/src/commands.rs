//! Subcommand implementations over the core services.

use comics_core::{
    AuthorId, AuthorService, ComicListQuery, ComicService, GenreService, NewComic,
    PublisherService, SqliteAuthorRepository, SqliteComicRepository, SqliteGenreRepository,
    SqlitePublisherRepository,
};
use chrono::NaiveDate;
use rusqlite::Connection;

type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Seeds one author, publisher and genre with a single comic.
pub fn seed_demo(conn: &Connection) -> CommandResult {
    let authors = AuthorService::new(SqliteAuthorRepository::try_new(conn)?);
    let publishers = PublisherService::new(SqlitePublisherRepository::try_new(conn)?);
    let genres = GenreService::new(SqliteGenreRepository::try_new(conn)?);
    let comics = ComicService::new(SqliteComicRepository::try_new(conn)?);

    let author = authors.create_author("Stan Lee", "Writer and editor at Marvel Comics.")?;
    let publisher = publishers.create_publisher("Marvel", "135 W 50th St")?;
    let genre = genres.create_genre("Superhero", "Costumed heroes with extraordinary powers.")?;
    let comic = comics.create_comic(&NewComic::parse(
        "Spider-Man #1",
        author.id,
        publisher.id,
        genre.id,
        "1963-03-01",
    )?)?;

    println!("author {} {}", author.id, author);
    println!("publisher {} {}", publisher.id, publisher);
    println!("genre {} {}", genre.id, genre);
    println!("comic {} {}", comic.id, comic);
    Ok(())
}

/// Prints one line per comic: release date, id and title.
pub fn list(conn: &Connection, query: &ComicListQuery) -> CommandResult {
    let comics = ComicService::new(SqliteComicRepository::try_new(conn)?);
    let items = comics.list_comics(query)?;
    for comic in &items {
        println!("{} {} {}", comic.release_date, comic.id, comic);
    }
    println!("total={}", items.len());
    Ok(())
}

/// Prints comics released within the recent window ending at `today`.
pub fn recent(conn: &Connection, today: NaiveDate) -> CommandResult {
    let comics = ComicService::new(SqliteComicRepository::try_new(conn)?);
    let items = comics.recent_releases(today)?;
    for comic in &items {
        println!("{} {} {}", comic.release_date, comic.id, comic);
    }
    println!("total={}", items.len());
    Ok(())
}

pub fn delete_author(conn: &Connection, id: AuthorId) -> CommandResult {
    let authors = AuthorService::new(SqliteAuthorRepository::try_new(conn)?);
    let outcome = authors.delete_author(id)?;
    println!(
        "deleted author {id} cascaded_comics={}",
        outcome.cascaded_comics
    );
    Ok(())
}
