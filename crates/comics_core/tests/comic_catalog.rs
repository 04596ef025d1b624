use chrono::NaiveDate;
use comics_core::db::open_db_in_memory;
use comics_core::{
    Author, AuthorId, AuthorService, Comic, ComicListQuery, ComicOrder, ComicRepository,
    ComicService, EntityKind, Genre, GenreId, GenreService, NewComic, PageQuery, Publisher,
    PublisherId, PublisherService, RepoError, SqliteAuthorRepository, SqliteComicRepository,
    SqliteGenreRepository, SqlitePublisherRepository, ValidationError, RECENT_RELEASE_YEARS,
};
use rusqlite::Connection;

struct Owners {
    author: Author,
    publisher: Publisher,
    genre: Genre,
}

fn date(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap()
}

fn seed_owners(conn: &Connection, author: &str, publisher: &str, genre: &str) -> Owners {
    let authors = AuthorService::new(SqliteAuthorRepository::try_new(conn).unwrap());
    let publishers = PublisherService::new(SqlitePublisherRepository::try_new(conn).unwrap());
    let genres = GenreService::new(SqliteGenreRepository::try_new(conn).unwrap());
    Owners {
        author: authors.create_author(author, "bio").unwrap(),
        publisher: publishers.create_publisher(publisher, "address").unwrap(),
        genre: genres.create_genre(genre, "description").unwrap(),
    }
}

fn new_comic(owners: &Owners, title: &str, release_date: &str) -> NewComic {
    NewComic::parse(
        title,
        owners.author.id,
        owners.publisher.id,
        owners.genre.id,
        release_date,
    )
    .unwrap()
}

fn titles(comics: &[Comic]) -> Vec<&str> {
    comics.iter().map(|comic| comic.title.as_str()).collect()
}

#[test]
fn spider_man_lifecycle_follows_its_author() {
    let conn = open_db_in_memory().unwrap();
    let authors = AuthorService::new(SqliteAuthorRepository::try_new(&conn).unwrap());
    let publishers = PublisherService::new(SqlitePublisherRepository::try_new(&conn).unwrap());
    let genres = GenreService::new(SqliteGenreRepository::try_new(&conn).unwrap());
    let comics = ComicService::new(SqliteComicRepository::try_new(&conn).unwrap());

    let stan = authors.create_author("Stan Lee", "Writer").unwrap();
    let marvel = publishers
        .create_publisher("Marvel", "135 W 50th St")
        .unwrap();
    let superhero = genres.create_genre("Superhero", "Capes").unwrap();
    let request = NewComic::parse("Spider-Man #1", stan.id, marvel.id, superhero.id, "1963-03-01")
        .unwrap();
    let created = comics.create_comic(&request).unwrap();
    assert_eq!(created.release_date, date("1963-03-01"));

    let listed = comics.list_catalog().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].to_string(), "Spider-Man #1");

    let outcome = authors.delete_author(stan.id).unwrap();
    assert_eq!(outcome.cascaded_comics, 1);
    assert!(comics.list_catalog().unwrap().is_empty());
    assert!(comics.get_comic(created.id).unwrap().is_none());

    assert!(publishers.get_publisher(marvel.id).unwrap().is_some());
    assert!(genres.get_genre(superhero.id).unwrap().is_some());
}

#[test]
fn default_listing_is_newest_release_first() {
    let conn = open_db_in_memory().unwrap();
    let owners = seed_owners(&conn, "Author", "Publisher", "Genre");
    let comics = ComicService::new(SqliteComicRepository::try_new(&conn).unwrap());

    comics
        .create_comic(&new_comic(&owners, "Older", "2020-01-01"))
        .unwrap();
    comics
        .create_comic(&new_comic(&owners, "Newer", "2021-01-01"))
        .unwrap();
    comics
        .create_comic(&new_comic(&owners, "Middle", "2020-06-15"))
        .unwrap();

    let listed = comics.list_catalog().unwrap();
    assert_eq!(titles(&listed), vec!["Newer", "Middle", "Older"]);

    let explicit_default = comics
        .list_comics(&ComicListQuery {
            order: Some(ComicOrder::ReleaseDateDesc),
            ..ComicListQuery::default()
        })
        .unwrap();
    assert_eq!(explicit_default, listed);
}

#[test]
fn explicit_orders_and_pagination_apply() {
    let conn = open_db_in_memory().unwrap();
    let owners = seed_owners(&conn, "Author", "Publisher", "Genre");
    let comics = ComicService::new(SqliteComicRepository::try_new(&conn).unwrap());
    for (title, released) in [
        ("b-side", "1999-09-09"),
        ("Alpha", "2005-05-05"),
        ("Charlie", "1980-01-01"),
    ] {
        comics
            .create_comic(&new_comic(&owners, title, released))
            .unwrap();
    }

    let oldest_first = comics
        .list_comics(&ComicListQuery {
            order: Some(ComicOrder::ReleaseDateAsc),
            ..ComicListQuery::default()
        })
        .unwrap();
    assert_eq!(titles(&oldest_first), vec!["Charlie", "b-side", "Alpha"]);

    let by_title = comics
        .list_comics(&ComicListQuery {
            order: Some(ComicOrder::TitleAsc),
            ..ComicListQuery::default()
        })
        .unwrap();
    assert_eq!(titles(&by_title), vec!["Alpha", "b-side", "Charlie"]);

    let second_page = comics
        .list_comics(&ComicListQuery {
            page: PageQuery {
                limit: Some(1),
                offset: 1,
            },
            ..ComicListQuery::default()
        })
        .unwrap();
    assert_eq!(titles(&second_page), vec!["b-side"]);
}

#[test]
fn create_with_missing_reference_fails_and_writes_nothing() {
    let conn = open_db_in_memory().unwrap();
    let owners = seed_owners(&conn, "Author", "Publisher", "Genre");
    let repo = SqliteComicRepository::try_new(&conn).unwrap();

    let missing_genre = GenreId::new_v4();
    let comic = Comic::new(
        "Orphan",
        owners.author.id,
        owners.publisher.id,
        missing_genre,
        date("2001-01-01"),
    )
    .unwrap();
    let err = repo.create_comic(&comic).unwrap_err();
    assert!(matches!(
        err,
        RepoError::MissingReference { entity: EntityKind::Genre, id } if id == missing_genre.as_uuid()
    ));

    let missing_author = AuthorId::new_v4();
    let comic = Comic::new(
        "Orphan",
        missing_author,
        PublisherId::new_v4(),
        owners.genre.id,
        date("2001-01-01"),
    )
    .unwrap();
    let err = repo.create_comic(&comic).unwrap_err();
    assert!(matches!(
        err,
        RepoError::MissingReference {
            entity: EntityKind::Author,
            ..
        }
    ));

    assert_eq!(repo.count_comics(&ComicListQuery::default()).unwrap(), 0);
}

#[test]
fn update_can_reassign_references() {
    let conn = open_db_in_memory().unwrap();
    let marvel = seed_owners(&conn, "Stan Lee", "Marvel", "Superhero");
    let dc = seed_owners(&conn, "Alan Moore", "DC", "Mystery");
    let comics = ComicService::new(SqliteComicRepository::try_new(&conn).unwrap());

    let mut comic = comics
        .create_comic(&new_comic(&marvel, "Crossover", "1976-01-01"))
        .unwrap();
    comic.publisher_id = dc.publisher.id;
    comic.genre_id = dc.genre.id;
    comic.title = "Crossover #2".to_string();
    comics.update_comic(&comic).unwrap();

    let loaded = comics.get_comic(comic.id).unwrap().unwrap();
    assert_eq!(loaded, comic);
    assert_eq!(loaded.author_id, marvel.author.id);
    assert!(comics.comics_by_publisher(marvel.publisher.id).unwrap().is_empty());
    assert_eq!(comics.comics_by_publisher(dc.publisher.id).unwrap().len(), 1);
}

#[test]
fn update_rejects_missing_reference_and_keeps_row() {
    let conn = open_db_in_memory().unwrap();
    let owners = seed_owners(&conn, "Author", "Publisher", "Genre");
    let comics = ComicService::new(SqliteComicRepository::try_new(&conn).unwrap());

    let mut comic = comics
        .create_comic(&new_comic(&owners, "Stable", "2010-10-10"))
        .unwrap();
    comic.author_id = AuthorId::new_v4();
    let err = comics.update_comic(&comic).unwrap_err();
    assert!(matches!(
        err,
        RepoError::MissingReference {
            entity: EntityKind::Author,
            ..
        }
    ));

    let stored = comics.get_comic(comic.id).unwrap().unwrap();
    assert_eq!(stored.author_id, owners.author.id);
}

#[test]
fn update_or_delete_unknown_comic_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let owners = seed_owners(&conn, "Author", "Publisher", "Genre");
    let comics = ComicService::new(SqliteComicRepository::try_new(&conn).unwrap());

    let never_stored = Comic::new(
        "Ghost",
        owners.author.id,
        owners.publisher.id,
        owners.genre.id,
        date("2000-01-01"),
    )
    .unwrap();
    assert!(matches!(
        comics.update_comic(&never_stored),
        Err(RepoError::NotFound {
            entity: EntityKind::Comic,
            ..
        })
    ));
    assert!(matches!(
        comics.delete_comic(never_stored.id),
        Err(RepoError::NotFound {
            entity: EntityKind::Comic,
            ..
        })
    ));
}

#[test]
fn deleting_a_comic_leaves_its_owners() {
    let conn = open_db_in_memory().unwrap();
    let owners = seed_owners(&conn, "Author", "Publisher", "Genre");
    let comics = ComicService::new(SqliteComicRepository::try_new(&conn).unwrap());
    let authors = AuthorService::new(SqliteAuthorRepository::try_new(&conn).unwrap());

    let comic = comics
        .create_comic(&new_comic(&owners, "Short-lived", "2015-01-01"))
        .unwrap();
    comics.delete_comic(comic.id).unwrap();

    assert!(comics.get_comic(comic.id).unwrap().is_none());
    assert!(authors.get_author(owners.author.id).unwrap().is_some());
}

#[test]
fn deleting_publisher_or_genre_cascades_only_their_comics() {
    let conn = open_db_in_memory().unwrap();
    let first = seed_owners(&conn, "A1", "P1", "G1");
    let second = seed_owners(&conn, "A2", "P2", "G2");
    let comics = ComicService::new(SqliteComicRepository::try_new(&conn).unwrap());
    let publishers = PublisherService::new(SqlitePublisherRepository::try_new(&conn).unwrap());
    let genres = GenreService::new(SqliteGenreRepository::try_new(&conn).unwrap());

    for n in 0..3 {
        comics
            .create_comic(&new_comic(&first, &format!("first {n}"), "2000-01-01"))
            .unwrap();
    }
    for n in 0..2 {
        comics
            .create_comic(&new_comic(&second, &format!("second {n}"), "2000-01-01"))
            .unwrap();
    }

    let outcome = publishers.delete_publisher(first.publisher.id).unwrap();
    assert_eq!(outcome.cascaded_comics, 3);
    assert_eq!(comics.count_comics(&ComicListQuery::default()).unwrap(), 2);

    let outcome = genres.delete_genre(second.genre.id).unwrap();
    assert_eq!(outcome.cascaded_comics, 2);
    assert!(comics.list_catalog().unwrap().is_empty());

    let outcome = genres.delete_genre(first.genre.id).unwrap();
    assert_eq!(outcome.cascaded_comics, 0);
}

#[test]
fn reverse_lookups_filter_by_owner() {
    let conn = open_db_in_memory().unwrap();
    let first = seed_owners(&conn, "A1", "P1", "G1");
    let second = seed_owners(&conn, "A2", "P2", "G2");
    let comics = ComicService::new(SqliteComicRepository::try_new(&conn).unwrap());

    comics
        .create_comic(&new_comic(&first, "one", "2001-01-01"))
        .unwrap();
    comics
        .create_comic(&new_comic(&first, "two", "2002-01-01"))
        .unwrap();
    comics
        .create_comic(&new_comic(&second, "three", "2003-01-01"))
        .unwrap();

    let by_author = comics.comics_by_author(first.author.id).unwrap();
    assert_eq!(titles(&by_author), vec!["two", "one"]);
    assert_eq!(comics.comics_by_genre(second.genre.id).unwrap().len(), 1);
    assert_eq!(
        comics
            .count_comics(&ComicListQuery::by_author(second.author.id))
            .unwrap(),
        1
    );

    let mixed = ComicListQuery {
        author_id: Some(first.author.id),
        genre_id: Some(second.genre.id),
        ..ComicListQuery::default()
    };
    assert!(comics.list_comics(&mixed).unwrap().is_empty());
}

#[test]
fn textual_release_dates_are_validated() {
    let err = NewComic::parse(
        "Bad date",
        AuthorId::new_v4(),
        PublisherId::new_v4(),
        GenreId::new_v4(),
        "March 1963",
    )
    .unwrap_err();
    assert_eq!(
        err,
        ValidationError::InvalidDate {
            value: "March 1963".to_string()
        }
    );
}

#[test]
fn service_rejects_blank_title_before_reference_checks() {
    let conn = open_db_in_memory().unwrap();
    let comics = ComicService::new(SqliteComicRepository::try_new(&conn).unwrap());

    let request = NewComic {
        title: " ".to_string(),
        author_id: AuthorId::new_v4(),
        publisher_id: PublisherId::new_v4(),
        genre_id: GenreId::new_v4(),
        release_date: date("2000-01-01"),
    };
    let err = comics.create_comic(&request).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ValidationError::MissingField {
            entity: EntityKind::Comic,
            field: "title"
        })
    ));
}

#[test]
fn corrupted_release_date_is_reported_as_invalid_data() {
    let conn = open_db_in_memory().unwrap();
    let owners = seed_owners(&conn, "Author", "Publisher", "Genre");
    let comics = ComicService::new(SqliteComicRepository::try_new(&conn).unwrap());
    let comic = comics
        .create_comic(&new_comic(&owners, "Dated", "2000-01-01"))
        .unwrap();

    conn.execute(
        "UPDATE comics SET release_date = '2000-01-01 12:00:00' WHERE id = ?1;",
        [comic.id.to_string()],
    )
    .unwrap();

    assert!(matches!(
        comics.get_comic(comic.id),
        Err(RepoError::InvalidData(_))
    ));
}

#[test]
fn release_window_filters_and_counts_by_date() {
    let conn = open_db_in_memory().unwrap();
    let owners = seed_owners(&conn, "Author", "Publisher", "Genre");
    let comics = ComicService::new(SqliteComicRepository::try_new(&conn).unwrap());
    for (title, released) in [
        ("Golden", "1963-03-01"),
        ("Boundary", "2015-06-01"),
        ("Modern", "2020-01-01"),
        ("Latest", "2024-12-31"),
    ] {
        comics
            .create_comic(&new_comic(&owners, title, released))
            .unwrap();
    }

    let window = ComicListQuery {
        released_on_or_after: Some(date("2015-06-01")),
        released_before: Some(date("2024-12-31")),
        ..ComicListQuery::default()
    };
    assert_eq!(
        titles(&comics.list_comics(&window).unwrap()),
        vec!["Modern", "Boundary"]
    );
    assert_eq!(comics.count_comics(&window).unwrap(), 2);

    let since = ComicListQuery::released_since(date("2020-01-01"));
    assert_eq!(
        titles(&comics.list_comics(&since).unwrap()),
        vec!["Latest", "Modern"]
    );

    let recent = comics.recent_releases(date("2025-06-01")).unwrap();
    assert_eq!(titles(&recent), vec!["Latest", "Modern", "Boundary"]);
    assert_eq!(RECENT_RELEASE_YEARS, 10);
}

#[test]
fn release_years_outside_four_digits_are_rejected_before_storage() {
    let conn = open_db_in_memory().unwrap();
    let owners = seed_owners(&conn, "Author", "Publisher", "Genre");
    let comics = ComicService::new(SqliteComicRepository::try_new(&conn).unwrap());

    for (year, month, day) in [(10000, 1, 1), (0, 1, 1), (-5, 1, 1), (-100, 1, 1)] {
        let release_date = NaiveDate::from_ymd_opt(year, month, day).unwrap();
        let request = NewComic {
            title: format!("y{year}"),
            author_id: owners.author.id,
            publisher_id: owners.publisher.id,
            genre_id: owners.genre.id,
            release_date,
        };
        let err = comics.create_comic(&request).unwrap_err();
        assert!(matches!(
            err,
            RepoError::Validation(ValidationError::DateOutOfRange { value }) if value == release_date
        ));
    }
    assert_eq!(comics.count_comics(&ComicListQuery::default()).unwrap(), 0);

    for (title, released) in [("First", "0001-01-01"), ("Last", "9999-12-31")] {
        comics
            .create_comic(&new_comic(&owners, title, released))
            .unwrap();
    }
    assert_eq!(titles(&comics.list_catalog().unwrap()), vec!["Last", "First"]);
}

#[test]
fn update_rejects_out_of_range_release_year() {
    let conn = open_db_in_memory().unwrap();
    let owners = seed_owners(&conn, "Author", "Publisher", "Genre");
    let comics = ComicService::new(SqliteComicRepository::try_new(&conn).unwrap());
    let mut comic = comics
        .create_comic(&new_comic(&owners, "Dated", "2000-01-01"))
        .unwrap();

    comic.release_date = NaiveDate::from_ymd_opt(10000, 1, 1).unwrap();
    let err = comics.update_comic(&comic).unwrap_err();
    assert_eq!(err.code(), "validation_failed");
    assert_eq!(
        comics.get_comic(comic.id).unwrap().unwrap().release_date,
        date("2000-01-01")
    );
}
