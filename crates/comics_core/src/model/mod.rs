//! Catalog domain model for comics and the records they depend on.
//!
//! # Responsibility
//! - Define canonical data structures used by repositories and services.
//! - Own field-level validation (presence, maximum length, date shape).
//!
//! # Invariants
//! - Every record is identified by a stable, non-nil id newtype.
//! - A `Comic` always names exactly one author, publisher and genre.
//! - Textual representation (`Display`) of every record is its name/title.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

pub mod author;
pub mod comic;
pub mod genre;
pub mod publisher;
pub mod validation;

/// Generates a strongly typed UUID identifier for one entity table.
macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            serde::Serialize,
            serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(uuid::Uuid);

        impl $name {
            /// Generates a fresh random identifier.
            pub fn new_v4() -> Self {
                Self(uuid::Uuid::new_v4())
            }

            /// Wraps an existing UUID, e.g. one read back from storage.
            pub const fn from_uuid(value: uuid::Uuid) -> Self {
                Self(value)
            }

            pub const fn as_uuid(&self) -> uuid::Uuid {
                self.0
            }

            pub fn is_nil(&self) -> bool {
                self.0.is_nil()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                std::fmt::Display::fmt(&self.0, f)
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                uuid::Uuid::parse_str(value).map(Self)
            }
        }

        impl From<uuid::Uuid> for $name {
            fn from(value: uuid::Uuid) -> Self {
                Self(value)
            }
        }
    };
}

entity_id!(
    /// Stable identifier of an [`author::Author`].
    AuthorId
);
entity_id!(
    /// Stable identifier of a [`publisher::Publisher`].
    PublisherId
);
entity_id!(
    /// Stable identifier of a [`genre::Genre`].
    GenreId
);
entity_id!(
    /// Stable identifier of a [`comic::Comic`].
    ComicId
);

/// The four persisted record types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Author,
    Publisher,
    Genre,
    Comic,
}

impl EntityKind {
    /// Backing table name.
    pub fn table(self) -> &'static str {
        match self {
            Self::Author => "authors",
            Self::Publisher => "publishers",
            Self::Genre => "genres",
            Self::Comic => "comics",
        }
    }

    /// Human-readable singular label.
    pub fn verbose_name(self) -> &'static str {
        match self {
            Self::Author => "Author",
            Self::Publisher => "Publisher",
            Self::Genre => "Genre",
            Self::Comic => "Comic",
        }
    }

    /// Human-readable plural label.
    pub fn verbose_name_plural(self) -> &'static str {
        match self {
            Self::Author => "Authors",
            Self::Publisher => "Publishers",
            Self::Genre => "Genres",
            Self::Comic => "Comics",
        }
    }
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Author => "author",
            Self::Publisher => "publisher",
            Self::Genre => "genre",
            Self::Comic => "comic",
        })
    }
}
