//! Author record.
//!
//! # Invariants
//! - `name` is non-blank and at most 100 characters.
//! - `bio` is non-blank.
//! - Duplicate names are allowed; identity is `id` only.

use crate::model::validation::{require_short_text, require_text, ValidationError, NAME_MAX_CHARS};
use crate::model::{AuthorId, EntityKind};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Person credited as the author of comics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: AuthorId,
    pub name: String,
    pub bio: String,
}

impl Author {
    /// Creates a validated author with a generated id.
    pub fn new(name: impl Into<String>, bio: impl Into<String>) -> Result<Self, ValidationError> {
        Self::with_id(AuthorId::new_v4(), name, bio)
    }

    /// Creates a validated author with a caller-provided id.
    pub fn with_id(
        id: AuthorId,
        name: impl Into<String>,
        bio: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let author = Self {
            id,
            name: name.into(),
            bio: bio.into(),
        };
        author.validate()?;
        Ok(author)
    }

    /// Re-checks field constraints, e.g. after public fields were mutated.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id.is_nil() {
            return Err(ValidationError::NilId {
                entity: EntityKind::Author,
            });
        }
        require_short_text(EntityKind::Author, "name", &self.name, NAME_MAX_CHARS)?;
        require_text(EntityKind::Author, "bio", &self.bio)
    }
}

impl Display for Author {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
