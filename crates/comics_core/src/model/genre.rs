//! Genre record.

use crate::model::validation::{require_short_text, require_text, ValidationError, NAME_MAX_CHARS};
use crate::model::{EntityKind, GenreId};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Category a comic belongs to, e.g. "Superhero".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: GenreId,
    pub name: String,
    pub description: String,
}

impl Genre {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Self::with_id(GenreId::new_v4(), name, description)
    }

    pub fn with_id(
        id: GenreId,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let genre = Self {
            id,
            name: name.into(),
            description: description.into(),
        };
        genre.validate()?;
        Ok(genre)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id.is_nil() {
            return Err(ValidationError::NilId {
                entity: EntityKind::Genre,
            });
        }
        require_short_text(EntityKind::Genre, "name", &self.name, NAME_MAX_CHARS)?;
        require_text(EntityKind::Genre, "description", &self.description)
    }
}

impl Display for Genre {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
