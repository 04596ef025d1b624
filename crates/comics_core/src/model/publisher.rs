//! Publisher record.
//!
//! # Invariants
//! - `name` is non-blank and at most 100 characters.
//! - `address` is non-blank free text.

use crate::model::validation::{require_short_text, require_text, ValidationError, NAME_MAX_CHARS};
use crate::model::{EntityKind, PublisherId};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Company that publishes comics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Publisher {
    pub id: PublisherId,
    pub name: String,
    pub address: String,
}

impl Publisher {
    pub fn new(
        name: impl Into<String>,
        address: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Self::with_id(PublisherId::new_v4(), name, address)
    }

    pub fn with_id(
        id: PublisherId,
        name: impl Into<String>,
        address: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let publisher = Self {
            id,
            name: name.into(),
            address: address.into(),
        };
        publisher.validate()?;
        Ok(publisher)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id.is_nil() {
            return Err(ValidationError::NilId {
                entity: EntityKind::Publisher,
            });
        }
        require_short_text(EntityKind::Publisher, "name", &self.name, NAME_MAX_CHARS)?;
        require_text(EntityKind::Publisher, "address", &self.address)
    }
}

impl Display for Publisher {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
