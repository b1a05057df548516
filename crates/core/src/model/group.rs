use serde::{Deserialize, Serialize};

use crate::fields::group;
use crate::model::Record;

/// A catalog group. Items point at a group by `id`; the link is weak and may
/// dangle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Group {
    id: String,
    name: String,
    description: String,
}

impl Group {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into().trim().to_owned(),
            name: name.into().trim().to_owned(),
            description: description.into().trim().to_owned(),
        }
    }

    /// Extract a group from a normalized record using the group header
    /// synonyms. Missing fields become empty strings.
    #[must_use]
    pub fn from_record(record: &Record) -> Self {
        Self::new(
            group::ID.resolve_or(record, ""),
            group::NAME.resolve_or(record, ""),
            group::DESCRIPTION.resolve_or(record, ""),
        )
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }
}
