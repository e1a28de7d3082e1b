//! Student organization record.

use super::{
    normalize_optional, optional_text, require_text, RecordId, ValidationError,
    DESCRIPTION_MAX_CHARS, NAME_MAX_CHARS,
};
use serde::{Deserialize, Serialize};

/// Student organization, optionally affiliated with a college.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    pub name: String,
    pub description: Option<String>,
    /// Set to `None` by storage when the owning college is deleted.
    pub college_id: Option<RecordId>,
}

impl Organization {
    pub fn new(name: impl Into<String>, college_id: Option<RecordId>) -> Self {
        Self {
            name: name.into().trim().to_string(),
            description: None,
            college_id,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = normalize_optional(Some(description.into()));
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("name", &self.name, NAME_MAX_CHARS)?;
        optional_text(
            "description",
            self.description.as_deref(),
            DESCRIPTION_MAX_CHARS,
        )
    }
}
