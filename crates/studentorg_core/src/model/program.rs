//! Degree program record.

use super::{
    normalize_optional, optional_text, require_text, RecordId, ValidationError,
    DESCRIPTION_MAX_CHARS, NAME_MAX_CHARS,
};
use serde::{Deserialize, Serialize};

/// Degree program owned by exactly one college.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    pub prog_name: String,
    pub description: Option<String>,
    pub college_id: RecordId,
}

impl Program {
    pub fn new(prog_name: impl Into<String>, college_id: RecordId) -> Self {
        Self {
            prog_name: prog_name.into().trim().to_string(),
            description: None,
            college_id,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = normalize_optional(Some(description.into()));
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("prog_name", &self.prog_name, NAME_MAX_CHARS)?;
        optional_text(
            "description",
            self.description.as_deref(),
            DESCRIPTION_MAX_CHARS,
        )
    }
}
