//! College record.

use super::{require_text, ValidationError, NAME_MAX_CHARS};
use serde::{Deserialize, Serialize};

/// Academic college; owns programs and, optionally, organizations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct College {
    pub college_name: String,
}

impl College {
    pub fn new(college_name: impl Into<String>) -> Self {
        Self {
            college_name: college_name.into().trim().to_string(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("college_name", &self.college_name, NAME_MAX_CHARS)
    }
}
