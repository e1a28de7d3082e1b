//! Student record.

use super::{
    normalize_optional, optional_text, require_text, RecordId, ValidationError, NAME_MAX_CHARS,
};
use serde::{Deserialize, Serialize};

/// Maximum length of the school-issued student number.
pub const STUDENT_ID_MAX_CHARS: usize = 15;

/// Student enrolled in exactly one program.
///
/// `student_id` is the school-issued number and is unique across students;
/// it is unrelated to the storage `RecordId`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub student_id: String,
    pub lastname: String,
    pub firstname: String,
    pub middlename: Option<String>,
    pub program_id: RecordId,
}

impl Student {
    pub fn new(
        student_id: impl Into<String>,
        lastname: impl Into<String>,
        firstname: impl Into<String>,
        program_id: RecordId,
    ) -> Self {
        Self {
            student_id: student_id.into().trim().to_string(),
            lastname: lastname.into().trim().to_string(),
            firstname: firstname.into().trim().to_string(),
            middlename: None,
            program_id,
        }
    }

    pub fn with_middlename(mut self, middlename: impl Into<String>) -> Self {
        self.middlename = normalize_optional(Some(middlename.into()));
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("student_id", &self.student_id, STUDENT_ID_MAX_CHARS)?;
        require_text("lastname", &self.lastname, NAME_MAX_CHARS)?;
        require_text("firstname", &self.firstname, NAME_MAX_CHARS)?;
        optional_text("middlename", self.middlename.as_deref(), NAME_MAX_CHARS)
    }
}
