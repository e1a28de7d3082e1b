//! Domain model for colleges, programs, students, organizations and
//! organization memberships.
//!
//! # Responsibility
//! - Define the record shapes persisted by the repository layer.
//! - Own field-level validation shared by every write path.
//!
//! # Invariants
//! - Every stored record is identified by an insertion-ordered `RecordId`.
//! - Foreign references are plain ids; the database enforces that they resolve.

pub mod college;
pub mod org_member;
pub mod organization;
pub mod program;
pub mod student;

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub use college::College;
pub use org_member::OrgMember;
pub use organization::Organization;
pub use program::Program;
pub use student::Student;

/// Integer primary key assigned by storage in insertion order.
pub type RecordId = i64;

/// Maximum length of name-like text fields.
pub const NAME_MAX_CHARS: usize = 150;
/// Maximum length of free-form description fields.
pub const DESCRIPTION_MAX_CHARS: usize = 250;

/// The five record kinds managed by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    College,
    Program,
    Student,
    Organization,
    OrgMember,
}

impl EntityKind {
    pub const ALL: [EntityKind; 5] = [
        EntityKind::College,
        EntityKind::Program,
        EntityKind::Student,
        EntityKind::Organization,
        EntityKind::OrgMember,
    ];

    /// Stable snake_case name, also used in log events.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::College => "college",
            Self::Program => "program",
            Self::Student => "student",
            Self::Organization => "organization",
            Self::OrgMember => "org_member",
        }
    }

    /// Parses a kind name, ignoring ASCII case and `_`/`-` separators.
    ///
    /// `"OrgMember"`, `"org_member"` and `"org-member"` all resolve to
    /// [`EntityKind::OrgMember`].
    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value
            .trim()
            .chars()
            .filter(|ch| *ch != '_' && *ch != '-')
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "college" => Some(Self::College),
            "program" => Some(Self::Program),
            "student" => Some(Self::Student),
            "organization" => Some(Self::Organization),
            "orgmember" => Some(Self::OrgMember),
            _ => None,
        }
    }
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A record as read back from storage, with identity and timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stored<T> {
    pub id: RecordId,
    /// Unix epoch milliseconds.
    pub created_at: i64,
    /// Unix epoch milliseconds, bumped on every update.
    pub updated_at: i64,
    #[serde(flatten)]
    pub record: T,
}

/// Any stored record, tagged with its kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "entity", rename_all = "snake_case")]
pub enum EntityRecord {
    College(Stored<College>),
    Program(Stored<Program>),
    Student(Stored<Student>),
    Organization(Stored<Organization>),
    OrgMember(Stored<OrgMember>),
}

impl EntityRecord {
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::College(_) => EntityKind::College,
            Self::Program(_) => EntityKind::Program,
            Self::Student(_) => EntityKind::Student,
            Self::Organization(_) => EntityKind::Organization,
            Self::OrgMember(_) => EntityKind::OrgMember,
        }
    }
}

/// Field-level validation failure raised before any write reaches storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Required text is empty after trimming.
    Blank { field: &'static str },
    /// Text exceeds the column's character cap.
    TooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },
    /// Text could not be parsed as a `YYYY-MM-DD` calendar date.
    InvalidDate { field: &'static str, value: String },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Blank { field } => write!(f, "`{field}` must not be blank"),
            Self::TooLong { field, max, actual } => write!(
                f,
                "`{field}` is {actual} characters long; at most {max} allowed"
            ),
            Self::InvalidDate { field, value } => {
                write!(f, "`{field}` must be a YYYY-MM-DD date, got `{value}`")
            }
        }
    }
}

impl Error for ValidationError {}

pub(crate) fn require_text(
    field: &'static str,
    value: &str,
    max: usize,
) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Blank { field });
    }
    check_length(field, value, max)
}

pub(crate) fn optional_text(
    field: &'static str,
    value: Option<&str>,
    max: usize,
) -> Result<(), ValidationError> {
    match value {
        Some(text) => check_length(field, text, max),
        None => Ok(()),
    }
}

fn check_length(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
    let actual = value.chars().count();
    if actual > max {
        return Err(ValidationError::TooLong { field, max, actual });
    }
    Ok(())
}

/// Collapses blank optional text to `None`, trimming the rest.
pub(crate) fn normalize_optional(value: Option<String>) -> Option<String> {
    value.and_then(|text| {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

#[cfg(test)]
mod tests {
    use super::{require_text, EntityKind, ValidationError};

    #[test]
    fn entity_kind_parse_ignores_case_and_separators() {
        assert_eq!(EntityKind::parse("OrgMember"), Some(EntityKind::OrgMember));
        assert_eq!(EntityKind::parse("org-member"), Some(EntityKind::OrgMember));
        assert_eq!(EntityKind::parse(" College "), Some(EntityKind::College));
        assert_eq!(EntityKind::parse("club"), None);
    }

    #[test]
    fn entity_kind_round_trips_through_as_str() {
        for kind in EntityKind::ALL {
            assert_eq!(EntityKind::parse(kind.as_str()), Some(kind));
        }
    }

    #[test]
    fn require_text_counts_chars_not_bytes() {
        assert!(require_text("name", "ñandú", 5).is_ok());
        assert_eq!(
            require_text("name", "ñandú!", 5),
            Err(ValidationError::TooLong {
                field: "name",
                max: 5,
                actual: 6
            })
        );
        assert_eq!(
            require_text("name", "   ", 5),
            Err(ValidationError::Blank { field: "name" })
        );
    }
}
