//! Organization membership record.

use super::{RecordId, ValidationError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Storage and wire format of membership dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Links one student to one organization from `date_joined` onwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrgMember {
    pub student_id: RecordId,
    pub organization_id: RecordId,
    pub date_joined: NaiveDate,
}

impl OrgMember {
    pub fn new(student_id: RecordId, organization_id: RecordId, date_joined: NaiveDate) -> Self {
        Self {
            student_id,
            organization_id,
            date_joined,
        }
    }

    /// Membership has no free-text fields; the typed date is already valid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}

/// Parses a `YYYY-MM-DD` membership date.
pub fn parse_date_joined(value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| {
        ValidationError::InvalidDate {
            field: "date_joined",
            value: value.to_string(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::parse_date_joined;
    use crate::model::ValidationError;
    use chrono::NaiveDate;

    #[test]
    fn parse_date_joined_accepts_iso_dates() {
        assert_eq!(
            parse_date_joined(" 2024-02-29 "),
            Ok(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap())
        );
    }

    #[test]
    fn parse_date_joined_rejects_impossible_dates() {
        let err = parse_date_joined("2023-02-29").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidDate { field: "date_joined", .. }));
    }
}
