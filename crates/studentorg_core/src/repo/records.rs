//! `Record` mappings for each model.

use super::{Record, RepoError, RepoResult};
use crate::model::org_member::DATE_FORMAT;
use crate::model::{
    College, EntityKind, EntityRecord, OrgMember, Organization, Program, Stored, Student,
    ValidationError,
};
use chrono::NaiveDate;
use rusqlite::types::Value;
use rusqlite::Row;

impl Record for College {
    const KIND: EntityKind = EntityKind::College;
    const TABLE: &'static str = "colleges";
    const COLUMNS: &'static [&'static str] = &["college_name"];

    fn validate(&self) -> Result<(), ValidationError> {
        College::validate(self)
    }

    fn to_values(&self) -> Vec<Value> {
        vec![Value::Text(self.college_name.clone())]
    }

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        Ok(Self {
            college_name: row.get("college_name")?,
        })
    }

    fn into_entity(stored: Stored<Self>) -> EntityRecord {
        EntityRecord::College(stored)
    }
}

impl Record for Program {
    const KIND: EntityKind = EntityKind::Program;
    const TABLE: &'static str = "programs";
    const COLUMNS: &'static [&'static str] = &["prog_name", "description", "college_id"];

    fn validate(&self) -> Result<(), ValidationError> {
        Program::validate(self)
    }

    fn to_values(&self) -> Vec<Value> {
        vec![
            Value::Text(self.prog_name.clone()),
            optional_text_value(self.description.as_deref()),
            Value::Integer(self.college_id),
        ]
    }

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        Ok(Self {
            prog_name: row.get("prog_name")?,
            description: row.get("description")?,
            college_id: row.get("college_id")?,
        })
    }

    fn into_entity(stored: Stored<Self>) -> EntityRecord {
        EntityRecord::Program(stored)
    }
}

impl Record for Student {
    const KIND: EntityKind = EntityKind::Student;
    const TABLE: &'static str = "students";
    const COLUMNS: &'static [&'static str] = &[
        "student_id",
        "lastname",
        "firstname",
        "middlename",
        "program_id",
    ];

    fn validate(&self) -> Result<(), ValidationError> {
        Student::validate(self)
    }

    fn to_values(&self) -> Vec<Value> {
        vec![
            Value::Text(self.student_id.clone()),
            Value::Text(self.lastname.clone()),
            Value::Text(self.firstname.clone()),
            optional_text_value(self.middlename.as_deref()),
            Value::Integer(self.program_id),
        ]
    }

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        Ok(Self {
            student_id: row.get("student_id")?,
            lastname: row.get("lastname")?,
            firstname: row.get("firstname")?,
            middlename: row.get("middlename")?,
            program_id: row.get("program_id")?,
        })
    }

    fn into_entity(stored: Stored<Self>) -> EntityRecord {
        EntityRecord::Student(stored)
    }
}

impl Record for Organization {
    const KIND: EntityKind = EntityKind::Organization;
    const TABLE: &'static str = "organizations";
    const COLUMNS: &'static [&'static str] = &["name", "description", "college_id"];

    fn validate(&self) -> Result<(), ValidationError> {
        Organization::validate(self)
    }

    fn to_values(&self) -> Vec<Value> {
        vec![
            Value::Text(self.name.clone()),
            optional_text_value(self.description.as_deref()),
            self.college_id.map_or(Value::Null, Value::Integer),
        ]
    }

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        Ok(Self {
            name: row.get("name")?,
            description: row.get("description")?,
            college_id: row.get("college_id")?,
        })
    }

    fn into_entity(stored: Stored<Self>) -> EntityRecord {
        EntityRecord::Organization(stored)
    }
}

impl Record for OrgMember {
    const KIND: EntityKind = EntityKind::OrgMember;
    const TABLE: &'static str = "org_members";
    const COLUMNS: &'static [&'static str] = &["student_id", "organization_id", "date_joined"];

    fn validate(&self) -> Result<(), ValidationError> {
        OrgMember::validate(self)
    }

    fn to_values(&self) -> Vec<Value> {
        vec![
            Value::Integer(self.student_id),
            Value::Integer(self.organization_id),
            Value::Text(self.date_joined.format(DATE_FORMAT).to_string()),
        ]
    }

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        let date_text: String = row.get("date_joined")?;
        let date_joined = NaiveDate::parse_from_str(&date_text, DATE_FORMAT).map_err(|_| {
            RepoError::InvalidData(format!(
                "invalid date `{date_text}` in org_members.date_joined"
            ))
        })?;

        Ok(Self {
            student_id: row.get("student_id")?,
            organization_id: row.get("organization_id")?,
            date_joined,
        })
    }

    fn into_entity(stored: Stored<Self>) -> EntityRecord {
        EntityRecord::OrgMember(stored)
    }
}

fn optional_text_value(value: Option<&str>) -> Value {
    value.map_or(Value::Null, |text| Value::Text(text.to_string()))
}
