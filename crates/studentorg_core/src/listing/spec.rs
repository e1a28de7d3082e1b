//! Per-entity listing configuration.
//!
//! Each entity's list screen is described by one static [`ListingSpec`]; the
//! listing routine in the parent module is the only code that interprets it.

use crate::model::EntityKind;

/// Records per page for every list screen.
pub const PAGE_SIZE: u32 = 5;

/// A logical field name bound to the SQL expression that reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRef {
    pub key: &'static str,
    pub expr: &'static str,
}

const fn field(key: &'static str, expr: &'static str) -> FieldRef {
    FieldRef { key, expr }
}

/// Listing behavior of one entity.
///
/// `fields` is the catalog of fields the entity actually has (including
/// joined ones). `default_order`, `allowed_sort_keys` and
/// `filterable_fields` name catalog keys; filter keys missing from the
/// catalog are dropped when the filter is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListingSpec {
    pub kind: EntityKind,
    pub table: &'static str,
    pub from_sql: &'static str,
    pub fields: &'static [FieldRef],
    pub default_order: &'static [&'static str],
    pub allowed_sort_keys: &'static [&'static str],
    pub filterable_fields: &'static [&'static str],
    pub page_size: u32,
}

impl ListingSpec {
    pub fn for_kind(kind: EntityKind) -> &'static ListingSpec {
        match kind {
            EntityKind::College => &COLLEGE,
            EntityKind::Program => &PROGRAM,
            EntityKind::Student => &STUDENT,
            EntityKind::Organization => &ORGANIZATION,
            EntityKind::OrgMember => &ORG_MEMBER,
        }
    }

    pub fn field(&self, key: &str) -> Option<&'static FieldRef> {
        self.fields.iter().find(|field| field.key == key)
    }

    pub fn allows_sort(&self, key: &str) -> bool {
        self.allowed_sort_keys.iter().any(|allowed| *allowed == key)
    }

    /// Declared filter fields that exist on this entity.
    pub fn applicable_filter_fields(&self) -> Vec<&'static FieldRef> {
        self.filterable_fields
            .iter()
            .filter_map(|key| self.field(key))
            .collect()
    }
}

static COLLEGE: ListingSpec = ListingSpec {
    kind: EntityKind::College,
    table: "colleges",
    from_sql: "colleges",
    fields: &[field("college_name", "colleges.college_name")],
    default_order: &[],
    allowed_sort_keys: &[],
    // Colleges carry `college_name` only, so neither declared field applies.
    filterable_fields: &["name", "description"],
    page_size: PAGE_SIZE,
};

static PROGRAM: ListingSpec = ListingSpec {
    kind: EntityKind::Program,
    table: "programs",
    from_sql: "programs INNER JOIN colleges ON colleges.id = programs.college_id",
    fields: &[
        field("prog_name", "programs.prog_name"),
        field("description", "programs.description"),
        field("college_name", "colleges.college_name"),
    ],
    default_order: &["prog_name"],
    allowed_sort_keys: &["prog_name", "college_name"],
    filterable_fields: &["prog_name", "description"],
    page_size: PAGE_SIZE,
};

static STUDENT: ListingSpec = ListingSpec {
    kind: EntityKind::Student,
    table: "students",
    from_sql: "students",
    fields: &[
        field("student_id", "students.student_id"),
        field("lastname", "students.lastname"),
        field("firstname", "students.firstname"),
        field("middlename", "students.middlename"),
    ],
    default_order: &[],
    allowed_sort_keys: &[],
    filterable_fields: &["name", "description"],
    page_size: PAGE_SIZE,
};

static ORGANIZATION: ListingSpec = ListingSpec {
    kind: EntityKind::Organization,
    table: "organizations",
    from_sql: "organizations LEFT JOIN colleges ON colleges.id = organizations.college_id",
    fields: &[
        field("name", "organizations.name"),
        field("description", "organizations.description"),
        field("college_name", "colleges.college_name"),
    ],
    default_order: &["college_name", "name"],
    allowed_sort_keys: &[],
    filterable_fields: &["name", "description"],
    page_size: PAGE_SIZE,
};

static ORG_MEMBER: ListingSpec = ListingSpec {
    kind: EntityKind::OrgMember,
    table: "org_members",
    from_sql: "org_members
        INNER JOIN students ON students.id = org_members.student_id
        INNER JOIN organizations ON organizations.id = org_members.organization_id",
    fields: &[
        field("student_lastname", "students.lastname"),
        field("student_firstname", "students.firstname"),
        field("organization_name", "organizations.name"),
        field("date_joined", "org_members.date_joined"),
    ],
    default_order: &["student_lastname", "student_firstname", "date_joined"],
    allowed_sort_keys: &["student_lastname", "date_joined"],
    filterable_fields: &["student_lastname", "student_firstname", "organization_name"],
    page_size: PAGE_SIZE,
};

#[cfg(test)]
mod tests {
    use super::{ListingSpec, PAGE_SIZE};
    use crate::model::EntityKind;

    #[test]
    fn order_and_sort_keys_resolve_against_catalog() {
        for kind in EntityKind::ALL {
            let spec = ListingSpec::for_kind(kind);
            assert_eq!(spec.kind, kind);
            assert_eq!(spec.page_size, PAGE_SIZE);
            for key in spec.default_order.iter().chain(spec.allowed_sort_keys) {
                assert!(spec.field(key).is_some(), "{kind}: unknown key `{key}`");
            }
        }
    }

    #[test]
    fn college_and_student_filters_have_no_applicable_fields() {
        assert!(ListingSpec::for_kind(EntityKind::College)
            .applicable_filter_fields()
            .is_empty());
        assert!(ListingSpec::for_kind(EntityKind::Student)
            .applicable_filter_fields()
            .is_empty());
        assert_eq!(
            ListingSpec::for_kind(EntityKind::Organization)
                .applicable_filter_fields()
                .len(),
            2
        );
    }
}
