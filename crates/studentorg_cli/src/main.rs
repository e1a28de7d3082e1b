//! Command-line request layer over `studentorg_core`.
//!
//! # Responsibility
//! - Parse request parameters (query, sort key, page) and entity input.
//! - Hand results to stdout as JSON.
//!
//! # Invariants
//! - `update-*` replaces every writable field; omitted optional fields are
//!   cleared, except a membership's `date_joined`, which is kept.

use anyhow::{anyhow, Context};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use log::info;
use serde_json::json;
use std::path::PathBuf;
use studentorg_core::db::open_db;
use studentorg_core::{
    dashboard_counts, default_log_level, init_logging, list_from_params, parse_date_joined,
    College, EntityKind, OrgMember, Organization, Program, RecordId, RecordRepository,
    RecordService, SqliteRecordRepository, Student,
};

#[derive(Debug, Parser)]
#[command(name = "studentorg", version, about = "Student organization records")]
struct Cli {
    /// SQLite database file; created and migrated on first use.
    #[arg(long, env = "STUDENTORG_DB", default_value = "studentorg.sqlite3")]
    db: PathBuf,
    /// trace|debug|info|warn|error; defaults by build mode.
    #[arg(long, env = "STUDENTORG_LOG_LEVEL")]
    log_level: Option<String>,
    /// Absolute directory for rolling log files; stderr when omitted.
    #[arg(long, env = "STUDENTORG_LOG_DIR")]
    log_dir: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print one page of a list screen.
    List {
        /// college | program | student | organization | org_member
        entity: String,
        /// Free-text substring filter.
        #[arg(long)]
        q: Option<String>,
        /// Allow-listed sort key; anything else uses the default order.
        #[arg(long)]
        sort: Option<String>,
        /// 1-based page number or `last`.
        #[arg(long)]
        page: Option<String>,
    },
    /// Print record totals.
    Dashboard,
    AddCollege(CollegeArgs),
    AddProgram(ProgramArgs),
    AddStudent(StudentArgs),
    AddOrg(OrganizationArgs),
    AddMember(MemberArgs),
    UpdateCollege {
        id: RecordId,
        #[command(flatten)]
        fields: CollegeArgs,
    },
    UpdateProgram {
        id: RecordId,
        #[command(flatten)]
        fields: ProgramArgs,
    },
    UpdateStudent {
        id: RecordId,
        #[command(flatten)]
        fields: StudentArgs,
    },
    UpdateOrg {
        id: RecordId,
        #[command(flatten)]
        fields: OrganizationArgs,
    },
    UpdateMember {
        id: RecordId,
        #[command(flatten)]
        fields: MemberArgs,
    },
    Delete {
        entity: String,
        id: RecordId,
    },
}

#[derive(Debug, Args)]
struct CollegeArgs {
    name: String,
}

impl CollegeArgs {
    fn into_record(self) -> College {
        College::new(self.name)
    }
}

#[derive(Debug, Args)]
struct ProgramArgs {
    name: String,
    #[arg(long)]
    college: RecordId,
    #[arg(long)]
    description: Option<String>,
}

impl ProgramArgs {
    fn into_record(self) -> Program {
        let program = Program::new(self.name, self.college);
        match self.description {
            Some(description) => program.with_description(description),
            None => program,
        }
    }
}

#[derive(Debug, Args)]
struct StudentArgs {
    student_id: String,
    lastname: String,
    firstname: String,
    #[arg(long)]
    middlename: Option<String>,
    #[arg(long)]
    program: RecordId,
}

impl StudentArgs {
    fn into_record(self) -> Student {
        let student = Student::new(self.student_id, self.lastname, self.firstname, self.program);
        match self.middlename {
            Some(middlename) => student.with_middlename(middlename),
            None => student,
        }
    }
}

#[derive(Debug, Args)]
struct OrganizationArgs {
    name: String,
    #[arg(long)]
    college: Option<RecordId>,
    #[arg(long)]
    description: Option<String>,
}

impl OrganizationArgs {
    fn into_record(self) -> Organization {
        let organization = Organization::new(self.name, self.college);
        match self.description {
            Some(description) => organization.with_description(description),
            None => organization,
        }
    }
}

#[derive(Debug, Args)]
struct MemberArgs {
    #[arg(long)]
    student: RecordId,
    #[arg(long)]
    organization: RecordId,
    /// YYYY-MM-DD; `add-member` defaults to today, `update-member` keeps
    /// the stored date.
    #[arg(long)]
    date_joined: Option<String>,
}

impl MemberArgs {
    fn into_record(self, fallback_date: NaiveDate) -> anyhow::Result<OrgMember> {
        let date_joined = match self.date_joined {
            Some(raw) => parse_date_joined(&raw)?,
            None => fallback_date,
        };
        Ok(OrgMember::new(self.student, self.organization, date_joined))
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let log_level = cli.log_level.as_deref().unwrap_or(default_log_level());
    init_logging(log_level, cli.log_dir.as_deref()).map_err(anyhow::Error::msg)?;

    let conn = open_db(&cli.db)
        .with_context(|| format!("failed to open database `{}`", cli.db.display()))?;
    let service = RecordService::new(SqliteRecordRepository::try_new(&conn)?);

    let output = match cli.command {
        Command::List {
            entity,
            q,
            sort,
            page,
        } => {
            let page = list_from_params(
                &conn,
                &entity,
                q.as_deref(),
                sort.as_deref(),
                page.as_deref(),
            )?;
            serde_json::to_value(page)?
        }
        Command::Dashboard => serde_json::to_value(dashboard_counts(&conn)?)?,
        Command::AddCollege(fields) => created(&service, fields.into_record())?,
        Command::AddProgram(fields) => created(&service, fields.into_record())?,
        Command::AddStudent(fields) => created(&service, fields.into_record())?,
        Command::AddOrg(fields) => created(&service, fields.into_record())?,
        Command::AddMember(fields) => {
            let today = chrono::Local::now().date_naive();
            created(&service, fields.into_record(today)?)?
        }
        Command::UpdateCollege { id, fields } => updated(&service, id, fields.into_record())?,
        Command::UpdateProgram { id, fields } => updated(&service, id, fields.into_record())?,
        Command::UpdateStudent { id, fields } => updated(&service, id, fields.into_record())?,
        Command::UpdateOrg { id, fields } => updated(&service, id, fields.into_record())?,
        Command::UpdateMember { id, fields } => {
            let stored = service
                .get::<OrgMember>(id)?
                .ok_or_else(|| anyhow!("org_member #{id} not found"))?;
            updated(&service, id, fields.into_record(stored.record.date_joined)?)?
        }
        Command::Delete { entity, id } => {
            let kind = EntityKind::parse(&entity)
                .ok_or_else(|| anyhow!("unknown entity kind `{entity}`"))?;
            match kind {
                EntityKind::College => service.delete::<College>(id)?,
                EntityKind::Program => service.delete::<Program>(id)?,
                EntityKind::Student => service.delete::<Student>(id)?,
                EntityKind::Organization => service.delete::<Organization>(id)?,
                EntityKind::OrgMember => service.delete::<OrgMember>(id)?,
            }
            json!({ "entity": kind, "id": id, "deleted": true })
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    info!("event=cli_done module=cli status=ok");
    Ok(())
}

fn created<R, T>(service: &RecordService<R>, record: T) -> anyhow::Result<serde_json::Value>
where
    R: RecordRepository,
    T: studentorg_core::Record,
{
    let id = service.create(&record)?;
    Ok(json!({ "entity": T::KIND, "id": id }))
}

fn updated<R, T>(
    service: &RecordService<R>,
    id: RecordId,
    record: T,
) -> anyhow::Result<serde_json::Value>
where
    R: RecordRepository,
    T: studentorg_core::Record,
{
    service.update(id, &record)?;
    Ok(json!({ "entity": T::KIND, "id": id, "updated": true }))
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command};
    use chrono::NaiveDate;
    use clap::Parser;
    use studentorg_core::{Organization, Program};

    fn parse(args: &[&str]) -> Command {
        let mut argv = vec!["studentorg", "--db", "unused.sqlite3"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap().command
    }

    #[test]
    fn update_program_replaces_every_field() {
        let Command::UpdateProgram { id, fields } = parse(&[
            "update-program",
            "7",
            "BS Statistics",
            "--college",
            "2",
            "--description",
            "Data and inference",
        ]) else {
            panic!("expected update-program");
        };
        assert_eq!(id, 7);
        assert_eq!(
            fields.into_record(),
            Program::new("BS Statistics", 2).with_description("Data and inference")
        );
    }

    #[test]
    fn update_org_without_optional_fields_clears_them() {
        let Command::UpdateOrg { id, fields } = parse(&["update-org", "3", "Chess Club"]) else {
            panic!("expected update-org");
        };
        assert_eq!(id, 3);
        assert_eq!(fields.into_record(), Organization::new("Chess Club", None));
    }

    #[test]
    fn update_member_keeps_stored_date_unless_given() {
        let stored = NaiveDate::from_ymd_opt(2023, 9, 1).unwrap();

        let Command::UpdateMember { fields, .. } =
            parse(&["update-member", "4", "--student", "1", "--organization", "2"])
        else {
            panic!("expected update-member");
        };
        assert_eq!(fields.into_record(stored).unwrap().date_joined, stored);

        let Command::UpdateMember { fields, .. } = parse(&[
            "update-member",
            "4",
            "--student",
            "1",
            "--organization",
            "2",
            "--date-joined",
            "2024-02-29",
        ]) else {
            panic!("expected update-member");
        };
        assert_eq!(
            fields.into_record(stored).unwrap().date_joined,
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
    }

    #[test]
    fn log_level_is_optional() {
        let cli = Cli::try_parse_from(["studentorg", "dashboard"]).unwrap();
        assert!(matches!(cli.command, Command::Dashboard));
    }
}
