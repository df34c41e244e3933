pub mod terminal;

use std::collections::{BTreeSet, HashMap};

use serde::Serialize;

use crate::db::Database;
use crate::db::models::User;

pub enum ReportFormat {
    Terminal,
    Json,
}

/// A stored flag joined with the owning user's mail.
#[derive(Debug, Serialize)]
pub struct FlagRow {
    pub fid: i64,
    pub uid: i64,
    pub mail: String,
    pub private: bool,
}

#[derive(Debug, Serialize)]
pub struct Report {
    pub generated_at: String,
    pub users: Vec<User>,
    pub flags: Vec<FlagRow>,
    pub summary: ReportSummary,
}

#[derive(Debug, Serialize)]
pub struct ReportSummary {
    pub total_users: usize,
    pub total_flags: usize,
    pub private_flags: usize,
    pub public_flags: usize,
    pub users_with_private_fields: usize,
}

impl Report {
    pub fn build(db: &Database) -> anyhow::Result<Self> {
        let users = db.list_users()?;
        let records = db.list_privacy_values(None)?;

        let mail_by_uid: HashMap<i64, &str> =
            users.iter().map(|u| (u.uid, u.mail.as_str())).collect();

        let flags: Vec<FlagRow> = records
            .into_iter()
            .map(|r| FlagRow {
                fid: r.fid,
                uid: r.uid,
                mail: mail_by_uid.get(&r.uid).copied().unwrap_or("-").to_string(),
                private: r.private,
            })
            .collect();

        let private_flags = flags.iter().filter(|f| f.private).count();
        let users_with_private_fields = flags
            .iter()
            .filter(|f| f.private)
            .map(|f| f.uid)
            .collect::<BTreeSet<_>>()
            .len();

        let summary = ReportSummary {
            total_users: users.len(),
            total_flags: flags.len(),
            private_flags,
            public_flags: flags.len() - private_flags,
            users_with_private_fields,
        };

        Ok(Self {
            generated_at: chrono::Utc::now().to_rfc3339(),
            users,
            flags,
            summary,
        })
    }

    pub fn render(&self, format: ReportFormat) -> anyhow::Result<String> {
        match format {
            ReportFormat::Terminal => terminal::render(self),
            ReportFormat::Json => Ok(serde_json::to_string_pretty(self)?),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded_db() -> Database {
        let db = Database::open_in_memory().unwrap();
        db.insert_user("a@x.com", Some(5)).unwrap();
        db.insert_user("b@x.com", Some(6)).unwrap();
        db.insert_user("c@x.com", Some(7)).unwrap();
        db.merge_privacy_value(10, 5, true).unwrap();
        db.merge_privacy_value(11, 5, true).unwrap();
        db.merge_privacy_value(10, 6, false).unwrap();
        db
    }

    #[test]
    fn test_report_summary() {
        let report = Report::build(&seeded_db()).unwrap();

        assert_eq!(report.summary.total_users, 3);
        assert_eq!(report.summary.total_flags, 3);
        assert_eq!(report.summary.private_flags, 2);
        assert_eq!(report.summary.public_flags, 1);
        assert_eq!(report.summary.users_with_private_fields, 1);
        assert_eq!(report.flags[0].mail, "a@x.com");
    }

    #[test]
    fn test_render_json() {
        let report = Report::build(&seeded_db()).unwrap();
        let rendered = report.render(ReportFormat::Json).unwrap();

        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value["summary"]["total_flags"], 3);
        assert_eq!(value["flags"][2]["mail"], "b@x.com");
        assert_eq!(value["flags"][2]["private"], false);
    }

    #[test]
    fn test_render_terminal() {
        let report = Report::build(&seeded_db()).unwrap();
        let rendered = report.render(ReportFormat::Terminal).unwrap();

        assert!(rendered.contains("Privacy flags:        3"));
        assert!(rendered.contains("a@x.com"));
    }
}
