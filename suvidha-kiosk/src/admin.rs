//! Official-facing surface: authentication against the demo credential
//! directory, the persisted session marker, complaint filtering, dashboard
//! counts, and status-update assembly.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use suvidha_api::StatusUpdate;
use suvidha_core::{ComplaintStatus, Department, ServiceKind};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AdminError {
    #[error("employee id is required")]
    MissingEmployeeId,
    #[error("password is required")]
    MissingPassword,
    #[error("invalid credentials or department mismatch")]
    InvalidCredentials,
    #[error("a remark is required")]
    MissingRemark,
    #[error("remark should be at least 10 characters long")]
    RemarkTooShort,
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("serde: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Scope of an official's account: one department, or everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdminDepartment {
    All,
    Department(Department),
}

impl AdminDepartment {
    /// Short department name used on the login screen and in the session
    /// marker (the complaint wire labels are longer).
    pub fn label(self) -> &'static str {
        match self {
            AdminDepartment::All => "All",
            AdminDepartment::Department(Department::Electricity) => "Electricity",
            AdminDepartment::Department(Department::Water) => "Water",
            AdminDepartment::Department(Department::Gas) => "Gas",
            AdminDepartment::Department(Department::Municipal) => "Municipal",
        }
    }

    pub fn parse(s: &str) -> Option<AdminDepartment> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            return Some(AdminDepartment::All);
        }
        Department::ALL
            .into_iter()
            .find(|d| AdminDepartment::Department(*d).label().eq_ignore_ascii_case(s))
            .map(AdminDepartment::Department)
    }
}

impl fmt::Display for AdminDepartment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Identity persisted after a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminIdentity {
    pub employee_id: String,
    pub name: String,
    pub department: AdminDepartment,
}

struct AdminAccount {
    employee_id: &'static str,
    password: &'static str,
    department: AdminDepartment,
    name: &'static str,
}

// Demo directory; a production deployment replaces this with a real
// identity provider.
const DIRECTORY: &[AdminAccount] = &[
    AdminAccount {
        employee_id: "EMP001",
        password: "admin123",
        department: AdminDepartment::Department(Department::Electricity),
        name: "Rajesh Kumar",
    },
    AdminAccount {
        employee_id: "EMP002",
        password: "admin123",
        department: AdminDepartment::Department(Department::Water),
        name: "Priya Sharma",
    },
    AdminAccount {
        employee_id: "EMP003",
        password: "admin123",
        department: AdminDepartment::Department(Department::Gas),
        name: "Amit Patel",
    },
    AdminAccount {
        employee_id: "EMP004",
        password: "admin123",
        department: AdminDepartment::Department(Department::Municipal),
        name: "Sunita Verma",
    },
    AdminAccount {
        employee_id: "ADMIN",
        password: "admin123",
        department: AdminDepartment::All,
        name: "Super Admin",
    },
];

/// Check credentials against the directory. Id, password, and department
/// must all match; a mismatch of any of them yields the same error so the
/// login screen leaks nothing.
pub fn authenticate(
    employee_id: &str,
    password: &str,
    department: AdminDepartment,
) -> Result<AdminIdentity, AdminError> {
    let employee_id = employee_id.trim();
    if employee_id.is_empty() {
        return Err(AdminError::MissingEmployeeId);
    }
    if password.trim().is_empty() {
        return Err(AdminError::MissingPassword);
    }
    DIRECTORY
        .iter()
        .find(|a| {
            a.employee_id == employee_id && a.password == password && a.department == department
        })
        .map(|a| AdminIdentity {
            employee_id: a.employee_id.to_string(),
            name: a.name.to_string(),
            department: a.department,
        })
        .ok_or(AdminError::InvalidCredentials)
}

/// Persistence seam for the login session so dashboards can be tested
/// without touching the filesystem.
pub trait SessionStore {
    fn load(&self) -> Result<Option<AdminIdentity>, AdminError>;
    fn save(&self, identity: &AdminIdentity) -> Result<(), AdminError>;
    fn clear(&self) -> Result<(), AdminError>;
}

/// Flat JSON session marker on disk. No expiry, no encryption; logging out
/// deletes the file.
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> FileSessionStore {
        FileSessionStore { path: path.into() }
    }

    /// Default marker location under the user's profile directory.
    pub fn default_path() -> PathBuf {
        if cfg!(windows) {
            if let Ok(app_data) = std::env::var("APPDATA") {
                return PathBuf::from(app_data).join("suvidha").join("admin-session.json");
            }
        } else if let Ok(home) = std::env::var("HOME") {
            return PathBuf::from(home).join(".suvidha").join("admin-session.json");
        }
        PathBuf::from("admin-session.json")
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<AdminIdentity>, AdminError> {
        match std::fs::read_to_string(&self.path) {
            Ok(data) => Ok(Some(serde_json::from_str(&data)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, identity: &AdminIdentity) -> Result<(), AdminError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_string(identity)?)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), AdminError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// A complaint row as shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplaintRecord {
    pub id: u64,
    pub name: String,
    pub mobile: String,
    pub department: Department,
    pub service: ServiceKind,
    pub problem: String,
    pub date: NaiveDate,
    pub status: ComplaintStatus,
}

/// Optional row filters; `None` means "All".
#[derive(Debug, Clone, Default)]
pub struct RecordFilter {
    pub department: Option<Department>,
    pub status: Option<ComplaintStatus>,
    pub date: Option<NaiveDate>,
}

pub fn filter_records<'a>(
    records: &'a [ComplaintRecord],
    filter: &RecordFilter,
) -> Vec<&'a ComplaintRecord> {
    records
        .iter()
        .filter(|r| filter.department.is_none_or(|d| r.department == d))
        .filter(|r| filter.status.as_ref().is_none_or(|s| &r.status == s))
        .filter(|r| filter.date.is_none_or(|d| r.date == d))
        .collect()
}

/// Restrict rows to what the logged-in official may see.
pub fn visible_to<'a>(
    records: &'a [ComplaintRecord],
    identity: &AdminIdentity,
) -> Vec<&'a ComplaintRecord> {
    match identity.department {
        AdminDepartment::All => records.iter().collect(),
        AdminDepartment::Department(d) => records.iter().filter(|r| r.department == d).collect(),
    }
}

/// Headline dashboard counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DashboardStats {
    pub total: usize,
    pub pending: usize,
    pub in_progress: usize,
    pub resolved: usize,
    pub today: usize,
}

pub fn dashboard_stats(records: &[ComplaintRecord], today: NaiveDate) -> DashboardStats {
    DashboardStats {
        total: records.len(),
        pending: records.iter().filter(|r| r.status == ComplaintStatus::Pending).count(),
        in_progress: records.iter().filter(|r| r.status == ComplaintStatus::InProgress).count(),
        resolved: records.iter().filter(|r| r.status == ComplaintStatus::Resolved).count(),
        today: records.iter().filter(|r| r.date == today).count(),
    }
}

/// Per-department dashboard row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepartmentStats {
    pub department: Department,
    pub total: usize,
    pub pending: usize,
    pub in_progress: usize,
    pub resolved: usize,
}

pub fn department_breakdown(records: &[ComplaintRecord]) -> Vec<DepartmentStats> {
    Department::ALL
        .into_iter()
        .map(|department| {
            let rows: Vec<&ComplaintRecord> =
                records.iter().filter(|r| r.department == department).collect();
            DepartmentStats {
                department,
                total: rows.len(),
                pending: rows.iter().filter(|r| r.status == ComplaintStatus::Pending).count(),
                in_progress: rows
                    .iter()
                    .filter(|r| r.status == ComplaintStatus::InProgress)
                    .count(),
                resolved: rows.iter().filter(|r| r.status == ComplaintStatus::Resolved).count(),
            }
        })
        .collect()
}

/// Remark auto-suggested when an official picks a status.
pub fn suggested_remark(status: &ComplaintStatus) -> Option<&'static str> {
    match status {
        ComplaintStatus::TeamAssigned => {
            Some("Team has been notified and will visit the location soon.")
        }
        ComplaintStatus::InProgress => Some("Issue is being investigated by our technical team."),
        ComplaintStatus::Resolved => Some("Resolved as per the complaint. Please verify."),
        _ => None,
    }
}

/// Assemble a status update: an explicit remark wins, otherwise the
/// suggestion for the chosen status; the final remark must carry at least
/// 10 characters.
pub fn build_status_update(
    identity: &AdminIdentity,
    status: ComplaintStatus,
    remark: Option<String>,
) -> Result<StatusUpdate, AdminError> {
    let remark = remark
        .map(|r| r.trim().to_string())
        .filter(|r| !r.is_empty())
        .or_else(|| suggested_remark(&status).map(String::from))
        .ok_or(AdminError::MissingRemark)?;
    if remark.chars().count() < 10 {
        return Err(AdminError::RemarkTooShort);
    }
    Ok(StatusUpdate { status, remark, updated_by: identity.name.clone() })
}

/// Demo dataset for the dashboard, pending a list endpoint on the
/// complaint service.
pub fn demo_records() -> Vec<ComplaintRecord> {
    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
    }
    let rows = [
        (1, "Rajesh Kumar", "9876543210", Department::Electricity, ServiceKind::RegisterComplaint, "Power outage in my area for last 3 hours", day(2026, 2, 8), ComplaintStatus::Pending),
        (2, "Priya Sharma", "9876543211", Department::Water, ServiceKind::RegisterComplaint, "No water supply since morning", day(2026, 2, 8), ComplaintStatus::InProgress),
        (3, "Amit Patel", "9876543212", Department::Gas, ServiceKind::NewApplication, "New gas connection for my house", day(2026, 2, 7), ComplaintStatus::Resolved),
        (4, "Sunita Verma", "9876543213", Department::Municipal, ServiceKind::RegisterComplaint, "Garbage not collected for a week", day(2026, 2, 8), ComplaintStatus::Pending),
        (5, "Vikram Singh", "9876543214", Department::Electricity, ServiceKind::RegisterComplaint, "Street light not working", day(2026, 2, 7), ComplaintStatus::InProgress),
        (6, "Meena Iyer", "9876543215", Department::Water, ServiceKind::RegisterComplaint, "Contaminated water supply", day(2026, 2, 6), ComplaintStatus::Resolved),
        (7, "Arjun Reddy", "9876543216", Department::Electricity, ServiceKind::NewApplication, "New electricity connection", day(2026, 2, 8), ComplaintStatus::Pending),
        (8, "Kavita Joshi", "9876543217", Department::Municipal, ServiceKind::RegisterComplaint, "Pothole on main road", day(2026, 2, 6), ComplaintStatus::InProgress),
        (9, "Harish Nair", "9876543218", Department::Gas, ServiceKind::RegisterComplaint, "Gas leakage near the meter", day(2026, 2, 5), ComplaintStatus::Resolved),
        (10, "Deepa Rao", "9876543219", Department::Water, ServiceKind::RegisterComplaint, "Low water pressure", day(2026, 2, 8), ComplaintStatus::Pending),
        (11, "Mohan Das", "9876543220", Department::Electricity, ServiceKind::RegisterComplaint, "Frequent voltage fluctuation", day(2026, 2, 5), ComplaintStatus::Resolved),
        (12, "Anita Desai", "9876543221", Department::Municipal, ServiceKind::RegisterComplaint, "Blocked drainage", day(2026, 2, 7), ComplaintStatus::InProgress),
    ];
    rows.into_iter()
        .map(|(id, name, mobile, department, service, problem, date, status)| ComplaintRecord {
            id,
            name: name.to_string(),
            mobile: mobile.to_string(),
            department,
            service,
            problem: problem.to_string(),
            date,
            status,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authentication_requires_all_three_to_match() {
        let identity = authenticate(
            "EMP002",
            "admin123",
            AdminDepartment::Department(Department::Water),
        )
        .unwrap();
        assert_eq!(identity.name, "Priya Sharma");

        // wrong department for the account
        assert!(matches!(
            authenticate("EMP002", "admin123", AdminDepartment::Department(Department::Gas)),
            Err(AdminError::InvalidCredentials)
        ));
        assert!(matches!(
            authenticate("EMP002", "wrong", AdminDepartment::Department(Department::Water)),
            Err(AdminError::InvalidCredentials)
        ));
        assert!(matches!(
            authenticate("", "admin123", AdminDepartment::All),
            Err(AdminError::MissingEmployeeId)
        ));
        assert!(matches!(
            authenticate("ADMIN", "  ", AdminDepartment::All),
            Err(AdminError::MissingPassword)
        ));
    }

    #[test]
    fn super_admin_sees_every_department() {
        let identity = authenticate("ADMIN", "admin123", AdminDepartment::All).unwrap();
        let records = demo_records();
        assert_eq!(visible_to(&records, &identity).len(), records.len());

        let water = authenticate(
            "EMP002",
            "admin123",
            AdminDepartment::Department(Department::Water),
        )
        .unwrap();
        assert!(visible_to(&records, &water)
            .iter()
            .all(|r| r.department == Department::Water));
        assert_eq!(visible_to(&records, &water).len(), 3);
    }

    #[test]
    fn session_store_round_trips_and_clears() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("nested").join("session.json"));
        assert_eq!(store.load().unwrap(), None);

        let identity = AdminIdentity {
            employee_id: "EMP001".into(),
            name: "Rajesh Kumar".into(),
            department: AdminDepartment::Department(Department::Electricity),
        };
        store.save(&identity).unwrap();
        assert_eq!(store.load().unwrap(), Some(identity));

        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
        // clearing twice is fine
        store.clear().unwrap();
    }

    #[test]
    fn filters_narrow_rows() {
        let records = demo_records();
        let filter = RecordFilter {
            department: Some(Department::Electricity),
            status: Some(ComplaintStatus::Pending),
            ..RecordFilter::default()
        };
        let rows = filter_records(&records, &filter);
        assert!(rows
            .iter()
            .all(|r| r.department == Department::Electricity
                && r.status == ComplaintStatus::Pending));
        assert_eq!(rows.len(), 2);

        let all = filter_records(&records, &RecordFilter::default());
        assert_eq!(all.len(), records.len());
    }

    #[test]
    fn dashboard_counts_add_up() {
        let records = demo_records();
        let today = NaiveDate::from_ymd_opt(2026, 2, 8).unwrap();
        let stats = dashboard_stats(&records, today);
        assert_eq!(stats.total, 12);
        assert_eq!(stats.pending + stats.in_progress + stats.resolved, stats.total);
        assert_eq!(stats.today, 5);

        let breakdown = department_breakdown(&records);
        assert_eq!(breakdown.len(), 4);
        let total: usize = breakdown.iter().map(|d| d.total).sum();
        assert_eq!(total, stats.total);
    }

    #[test]
    fn status_update_prefers_explicit_remark_over_suggestion() {
        let identity = AdminIdentity {
            employee_id: "EMP003".into(),
            name: "Amit Patel".into(),
            department: AdminDepartment::Department(Department::Gas),
        };
        let update = build_status_update(
            &identity,
            ComplaintStatus::Resolved,
            Some("Replaced the regulator valve.".into()),
        )
        .unwrap();
        assert_eq!(update.remark, "Replaced the regulator valve.");
        assert_eq!(update.updated_by, "Amit Patel");

        let suggested =
            build_status_update(&identity, ComplaintStatus::InProgress, None).unwrap();
        assert_eq!(suggested.remark, "Issue is being investigated by our technical team.");

        assert!(matches!(
            build_status_update(&identity, ComplaintStatus::Rejected, None),
            Err(AdminError::MissingRemark)
        ));
        assert!(matches!(
            build_status_update(&identity, ComplaintStatus::Rejected, Some("too short".into())),
            Err(AdminError::RemarkTooShort)
        ));
    }

    #[test]
    fn admin_department_labels_parse() {
        assert_eq!(AdminDepartment::parse("All"), Some(AdminDepartment::All));
        assert_eq!(
            AdminDepartment::parse("water"),
            Some(AdminDepartment::Department(Department::Water))
        );
        assert_eq!(AdminDepartment::parse("Sanitation"), None);
    }
}
