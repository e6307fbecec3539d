//! Wire shapes for the complaint service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use suvidha_core::{ComplaintStatus, UserSession};

/// Body for `POST /complaints/`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewComplaint {
    pub name: String,
    pub mobile: String,
    /// Always `"<department> - <service>"` with the canonical English
    /// labels, independent of the kiosk's display language.
    pub issue_type: String,
    pub description: String,
    pub location: String,
    pub file_name: String,
}

impl NewComplaint {
    /// Assemble the creation payload from the accumulated session. Returns
    /// `None` until both department and service have been chosen.
    pub fn from_session(session: &UserSession, location: &str) -> Option<NewComplaint> {
        let department = session.department?;
        let service = session.service?;
        Some(NewComplaint {
            name: session.name.trim().to_string(),
            mobile: session.mobile.trim().to_string(),
            issue_type: format!("{} - {}", department.wire_label(), service.wire_label()),
            description: session.problem.trim().to_string(),
            location: location.to_string(),
            file_name: session.file_name.clone().unwrap_or_default(),
        })
    }
}

/// A complaint as returned by the service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Complaint {
    pub id: u64,
    pub status: ComplaintStatus,
    pub issue_type: String,
    pub description: String,
    #[serde(default)]
    pub location: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Response envelope for complaint creation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateComplaintResponse {
    pub complaint: Complaint,
    #[serde(default)]
    pub simulated_sms: String,
}

/// Body for `PATCH /complaints/{id}/` when an official records progress.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatusUpdate {
    pub status: ComplaintStatus,
    pub remark: String,
    pub updated_by: String,
}
