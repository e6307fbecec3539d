//! Leaf domain types shared across the kiosk: languages, departments,
//! services, complaint statuses, and tracking tokens.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// The seven languages offered on the language screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    #[default]
    En,
    Hi,
    Bn,
    Te,
    Mr,
    Ta,
    Gu,
}

impl Language {
    pub const ALL: [Language; 7] = [
        Language::En,
        Language::Hi,
        Language::Bn,
        Language::Te,
        Language::Mr,
        Language::Ta,
        Language::Gu,
    ];

    /// Two-letter language code used for catalog lookup.
    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Hi => "hi",
            Language::Bn => "bn",
            Language::Te => "te",
            Language::Mr => "mr",
            Language::Ta => "ta",
            Language::Gu => "gu",
        }
    }

    /// Regional voice tag used when matching a speech-synthesis voice.
    pub fn bcp47(self) -> &'static str {
        match self {
            Language::En => "en-IN",
            Language::Hi => "hi-IN",
            Language::Bn => "bn-IN",
            Language::Te => "te-IN",
            Language::Mr => "mr-IN",
            Language::Ta => "ta-IN",
            Language::Gu => "gu-IN",
        }
    }

    /// The language's name in its own script, as shown on the selection buttons.
    pub fn native_name(self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Hi => "हिंदी",
            Language::Bn => "বাংলা",
            Language::Te => "తెలుగు",
            Language::Mr => "मराठी",
            Language::Ta => "தமிழ்",
            Language::Gu => "ગુજરાતી",
        }
    }

    pub fn from_code(code: &str) -> Option<Language> {
        Language::ALL
            .into_iter()
            .find(|l| l.code().eq_ignore_ascii_case(code.trim()))
    }
}

/// The four departments a complaint can be filed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Department {
    Electricity,
    Water,
    Gas,
    Municipal,
}

impl Department {
    pub const ALL: [Department; 4] = [
        Department::Electricity,
        Department::Water,
        Department::Gas,
        Department::Municipal,
    ];

    /// Canonical English label used in wire payloads, stable across display
    /// languages.
    pub fn wire_label(self) -> &'static str {
        match self {
            Department::Electricity => "Electricity",
            Department::Water => "Water Supply",
            Department::Gas => "Gas",
            Department::Municipal => "Municipal Services",
        }
    }

    /// Catalog key for the localized display label.
    pub fn message_key(self) -> &'static str {
        match self {
            Department::Electricity => "electricity",
            Department::Water => "water",
            Department::Gas => "gas",
            Department::Municipal => "municipal",
        }
    }
}

/// The three services offered on the service screen. Branching to the track
/// screen is keyed off this tag, never off a localized label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServiceKind {
    RegisterComplaint,
    NewApplication,
    TrackStatus,
}

impl ServiceKind {
    pub const ALL: [ServiceKind; 3] = [
        ServiceKind::RegisterComplaint,
        ServiceKind::NewApplication,
        ServiceKind::TrackStatus,
    ];

    /// Canonical English label used in wire payloads.
    pub fn wire_label(self) -> &'static str {
        match self {
            ServiceKind::RegisterComplaint => "Register Complaint",
            ServiceKind::NewApplication => "New Application",
            ServiceKind::TrackStatus => "Track Status",
        }
    }

    /// Catalog key for the localized display label.
    pub fn message_key(self) -> &'static str {
        match self {
            ServiceKind::RegisterComplaint => "complaint",
            ServiceKind::NewApplication => "new_application",
            ServiceKind::TrackStatus => "track_status",
        }
    }
}

/// Server-side complaint status. Unknown wire values are preserved rather
/// than rejected so newer backend statuses do not break the kiosk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComplaintStatus {
    #[serde(rename = "PENDING")]
    Pending,
    #[serde(rename = "RECEIVED")]
    Received,
    #[serde(rename = "UNDER_REVIEW")]
    UnderReview,
    #[serde(rename = "TEAM_ASSIGNED")]
    TeamAssigned,
    #[serde(rename = "IN_PROGRESS")]
    InProgress,
    #[serde(rename = "RESOLVED")]
    Resolved,
    #[serde(rename = "REJECTED")]
    Rejected,
    #[serde(untagged)]
    Other(String),
}

impl fmt::Display for ComplaintStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ComplaintStatus::Pending => "Pending",
            ComplaintStatus::Received => "Received",
            ComplaintStatus::UnderReview => "Under Review",
            ComplaintStatus::TeamAssigned => "Team Assigned",
            ComplaintStatus::InProgress => "In Progress",
            ComplaintStatus::Resolved => "Resolved",
            ComplaintStatus::Rejected => "Rejected",
            ComplaintStatus::Other(s) => s.as_str(),
        };
        f.write_str(label)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("token must be a positive number")]
    InvalidFormat,
}

/// Tracking token shown to the citizen; wraps the server-assigned complaint id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token(u64);

impl Token {
    pub fn from_id(id: u64) -> Token {
        Token(id)
    }

    /// Parse citizen input: one optional leading `#` is stripped, the rest
    /// must be a positive integer. Fails without any network interaction.
    pub fn parse(input: &str) -> Result<Token, TokenError> {
        let s = input.trim();
        let s = s.strip_prefix('#').unwrap_or(s).trim();
        match s.parse::<u64>() {
            Ok(id) if id > 0 => Ok(Token(id)),
            _ => Err(TokenError::InvalidFormat),
        }
    }

    pub fn id(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_parse_strips_leading_hash() {
        assert_eq!(Token::parse("5"), Token::parse("#5"));
        assert_eq!(Token::parse(" #12 ").map(Token::id), Ok(12));
    }

    #[test]
    fn token_parse_rejects_non_positive_input() {
        for input in ["abc", "", "#", "0", "-3", "1.5", "##7"] {
            assert_eq!(Token::parse(input), Err(TokenError::InvalidFormat), "{input}");
        }
    }

    #[test]
    fn token_renders_with_hash_prefix() {
        assert_eq!(Token::from_id(42).to_string(), "#42");
    }

    #[test]
    fn language_codes_round_trip() {
        for lang in Language::ALL {
            assert_eq!(Language::from_code(lang.code()), Some(lang));
        }
        assert_eq!(Language::from_code("HI"), Some(Language::Hi));
        assert_eq!(Language::from_code("xx"), None);
    }

    #[test]
    fn status_wire_names_deserialize() {
        let s: ComplaintStatus = serde_json::from_str("\"IN_PROGRESS\"").unwrap();
        assert_eq!(s, ComplaintStatus::InProgress);
        let s: ComplaintStatus = serde_json::from_str("\"ESCALATED\"").unwrap();
        assert_eq!(s, ComplaintStatus::Other("ESCALATED".into()));
    }
}
