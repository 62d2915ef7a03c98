//! Visitor record model and request types

use base64::Engine;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::enums::{Purpose, VisitorStatus};

/// An encoded visitor photo, stored as a data-URI string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhotoData(String);

impl PhotoData {
    /// Wrap an already-encoded data-URI payload (e.g. handed over by the
    /// capture collaborator)
    pub fn from_encoded(data_uri: impl Into<String>) -> Self {
        Self(data_uri.into())
    }

    /// Encode raw JPEG bytes into a data-URI payload
    pub fn from_jpeg(bytes: &[u8]) -> Self {
        let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
        Self(format!("data:image/jpeg;base64,{}", encoded))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// One visitor's check-in/check-out entry.
///
/// Serialized camelCase to match the persisted register layout: a JSON array
/// under a single logical key, ids as numbers, timestamps as ISO-8601
/// strings, `date` as `YYYY-MM-DD`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Visitor {
    /// Unix epoch milliseconds at creation; unique, never reused
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<PhotoData>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub purpose: Purpose,
    /// The host this visitor came to see
    pub to_meet: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    /// Set at registration, immutable thereafter
    pub check_in_time: DateTime<Utc>,
    /// `null` while active; set exactly once on check-out
    pub check_out_time: Option<DateTime<Utc>>,
    /// Calendar day of check-in, used for day-based filtering and stats
    pub date: NaiveDate,
    pub status: VisitorStatus,
}

impl Visitor {
    pub fn is_active(&self) -> bool {
        self.status == VisitorStatus::Active
    }
}

/// Registration request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterVisitor {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    pub company: Option<String>,
    #[validate(length(min = 1, message = "Phone is required"))]
    pub phone: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    pub purpose: Purpose,
    #[validate(length(min = 1, message = "Host is required"))]
    pub to_meet: String,
    pub department: Option<String>,
    /// Captured photo; required for a new registration
    pub photo: Option<PhotoData>,
}

/// Update request; overwrites identity fields only. A photo is applied only
/// when a new capture was made during the edit, otherwise the stored one is
/// preserved.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateVisitor {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    pub company: Option<String>,
    #[validate(length(min = 1, message = "Phone is required"))]
    pub phone: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    pub purpose: Purpose,
    #[validate(length(min = 1, message = "Host is required"))]
    pub to_meet: String,
    pub department: Option<String>,
    pub photo: Option<PhotoData>,
}

impl RegisterVisitor {
    /// Trim every free-text field. Required-field validation runs against
    /// the trimmed values, so whitespace-only input is rejected rather than
    /// persisted as an empty string.
    pub fn trimmed(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            company: normalize(self.company),
            phone: self.phone.trim().to_string(),
            email: normalize(self.email),
            purpose: self.purpose,
            to_meet: self.to_meet.trim().to_string(),
            department: normalize(self.department),
            photo: self.photo,
        }
    }
}

impl UpdateVisitor {
    /// See [`RegisterVisitor::trimmed`]
    pub fn trimmed(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            company: normalize(self.company),
            phone: self.phone.trim().to_string(),
            email: normalize(self.email),
            purpose: self.purpose,
            to_meet: self.to_meet.trim().to_string(),
            department: normalize(self.department),
            photo: self.photo,
        }
    }
}

/// Trim a free-text form field, mapping whitespace-only input to `None`
fn normalize(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
