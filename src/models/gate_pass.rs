//! Gate pass view model

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use super::enums::Purpose;
use super::visitor::{PhotoData, Visitor};

/// Printable single-record summary issued at check-in.
///
/// This is a pure view model: the PDF/print collaborators consume it and own
/// all layout concerns.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GatePass {
    pub name: String,
    pub company: Option<String>,
    pub phone: String,
    pub purpose: Purpose,
    /// The host being visited
    pub to_meet: String,
    pub department: Option<String>,
    pub check_in_time: DateTime<Utc>,
    /// The calendar day the pass is valid for (the visit day)
    pub valid_for: NaiveDate,
    pub photo: Option<PhotoData>,
    /// The day the pass was generated
    pub issued_on: NaiveDate,
}

impl GatePass {
    pub fn for_visitor(visitor: &Visitor, issued_on: NaiveDate) -> Self {
        Self {
            name: visitor.name.clone(),
            company: visitor.company.clone(),
            phone: visitor.phone.clone(),
            purpose: visitor.purpose,
            to_meet: visitor.to_meet.clone(),
            department: visitor.department.clone(),
            check_in_time: visitor.check_in_time,
            valid_for: visitor.date,
            photo: visitor.photo.clone(),
            issued_on,
        }
    }
}
