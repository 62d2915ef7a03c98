//! Shared domain enums

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Purpose
// ---------------------------------------------------------------------------

/// Visit purpose, the fixed set offered by the registration form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Purpose {
    Meeting,
    Interview,
    Delivery,
    Maintenance,
    Official,
    Personal,
    Other,
}

impl Purpose {
    /// All purposes, in the order the form lists them
    pub const ALL: [Purpose; 7] = [
        Purpose::Meeting,
        Purpose::Interview,
        Purpose::Delivery,
        Purpose::Maintenance,
        Purpose::Official,
        Purpose::Personal,
        Purpose::Other,
    ];
}

impl std::fmt::Display for Purpose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Purpose::Meeting => "Meeting",
            Purpose::Interview => "Interview",
            Purpose::Delivery => "Delivery",
            Purpose::Maintenance => "Maintenance",
            Purpose::Official => "Official",
            Purpose::Personal => "Personal",
            Purpose::Other => "Other",
        };
        write!(f, "{}", label)
    }
}

impl std::str::FromStr for Purpose {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Meeting" => Ok(Purpose::Meeting),
            "Interview" => Ok(Purpose::Interview),
            "Delivery" => Ok(Purpose::Delivery),
            "Maintenance" => Ok(Purpose::Maintenance),
            "Official" => Ok(Purpose::Official),
            "Personal" => Ok(Purpose::Personal),
            "Other" => Ok(Purpose::Other),
            _ => Err(format!("Unknown purpose: {}", s)),
        }
    }
}

// ---------------------------------------------------------------------------
// VisitorStatus
// ---------------------------------------------------------------------------

/// Visitor lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisitorStatus {
    /// On-site, no check-out recorded
    Active,
    /// Visit completed (explicit check-out or startup reconciliation)
    Completed,
}

impl std::fmt::Display for VisitorStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            VisitorStatus::Active => "Inside",
            VisitorStatus::Completed => "Completed",
        };
        write!(f, "{}", label)
    }
}
