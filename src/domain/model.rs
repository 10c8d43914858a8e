use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One line of the orbit map: `parent)child`, meaning child directly orbits
/// parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrbitRecord {
    pub parent: String,
    pub child: String,
}

impl OrbitRecord {
    pub fn new(parent: impl Into<String>, child: impl Into<String>) -> Self {
        Self {
            parent: parent.into(),
            child: child.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferSummary {
    pub origin: String,
    pub destination: String,
    pub distance: u32,
}

/// Final output of a survey run: the checksum over the whole map plus the
/// transfer query result, if one was computed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurveyReport {
    pub body_count: usize,
    pub orbit_checksum: u64,
    pub transfer: Option<TransferSummary>,
    pub generated_at: DateTime<Utc>,
}

/// How to treat a child that appears on the left of two different records.
/// The physical invariant is one orbit per body, so `Reject` is the faithful
/// choice; `Overwrite` (last record wins) matches lenient map tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    #[default]
    Overwrite,
    Reject,
}

impl std::str::FromStr for DuplicatePolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "overwrite" => Ok(DuplicatePolicy::Overwrite),
            "reject" => Ok(DuplicatePolicy::Reject),
            other => Err(format!(
                "unknown duplicate policy {:?} (expected 'overwrite' or 'reject')",
                other
            )),
        }
    }
}

impl std::fmt::Display for DuplicatePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DuplicatePolicy::Overwrite => write!(f, "overwrite"),
            DuplicatePolicy::Reject => write!(f, "reject"),
        }
    }
}
