//! Branch rows and per-route snapshots.

use serde::{Deserialize, Serialize};

use super::lenient;

/// One row of branch statistics as served by the data endpoint.
///
/// Every numeric field defaults to zero when the key is missing or blank.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchRecord {
    /// Branch name.
    #[serde(rename = "branch", default, deserialize_with = "lenient::label")]
    pub label: String,
    /// Number of staff.
    #[serde(
        rename = "amountOfPersonal",
        default,
        deserialize_with = "lenient::count"
    )]
    pub staff: i64,
    /// Staff on the special ("iron") schedule.
    #[serde(rename = "iron", default, deserialize_with = "lenient::count")]
    pub special_schedule: i64,
    /// Open vacancies.
    #[serde(default, deserialize_with = "lenient::count")]
    pub vacant: i64,
    /// Current-period percentage.
    #[serde(default, deserialize_with = "lenient::percent")]
    pub percent: f64,
    /// Prior-period percentage.
    #[serde(default, deserialize_with = "lenient::percent")]
    pub prev_percent: f64,
    /// Staff who joined during the period.
    #[serde(default, deserialize_with = "lenient::count")]
    pub come: i64,
    /// Staff who left during the period.
    #[serde(default, deserialize_with = "lenient::count")]
    pub went: i64,
}

/// The full ordered dataset of one route at one fetch.
///
/// Equality is order-sensitive and covers every field of every record.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteSnapshot {
    records: Vec<BranchRecord>,
}

impl RouteSnapshot {
    pub fn new(records: Vec<BranchRecord>) -> Self {
        Self { records }
    }

    /// Decodes a snapshot from a JSON array body.
    pub fn from_json(body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(body)
    }

    pub fn records(&self) -> &[BranchRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn into_records(self) -> Vec<BranchRecord> {
        self.records
    }
}

impl From<Vec<BranchRecord>> for RouteSnapshot {
    fn from(records: Vec<BranchRecord>) -> Self {
        Self::new(records)
    }
}
