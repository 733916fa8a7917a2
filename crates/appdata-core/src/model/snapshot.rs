use serde::{Deserialize, Serialize};

use crate::errors::SnapshotError;

/// The full application dataset as exchanged with the API
///
/// This is the desired end state of the store: loading it replaces every
/// department, package, user, asset, assignment, review and history row.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppData {
    #[serde(default)]
    pub departments: Vec<Department>,
    #[serde(default)]
    pub packages: Vec<Package>,
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub assets: Vec<Asset>,
    #[serde(default)]
    pub reviews: Vec<Review>,
}

impl AppData {
    /// Decode a snapshot document from JSON
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Decode a snapshot document from a reader
    pub fn from_reader<R: std::io::Read>(reader: R) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_reader(reader)?)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    pub dept_id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    pub package_id: i64,
    pub name: String,
    /// Identifier of the package in the external authorization system
    #[serde(default)]
    pub emass_id: Option<String>,
    /// Package requires a risk acceptance review
    #[serde(default, deserialize_with = "super::truthy::deserialize")]
    pub req_rar: bool,
    #[serde(default)]
    pub poc_name: Option<String>,
    #[serde(default)]
    pub poc_email: Option<String>,
    #[serde(default)]
    pub poc_phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub user_id: i64,
    pub username: String,
    #[serde(default)]
    pub display: Option<String>,
    #[serde(default)]
    pub dept_id: Option<i64>,
    #[serde(default)]
    pub access_level: i64,
    #[serde(default, deserialize_with = "super::truthy::deserialize")]
    pub can_admin: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub asset_id: i64,
    pub name: String,
    #[serde(default)]
    pub ip: Option<String>,
    #[serde(default)]
    pub dept_id: Option<i64>,
    pub package_id: i64,
    #[serde(default, deserialize_with = "super::truthy::deserialize")]
    pub nonnetwork: bool,
    #[serde(default)]
    pub stig_reviewers: Vec<StigReviewers>,
}

/// Users allowed to review one benchmark on the owning asset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StigReviewers {
    pub benchmark_id: String,
    #[serde(default)]
    pub user_ids: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    /// Assigned by the store on load; any value supplied here is ignored
    #[serde(default)]
    pub review_id: Option<i64>,
    pub asset_id: i64,
    pub rule_id: String,
    pub result: String,
    #[serde(default)]
    pub result_comment: Option<String>,
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub action_comment: Option<String>,
    pub user_id: i64,
    #[serde(default, deserialize_with = "super::truthy::deserialize")]
    pub auto_result: bool,
    pub ts: String,
    #[serde(default)]
    pub reject_text: Option<String>,
    #[serde(default)]
    pub reject_user_id: Option<i64>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub activity_type: String,
    #[serde(default)]
    pub column_name: Option<String>,
    #[serde(default)]
    pub old_value: Option<String>,
    #[serde(default)]
    pub new_value: Option<String>,
    pub user_id: i64,
    pub ts: String,
}
