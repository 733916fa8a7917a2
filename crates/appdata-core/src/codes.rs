//! Review code tables
//!
//! The API exchanges review result/action/status as lowercase names; the store
//! keeps numeric ids. The numeric values are part of the stored data and must
//! not be renumbered.

/// Evaluation outcome of a rule on an asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReviewResult {
    NotChecked,
    NotApplicable,
    Pass,
    Fail,
    Unknown,
    Error,
    NotSelected,
    Informational,
    Fixed,
}

impl ReviewResult {
    pub const ALL: [ReviewResult; 9] = [
        ReviewResult::NotChecked,
        ReviewResult::NotApplicable,
        ReviewResult::Pass,
        ReviewResult::Fail,
        ReviewResult::Unknown,
        ReviewResult::Error,
        ReviewResult::NotSelected,
        ReviewResult::Informational,
        ReviewResult::Fixed,
    ];

    pub fn from_api(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.api_name() == name)
    }

    pub fn api_name(self) -> &'static str {
        match self {
            ReviewResult::NotChecked => "notchecked",
            ReviewResult::NotApplicable => "notapplicable",
            ReviewResult::Pass => "pass",
            ReviewResult::Fail => "fail",
            ReviewResult::Unknown => "unknown",
            ReviewResult::Error => "error",
            ReviewResult::NotSelected => "notselected",
            ReviewResult::Informational => "informational",
            ReviewResult::Fixed => "fixed",
        }
    }

    pub fn code(self) -> i64 {
        match self {
            ReviewResult::NotChecked => 1,
            ReviewResult::NotApplicable => 2,
            ReviewResult::Pass => 3,
            ReviewResult::Fail => 4,
            ReviewResult::Unknown => 5,
            ReviewResult::Error => 6,
            ReviewResult::NotSelected => 7,
            ReviewResult::Informational => 8,
            ReviewResult::Fixed => 9,
        }
    }
}

/// Planned response to a failing rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReviewAction {
    Remediate,
    Mitigate,
    Exception,
}

impl ReviewAction {
    pub fn from_api(name: &str) -> Option<Self> {
        match name {
            "remediate" => Some(ReviewAction::Remediate),
            "mitigate" => Some(ReviewAction::Mitigate),
            "exception" => Some(ReviewAction::Exception),
            _ => None,
        }
    }

    pub fn code(self) -> i64 {
        match self {
            ReviewAction::Remediate => 1,
            ReviewAction::Mitigate => 2,
            ReviewAction::Exception => 3,
        }
    }
}

/// Workflow status of a review
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ReviewStatus {
    #[default]
    Saved,
    Submitted,
    Rejected,
    Accepted,
}

impl ReviewStatus {
    pub fn from_api(name: &str) -> Option<Self> {
        match name {
            "saved" => Some(ReviewStatus::Saved),
            "submitted" => Some(ReviewStatus::Submitted),
            "rejected" => Some(ReviewStatus::Rejected),
            "accepted" => Some(ReviewStatus::Accepted),
            _ => None,
        }
    }

    pub fn code(self) -> i64 {
        match self {
            ReviewStatus::Saved => 0,
            ReviewStatus::Submitted => 1,
            ReviewStatus::Rejected => 2,
            ReviewStatus::Accepted => 3,
        }
    }
}
