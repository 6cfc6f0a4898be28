//! Serializable view results

use serde::Serialize;
use spinemotion_analytics::{
    CategoryCount, DayClassCount, DayOfWeekCount, GenderPartition, HourCount, MonthlyUsers,
    UserCounts,
};

/// Movement popularity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryReport {
    /// Localized view title
    pub title: String,
    /// Records aggregated
    pub records: usize,
    /// Rows dropped under the skip policy
    pub skipped: usize,
    /// Counts over all records, most frequent first
    pub counts: Vec<CategoryCount>,
    /// Counts per gender
    pub by_gender: GenderPartition,
}

/// Activity over time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemporalReport {
    /// Localized view title
    pub title: String,
    /// Rows aggregated
    pub records: usize,
    /// Rows dropped under the skip policy
    pub skipped: usize,
    /// Monday to Sunday
    pub day_of_week: Vec<DayOfWeekCount>,
    /// Hour buckets in ascending order
    pub hour_of_day: Vec<HourCount>,
    /// Working day, then weekend
    pub day_class: Vec<DayClassCount>,
}

/// Distinct users per month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UsersReport {
    /// Localized view title
    pub title: String,
    /// Rows aggregated
    pub records: usize,
    /// Rows dropped under the skip policy
    pub skipped: usize,
    /// Calendar months, first to last observed
    pub months: Vec<MonthlyUsers>,
    /// Totals over the snapshot
    pub totals: UserCounts,
}

/// Result of one view run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "view", rename_all = "lowercase")]
pub enum ViewReport {
    /// `--view category`
    Category(CategoryReport),
    /// `--view temporal`
    Temporal(TemporalReport),
    /// `--view users`
    Users(UsersReport),
}

impl ViewReport {
    /// Localized title of the view
    pub fn title(&self) -> &str {
        match self {
            Self::Category(report) => &report.title,
            Self::Temporal(report) => &report.title,
            Self::Users(report) => &report.title,
        }
    }

    /// Rows dropped under the skip policy
    pub const fn skipped(&self) -> usize {
        match self {
            Self::Category(report) => report.skipped,
            Self::Temporal(report) => report.skipped,
            Self::Users(report) => report.skipped,
        }
    }
}
