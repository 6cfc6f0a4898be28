//! Monthly count of distinct users, split by gender

use crate::aggregator::Aggregator;
use crate::features::DerivedRow;
use crate::gender::{GenderBucket, GenderClassifier};
use chrono::{Datelike, Months, NaiveDate};
use serde::Serialize;
use spinemotion_common::{DashboardError, RecordId, Result};
use spinemotion_config::UnrecognizedGender;
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, instrument};

/// User counts for a month or for the whole snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct UserCounts {
    /// Distinct identifiers
    pub total_users: u64,
    /// Users counted as male
    pub total_male: u64,
    /// `total_users - total_male - total_unknown`
    pub total_female: u64,
    /// Users with an unrecognized label, under the `unknown` policy
    pub total_unknown: u64,
}

/// One month of the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyUsers {
    /// First day of the month
    pub month: NaiveDate,
    /// `%b-%y` label, e.g. `Jan-24`
    pub label: String,
    /// Counts for the month
    #[serde(flatten)]
    pub counts: UserCounts,
}

/// Monthly rows in calendar order plus grand totals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MonthlyUsersTable {
    /// One row per month from the first to the last observed month
    pub months: Vec<MonthlyUsers>,
    /// Totals over the whole snapshot
    pub totals: UserCounts,
}

/// Bucket a user is counted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Counted {
    Male,
    Female,
    Unknown,
}

/// Distinct users seen in one bucket; the first row of an identifier decides its gender.
#[derive(Debug, Default)]
struct Tally<'a> {
    users: HashMap<&'a RecordId, Counted>,
}

impl<'a> Tally<'a> {
    fn add(&mut self, id: &'a RecordId, counted: Counted) {
        self.users.entry(id).or_insert(counted);
    }

    fn counts(&self) -> UserCounts {
        let count = |bucket| self.users.values().filter(|c| **c == bucket).count() as u64;
        let total_users = self.users.len() as u64;
        let total_male = count(Counted::Male);
        let total_unknown = count(Counted::Unknown);

        UserCounts {
            total_users,
            total_male,
            total_female: total_users - total_male - total_unknown,
            total_unknown,
        }
    }
}

/// Groups rows by calendar month and counts distinct users per gender.
#[derive(Debug, Clone)]
pub struct MonthlyUsersAggregator {
    classifier: GenderClassifier,
    unrecognized: UnrecognizedGender,
}

impl MonthlyUsersAggregator {
    /// Aggregator using `classifier`, with `unrecognized` deciding where
    /// missing or unknown labels go.
    pub const fn new(classifier: GenderClassifier, unrecognized: UnrecognizedGender) -> Self {
        Self {
            classifier,
            unrecognized,
        }
    }

    fn counted(&self, row: &DerivedRow) -> Option<Counted> {
        match self.classifier.classify(row.record.gender.as_deref()) {
            GenderBucket::Male => Some(Counted::Male),
            GenderBucket::Female => Some(Counted::Female),
            GenderBucket::Unrecognized => match self.unrecognized {
                UnrecognizedGender::Male => Some(Counted::Male),
                UnrecognizedGender::Exclude => None,
                UnrecognizedGender::Unknown => Some(Counted::Unknown),
            },
        }
    }
}

/// First day of the month containing `date`.
fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

impl Aggregator for MonthlyUsersAggregator {
    type Input = DerivedRow;
    type Output = MonthlyUsersTable;

    fn name(&self) -> &'static str {
        "monthly_users"
    }

    #[instrument(skip(self, rows), fields(rows = rows.len(), policy = ?self.unrecognized))]
    fn aggregate(&self, rows: &[DerivedRow]) -> Result<MonthlyUsersTable> {
        let mut months: BTreeMap<NaiveDate, Tally<'_>> = BTreeMap::new();
        let mut overall = Tally::default();

        for row in rows {
            let id = row.record.id.as_ref().ok_or_else(|| {
                DashboardError::parse("missing identifier", "id").for_record(row.record.display_id())
            })?;
            let Some(counted) = self.counted(row) else {
                continue;
            };

            months
                .entry(month_start(row.timestamp.date()))
                .or_default()
                .add(id, counted);
            overall.add(id, counted);
        }

        let mut table = MonthlyUsersTable {
            months: Vec::with_capacity(months.len()),
            totals: overall.counts(),
        };

        // Months without rows between the first and the last are reported as zero.
        if let (Some(first), Some(last)) = (
            months.keys().next().copied(),
            months.keys().next_back().copied(),
        ) {
            let mut month = first;
            while month <= last {
                table.months.push(MonthlyUsers {
                    month,
                    label: month.format("%b-%y").to_string(),
                    counts: months.get(&month).map(Tally::counts).unwrap_or_default(),
                });
                month = match month.checked_add_months(Months::new(1)) {
                    Some(next) => next,
                    None => break,
                };
            }
        }

        debug!("Aggregated {} monthly data points", table.months.len());
        Ok(table)
    }
}
