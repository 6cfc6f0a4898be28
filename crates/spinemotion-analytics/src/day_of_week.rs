//! Activity count per day of the week

use crate::aggregator::Aggregator;
use crate::features::{CalendarLabels, DerivedRow};
use chrono::Weekday;
use serde::Serialize;
use spinemotion_common::Result;
use tracing::{debug, instrument};

/// Activity count for one weekday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayOfWeekCount {
    /// Weekday
    pub weekday: Weekday,
    /// Localized label
    pub label: String,
    /// Rows falling on this weekday
    pub count: u64,
}

/// Counts rows per weekday, always reporting all seven days Monday first.
#[derive(Debug, Clone)]
pub struct DayOfWeekAggregator {
    labels: CalendarLabels,
}

impl DayOfWeekAggregator {
    /// Aggregator labelling days with `labels`.
    pub const fn new(labels: CalendarLabels) -> Self {
        Self { labels }
    }
}

impl Aggregator for DayOfWeekAggregator {
    type Input = DerivedRow;
    type Output = Vec<DayOfWeekCount>;

    fn name(&self) -> &'static str {
        "day_of_week"
    }

    #[instrument(skip(self, rows), fields(rows = rows.len()))]
    fn aggregate(&self, rows: &[DerivedRow]) -> Result<Vec<DayOfWeekCount>> {
        let mut counts = [0_u64; 7];
        for row in rows {
            counts[row.weekday.num_days_from_monday() as usize] += 1;
        }

        let mut weekday = Weekday::Mon;
        let mut result = Vec::with_capacity(7);
        for count in counts {
            result.push(DayOfWeekCount {
                weekday,
                label: self.labels.weekday(weekday).to_string(),
                count,
            });
            weekday = weekday.succ();
        }

        debug!("Aggregated {} day of week data points", result.len());
        Ok(result)
    }
}
