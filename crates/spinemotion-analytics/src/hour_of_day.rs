//! Activity count per hour of day

use crate::aggregator::Aggregator;
use crate::features::DerivedRow;
use serde::Serialize;
use spinemotion_common::{DashboardError, Result};
use tracing::{debug, instrument};

/// Activity count for one hour bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HourCount {
    /// Hour of day, 0 to 23
    pub hour: u8,
    /// Rows in this hour
    pub count: u64,
}

/// Counts rows per hour of day.
#[derive(Debug, Clone, Copy)]
pub struct HourOfDayAggregator {
    complete_axis: bool,
}

impl HourOfDayAggregator {
    /// With `complete_axis` every hour 0 to 23 is reported, otherwise only
    /// hours that occur in the data.
    pub const fn new(complete_axis: bool) -> Self {
        Self { complete_axis }
    }
}

impl Aggregator for HourOfDayAggregator {
    type Input = DerivedRow;
    type Output = Vec<HourCount>;

    fn name(&self) -> &'static str {
        "hour_of_day"
    }

    #[instrument(skip(self, rows), fields(rows = rows.len()))]
    fn aggregate(&self, rows: &[DerivedRow]) -> Result<Vec<HourCount>> {
        let mut counts = [0_u64; 24];
        for row in rows {
            let slot = counts.get_mut(usize::from(row.hour)).ok_or_else(|| {
                DashboardError::parse(format!("hour {} is out of range", row.hour), "hour")
                    .for_record(row.record.display_id())
            })?;
            *slot += 1;
        }

        let result: Vec<HourCount> = (0_u8..24)
            .zip(counts)
            .filter(|(_, count)| self.complete_axis || *count > 0)
            .map(|(hour, count)| HourCount { hour, count })
            .collect();

        debug!("Aggregated {} hourly data points", result.len());
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::{CalendarLabels, FeatureDeriver, TimestampParser};
    use spinemotion_common::test_utils::record_fixtures::record;
    use spinemotion_config::RowPolicy;

    fn rows() -> Vec<DerivedRow> {
        let deriver = FeatureDeriver::new(
            TimestampParser::new("UTC").unwrap(),
            CalendarLabels::default(),
            RowPolicy::Abort,
            "tanggal",
        );
        deriver
            .derive(vec![
                record("a", "2024-01-15 08:30:00", "Cat Cow", "Laki-laki"),
                record("b", "2024-01-15 08:05:00", "Cobra", "Perempuan"),
                record("c", "2024-01-16 23:59:00", "Cobra", "Perempuan"),
            ])
            .unwrap()
            .rows
    }

    #[test]
    fn test_complete_axis() {
        let result = HourOfDayAggregator::new(true).aggregate(&rows()).unwrap();
        assert_eq!(result.len(), 24);
        assert_eq!(result[8], HourCount { hour: 8, count: 2 });
        assert_eq!(result[23], HourCount { hour: 23, count: 1 });
        assert_eq!(result.iter().map(|h| h.count).sum::<u64>(), 3);
    }

    #[test]
    fn test_observed_hours_only() {
        let result = HourOfDayAggregator::new(false).aggregate(&rows()).unwrap();
        assert_eq!(
            result,
            [HourCount { hour: 8, count: 2 }, HourCount { hour: 23, count: 1 }]
        );
    }

    #[test]
    fn test_out_of_range_hour_rejected() {
        let mut rows = rows();
        rows[0].hour = 24;
        assert!(HourOfDayAggregator::new(true).aggregate(&rows).is_err());
    }
}
