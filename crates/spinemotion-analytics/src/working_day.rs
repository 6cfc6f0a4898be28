//! Activity count on working days versus weekends

use crate::aggregator::Aggregator;
use crate::features::{CalendarLabels, DayClass, DerivedRow};
use serde::Serialize;
use spinemotion_common::Result;
use tracing::{debug, instrument};

/// Activity count for one day class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayClassCount {
    /// Day class
    pub class: DayClass,
    /// Localized label
    pub label: String,
    /// Rows in this class
    pub count: u64,
}

/// Counts rows per day class, working days first, both classes always present.
#[derive(Debug, Clone)]
pub struct DayClassAggregator {
    labels: CalendarLabels,
}

impl DayClassAggregator {
    /// Aggregator labelling classes with `labels`.
    pub const fn new(labels: CalendarLabels) -> Self {
        Self { labels }
    }
}

impl Aggregator for DayClassAggregator {
    type Input = DerivedRow;
    type Output = Vec<DayClassCount>;

    fn name(&self) -> &'static str {
        "day_class"
    }

    #[instrument(skip(self, rows), fields(rows = rows.len()))]
    fn aggregate(&self, rows: &[DerivedRow]) -> Result<Vec<DayClassCount>> {
        let result: Vec<DayClassCount> = DayClass::ALL
            .into_iter()
            .map(|class| DayClassCount {
                class,
                label: self.labels.day_class(class).to_string(),
                count: rows.iter().filter(|row| row.day_class == class).count() as u64,
            })
            .collect();

        debug!("Aggregated {} day class data points", result.len());
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::{FeatureDeriver, TimestampParser};
    use spinemotion_common::test_utils::record_fixtures::record;
    use spinemotion_config::RowPolicy;

    #[test]
    fn test_both_classes_reported() {
        let deriver = FeatureDeriver::new(
            TimestampParser::new("UTC").unwrap(),
            CalendarLabels::default(),
            RowPolicy::Abort,
            "tanggal",
        );
        let rows = deriver
            .derive(vec![
                record("a", "2024-01-15 08:30:00", "Cat Cow", "Laki-laki"),
                record("b", "2024-01-16 08:05:00", "Cobra", "Perempuan"),
            ])
            .unwrap()
            .rows;

        let result = DayClassAggregator::new(CalendarLabels::default())
            .aggregate(&rows)
            .unwrap();
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].label, "Working Day");
        assert_eq!(result[0].count, 2);
        assert_eq!(result[1].class, DayClass::Weekend);
        assert_eq!(result[1].count, 0);
    }
}
