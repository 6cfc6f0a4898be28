//! Most frequently performed movements, overall and per gender

use crate::aggregator::Aggregator;
use crate::gender::{GenderBucket, GenderClassifier};
use serde::Serialize;
use spinemotion_common::{share_percent, DashboardError, Record, Result};
use std::collections::HashMap;
use tracing::{debug, instrument};

/// Activity count for one movement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryCount {
    /// Movement name
    pub category: String,
    /// Rows with this movement
    pub count: u64,
    /// Percentage of the rows aggregated
    pub share: f64,
}

/// Counts rows per movement, most frequent first.
///
/// Ties keep the order in which the movements first appear.
#[derive(Debug, Clone, Copy, Default)]
pub struct CategoryAggregator;

impl CategoryAggregator {
    /// New aggregator
    pub const fn new() -> Self {
        Self
    }

    fn count<'a, I>(records: I) -> Result<Vec<CategoryCount>>
    where
        I: IntoIterator<Item = &'a Record>,
    {
        let mut order: Vec<&str> = Vec::new();
        let mut counts: HashMap<&str, u64> = HashMap::new();
        let mut total = 0_u64;

        for record in records {
            let category = record.category.as_deref().ok_or_else(|| {
                DashboardError::parse("missing category value", "category")
                    .for_record(record.display_id())
            })?;
            let count = counts.entry(category).or_insert_with(|| {
                order.push(category);
                0
            });
            *count += 1;
            total += 1;
        }

        let mut result: Vec<CategoryCount> = order
            .into_iter()
            .map(|category| {
                let count = counts[category];
                CategoryCount {
                    category: category.to_string(),
                    count,
                    share: share_percent(count, total),
                }
            })
            .collect();

        // Stable, so equal counts stay in first-seen order.
        result.sort_by(|a, b| b.count.cmp(&a.count));
        Ok(result)
    }
}

impl Aggregator for CategoryAggregator {
    type Input = Record;
    type Output = Vec<CategoryCount>;

    fn name(&self) -> &'static str {
        "category"
    }

    #[instrument(skip(self, rows), fields(rows = rows.len()))]
    fn aggregate(&self, rows: &[Record]) -> Result<Vec<CategoryCount>> {
        let result = Self::count(rows)?;
        debug!("Aggregated {} category data points", result.len());
        Ok(result)
    }
}

/// Category counts computed separately for male and female users.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenderPartition {
    /// Counts over rows with the male label
    pub male: Vec<CategoryCount>,
    /// Counts over rows with the female label
    pub female: Vec<CategoryCount>,
}

impl GenderPartition {
    /// Rows in the male partition
    pub fn male_total(&self) -> u64 {
        self.male.iter().map(|c| c.count).sum()
    }

    /// Rows in the female partition
    pub fn female_total(&self) -> u64 {
        self.female.iter().map(|c| c.count).sum()
    }
}

/// Splits rows by exact gender label and counts movements in each part.
///
/// Rows whose label matches neither gender belong to neither part.
#[derive(Debug, Clone)]
pub struct GenderPartitionAggregator {
    classifier: GenderClassifier,
}

impl GenderPartitionAggregator {
    /// Aggregator using `classifier` to split rows.
    pub const fn new(classifier: GenderClassifier) -> Self {
        Self { classifier }
    }

    fn partition<'a>(
        &'a self,
        rows: &'a [Record],
        bucket: GenderBucket,
    ) -> impl Iterator<Item = &'a Record> + 'a {
        rows.iter()
            .filter(move |record| self.classifier.classify(record.gender.as_deref()) == bucket)
    }
}

impl Aggregator for GenderPartitionAggregator {
    type Input = Record;
    type Output = GenderPartition;

    fn name(&self) -> &'static str {
        "gender_partition"
    }

    #[instrument(skip(self, rows), fields(rows = rows.len()))]
    fn aggregate(&self, rows: &[Record]) -> Result<GenderPartition> {
        let partition = GenderPartition {
            male: CategoryAggregator::count(self.partition(rows, GenderBucket::Male))?,
            female: CategoryAggregator::count(self.partition(rows, GenderBucket::Female))?,
        };

        debug!(
            male = partition.male_total(),
            female = partition.female_total(),
            excluded = rows.len() as u64 - partition.male_total() - partition.female_total(),
            "Partitioned categories by gender"
        );
        Ok(partition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spinemotion_common::test_utils::record_fixtures::record;

    fn records() -> Vec<Record> {
        vec![
            record("1", "2024-01-15 08:00:00", "Child Pose", "Laki-laki"),
            record("2", "2024-01-15 08:10:00", "Cat Cow", "Perempuan"),
            record("3", "2024-01-15 08:20:00", "Cat Cow", "Laki-laki"),
            record("4", "2024-01-15 08:30:00", "Cobra", "Perempuan"),
            record("5", "2024-01-15 08:40:00", "Child Pose", "lainnya"),
        ]
    }

    #[test]
    fn test_sorted_by_count_then_first_seen() {
        let result = CategoryAggregator::new().aggregate(&records()).unwrap();
        let order: Vec<(&str, u64)> = result.iter().map(|c| (c.category.as_str(), c.count)).collect();
        assert_eq!(order, [("Child Pose", 2), ("Cat Cow", 2), ("Cobra", 1)]);
        assert!((result[0].share - 40.0).abs() < 1e-9);
        assert!((result[2].share - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_category_view_ignores_timestamps() {
        let rows = vec![
            Record::new("a").with_category("Plank").with_timestamp("garbage"),
            Record::new("b").with_category("Plank"),
        ];
        let result = CategoryAggregator::new().aggregate(&rows).unwrap();
        assert_eq!(result[0].count, 2);
    }

    #[test]
    fn test_missing_category_is_parse_error() {
        let rows = vec![Record::new("a")];
        let err = CategoryAggregator::new().aggregate(&rows).unwrap_err();
        assert_eq!(err.kind(), "parse");
    }

    #[test]
    fn test_gender_partition_excludes_other_labels() {
        let aggregator =
            GenderPartitionAggregator::new(GenderClassifier::new("Laki-laki", "Perempuan"));
        let partition = aggregator.aggregate(&records()).unwrap();

        assert_eq!(partition.male_total(), 2);
        assert_eq!(partition.female_total(), 2);
        assert_eq!(partition.male[0].category, "Child Pose");
        assert!((partition.male[0].share - 50.0).abs() < 1e-9);
        assert_eq!(partition.female[0].category, "Cat Cow");
    }

    #[test]
    fn test_empty_input() {
        assert!(CategoryAggregator::new().aggregate(&[]).unwrap().is_empty());
        let partition = GenderPartitionAggregator::new(GenderClassifier::new("M", "F"))
            .aggregate(&[])
            .unwrap();
        assert!(partition.male.is_empty() && partition.female.is_empty());
    }
}
