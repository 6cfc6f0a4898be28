//! Aggregation over records and derived rows

use spinemotion_common::Result;

/// Turns a slice of rows into one aggregate table.
///
/// Aggregators are pure: the same input always yields the same output, and
/// nothing is cached between calls.
pub trait Aggregator {
    /// Row type consumed
    type Input;
    /// Table type produced
    type Output;

    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Aggregate `rows`.
    fn aggregate(&self, rows: &[Self::Input]) -> Result<Self::Output>;
}
