//! Runs a view: fetch, decode, derive, aggregate.

use crate::report::{CategoryReport, TemporalReport, UsersReport, ViewReport};
use crate::view::View;
use spinemotion_analytics::{
    Aggregator, CalendarLabels, CategoryAggregator, DataLoader, DayClassAggregator,
    DayOfWeekAggregator, DerivedRows, DocumentStore, FeatureDeriver, GenderClassifier,
    GenderPartitionAggregator, HourOfDayAggregator, MonthlyUsersAggregator, RecordDecoder,
    RecordSet, Snapshot, TimestampParser,
};
use spinemotion_common::Result;
use spinemotion_config::Config;
use spinemotion_i18n::Messages;
use tracing::{debug, info, instrument};

/// Computes view reports from a store snapshot.
///
/// Each call to [`ViewRunner::run`] performs one complete fetch and
/// aggregation; nothing carries over from one run to the next.
#[derive(Debug)]
pub struct ViewRunner {
    config: Config,
    messages: Messages,
    decoder: RecordDecoder,
    deriver: FeatureDeriver,
}

impl ViewRunner {
    /// Runner for a validated configuration and the messages of the output locale.
    pub fn new(config: Config, messages: Messages) -> Result<Self> {
        let (working_day, weekend) = messages.day_class_labels()?;
        let labels = CalendarLabels::new(messages.weekday_labels()?, working_day, weekend);
        let deriver = FeatureDeriver::new(
            TimestampParser::new(&config.features.timezone)?,
            labels,
            config.features.invalid_rows,
            config.fields.timestamp.clone(),
        );

        Ok(Self {
            decoder: RecordDecoder::new(config.fields.clone()),
            deriver,
            config,
            messages,
        })
    }

    /// Messages used for titles and labels
    pub const fn messages(&self) -> &Messages {
        &self.messages
    }

    /// Configuration in use
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Fetch the configured collection from `store` and compute `view`.
    #[instrument(skip(self, store), fields(view = %view))]
    pub async fn run(&self, view: View, store: &dyn DocumentStore) -> Result<ViewReport> {
        let snapshot = DataLoader::new(store)
            .load(&self.config.store.database, &self.config.store.collection)
            .await?;
        self.build(view, &snapshot)
    }

    /// Compute `view` from an already fetched snapshot.
    pub fn build(&self, view: View, snapshot: &Snapshot) -> Result<ViewReport> {
        let set = snapshot.records(
            &self.decoder,
            view.required_fields(),
            self.config.features.invalid_rows,
        )?;
        let title = self.messages.get(view.title_key())?;

        let report = match view {
            View::Category => ViewReport::Category(self.category(title, set)?),
            View::Temporal => ViewReport::Temporal(self.temporal(title, set)?),
            View::Users => ViewReport::Users(self.users(title, set)?),
        };

        info!(%view, skipped = report.skipped(), "View computed");
        Ok(report)
    }

    fn category(&self, title: String, set: RecordSet) -> Result<CategoryReport> {
        let classifier = GenderClassifier::from_config(&self.config.gender);

        Ok(CategoryReport {
            title,
            records: set.records.len(),
            skipped: set.skipped,
            counts: apply(&CategoryAggregator::new(), &set.records)?,
            by_gender: apply(&GenderPartitionAggregator::new(classifier), &set.records)?,
        })
    }

    fn derive(&self, set: RecordSet) -> Result<DerivedRows> {
        let mut derived = self.deriver.derive(set.records)?;
        derived.skipped += set.skipped;
        Ok(derived)
    }

    fn temporal(&self, title: String, set: RecordSet) -> Result<TemporalReport> {
        let derived = self.derive(set)?;
        let labels = self.deriver.labels().clone();

        Ok(TemporalReport {
            title,
            records: derived.rows.len(),
            skipped: derived.skipped,
            day_of_week: apply(&DayOfWeekAggregator::new(labels.clone()), &derived.rows)?,
            hour_of_day: apply(
                &HourOfDayAggregator::new(self.config.features.complete_hour_axis),
                &derived.rows,
            )?,
            day_class: apply(&DayClassAggregator::new(labels), &derived.rows)?,
        })
    }

    fn users(&self, title: String, set: RecordSet) -> Result<UsersReport> {
        let derived = self.derive(set)?;
        let aggregator = MonthlyUsersAggregator::new(
            GenderClassifier::from_config(&self.config.gender),
            self.config.gender.unrecognized,
        );
        let table = apply(&aggregator, &derived.rows)?;

        Ok(UsersReport {
            title,
            records: derived.rows.len(),
            skipped: derived.skipped,
            months: table.months,
            totals: table.totals,
        })
    }
}

fn apply<A: Aggregator>(aggregator: &A, rows: &[A::Input]) -> Result<A::Output> {
    let output = aggregator.aggregate(rows)?;
    debug!(aggregator = aggregator.name(), "Aggregation complete");
    Ok(output)
}
