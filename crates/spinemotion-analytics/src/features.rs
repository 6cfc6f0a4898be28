//! Calendar feature derivation: weekday label, hour of day and day class.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Timelike, Weekday};
use chrono_tz::Tz;
use serde::Serialize;
use spinemotion_common::{DashboardError, RawTimestamp, Record, Result};
use spinemotion_config::RowPolicy;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, instrument, warn};

/// Naive date-time layouts, tried in order.
const DATETIME_FORMATS: [&str; 5] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
];

/// Layouts carrying a UTC offset that RFC 3339 parsing rejects, such as the
/// `+0000` suffix of legacy `mongoexport` dates.
const OFFSET_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f %z",
];

/// Date-only layouts, read as midnight.
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];

/// Working day or weekend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DayClass {
    /// Monday to Friday.
    WorkingDay,
    /// Saturday and Sunday.
    Weekend,
}

impl DayClass {
    /// Both classes in reporting order.
    pub const ALL: [Self; 2] = [Self::WorkingDay, Self::Weekend];
}

impl fmt::Display for DayClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WorkingDay => write!(f, "Working Day"),
            Self::Weekend => write!(f, "Weekend"),
        }
    }
}

/// Classify a timestamp by its weekday index, Monday being 0.
///
/// The weekday label and the day class of a derived row both come from the
/// same weekday, and this is the only place the class is decided.
pub fn classify_day(timestamp: &NaiveDateTime) -> DayClass {
    if timestamp.weekday().num_days_from_monday() < 5 {
        DayClass::WorkingDay
    } else {
        DayClass::Weekend
    }
}

/// Display labels for weekdays and day classes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarLabels {
    weekdays: [String; 7],
    working_day: String,
    weekend: String,
}

impl CalendarLabels {
    /// Labels with weekdays given Monday first.
    pub const fn new(weekdays: [String; 7], working_day: String, weekend: String) -> Self {
        Self {
            weekdays,
            working_day,
            weekend,
        }
    }

    /// Label for a weekday
    pub fn weekday(&self, weekday: Weekday) -> &str {
        &self.weekdays[weekday.num_days_from_monday() as usize]
    }

    /// Label for a day class
    pub fn day_class(&self, class: DayClass) -> &str {
        match class {
            DayClass::WorkingDay => &self.working_day,
            DayClass::Weekend => &self.weekend,
        }
    }

    /// All weekday labels, Monday first
    pub const fn weekdays(&self) -> &[String; 7] {
        &self.weekdays
    }
}

impl Default for CalendarLabels {
    fn default() -> Self {
        let mut weekdays: [String; 7] = Default::default();
        let mut day = Weekday::Mon;
        for label in &mut weekdays {
            *label = day.to_string();
            day = day.succ();
        }
        Self::new(weekdays, DayClass::WorkingDay.to_string(), DayClass::Weekend.to_string())
    }
}

/// Parses stored timestamps into wall-clock time of one time zone.
#[derive(Debug, Clone, Copy)]
pub struct TimestampParser {
    timezone: Tz,
}

impl TimestampParser {
    /// Create a parser for an IANA time zone name.
    pub fn new(timezone: &str) -> Result<Self> {
        let timezone = Tz::from_str(timezone)
            .map_err(|_| DashboardError::config(format!("unknown time zone '{timezone}'")))?;
        Ok(Self { timezone })
    }

    /// Parse a stored value. `field` names the source field in errors.
    pub fn parse(&self, raw: &RawTimestamp, field: &str) -> Result<NaiveDateTime> {
        match raw {
            RawTimestamp::Text(text) => self.parse_text(text.trim()).ok_or_else(|| {
                DashboardError::parse(format!("unrecognized timestamp '{text}'"), field)
            }),
            RawTimestamp::EpochSeconds(secs) => DateTime::from_timestamp(*secs, 0)
                .map(|utc| self.to_local(&utc))
                .ok_or_else(|| {
                    DashboardError::parse(format!("epoch seconds {secs} out of range"), field)
                }),
            RawTimestamp::EpochMillis(millis) => DateTime::from_timestamp_millis(*millis)
                .map(|utc| self.to_local(&utc))
                .ok_or_else(|| {
                    DashboardError::parse(format!("epoch milliseconds {millis} out of range"), field)
                }),
        }
    }

    fn parse_text(&self, text: &str) -> Option<NaiveDateTime> {
        if let Ok(with_offset) = DateTime::parse_from_rfc3339(text) {
            return Some(self.to_local(&with_offset));
        }
        if let Some(with_offset) = OFFSET_FORMATS
            .iter()
            .find_map(|format| DateTime::parse_from_str(text, format).ok())
        {
            return Some(self.to_local(&with_offset));
        }

        // Values without an offset are already wall-clock time in the zone.
        DATETIME_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
            .or_else(|| {
                DATE_FORMATS
                    .iter()
                    .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
                    .map(|date| date.and_time(NaiveTime::MIN))
            })
    }

    fn to_local<Z: TimeZone>(&self, instant: &DateTime<Z>) -> NaiveDateTime {
        instant.with_timezone(&self.timezone).naive_local()
    }
}

/// A record with its calendar features.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DerivedRow {
    /// Source record.
    pub record: Record,
    /// Parsed wall-clock time.
    pub timestamp: NaiveDateTime,
    /// Day of the week.
    pub weekday: Weekday,
    /// Localized weekday label.
    pub day_label: String,
    /// Hour of day, 0 to 23.
    pub hour: u8,
    /// Working day or weekend.
    pub day_class: DayClass,
}

/// Derived rows plus the count of rows the skip policy dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DerivedRows {
    /// Successfully derived rows, in input order.
    pub rows: Vec<DerivedRow>,
    /// Records dropped under the skip policy.
    pub skipped: usize,
}

/// Adds calendar features to records.
#[derive(Debug, Clone)]
pub struct FeatureDeriver {
    parser: TimestampParser,
    labels: CalendarLabels,
    policy: RowPolicy,
    timestamp_field: String,
}

impl FeatureDeriver {
    /// Create a deriver. `timestamp_field` names the source field in errors.
    pub fn new(
        parser: TimestampParser,
        labels: CalendarLabels,
        policy: RowPolicy,
        timestamp_field: impl Into<String>,
    ) -> Self {
        Self {
            parser,
            labels,
            policy,
            timestamp_field: timestamp_field.into(),
        }
    }

    /// Labels used for weekday and class names
    pub const fn labels(&self) -> &CalendarLabels {
        &self.labels
    }

    /// Derive one row.
    #[allow(clippy::cast_possible_truncation)]
    pub fn derive_one(&self, record: Record) -> Result<DerivedRow> {
        let raw = record.timestamp.as_ref().ok_or_else(|| {
            DashboardError::parse("missing timestamp", self.timestamp_field.as_str())
                .for_record(record.display_id())
        })?;

        let timestamp = self
            .parser
            .parse(raw, &self.timestamp_field)
            .map_err(|e| e.for_record(record.display_id()))?;

        let weekday = timestamp.weekday();
        Ok(DerivedRow {
            day_label: self.labels.weekday(weekday).to_string(),
            // Timelike::hour is always below 24.
            hour: timestamp.hour() as u8,
            day_class: classify_day(&timestamp),
            weekday,
            timestamp,
            record,
        })
    }

    /// Derive every record, applying the row policy to failures.
    #[instrument(skip(self, records), fields(records = records.len()))]
    pub fn derive(&self, records: Vec<Record>) -> Result<DerivedRows> {
        let mut derived = DerivedRows::default();

        for record in records {
            match self.derive_one(record) {
                Ok(row) => derived.rows.push(row),
                Err(err) => match self.policy {
                    RowPolicy::Abort => return Err(err),
                    RowPolicy::Skip => {
                        warn!(error = %err, "Skipping row with unusable timestamp");
                        derived.skipped += 1;
                    }
                },
            }
        }

        debug!(rows = derived.rows.len(), skipped = derived.skipped, "Derived calendar features");
        Ok(derived)
    }
}
