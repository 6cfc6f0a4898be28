//! Message accessors used by the views.

use crate::bundle::LocaleBundle;
use crate::locale::Locale;
use fluent_bundle::{FluentArgs, FluentValue};
use spinemotion_common::Result;

/// Weekday message ids, Monday first.
pub const WEEKDAY_KEYS: [&str; 7] = [
    "weekday-mon",
    "weekday-tue",
    "weekday-wed",
    "weekday-thu",
    "weekday-fri",
    "weekday-sat",
    "weekday-sun",
];

/// Localized messages for one locale.
#[derive(Debug)]
pub struct Messages {
    bundle: LocaleBundle,
}

impl Messages {
    /// Build the messages for `locale`.
    pub fn new(locale: Locale) -> Result<Self> {
        Ok(Self {
            bundle: LocaleBundle::load(locale)?,
        })
    }

    /// Resolve a language tag and build its messages.
    pub fn for_tag(tag: &str) -> Result<Self> {
        Self::new(Locale::from_tag(tag)?)
    }

    /// Locale of these messages
    pub const fn locale(&self) -> Locale {
        self.bundle.locale()
    }

    /// Gets a localized message.
    pub fn get(&self, key: &str) -> Result<String> {
        self.bundle.format(key, None)
    }

    /// Gets a localized message with string arguments.
    pub fn get_with_args(&self, key: &str, args: &[(&str, &str)]) -> Result<String> {
        let mut fluent_args = FluentArgs::new();
        for (name, value) in args {
            fluent_args.set(*name, FluentValue::from(*value));
        }
        self.bundle.format(key, Some(&fluent_args))
    }

    /// Gets a localized message taking a numeric `$count` argument.
    pub fn get_count(&self, key: &str, count: usize) -> Result<String> {
        let mut args = FluentArgs::new();
        args.set("count", FluentValue::from(count));
        self.bundle.format(key, Some(&args))
    }

    /// The seven weekday labels, Monday first.
    pub fn weekday_labels(&self) -> Result<[String; 7]> {
        let mut labels: [String; 7] = Default::default();
        for (label, key) in labels.iter_mut().zip(WEEKDAY_KEYS) {
            *label = self.get(key)?;
        }
        Ok(labels)
    }

    /// Working-day and weekend labels, in that order.
    pub fn day_class_labels(&self) -> Result<(String, String)> {
        Ok((self.get("day-class-working")?, self.get("day-class-weekend")?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indonesian_weekdays() {
        let messages = Messages::new(Locale::Indonesian).unwrap();
        assert_eq!(
            messages.weekday_labels().unwrap(),
            ["Sen", "Sel", "Rab", "Kam", "Jum", "Sab", "Ming"]
        );
        assert_eq!(
            messages.day_class_labels().unwrap(),
            ("Hari Kerja".to_string(), "Akhir Pekan".to_string())
        );
    }

    #[test]
    fn test_english_weekdays() {
        let messages = Messages::for_tag("en").unwrap();
        assert_eq!(messages.locale(), Locale::English);
        assert_eq!(
            messages.weekday_labels().unwrap(),
            ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"]
        );
        assert_eq!(
            messages.day_class_labels().unwrap(),
            ("Working Day".to_string(), "Weekend".to_string())
        );
    }

    #[test]
    fn test_count_messages() {
        let messages = Messages::new(Locale::English).unwrap();
        assert_eq!(
            messages.get_count("metric-total-male", 3).unwrap(),
            "3 male users"
        );
        assert_eq!(
            messages.get_count("metric-skipped-rows", 1).unwrap(),
            "1 row skipped"
        );
        assert_eq!(
            messages.get_count("metric-skipped-rows", 4).unwrap(),
            "4 rows skipped"
        );
    }

    #[test]
    fn test_get_with_args() {
        let messages = Messages::new(Locale::Indonesian).unwrap();
        assert_eq!(
            messages
                .get_with_args("metric-total-users", &[("count", "7")])
                .unwrap(),
            "7 total pengguna"
        );
    }

    #[test]
    fn test_unsupported_tag() {
        assert!(Messages::for_tag("de-DE").is_err());
    }
}
