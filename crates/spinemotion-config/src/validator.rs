//! Runtime validation of a loaded configuration.

use crate::schema::{Config, StoreBackend};
use spinemotion_common::{DashboardError, Result};
use std::collections::HashSet;
use std::str::FromStr;

const TIMEOUT_RANGE: std::ops::RangeInclusive<u64> = 1..=300;
const LABEL_WIDTH_RANGE: std::ops::RangeInclusive<usize> = 8..=80;

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates a configuration, reporting the first problem found.
    pub fn validate(config: &Config) -> Result<()> {
        validate_non_empty("store.database", &config.store.database)?;
        validate_non_empty("store.collection", &config.store.collection)?;
        validate_non_empty("store.uri", &config.store.uri)?;

        if config.store.backend == StoreBackend::Http {
            validate_http_uri(&config.store.uri)?;
        }

        if !TIMEOUT_RANGE.contains(&config.store.timeout_seconds) {
            return Err(DashboardError::config(format!(
                "store.timeout_seconds must be between 1 and 300, got {}",
                config.store.timeout_seconds
            )));
        }

        let fields = [
            ("fields.id", &config.fields.id),
            ("fields.timestamp", &config.fields.timestamp),
            ("fields.category", &config.fields.category),
            ("fields.gender", &config.fields.gender),
        ];
        let mut seen = HashSet::new();
        for (name, value) in fields {
            validate_non_empty(name, value)?;
            if !seen.insert(value.as_str()) {
                return Err(DashboardError::config(format!(
                    "{name} reuses document field '{value}'"
                )));
            }
        }

        validate_non_empty("gender.male_label", &config.gender.male_label)?;
        validate_non_empty("gender.female_label", &config.gender.female_label)?;
        if config.gender.male_label == config.gender.female_label {
            return Err(DashboardError::config(
                "gender.male_label and gender.female_label must differ",
            ));
        }

        validate_timezone(&config.features.timezone)?;
        validate_non_empty("display.locale", &config.display.locale)?;

        if !LABEL_WIDTH_RANGE.contains(&config.display.label_width) {
            return Err(DashboardError::config(format!(
                "display.label_width must be between 8 and 80, got {}",
                config.display.label_width
            )));
        }

        Ok(())
    }
}

/// Rejects empty or whitespace-only values.
pub fn validate_non_empty(name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(DashboardError::config(format!("{name} cannot be empty")));
    }
    Ok(())
}

/// Validate an IANA time zone name.
pub fn validate_timezone(timezone: &str) -> Result<()> {
    chrono_tz::Tz::from_str(timezone)
        .map(|_| ())
        .map_err(|_| DashboardError::config(format!("unknown time zone '{timezone}'")))
}

/// Validate the base URL of the http store backend.
pub fn validate_http_uri(uri: &str) -> Result<()> {
    let parsed = url::Url::parse(uri)
        .map_err(|e| DashboardError::config_with_source(format!("invalid store URL '{uri}'"), e))?;

    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(DashboardError::config(format!(
            "store URL must use http or https, got '{other}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::UnrecognizedGender;

    #[test]
    fn test_validate_timezone() {
        assert!(validate_timezone("UTC").is_ok());
        assert!(validate_timezone("Asia/Jakarta").is_ok());
        assert!(validate_timezone("Mars/Olympus").is_err());
        assert!(validate_timezone("").is_err());
    }

    #[test]
    fn test_validate_http_uri() {
        assert!(validate_http_uri("http://localhost:8080").is_ok());
        assert!(validate_http_uri("https://data.example.org/api").is_ok());
        assert!(validate_http_uri("mongodb://localhost:27017").is_err());
        assert!(validate_http_uri("not a url").is_err());
    }

    #[test]
    fn test_http_backend_requires_url() {
        let mut config = Config::default();
        config.store.backend = StoreBackend::Http;
        assert!(config.validate().is_err());

        config.store.uri = "http://localhost:8080".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_duplicate_field_names_rejected() {
        let mut config = Config::default();
        config.fields.gender = "namaGerakan".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("fields.gender"));
    }

    #[test]
    fn test_identical_gender_labels_rejected() {
        let mut config = Config::default();
        config.gender.female_label = config.gender.male_label.clone();
        config.gender.unrecognized = UnrecognizedGender::Unknown;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_timeout_and_width_bounds() {
        let mut config = Config::default();
        config.store.timeout_seconds = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.display.label_width = 4;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_blank_collection_rejected() {
        let mut config = Config::default();
        config.store.collection = "   ".to_string();
        assert!(config.validate().is_err());
    }
}
