//! Gender label matching.

use serde::Serialize;
use spinemotion_config::GenderConfig;

/// Where a gender label falls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GenderBucket {
    /// Matches the male label.
    Male,
    /// Matches the female label.
    Female,
    /// Missing, or matching neither label.
    Unrecognized,
}

/// Exact-match classifier over the configured labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenderClassifier {
    male_label: String,
    female_label: String,
}

impl GenderClassifier {
    /// Classifier for the given labels.
    pub fn new(male_label: impl Into<String>, female_label: impl Into<String>) -> Self {
        Self {
            male_label: male_label.into(),
            female_label: female_label.into(),
        }
    }

    /// Classifier for the configured labels.
    pub fn from_config(config: &GenderConfig) -> Self {
        Self::new(&config.male_label, &config.female_label)
    }

    /// Bucket for a label. Matching is exact, case and whitespace included.
    pub fn classify(&self, label: Option<&str>) -> GenderBucket {
        match label {
            Some(label) if label == self.male_label => GenderBucket::Male,
            Some(label) if label == self.female_label => GenderBucket::Female,
            _ => GenderBucket::Unrecognized,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_is_exact() {
        let classifier = GenderClassifier::from_config(&GenderConfig::default());
        assert_eq!(classifier.classify(Some("Laki-laki")), GenderBucket::Male);
        assert_eq!(classifier.classify(Some("Perempuan")), GenderBucket::Female);
        assert_eq!(classifier.classify(Some("laki-laki")), GenderBucket::Unrecognized);
        assert_eq!(classifier.classify(Some("Perempuan ")), GenderBucket::Unrecognized);
        assert_eq!(classifier.classify(None), GenderBucket::Unrecognized);
    }
}
