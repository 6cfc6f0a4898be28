//! The dashboard views

use clap::ValueEnum;
use serde::Serialize;
use spinemotion_analytics::RecordField;
use std::fmt;

/// A dashboard page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    /// Most performed movements, overall and per gender.
    Category,
    /// Activity by weekday, hour and day class.
    Temporal,
    /// Monthly distinct users by gender.
    Users,
}

impl View {
    /// Record fields the view cannot do without.
    pub const fn required_fields(self) -> &'static [RecordField] {
        match self {
            Self::Category => &[RecordField::Category],
            Self::Temporal => &[RecordField::Timestamp],
            Self::Users => &[RecordField::Id, RecordField::Timestamp],
        }
    }

    /// Message id of the view title.
    pub const fn title_key(self) -> &'static str {
        match self {
            Self::Category => "view-category-title",
            Self::Temporal => "view-temporal-title",
            Self::Users => "view-users-title",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Category => write!(f, "category"),
            Self::Temporal => write!(f, "temporal"),
            Self::Users => write!(f, "users"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_from_cli_value() {
        assert_eq!(View::from_str("users", false).unwrap(), View::Users);
        assert_eq!(View::from_str("TEMPORAL", true).unwrap(), View::Temporal);
        assert!(View::from_str("graphs", false).is_err());
    }

    #[test]
    fn test_category_view_does_not_need_timestamps() {
        assert!(!View::Category
            .required_fields()
            .contains(&RecordField::Timestamp));
        assert!(View::Users.required_fields().contains(&RecordField::Id));
    }
}
