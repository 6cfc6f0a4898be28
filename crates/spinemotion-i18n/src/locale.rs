//! Supported locales and tag resolution

use serde::{Deserialize, Serialize};
use spinemotion_common::{DashboardError, Result};
use std::fmt;
use unic_langid::LanguageIdentifier;

/// Supported locales
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Locale {
    /// Indonesian, the language the dashboard was first written in.
    #[default]
    Indonesian,
    /// US English.
    English,
}

impl Locale {
    /// Get the language tag for this locale
    pub const fn code(self) -> &'static str {
        match self {
            Self::Indonesian => "id",
            Self::English => "en-US",
        }
    }

    /// Resolve a BCP 47 tag, matching on language and falling back to the
    /// supported region when the tag names a bare language.
    pub fn from_tag(tag: &str) -> Result<Self> {
        let langid: LanguageIdentifier = tag.trim().parse().map_err(|_| {
            DashboardError::localization_with_locale(
                format!("'{tag}' is not a valid language tag"),
                tag,
            )
        })?;

        match (langid.language.as_str(), langid.region.as_ref().map(|r| r.as_str())) {
            ("id", None | Some("ID")) => Ok(Self::Indonesian),
            ("en", None | Some("US")) => Ok(Self::English),
            _ => Err(DashboardError::localization_with_locale(
                format!(
                    "unsupported locale '{tag}', expected one of: {}",
                    Self::all()
                        .iter()
                        .map(|l| l.code())
                        .collect::<Vec<_>>()
                        .join(", ")
                ),
                tag,
            )),
        }
    }

    /// Convert to a Fluent language identifier
    pub fn to_language_identifier(self) -> Result<LanguageIdentifier> {
        self.code().parse().map_err(|_| {
            DashboardError::localization_with_locale("invalid language identifier", self.code())
        })
    }

    /// Get all supported locales
    pub const fn all() -> [Self; 2] {
        [Self::Indonesian, Self::English]
    }

    /// Fluent source for this locale
    pub(crate) const fn resource(self) -> &'static str {
        match self {
            Self::Indonesian => include_str!("../locales/id/dashboard.ftl"),
            Self::English => include_str!("../locales/en-US/dashboard.ftl"),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_tag() {
        assert_eq!(Locale::from_tag("id").unwrap(), Locale::Indonesian);
        assert_eq!(Locale::from_tag("id-ID").unwrap(), Locale::Indonesian);
        assert_eq!(Locale::from_tag("en").unwrap(), Locale::English);
        assert_eq!(Locale::from_tag("en-US").unwrap(), Locale::English);
        assert_eq!(Locale::from_tag("en_US").unwrap(), Locale::English);
    }

    #[test]
    fn test_unsupported_tags() {
        for tag in ["fr", "en-GB", "!!"] {
            let err = Locale::from_tag(tag).unwrap_err();
            assert_eq!(err.kind(), "localization", "tag {tag}");
        }
    }

    #[test]
    fn test_code_round_trip() {
        for locale in Locale::all() {
            assert_eq!(Locale::from_tag(locale.code()).unwrap(), locale);
            assert!(locale.to_language_identifier().is_ok());
        }
    }
}
