//! Fluent bundle construction and message formatting

use crate::locale::Locale;
use fluent_bundle::{FluentArgs, FluentBundle, FluentResource};
use spinemotion_common::{DashboardError, Result};
use tracing::{debug, error, warn};

/// A Fluent bundle for one locale, built from the embedded resources.
pub struct LocaleBundle {
    locale: Locale,
    bundle: FluentBundle<FluentResource>,
}

impl std::fmt::Debug for LocaleBundle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocaleBundle")
            .field("locale", &self.locale)
            .field("bundle", &"FluentBundle<FluentResource>")
            .finish()
    }
}

impl LocaleBundle {
    /// Parse the embedded resource for `locale` into a bundle.
    pub fn load(locale: Locale) -> Result<Self> {
        let resource = FluentResource::try_new(locale.resource().to_string()).map_err(
            |(_, errors)| {
                error!(%locale, ?errors, "Failed to parse Fluent resource");
                DashboardError::localization_with_locale(
                    format!("resource has {} syntax error(s)", errors.len()),
                    locale.code(),
                )
            },
        )?;

        let mut bundle = FluentBundle::new(vec![locale.to_language_identifier()?]);
        // Plain terminal output, no Unicode isolation marks around placeables.
        bundle.set_use_isolating(false);
        bundle.add_resource(resource).map_err(|errors| {
            DashboardError::localization_with_locale(
                format!("conflicting messages in resource: {errors:?}"),
                locale.code(),
            )
        })?;

        debug!(%locale, "Loaded Fluent bundle");
        Ok(Self { locale, bundle })
    }

    /// Locale the bundle was built for
    pub const fn locale(&self) -> Locale {
        self.locale
    }

    /// Check if a message exists in the bundle
    pub fn has_message(&self, id: &str) -> bool {
        self.bundle.has_message(id)
    }

    /// Format a message with the given arguments
    pub fn format(&self, id: &str, args: Option<&FluentArgs<'_>>) -> Result<String> {
        let pattern = self
            .bundle
            .get_message(id)
            .and_then(|message| message.value())
            .ok_or_else(|| {
                DashboardError::localization_with_locale(
                    format!("message '{id}' not found"),
                    self.locale.code(),
                )
            })?;

        let mut errors = Vec::new();
        let formatted = self.bundle.format_pattern(pattern, args, &mut errors);

        if !errors.is_empty() {
            warn!(message = id, ?errors, "Formatting errors");
            return Err(DashboardError::localization_with_locale(
                format!("failed to format message '{id}': {errors:?}"),
                self.locale.code(),
            ));
        }

        Ok(formatted.into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fluent_bundle::FluentValue;

    #[test]
    fn test_every_locale_loads() {
        for locale in Locale::all() {
            let bundle = LocaleBundle::load(locale).unwrap();
            assert_eq!(bundle.locale(), locale);
            assert!(bundle.has_message("weekday-mon"));
        }
    }

    #[test]
    fn test_format_with_args() {
        let bundle = LocaleBundle::load(Locale::English).unwrap();
        let mut args = FluentArgs::new();
        args.set("count", FluentValue::from(12));
        assert_eq!(
            bundle.format("metric-total-users", Some(&args)).unwrap(),
            "12 total users"
        );
    }

    #[test]
    fn test_missing_message() {
        let bundle = LocaleBundle::load(Locale::Indonesian).unwrap();
        let err = bundle.format("no-such-message", None).unwrap_err();
        assert_eq!(err.kind(), "localization");
    }

    #[test]
    fn test_missing_argument_is_error() {
        let bundle = LocaleBundle::load(Locale::English).unwrap();
        assert!(bundle.format("metric-total-users", None).is_err());
    }
}
