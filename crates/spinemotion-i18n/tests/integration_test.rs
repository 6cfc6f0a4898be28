//! Integration tests for spinemotion-i18n crate.

use proptest::prelude::*;
use spinemotion_common::test_utils::init_test_logging;
use spinemotion_i18n::{Locale, Messages};

#[test]
fn test_default_locale_is_indonesian() {
    init_test_logging();
    let messages = Messages::new(Locale::default()).unwrap();
    assert_eq!(messages.get("view-users-title").unwrap(), "Informasi User");
}

#[test]
fn test_titles_differ_between_locales() {
    let indonesian = Messages::new(Locale::Indonesian).unwrap();
    let english = Messages::new(Locale::English).unwrap();

    for key in ["view-category-title", "view-temporal-title", "column-count"] {
        assert_ne!(indonesian.get(key).unwrap(), english.get(key).unwrap());
    }
}

#[test]
fn test_unsupported_locale_error_names_locale() {
    let err = Messages::for_tag("fr-FR").unwrap_err();
    assert!(err.to_string().contains("fr-FR"));
}

proptest! {
    #[test]
    fn prop_total_users_caption_contains_count(count in 0usize..1_000_000) {
        let messages = Messages::new(Locale::English).unwrap();
        let caption = messages.get_count("metric-total-users", count).unwrap();
        prop_assert_eq!(caption, format!("{count} total users"));
    }
}
