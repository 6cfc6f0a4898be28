//! Integration tests for spinemotion-views crate.

use spinemotion_analytics::MemoryStore;
use spinemotion_common::test_utils::document_fixtures::sample_documents;
use spinemotion_common::test_utils::init_test_logging;
use spinemotion_config::{Config, UnrecognizedGender};
use spinemotion_i18n::{Locale, Messages};
use spinemotion_views::{OutputFormat, Renderer, View, ViewReport, ViewRunner};

fn store(config: &Config) -> MemoryStore {
    MemoryStore::new().with_collection(
        config.store.database.clone(),
        config.store.collection.clone(),
        sample_documents(),
    )
}

async fn run(view: View, locale: Locale, config: Config) -> (ViewReport, Messages) {
    let store = store(&config);
    let runner = ViewRunner::new(config, Messages::new(locale).unwrap()).unwrap();
    let report = runner.run(view, &store).await.unwrap();
    (report, Messages::new(locale).unwrap())
}

#[tokio::test]
async fn test_users_text_output() {
    init_test_logging();
    let (report, messages) = run(View::Users, Locale::English, Config::default()).await;
    let text = Renderer::new(&messages, 24).render(&report, OutputFormat::Text).unwrap();

    assert!(text.starts_with("== User Information =="));
    assert!(text.contains("5 total users"));
    assert!(text.contains("3 male users"));
    assert!(text.contains("2 female users"));
    assert!(text.contains("Monthly Count of Users"));
    assert!(text.contains("Jan-24"));
    assert!(!text.contains("Unknown"));
}

#[tokio::test]
async fn test_users_unknown_column_only_when_used() {
    let mut config = Config::default();
    config.gender.unrecognized = UnrecognizedGender::Unknown;
    config.gender.female_label = "Wanita".to_string();

    let (report, messages) = run(View::Users, Locale::English, config).await;
    let text = Renderer::new(&messages, 24).render(&report, OutputFormat::Text).unwrap();

    assert!(text.contains("Unknown"));
    assert!(text.contains("2 users without gender"));
}

#[tokio::test]
async fn test_category_text_output_in_indonesian() {
    let (report, messages) = run(View::Category, Locale::Indonesian, Config::default()).await;
    let text = Renderer::new(&messages, 24).render(&report, OutputFormat::Text).unwrap();

    assert!(text.starts_with("== Gerakan Terpopuler =="));
    assert!(text.contains("Aktivitas Laki-laki"));
    assert!(text.contains("Aktivitas Perempuan"));
    assert!(text.contains("60.0%"));
}

#[tokio::test]
async fn test_temporal_json_output() {
    let (report, messages) = run(View::Temporal, Locale::English, Config::default()).await;
    let json = Renderer::new(&messages, 24).render(&report, OutputFormat::Json).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["view"], "temporal");
    assert_eq!(value["day_of_week"].as_array().unwrap().len(), 7);
    assert_eq!(value["day_of_week"][0]["label"], "Mon");
    assert_eq!(value["day_of_week"][0]["count"], 2);
    assert_eq!(value["day_class"][0]["class"], "working_day");
    assert_eq!(value["hour_of_day"].as_array().unwrap().len(), 24);
}

#[tokio::test]
async fn test_runs_are_repeatable() {
    let (first, _) = run(View::Category, Locale::English, Config::default()).await;
    let (second, _) = run(View::Category, Locale::English, Config::default()).await;
    assert_eq!(first, second);
}
