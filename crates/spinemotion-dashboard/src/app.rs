//! Wiring of configuration, logging, store, views and output.

use crate::cli::Cli;
use crate::error::AppResult;
use spinemotion_analytics::{open_store, DocumentStore};
use spinemotion_common::{init_logging, LoggingConfig};
use spinemotion_config::{Config, ConfigLoader};
use spinemotion_i18n::Messages;
use spinemotion_views::{OutputFormat, Renderer, View, ViewRunner};
use std::env;
use std::io::Write;
use tracing::{debug, error, info, instrument};
use tracing_appender::non_blocking::WorkerGuard;

/// Log filter in effect: the CLI flag, then `RUST_LOG`, then the configured level.
pub fn resolve_log_level(flag: Option<&str>, rust_log: Option<String>, configured: &str) -> String {
    flag.map(str::to_string)
        .or_else(|| rust_log.filter(|value| !value.trim().is_empty()))
        .unwrap_or_else(|| configured.to_string())
}

/// Logging configuration with the level resolved against the CLI and environment.
pub fn logging_config(config: &Config, flag: Option<&str>) -> LoggingConfig {
    LoggingConfig {
        level: resolve_log_level(flag, env::var("RUST_LOG").ok(), &config.logging.level),
        ..config.logging.clone()
    }
}

/// A configured store plus the runner for one output locale.
pub struct Dashboard {
    runner: ViewRunner,
    store: Box<dyn DocumentStore>,
    label_width: usize,
}

impl Dashboard {
    /// Build from a validated configuration; `locale` overrides `display.locale`.
    pub fn new(config: Config, locale: Option<&str>) -> AppResult<Self> {
        let messages = Messages::for_tag(locale.unwrap_or(&config.display.locale))?;
        let store = open_store(&config.store)?;
        Self::with_store(config, messages, store)
    }

    /// Build over an already opened store.
    pub fn with_store(
        config: Config,
        messages: Messages,
        store: Box<dyn DocumentStore>,
    ) -> AppResult<Self> {
        let label_width = config.display.label_width;
        Ok(Self {
            runner: ViewRunner::new(config, messages)?,
            store,
            label_width,
        })
    }

    /// Compute `view` and render it in `format`.
    #[instrument(skip(self))]
    pub async fn render(&self, view: View, format: OutputFormat) -> AppResult<String> {
        let report = self.runner.run(view, self.store.as_ref()).await?;
        let output = Renderer::new(self.runner.messages(), self.label_width).render(&report, format)?;
        Ok(output)
    }
}

/// Run the dashboard for parsed arguments, writing the view to stdout.
pub async fn run(cli: Cli) -> AppResult<()> {
    let config_path = ConfigLoader::resolve_path(cli.config.as_deref());
    let config = ConfigLoader::load_path(config_path.as_deref())?;
    let _guard: Option<WorkerGuard> =
        init_logging(&logging_config(&config, cli.log_level.as_deref()))?;

    match &config_path {
        Some(path) => info!(path = %path.display(), "Loaded configuration file"),
        None => debug!("No configuration file found, using defaults"),
    }

    info!(
        view = %cli.view,
        store = %config.store.uri,
        collection = %config.store.collection,
        "Starting SpineMotion dashboard"
    );

    let dashboard = Dashboard::new(config, cli.locale.as_deref())?;
    let output = match dashboard.render(cli.view, cli.format).await {
        Ok(output) => output,
        Err(err) => {
            error!(kind = err.kind(), error = %err, "View failed");
            return Err(err);
        }
    };

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(output.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use spinemotion_analytics::MemoryStore;
    use spinemotion_common::test_utils::document_fixtures::sample_documents;
    use spinemotion_i18n::Locale;

    #[test]
    fn test_log_level_precedence() {
        assert_eq!(resolve_log_level(Some("debug"), Some("warn".into()), "info"), "debug");
        assert_eq!(resolve_log_level(None, Some("warn".into()), "info"), "warn");
        assert_eq!(resolve_log_level(None, Some("  ".into()), "info"), "info");
        assert_eq!(resolve_log_level(None, None, "error"), "error");
    }

    #[test]
    fn test_logging_config_keeps_format() {
        let mut config = Config::default();
        config.logging.format = spinemotion_common::LogFormat::Json;

        let logging = logging_config(&config, Some("trace"));
        assert_eq!(logging.level, "trace");
        assert_eq!(logging.format, spinemotion_common::LogFormat::Json);
    }

    #[test]
    fn test_unsupported_locale() {
        let err = Dashboard::new(Config::default(), Some("fr-FR")).err().unwrap();
        assert_eq!(err.kind(), "localization");
    }

    #[tokio::test]
    async fn test_render_from_memory_store() {
        let config = Config::default();
        let store = MemoryStore::new().with_collection(
            config.store.database.clone(),
            config.store.collection.clone(),
            sample_documents(),
        );
        let dashboard = Dashboard::with_store(
            config,
            Messages::new(Locale::English).unwrap(),
            Box::new(store),
        )
        .unwrap();

        let text = dashboard.render(View::Users, OutputFormat::Text).await.unwrap();
        assert!(text.contains("5 total users"));
    }
}
