//! Command line arguments.

use clap::Parser;
use spinemotion_views::{OutputFormat, View};
use std::path::PathBuf;

/// Movement analytics dashboard over SpineMotion exercise records
#[derive(Parser, Debug, Clone)]
#[command(name = "spinemotion-dashboard", author, version, about, long_about = None)]
pub struct Cli {
    /// View to compute
    #[arg(long, value_enum)]
    pub view: View,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Output locale, e.g. `id` or `en-US`; overrides the configured one
    #[arg(long)]
    pub locale: Option<String>,

    /// Log filter, e.g. `debug` or `spinemotion_analytics=trace`
    #[arg(short, long)]
    pub log_level: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_all_flags() {
        let cli = Cli::try_parse_from([
            "spinemotion-dashboard",
            "--view",
            "users",
            "--config",
            "dash.yaml",
            "--format",
            "json",
            "--locale",
            "en",
            "--log-level",
            "debug",
        ])
        .unwrap();

        assert_eq!(cli.view, View::Users);
        assert_eq!(cli.config, Some(PathBuf::from("dash.yaml")));
        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.locale.as_deref(), Some("en"));
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_view_is_required_and_checked() {
        assert!(Cli::try_parse_from(["spinemotion-dashboard"]).is_err());
        assert!(Cli::try_parse_from(["spinemotion-dashboard", "--view", "charts"]).is_err());

        let cli = Cli::try_parse_from(["spinemotion-dashboard", "--view", "temporal"]).unwrap();
        assert_eq!(cli.format, OutputFormat::Text);
        assert!(cli.config.is_none());
    }
}
