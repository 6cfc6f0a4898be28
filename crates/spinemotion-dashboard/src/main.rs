//! Main entry point for the SpineMotion dashboard.

use anyhow::{Context, Result};
use clap::Parser;
use spinemotion_dashboard::{run, Cli};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let view = cli.view;

    run(cli)
        .await
        .with_context(|| format!("failed to compute the {view} view"))
}
