//! Main application entry point

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use dv_app::{run, AppConfig, Args};

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so stdout stays valid JSON
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };

    info!("Charting {}", args.path.display());
    let report = run(&args, config).await?;

    println!("{}", serde_json::to_string_pretty(&report.view)?);
    if let Some(path) = report.exported {
        info!("Chart exported to {}", path.display());
    }
    Ok(())
}
