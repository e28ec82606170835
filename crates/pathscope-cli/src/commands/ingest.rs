//! File ingest command.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use pathscope_core::config::Config;
use pathscope_core::notifier::WebNotifier;
use std::path::PathBuf;

#[derive(Args)]
pub struct IngestArgs {
    /// JSON file of collected graph data
    pub file: PathBuf,
}

pub async fn execute(args: IngestArgs, config: &Config) -> Result<()> {
    let pool = pathscope_db::init_pool(&config.db_path)?;

    let payload = std::fs::read_to_string(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    let file_name = args
        .file
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("upload.json")
        .to_string();

    let job = pathscope_core::ingest::submit_file(&pool, &file_name, &payload).await?;

    WebNotifier::new(&config.web_url)
        .notify_file_accepted(&file_name)
        .await;

    println!(
        "{} Queued {} for ingest (job {})",
        "✓".green().bold(),
        file_name.cyan(),
        job.id[..8].dimmed()
    );
    println!(
        "{}",
        "A running server's datapipe will pick it up on the next tick.".dimmed()
    );

    Ok(())
}
