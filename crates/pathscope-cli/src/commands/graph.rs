//! Graph data commands.

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;
use pathscope_core::config::Config;
use pathscope_core::graph;
use pathscope_core::graph::exchange::{self, DirectorySink, ImportOutcome};
use pathscope_core::graph::model::GraphSnapshot;
use pathscope_db::DbPool;
use std::path::PathBuf;

use crate::picker::{ArgFilePicker, PromptFilePicker};

#[derive(Subcommand)]
pub enum GraphCommands {
    /// Write the collected graph to bh-graph.json
    Export {
        /// Directory to write into
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },

    /// Load a graph snapshot from a JSON file
    Import {
        /// File to import; prompts when omitted
        file: Option<PathBuf>,
    },

    /// Show collected graph data counts
    Status,
}

pub async fn execute(cmd: GraphCommands, config: &Config) -> Result<()> {
    let pool = pathscope_db::init_pool(&config.db_path)?;

    match cmd {
        GraphCommands::Export { out_dir } => cmd_export(&pool, &out_dir).await,
        GraphCommands::Import { file } => cmd_import(&pool, file).await,
        GraphCommands::Status => cmd_status(&pool).await,
    }
}

async fn cmd_export(pool: &DbPool, out_dir: &std::path::Path) -> Result<()> {
    let snapshot = graph::load_snapshot(pool).await?;
    if snapshot.is_empty() {
        anyhow::bail!("no collected graph data to export");
    }

    let path = exchange::export_to_json(&snapshot, &DirectorySink::new(out_dir))?;
    println!(
        "{} Exported {} nodes and {} edges to {}",
        "✓".green().bold(),
        snapshot.nodes.len(),
        snapshot.edges.len(),
        path.display().to_string().cyan()
    );

    Ok(())
}

async fn cmd_import(pool: &DbPool, file: Option<PathBuf>) -> Result<()> {
    let mut imported = None;
    let outcome = match file {
        Some(path) => exchange::import_from_json(&ArgFilePicker::new(path), |v| imported = Some(v)),
        None => exchange::import_from_json(&PromptFilePicker, |v| imported = Some(v)),
    };

    match outcome {
        ImportOutcome::Imported => {}
        ImportOutcome::NoFileSelected => {
            println!("{}", "No file selected; nothing imported.".yellow());
            return Ok(());
        }
        ImportOutcome::ReadFailed => anyhow::bail!("could not read the selected file"),
        ImportOutcome::ParseFailed => anyhow::bail!("the selected file is not valid JSON"),
    }

    let Some(value) = imported else {
        return Ok(());
    };
    let snapshot: GraphSnapshot = serde_json::from_value(value)?;
    graph::store_snapshot(pool, &snapshot).await?;

    println!(
        "{} Imported {} nodes and {} edges",
        "✓".green().bold(),
        snapshot.nodes.len(),
        snapshot.edges.len()
    );

    Ok(())
}

async fn cmd_status(pool: &DbPool) -> Result<()> {
    let counts = graph::counts(pool).await?;

    println!("{}", "Collected graph data".bold());
    println!("  Nodes: {}", counts.nodes.to_string().cyan());
    println!("  Edges: {}", counts.edges.to_string().cyan());

    Ok(())
}
