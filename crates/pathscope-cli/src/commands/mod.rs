//! CLI command definitions and handlers.

use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod db;
pub mod graph;
pub mod ingest;
pub mod serve;

/// Pathscope - Active Directory attack path analysis
#[derive(Parser)]
#[command(name = "pathscope")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server and datapipe daemon
    Serve(serve::ServeArgs),

    /// Queue a collected data file for ingest
    Ingest(ingest::IngestArgs),

    /// Graph data commands
    #[command(subcommand)]
    Graph(graph::GraphCommands),

    /// Database management commands
    #[command(subcommand)]
    Db(db::DbCommands),
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        let config = pathscope_core::config::Config::from_env();

        match self.command {
            Commands::Serve(args) => serve::execute(args, &config).await,
            Commands::Ingest(args) => ingest::execute(args, &config).await,
            Commands::Graph(cmd) => graph::execute(cmd, &config).await,
            Commands::Db(cmd) => db::execute(cmd, &config).await,
        }
    }
}
