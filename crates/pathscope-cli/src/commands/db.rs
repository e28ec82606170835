//! Database management commands.

use anyhow::Result;
use clap::{Args, Subcommand};
use colored::Colorize;
use dialoguer::{Confirm, MultiSelect};
use pathscope_core::config::Config;
use pathscope_core::purge::api::{HttpClearDatabaseApi, LocalClearDatabaseApi};
use pathscope_core::purge::model::DataCategory;
use pathscope_core::purge::PurgeFlow;

use crate::output;

#[derive(Subcommand)]
pub enum DbCommands {
    /// Selectively delete stored data
    Clear(ClearArgs),

    /// Show the file ingest log
    IngestHistory,

    /// Show the data quality history
    QualityHistory,
}

#[derive(Args)]
pub struct ClearArgs {
    /// Delete collected graph data (all nodes and edges)
    #[arg(long)]
    pub collected_graph_data: bool,

    /// Delete custom High Value selectors
    #[arg(long)]
    pub high_value_selectors: bool,

    /// Delete all asset group selectors
    #[arg(long)]
    pub all_asset_group_selectors: bool,

    /// Delete the file ingest log history
    #[arg(long)]
    pub file_ingest_history: bool,

    /// Delete the data quality history
    #[arg(long)]
    pub data_quality_history: bool,

    /// Skip the confirmation prompt
    #[arg(long)]
    pub yes: bool,

    /// Submit to a running server instead of the local database
    #[arg(long)]
    pub remote: bool,
}

impl ClearArgs {
    fn selected_categories(&self) -> Vec<DataCategory> {
        let mut categories = Vec::new();
        if self.collected_graph_data {
            categories.push(DataCategory::CollectedGraphData);
        }
        if self.high_value_selectors {
            categories.push(DataCategory::CustomHighValueSelectors);
        }
        if self.all_asset_group_selectors {
            categories.push(DataCategory::AllAssetGroupSelectors);
        }
        if self.file_ingest_history {
            categories.push(DataCategory::FileIngestHistory);
        }
        if self.data_quality_history {
            categories.push(DataCategory::DataQualityHistory);
        }
        categories
    }
}

pub async fn execute(cmd: DbCommands, config: &Config) -> Result<()> {
    let pool = pathscope_db::init_pool(&config.db_path)?;

    match cmd {
        DbCommands::Clear(args) => cmd_clear(&pool, args, config).await,
        DbCommands::IngestHistory => {
            let jobs = pathscope_core::ingest::list_history(&pool).await?;
            output::print_ingest_table(&jobs);
            Ok(())
        }
        DbCommands::QualityHistory => {
            let stats = pathscope_core::quality::list_history(&pool).await?;
            output::print_quality_table(&stats);
            Ok(())
        }
    }
}

async fn cmd_clear(pool: &pathscope_db::DbPool, args: ClearArgs, config: &Config) -> Result<()> {
    let catalog = pathscope_core::assetgroup::load_catalog(pool).await?;
    let mut flow = PurgeFlow::new(catalog);

    let mut categories = args.selected_categories();
    if categories.is_empty() && !args.yes {
        categories = prompt_categories()?;
    }
    for category in categories {
        flow.toggle(category, true);
    }

    if !flow.request_confirmation() {
        println!("{}", "Please make a selection.".red());
        return Ok(());
    }

    if !args.yes {
        println!();
        println!("{}", "About to delete:".bold());
        for category in DataCategory::ALL {
            if flow.state().selection.get(category) {
                println!("  {} {}", "•".red(), category.label());
            }
        }
        println!();

        let confirmed = Confirm::new()
            .with_prompt("Are you sure? This change is irreversible")
            .default(false)
            .interact()
            .unwrap_or(false);

        if !confirmed {
            flow.cancel_confirmation();
            println!("{}", "Canceled; nothing deleted.".dimmed());
            return Ok(());
        }
    }

    let purging_graph = flow.state().selection.collected_graph_data;

    if args.remote {
        let api = HttpClearDatabaseApi::new(&config.web_url, config.admin_token.clone());
        flow.confirm_and_submit(&api).await;
    } else {
        let api = LocalClearDatabaseApi::new(pool.clone());
        flow.confirm_and_submit(&api).await;
    }

    let state = flow.state();
    if state.show_success {
        println!("{} Deletion of the data is under way.", "✓".green().bold());
        if purging_graph {
            println!(
                "{}",
                "Collected graph data is removed by the datapipe on its next tick.".dimmed()
            );
        }
        Ok(())
    } else {
        let message = state
            .mutation_error_message
            .clone()
            .unwrap_or_else(|| "There was an error processing your request.".into());
        anyhow::bail!(message)
    }
}

fn prompt_categories() -> Result<Vec<DataCategory>> {
    let labels: Vec<&str> = DataCategory::ALL.iter().map(|c| c.label()).collect();
    let picked = MultiSelect::new()
        .with_prompt("Which data should be deleted? (space selects, enter confirms)")
        .items(&labels)
        .interact()?;

    Ok(picked.into_iter().map(|i| DataCategory::ALL[i]).collect())
}
