//! Web server command.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use pathscope_core::config::Config;

#[derive(Args)]
pub struct ServeArgs {
    /// Port to listen on (overrides PATHSCOPE_PORT)
    #[arg(long)]
    pub port: Option<u16>,
}

pub async fn execute(args: ServeArgs, config: &Config) -> Result<()> {
    let mut config = config.clone();
    if let Some(port) = args.port {
        config.port = port;
        config.web_url = format!("http://127.0.0.1:{}", port);
    }

    let pool = pathscope_db::init_pool(&config.db_path)?;

    println!();
    println!("  {} {}", "Pathscope".cyan().bold(), "Web Server".bold());
    println!();
    println!(
        "  {}        http://127.0.0.1:{}/api/v2",
        "API".green(),
        config.port
    );
    println!(
        "  {}  ws://127.0.0.1:{}/ws",
        "WebSocket".green(),
        config.port
    );
    println!();
    println!("  {}", "Ctrl+C to stop".dimmed());
    println!();

    pathscope_web::run_server(pool, &config).await?;

    Ok(())
}
