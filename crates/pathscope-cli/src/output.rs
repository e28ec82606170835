//! Terminal output formatting.

use colored::Colorize;
use pathscope_core::ingest::model::{IngestJob, IngestJobStatus};
use pathscope_core::quality::DataQualityStat;

/// Print the file ingest log as a table.
pub fn print_ingest_table(jobs: &[IngestJob]) {
    if jobs.is_empty() {
        println!("{}", "No file ingest history.".dimmed());
        return;
    }

    println!("{:<10} {:<30} {:<10} {:<26}", "ID", "File", "Status", "Started");
    println!("{}", "-".repeat(78));

    for job in jobs {
        let status_colored = match job.status {
            IngestJobStatus::Running => "running".yellow(),
            IngestJobStatus::Complete => "complete".green(),
            IngestJobStatus::Failed => "failed".red(),
            IngestJobStatus::Canceled => "canceled".dimmed(),
        };

        println!(
            "{:<10} {:<30} {:<10} {:<26}",
            &job.id[..8],
            truncate(&job.file_name, 28),
            status_colored,
            job.start_time
        );

        if let Some(error) = &job.error {
            println!("           {}", truncate(error, 64).red().dimmed());
        }
    }

    println!();
    println!("{} job(s) total", jobs.len());
}

/// Print the data quality history as a table.
pub fn print_quality_table(stats: &[DataQualityStat]) {
    if stats.is_empty() {
        println!("{}", "No data quality history.".dimmed());
        return;
    }

    println!(
        "{:<8} {:>10} {:>10} {:>10}  {:<26}",
        "ID", "Nodes", "Edges", "Selectors", "Recorded"
    );
    println!("{}", "-".repeat(70));

    for stat in stats {
        println!(
            "{:<8} {:>10} {:>10} {:>10}  {:<26}",
            stat.id, stat.node_count, stat.edge_count, stat.selector_count, stat.created_at
        );
    }

    println!();
    println!("{} snapshot(s) total", stats.len());
}

/// Truncate a string to a maximum length.
fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        format!("{}...", &s[..max_len - 3])
    }
}
