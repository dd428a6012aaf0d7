//! CLI entry point.
//!
//! # Responsibility
//! - Parse arguments into a `RunConfig` and start logging.
//! - Run the core pipeline once and print the assignment summary.
//!
//! # Invariants
//! - Business rules live in `statusmatrix_core`; this crate only wires I/O.
//! - Exit code is 0 on success and 1 on any fatal error.

use clap::Parser;
use statusmatrix_core::{default_log_level, init_logging, run_folder, RunConfig, RunSummary};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "statusmatrix")]
#[command(
    about = "Build a person x CR matrix from weekly status reports",
    long_about = None
)]
#[command(version = statusmatrix_core::core_version())]
struct Cli {
    /// Folder holding Models_CR_List.txt, Models_Group.txt and the reports
    folder: PathBuf,

    /// Also write Consolidated_Status_Report.txt
    #[arg(long)]
    consolidated: bool,

    /// Team label for the consolidated report banner
    #[arg(long, default_value = statusmatrix_core::config::DEFAULT_TEAM_LABEL)]
    team_label: String,

    /// Print the run summary as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Log level: trace|debug|info|warn|error
    #[arg(long)]
    log_level: Option<String>,

    /// Also write rotating log files to this absolute directory
    #[arg(long)]
    log_dir: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = cli.log_level.as_deref().unwrap_or(default_log_level());
    if let Err(err) = init_logging(level, cli.log_dir.as_deref()) {
        eprintln!("Error: {err}");
        return ExitCode::FAILURE;
    }

    let config = RunConfig::new(&cli.folder)
        .with_consolidated(cli.consolidated)
        .with_team_label(cli.team_label);

    match run_folder(&config) {
        Ok(summary) => {
            if cli.json {
                match serde_json::to_string_pretty(&summary) {
                    Ok(json) => println!("{json}"),
                    Err(err) => {
                        eprintln!("Error: failed to serialize summary: {err}");
                        return ExitCode::FAILURE;
                    }
                }
            } else {
                print_summary(&summary);
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("event=run module=cli status=error error={err}");
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn print_summary(summary: &RunSummary) {
    println!(
        "Found {} known CRs and {} team members",
        summary.known_before,
        summary.team.len()
    );

    for report in &summary.reports {
        match report.encoding {
            None => println!("  Warning: could not read {}", report.file.display()),
            Some(_) if report.crs.is_empty() => println!("  {}: No CRs found", report.person),
            Some(_) => {
                let labels: Vec<String> = report.crs.iter().map(|id| id.label()).collect();
                println!("  {}: {}", report.person, labels.join(", "));
            }
        }
    }

    if !summary.new_crs.is_empty() {
        let labels: Vec<String> = summary.new_crs.iter().map(|id| id.label()).collect();
        println!();
        println!("Discovered new CRs in status files: {}", labels.join(", "));
        if let Some(err) = &summary.registry_error {
            println!("  Warning: reference list not updated: {err}");
        }
    }

    println!();
    println!("CSV file created: {}", summary.table_path.display());
    if let Some(path) = &summary.consolidated_path {
        println!("Consolidated report created: {}", path.display());
    }
    println!(
        "Report includes {} team members and {} CRs",
        summary.team.len(),
        summary.universe.len()
    );

    println!();
    println!("Assignment Summary:");
    for line in summary.assignment_lines() {
        println!("  {line}");
    }
}
