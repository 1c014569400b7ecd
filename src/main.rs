use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod cli;
mod config;
mod domain;
mod export;
mod hierarchy;
mod matching;
mod profile;
mod report;
mod roster;

use cli::Cli;
use config::{AppConfig, ConfigError};
use report::{AttributionReport, ReportOptions};
use roster::Roster;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Handle --init before any other processing
    if cli.init {
        match AppConfig::create_default_config() {
            Ok(path) => {
                println!("✅ Created default configuration file at: {}", path.display());
                println!("   Edit this file to customize settings, then run termattrib again.");
                std::process::exit(0);
            }
            Err(e) => {
                eprintln!("❌ Failed to create configuration file: {}", e);
                std::process::exit(1);
            }
        }
    }

    init_logging(cli.verbose);

    let app_config = match AppConfig::load() {
        Ok(cfg) => cfg,
        Err(ConfigError::FileNotFound(path)) => {
            eprintln!("❌ Configuration file not found at: {}", path.display());
            eprintln!("   Run with --init to create a default configuration file.");
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("❌ Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let customers_path = cli
        .customers
        .clone()
        .unwrap_or_else(|| PathBuf::from(&app_config.rosters.customers_file));
    let terminals_path = cli
        .terminals
        .clone()
        .unwrap_or_else(|| PathBuf::from(&app_config.rosters.terminals_file));

    let roster = Roster::load_from_files(&customers_path, &terminals_path)?;

    let options = ReportOptions {
        include_empty_customers: app_config.report.include_empty_customers,
        include_suspended_in_totals: app_config.report.include_suspended_in_totals,
    };
    let report = AttributionReport::build_with_options(&roster, &options);

    let format = cli
        .output_format
        .as_deref()
        .unwrap_or(&app_config.output.format);
    let filename = cli.output.as_deref().unwrap_or(&app_config.output.filename);
    let output_dir = cli.resolve_output_dir(app_config.output.dir.as_deref());
    std::fs::create_dir_all(&output_dir)?;
    let output_path = output_dir.join(format!("{filename}.{format}"));
    let output_path = output_path.to_string_lossy().to_string();

    match format {
        "json" => export::export_json(&report, &output_path)?,
        "csv" => export::export_csv(&report, &output_path)?,
        other => {
            eprintln!("❌ Unknown output format '{}', expected 'csv' or 'json'.", other);
            std::process::exit(1);
        }
    }

    print_summary(&report, &output_path);
    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn print_summary(report: &AttributionReport, output_path: &str) {
    println!("Attribution complete.");
    println!("  Customers:               {}", report.totals.customer_count);
    println!(
        "  Attributed devices:      {}",
        report.totals.attributed_device_count
    );
    println!(
        "  Monthly revenue:         {:.2}",
        report.totals.monthly_revenue
    );
    println!(
        "  Yearly revenue:          {:.2}",
        report.totals.yearly_revenue
    );
    println!(
        "  Unattributed terminals:  {}",
        report.unattributed_terminals.len()
    );
    if !report.multi_attributed_serials.is_empty() {
        println!(
            "  ⚠ Multi-attributed:      {} ({})",
            report.multi_attributed_serials.len(),
            report.multi_attributed_serials.join(", ")
        );
    }
    println!("  Report written to:       {}", output_path);
}
