use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "termattrib")]
#[command(about = "Attributes payment terminals to reseller customers through domain matching")]
#[command(version)]
pub struct Cli {
    /// Create default configuration file at ./config/termattrib.toml
    #[arg(long)]
    pub init: bool,

    /// Customer roster JSON file (overrides config)
    #[arg(short, long)]
    pub customers: Option<PathBuf>,

    /// Terminal roster JSON file (overrides config)
    #[arg(short, long)]
    pub terminals: Option<PathBuf>,

    /// Output format: 'csv' (default from config) or 'json'
    #[arg(short = 'f', long)]
    pub output_format: Option<String>,

    /// Output directory for the report file (defaults to config, then Desktop)
    #[arg(long)]
    pub output_dir: Option<String>,

    /// Output filename (extension is set from the format)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Verbose logging (use -v for INFO, -vv for DEBUG)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Resolve the output directory: flag, then config, then Desktop, then
    /// the working directory.
    pub fn resolve_output_dir(&self, config_dir: Option<&str>) -> PathBuf {
        if let Some(dir) = &self.output_dir {
            return PathBuf::from(dir);
        }
        if let Some(dir) = config_dir {
            return PathBuf::from(dir);
        }
        dirs::desktop_dir().unwrap_or_else(|| PathBuf::from("."))
    }
}
