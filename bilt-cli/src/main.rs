use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

mod config;
mod export;
mod preview;
mod state;

const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("BILT_BUILD_SHA"), ")");

#[derive(Parser, Debug)]
#[command(
    name = "bilt-export",
    version = VERSION,
    about = "Export Bilt Rewards wallet activity to a budgeting-app CSV"
)]
struct Cli {
    /// Config file (default: ~/.bilt-export/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// One of: off, error, warn, info, debug, trace. RUST_LOG overrides this.
    #[arg(long, global = true, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract transactions from a saved activity page and preview them
    Extract {
        /// Saved HTML of the rendered activity page
        #[arg(long)]
        html: PathBuf,

        /// Print the full extraction result as JSON
        #[arg(long)]
        json: bool,

        /// Number of rows to preview (default: 10)
        #[arg(long, default_value_t = 10)]
        preview: usize,
    },

    /// Extract transactions and write them as CSV
    Export {
        /// Saved HTML of the rendered activity page
        #[arg(long)]
        html: PathBuf,

        /// Exact output file
        #[arg(long)]
        out: Option<PathBuf>,

        /// Directory for bilt-transactions-<filter>.csv
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },

    /// Inspect CSV files
    Csv {
        #[command(subcommand)]
        command: CsvCommand,
    },

    /// Manage ~/.bilt-export/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum CsvCommand {
    /// Check that a CSV has date, payee (or description) and amount columns
    Validate { file: PathBuf },

    /// Parse a CSV and print its records as JSON
    Parse { file: PathBuf },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write the default config if none exists
    Init,

    /// Print the default config location
    Path,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.log_level);

    match cli.command {
        Command::Extract { html, json, preview } => {
            let cfg = config::load_config(cli.config.as_deref())?;
            let page = read_page(&html)?;
            let result = cfg.extractor()?.extract_html(&page);

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
                return Ok(());
            }
            if !result.success {
                bail!(
                    "{} ({})",
                    result.error.as_deref().unwrap_or("Extraction failed"),
                    html.display()
                );
            }

            println!(
                "Extracted {} transactions from {} (filter: {})\n",
                result.count,
                html.display(),
                result.filter_selection
            );
            print!("{}", preview::render_preview(&result.transactions, preview));
        }

        Command::Export { html, out, out_dir } => {
            let cfg = config::load_config(cli.config.as_deref())?;
            let page = read_page(&html)?;
            let result = cfg.extractor()?.extract_html(&page);
            if !result.success {
                bail!(
                    "{} ({})",
                    result.error.as_deref().unwrap_or("Extraction failed"),
                    html.display()
                );
            }

            let csv = bilt_csv::generate(&result.transactions, &cfg.csv_options())?;
            let path = export::resolve_output(
                out,
                out_dir.or_else(|| cfg.export.out_dir.clone()),
                &result.filter_selection,
                cfg.today()?,
            );
            export::write_export(&path, &csv)?;

            let expenses = result.transactions.iter().filter(|t| t.is_expense()).count();
            println!(
                "Wrote {} transactions ({} expenses) to {}",
                result.count,
                expenses,
                path.display()
            );
        }

        Command::Csv { command } => match command {
            CsvCommand::Validate { file } => {
                let text = read_page(&file)?;
                let validation = bilt_csv::validate(&text);
                if !validation.valid {
                    bail!(
                        "{}: {}",
                        file.display(),
                        validation.error.unwrap_or_default()
                    );
                }
                println!(
                    "{}: valid (columns: {})",
                    file.display(),
                    validation.headers.unwrap_or_default().join(", ")
                );
            }
            CsvCommand::Parse { file } => {
                let text = read_page(&file)?;
                let records = bilt_csv::parse(&text);
                println!("{}", serde_json::to_string_pretty(&records)?);
            }
        },

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Path => println!("{}", config::config_path()?.display()),
        },
    }

    Ok(())
}

fn read_page(path: &Path) -> Result<String> {
    if !path.exists() {
        bail!("File not found: {}", path.display());
    }
    fs::read_to_string(path).with_context(|| format!("read {}", path.display()))
}

/// Initializes the tracing subscriber. Logs go to stderr so stdout stays pipeable.
fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => EnvFilter::from_default_env(),
        None => EnvFilter::new(format!(
            "{}={level},bilt_core={level},bilt_ingest={level},bilt_csv={level}",
            env!("CARGO_CRATE_NAME"),
        )),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
