//! Rummage CLI - recover text and URLs from arbitrary files.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use rummage::tools::{TimeWindows, credentials_to_csv, fetch_to_file, flatten_json_file, list_bzip2_tar_file};
use rummage::{ExtractionConfig, File};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rummage")]
#[command(about = "Recover readable text and URLs from files of unknown type")]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file (TOML or JSON); defaults to rummage.toml discovery
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract every recoverable string from a file
    Extract {
        /// Path to the file
        path: PathBuf,

        /// Also list the unique URLs found
        #[arg(long)]
        urls: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Print the detected format and extraction strategy
    Detect {
        /// Path to the file
        path: PathBuf,
    },

    /// Print the unique URLs found in a file, one per line
    Urls {
        /// Path to the file
        path: PathBuf,
    },

    /// Flatten a JSON array of objects into one JSON object per line
    FlattenJson {
        /// Input JSON file
        #[arg(short, long)]
        input: PathBuf,

        /// Output directory
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Print consecutive time windows covering the last N hours
    TimeWindows {
        /// Hours to look back from now
        #[arg(long, default_value_t = 24)]
        back: i64,

        /// Window length in minutes
        #[arg(long, default_value_t = 60)]
        increment: i64,
    },

    /// Download a URL to a file
    Fetch {
        url: String,

        /// Destination file
        #[arg(short, long)]
        output: PathBuf,

        /// Request timeout in seconds
        #[arg(long)]
        timeout: Option<u64>,
    },

    /// Convert ["user","pass"] lines into a username,password CSV
    CredsToCsv {
        #[arg(short, long)]
        input: PathBuf,

        #[arg(short, long)]
        output: PathBuf,
    },

    /// List the text of every member of a bzip2-compressed tar archive
    ListBz2 {
        path: PathBuf,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = load_config(cli.config.as_deref())?;
    tracing::debug!(?config, "configuration loaded");

    match cli.command {
        Commands::Extract { path, urls, format } => {
            let mut file = open(&path, &config)?;
            file.parse_with_config(&config)
                .with_context(|| format!("Failed to extract {}", path.display()))?;

            match format {
                OutputFormat::Text => {
                    for line in file.escaped_strings() {
                        println!("{}", line);
                    }
                    if urls {
                        for url in file.url_extract() {
                            println!("{}", url);
                        }
                    }
                }
                OutputFormat::Json => {
                    let mut output = serde_json::json!({
                        "name": file.name(),
                        "mime_type": file.mime_type(),
                        "extension": file.extension(),
                        "strategy": file.strategy(),
                        "strings": file.strings(),
                    });
                    if urls {
                        output["urls"] = serde_json::json!(file.url_extract());
                    }
                    println!(
                        "{}",
                        serde_json::to_string_pretty(&output).context("Failed to serialize extraction result")?
                    );
                }
            }
        }

        Commands::Detect { path } => {
            let file = open(&path, &config)?;
            println!("mime_type: {}", file.mime_type());
            println!("extension: {}", file.extension());
            println!("strategy: {}", file.strategy());
        }

        Commands::Urls { path } => {
            let mut file = open(&path, &config)?;
            file.parse_with_config(&config)
                .with_context(|| format!("Failed to extract {}", path.display()))?;
            for url in file.url_extract() {
                println!("{}", url);
            }
        }

        Commands::FlattenJson { input, output } => {
            let written = flatten_json_file(&input, &output)
                .with_context(|| format!("Failed to flatten {}", input.display()))?;
            println!("{}", written.display());
        }

        Commands::TimeWindows { back, increment } => {
            for window in TimeWindows::until_now(back, increment) {
                println!("{}", window);
            }
        }

        Commands::Fetch { url, output, timeout } => {
            let timeout = timeout
                .map(Duration::from_secs)
                .unwrap_or(rummage::tools::DEFAULT_FETCH_TIMEOUT);
            let fetched = fetch_to_file(&url, &output, timeout).with_context(|| format!("Failed to fetch {}", url))?;
            if !fetched {
                anyhow::bail!("Server did not return 200 OK for {}", url);
            }
            println!("{}", output.display());
        }

        Commands::CredsToCsv { input, output } => {
            let text = std::fs::read_to_string(&input)
                .with_context(|| format!("Failed to read {}", input.display()))?;
            std::fs::write(&output, credentials_to_csv(&text))
                .with_context(|| format!("Failed to write {}", output.display()))?;
        }

        Commands::ListBz2 { path } => {
            let strings =
                list_bzip2_tar_file(&path).with_context(|| format!("Failed to list {}", path.display()))?;
            for line in strings {
                println!("{}", line);
            }
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Explicit `--config` wins; otherwise the nearest `rummage.toml`, else defaults.
fn load_config(path: Option<&Path>) -> Result<ExtractionConfig> {
    match path {
        Some(path) => ExtractionConfig::from_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display())),
        None => Ok(ExtractionConfig::discover()
            .context("Failed to discover rummage.toml")?
            .unwrap_or_default()),
    }
}

fn open(path: &Path, config: &ExtractionConfig) -> Result<File> {
    File::from_path_with_config(path, config).with_context(|| format!("Failed to read {}", path.display()))
}
