//! Hashtag-Lens main entry point
//!
//! This is the command-line interface for the Hashtag-Lens scraper.

use clap::Parser;
use hashtag_lens::config::{load_config_or_default, load_hashtag_list, Config, OutputFormat};
use hashtag_lens::output::{print_summary, DataExporter, RunSummary};
use hashtag_lens::{HashtagScraper, LensError};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Hashtag list used when neither --tags nor --input-file is given
const DEFAULT_INPUT_FILE: &str = "data/inputs.sample.txt";

/// Hashtag-Lens: hashtag analytics scraper
///
/// Fetches the public page of each hashtag, extracts post counts, top posts
/// and related tags, and exports the results as JSON, CSV or HTML.
#[derive(Parser, Debug)]
#[command(name = "hashtag-lens")]
#[command(version = "1.0.0")]
#[command(about = "Related hashtag stats scraper", long_about = None)]
struct Cli {
    /// Path to a text file containing hashtags (one per line)
    #[arg(short, long, value_name = "FILE")]
    input_file: Option<PathBuf>,

    /// Hashtags to process (e.g. love travel photography); overrides --input-file
    #[arg(short, long, num_args = 1..)]
    tags: Option<Vec<String>>,

    /// Comma-separated output formats: json,csv,html,xlsx (excel)
    #[arg(short, long)]
    formats: Option<String>,

    /// Output directory for generated files
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Path to TOML settings file
    #[arg(short, long, value_name = "CONFIG", default_value = "config/settings.toml")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let config = match load_config_or_default(&cli.config) {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    match run(&cli, config).await {
        Ok(()) => Ok(()),
        Err(e) => {
            tracing::error!("Run failed: {}", e);
            Err(e.into())
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("hashtag_lens=info,warn"),
            1 => EnvFilter::new("hashtag_lens=debug,info"),
            2 => EnvFilter::new("hashtag_lens=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Scrapes every requested tag in order, then exports the records
async fn run(cli: &Cli, config: Config) -> Result<(), LensError> {
    let tags = resolve_tags(cli)?;
    let formats = match &cli.formats {
        Some(list) => OutputFormat::parse_list(list)?,
        None => OutputFormat::parse_all(config.output.formats.iter().map(String::as_str))?,
    };
    let output_dir = cli
        .output_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.output.output_dir));

    tracing::info!(
        "Processing {} hashtags against {}",
        tags.len(),
        config.scraper.base_url
    );

    let scraper = HashtagScraper::new(&config.scraper)?;
    let mut records = Vec::with_capacity(tags.len());
    for (idx, tag) in tags.iter().enumerate() {
        tracing::info!("[{}/{}] Scraping #{}", idx + 1, tags.len(), tag);
        records.push(scraper.scrape(tag).await);
    }

    let exporter = DataExporter::new(&output_dir)?;
    tracing::info!("Resolved output directory to {}", exporter.output_dir().display());
    exporter.export(&records, &formats)?;

    let summary = RunSummary::from_records(&records);
    tracing::info!(
        "Finished: {} of {} hashtags produced data, {} fell back to minimal records",
        summary.tags_with_data,
        summary.total_tags,
        summary.minimal_tags.len()
    );
    if !cli.quiet {
        print_summary(&summary);
    }

    Ok(())
}

/// Picks the hashtag source: --tags, then --input-file, then the sample list
fn resolve_tags(cli: &Cli) -> Result<Vec<String>, LensError> {
    if let Some(tags) = &cli.tags {
        let tags: Vec<String> = hashtag_lens::config::parse_hashtag_list(&tags.join("\n"));
        if tags.is_empty() {
            return Err(LensError::NoHashtags("--tags contained no usable hashtags".to_string()));
        }
        return Ok(tags);
    }

    let input = match &cli.input_file {
        Some(path) => path.clone(),
        None if Path::new(DEFAULT_INPUT_FILE).exists() => {
            tracing::info!("No hashtags given; using {}", DEFAULT_INPUT_FILE);
            PathBuf::from(DEFAULT_INPUT_FILE)
        }
        None => {
            return Err(LensError::NoHashtags(format!(
                "pass --tags or --input-file (no {} found)",
                DEFAULT_INPUT_FILE
            )))
        }
    };

    let tags = load_hashtag_list(&input)?;
    if tags.is_empty() {
        return Err(LensError::NoHashtags(format!(
            "{} contains no hashtags",
            input.display()
        )));
    }
    Ok(tags)
}
