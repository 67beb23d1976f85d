use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use price_tracker::archiver::save_report;
use price_tracker::config::DEFAULT_USER_AGENT;
use price_tracker::provider::HttpScrapeProvider;
use price_tracker::tracker::Tracker;
use price_tracker::{Config, PriceFilter, Report};

#[derive(Parser)]
#[command(name = "price-tracker")]
#[command(author, version, about = "Search a store, visit the top results and report the cheapest one")]
struct Cli {
    /// Search term, also used as the report name
    #[arg(long, env = "PRICE_TRACKER_NAME", default_value = "PS4")]
    name: String,

    /// Currency marker shown in front of prices
    #[arg(long, env = "PRICE_TRACKER_CURRENCY", default_value = "€")]
    currency: String,

    /// Store front page
    #[arg(long, env = "PRICE_TRACKER_BASE_URL", default_value = "https://www.amazon.de/")]
    base_url: String,

    /// Lowest price to search for
    #[arg(long, env = "PRICE_TRACKER_MIN", default_value_t = 275)]
    min: u32,

    /// Highest price to search for
    #[arg(long, env = "PRICE_TRACKER_MAX", default_value_t = 650)]
    max: u32,

    /// Directory the JSON report is written into
    #[arg(short, long, env = "PRICE_TRACKER_DIRECTORY", default_value = "reports")]
    directory: PathBuf,

    /// Number of search results to visit
    #[arg(long, env = "PRICE_TRACKER_MAX_PRODUCTS", default_value_t = 4)]
    max_products: usize,

    /// Pause after each page load, in milliseconds
    #[arg(long, env = "PRICE_TRACKER_DELAY_MS", default_value_t = 2000)]
    delay_ms: u64,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn into_config(self) -> Config {
        Config {
            name: self.name,
            currency: self.currency,
            filters: PriceFilter {
                min: self.min,
                max: self.max,
            },
            base_url: self.base_url,
            directory: self.directory,
            max_products: self.max_products,
            request_delay: Duration::from_millis(self.delay_ms),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = cli.into_config().validate().context("Invalid configuration")?;
    let provider = HttpScrapeProvider::new(&config).context("Failed to set up HTTP client")?;

    let products = Tracker::new(provider, &config).run();
    let report = Report::new(&config, products, chrono::Local::now());

    let path = config.report_path();
    save_report(&report, &path)
        .with_context(|| format!("Failed to write report to {}", path.display()))?;

    match &report.best_item {
        Some(item) => println!(
            "Best item: {} ({}{:.2}) - {}",
            item.title,
            report.currency,
            item.price.unwrap_or_default(),
            item.url
        ),
        None => println!("No priced items found"),
    }
    println!("Report written to {}", path.display());
    Ok(())
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("price_tracker=debug")
    } else {
        EnvFilter::new("price_tracker=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}
