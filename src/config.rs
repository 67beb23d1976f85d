//! Run configuration.
//!
//! Everything the tracker needs to know about a run lives in [`Config`] and
//! is passed explicitly to the provider, the tracker and the report sink.

use std::path::PathBuf;
use std::time::Duration;

use reqwest::Url;

use crate::error::{Error, Result};
use crate::models::PriceFilter;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/58.0.3029.110 Safari/537.3";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Search term, also used as the report title and file name
    pub name: String,
    /// Currency marker that precedes prices on product pages
    pub currency: String,
    pub filters: PriceFilter,
    /// Store front page, always ending in `/`
    pub base_url: String,
    /// Directory reports are written into
    pub directory: PathBuf,
    /// Number of search results to visit
    pub max_products: usize,
    /// Pause after every page load
    pub request_delay: Duration,
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            name: "PS4".to_string(),
            currency: "€".to_string(),
            filters: PriceFilter { min: 275, max: 650 },
            base_url: "https://www.amazon.de/".to_string(),
            directory: PathBuf::from("reports"),
            max_products: 4,
            request_delay: Duration::from_secs(2),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl Config {
    /// Checks the configuration and normalises `base_url` to end in `/`.
    pub fn validate(mut self) -> Result<Self> {
        if self.name.trim().is_empty() {
            return Err(Error::InvalidConfig("search term must not be empty".into()));
        }
        if self.currency.is_empty() {
            return Err(Error::InvalidConfig("currency marker must not be empty".into()));
        }
        if self.filters.min > self.filters.max {
            return Err(Error::InvalidConfig(format!(
                "price filter min ({}) is above max ({})",
                self.filters.min, self.filters.max
            )));
        }
        if !self.base_url.ends_with('/') {
            self.base_url.push('/');
        }
        Url::parse(&self.base_url).map_err(|e| Error::InvalidUrl(format!("{}: {e}", self.base_url)))?;
        Ok(self)
    }

    pub fn report_path(&self) -> PathBuf {
        self.directory.join(format!("{}.json", self.name))
    }
}
