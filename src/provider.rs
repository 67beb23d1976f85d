//! Sources of scraped product data.

use reqwest::Url;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::fetcher::Fetcher;
use crate::models::{PriceFilter, ProductFields};
use crate::parser;

/// Supplies search result links and raw product page fields.
pub trait ScrapeProvider {
    /// Product links for `search_term` within `filter`, in result order.
    fn fetch_candidate_links(
        &self,
        search_term: &str,
        base_url: &str,
        filter: PriceFilter,
    ) -> Result<Vec<String>>;

    fn fetch_product_fields(&self, url: &str) -> Result<ProductFields>;
}

impl<T: ScrapeProvider + ?Sized> ScrapeProvider for &T {
    fn fetch_candidate_links(
        &self,
        search_term: &str,
        base_url: &str,
        filter: PriceFilter,
    ) -> Result<Vec<String>> {
        (**self).fetch_candidate_links(search_term, base_url, filter)
    }

    fn fetch_product_fields(&self, url: &str) -> Result<ProductFields> {
        (**self).fetch_product_fields(url)
    }
}

/// Scrapes a store over plain HTTP.
pub struct HttpScrapeProvider {
    fetcher: Fetcher,
    currency: String,
}

impl HttpScrapeProvider {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            fetcher: Fetcher::new(config)?,
            currency: config.currency.clone(),
        })
    }
}

/// Search results URL for `search_term`, restricted to `filter`.
pub fn search_url(search_term: &str, base_url: &str, filter: PriceFilter) -> Result<String> {
    let mut url = Url::parse(base_url)
        .and_then(|base| base.join("s"))
        .map_err(|e| Error::InvalidUrl(format!("{base_url}: {e}")))?;
    url.query_pairs_mut().append_pair("k", search_term.trim());
    Ok(format!("{url}{}", filter.query_fragment()))
}

impl ScrapeProvider for HttpScrapeProvider {
    fn fetch_candidate_links(
        &self,
        search_term: &str,
        base_url: &str,
        filter: PriceFilter,
    ) -> Result<Vec<String>> {
        let html = self
            .fetcher
            .fetch_html(&search_url(search_term, base_url, filter)?)?;
        parser::parse_product_links(&html, base_url)
    }

    fn fetch_product_fields(&self, url: &str) -> Result<ProductFields> {
        let html = self.fetcher.fetch_html(&format!("{url}?language=en_GB"))?;
        parser::parse_product_fields(&html, &self.currency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_url() {
        let url = search_url(
            "playstation 4",
            "https://www.amazon.de/",
            PriceFilter { min: 275, max: 650 },
        )
        .unwrap();
        assert_eq!(
            url,
            "https://www.amazon.de/s?k=playstation+4&rh=p_36%3A27500-65000"
        );
    }
}
