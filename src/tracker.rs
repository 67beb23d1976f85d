use std::thread;

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::models::{ProductFields, ProductRecord};
use crate::parser;
use crate::price;
use crate::provider::ScrapeProvider;

/// Drives one scrape run: search, visit product pages, build records.
pub struct Tracker<'a, P: ScrapeProvider> {
    provider: P,
    config: &'a Config,
}

impl<'a, P: ScrapeProvider> Tracker<'a, P> {
    pub fn new(provider: P, config: &'a Config) -> Self {
        Self { provider, config }
    }

    /// Returns records in search-result order. A failed search yields no
    /// records rather than an error.
    pub fn run(&self) -> Vec<ProductRecord> {
        info!("Looking for {} products...", self.config.name);

        let links = match self.provider.fetch_candidate_links(
            &self.config.name,
            &self.config.base_url,
            self.config.filters,
        ) {
            Ok(links) => links,
            Err(e) => {
                warn!("Didn't get any products: {}", e);
                Vec::new()
            }
        };
        self.pause();

        if links.is_empty() {
            info!("No product links found, nothing to track");
            return Vec::new();
        }
        info!("Got {} links to products", links.len());

        let products: Vec<ProductRecord> = self
            .product_ids(&links)
            .iter()
            .filter_map(|id| self.product_record(id))
            .collect();

        info!("Got info about {} products", products.len());
        products
    }

    fn product_ids(&self, links: &[String]) -> Vec<String> {
        links
            .iter()
            .take(self.config.max_products)
            .filter_map(|link| {
                let id = parser::extract_product_id(link);
                if id.is_none() {
                    debug!("No product id in {}", link);
                }
                id
            })
            .collect()
    }

    fn product_record(&self, product_id: &str) -> Option<ProductRecord> {
        info!("Product ID {} - getting data...", product_id);
        let url = parser::product_url(&self.config.base_url, product_id);

        let fields = self.provider.fetch_product_fields(&url);
        self.pause();
        let fields = match fields {
            Ok(fields) => fields,
            Err(e) => {
                warn!("Can't load product page {}: {}", url, e);
                return None;
            }
        };

        build_record(product_id, url, fields, &self.config.currency)
    }

    fn pause(&self) {
        if !self.config.request_delay.is_zero() {
            thread::sleep(self.config.request_delay);
        }
    }
}

/// Assembles a record from page fields. Title and seller are required; a
/// price that cannot be read leaves the record without a price.
pub fn build_record(
    product_id: &str,
    url: String,
    fields: ProductFields,
    currency: &str,
) -> Option<ProductRecord> {
    let Some(title) = fields.title else {
        warn!("Can't get title of the product - {}", url);
        return None;
    };
    let Some(seller) = fields.seller else {
        warn!("Can't get seller of the product - {}", url);
        return None;
    };

    let price = match fields.raw_price {
        Some(raw) => match price::normalize(&raw, currency) {
            Ok(price) => Some(price),
            Err(e) => {
                warn!("Can't get price of the product - {}: {}", url, e);
                None
            }
        },
        None => {
            warn!("No price shown for the product - {}", url);
            None
        }
    };

    Some(ProductRecord {
        product_id: product_id.to_string(),
        url,
        title,
        seller,
        price,
    })
}
