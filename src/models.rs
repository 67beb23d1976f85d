use serde::{Deserialize, Serialize};

/// Price range applied to the search results page, in whole currency units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceFilter {
    pub min: u32,
    pub max: u32,
}

impl PriceFilter {
    /// Query fragment restricting search results to this range (prices in cents).
    pub fn query_fragment(&self) -> String {
        format!("&rh=p_36%3A{}00-{}00", self.min, self.max)
    }
}

/// Raw text fields read from a single product page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFields {
    pub title: Option<String>,
    pub seller: Option<String>,
    pub raw_price: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    #[serde(rename = "Product ID")]
    pub product_id: String,
    pub url: String,
    pub title: String,
    pub seller: String,
    pub price: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub title: String,
    /// Generation time, `DD/MM/YYYY &H:MM:SS`.
    pub data: String,
    pub best_item: Option<ProductRecord>,
    pub currency: String,
    pub filters: PriceFilter,
    pub base_link: String,
    pub products: Vec<ProductRecord>,
}
