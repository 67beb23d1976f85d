pub mod archiver;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod models;
pub mod parser;
pub mod price;
pub mod provider;
pub mod selector;
pub mod tracker;

pub use config::Config;
pub use error::{Error, Result};
pub use models::{PriceFilter, ProductFields, ProductRecord, Report};
pub use price::{normalize, PriceError};
pub use selector::select_best;
