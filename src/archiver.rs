use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use chrono::{DateTime, TimeZone};
use tracing::{debug, info};

use crate::config::Config;
use crate::error::Result;
use crate::models::{ProductRecord, Report};
use crate::selector::select_best;

/// Timestamp layout existing report consumers read. The `&H` is literal text,
/// not an hour field.
pub const REPORT_TIME_FORMAT: &str = "%d/%m/%Y &H:%M:%S";

impl Report {
    pub fn new<Tz>(config: &Config, products: Vec<ProductRecord>, now: DateTime<Tz>) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        let best_item = select_best(&products).cloned();
        Self {
            title: config.name.clone(),
            data: now.format(REPORT_TIME_FORMAT).to_string(),
            best_item,
            currency: config.currency.clone(),
            filters: config.filters,
            base_link: config.base_url.clone(),
            products,
        }
    }
}

pub fn save_report(report: &Report, path: &Path) -> Result<()> {
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    debug!("Writing report to {}", path.display());

    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer(&mut writer, report)?;
    writer.flush()?;

    info!(
        "Saved report with {} products to {}",
        report.products.len(),
        path.display()
    );
    Ok(())
}

pub fn load_report(path: &Path) -> Result<Report> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn record(id: &str, price: Option<f64>) -> ProductRecord {
        ProductRecord {
            product_id: id.to_string(),
            url: format!("https://www.amazon.de/dp/{id}"),
            title: "PlayStation 4".to_string(),
            seller: "Sony".to_string(),
            price,
        }
    }

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 7, 9, 5, 2).unwrap()
    }

    #[test]
    fn test_timestamp_keeps_literal_ampersand() {
        let report = Report::new(&Config::default(), vec![], fixed_time());
        assert_eq!(report.data, "07/03/2024 &H:05:02");
    }

    #[test]
    fn test_report_picks_best_item() {
        let products = vec![record("a", Some(320.0)), record("b", None), record("c", Some(299.99))];
        let report = Report::new(&Config::default(), products, fixed_time());
        assert_eq!(report.best_item.as_ref().map(|p| p.product_id.as_str()), Some("c"));
        assert_eq!(report.products.len(), 3);
        assert_eq!(report.title, "PS4");
        assert_eq!(report.base_link, "https://www.amazon.de/");
    }

    #[test]
    fn test_report_without_prices_has_no_best_item() {
        let report = Report::new(&Config::default(), vec![record("a", None)], fixed_time());
        assert!(report.best_item.is_none());
    }

    #[test]
    fn test_json_field_names() {
        let report = Report::new(&Config::default(), vec![record("a", Some(1.5)), record("b", None)], fixed_time());
        let value = serde_json::to_value(&report).unwrap();

        let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
        for key in ["title", "data", "best_item", "currency", "filters", "base_link", "products"] {
            assert!(keys.contains(&key), "missing {key}");
        }
        assert_eq!(value["filters"], serde_json::json!({"min": 275, "max": 650}));
        assert_eq!(value["best_item"]["Product ID"], "a");
        assert!(value["products"][1]["price"].is_null());
    }
}
