use reqwest::Url;
use scraper::{Html, Selector};
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::ProductFields;

const RESULT_LINK: &str = ".s-result-list h2 a[href]";
const TITLE: &str = "#productTitle";
const SELLER: &str = "#bylineInfo";
const PRICE: &str = "#priceblock_ourprice";
const AVAILABILITY: &str = "#availability";
const DESCRIPTION_PRICE: &str = ".old-padding-right";

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| Error::Selector(format!("{css}: {e}")))
}

/// Text of the first element matching `css`: non-blank text nodes, trimmed and
/// joined with `separator`. Blank text counts as missing.
fn element_text(doc: &Html, css: &str, separator: &str) -> Result<Option<String>> {
    let sel = selector(css)?;
    let Some(element) = doc.select(&sel).next() else {
        return Ok(None);
    };
    let text = element
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(separator);
    Ok((!text.is_empty()).then_some(text))
}

fn has_element(doc: &Html, css: &str) -> Result<bool> {
    Ok(doc.select(&selector(css)?).next().is_some())
}

/// Product page links from a search results page, resolved against `base_url`.
pub fn parse_product_links(html: &str, base_url: &str) -> Result<Vec<String>> {
    let doc = Html::parse_document(html);
    let base = Url::parse(base_url).map_err(|e| Error::InvalidUrl(format!("{base_url}: {e}")))?;
    let links_selector = selector(RESULT_LINK)?;

    let links: Vec<String> = doc
        .select(&links_selector)
        .filter_map(|a| a.value().attr("href"))
        .filter_map(|href| base.join(href).ok())
        .map(String::from)
        .collect();

    debug!("Parsed {} result links", links.len());
    Ok(links)
}

/// The product id of a product link: the path segment after `/dp/`, cut at
/// `/ref` (where tracking parameters start) or at the end of the path.
pub fn extract_product_id(link: &str) -> Option<String> {
    let start = link.find("/dp/")? + "/dp/".len();
    let rest = &link[start..];
    let end = rest
        .find("/ref")
        .or_else(|| rest.find(['/', '?', '#']))
        .unwrap_or(rest.len());
    let id = &rest[..end];
    (!id.is_empty()).then(|| id.to_string())
}

/// Short product URL without any tracking suffix.
pub fn product_url(base_url: &str, product_id: &str) -> String {
    format!("{base_url}dp/{product_id}")
}

/// Reads title, seller and raw price text from a product page.
///
/// The price normally sits in the buy box. Only when that element is missing
/// is the product description consulted, and only if it carries an
/// availability note; that text is cut to start at the currency marker.
pub fn parse_product_fields(html: &str, currency: &str) -> Result<ProductFields> {
    let doc = Html::parse_document(html);

    let title = element_text(&doc, TITLE, " ")?;
    let seller = element_text(&doc, SELLER, " ")?;

    let raw_price = if has_element(&doc, PRICE)? {
        element_text(&doc, PRICE, "\n")?
    } else {
        let available = element_text(&doc, AVAILABILITY, " ")?
            .is_some_and(|text| text.contains("Availability"));
        if available {
            element_text(&doc, DESCRIPTION_PRICE, "\n")?.map(|text| match text.find(currency) {
                Some(idx) => text[idx..].to_string(),
                None => text,
            })
        } else {
            None
        }
    };

    Ok(ProductFields {
        title,
        seller,
        raw_price,
    })
}
