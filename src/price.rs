//! Conversion of scraped price text into numbers.
//!
//! Scraped prices arrive as rendered text, e.g. `"€299\n99"` when the whole
//! and fractional parts sit in separate elements, or `"$1,234"` with a
//! thousands separator. [`normalize`] undoes exactly those two artifacts and
//! nothing more. It is not a locale-aware number parser: only the first
//! grouping comma is dropped, and everything after a second comma or a second
//! line break is discarded.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    #[error("currency marker {marker:?} not found in price text")]
    MarkerNotFound { marker: String },

    #[error("price text {0:?} is not numeric")]
    NotNumeric(String),
}

/// Parses `raw` into a price, using `marker` to locate where the number starts.
///
/// The candidate value is the text between the first occurrence of `marker`
/// and the next one (or the end of the text).
pub fn normalize(raw: &str, marker: &str) -> Result<f64, PriceError> {
    let candidate = match marker {
        "" => None,
        _ => raw.split(marker).nth(1),
    };
    let Some(candidate) = candidate else {
        return Err(PriceError::MarkerNotFound {
            marker: marker.to_string(),
        });
    };

    let value = join_fraction(candidate);
    let value = drop_grouping(&value);

    let trimmed = value.trim();
    match trimmed.parse::<f64>() {
        Ok(price) if price.is_finite() => Ok(price),
        _ => Err(PriceError::NotNumeric(trimmed.to_string())),
    }
}

// "299\n99" -> "299.99"
fn join_fraction(candidate: &str) -> String {
    if !candidate.contains('\n') {
        return candidate.to_string();
    }
    let mut lines = candidate.split('\n').map(|line| line.trim_end_matches('\r'));
    let whole = lines.next().unwrap_or_default();
    let fraction = lines.next().unwrap_or_default();
    format!("{whole}.{fraction}")
}

// "1,234" -> "1234"
fn drop_grouping(value: &str) -> String {
    if !value.contains(',') {
        return value.to_string();
    }
    let mut segments = value.split(',');
    let head = segments.next().unwrap_or_default();
    let tail = segments.next().unwrap_or_default();
    format!("{head}{tail}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_integer_is_unchanged() {
        for marker in ["$", "€", "EUR"] {
            for n in 0..=10_000u32 {
                let raw = format!("{marker}{n}");
                assert_eq!(normalize(&raw, marker), Ok(f64::from(n)), "input {raw:?}");
            }
        }
    }

    #[test]
    fn test_line_break_becomes_decimal_point() {
        assert_eq!(normalize("$1\n99", "$"), Ok(1.99));
    }

    #[test]
    fn test_single_grouping_separator_is_removed() {
        assert_eq!(normalize("$1,234", "$"), Ok(1234.0));
    }

    #[test]
    fn test_fraction_join_happens_before_grouping_removal() {
        assert_eq!(normalize("$1,234\n56", "$"), Ok(1234.56));
    }

    #[test]
    fn test_only_first_grouping_segment_pair_is_kept() {
        // Approximation: the third group is dropped, not merged.
        assert_eq!(normalize("$1,234,567", "$"), Ok(1234.0));
    }

    #[test]
    fn test_text_after_second_line_break_is_ignored() {
        assert_eq!(normalize("€12\n50\nincl. VAT", "€"), Ok(12.5));
    }

    #[test]
    fn test_trailing_line_break_without_fraction() {
        assert_eq!(normalize("$12\n", "$"), Ok(12.0));
    }

    #[test]
    fn test_windows_line_endings() {
        assert_eq!(normalize("$3\r\n49", "$"), Ok(3.49));
    }

    #[test]
    fn test_surrounding_whitespace_is_tolerated() {
        assert_eq!(normalize("EUR 19.90 ", "EUR"), Ok(19.9));
    }

    #[test]
    fn test_prefix_before_marker_is_ignored() {
        assert_eq!(normalize("Price: £15", "£"), Ok(15.0));
    }

    #[test]
    fn test_missing_marker() {
        for raw in ["42", "", "1\n99", "€42"] {
            assert_eq!(
                normalize(raw, "$"),
                Err(PriceError::MarkerNotFound {
                    marker: "$".to_string()
                }),
                "input {raw:?}"
            );
        }
    }

    #[test]
    fn test_empty_marker_never_matches() {
        assert!(matches!(
            normalize("$42", ""),
            Err(PriceError::MarkerNotFound { .. })
        ));
    }

    #[test]
    fn test_not_numeric() {
        assert_eq!(
            normalize("$free", "$"),
            Err(PriceError::NotNumeric("free".to_string()))
        );
        assert!(matches!(normalize("$", "$"), Err(PriceError::NotNumeric(_))));
    }

    #[test]
    fn test_non_finite_values_are_rejected() {
        assert!(matches!(normalize("$inf", "$"), Err(PriceError::NotNumeric(_))));
        assert!(matches!(normalize("$NaN", "$"), Err(PriceError::NotNumeric(_))));
    }

    #[test]
    fn test_segment_stops_at_second_marker() {
        assert_eq!(normalize("$5$6", "$"), Ok(5.0));
    }
}
