use crate::models::ProductRecord;

/// Picks the cheapest record, or `None` when no record carries a price.
///
/// Ties go to the record that appears first in `records`.
pub fn select_best(records: &[ProductRecord]) -> Option<&ProductRecord> {
    records
        .iter()
        .filter_map(|record| record.price.map(|price| (price, record)))
        .reduce(|best, current| if current.0 < best.0 { current } else { best })
        .map(|(_, record)| record)
}
