//! Categorical distributions: brand/country shares and the size chart.

use serde::Serialize;

use super::percent;
use crate::api::models::{NamedCount, SizeQuantity};

/// Default number of categories drawn in the size chart.
pub const DEFAULT_CHART_SLICES: usize = 8;

/// A labeled count with its share of a reference total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DistributionLine {
    pub name: String,
    pub count: u64,
    pub percent: String,
}

/// Attach a percentage of `total` to each entry, preserving backend order.
///
/// Brands are measured against the product count, countries against the
/// warehouse count.
pub fn with_shares(entries: &[NamedCount], total: u64) -> Vec<DistributionLine> {
    entries
        .iter()
        .map(|e| DistributionLine {
            name: e.name.clone(),
            count: e.count,
            percent: percent::percent_of(e.count, total),
        })
        .collect()
}

/// One slice of the size chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartSlice {
    pub label: String,
    pub quantity: u64,
    /// Share of the charted slices, not of the whole inventory.
    pub share: String,
}

/// Select the `slices` largest sizes by quantity for the chart.
///
/// The backend order is not trusted: sizes are stable-sorted by quantity
/// descending first, so equal quantities keep the order they arrived in.
pub fn size_chart(sizes: &[SizeQuantity], slices: usize) -> Vec<ChartSlice> {
    let top: Vec<&SizeQuantity> = sorted_by_quantity(sizes).into_iter().take(slices).collect();
    let charted: u64 = top.iter().map(|s| s.quantity).sum();

    top.into_iter()
        .map(|s| ChartSlice {
            label: s.size.clone(),
            quantity: s.quantity,
            share: percent::percent_of(s.quantity, charted),
        })
        .collect()
}

/// Digits after the point in [`size_table`] shares.
const TABLE_DECIMALS: usize = 2;

/// One row of the full inventory-by-size table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SizeRow {
    pub size: String,
    pub quantity: u64,
    pub percent: String,
}

/// Every size, largest first, with a two-decimal share of total quantity.
pub fn size_table(sizes: &[SizeQuantity]) -> Vec<SizeRow> {
    let total: u64 = sizes.iter().map(|s| s.quantity).sum();

    sorted_by_quantity(sizes)
        .into_iter()
        .map(|s| SizeRow {
            size: s.size.clone(),
            quantity: s.quantity,
            percent: percent::percent_of_with(s.quantity, total, TABLE_DECIMALS),
        })
        .collect()
}

fn sorted_by_quantity(sizes: &[SizeQuantity]) -> Vec<&SizeQuantity> {
    let mut sorted: Vec<&SizeQuantity> = sizes.iter().collect();
    sorted.sort_by(|a, b| b.quantity.cmp(&a.quantity));
    sorted
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn size(label: &str, quantity: u64) -> SizeQuantity {
        SizeQuantity {
            size: label.to_string(),
            quantity,
        }
    }

    #[test]
    fn shares_use_reference_total() {
        let brands = vec![
            NamedCount {
                name: "Nike".to_string(),
                count: 3,
            },
            NamedCount {
                name: "Adidas".to_string(),
                count: 1,
            },
        ];

        let lines = with_shares(&brands, 8);
        assert_eq!(lines[0].percent, "37.5%");
        assert_eq!(lines[1].percent, "12.5%");
    }

    #[test]
    fn zero_reference_total_renders_sentinel() {
        let countries = vec![NamedCount {
            name: "ES".to_string(),
            count: 2,
        }];
        assert_eq!(with_shares(&countries, 0)[0].percent, "N/A");
    }

    #[test]
    fn chart_takes_largest_even_when_unsorted() {
        let sizes: Vec<SizeQuantity> = (1..=10).map(|q| size(&format!("S{q}"), q)).collect();
        let chart = size_chart(&sizes, DEFAULT_CHART_SLICES);

        assert_eq!(chart.len(), 8);
        assert_eq!(chart[0].label, "S10");
        assert_eq!(chart[7].label, "S3");
    }

    #[test]
    fn chart_with_fewer_sizes_than_slices() {
        let chart = size_chart(&[size("M", 3), size("L", 1)], 8);
        assert_eq!(chart.len(), 2);
        assert_eq!(chart[0].share, "75.0%");
        assert_eq!(chart[1].share, "25.0%");
    }

    #[test]
    fn size_table_has_two_decimals() {
        let rows = size_table(&[size("S", 1), size("M", 2)]);
        assert_eq!(rows[0].size, "M");
        assert_eq!(rows[0].percent, "66.67%");
        assert_eq!(rows[1].percent, "33.33%");
    }

    #[test]
    fn size_table_with_zero_total_is_not_available() {
        let rows = size_table(&[size("S", 0), size("M", 0)]);
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.percent == percent::NOT_AVAILABLE));
    }
}
