//! Per-warehouse shipment summary.

use std::collections::HashSet;

use serde::Serialize;

use super::ranking::{self, RankedEntry};
use crate::api::models::Shipment;

/// Default number of products kept in [`ShipmentSummary::top_products`].
pub const DEFAULT_TOP_PRODUCTS: usize = 5;

/// Default number of sizes kept in [`ShipmentSummary::top_sizes`].
pub const DEFAULT_TOP_SIZES: usize = 10;

/// Aggregates derived from one warehouse's shipment list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ShipmentSummary {
    pub store_count: usize,
    pub distinct_product_count: usize,
    pub total_product_count: usize,
    pub total_size_count: usize,
    pub top_products: Vec<RankedEntry>,
    pub top_sizes: Vec<RankedEntry>,
}

/// Per-store breakdown row for the detail table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoreLine {
    pub store_id: String,
    pub product_lines: usize,
    pub size_units: usize,
}

impl ShipmentSummary {
    /// Build with the default top-5 / top-10 limits.
    pub fn build(shipments: &[Shipment]) -> Self {
        Self::build_with_limits(shipments, DEFAULT_TOP_PRODUCTS, DEFAULT_TOP_SIZES)
    }

    pub fn build_with_limits(
        shipments: &[Shipment],
        top_products: usize,
        top_sizes: usize,
    ) -> Self {
        let mut distinct: HashSet<&str> = HashSet::new();
        let mut total_product_count = 0;
        let mut total_size_count = 0;

        for shipment in shipments {
            total_product_count += shipment.products.len();
            for line in &shipment.products {
                distinct.insert(&line.product_id);
                total_size_count += line.sizes.len();
            }
        }

        // One occurrence per (shipment, product) pair.
        let product_occurrences = shipments.iter().flat_map(|shipment| {
            let mut seen: HashSet<&str> = HashSet::new();
            shipment
                .products
                .iter()
                .filter(move |line| seen.insert(&line.product_id))
                .map(|line| line.product_id.as_str())
        });

        let size_occurrences = shipments
            .iter()
            .flat_map(|s| &s.products)
            .flat_map(|line| &line.sizes);

        Self {
            store_count: shipments.len(),
            distinct_product_count: distinct.len(),
            total_product_count,
            total_size_count,
            top_products: ranking::rank_by(
                product_occurrences,
                |id| id.to_string(),
                Some(top_products),
            ),
            top_sizes: ranking::rank_by(size_occurrences, |size| size.to_string(), Some(top_sizes)),
        }
    }

    /// True when there is nothing to show for this warehouse.
    pub fn is_empty(&self) -> bool {
        self.store_count == 0
    }
}

/// Per-store rows in input order.
pub fn store_lines(shipments: &[Shipment]) -> Vec<StoreLine> {
    shipments
        .iter()
        .map(|s| StoreLine {
            store_id: s.store_id.clone(),
            product_lines: s.products.len(),
            size_units: s.products.iter().map(|p| p.sizes.len()).sum(),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::ProductLine;

    fn line(product: &str, sizes: &[&str]) -> ProductLine {
        ProductLine {
            product_id: product.to_string(),
            sizes: sizes.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn duplicate_product_in_one_shipment_ranks_once() {
        let shipments = vec![Shipment {
            store_id: "A".to_string(),
            products: vec![line("P1", &["S"]), line("P1", &["M"])],
        }];

        let summary = ShipmentSummary::build(&shipments);
        assert_eq!(summary.total_product_count, 2);
        assert_eq!(summary.distinct_product_count, 1);
        assert_eq!(summary.top_products, vec![RankedEntry::new("P1", 1)]);
    }

    #[test]
    fn store_lines_follow_input_order() {
        let shipments = vec![
            Shipment {
                store_id: "B".to_string(),
                products: vec![line("P1", &["S", "M"]), line("P2", &[])],
            },
            Shipment {
                store_id: "A".to_string(),
                products: vec![],
            },
        ];

        let rows = store_lines(&shipments);
        assert_eq!(rows[0].store_id, "B");
        assert_eq!(rows[0].product_lines, 2);
        assert_eq!(rows[0].size_units, 2);
        assert_eq!(rows[1].size_units, 0);
    }

    #[test]
    fn custom_limits_apply() {
        let shipments = vec![Shipment {
            store_id: "A".to_string(),
            products: vec![line("P1", &["S", "M", "L"]), line("P2", &["XL"])],
        }];

        let summary = ShipmentSummary::build_with_limits(&shipments, 1, 2);
        assert_eq!(summary.top_products.len(), 1);
        assert_eq!(summary.top_sizes.len(), 2);
    }
}
