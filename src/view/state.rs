//! Warehouse detail view state machine.
//!
//! ```text
//! Unselected ─select─▶ Loading ─ok, non-empty─▶ Loaded
//!                      Loading ─ok, empty─────▶ Empty
//!                      Loading ─failed────────▶ Error
//! (any state) ─select─▶ Loading
//! ```
//!
//! Every [`select`](WarehouseView::select) hands out a fresh
//! [`RequestToken`]. A response is applied only when it carries the latest
//! token; anything older belongs to a previous selection and is dropped.

use crate::api::FetchError;
use crate::api::models::{Shipment, WarehouseDetail};
use crate::metrics::ShipmentSummary;
use crate::metrics::shipments::{self, DEFAULT_TOP_PRODUCTS, DEFAULT_TOP_SIZES, StoreLine};

/// Monotonic tag identifying one selection's request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn value(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DetailState {
    Unselected,
    Loading {
        warehouse_id: String,
    },
    Loaded {
        warehouse_id: String,
        shipments: Vec<Shipment>,
        /// `summary` and `stores` are always computed from `shipments` in
        /// the same transition.
        summary: ShipmentSummary,
        stores: Vec<StoreLine>,
    },
    Empty {
        warehouse_id: String,
    },
    Error {
        warehouse_id: String,
        error: FetchError,
    },
}

impl DetailState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Unselected => "unselected",
            Self::Loading { .. } => "loading",
            Self::Loaded { .. } => "loaded",
            Self::Empty { .. } => "empty",
            Self::Error { .. } => "error",
        }
    }

    pub fn warehouse_id(&self) -> Option<&str> {
        match self {
            Self::Unselected => None,
            Self::Loading { warehouse_id }
            | Self::Loaded { warehouse_id, .. }
            | Self::Empty { warehouse_id }
            | Self::Error { warehouse_id, .. } => Some(warehouse_id),
        }
    }
}

/// Outcome of offering a response to the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Applied,
    /// The token was superseded by a newer selection.
    Stale,
}

#[derive(Debug)]
pub struct WarehouseView {
    state: DetailState,
    issued: u64,
    top_products: usize,
    top_sizes: usize,
}

impl Default for WarehouseView {
    fn default() -> Self {
        Self::new()
    }
}

impl WarehouseView {
    pub fn new() -> Self {
        Self::with_limits(DEFAULT_TOP_PRODUCTS, DEFAULT_TOP_SIZES)
    }

    pub fn with_limits(top_products: usize, top_sizes: usize) -> Self {
        Self {
            state: DetailState::Unselected,
            issued: 0,
            top_products,
            top_sizes,
        }
    }

    pub fn state(&self) -> &DetailState {
        &self.state
    }

    /// Start loading `warehouse_id`, discarding whatever was shown before.
    pub fn select(&mut self, warehouse_id: impl Into<String>) -> RequestToken {
        self.issued += 1;
        self.state = DetailState::Loading {
            warehouse_id: warehouse_id.into(),
        };
        RequestToken(self.issued)
    }

    /// Whether `token` still belongs to the current selection.
    pub fn is_current(&self, token: RequestToken) -> bool {
        token.0 == self.issued && matches!(self.state, DetailState::Loading { .. })
    }

    /// Apply a response if it answers the latest selection.
    pub fn resolve(
        &mut self,
        token: RequestToken,
        result: Result<WarehouseDetail, FetchError>,
    ) -> Resolution {
        if !self.is_current(token) {
            tracing::debug!(
                token = token.0,
                latest = self.issued,
                "discarding stale warehouse response"
            );
            return Resolution::Stale;
        }

        let DetailState::Loading { warehouse_id } =
            std::mem::replace(&mut self.state, DetailState::Unselected)
        else {
            return Resolution::Stale;
        };

        self.state = match result {
            Ok(detail) if detail.shipments.is_empty() => DetailState::Empty { warehouse_id },
            Ok(detail) => {
                let summary = ShipmentSummary::build_with_limits(
                    &detail.shipments,
                    self.top_products,
                    self.top_sizes,
                );
                let stores = shipments::store_lines(&detail.shipments);
                DetailState::Loaded {
                    warehouse_id,
                    shipments: detail.shipments,
                    summary,
                    stores,
                }
            }
            Err(error) => DetailState::Error {
                warehouse_id,
                error,
            },
        };

        Resolution::Applied
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
