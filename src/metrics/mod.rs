//! Aggregation over API payloads: percentages, rankings, shipment summaries
//! and categorical distributions.
//!
//! Everything here is pure and synchronous. Renderers only format what these
//! functions return.

pub mod distribution;
pub mod percent;
pub mod ranking;
pub mod shipments;

use thiserror::Error;

pub use ranking::RankedEntry;
pub use shipments::ShipmentSummary;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MetricsError {
    #[error("cannot compute a percentage of a zero total")]
    DivisionByZero,

    #[error("percentage inputs must be finite")]
    NotFinite,
}
