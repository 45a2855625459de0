//! Terminal dashboard for a warehouse/stock statistics API.

pub mod api;
pub mod assistant;
pub mod cli;
pub mod config;
pub mod dashboard;
pub mod logging;
pub mod metrics;
pub mod view;
