//! Tracing setup.
//!
//! Diagnostics go to stderr so table, JSON and CSV output on stdout stays
//! clean for piping.

use tracing::{debug, trace};

/// Filter used for a given `-v` count.
///
/// With no flag the configured level applies (`logging.level`, or
/// `STOCKDASH_LOG`, which may be a full filter directive).
pub fn filter_for(verbose: u8, configured: &str) -> String {
    match verbose {
        0 => configured.to_string(),
        1 => "info".to_string(),
        2 => "debug".to_string(),
        _ => "trace".to_string(),
    }
}

/// Initialize tracing for the process.
pub fn init_logging(verbose: u8, configured: &str) {
    let filter = filter_for(verbose, configured);

    tracing_subscriber::fmt()
        .with_env_filter(filter.as_str())
        .with_writer(std::io::stderr)
        .with_target(verbose >= 2)
        .with_thread_ids(verbose >= 3)
        .with_line_number(verbose >= 3)
        .init();

    debug!(filter = %filter, "stockdash started with verbosity level {verbose}");
    trace!("Full CLI args: {:?}", std::env::args().collect::<Vec<_>>());
}
