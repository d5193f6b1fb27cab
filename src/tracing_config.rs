use error_stack::Report;
use tracing_subscriber::{fmt::time::ChronoUtc, EnvFilter};

use crate::Error;

/// Set up the global tracing subscriber. The filter is read from `RUST_LOG`, defaulting to
/// `info`.
pub fn configure_tracing() -> Result<(), Report<Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(ChronoUtc::rfc_3339())
        .with_writer(std::io::stdout)
        .try_init()
        .map_err(|e| Report::new(Error::Tracing).attach_printable(e.to_string()))
}
