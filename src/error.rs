use thiserror::Error;

/// The top-level error type for the demo server
#[derive(Debug, Error)]
pub enum Error {
    /// Failed to start the HTTP server
    #[error("Failed to start server")]
    ServerStart,
    /// Failed to set up logging
    #[error("Failed to configure tracing")]
    Tracing,
}
