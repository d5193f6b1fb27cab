//! JSON envelopes for HTTP responses.
//!
//! Every response is written as `{"status": {"code", "message", "error"}, "body": ...}`, with
//! `Content-Type` and `Content-Length` headers set to match. Error responses whose status
//! code indicates a server failure are logged along with the request that caused them.

pub mod envelope;
pub mod error;
pub mod logger;
pub mod reply;
pub mod request;
pub mod server;
pub mod sink;
pub mod status;
#[cfg(test)]
pub mod tests;
pub mod tracing_config;
pub mod writer;

pub use envelope::ResponseEnvelope;
pub use error::Error;
pub use logger::{ErrorRecord, RecordingLogger, ResponseLogger, TracingLogger};
pub use reply::{Envelope, EnvelopeError};
pub use request::RequestContext;
pub use sink::{BufferedResponse, ResponseSink};
pub use status::{is_fatal_code, is_fatal_status, ResponseStatus};
pub use writer::ResponseWriter;
