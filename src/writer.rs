use bytes::Bytes;
use http::{
    header::{CONTENT_LENGTH, CONTENT_TYPE},
    HeaderValue, StatusCode,
};
use serde::Serialize;

use crate::{
    envelope::ResponseEnvelope,
    logger::{ErrorRecord, ResponseLogger, TracingLogger},
    request::RequestContext,
    sink::ResponseSink,
    status::is_fatal_status,
};

pub const JSON_CONTENT_TYPE: &str = "application/json; charset=UTF-8";

/// Writes envelopes to response sinks. The writer holds nothing but its logger, so a single
/// instance can be shared by every request.
#[derive(Debug, Default, Clone)]
pub struct ResponseWriter<L: ResponseLogger = TracingLogger> {
    logger: L,
}

impl ResponseWriter<TracingLogger> {
    pub fn new() -> Self {
        Self::with_logger(TracingLogger)
    }
}

impl<L: ResponseLogger> ResponseWriter<L> {
    pub fn with_logger(logger: L) -> Self {
        Self { logger }
    }

    pub fn logger(&self) -> &L {
        &self.logger
    }

    /// Write a 200 response with `body` as the envelope payload.
    pub fn write_success<S, T>(&self, sink: &mut S, body: T)
    where
        S: ResponseSink + ?Sized,
        T: Serialize,
    {
        self.write_json(sink, &ResponseEnvelope::success(body));
    }

    /// Write an error response with the given status code. Codes in the fatal set are
    /// logged along with the request that caused them.
    pub fn write_error<S, E>(
        &self,
        sink: &mut S,
        request: &RequestContext,
        code: StatusCode,
        err: &E,
    ) where
        S: ResponseSink + ?Sized,
        E: std::fmt::Display + ?Sized,
    {
        let envelope = ResponseEnvelope::error(code, err.to_string());

        if is_fatal_status(code) {
            self.logger.warn_fields(&ErrorRecord {
                method: &request.method,
                uri: &request.uri,
                code,
                error: envelope.status().error_message(),
            });
        }

        self.write_json(sink, &envelope);
    }

    /// Serialize an envelope and write it, along with its headers and status.
    pub fn write_json<S, T>(&self, sink: &mut S, envelope: &ResponseEnvelope<T>)
    where
        S: ResponseSink + ?Sized,
        T: Serialize,
    {
        let json = match envelope.to_json() {
            Ok(json) => json,
            Err(e) => self
                .logger
                .fatal("Could not serialize JSON in the API writer", &e),
        };

        sink.set_header(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
        sink.set_header(CONTENT_LENGTH, HeaderValue::from(json.len()));
        sink.write_status(envelope.status_code());
        sink.write_body(Bytes::from(json));
    }
}
