use axum::response::{IntoResponse, Response};
use http::StatusCode;
use serde::Serialize;

use crate::{
    logger::ResponseLogger, request::RequestContext, sink::BufferedResponse,
    writer::ResponseWriter,
};

/// An axum response that writes `T` as the body of a successful envelope.
#[derive(Debug, Clone)]
pub struct Envelope<T>(pub T);

impl<T: Serialize> Envelope<T> {
    /// Build the response using `writer` instead of the default tracing writer.
    pub fn into_response_with<L: ResponseLogger>(self, writer: &ResponseWriter<L>) -> Response {
        let mut sink = BufferedResponse::new();
        writer.write_success(&mut sink, self.0);
        sink.into_response()
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        self.into_response_with(&ResponseWriter::new())
    }
}

/// An axum error response that writes an error envelope, logging fatal codes with the
/// request that produced them.
#[derive(Debug, Clone)]
pub struct EnvelopeError {
    pub request: RequestContext,
    pub code: StatusCode,
    pub error: String,
}

impl EnvelopeError {
    pub fn new(request: RequestContext, code: StatusCode, error: impl std::fmt::Display) -> Self {
        Self {
            request,
            code,
            error: error.to_string(),
        }
    }

    /// Build the response using `writer`, so fatal codes are logged through its logger.
    pub fn into_response_with<L: ResponseLogger>(self, writer: &ResponseWriter<L>) -> Response {
        let mut sink = BufferedResponse::new();
        writer.write_error(&mut sink, &self.request, self.code, &self.error);
        sink.into_response()
    }
}

impl IntoResponse for EnvelopeError {
    fn into_response(self) -> Response {
        self.into_response_with(&ResponseWriter::new())
    }
}
