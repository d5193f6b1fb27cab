use axum::response::{IntoResponse, Response};
use bytes::{Bytes, BytesMut};
use http::{HeaderMap, HeaderName, HeaderValue, StatusCode};

/// The destination of a written response. Writes are assumed to succeed; transport errors
/// are the hosting server's concern.
pub trait ResponseSink {
    fn set_header(&mut self, name: HeaderName, value: HeaderValue);
    fn write_status(&mut self, code: StatusCode);
    fn write_body(&mut self, body: Bytes);
}

/// An in-memory response that can be handed back to axum.
#[derive(Debug, Default)]
pub struct BufferedResponse {
    status: Option<StatusCode>,
    headers: HeaderMap,
    body: Bytes,
}

impl BufferedResponse {
    pub fn new() -> Self {
        Self::default()
    }

    /// The written status, or 200 if none was written.
    pub fn status(&self) -> StatusCode {
        self.status.unwrap_or(StatusCode::OK)
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }
}

impl ResponseSink for BufferedResponse {
    fn set_header(&mut self, name: HeaderName, value: HeaderValue) {
        self.headers.insert(name, value);
    }

    fn write_status(&mut self, code: StatusCode) {
        // Like a real connection, only the first status line counts.
        self.status.get_or_insert(code);
    }

    fn write_body(&mut self, body: Bytes) {
        append_body(&mut self.body, body);
    }
}

impl IntoResponse for BufferedResponse {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, self.headers, self.body).into_response()
    }
}

impl ResponseSink for http::Response<Bytes> {
    fn set_header(&mut self, name: HeaderName, value: HeaderValue) {
        self.headers_mut().insert(name, value);
    }

    fn write_status(&mut self, code: StatusCode) {
        *self.status_mut() = code;
    }

    fn write_body(&mut self, body: Bytes) {
        append_body(self.body_mut(), body);
    }
}

/// Body writes append, as they would on a connection.
fn append_body(existing: &mut Bytes, body: Bytes) {
    if existing.is_empty() {
        *existing = body;
    } else {
        let mut joined = BytesMut::with_capacity(existing.len() + body.len());
        joined.extend_from_slice(existing);
        joined.extend_from_slice(&body);
        *existing = joined.freeze();
    }
}
