use http::StatusCode;
use serde::Serialize;

use crate::status::ResponseStatus;

/// The JSON document written for every response: a status object plus, for successful
/// responses, the body payload. Only the [ResponseEnvelope::success] and
/// [ResponseEnvelope::error] constructors can build one, so a body and an error never appear
/// together.
#[derive(Serialize, Debug, Clone)]
pub struct ResponseEnvelope<T: Serialize> {
    status: ResponseStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    body: Option<T>,
}

impl<T: Serialize> ResponseEnvelope<T> {
    /// A 200 envelope wrapping `body`.
    pub fn success(body: T) -> Self {
        Self {
            status: ResponseStatus::ok(),
            body: Some(body),
        }
    }

    pub fn status(&self) -> &ResponseStatus {
        &self.status
    }

    pub fn body(&self) -> Option<&T> {
        self.body.as_ref()
    }

    /// The HTTP status this envelope should be written with.
    pub fn status_code(&self) -> StatusCode {
        self.status.code()
    }

    /// Serialize the envelope to its wire form.
    pub fn to_json(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }
}

impl ResponseEnvelope<()> {
    /// An envelope for an error response. It never carries a body.
    pub fn error(code: StatusCode, error: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::error(code, error),
            body: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn success_json() {
        let envelope = ResponseEnvelope::success(json!({ "id": 1 }));
        let output = String::from_utf8(envelope.to_json().unwrap()).unwrap();
        insta::assert_snapshot!(output, @r###"{"status":{"code":200,"message":"OK","error":""},"body":{"id":1}}"###);
    }

    #[test]
    fn error_json_has_no_body() {
        let envelope = ResponseEnvelope::error(StatusCode::SERVICE_UNAVAILABLE, "db down");
        let output = String::from_utf8(envelope.to_json().unwrap()).unwrap();
        insta::assert_snapshot!(output, @r###"{"status":{"code":503,"message":"Service Unavailable","error":"db down"}}"###);
    }

    #[test]
    fn null_body_is_still_written() {
        let envelope = ResponseEnvelope::success(serde_json::Value::Null);
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(
            value,
            json!({
                "status": { "code": 200, "message": "OK", "error": "" },
                "body": null,
            })
        );
    }

    #[test]
    fn status_code_round_trip() {
        let envelope = ResponseEnvelope::error(StatusCode::IM_A_TEAPOT, "short and stout");
        assert_eq!(envelope.status_code(), StatusCode::IM_A_TEAPOT);
        assert_eq!(envelope.status().error_message(), "short and stout");
        assert!(envelope.body().is_none());
        assert_eq!(
            ResponseEnvelope::success("hi").status_code(),
            StatusCode::OK
        );
    }
}
