use http::StatusCode;
use serde::{Serialize, Serializer};

/// Status codes that indicate a server-side failure worth surfacing to operators.
const FATAL_CODES: [u16; 7] = [500, 501, 502, 503, 504, 505, 511];

/// The `status` object of every envelope. The fields are only set through [ResponseStatus::ok]
/// and [ResponseStatus::error], so `code` is always a valid HTTP status and `message` always
/// matches it.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ResponseStatus {
    #[serde(serialize_with = "serialize_code")]
    code: StatusCode,
    message: &'static str,
    error: String,
}

fn serialize_code<S: Serializer>(code: &StatusCode, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u16(code.as_u16())
}

impl ResponseStatus {
    /// A status for a successful response.
    pub fn ok() -> Self {
        Self::new(StatusCode::OK, String::new())
    }

    /// A status for an error response, carrying the error's message.
    pub fn error(code: StatusCode, error: impl Into<String>) -> Self {
        Self::new(code, error.into())
    }

    fn new(code: StatusCode, error: String) -> Self {
        Self {
            code,
            message: reason_phrase(code),
            error,
        }
    }

    /// The HTTP status code
    pub fn code(&self) -> StatusCode {
        self.code
    }

    /// The standard reason phrase for the code
    pub fn message(&self) -> &str {
        self.message
    }

    /// The error message, empty on success
    pub fn error_message(&self) -> &str {
        &self.error
    }

    /// Returns true if this status should be logged when written.
    pub fn is_fatal(&self) -> bool {
        is_fatal_status(self.code)
    }
}

/// The standard reason phrase for a code, or an empty string for codes without one.
pub fn reason_phrase(code: StatusCode) -> &'static str {
    code.canonical_reason().unwrap_or("")
}

/// Returns true if `code` is one of the server failure codes that get logged when an error
/// response is written. Other 5xx codes such as 509 are deliberately not in the set.
pub fn is_fatal_code(code: u16) -> bool {
    FATAL_CODES.contains(&code)
}

/// [is_fatal_code] for an [http::StatusCode].
pub fn is_fatal_status(code: StatusCode) -> bool {
    is_fatal_code(code.as_u16())
}
