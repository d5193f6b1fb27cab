use std::sync::Mutex;

use http::{Method, StatusCode, Uri};

/// The fields recorded when an error response with a fatal status code is written.
#[derive(Debug)]
pub struct ErrorRecord<'a> {
    pub method: &'a Method,
    pub uri: &'a Uri,
    pub code: StatusCode,
    pub error: &'a str,
}

/// Logging used by [crate::ResponseWriter]. This is passed to the writer instead of
/// reaching for a global so that tests can observe what was logged.
pub trait ResponseLogger {
    /// Record that an error response with a fatal status is being written.
    fn warn_fields(&self, record: &ErrorRecord<'_>);

    /// Called when an envelope could not be serialized. This never returns.
    fn fatal(&self, message: &str, error: &serde_json::Error) -> !;
}

/// Logs through `tracing` and exits the process on fatal errors.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl ResponseLogger for TracingLogger {
    fn warn_fields(&self, record: &ErrorRecord<'_>) {
        tracing::warn!(
            method = %record.method,
            url = %record.uri,
            code = record.code.as_u16(),
            error = record.error,
            "API handler returned an error"
        );
    }

    fn fatal(&self, message: &str, error: &serde_json::Error) -> ! {
        tracing::error!(error = %error, "{message}");
        std::process::exit(1);
    }
}

/// A warning kept by [RecordingLogger], with the request fields rendered to strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggedWarning {
    pub method: String,
    pub url: String,
    pub code: u16,
    pub error: String,
}

/// A logger that keeps everything it is given, for tests.
#[derive(Debug, Default)]
pub struct RecordingLogger {
    warnings: Mutex<Vec<LoggedWarning>>,
    fatals: Mutex<Vec<String>>,
}

impl RecordingLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warnings(&self) -> Vec<LoggedWarning> {
        self.warnings
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn fatals(&self) -> Vec<String> {
        self.fatals
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

impl ResponseLogger for RecordingLogger {
    fn warn_fields(&self, record: &ErrorRecord<'_>) {
        self.warnings
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(LoggedWarning {
                method: record.method.to_string(),
                url: record.uri.to_string(),
                code: record.code.as_u16(),
                error: record.error.to_string(),
            });
    }

    /// Records the failure and panics instead of exiting.
    fn fatal(&self, message: &str, error: &serde_json::Error) -> ! {
        let line = format!("{message}: {error}");
        self.fatals
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(line.clone());
        panic!("{line}");
    }
}

impl<L: ResponseLogger + ?Sized> ResponseLogger for &L {
    fn warn_fields(&self, record: &ErrorRecord<'_>) {
        (**self).warn_fields(record)
    }

    fn fatal(&self, message: &str, error: &serde_json::Error) -> ! {
        (**self).fatal(message, error)
    }
}

impl<L: ResponseLogger + ?Sized> ResponseLogger for std::sync::Arc<L> {
    fn warn_fields(&self, record: &ErrorRecord<'_>) {
        (**self).warn_fields(record)
    }

    fn fatal(&self, message: &str, error: &serde_json::Error) -> ! {
        (**self).fatal(message, error)
    }
}
