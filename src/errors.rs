use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReceiptVerifierError {
    #[error("failed to read config file '{}': {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file '{}': {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid verification request: {0}")]
    InvalidRequest(#[source] serde_json::Error),

    #[error("failed to serialize verification result: {0}")]
    ResultSerialize(#[source] serde_json::Error),

    /// Error calling out to the verifyReceipt endpoint. Converted to a generic
    /// failed result before it reaches the caller of `verify`.
    #[error("{function_name} callout to {url} failed: {message}")]
    Callout {
        function_name: &'static str,
        url: String,
        message: String,
    },
}

impl ReceiptVerifierError {
    pub(crate) fn callout(
        function_name: &'static str,
        url: &str,
        message: impl Into<String>,
    ) -> Self {
        Self::Callout {
            function_name,
            url: url.to_owned(),
            message: message.into(),
        }
    }
}
