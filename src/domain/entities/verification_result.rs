use serde::{Deserialize, Serialize};

use crate::constants::{SERVER_ERROR_MESSAGE, VERIFICATION_ERROR_PREFIX};

/// Normalized outcome returned to the caller. Serializes as either
/// `{"isValid": true, "data": {...}}` or `{"isValid": false, "error": "..."}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationResult {
    pub is_valid: bool,
    /// Raw verifyReceipt response body, present when valid.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl VerificationResult {
    pub fn valid(data: serde_json::Value) -> Self {
        Self {
            is_valid: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn invalid(error: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            data: None,
            error: Some(error.into()),
        }
    }

    pub(crate) fn server_error() -> Self {
        Self::invalid(SERVER_ERROR_MESSAGE)
    }

    pub(crate) fn verification_error(status: i64) -> Self {
        Self::invalid(format!("{VERIFICATION_ERROR_PREFIX}: {status}"))
    }
}
