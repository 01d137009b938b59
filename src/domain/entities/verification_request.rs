use serde::{Deserialize, Serialize};

use crate::errors::ReceiptVerifierError;

/// Payload of a verification call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationRequest {
    /// Base64-encoded App Store receipt. Not validated here; malformed data is
    /// rejected by Apple.
    pub receipt_data: String,
}

impl VerificationRequest {
    pub fn new(receipt_data: impl Into<String>) -> Self {
        Self {
            receipt_data: receipt_data.into(),
        }
    }

    pub fn from_json(payload: serde_json::Value) -> Result<Self, ReceiptVerifierError> {
        serde_json::from_value(payload).map_err(ReceiptVerifierError::InvalidRequest)
    }
}
