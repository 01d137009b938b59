use async_trait::async_trait;

use crate::domain::entities::verification_result::VerificationResult;

#[async_trait]
pub trait ReceiptRepository: Send + Sync {
    /// Verifies the receipt against production, falling back to sandbox when
    /// Apple reports a sandbox receipt. Callout failures are folded into the
    /// returned result rather than returned as errors.
    async fn verify(&self, receipt_data: &str) -> VerificationResult;
}
