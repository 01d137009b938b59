use crate::{
    config::{ConfigSource, ReceiptVerifierConfig},
    data::{
        datasources::verify_receipt_datasource::VerifyReceiptDatasourceImpl,
        repositories::receipt_repository_impl::ReceiptRepositoryImpl,
    },
    domain::{
        entities::{
            verification_request::VerificationRequest, verification_result::VerificationResult,
        },
        repositories::receipt_repository::ReceiptRepository,
    },
    errors::ReceiptVerifierError,
};

/// The verifier backed by Apple's verifyReceipt endpoints.
pub type DefaultReceiptVerifier =
    ReceiptVerifierUtil<ReceiptRepositoryImpl<VerifyReceiptDatasourceImpl>>;

pub struct ReceiptVerifierUtil<R: ReceiptRepository> {
    receipt_repository: R,
}

impl<R: ReceiptRepository> ReceiptVerifierUtil<R> {
    /// Never fails: callout problems come back as `isValid: false`.
    pub async fn verify(&self, receipt_data: &str) -> VerificationResult {
        self.receipt_repository.verify(receipt_data).await
    }
}

impl DefaultReceiptVerifier {
    pub fn new(config: ReceiptVerifierConfig) -> Self {
        Self {
            receipt_repository: ReceiptRepositoryImpl::new(config),
        }
    }
}

/// Callable entry point. Reads the config file on every invocation; config
/// errors are returned to the host rather than folded into the result.
pub async fn verify_purchase(
    config_source: impl Into<ConfigSource>,
    request: VerificationRequest,
) -> Result<VerificationResult, ReceiptVerifierError> {
    let config_source: ConfigSource = config_source.into();
    let config = config_source.load().await?;
    Ok(DefaultReceiptVerifier::new(config)
        .verify(&request.receipt_data)
        .await)
}

/// Same as `verify_purchase`, taking and returning the raw callable JSON.
pub async fn verify_purchase_json(
    config_source: impl Into<ConfigSource>,
    payload: serde_json::Value,
) -> Result<serde_json::Value, ReceiptVerifierError> {
    let config_source: ConfigSource = config_source.into();
    let config = config_source.load().await?;
    let request = VerificationRequest::from_json(payload)?;
    let result = DefaultReceiptVerifier::new(config)
        .verify(&request.receipt_data)
        .await;
    serde_json::to_value(result).map_err(ReceiptVerifierError::ResultSerialize)
}
