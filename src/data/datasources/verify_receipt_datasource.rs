use async_trait::async_trait;
use once_cell::sync::Lazy;
use serde::Deserialize;

use crate::{
    data::models::verify_receipt::{
        request_body_model::RequestBodyModel,
        response_body_model::{ResponseBodyModel, VerifyReceiptResponse},
    },
    errors::ReceiptVerifierError,
};

static HTTP_CLIENT: Lazy<reqwest::Client> = Lazy::new(reqwest::Client::new);

#[async_trait]
pub trait VerifyReceiptDatasource: Send + Sync {
    /// verifyReceipt:
    /// https://developer.apple.com/documentation/appstorereceipts/verifyreceipt
    ///
    /// url:
    ///   The production or sandbox endpoint to call.
    /// receipt_data:
    ///   The Base64-encoded receipt data, passed through as-is.
    async fn verify_receipt(
        &self,
        url: &str,
        receipt_data: &str,
    ) -> Result<VerifyReceiptResponse, ReceiptVerifierError>;
}

pub struct VerifyReceiptDatasourceImpl {
    shared_secret: String,
    exclude_old_transactions: bool,
}

#[async_trait]
impl VerifyReceiptDatasource for VerifyReceiptDatasourceImpl {
    async fn verify_receipt(
        &self,
        url: &str,
        receipt_data: &str,
    ) -> Result<VerifyReceiptResponse, ReceiptVerifierError> {
        let body = RequestBodyModel {
            receipt_data,
            password: &self.shared_secret,
            exclude_old_transactions: self.exclude_old_transactions,
        };
        self.callout(url, &body, "verifyReceipt").await
    }
}

impl VerifyReceiptDatasourceImpl {
    pub(crate) fn new(shared_secret: String, exclude_old_transactions: bool) -> Self {
        Self {
            shared_secret,
            exclude_old_transactions,
        }
    }

    async fn callout(
        &self,
        url: &str,
        body: &RequestBodyModel<'_>,
        function_name: &'static str,
    ) -> Result<VerifyReceiptResponse, ReceiptVerifierError> {
        tracing::debug!(function_name, url, "sending callout");
        let response = HTTP_CLIENT
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                ReceiptVerifierError::callout(
                    function_name,
                    url,
                    format!("callout failed to send; {e:?}"),
                )
            })?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(ReceiptVerifierError::callout(
                function_name,
                url,
                format!(
                    "callout returned with {status} status code; {}",
                    response.text().await.unwrap_or_default()
                ),
            ));
        }

        let body: serde_json::Value = response.json().await.map_err(|e| {
            ReceiptVerifierError::callout(
                function_name,
                url,
                format!("failed to parse callout response; {e:?}"),
            )
        })?;
        let model = ResponseBodyModel::deserialize(&body).map_err(|e| {
            ReceiptVerifierError::callout(
                function_name,
                url,
                format!("callout response has no valid status; {e}"),
            )
        })?;
        Ok(VerifyReceiptResponse { model, body })
    }
}
