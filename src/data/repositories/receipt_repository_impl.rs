use async_trait::async_trait;

use crate::{
    config::ReceiptVerifierConfig,
    constants::{STATUS_SANDBOX_RECEIPT_IN_PRODUCTION, STATUS_VALID},
    data::{
        datasources::verify_receipt_datasource::{
            VerifyReceiptDatasource, VerifyReceiptDatasourceImpl,
        },
        models::verify_receipt::common::ReceiptStatus,
    },
    domain::{
        entities::verification_result::VerificationResult,
        repositories::receipt_repository::ReceiptRepository,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Endpoint {
    Production,
    Sandbox,
}

/// Outcome of a single verifyReceipt callout.
#[derive(Debug)]
enum Attempt {
    Done(VerificationResult),
    RetryInSandbox,
}

pub struct ReceiptRepositoryImpl<D: VerifyReceiptDatasource> {
    verify_receipt_datasource: D,
    production_url: String,
    sandbox_url: String,
}

#[async_trait]
impl<D: VerifyReceiptDatasource> ReceiptRepository for ReceiptRepositoryImpl<D> {
    async fn verify(&self, receipt_data: &str) -> VerificationResult {
        // Apple asks for production to be tried first, and for sandbox only
        // when production rejects the receipt as a sandbox receipt.
        match self.attempt(Endpoint::Production, receipt_data).await {
            Attempt::Done(result) => result,
            Attempt::RetryInSandbox => {
                tracing::info!("sandbox receipt sent to production, retrying against sandbox");
                match self.attempt(Endpoint::Sandbox, receipt_data).await {
                    Attempt::Done(result) => result,
                    // Only reachable if sandbox itself answers 21007; no
                    // further fallback exists.
                    Attempt::RetryInSandbox => VerificationResult::verification_error(
                        STATUS_SANDBOX_RECEIPT_IN_PRODUCTION,
                    ),
                }
            }
        }
    }
}

impl<D: VerifyReceiptDatasource> ReceiptRepositoryImpl<D> {
    fn url(&self, endpoint: Endpoint) -> &str {
        match endpoint {
            Endpoint::Production => &self.production_url,
            Endpoint::Sandbox => &self.sandbox_url,
        }
    }

    async fn attempt(&self, endpoint: Endpoint, receipt_data: &str) -> Attempt {
        let url = self.url(endpoint);
        let response = match self
            .verify_receipt_datasource
            .verify_receipt(url, receipt_data)
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(?endpoint, error = %e, "receipt verification callout failed");
                return Attempt::Done(VerificationResult::server_error());
            }
        };

        let status = response.model.status;
        match status {
            STATUS_VALID => {
                tracing::debug!(
                    ?endpoint,
                    environment = ?response.model.environment,
                    "receipt is valid"
                );
                Attempt::Done(VerificationResult::valid(response.body))
            }
            STATUS_SANDBOX_RECEIPT_IN_PRODUCTION if endpoint == Endpoint::Production => {
                Attempt::RetryInSandbox
            }
            _ => {
                tracing::warn!(
                    ?endpoint,
                    status,
                    reason = ?ReceiptStatus::from(status),
                    is_retryable = ?response.model.is_retryable,
                    "receipt rejected"
                );
                Attempt::Done(VerificationResult::verification_error(status))
            }
        }
    }
}

impl<D: VerifyReceiptDatasource> ReceiptRepositoryImpl<D> {
    pub(crate) fn with_datasource(
        verify_receipt_datasource: D,
        production_url: impl Into<String>,
        sandbox_url: impl Into<String>,
    ) -> Self {
        Self {
            verify_receipt_datasource,
            production_url: production_url.into(),
            sandbox_url: sandbox_url.into(),
        }
    }
}

impl ReceiptRepositoryImpl<VerifyReceiptDatasourceImpl> {
    pub(crate) fn new(config: ReceiptVerifierConfig) -> Self {
        Self::with_datasource(
            VerifyReceiptDatasourceImpl::new(
                config.app_store_connect_api_key,
                config.exclude_old_transactions,
            ),
            config.production_url,
            config.sandbox_url,
        )
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use serde_json::json;

    use super::*;
    use crate::{
        data::models::verify_receipt::response_body_model::{
            ResponseBodyModel, VerifyReceiptResponse,
        },
        errors::ReceiptVerifierError,
    };

    const PRODUCTION: &str = "https://production.test/verifyReceipt";
    const SANDBOX: &str = "https://sandbox.test/verifyReceipt";

    /// Answers from a fixed table keyed by URL and records every call.
    struct MockDatasource {
        production: Option<serde_json::Value>,
        sandbox: Option<serde_json::Value>,
        calls: Mutex<Vec<(String, String)>>,
    }

    impl MockDatasource {
        fn new(production: Option<serde_json::Value>, sandbox: Option<serde_json::Value>) -> Self {
            Self {
                production,
                sandbox,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn urls_called(&self) -> Vec<String> {
            self.calls
                .lock()
                .unwrap()
                .iter()
                .map(|(url, _)| url.clone())
                .collect()
        }
    }

    #[async_trait]
    impl VerifyReceiptDatasource for MockDatasource {
        async fn verify_receipt(
            &self,
            url: &str,
            receipt_data: &str,
        ) -> Result<VerifyReceiptResponse, ReceiptVerifierError> {
            self.calls
                .lock()
                .unwrap()
                .push((url.to_owned(), receipt_data.to_owned()));
            let body = if url == PRODUCTION {
                &self.production
            } else {
                &self.sandbox
            };
            match body {
                Some(body) => Ok(VerifyReceiptResponse {
                    model: serde_json::from_value::<ResponseBodyModel>(body.clone()).unwrap(),
                    body: body.clone(),
                }),
                None => Err(ReceiptVerifierError::callout(
                    "verifyReceipt",
                    url,
                    "connection refused",
                )),
            }
        }
    }

    fn repository(datasource: MockDatasource) -> ReceiptRepositoryImpl<MockDatasource> {
        ReceiptRepositoryImpl::with_datasource(datasource, PRODUCTION, SANDBOX)
    }

    #[tokio::test]
    async fn valid_in_production_skips_sandbox() {
        let body = json!({"status": 0, "environment": "Production", "receipt": {}});
        let repo = repository(MockDatasource::new(Some(body.clone()), None));

        let result = repo.verify("R1").await;

        assert_eq!(result, VerificationResult::valid(body));
        assert_eq!(repo.verify_receipt_datasource.urls_called(), vec![PRODUCTION]);
    }

    #[tokio::test]
    async fn sandbox_receipt_falls_back_once_with_same_receipt() {
        let sandbox_body = json!({"status": 0, "environment": "Sandbox"});
        let repo = repository(MockDatasource::new(
            Some(json!({"status": 21007})),
            Some(sandbox_body.clone()),
        ));

        let result = repo.verify("R2").await;

        assert_eq!(result, VerificationResult::valid(sandbox_body));
        let calls = repo.verify_receipt_datasource.calls.lock().unwrap().clone();
        assert_eq!(
            calls,
            vec![
                (PRODUCTION.to_owned(), "R2".to_owned()),
                (SANDBOX.to_owned(), "R2".to_owned()),
            ]
        );
    }

    #[tokio::test]
    async fn sandbox_rejection_is_final() {
        let repo = repository(MockDatasource::new(
            Some(json!({"status": 21007})),
            Some(json!({"status": 21003})),
        ));
        assert_eq!(
            repo.verify("R2").await,
            VerificationResult::invalid("verification error: 21003")
        );
    }

    #[tokio::test]
    async fn second_sandbox_status_is_terminal_error() {
        let repo = repository(MockDatasource::new(
            Some(json!({"status": 21007})),
            Some(json!({"status": 21007})),
        ));
        assert_eq!(
            repo.verify("R2").await,
            VerificationResult::invalid("verification error: 21007")
        );
        assert_eq!(repo.verify_receipt_datasource.urls_called().len(), 2);
    }

    #[tokio::test]
    async fn other_production_status_skips_sandbox() {
        let repo = repository(MockDatasource::new(
            Some(json!({"status": 21002})),
            Some(json!({"status": 0})),
        ));

        let result = repo.verify("R3").await;

        assert_eq!(result, VerificationResult::invalid("verification error: 21002"));
        assert_eq!(repo.verify_receipt_datasource.urls_called(), vec![PRODUCTION]);
    }

    #[tokio::test]
    async fn production_callout_failure_is_terminal() {
        let repo = repository(MockDatasource::new(None, Some(json!({"status": 0}))));

        let result = repo.verify("R4").await;

        assert_eq!(result, VerificationResult::invalid("server error"));
        assert_eq!(repo.verify_receipt_datasource.urls_called(), vec![PRODUCTION]);
    }

    #[tokio::test]
    async fn sandbox_callout_failure_is_server_error() {
        let repo = repository(MockDatasource::new(Some(json!({"status": 21007})), None));
        assert_eq!(
            repo.verify("R2").await,
            VerificationResult::invalid("server error")
        );
    }

    #[tokio::test]
    async fn repeated_calls_give_identical_results() {
        let repo = repository(MockDatasource::new(
            Some(json!({"status": 21007})),
            Some(json!({"status": 0, "receipt": {"bundle_id": "io.fractic.app"}})),
        ));
        let first = repo.verify("R5").await;
        let second = repo.verify("R5").await;
        assert_eq!(first, second);
    }
}
