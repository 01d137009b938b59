use serde::{Deserialize, Deserializer};

use super::common::Environment;

/// The fields of a verifyReceipt response this crate inspects:
/// https://developer.apple.com/documentation/appstorereceipts/responsebody
///
/// The full body is kept alongside as raw JSON and handed back to the caller
/// untouched, so receipt contents are not modelled here.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ResponseBodyModel {
    /// Either 0 if the receipt is valid, or a status code if there is an
    /// error.
    pub(crate) status: i64,
    /// The environment for which the receipt was generated. Only logged, so
    /// unexpected values are dropped instead of failing the response.
    #[serde(default, deserialize_with = "deserialize_environment")]
    pub(crate) environment: Option<Environment>,
    /// An indicator that an error occurred during the request. A value of 1
    /// indicates a temporary issue; retry validation for this receipt at a
    /// later time.
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub(crate) is_retryable: Option<bool>,
}

/// Apple documents the flag as a boolean but has been seen sending 0/1.
fn deserialize_flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<bool>, D::Error> {
    Ok(match Option::<serde_json::Value>::deserialize(deserializer)? {
        Some(serde_json::Value::Bool(flag)) => Some(flag),
        Some(serde_json::Value::Number(n)) => Some(n.as_i64() != Some(0)),
        _ => None,
    })
}

fn deserialize_environment<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Environment>, D::Error> {
    Ok(Option::<serde_json::Value>::deserialize(deserializer)?
        .and_then(|value| Environment::deserialize(value).ok()))
}

/// A response that made it through transport, with its raw body.
#[derive(Debug)]
pub struct VerifyReceiptResponse {
    pub(crate) model: ResponseBodyModel,
    pub(crate) body: serde_json::Value,
}
