#![allow(dead_code)]

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub enum Environment {
    /// The receipt was generated in the sandbox environment.
    Sandbox,
    /// The receipt was generated in the production environment.
    Production,

    #[serde(untagged)]
    Unknown(String),
}

/// Status codes returned by verifyReceipt:
/// https://developer.apple.com/documentation/appstorereceipts/status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ReceiptStatus {
    Valid,
    /// The request to the App Store was not made using the HTTP POST request
    /// method.
    NotPost,
    /// The data in the receipt-data property was malformed or the service
    /// experienced a temporary issue.
    MalformedReceiptData,
    /// The receipt could not be authenticated.
    NotAuthenticated,
    /// The shared secret you provided does not match the shared secret on
    /// file for your account.
    SharedSecretMismatch,
    /// The receipt server was temporarily unable to provide the receipt.
    ServerUnavailable,
    /// This receipt is valid but the subscription has expired.
    SubscriptionExpired,
    /// This receipt is from the test environment, but it was sent to the
    /// production environment for verification.
    SandboxReceiptInProduction,
    /// This receipt is from the production environment, but it was sent to
    /// the test environment for verification.
    ProductionReceiptInSandbox,
    /// This receipt could not be authorized.
    NotAuthorized,
    /// Internal data access error. Try again later.
    InternalDataAccessError(i64),
    Unknown(i64),
}

impl From<i64> for ReceiptStatus {
    fn from(code: i64) -> Self {
        match code {
            0 => ReceiptStatus::Valid,
            21000 => ReceiptStatus::NotPost,
            21002 => ReceiptStatus::MalformedReceiptData,
            21003 => ReceiptStatus::NotAuthenticated,
            21004 => ReceiptStatus::SharedSecretMismatch,
            21005 => ReceiptStatus::ServerUnavailable,
            21006 => ReceiptStatus::SubscriptionExpired,
            21007 => ReceiptStatus::SandboxReceiptInProduction,
            21008 => ReceiptStatus::ProductionReceiptInSandbox,
            21010 => ReceiptStatus::NotAuthorized,
            21100..=21199 => ReceiptStatus::InternalDataAccessError(code),
            other => ReceiptStatus::Unknown(other),
        }
    }
}
