use serde::Serialize;

/// Body of a verifyReceipt request:
/// https://developer.apple.com/documentation/appstorereceipts/requestbody
#[derive(Debug, Serialize)]
pub(crate) struct RequestBodyModel<'a> {
    /// The Base64-encoded receipt data.
    #[serde(rename = "receipt-data")]
    pub(crate) receipt_data: &'a str,
    /// Your app's shared secret, which is a hexadecimal string.
    pub(crate) password: &'a str,
    /// Set this value to true for the response to include only the latest
    /// renewal transaction for any subscriptions. Only sent when set.
    #[serde(
        rename = "exclude-old-transactions",
        skip_serializing_if = "std::ops::Not::not"
    )]
    pub(crate) exclude_old_transactions: bool,
}
