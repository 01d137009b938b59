/// Apple's legacy receipt validation endpoints:
/// https://developer.apple.com/documentation/appstorereceipts/verifyreceipt
pub const VERIFY_RECEIPT_PRODUCTION_URL: &str = "https://buy.itunes.apple.com/verifyReceipt";
pub const VERIFY_RECEIPT_SANDBOX_URL: &str = "https://sandbox.itunes.apple.com/verifyReceipt";

pub const DEFAULT_CONFIG_PATH: &str = "assets/config.json";
pub const CONFIG_PATH_ENV_VAR: &str = "RECEIPT_VERIFIER_CONFIG";

pub(crate) const STATUS_VALID: i64 = 0;
pub(crate) const STATUS_SANDBOX_RECEIPT_IN_PRODUCTION: i64 = 21007;

pub(crate) const SERVER_ERROR_MESSAGE: &str = "server error";
pub(crate) const VERIFICATION_ERROR_PREFIX: &str = "verification error";
