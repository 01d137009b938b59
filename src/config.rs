use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::{
    constants::{
        CONFIG_PATH_ENV_VAR, DEFAULT_CONFIG_PATH, VERIFY_RECEIPT_PRODUCTION_URL,
        VERIFY_RECEIPT_SANDBOX_URL,
    },
    errors::ReceiptVerifierError,
};

/// Static configuration read from a local JSON file, e.g.:
///
/// ```json
/// { "appStoreConnectApiKey": "0123456789abcdef" }
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptVerifierConfig {
    /// App-specific shared secret, required for receipts containing
    /// auto-renewable subscriptions.
    pub app_store_connect_api_key: String,
    #[serde(default = "default_production_url")]
    pub production_url: String,
    #[serde(default = "default_sandbox_url")]
    pub sandbox_url: String,
    /// Only return the latest renewal transaction for each subscription.
    #[serde(default)]
    pub exclude_old_transactions: bool,
}

fn default_production_url() -> String {
    VERIFY_RECEIPT_PRODUCTION_URL.to_owned()
}

fn default_sandbox_url() -> String {
    VERIFY_RECEIPT_SANDBOX_URL.to_owned()
}

impl ReceiptVerifierConfig {
    /// Config pointing at Apple's endpoints.
    pub fn new(app_store_connect_api_key: impl Into<String>) -> Self {
        Self {
            app_store_connect_api_key: app_store_connect_api_key.into(),
            production_url: default_production_url(),
            sandbox_url: default_sandbox_url(),
            exclude_old_transactions: false,
        }
    }

    pub fn with_endpoints(
        mut self,
        production_url: impl Into<String>,
        sandbox_url: impl Into<String>,
    ) -> Self {
        self.production_url = production_url.into();
        self.sandbox_url = sandbox_url.into();
        self
    }

    pub fn from_json(path: &Path, contents: &str) -> Result<Self, ReceiptVerifierError> {
        serde_json::from_str(contents).map_err(|source| ReceiptVerifierError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub async fn load(path: &Path) -> Result<Self, ReceiptVerifierError> {
        let contents = tokio::fs::read_to_string(path).await.map_err(|source| {
            ReceiptVerifierError::ConfigRead {
                path: path.to_path_buf(),
                source,
            }
        })?;
        Self::from_json(path, &contents)
    }
}

/// Where to find the config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Path(PathBuf),
    /// `RECEIPT_VERIFIER_CONFIG` if set, otherwise `assets/config.json`.
    ///
    /// The fallback is relative to the process working directory, not to the
    /// binary. Hosts that start from elsewhere should set the variable.
    Default,
}

impl ConfigSource {
    pub fn resolve(&self) -> PathBuf {
        match self {
            ConfigSource::Path(path) => path.clone(),
            ConfigSource::Default => std::env::var_os(CONFIG_PATH_ENV_VAR)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH)),
        }
    }

    pub async fn load(&self) -> Result<ReceiptVerifierConfig, ReceiptVerifierError> {
        ReceiptVerifierConfig::load(&self.resolve()).await
    }
}

impl From<PathBuf> for ConfigSource {
    fn from(path: PathBuf) -> Self {
        ConfigSource::Path(path)
    }
}

impl From<&Path> for ConfigSource {
    fn from(path: &Path) -> Self {
        ConfigSource::Path(path.to_path_buf())
    }
}

impl From<&str> for ConfigSource {
    fn from(path: &str) -> Self {
        ConfigSource::Path(PathBuf::from(path))
    }
}
