use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

pub const DEFAULT_PORT: u16 = 8710;
pub const DEFAULT_BIND: &str = "127.0.0.1";

/// Top-level config (townbell.toml + TOWNBELL_* env overrides).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TownbellConfig {
    #[serde(default)]
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub push: PushConfig,
}

impl Default for TownbellConfig {
    fn default() -> Self {
        Self {
            gateway: GatewayConfig::default(),
            store: StoreConfig::default(),
            push: PushConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default)]
    pub trigger: TriggerConfig,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            bind: DEFAULT_BIND.to_string(),
            trigger: TriggerConfig::default(),
        }
    }
}

/// How incoming record-creation triggers are authenticated.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TriggerConfig {
    #[serde(default)]
    pub auth_mode: TriggerAuthMode,
    /// HMAC signing secret or bearer token value, depending on `auth_mode`.
    pub secret: Option<String>,
}

/// Authentication mode for the trigger ingress route.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum TriggerAuthMode {
    /// HMAC-SHA256 over the raw request body (GitHub-style X-Hub-Signature-256).
    HmacSha256,
    /// Static bearer token in the Authorization header.
    #[default]
    BearerToken,
    /// No authentication — use only for internal/trusted networks.
    None,
}

/// Record store (Firestore REST) connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_store_base_url")]
    pub base_url: String,
    /// GCP project that owns the businesses/users collections.
    #[serde(default)]
    pub project_id: String,
    #[serde(default = "default_database_id")]
    pub database_id: String,
    /// OAuth bearer token for the REST API. When absent, requests are sent
    /// unauthenticated (emulator / open-rules deployments).
    pub auth_token: Option<String>,
    /// Page size for follower sub-collection scans.
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            base_url: default_store_base_url(),
            project_id: String::new(),
            database_id: default_database_id(),
            auth_token: None,
            page_size: default_page_size(),
        }
    }
}

/// Push delivery transport (FCM) settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushConfig {
    #[serde(default = "default_push_endpoint")]
    pub endpoint: String,
    /// FCM server key, sent as `Authorization: key=<server_key>`.
    #[serde(default)]
    pub server_key: String,
}

impl Default for PushConfig {
    fn default() -> Self {
        Self {
            endpoint: default_push_endpoint(),
            server_key: String::new(),
        }
    }
}

fn default_port() -> u16 {
    DEFAULT_PORT
}
fn default_bind() -> String {
    DEFAULT_BIND.to_string()
}
fn default_store_base_url() -> String {
    "https://firestore.googleapis.com/v1".to_string()
}
fn default_database_id() -> String {
    "(default)".to_string()
}
fn default_page_size() -> u32 {
    300
}
fn default_push_endpoint() -> String {
    "https://fcm.googleapis.com/fcm/send".to_string()
}

impl TownbellConfig {
    /// Load config from a TOML file with TOWNBELL_* env var overrides.
    ///
    /// Checks in order:
    ///   1. Explicit path argument
    ///   2. ~/.townbell/townbell.toml
    pub fn load(config_path: Option<&str>) -> crate::error::Result<Self> {
        let path = config_path
            .map(String::from)
            .unwrap_or_else(default_config_path);

        let config: TownbellConfig = Figment::new()
            .merge(Toml::file(&path))
            .merge(Env::prefixed("TOWNBELL_").split("_"))
            .extract()
            .map_err(|e| crate::error::TownbellError::Config(e.to_string()))?;

        Ok(config)
    }
}

fn default_config_path() -> String {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    format!("{}/.townbell/townbell.toml", home)
}
