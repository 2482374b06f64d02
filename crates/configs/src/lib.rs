use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;

pub const DEFAULT_CART_KEY: &str = "@goMarketPlace/cart";

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 8081 }
    }
}

/// Remote catalog API.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default)]
    pub base_url: String,
    #[serde(default = "default_products_path")]
    pub products_path: String,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            products_path: default_products_path(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

/// Device-local key-value storage.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub path: String,
    #[serde(default = "default_cart_key")]
    pub cart_key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { path: String::new(), cart_key: default_cart_key() }
    }
}

fn default_products_path() -> String { "/products".into() }
fn default_request_timeout() -> u64 { 10 }
fn default_cart_key() -> String { DEFAULT_CART_KEY.into() }
fn default_base_url() -> String { "http://localhost:3333".into() }
fn default_storage_path() -> String { "data/storage.json".into() }

/// Load `CONFIG_PATH` (default `config.toml`); `Ok(None)` when the file does not exist.
pub fn load_default() -> Result<Option<AppConfig>> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    if !std::path::Path::new(&path).exists() {
        return Ok(None);
    }
    load_from_file(&path).map(Some)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    load_from_str(&content)
}

pub fn load_from_str(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Load `CONFIG_PATH`, falling back to defaults plus environment when the file is absent.
    /// A present but unparsable file is an error.
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = match load_default()? {
            Some(cfg) => cfg,
            None => Self::from_env(),
        };
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Configuration assembled from `SERVER_HOST`/`SERVER_PORT` and defaults.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        if let Ok(host) = std::env::var("SERVER_HOST") {
            cfg.server.host = host;
        }
        if let Some(port) = std::env::var("SERVER_PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
            cfg.server.port = port;
        }
        cfg
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.api.normalize_from_env();
        self.api.validate()?;
        self.storage.normalize_from_env();
        self.storage.validate()?;
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        Ok(())
    }
}

impl ApiConfig {
    pub fn normalize_from_env(&mut self) {
        if self.base_url.trim().is_empty() {
            self.base_url = std::env::var("API_BASE_URL").unwrap_or_else(|_| default_base_url());
        }
        self.base_url = self.base_url.trim_end_matches('/').to_string();
        if !self.products_path.starts_with('/') {
            self.products_path = format!("/{}", self.products_path);
        }
    }

    pub fn validate(&self) -> Result<()> {
        let lower = self.base_url.to_lowercase();
        if !(lower.starts_with("http://") || lower.starts_with("https://")) {
            return Err(anyhow!("api.base_url must start with http:// or https://"));
        }
        if self.request_timeout_secs == 0 {
            return Err(anyhow!("api.request_timeout_secs must be a positive number of seconds"));
        }
        Ok(())
    }
}

impl StorageConfig {
    pub fn normalize_from_env(&mut self) {
        if self.path.trim().is_empty() {
            self.path = std::env::var("STORAGE_PATH").unwrap_or_else(|_| default_storage_path());
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.cart_key.trim().is_empty() {
            return Err(anyhow!("storage.cart_key is empty"));
        }
        Ok(())
    }
}
