use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 8081, worker_threads: Some(4) }
    }
}

/// Where the catalog is read from.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    #[default]
    File,
    Http,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    #[serde(default)]
    pub source: SourceKind,
    /// Directory holding `services.json`, `categories.json`, `providers.json`.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    /// Base URL serving `/data/*.json` when `source = "http"`.
    #[serde(default)]
    pub remote_base_url: String,
    #[serde(default = "default_override_path")]
    pub override_path: String,
    #[serde(default = "default_override_slot")]
    pub override_slot: String,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_data_dir() -> String { "public/data".into() }
fn default_override_path() -> String { "data/overrides.json".into() }
fn default_override_slot() -> String { "services_data".into() }
fn default_request_timeout() -> u64 { 10 }

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            source: SourceKind::File,
            data_dir: default_data_dir(),
            remote_base_url: String::new(),
            override_path: default_override_path(),
            override_slot: default_override_slot(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

/// Demo provider credentials guarding the dashboard routes.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    #[serde(default = "default_username")]
    pub username: String,
    #[serde(default = "default_password")]
    pub password: String,
    #[serde(default = "default_session_idle")]
    pub session_idle_secs: u64,
}

fn default_username() -> String { "provider123".into() }
fn default_password() -> String { "service2024".into() }
fn default_session_idle() -> u64 { 3600 }

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            username: default_username(),
            password: default_password(),
            session_idle_secs: default_session_idle(),
        }
    }
}

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let cfg: AppConfig = toml::from_str(&content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Load `config.toml`, or fall back to defaults plus environment overrides
    /// when the file is missing.
    pub fn load_or_env() -> Result<Self> {
        let mut cfg = match load_default() {
            Ok(cfg) => cfg,
            Err(_) => Self::from_env(),
        };
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        if let Ok(host) = std::env::var("SERVER_HOST") {
            cfg.server.host = host;
        }
        if let Some(port) = std::env::var("SERVER_PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
            cfg.server.port = port;
        }
        cfg.server.worker_threads = std::env::var("TOKIO_WORKER_THREADS")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .or(cfg.server.worker_threads);
        cfg
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.catalog.normalize_from_env();
        self.catalog.validate()?;
        self.auth.validate()?;
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
        match self.worker_threads {
            Some(0) | None => self.worker_threads = Some(4),
            Some(_) => {}
        }
        Ok(())
    }
}

impl CatalogConfig {
    pub fn normalize_from_env(&mut self) {
        if let Ok(dir) = std::env::var("CATALOG_DATA_DIR") {
            if !dir.trim().is_empty() {
                self.data_dir = dir;
            }
        }
        if self.remote_base_url.trim().is_empty() {
            if let Ok(url) = std::env::var("CATALOG_REMOTE_URL") {
                self.remote_base_url = url;
            }
        }
        self.remote_base_url = self.remote_base_url.trim_end_matches('/').to_string();
    }

    pub fn validate(&self) -> Result<()> {
        if self.data_dir.trim().is_empty() {
            return Err(anyhow!("catalog.data_dir is empty"));
        }
        if self.override_slot.trim().is_empty() {
            return Err(anyhow!("catalog.override_slot is empty"));
        }
        if self.source == SourceKind::Http {
            let lower = self.remote_base_url.to_lowercase();
            if !(lower.starts_with("http://") || lower.starts_with("https://")) {
                return Err(anyhow!(
                    "catalog.remote_base_url must start with http(s) when source = \"http\"; set it in config.toml or CATALOG_REMOTE_URL"
                ));
            }
        }
        if self.request_timeout_secs == 0 {
            return Err(anyhow!("catalog.request_timeout_secs must be a positive number of seconds"));
        }
        Ok(())
    }
}

impl AuthConfig {
    pub fn validate(&self) -> Result<()> {
        if self.username.trim().is_empty() || self.password.is_empty() {
            return Err(anyhow!("auth.username and auth.password must be set"));
        }
        if self.session_idle_secs == 0 {
            return Err(anyhow!("auth.session_idle_secs must be >= 1"));
        }
        Ok(())
    }
}
