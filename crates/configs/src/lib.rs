use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
    /// Require `X-Correlation-ID` on every non-exempt request.
    #[serde(default)]
    pub validate_headers: bool,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            worker_threads: Some(4),
            validate_headers: false,
            request_timeout_secs: default_request_timeout(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
    #[serde(default = "default_max_lifetime")]
    pub max_lifetime_secs: u64,
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
    #[serde(default)]
    pub sqlx_logging: bool,
    #[serde(default = "default_auto_migrate")]
    pub auto_migrate: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_secs: default_connect_timeout(),
            idle_timeout_secs: default_idle_timeout(),
            max_lifetime_secs: default_max_lifetime(),
            acquire_timeout_secs: default_acquire_timeout(),
            sqlx_logging: false,
            auto_migrate: default_auto_migrate(),
        }
    }
}

fn default_host() -> String { "0.0.0.0".into() }
fn default_port() -> u16 { 5000 }
fn default_request_timeout() -> u64 { 30 }
fn default_max_connections() -> u32 { 10 }
fn default_min_connections() -> u32 { 2 }
fn default_connect_timeout() -> u64 { 30 }
fn default_idle_timeout() -> u64 { 600 }
fn default_max_lifetime() -> u64 { 3600 }
fn default_acquire_timeout() -> u64 { 30 }
fn default_auto_migrate() -> bool { true }

fn config_path() -> String {
    std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string())
}

pub fn load_default() -> Result<AppConfig> {
    load_from_file(&config_path())
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    load_from_str(&content)
}

pub fn load_from_str(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

fn is_missing_file(err: &anyhow::Error) -> bool {
    err.downcast_ref::<std::io::Error>()
        .map(|e| e.kind() == std::io::ErrorKind::NotFound)
        .unwrap_or(false)
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl AppConfig {
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default()?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Config file when present, otherwise the process environment.
    pub fn load_or_env() -> Result<Self> {
        let mut cfg = Self::from_file_or_env(&config_path())?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Only a missing file falls back to the environment; unreadable or
    /// malformed files are errors.
    pub fn from_file_or_env(path: &str) -> Result<Self> {
        match load_from_file(path) {
            Ok(cfg) => Ok(cfg),
            Err(e) if is_missing_file(&e) => Ok(Self::from_env()),
            Err(e) => Err(e.context(format!("failed to load {path}"))),
        }
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; unset or unparsable keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        if let Some(host) = lookup("SERVER_HOST") {
            cfg.server.host = host;
        }
        if let Some(port) = lookup("SERVER_PORT").and_then(|p| p.parse::<u16>().ok()) {
            cfg.server.port = port;
        }
        cfg.server.worker_threads = lookup("TOKIO_WORKER_THREADS")
            .and_then(|v| v.parse::<usize>().ok())
            .or(cfg.server.worker_threads);
        if let Some(v) = lookup("VALIDATE_HEADERS").as_deref().and_then(parse_bool) {
            cfg.server.validate_headers = v;
        }
        if let Some(t) = lookup("REQUEST_TIMEOUT_SECS").and_then(|v| v.parse::<u64>().ok()) {
            cfg.server.request_timeout_secs = t;
        }
        cfg.database = DatabaseConfig::from_lookup(&lookup);
        cfg
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.database.normalize_from_env();
        self.database.validate()?;
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = default_host();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be within 1..=65535"));
        }
        match self.worker_threads {
            Some(0) | None => self.worker_threads = Some(4),
            Some(_) => {}
        }
        if self.request_timeout_secs == 0 {
            return Err(anyhow!("server.request_timeout_secs must be a positive number of seconds"));
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl DatabaseConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        if let Some(url) = lookup("DATABASE_URL") {
            cfg.url = url;
        }
        if let Some(n) = lookup("DATABASE_MAX_CONNECTIONS").and_then(|v| v.parse().ok()) {
            cfg.max_connections = n;
        }
        if let Some(n) = lookup("DATABASE_MIN_CONNECTIONS").and_then(|v| v.parse().ok()) {
            cfg.min_connections = n;
        }
        if let Some(v) = lookup("DATABASE_SQLX_LOGGING").as_deref().and_then(parse_bool) {
            cfg.sqlx_logging = v;
        }
        if let Some(v) = lookup("DATABASE_AUTO_MIGRATE").as_deref().and_then(parse_bool) {
            cfg.auto_migrate = v;
        }
        cfg
    }

    pub fn normalize_from_env(&mut self) {
        if self.url.trim().is_empty() {
            if let Ok(url) = std::env::var("DATABASE_URL") {
                self.url = url;
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(anyhow!("database.url is empty; set it in config.toml or DATABASE_URL"));
        }
        let lower = self.url.to_lowercase();
        let known = ["postgresql://", "postgres://", "sqlite:"];
        if !known.iter().any(|scheme| lower.starts_with(scheme)) {
            return Err(anyhow!(
                "database.url must start with postgres://, postgresql:// or sqlite:"
            ));
        }
        if self.min_connections == 0 {
            return Err(anyhow!("database.min_connections must be >= 1"));
        }
        if self.max_connections < self.min_connections {
            return Err(anyhow!("database.max_connections must be >= min_connections"));
        }
        if self.connect_timeout_secs == 0 || self.acquire_timeout_secs == 0 {
            return Err(anyhow!("database timeouts must be positive numbers of seconds"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_listen_on_port_5000_without_header_validation() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.server.port, 5000);
        assert!(!cfg.server.validate_headers);
        assert!(cfg.database.auto_migrate);
    }

    #[test]
    fn toml_fills_missing_fields_with_defaults() {
        let cfg = load_from_str(
            r#"
            [server]
            port = 6000

            [database]
            url = "postgres://localhost/users"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.server.port, 6000);
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.server.request_timeout_secs, 30);
        assert_eq!(cfg.database.max_connections, 10);
        assert_eq!(cfg.database.min_connections, 2);
    }

    #[test]
    fn lookup_overrides_server_and_database() {
        let cfg = AppConfig::from_lookup(lookup_from(&[
            ("SERVER_HOST", "127.0.0.1"),
            ("SERVER_PORT", "7001"),
            ("VALIDATE_HEADERS", "true"),
            ("DATABASE_URL", "sqlite::memory:"),
            ("DATABASE_AUTO_MIGRATE", "off"),
        ]));
        assert_eq!(cfg.server.bind_addr(), "127.0.0.1:7001");
        assert!(cfg.server.validate_headers);
        assert_eq!(cfg.database.url, "sqlite::memory:");
        assert!(!cfg.database.auto_migrate);
    }

    #[test]
    fn unparsable_port_keeps_default() {
        let cfg = AppConfig::from_lookup(lookup_from(&[("SERVER_PORT", "not-a-port")]));
        assert_eq!(cfg.server.port, 5000);
    }

    #[test]
    fn validate_rejects_unknown_scheme_and_bad_pool() {
        let mut db = DatabaseConfig { url: "mysql://localhost/users".into(), ..Default::default() };
        assert!(db.validate().is_err());

        db.url = "postgres://localhost/users".into();
        db.min_connections = 5;
        db.max_connections = 1;
        assert!(db.validate().is_err());

        db.max_connections = 5;
        assert!(db.validate().is_ok());
    }

    #[test]
    fn normalize_resets_zero_workers_and_rejects_zero_port() {
        let mut server = ServerConfig { worker_threads: Some(0), ..Default::default() };
        server.normalize().unwrap();
        assert_eq!(server.worker_threads, Some(4));

        server.port = 0;
        assert!(server.normalize().is_err());
    }

    fn temp_config(name: &str, content: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("{name}-{}.toml", std::process::id()));
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn missing_file_falls_back_to_environment() {
        let cfg = AppConfig::from_file_or_env("/nonexistent/dir/config.toml").unwrap();
        assert_eq!(cfg.server.request_timeout_secs, 30);
    }

    #[test]
    fn malformed_file_is_an_error_not_a_fallback() {
        let path = temp_config("users-malformed", "[server]\nport = \"five thousand\"\n");
        let result = AppConfig::from_file_or_env(path.to_str().unwrap());
        std::fs::remove_file(&path).ok();
        let err = result.unwrap_err();
        assert!(err.to_string().contains("failed to load"), "got {err:#}");
    }

    #[test]
    fn present_file_wins_over_environment() {
        let path = temp_config("users-valid", "[server]\nport = 6100\n");
        let result = AppConfig::from_file_or_env(path.to_str().unwrap());
        std::fs::remove_file(&path).ok();
        assert_eq!(result.unwrap().server.port, 6100);
    }
}
