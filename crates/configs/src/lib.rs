use std::path::{Component, Path, PathBuf};

use anyhow::anyhow;
use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port(), worker_threads: Some(4) }
    }
}

/// Locations of the backing documents, one per collection.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_users_path")]
    pub users_path: PathBuf,
    #[serde(default = "default_movies_path")]
    pub movies_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { users_path: default_users_path(), movies_path: default_movies_path() }
    }
}

fn default_host() -> String { "127.0.0.1".into() }
fn default_port() -> u16 { 8000 }
fn default_users_path() -> PathBuf { PathBuf::from("data/users.json") }
fn default_movies_path() -> PathBuf { PathBuf::from("data/movies.json") }

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Load `config.toml` (or `CONFIG_PATH`), falling back to defaults when the
    /// file is absent, then apply env overrides and validate.
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = match load_default() {
            Ok(cfg) => cfg,
            Err(e) if is_not_found(&e) => AppConfig::default(),
            Err(e) => return Err(e),
        };
        cfg.apply_env(|key| std::env::var(key).ok());
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Overlay values from the environment. `lookup` is injected so tests do
    /// not have to mutate the process environment.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("SERVER_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("SERVER_PORT").and_then(|p| p.parse::<u16>().ok()) {
            self.server.port = port;
        }
        if let Some(w) = lookup("TOKIO_WORKER_THREADS").and_then(|v| v.parse::<usize>().ok()) {
            self.server.worker_threads = Some(w);
        }
        if let Some(p) = lookup("USERS_PATH") {
            self.storage.users_path = PathBuf::from(p);
        }
        if let Some(p) = lookup("MOVIES_PATH") {
            self.storage.movies_path = PathBuf::from(p);
        }
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.storage.validate()?;
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn is_not_found(e: &anyhow::Error) -> bool {
    e.downcast_ref::<std::io::Error>()
        .map(|io| io.kind() == std::io::ErrorKind::NotFound)
        .unwrap_or(false)
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = default_host();
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

impl StorageConfig {
    pub fn validate(&self) -> Result<()> {
        if self.users_path.as_os_str().is_empty() {
            return Err(anyhow!("storage.users_path is empty"));
        }
        if self.movies_path.as_os_str().is_empty() {
            return Err(anyhow!("storage.movies_path is empty"));
        }
        Ok(())
    }

    /// Whether both collections resolve to the same file. Existing files are
    /// compared by canonical path, missing ones after dropping `.` segments.
    pub fn shares_backing_file(&self) -> bool {
        resolve(&self.users_path) == resolve(&self.movies_path)
    }
}

fn resolve(path: &Path) -> PathBuf {
    if let Ok(real) = std::fs::canonicalize(path) {
        return real;
    }
    let absolute = match std::env::current_dir() {
        Ok(cwd) if path.is_relative() => cwd.join(path),
        _ => path.to_path_buf(),
    };
    absolute.components().filter(|c| !matches!(c, Component::CurDir)).collect()
}
