use std::env;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tether_core::DEFAULT_PAGE_LIMIT;
use thiserror::Error;

const APP_DIR: &str = "tether";
const CONFIG_FILENAME: &str = "config.toml";

pub const DEFAULT_TITLE: &str = "Personal CRM API";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub pagination: PaginationConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    pub title: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationConfig {
    pub default_limit: u32,
    /// Upper bound applied to a requested `limit`; `None` leaves it uncapped.
    pub max_limit: Option<u32>,
}

impl PaginationConfig {
    pub fn effective_limit(&self, requested: Option<u32>) -> u32 {
        let limit = requested.unwrap_or(self.default_limit);
        match self.max_limit {
            Some(max) => limit.min(max),
            None => limit,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                bind: SocketAddr::from(([127, 0, 0, 1], 8000)),
                title: DEFAULT_TITLE.to_string(),
            },
            pagination: PaginationConfig {
                default_limit: DEFAULT_PAGE_LIMIT,
                max_limit: None,
            },
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing home directory")]
    MissingHomeDir,
    #[error("invalid config path: {0}")]
    InvalidConfigPath(PathBuf),
    #[error("config file not found: {0}")]
    MissingConfigFile(PathBuf),
    #[error("config file permissions too permissive: {0}")]
    InsecurePermissions(PathBuf),
    #[error("invalid bind address: {0}")]
    InvalidBind(String),
    #[error("invalid default_limit value: {0}")]
    InvalidDefaultLimit(u32),
    #[error("invalid max_limit value: {0} (must be at least default_limit)")]
    InvalidMaxLimit(u32),
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    server: Option<ServerFile>,
    pagination: Option<PaginationFile>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ServerFile {
    bind: Option<String>,
    title: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct PaginationFile {
    default_limit: Option<u32>,
    max_limit: Option<u32>,
}

/// Loads the config file. An explicit path must exist; the default location
/// is optional and falls back to built-in defaults.
pub fn load(config_path: Option<PathBuf>) -> Result<AppConfig> {
    let required = config_path.is_some();
    let path = match resolve_config_path(config_path) {
        Ok(path) => path,
        Err(ConfigError::MissingHomeDir) if !required => return Ok(AppConfig::default()),
        Err(ConfigError::InvalidConfigPath(_)) if !required => return Ok(AppConfig::default()),
        Err(err) => return Err(err),
    };
    match load_at_path(&path, required)? {
        Some(config) => Ok(config),
        None => Ok(AppConfig::default()),
    }
}

pub fn resolve_config_path(custom: Option<PathBuf>) -> Result<PathBuf> {
    match custom {
        Some(path) => {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::InvalidConfigPath(path));
            }
            Ok(path)
        }
        None => {
            let base = if let Some(dir) = env::var_os("XDG_CONFIG_HOME") {
                let path = PathBuf::from(dir);
                if path.as_os_str().is_empty() {
                    return Err(ConfigError::InvalidConfigPath(path));
                }
                path
            } else {
                let home = dirs::home_dir().ok_or(ConfigError::MissingHomeDir)?;
                home.join(".config")
            };
            Ok(base.join(APP_DIR).join(CONFIG_FILENAME))
        }
    }
}

pub fn parse_bind(value: &str) -> Result<SocketAddr> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidBind(value.to_string()))
}

fn load_at_path(path: &Path, required: bool) -> Result<Option<AppConfig>> {
    if !path.exists() {
        if required {
            return Err(ConfigError::MissingConfigFile(path.to_path_buf()));
        }
        return Ok(None);
    }

    ensure_permissions(path)?;
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed: ConfigFile = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(merge_config(parsed)?))
}

fn merge_config(parsed: ConfigFile) -> Result<AppConfig> {
    let mut config = AppConfig::default();

    if let Some(server) = parsed.server {
        if let Some(bind) = server.bind {
            config.server.bind = parse_bind(&bind)?;
        }
        if let Some(title) = server.title {
            let title = title.trim();
            if !title.is_empty() {
                config.server.title = title.to_string();
            }
        }
    }

    if let Some(pagination) = parsed.pagination {
        if let Some(limit) = pagination.default_limit {
            if limit == 0 {
                return Err(ConfigError::InvalidDefaultLimit(limit));
            }
            config.pagination.default_limit = limit;
        }
        if let Some(max) = pagination.max_limit {
            if max < config.pagination.default_limit {
                return Err(ConfigError::InvalidMaxLimit(max));
            }
            config.pagination.max_limit = Some(max);
        }
    }

    Ok(config)
}

#[cfg(unix)]
fn ensure_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let metadata = fs::metadata(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let mode = metadata.permissions().mode();
    if mode & 0o077 != 0 {
        return Err(ConfigError::InsecurePermissions(path.to_path_buf()));
    }
    Ok(())
}

#[cfg(not(unix))]
fn ensure_permissions(_path: &Path) -> Result<()> {
    Ok(())
}
