//! Server configuration types.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {message}")]
    Invalid { message: String },
}

/// Configuration for the HTTP gateway.
#[derive(Debug, Clone, PartialEq, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind.
    #[builder(default = "default_host()")]
    pub host: IpAddr,

    /// Port to listen on.
    #[builder(default = "5000")]
    pub port: u16,

    /// Directory of static assets served at `/` (None = API only).
    #[builder(default)]
    pub static_dir: Option<PathBuf>,

    /// Allow any origin, header and method.
    #[builder(default = "true")]
    pub cors_permissive: bool,
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::LOCALHOST)
}

fn check_static_dir(static_dir: Option<&Path>) -> Result<(), String> {
    match static_dir {
        Some(dir) if dir.as_os_str().is_empty() => {
            Err("Static directory cannot be empty".to_string())
        }
        _ => Ok(()),
    }
}

impl ServerConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        check_static_dir(self.static_dir.as_ref().and_then(|dir| dir.as_deref()))
    }
}

impl ServerConfig {
    /// Create a new server config builder.
    pub fn builder() -> ServerConfigBuilder {
        ServerConfigBuilder::default()
    }

    /// Default location of the config file.
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("filecommander").join("config.toml"))
    }

    /// Parse a config from TOML text.
    pub fn from_toml(content: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validated()
    }

    /// Load a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content, path)
    }

    /// Load the explicit file if given, else the default file if it exists,
    /// else defaults.
    pub fn load_or_default(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        match Self::config_path() {
            Some(path) if path.is_file() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Socket address to bind.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    fn validated(self) -> Result<Self, ConfigError> {
        check_static_dir(self.static_dir.as_deref())
            .map_err(|message| ConfigError::Invalid { message })?;
        Ok(self)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: 5000,
            static_dir: None,
            cors_permissive: true,
        }
    }
}
