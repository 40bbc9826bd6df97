//! Configuration file handling and credential lookup

use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use super::paths::{config_path, executable_dir};
use super::{Error, Result};
use crate::client::Gateway;

/// Main configuration structure
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Prefix of the credential environment variables (`<PREFIX>_CLIENT_ID`, ...)
    #[serde(default = "default_env_prefix")]
    pub env_prefix: String,

    /// Display name given to the user created by the lifecycle cases
    #[serde(default = "default_user_name")]
    pub user_name: String,

    /// HTTP client settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Explicit API/login hosts, applied after region resolution
    #[serde(default)]
    pub endpoints: EndpointOverrides,

    /// API gateway used by the mTLS case
    #[serde(default)]
    pub gateway: Gateway,

    /// Client certificate material used by the mTLS case
    #[serde(default)]
    pub mtls: MtlsConfig,

    /// Forward proxy used by the proxy cases
    #[serde(default)]
    pub proxy: ProxyConfig,

    /// Directory of the loaded config file; relative paths resolve against it
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            env_prefix: default_env_prefix(),
            user_name: default_user_name(),
            http: HttpConfig::default(),
            endpoints: EndpointOverrides::default(),
            gateway: Gateway::default(),
            mtls: MtlsConfig::default(),
            proxy: ProxyConfig::default(),
            base_dir: None,
        }
    }
}

fn default_env_prefix() -> String {
    "PURECLOUD".to_string()
}

fn default_user_name() -> String {
    "Python SDK Tester".to_string()
}

/// HTTP client settings
#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("platform-smoke/{}", env!("CARGO_PKG_VERSION"))
}

/// Host overrides for staging or local platforms
#[derive(Debug, Deserialize, Default, Clone)]
pub struct EndpointOverrides {
    /// Base URL of the resource API (e.g. `https://api.example.test`)
    pub api_host: Option<String>,
    /// Base URL of the login service hosting `/oauth/token`
    pub login_host: Option<String>,
}

/// Client certificate, key and CA chain paths
#[derive(Debug, Deserialize)]
pub struct MtlsConfig {
    #[serde(default = "default_cert")]
    pub cert: PathBuf,

    #[serde(default = "default_key")]
    pub key: PathBuf,

    #[serde(default = "default_ca_chain")]
    pub ca_chain: PathBuf,
}

impl Default for MtlsConfig {
    fn default() -> Self {
        Self {
            cert: default_cert(),
            key: default_key(),
            ca_chain: default_ca_chain(),
        }
    }
}

fn default_cert() -> PathBuf {
    PathBuf::from("mtls-certs/localhost.cert.pem")
}
fn default_key() -> PathBuf {
    PathBuf::from("mtls-certs/localhost.key.pem")
}
fn default_ca_chain() -> PathBuf {
    PathBuf::from("mtls-certs/ca-chain.cert.pem")
}

/// Forward proxy settings
#[derive(Debug, Deserialize)]
pub struct ProxyConfig {
    #[serde(default = "default_proxy_url")]
    pub url: String,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            url: default_proxy_url(),
        }
    }
}

fn default_proxy_url() -> String {
    "http://localhost:4001".to_string()
}

impl Config {
    /// Load configuration from `path`, or from the default config file
    ///
    /// An explicit path must exist. The default file is optional and
    /// default configuration is returned when it is absent.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => match config_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    /// Parse a config file, remembering its directory
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::file_read(path, e))?;
        let mut config = Self::from_toml(&content)?;
        config.base_dir = path.parent().map(Path::to_path_buf);
        Ok(config)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::ConfigParse(e.to_string()))
    }

    /// Resolve a possibly relative path from the config
    ///
    /// Relative paths are joined to the config file's directory, falling back
    /// to the executable's directory when the config did not come from a file.
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            return path.to_path_buf();
        }
        match self.base_dir.clone().or_else(executable_dir) {
            Some(base) => base.join(path),
            None => path.to_path_buf(),
        }
    }
}

/// Name of a prefixed environment variable, e.g. `PURECLOUD_CLIENT_ID`
pub fn env_var_name(prefix: &str, suffix: &str) -> String {
    format!("{prefix}_{suffix}")
}

/// Platform credentials read from the environment
#[derive(Clone)]
pub struct Credentials {
    /// Environment domain, e.g. `mypurecloud.com`
    pub environment: String,
    pub client_id: String,
    pub client_secret: String,
}

impl Credentials {
    /// Read `<PREFIX>_ENVIRONMENT`, `<PREFIX>_CLIENT_ID` and `<PREFIX>_CLIENT_SECRET`
    ///
    /// Unset and empty variables are both reported as missing.
    pub fn from_vars(prefix: &str, vars: &HashMap<String, String>) -> Result<Self> {
        let lookup = |suffix: &str| {
            let name = env_var_name(prefix, suffix);
            match vars.get(&name) {
                Some(value) if !value.trim().is_empty() => Ok(value.clone()),
                _ => Err(Error::MissingEnv(name)),
            }
        };

        Ok(Self {
            environment: lookup("ENVIRONMENT")?,
            client_id: lookup("CLIENT_ID")?,
            client_secret: lookup("CLIENT_SECRET")?,
        })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("environment", &self.environment)
            .field("client_id", &self.client_id)
            .field("client_secret", &"***")
            .finish()
    }
}
