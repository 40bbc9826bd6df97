//! Suite session
//!
//! The context every case receives by `&mut`. Holds what earlier cases
//! produced (credentials, generated email, created user, authenticated
//! client) for the cases after them.

use std::collections::HashMap;
use std::time::Duration;

use crate::client::{ApiClient, ApiClientBuilder, MtlsPaths, Region, UsersApi};
use crate::common::{Config, Credentials, Error, Result};

/// Login and API hosts for one authentication attempt
#[derive(Debug, Clone)]
pub struct Hosts {
    pub region: Region,
    pub api_host: String,
    pub login_host: String,
}

/// State shared by the cases of one suite run
pub struct Session {
    pub config: Config,
    vars: HashMap<String, String>,
    credentials: Option<Credentials>,
    /// Email generated for the user the suite creates
    pub user_email: Option<String>,
    /// Identifier of the created user
    pub user_id: Option<String>,
    /// Current version of the created user
    pub user_version: Option<i64>,
    /// A version the platform has already moved past
    pub stale_version: Option<i64>,
    client: Option<ApiClient>,
}

impl Session {
    /// Create a session over an explicit variable snapshot
    pub fn new(config: Config, vars: HashMap<String, String>) -> Self {
        Self {
            config,
            vars,
            credentials: None,
            user_email: None,
            user_id: None,
            user_version: None,
            stale_version: None,
            client: None,
        }
    }

    /// Create a session over the process environment
    pub fn from_process_env(config: Config) -> Self {
        Self::new(config, std::env::vars().collect())
    }

    /// Credentials from the environment snapshot, read once per session
    pub fn credentials(&mut self) -> Result<Credentials> {
        if let Some(credentials) = &self.credentials {
            return Ok(credentials.clone());
        }
        let credentials = Credentials::from_vars(&self.config.env_prefix, &self.vars)?;
        self.credentials = Some(credentials.clone());
        Ok(credentials)
    }

    /// Hosts for an environment, via the region mapping
    ///
    /// Unknown domains fall back to hosts built from the domain string.
    /// Configured endpoint overrides win over both.
    pub fn resolve_hosts(&self, environment: &str) -> Hosts {
        let region = Region::resolve(environment);
        match &region {
            Region::Known(host) => tracing::info!(region = %host, "using region"),
            Region::Unmapped(domain) => tracing::warn!(
                domain = %domain,
                "environment not found in region hosts, defaulting to string value"
            ),
        }
        self.apply_overrides(region)
    }

    /// Hosts built straight from the environment string, skipping the region table
    pub fn direct_hosts(&self, environment: &str) -> Hosts {
        self.apply_overrides(Region::Unmapped(environment.to_string()))
    }

    fn apply_overrides(&self, region: Region) -> Hosts {
        let endpoints = &self.config.endpoints;
        let hosts = Hosts {
            api_host: endpoints.api_host.clone().unwrap_or_else(|| region.api_host()),
            login_host: endpoints.login_host.clone().unwrap_or_else(|| region.login_host()),
            region,
        };
        tracing::info!(api_host = %hosts.api_host, login_host = %hosts.login_host, "hosts resolved");
        hosts
    }

    /// Client builder carrying the configured HTTP settings
    pub fn client_builder(&self, hosts: &Hosts) -> ApiClientBuilder {
        ApiClient::builder(hosts.api_host.clone(), hosts.login_host.clone())
            .timeout(Duration::from_secs(self.config.http.timeout_secs))
            .user_agent(self.config.http.user_agent.clone())
    }

    /// mTLS file paths with relative entries resolved
    pub fn mtls_paths(&self) -> MtlsPaths {
        let mtls = &self.config.mtls;
        MtlsPaths {
            cert: self.config.resolve_path(&mtls.cert),
            key: self.config.resolve_path(&mtls.key),
            ca_chain: self.config.resolve_path(&mtls.ca_chain),
        }
    }

    /// Replace the authenticated client handle
    pub fn set_client(&mut self, client: ApiClient) {
        self.client = Some(client);
    }

    pub fn client(&self) -> Result<&ApiClient> {
        self.client.as_ref().ok_or(Error::NotAuthenticated)
    }

    pub fn client_mut(&mut self) -> Option<&mut ApiClient> {
        self.client.as_mut()
    }

    pub fn users(&self) -> Result<UsersApi<'_>> {
        Ok(UsersApi::new(self.client()?))
    }

    pub fn user_id(&self) -> Result<String> {
        self.user_id.clone().ok_or(Error::MissingState("user id"))
    }

    pub fn user_email(&self) -> Result<String> {
        self.user_email.clone().ok_or(Error::MissingState("user email"))
    }

    /// Forget the created user after it was deleted
    pub fn forget_user(&mut self) {
        self.user_id = None;
        self.user_version = None;
        self.stale_version = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::config::EndpointOverrides;
    use std::path::PathBuf;

    fn session_with(config: Config) -> Session {
        let vars = [
            ("PURECLOUD_ENVIRONMENT", "mypurecloud.ie"),
            ("PURECLOUD_CLIENT_ID", "id"),
            ("PURECLOUD_CLIENT_SECRET", "secret"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        Session::new(config, vars)
    }

    #[test]
    fn test_resolve_hosts_known_region() {
        let session = session_with(Config::default());
        let hosts = session.resolve_hosts("mypurecloud.ie");
        assert!(hosts.region.is_known());
        assert_eq!(hosts.api_host, "https://api.mypurecloud.ie");
        assert_eq!(hosts.login_host, "https://login.mypurecloud.ie");
    }

    #[test]
    fn test_resolve_hosts_fallback_and_overrides() {
        let session = session_with(Config::default());
        let hosts = session.resolve_hosts("inindca.com");
        assert!(!hosts.region.is_known());
        assert_eq!(hosts.api_host, "https://api.inindca.com");

        let config = Config {
            endpoints: EndpointOverrides {
                api_host: Some("http://127.0.0.1:8080".into()),
                login_host: None,
            },
            ..Config::default()
        };
        let session = session_with(config);
        let hosts = session.direct_hosts("mypurecloud.com");
        assert_eq!(hosts.api_host, "http://127.0.0.1:8080");
        assert_eq!(hosts.login_host, "https://login.mypurecloud.com");
    }

    #[test]
    fn test_credentials_cached() {
        let mut session = session_with(Config::default());
        let first = session.credentials().unwrap();
        assert_eq!(first.environment, "mypurecloud.ie");
        session.vars.clear();
        assert_eq!(session.credentials().unwrap().client_id, "id");
    }

    #[test]
    fn test_missing_state() {
        let session = session_with(Config::default());
        assert!(matches!(session.user_id(), Err(Error::MissingState("user id"))));
        assert!(matches!(session.users(), Err(Error::NotAuthenticated)));
    }

    #[test]
    fn test_mtls_paths_resolve_against_config_dir() {
        let config = Config {
            base_dir: Some(PathBuf::from("/opt/smoke")),
            ..Config::default()
        };
        let paths = session_with(config).mtls_paths();
        assert_eq!(paths.key, PathBuf::from("/opt/smoke/mtls-certs/localhost.key.pem"));
    }
}
