//! Platform API client
//!
//! Owns the HTTP client, the resolved login/API base URLs and the current
//! access token. Transport options (mTLS identity, gateway, proxy, TLS
//! verification) are fixed at build time through [`ApiClientBuilder`].

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::{Certificate, Identity, Method, Proxy, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::common::{mask_secret, Error, Result};

use super::auth::{self, AuthResponse};
use super::gateway::Gateway;

/// Client certificate, private key and CA chain, loaded as PEM
pub struct MtlsMaterial {
    cert_pem: Vec<u8>,
    key_pem: Vec<u8>,
    ca_pem: Vec<u8>,
}

impl MtlsMaterial {
    /// Read the three PEM files
    pub fn load(cert: &Path, key: &Path, ca_chain: &Path) -> Result<Self> {
        let read = |path: &Path| std::fs::read(path).map_err(|e| Error::file_read(path, e));
        Ok(Self {
            cert_pem: read(cert)?,
            key_pem: read(key)?,
            ca_pem: read(ca_chain)?,
        })
    }

    fn identity(&self) -> Result<Identity> {
        let mut pem = Vec::with_capacity(self.cert_pem.len() + self.key_pem.len() + 1);
        pem.extend_from_slice(&self.cert_pem);
        pem.push(b'\n');
        pem.extend_from_slice(&self.key_pem);
        Identity::from_pem(&pem)
            .map_err(|e| Error::Config(format!("Invalid client certificate or key: {e}")))
    }

    fn ca_certificates(&self) -> Result<Vec<Certificate>> {
        Certificate::from_pem_bundle(&self.ca_pem)
            .map_err(|e| Error::Config(format!("Invalid CA chain: {e}")))
    }
}

/// Paths of the mTLS files, kept for diagnostics
#[derive(Debug, Clone)]
pub struct MtlsPaths {
    pub cert: PathBuf,
    pub key: PathBuf,
    pub ca_chain: PathBuf,
}

impl MtlsPaths {
    pub fn load(&self) -> Result<MtlsMaterial> {
        MtlsMaterial::load(&self.cert, &self.key, &self.ca_chain)
    }
}

/// Builder for [`ApiClient`]
pub struct ApiClientBuilder {
    api_host: String,
    login_host: String,
    gateway: Option<Gateway>,
    mtls: Option<MtlsMaterial>,
    proxy: Option<String>,
    verify_tls: bool,
    timeout: Duration,
    user_agent: String,
}

impl ApiClientBuilder {
    /// Route login and API traffic through a gateway
    pub fn gateway(mut self, gateway: Gateway) -> Self {
        self.gateway = Some(gateway);
        self
    }

    /// Present a client certificate and trust the given CA chain
    pub fn mtls(mut self, material: MtlsMaterial) -> Self {
        self.mtls = Some(material);
        self
    }

    /// Send all requests through an HTTP proxy
    pub fn proxy(mut self, url: impl Into<String>) -> Self {
        self.proxy = Some(url.into());
        self
    }

    /// Toggle server certificate verification (on by default)
    pub fn verify_tls(mut self, verify: bool) -> Self {
        self.verify_tls = verify;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn build(self) -> Result<ApiClient> {
        let mut builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(self.user_agent);

        if let Some(material) = &self.mtls {
            builder = builder.identity(material.identity()?);
            for cert in material.ca_certificates()? {
                builder = builder.add_root_certificate(cert);
            }
        }

        if let Some(proxy) = &self.proxy {
            let proxy = Proxy::all(proxy.as_str())
                .map_err(|e| Error::Config(format!("Invalid proxy URL '{proxy}': {e}")))?;
            builder = builder.proxy(proxy);
        }

        if !self.verify_tls {
            tracing::warn!("TLS certificate verification disabled");
            builder = builder.danger_accept_invalid_certs(true);
        }

        let http = builder.build()?;

        let (api_base, login_base) = match &self.gateway {
            Some(gateway) => (gateway.api_base(), gateway.login_base()),
            None => (self.api_host, self.login_host),
        };

        Ok(ApiClient {
            http,
            api_base: api_base.trim_end_matches('/').to_string(),
            login_base: login_base.trim_end_matches('/').to_string(),
            access_token: None,
        })
    }
}

/// Authenticated handle to the platform API
pub struct ApiClient {
    http: reqwest::Client,
    api_base: String,
    login_base: String,
    access_token: Option<String>,
}

impl ApiClient {
    /// Start building a client for the given API and login hosts
    pub fn builder(api_host: impl Into<String>, login_host: impl Into<String>) -> ApiClientBuilder {
        ApiClientBuilder {
            api_host: api_host.into(),
            login_host: login_host.into(),
            gateway: None,
            mtls: None,
            proxy: None,
            verify_tls: true,
            timeout: Duration::from_secs(30),
            user_agent: format!("platform-smoke/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Request a token with the client-credentials grant and keep it
    pub async fn get_client_credentials_token(
        &mut self,
        client_id: &str,
        client_secret: &str,
    ) -> Result<AuthResponse> {
        let auth = auth::request_token(&self.http, &self.login_base, client_id, client_secret).await?;
        self.access_token = Some(auth.access_token.clone());
        Ok(auth)
    }

    pub fn set_access_token(&mut self, token: impl Into<String>) {
        self.access_token = Some(token.into());
    }

    pub fn clear_access_token(&mut self) {
        self.access_token = None;
    }

    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    pub fn login_base(&self) -> &str {
        &self.login_base
    }

    /// Start an authorized request to `path` below the API base
    pub(crate) fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let token = match self.access_token.as_deref() {
            Some(token) if !token.is_empty() => token,
            _ => return Err(Error::NotAuthenticated),
        };
        let url = format!("{}{}", self.api_base, path);
        Ok(self.http.request(method, url).bearer_auth(token))
    }

    /// Send a request and decode its JSON body
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        request: RequestBuilder,
    ) -> Result<T> {
        let body = self.send(method, path, request).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Send a request, returning the raw body of a successful response
    pub(crate) async fn send(&self, method: Method, path: &str, request: RequestBuilder) -> Result<String> {
        tracing::debug!(%method, path, "platform request");
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(Error::api(method.as_str(), path, status.as_u16(), body));
        }
        Ok(body)
    }
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("api_base", &self.api_base)
            .field("login_base", &self.login_base)
            .field("access_token", &self.access_token.as_deref().map(mask_secret))
            .finish()
    }
}
