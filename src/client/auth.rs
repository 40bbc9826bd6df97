//! OAuth client-credentials grant
//!
//! `POST <login>/oauth/token` with HTTP Basic client authentication and a
//! `grant_type=client_credentials` form body.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Deserialize;

use crate::common::{Error, Result};

/// Path of the token endpoint below the login base
pub const TOKEN_PATH: &str = "/oauth/token";

/// Token endpoint response
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    /// Lifetime in seconds
    #[serde(default)]
    pub expires_in: Option<u64>,
}

/// `Basic base64(client_id:client_secret)` header value
pub fn basic_authorization(client_id: &str, client_secret: &str) -> String {
    let encoded = STANDARD.encode(format!("{client_id}:{client_secret}"));
    format!("Basic {encoded}")
}

/// Full token endpoint URL for a login base
pub fn token_url(login_base: &str) -> String {
    format!("{}{}", login_base.trim_end_matches('/'), TOKEN_PATH)
}

/// Exchange client credentials for an access token
pub async fn request_token(
    http: &reqwest::Client,
    login_base: &str,
    client_id: &str,
    client_secret: &str,
) -> Result<AuthResponse> {
    let url = token_url(login_base);
    tracing::debug!(%url, client_id, "requesting client credentials token");

    let response = http
        .post(&url)
        .header(reqwest::header::AUTHORIZATION, basic_authorization(client_id, client_secret))
        .form(&[("grant_type", "client_credentials")])
        .send()
        .await?;

    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(Error::TokenRequest {
            status: status.as_u16(),
            body,
        });
    }

    let auth: AuthResponse = serde_json::from_str(&body)?;
    tracing::debug!(
        token_type = auth.token_type.as_deref().unwrap_or("unknown"),
        expires_in = auth.expires_in,
        "token issued"
    );
    Ok(auth)
}
