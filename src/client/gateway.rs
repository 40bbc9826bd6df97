//! API gateway rerouting
//!
//! When a gateway is configured, token and resource requests go to
//! `<protocol>://<host>:<port>/<path>` instead of the region hosts.

use serde::Deserialize;

/// Gateway host, port and per-service path prefixes
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Gateway {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_protocol")]
    pub protocol: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Path prefix in front of the login service (`/oauth/token`)
    #[serde(default = "default_login_path")]
    pub login_path: String,

    /// Path prefix in front of the resource API (`/api/v2/...`)
    #[serde(default = "default_api_path")]
    pub api_path: String,
}

impl Default for Gateway {
    fn default() -> Self {
        Self {
            host: default_host(),
            protocol: default_protocol(),
            port: default_port(),
            login_path: default_login_path(),
            api_path: default_api_path(),
        }
    }
}

fn default_host() -> String {
    "localhost".to_string()
}
fn default_protocol() -> String {
    "https".to_string()
}
fn default_port() -> u16 {
    4027
}
fn default_login_path() -> String {
    "login".to_string()
}
fn default_api_path() -> String {
    "api".to_string()
}

impl Gateway {
    /// Base URL replacing the login host
    pub fn login_base(&self) -> String {
        self.base_with(&self.login_path)
    }

    /// Base URL replacing the API host
    pub fn api_base(&self) -> String {
        self.base_with(&self.api_path)
    }

    fn base_with(&self, path: &str) -> String {
        let path = path.trim_matches('/');
        let origin = format!("{}://{}:{}", self.protocol, self.host, self.port);
        if path.is_empty() {
            origin
        } else {
            format!("{origin}/{path}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_gateway_urls() {
        let gateway = Gateway::default();
        assert_eq!(gateway.login_base(), "https://localhost:4027/login");
        assert_eq!(gateway.api_base(), "https://localhost:4027/api");
    }

    #[test]
    fn test_nested_and_slashed_paths() {
        let gateway = Gateway {
            host: "serviceproxy.net".into(),
            port: 443,
            login_path: "/nonxml/login/".into(),
            api_path: "nonxml/apis".into(),
            ..Gateway::default()
        };
        assert_eq!(gateway.login_base(), "https://serviceproxy.net:443/nonxml/login");
        assert_eq!(gateway.api_base(), "https://serviceproxy.net:443/nonxml/apis");
    }

    #[test]
    fn test_empty_path_uses_origin() {
        let gateway = Gateway {
            host: "gw".into(),
            protocol: "http".into(),
            port: 8080,
            login_path: String::new(),
            api_path: "/".into(),
        };
        assert_eq!(gateway.login_base(), "http://gw:8080");
        assert_eq!(gateway.api_base(), "http://gw:8080");
    }
}
