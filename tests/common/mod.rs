//! Shared fixtures for the integration tests
//!
//! `FakePlatform` is a stateful wiremock responder standing in for the
//! login service and the Users API.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde_json::{json, Value};
use wiremock::matchers::any;
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

use platform_smoke::common::config::EndpointOverrides;
use platform_smoke::{Config, Session};

pub const ENVIRONMENT: &str = "mypurecloud.com";
pub const CLIENT_ID: &str = "smoke-client";
pub const CLIENT_SECRET: &str = "smoke-secret";

#[derive(Default)]
pub struct PlatformState {
    /// Tokens issued so far, in order
    pub issued: Vec<String>,
    /// Bearer token of every Users API call, in order
    pub bearers: Vec<String>,
    pub users: HashMap<String, Value>,
    /// Every create body received
    pub created: Vec<Value>,
    pub deleted: Vec<String>,
    next_id: u32,
    /// Token requests received, including rejected ones
    token_requests: usize,
    /// From the given request number on, answer with this status and body
    token_failure: Option<(usize, u16, String)>,
    /// Accept updates regardless of version
    ignore_versions: bool,
}

/// Stateful fake of the platform endpoints
#[derive(Clone, Default)]
pub struct FakePlatform {
    state: Arc<Mutex<PlatformState>>,
}

impl FakePlatform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rejecting_tokens(status: u16, body: &str) -> Self {
        Self::rejecting_tokens_from(1, status, body)
    }

    /// Issue tokens normally until the `nth` request, then answer every
    /// request with `status` and `body`
    pub fn rejecting_tokens_from(nth: usize, status: u16, body: &str) -> Self {
        let platform = Self::new();
        platform.state.lock().unwrap().token_failure = Some((nth, status, body.to_string()));
        platform
    }

    pub fn ignoring_versions() -> Self {
        let platform = Self::new();
        platform.state.lock().unwrap().ignore_versions = true;
        platform
    }

    pub fn state(&self) -> std::sync::MutexGuard<'_, PlatformState> {
        self.state.lock().unwrap()
    }

    /// Start a mock server answering every request through this fake
    pub async fn start(&self) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(any()).respond_with(self.clone()).mount(&server).await;
        server
    }

    fn token(&self, request: &Request) -> ResponseTemplate {
        let mut state = self.state.lock().unwrap();

        state.token_requests += 1;
        if let Some((nth, status, body)) = &state.token_failure {
            if state.token_requests >= *nth {
                return ResponseTemplate::new(*status).set_body_string(body.clone());
            }
        }

        let expected = platform_smoke::client::auth::basic_authorization(CLIENT_ID, CLIENT_SECRET);
        if header(request, "authorization") != Some(expected.as_str()) {
            return ResponseTemplate::new(401).set_body_json(json!({"error": "invalid_client"}));
        }
        if request.method.as_str() != "POST"
            || !String::from_utf8_lossy(&request.body).contains("grant_type=client_credentials")
        {
            return ResponseTemplate::new(400).set_body_json(json!({"error": "unsupported_grant_type"}));
        }

        let token = format!("token-{}", state.issued.len() + 1);
        state.issued.push(token.clone());
        ResponseTemplate::new(200).set_body_json(json!({
            "access_token": token,
            "token_type": "bearer",
            "expires_in": 86399
        }))
    }

    fn users(&self, request: &Request, rest: &str) -> ResponseTemplate {
        let mut state = self.state.lock().unwrap();

        let bearer = header(request, "authorization")
            .and_then(|h| h.strip_prefix("Bearer "))
            .unwrap_or_default()
            .to_string();
        if !state.issued.contains(&bearer) {
            return ResponseTemplate::new(401).set_body_json(json!({"message": "bad token"}));
        }
        state.bearers.push(bearer);

        let segments: Vec<&str> = rest.split('/').filter(|s| !s.is_empty()).collect();
        let body: Value = serde_json::from_slice(&request.body).unwrap_or(Value::Null);

        match (request.method.as_str(), segments.as_slice()) {
            ("POST", []) => {
                state.next_id += 1;
                let id = format!("00000000-0000-0000-0000-{:012}", state.next_id);
                let user = json!({
                    "id": id,
                    "name": body["name"],
                    "email": body["email"],
                    "version": 1
                });
                state.created.push(body);
                state.users.insert(id, user.clone());
                ResponseTemplate::new(200).set_body_json(user)
            }
            ("PATCH", [id]) => {
                let ignore_versions = state.ignore_versions;
                let Some(user) = state.users.get_mut(*id) else {
                    return not_found();
                };
                if !ignore_versions && body["version"] != user["version"] {
                    return ResponseTemplate::new(409)
                        .set_body_json(json!({"message": "user version mismatch"}));
                }
                if let Some(department) = body.get("department") {
                    user["department"] = department.clone();
                }
                user["version"] = json!(user["version"].as_i64().unwrap_or(1) + 1);
                ResponseTemplate::new(200).set_body_json(user.clone())
            }
            ("PUT", [id, "profileskills"]) => {
                let Some(user) = state.users.get_mut(*id) else {
                    return not_found();
                };
                user["profileSkills"] = body.clone();
                ResponseTemplate::new(200).set_body_json(body)
            }
            ("GET", [id]) => {
                let Some(user) = state.users.get(*id) else {
                    return not_found();
                };
                let expand_skills = request
                    .url
                    .query_pairs()
                    .any(|(k, v)| k == "expand" && v.split(',').any(|e| e == "profileSkills"));
                let mut user = user.clone();
                if !expand_skills {
                    if let Some(object) = user.as_object_mut() {
                        object.remove("profileSkills");
                    }
                }
                ResponseTemplate::new(200).set_body_json(user)
            }
            ("DELETE", [id]) => {
                if state.users.remove(*id).is_none() {
                    return not_found();
                }
                state.deleted.push(id.to_string());
                ResponseTemplate::new(200).set_body_json(json!({}))
            }
            _ => not_found(),
        }
    }
}

impl Respond for FakePlatform {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let path = request.url.path().to_string();
        if path == "/oauth/token" {
            self.token(request)
        } else if let Some(rest) = path.strip_prefix("/api/v2/users") {
            self.users(request, rest)
        } else {
            not_found()
        }
    }
}

fn header<'a>(request: &'a Request, name: &str) -> Option<&'a str> {
    request.headers.get(name).and_then(|v| v.to_str().ok())
}

fn not_found() -> ResponseTemplate {
    ResponseTemplate::new(404).set_body_json(json!({"message": "not found"}))
}

/// Standard credential variables
pub fn credential_vars() -> HashMap<String, String> {
    [
        ("PURECLOUD_ENVIRONMENT", ENVIRONMENT),
        ("PURECLOUD_CLIENT_ID", CLIENT_ID),
        ("PURECLOUD_CLIENT_SECRET", CLIENT_SECRET),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

/// Config sending login and API traffic to the mock server
pub fn config_for(server: &MockServer) -> Config {
    Config {
        endpoints: EndpointOverrides {
            api_host: Some(server.uri()),
            login_host: Some(server.uri()),
        },
        ..Config::default()
    }
}

/// Session against the mock server with the standard credentials
pub fn session_for(server: &MockServer) -> Session {
    Session::new(config_for(server), credential_vars())
}

/// A localhost port with nothing listening on it
pub fn closed_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}
