//! Error types for the smoke-test harness
//!
//! Messages carry enough context (status codes, response bodies, field
//! names) to diagnose a failing case from the runner output alone.

use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the harness and the platform client
#[derive(Error, Debug)]
pub enum Error {
    // === Configuration Errors ===
    #[error("Environment variable {0} is not set")]
    MissingEnv(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration file: {0}")]
    ConfigParse(String),

    #[error("Failed to read file '{path}': {error}")]
    FileRead { path: String, error: String },

    // === Authentication Errors ===
    #[error("Token request failed with status {status}: {body}")]
    TokenRequest { status: u16, body: String },

    #[error("No access token available. Run an authenticate case first")]
    NotAuthenticated,

    // === Platform API Errors ===
    #[error("{method} {path} failed with status {status}: {body}")]
    Api {
        method: String,
        path: String,
        status: u16,
        body: String,
    },

    // === Session Errors ===
    #[error("Session has no {0}. An earlier case did not record it")]
    MissingState(&'static str),

    // === Transport Errors ===
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    // === Serialization Errors ===
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // === Test Errors ===
    #[error("Test assertion failed: {0}")]
    TestAssertion(String),

    #[error("Suite '{suite}' failed at case '{case}'")]
    SuiteFailed { suite: String, case: String },
}

impl Error {
    /// Create a platform API error from a failed call
    pub fn api(method: &str, path: &str, status: u16, body: String) -> Self {
        Self::Api {
            method: method.to_string(),
            path: path.to_string(),
            status,
            body,
        }
    }

    /// Create a file read error for a path
    pub fn file_read(path: &std::path::Path, error: impl std::fmt::Display) -> Self {
        Self::FileRead {
            path: path.display().to_string(),
            error: error.to_string(),
        }
    }

    /// HTTP status carried by the error, if the platform answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::TokenRequest { status, .. } | Error::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether this error is a failed expectation rather than a broken run.
    ///
    /// Assertion mismatches and missing credentials count as test failures;
    /// transport and platform errors count as errors.
    pub fn is_failure(&self) -> bool {
        matches!(self, Error::TestAssertion(_) | Error::MissingEnv(_))
    }
}
