//! Common utilities shared by the CLI, the client and the runner

pub mod config;
pub mod error;
pub mod logging;
pub mod paths;

pub use config::{Config, Credentials};
pub use error::{Error, Result};

/// Mask a secret for display, keeping only its last four characters
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{}", "*".repeat(chars.len() - 4), tail)
}
