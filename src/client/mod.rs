//! Platform API client
//!
//! The minimal client the smoke suites drive: region/host resolution,
//! client-credentials tokens, mTLS gateway and proxy transport options,
//! and the Users resource.

pub mod api_client;
pub mod auth;
pub mod gateway;
pub mod models;
pub mod region;
pub mod users;

pub use api_client::{ApiClient, ApiClientBuilder, MtlsMaterial, MtlsPaths};
pub use auth::AuthResponse;
pub use gateway::Gateway;
pub use models::{CreateUser, UpdateUser, User};
pub use region::{Region, RegionHost};
pub use users::UsersApi;
