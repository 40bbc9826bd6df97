//! Users resource API

use reqwest::Method;

use crate::common::Result;

use super::api_client::ApiClient;
use super::models::{CreateUser, UpdateUser, User};

const USERS_PATH: &str = "/api/v2/users";

/// User operations over an authenticated [`ApiClient`]
pub struct UsersApi<'a> {
    client: &'a ApiClient,
}

impl<'a> UsersApi<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Create a user
    pub async fn post_users(&self, body: &CreateUser) -> Result<User> {
        let request = self.client.request(Method::POST, USERS_PATH)?.json(body);
        self.client.send_json(Method::POST, USERS_PATH, request).await
    }

    /// Partially update a user; `body.version` must be current
    pub async fn patch_user(&self, user_id: &str, body: &UpdateUser) -> Result<User> {
        let path = user_path(user_id);
        let request = self.client.request(Method::PATCH, &path)?.json(body);
        self.client.send_json(Method::PATCH, &path, request).await
    }

    /// Replace the user's profile skills, returning the stored list
    pub async fn put_user_profileskills(&self, user_id: &str, skills: &[String]) -> Result<Vec<String>> {
        let path = format!("{}/profileskills", user_path(user_id));
        let request = self.client.request(Method::PUT, &path)?.json(skills);
        self.client.send_json(Method::PUT, &path, request).await
    }

    /// Fetch a user, optionally expanding extra fields (e.g. `profileSkills`)
    pub async fn get_user(&self, user_id: &str, expand: &[&str]) -> Result<User> {
        let path = user_path(user_id);
        let mut request = self.client.request(Method::GET, &path)?;
        if !expand.is_empty() {
            request = request.query(&[("expand", expand.join(","))]);
        }
        self.client.send_json(Method::GET, &path, request).await
    }

    /// Delete a user
    pub async fn delete_user(&self, user_id: &str) -> Result<()> {
        let path = user_path(user_id);
        let request = self.client.request(Method::DELETE, &path)?;
        self.client.send(Method::DELETE, &path, request).await?;
        Ok(())
    }
}

fn user_path(user_id: &str) -> String {
    format!("{USERS_PATH}/{user_id}")
}
