//! Client for the generic placeholder API (users and posts).

use std::time::Duration;

use crate::{ApiClient, ApiResponse, Error, NewPost};

#[cfg(test)]
#[path = "placeholder_tests.rs"]
mod tests;

/// Default base URL of the hosted placeholder service.
pub const DEFAULT_PLACEHOLDER_BASE_URL: &str = "https://jsonplaceholder.typicode.com";

/// Issues placeholder API requests and hands back the raw responses.
#[derive(Debug, Clone)]
pub struct PlaceholderClient {
    api: ApiClient,
}

impl PlaceholderClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, Error> {
        Ok(Self {
            api: ApiClient::new(base_url, timeout)?,
        })
    }

    /// The underlying JSON client, for reads of arbitrary collections.
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// `GET /users`
    pub async fn list_users(&self) -> Result<ApiResponse, Error> {
        self.api.get("/users").await
    }

    /// `POST /posts`
    pub async fn create_post(&self, post: &NewPost) -> Result<ApiResponse, Error> {
        self.api.post_json("/posts", post).await
    }

    /// `GET /posts`
    pub async fn list_posts(&self) -> Result<ApiResponse, Error> {
        self.api.get("/posts").await
    }
}
