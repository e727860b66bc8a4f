//! Crate for talking to the albums and placeholder REST services.
//!
//! The client layer is deliberately thin: every call returns an [`ApiResponse`]
//! that captures the status code, the raw body and the wall-clock time the call
//! took. Deciding whether a status or body is acceptable is the job of the
//! contract verifier built on top of this crate.

use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use serde_json::Value;
use std::time::{Duration, Instant};
use tracing::{debug, instrument};
use url::Url;

pub use reqwest::StatusCode;

pub mod errors;
pub use errors::Error;

pub mod models;
pub use models::{
    AlbumField, AlbumFields, DeleteAcknowledgement, NewPost, UpdateAcknowledgement,
    ALBUM_CREATED_MESSAGE,
};

pub mod albums;
pub use albums::{AlbumsClient, DEFAULT_ALBUMS_BASE_URL};

pub mod placeholder;
pub use placeholder::{PlaceholderClient, DEFAULT_PLACEHOLDER_BASE_URL};

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

/// Default per-request network timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// The observed outcome of one HTTP exchange.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// The fully resolved request URL.
    pub url: String,
    /// The response status code.
    pub status: StatusCode,
    /// The raw response body.
    pub body: String,
    /// Wall-clock time from sending the request to reading the whole body.
    pub elapsed: Duration,
}

impl ApiResponse {
    /// The status code as a plain number.
    pub fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    /// Parses the body as arbitrary JSON.
    pub fn json_value(&self) -> Result<Value, Error> {
        Ok(serde_json::from_str(&self.body)?)
    }
}

/// A JSON-over-HTTP client bound to one service base URL.
///
/// Request paths are resolved relative to the base URL, so a base URL with a
/// path prefix (for example a mock server mounted under `/api`) keeps that
/// prefix.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
}

impl ApiClient {
    /// Creates a client for the service at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidUrl` if `base_url` does not parse, and
    /// `Error::ClientBuild` if the HTTP client cannot be initialized.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, Error> {
        let mut parsed =
            Url::parse(base_url).map_err(|e| Error::InvalidUrl(base_url.to_string(), e))?;
        if !parsed.path().ends_with('/') {
            let path = format!("{}/", parsed.path());
            parsed.set_path(&path);
        }

        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(Error::ClientBuild)?;

        Ok(Self {
            http,
            base_url: parsed,
        })
    }

    /// The base URL every request path is resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolves a request path such as `/albums/42` against the base URL.
    pub fn url_for(&self, path: &str) -> Result<Url, Error> {
        let relative = path.trim_start_matches('/');
        self.base_url
            .join(relative)
            .map_err(|e| Error::InvalidUrl(path.to_string(), e))
    }

    /// Sends a `GET` request.
    pub async fn get(&self, path: &str) -> Result<ApiResponse, Error> {
        let url = self.url_for(path)?;
        self.execute("GET", url.clone(), self.http.get(url)).await
    }

    /// Sends a `DELETE` request.
    pub async fn delete(&self, path: &str) -> Result<ApiResponse, Error> {
        let url = self.url_for(path)?;
        self.execute("DELETE", url.clone(), self.http.delete(url)).await
    }

    /// Sends a `POST` request with a JSON body.
    pub async fn post_json<B>(&self, path: &str, body: &B) -> Result<ApiResponse, Error>
    where
        B: Serialize + ?Sized,
    {
        let url = self.url_for(path)?;
        self.execute("POST", url.clone(), self.http.post(url).json(body)).await
    }

    /// Sends a `PATCH` request with a JSON body.
    pub async fn patch_json<B>(&self, path: &str, body: &B) -> Result<ApiResponse, Error>
    where
        B: Serialize + ?Sized,
    {
        let url = self.url_for(path)?;
        self.execute("PATCH", url.clone(), self.http.patch(url).json(body)).await
    }

    /// Sends a `PUT` request with a JSON body.
    pub async fn put_json<B>(&self, path: &str, body: &B) -> Result<ApiResponse, Error>
    where
        B: Serialize + ?Sized,
    {
        let url = self.url_for(path)?;
        self.execute("PUT", url.clone(), self.http.put(url).json(body)).await
    }

    #[instrument(skip_all, fields(method = method, url = %url))]
    async fn execute(
        &self,
        method: &'static str,
        url: Url,
        request: RequestBuilder,
    ) -> Result<ApiResponse, Error> {
        let started = Instant::now();
        let transport_error = |source| Error::Transport {
            url: url.to_string(),
            source,
        };

        let response = request.send().await.map_err(transport_error)?;
        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;
        let elapsed = started.elapsed();

        debug!(
            status = status.as_u16(),
            elapsed_ms = elapsed.as_millis() as u64,
            body_len = body.len(),
            "Received response"
        );

        Ok(ApiResponse {
            url: url.to_string(),
            status,
            body,
            elapsed,
        })
    }
}
