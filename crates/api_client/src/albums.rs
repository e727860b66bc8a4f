//! Client for the albums CRUD service.

use std::time::Duration;
use tracing::debug;

use crate::{AlbumFields, ApiClient, ApiResponse, Error};

#[cfg(test)]
#[path = "albums_tests.rs"]
mod tests;

/// Default base URL of the hosted albums service.
pub const DEFAULT_ALBUMS_BASE_URL: &str = "https://albums-collection-service.herokuapp.com";

/// Issues album requests and hands back the raw responses.
#[derive(Debug, Clone)]
pub struct AlbumsClient {
    api: ApiClient,
}

impl AlbumsClient {
    /// Creates a client for the albums service at `base_url`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, Error> {
        Ok(Self {
            api: ApiClient::new(base_url, timeout)?,
        })
    }

    /// The underlying JSON client.
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// `POST /albums`
    pub async fn create_album(&self, fields: &AlbumFields) -> Result<ApiResponse, Error> {
        debug!(fields = ?fields, "Creating album");
        self.api.post_json("/albums", fields).await
    }

    /// `GET /albums/{id}`
    pub async fn get_album(&self, album_id: &str) -> Result<ApiResponse, Error> {
        self.api.get(&album_path(album_id)).await
    }

    /// `PATCH /albums/{id}` with only the supplied fields.
    pub async fn patch_album(
        &self,
        album_id: &str,
        fields: &AlbumFields,
    ) -> Result<ApiResponse, Error> {
        debug!(album_id = album_id, fields = ?fields, "Patching album");
        self.api.patch_json(&album_path(album_id), fields).await
    }

    /// `PUT /albums/{id}`; fields left unset are omitted from the body.
    pub async fn put_album(
        &self,
        album_id: &str,
        fields: &AlbumFields,
    ) -> Result<ApiResponse, Error> {
        debug!(album_id = album_id, fields = ?fields, "Replacing album");
        self.api.put_json(&album_path(album_id), fields).await
    }

    /// `DELETE /albums/{id}`
    pub async fn delete_album(&self, album_id: &str) -> Result<ApiResponse, Error> {
        self.api.delete(&album_path(album_id)).await
    }
}

fn album_path(album_id: &str) -> String {
    format!("/albums/{}", album_id)
}
