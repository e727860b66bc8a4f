//! Album lifecycle verification.
//!
//! [`LifecycleVerifier`] exposes one checked operation per albums endpoint.
//! Each operation sends exactly one request, compares status and body against
//! the service contract, and fails on the first deviation.
//!
//! [`AlbumLifecycle`] tracks a single album through
//! `created → (partially-updated)* → (fully-replaced)* → deleted`, layering
//! every applied operation into an [`ExpectedAlbum`] so that a read-back can be
//! checked against the merged state without restating it.

use std::fmt;

use api_client::{
    AlbumFields, AlbumsClient, DeleteAcknowledgement, UpdateAcknowledgement,
    ALBUM_CREATED_MESSAGE,
};
use serde_json::{Map, Value};
use tracing::{info, instrument, warn};

use crate::errors::{Error, Operation};
use crate::expected::ExpectedAlbum;
use crate::response::{expect_exact_body, expect_object, expect_status};

#[cfg(test)]
#[path = "lifecycle_tests.rs"]
mod tests;

/// Where a tracked album is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Created,
    PartiallyUpdated,
    FullyReplaced,
    Deleted,
}

impl LifecycleState {
    /// Whether `operation` may be applied to an album in this state.
    pub fn allows(&self, operation: Operation) -> bool {
        use LifecycleState::*;

        match operation {
            Operation::PartialUpdate => matches!(self, Created | PartiallyUpdated),
            Operation::FullReplace => !matches!(self, Deleted),
            Operation::ReadAlbum | Operation::DeleteAlbum | Operation::Cleanup => {
                !matches!(self, Deleted)
            }
            Operation::ReadDeletedAlbum => matches!(self, Deleted),
            Operation::CreateAlbum
            | Operation::ReadCollection
            | Operation::CreatePost
            | Operation::ListPosts => false,
        }
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LifecycleState::Created => "created",
            LifecycleState::PartiallyUpdated => "partially-updated",
            LifecycleState::FullyReplaced => "fully-replaced",
            LifecycleState::Deleted => "deleted",
        };
        f.write_str(name)
    }
}

/// Checked create, read, update and delete operations on the albums service.
#[derive(Debug, Clone)]
pub struct LifecycleVerifier {
    client: AlbumsClient,
}

impl LifecycleVerifier {
    pub fn new(client: AlbumsClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &AlbumsClient {
        &self.client
    }

    /// Creates an album and starts tracking its lifecycle.
    pub async fn begin(&self, fields: &AlbumFields) -> Result<AlbumLifecycle<'_>, Error> {
        let album_id = self.create(fields).await?;
        Ok(AlbumLifecycle {
            verifier: self,
            expected: ExpectedAlbum::after_create(album_id.clone(), fields),
            album_id,
            state: LifecycleState::Created,
        })
    }

    /// Creates an album and returns its server-assigned id.
    ///
    /// # Errors
    ///
    /// - `Error::UnexpectedStatus` unless the service answers `201 Created`.
    /// - `Error::MissingField` if `album_id` or `message` is absent.
    /// - `Error::UnexpectedValue` if `message` is not the creation message.
    /// - `Error::MalformedBody` if the body is not an object or the id is not a
    ///   non-empty string.
    #[instrument(skip(self, fields))]
    pub async fn create(&self, fields: &AlbumFields) -> Result<String, Error> {
        let operation = Operation::CreateAlbum;
        let response = self.client.create_album(fields).await?;
        expect_status(operation, &response, 201)?;

        let body = expect_object(operation, &response)?;
        let album_id = match body.get("album_id") {
            Some(Value::String(id)) if !id.is_empty() => id.clone(),
            Some(_) => {
                return Err(Error::MalformedBody {
                    operation,
                    expected: "a non-empty string album_id",
                    body: response.body.clone(),
                });
            }
            None => {
                return Err(Error::MissingField {
                    operation,
                    field: "album_id".to_string(),
                });
            }
        };

        let message = body.get("message").ok_or_else(|| Error::MissingField {
            operation,
            field: "message".to_string(),
        })?;
        if message != ALBUM_CREATED_MESSAGE {
            return Err(Error::UnexpectedValue {
                operation,
                field: "message".to_string(),
                expected: Value::from(ALBUM_CREATED_MESSAGE),
                actual: message.clone(),
            });
        }

        info!(album_id = %album_id, "Album created");
        Ok(album_id)
    }

    /// Reads an album and checks every field `expected` mentions.
    ///
    /// Returns the fetched record so callers can inspect unasserted fields.
    ///
    /// # Errors
    ///
    /// - `Error::UnexpectedStatus` unless the service answers `200 OK`.
    /// - `Error::StateMismatch` listing every field that differs.
    #[instrument(skip(self, expected))]
    pub async fn read_and_verify(
        &self,
        album_id: &str,
        expected: &ExpectedAlbum,
    ) -> Result<Map<String, Value>, Error> {
        let operation = Operation::ReadAlbum;
        let response = self.client.get_album(album_id).await?;
        expect_status(operation, &response, 200)?;

        let record = expect_object(operation, &response)?;
        let mismatches = expected.mismatches(&record);
        if !mismatches.is_empty() {
            return Err(Error::StateMismatch {
                album_id: album_id.to_string(),
                mismatches,
            });
        }

        info!(album_id = album_id, "Album matches expected state");
        Ok(record)
    }

    /// Sends a PATCH carrying only `fields` and checks the acknowledgement.
    #[instrument(skip(self, fields))]
    pub async fn partial_update(&self, album_id: &str, fields: &AlbumFields) -> Result<(), Error> {
        let operation = Operation::PartialUpdate;
        let response = self.client.patch_album(album_id, fields).await?;
        expect_status(operation, &response, 200)?;
        expect_exact_body(operation, &response, &UpdateAcknowledgement::single_modified())?;

        info!(album_id = album_id, "Partial update acknowledged");
        Ok(())
    }

    /// Sends a PUT carrying `fields` and checks the acknowledgement.
    ///
    /// Fields left unset in `fields` are omitted from the body, which the
    /// service treats as resetting them to `null`.
    #[instrument(skip(self, fields))]
    pub async fn full_replace(&self, album_id: &str, fields: &AlbumFields) -> Result<(), Error> {
        let operation = Operation::FullReplace;
        let response = self.client.put_album(album_id, fields).await?;
        expect_status(operation, &response, 200)?;
        expect_exact_body(operation, &response, &UpdateAcknowledgement::single_modified())?;

        info!(album_id = album_id, "Full replacement acknowledged");
        Ok(())
    }

    /// Deletes an album and checks that exactly one record was removed.
    #[instrument(skip(self))]
    pub async fn delete(&self, album_id: &str) -> Result<(), Error> {
        let operation = Operation::DeleteAlbum;
        let response = self.client.delete_album(album_id).await?;
        expect_status(operation, &response, 200)?;
        expect_exact_body(operation, &response, &DeleteAcknowledgement::single_deleted())?;

        info!(album_id = album_id, "Album deleted");
        Ok(())
    }

    /// Checks that reading `album_id` now answers `404 Not Found`.
    #[instrument(skip(self))]
    pub async fn verify_absent(&self, album_id: &str) -> Result<(), Error> {
        let response = self.client.get_album(album_id).await?;
        expect_status(Operation::ReadDeletedAlbum, &response, 404)?;

        info!(album_id = album_id, "Deleted album no longer resolves");
        Ok(())
    }

    /// Deletes an album at the end of a check.
    ///
    /// Only the status code is checked. A failed cleanup is logged and
    /// returned; the album is left behind.
    #[instrument(skip(self))]
    pub async fn cleanup(&self, album_id: &str) -> Result<(), Error> {
        let result = match self.client.delete_album(album_id).await {
            Ok(response) => expect_status(Operation::Cleanup, &response, 200),
            Err(e) => Err(e.into()),
        };

        match &result {
            Ok(()) => info!(album_id = album_id, "Cleaned up test album"),
            Err(e) => warn!(
                album_id = album_id,
                error = %e,
                "Failed to clean up test album - it may be left behind"
            ),
        }
        result
    }
}

/// One album being driven through its lifecycle.
///
/// Every successful operation is folded into [`AlbumLifecycle::expected`], so
/// [`AlbumLifecycle::verify`] always checks the state the service should have
/// converged to. Operations that the current [`LifecycleState`] does not allow
/// fail with `Error::InvalidTransition` without sending a request.
#[derive(Debug)]
pub struct AlbumLifecycle<'v> {
    verifier: &'v LifecycleVerifier,
    album_id: String,
    expected: ExpectedAlbum,
    state: LifecycleState,
}

impl<'v> AlbumLifecycle<'v> {
    pub fn album_id(&self) -> &str {
        &self.album_id
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// The projection the next [`verify`](Self::verify) checks against.
    pub fn expected(&self) -> &ExpectedAlbum {
        &self.expected
    }

    /// Mutable access to the projection, for checks that need to assert more
    /// (or less) than the applied operations imply.
    pub fn expected_mut(&mut self) -> &mut ExpectedAlbum {
        &mut self.expected
    }

    /// Reads the album back and checks it against the layered projection.
    pub async fn verify(&self) -> Result<Map<String, Value>, Error> {
        self.ensure_allowed(Operation::ReadAlbum)?;
        self.verifier
            .read_and_verify(&self.album_id, &self.expected)
            .await
    }

    pub async fn partial_update(&mut self, fields: &AlbumFields) -> Result<(), Error> {
        self.ensure_allowed(Operation::PartialUpdate)?;
        self.verifier.partial_update(&self.album_id, fields).await?;
        self.expected.apply_partial(fields);
        self.state = LifecycleState::PartiallyUpdated;
        Ok(())
    }

    pub async fn full_replace(&mut self, fields: &AlbumFields) -> Result<(), Error> {
        self.ensure_allowed(Operation::FullReplace)?;
        self.verifier.full_replace(&self.album_id, fields).await?;
        self.expected.apply_replace(fields);
        self.state = LifecycleState::FullyReplaced;
        Ok(())
    }

    pub async fn delete(&mut self) -> Result<(), Error> {
        self.ensure_allowed(Operation::DeleteAlbum)?;
        self.verifier.delete(&self.album_id).await?;
        self.state = LifecycleState::Deleted;
        Ok(())
    }

    /// Checks that the deleted album no longer resolves.
    pub async fn verify_absent(&self) -> Result<(), Error> {
        self.ensure_allowed(Operation::ReadDeletedAlbum)?;
        self.verifier.verify_absent(&self.album_id).await
    }

    /// Deletes the album unless it is already deleted.
    pub async fn cleanup(self) -> Result<(), Error> {
        if self.state == LifecycleState::Deleted {
            return Ok(());
        }
        self.verifier.cleanup(&self.album_id).await
    }

    fn ensure_allowed(&self, operation: Operation) -> Result<(), Error> {
        if self.state.allows(operation) {
            Ok(())
        } else {
            Err(Error::InvalidTransition {
                album_id: self.album_id.clone(),
                state: self.state,
                operation,
            })
        }
    }
}
