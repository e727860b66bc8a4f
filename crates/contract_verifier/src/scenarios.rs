//! The concrete contract scenarios.
//!
//! Each scenario is self-contained: album scenarios create the album they work
//! on and remove it at the end. A failing step aborts the scenario immediately,
//! so an album created by a failed scenario is left behind.

use std::time::Duration;

use api_client::{AlbumFields, NewPost};
use tracing::info;

use crate::errors::Error;
use crate::expected::ExpectedAlbum;
use crate::lifecycle::LifecycleVerifier;
use crate::spot_checks::SpotChecker;

#[cfg(test)]
#[path = "scenarios_tests.rs"]
mod tests;

/// Username that must exist in the placeholder `/users` collection.
pub const EXPECTED_USERNAME: &str = "Samantha";

/// Album created at the start of every album scenario.
pub fn initial_album() -> AlbumFields {
    AlbumFields {
        title: Some("Chronicles of a Test Runner".to_string()),
        artist: Some("The Virtual Virtuosos".to_string()),
        genre: Some("Synth-Pop".to_string()),
        label: Some("Test Records".to_string()),
        songs: Some(11),
        year: Some(2025),
    }
}

/// Partial update changing title, song count and year.
pub fn updated_album() -> AlbumFields {
    AlbumFields {
        title: Some("Echoes of the Code".to_string()),
        songs: Some(14),
        year: Some(2026),
        ..Default::default()
    }
}

/// Full replacement carrying the post-update state minus genre and year.
pub fn replacement_without_genre_and_year() -> AlbumFields {
    let initial = initial_album();
    let updated = updated_album();
    AlbumFields {
        title: updated.title,
        artist: initial.artist,
        label: initial.label,
        songs: updated.songs,
        genre: None,
        year: None,
    }
}

/// Post submitted to the placeholder API.
pub fn new_post() -> NewPost {
    NewPost {
        title: "My New Post Title".to_string(),
        body: "This is the body of my new post.".to_string(),
        user_id: 1,
    }
}

/// Creates an album with every field set and reads all of it back.
pub async fn create_and_validate(verifier: &LifecycleVerifier) -> Result<(), Error> {
    let fields = initial_album();
    let album_id = verifier.create(&fields).await?;

    let expected = ExpectedAlbum::after_create(album_id.clone(), &fields);
    verifier.read_and_verify(&album_id, &expected).await?;

    verifier.cleanup(&album_id).await?;
    info!(album_id = %album_id, "Create scenario passed");
    Ok(())
}

/// Changes title, songs and year with a PATCH; artist, genre and label must
/// keep their original values.
pub async fn partial_update_and_validate(verifier: &LifecycleVerifier) -> Result<(), Error> {
    let mut album = verifier.begin(&initial_album()).await?;

    album.partial_update(&updated_album()).await?;
    album.verify().await?;

    let album_id = album.album_id().to_string();
    album.cleanup().await?;
    info!(album_id = %album_id, "Partial update scenario passed");
    Ok(())
}

/// Applies the partial update, then a PUT omitting genre and year; both must
/// read back as `null` while every other field keeps its last value.
pub async fn replace_by_omission_and_validate(verifier: &LifecycleVerifier) -> Result<(), Error> {
    let mut album = verifier.begin(&initial_album()).await?;
    album.partial_update(&updated_album()).await?;

    album
        .full_replace(&replacement_without_genre_and_year())
        .await?;
    album.verify().await?;

    let album_id = album.album_id().to_string();
    album.cleanup().await?;
    info!(album_id = %album_id, "Replace-by-omission scenario passed");
    Ok(())
}

/// Deletes an album; reading it afterwards must answer 404.
pub async fn delete_and_validate(verifier: &LifecycleVerifier) -> Result<(), Error> {
    let mut album = verifier.begin(&initial_album()).await?;

    album.delete().await?;
    album.verify_absent().await?;

    info!(album_id = %album.album_id(), "Delete scenario passed");
    Ok(())
}

/// `GET /users` must contain a user named [`EXPECTED_USERNAME`].
pub async fn user_lookup(checker: &SpotChecker) -> Result<(), Error> {
    let user = checker.find_user_by_username(EXPECTED_USERNAME).await?;
    info!(user_id = %user["id"], "User lookup scenario passed");
    Ok(())
}

/// `POST /posts` must echo the submitted post and assign an id.
pub async fn post_creation_echo(checker: &SpotChecker) -> Result<(), Error> {
    checker.create_post_echo(&new_post()).await?;
    info!("Post creation scenario passed");
    Ok(())
}

/// `GET /posts` must respond within `budget`.
pub async fn posts_latency(checker: &SpotChecker, budget: Duration) -> Result<(), Error> {
    let elapsed = checker.posts_within_budget(budget).await?;
    info!(
        elapsed_ms = elapsed.as_millis() as u64,
        "Latency scenario passed"
    );
    Ok(())
}
