use super::*;
use api_client::{AlbumFields, AlbumsClient};
use std::time::Duration;

fn client_for(fake: &FakeAlbumsService) -> AlbumsClient {
    AlbumsClient::new(&fake.uri(), Duration::from_secs(5)).unwrap()
}

fn full_album() -> AlbumFields {
    AlbumFields {
        title: Some("Chronicles of a Test Runner".to_string()),
        artist: Some("The Virtual Virtuosos".to_string()),
        genre: Some("Synth-Pop".to_string()),
        label: Some("Test Records".to_string()),
        songs: Some(11),
        year: Some(2025),
    }
}

async fn create(client: &AlbumsClient, fields: &AlbumFields) -> String {
    let response = client.create_album(fields).await.unwrap();
    assert_eq!(response.status_code(), 201);
    let body = response.json_value().unwrap();
    body["album_id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_create_stores_record_with_nulls_for_unset_fields() {
    let fake = FakeAlbumsService::start().await;
    let client = client_for(&fake);

    let album_id = create(
        &client,
        &AlbumFields {
            title: Some("Only a title".to_string()),
            ..Default::default()
        },
    )
    .await;

    let record = fake.album(&album_id).unwrap();
    assert_eq!(record["title"], json!("Only a title"));
    assert_eq!(record["genre"], Value::Null);
    assert_eq!(record["album_id"], json!(album_id));
    assert_eq!(fake.album_count(), 1);
}

#[tokio::test]
async fn test_create_answers_with_documented_message() {
    let fake = FakeAlbumsService::start().await;
    let client = client_for(&fake);

    let response = client.create_album(&full_album()).await.unwrap();

    let body = response.json_value().unwrap();
    assert_eq!(body["message"], json!("Album created succesfully"));
}

#[tokio::test]
async fn test_patch_merges_supplied_fields() {
    let fake = FakeAlbumsService::start().await;
    let client = client_for(&fake);
    let album_id = create(&client, &full_album()).await;

    let response = client
        .patch_album(
            &album_id,
            &AlbumFields {
                songs: Some(14),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(response.json_value().unwrap()["modifiedCount"], json!(1));
    let record = fake.album(&album_id).unwrap();
    assert_eq!(record["songs"], json!(14));
    assert_eq!(record["genre"], json!("Synth-Pop"));
}

#[tokio::test]
async fn test_patch_with_same_values_modifies_nothing() {
    let fake = FakeAlbumsService::start().await;
    let client = client_for(&fake);
    let album_id = create(&client, &full_album()).await;

    let response = client.patch_album(&album_id, &full_album()).await.unwrap();

    let ack = response.json_value().unwrap();
    assert_eq!(ack["matchedCount"], json!(1));
    assert_eq!(ack["modifiedCount"], json!(0));
}

#[tokio::test]
async fn test_put_nulls_omitted_fields() {
    let fake = FakeAlbumsService::start().await;
    let client = client_for(&fake);
    let album_id = create(&client, &full_album()).await;

    client
        .put_album(
            &album_id,
            &AlbumFields {
                title: Some("Echoes of the Code".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let record = fake.album(&album_id).unwrap();
    assert_eq!(record["title"], json!("Echoes of the Code"));
    assert_eq!(record["artist"], Value::Null);
    assert_eq!(record["year"], Value::Null);
}

#[tokio::test]
async fn test_put_merge_behavior_keeps_omitted_fields() {
    let fake = FakeAlbumsService::start_with(AlbumsFakeOptions {
        put_behavior: PutBehavior::Merge,
        ..Default::default()
    })
    .await;
    let client = client_for(&fake);
    let album_id = create(&client, &full_album()).await;

    client
        .put_album(
            &album_id,
            &AlbumFields {
                title: Some("Echoes of the Code".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let record = fake.album(&album_id).unwrap();
    assert_eq!(record["year"], json!(2025));
}

#[tokio::test]
async fn test_update_of_unknown_album_matches_nothing() {
    let fake = FakeAlbumsService::start().await;
    let client = client_for(&fake);

    let response = client
        .patch_album("does-not-exist", &full_album())
        .await
        .unwrap();

    assert_eq!(response.status_code(), 200);
    assert_eq!(response.json_value().unwrap()["matchedCount"], json!(0));
}

#[tokio::test]
async fn test_delete_then_get_is_not_found() {
    let fake = FakeAlbumsService::start().await;
    let client = client_for(&fake);
    let album_id = create(&client, &full_album()).await;

    let delete = client.delete_album(&album_id).await.unwrap();
    let get = client.get_album(&album_id).await.unwrap();

    assert_eq!(
        delete.json_value().unwrap(),
        json!({ "acknowledged": true, "deletedCount": 1 })
    );
    assert_eq!(get.status_code(), 404);
    assert_eq!(fake.album_count(), 0);
    assert_eq!(fake.request_count("DELETE").await, 1);
}

#[tokio::test]
async fn test_delete_that_does_not_remove_keeps_record() {
    let fake = FakeAlbumsService::start_with(AlbumsFakeOptions {
        delete_removes: false,
        ..Default::default()
    })
    .await;
    let client = client_for(&fake);
    let album_id = create(&client, &full_album()).await;

    let delete = client.delete_album(&album_id).await.unwrap();
    let get = client.get_album(&album_id).await.unwrap();

    assert_eq!(delete.json_value().unwrap()["deletedCount"], json!(1));
    assert_eq!(get.status_code(), 200);
}

#[tokio::test]
async fn test_create_rejects_non_json_body() {
    let fake = FakeAlbumsService::start().await;
    let client = client_for(&fake);

    let response = client
        .api()
        .post_json("/albums", &json!(["not", "an", "object"]))
        .await
        .unwrap();

    assert_eq!(response.status_code(), 400);
    assert_eq!(fake.album_count(), 0);
}
