use super::*;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ALBUM_ID: &str = "65f1c0ffee";

async fn client_for(server: &MockServer) -> AlbumsClient {
    AlbumsClient::new(&server.uri(), Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_create_album_posts_all_supplied_fields() {
    let mock_server = MockServer::start().await;
    let fields = AlbumFields {
        title: Some("Chronicles of a Test Runner".to_string()),
        artist: Some("The Virtual Virtuosos".to_string()),
        songs: Some(11),
        ..Default::default()
    };

    Mock::given(method("POST"))
        .and(path("/albums"))
        .and(body_json(json!({
            "title": "Chronicles of a Test Runner",
            "artist": "The Virtual Virtuosos",
            "songs": 11
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "album_id": ALBUM_ID,
            "message": "Album created succesfully"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server).await;
    let response = client.create_album(&fields).await.unwrap();

    assert_eq!(response.status_code(), 201);
    let created = response.json_value().unwrap();
    assert_eq!(created["album_id"], json!(ALBUM_ID));
}

#[tokio::test]
async fn test_get_album_uses_id_in_path() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/albums/{ALBUM_ID}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "album_id": ALBUM_ID,
            "title": "Echoes of the Code",
            "genre": null
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server).await;
    let response = client.get_album(ALBUM_ID).await.unwrap();

    let album = response.json_value().unwrap();
    assert_eq!(album["title"], json!("Echoes of the Code"));
    assert_eq!(album["genre"], json!(null));
}

#[tokio::test]
async fn test_patch_album_sends_only_changed_fields() {
    let mock_server = MockServer::start().await;
    let fields = AlbumFields {
        title: Some("Echoes of the Code".to_string()),
        year: Some(2026),
        ..Default::default()
    };

    Mock::given(method("PATCH"))
        .and(path(format!("/albums/{ALBUM_ID}")))
        .and(body_json(json!({ "title": "Echoes of the Code", "year": 2026 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "acknowledged": true,
            "modifiedCount": 1,
            "upsertedId": null,
            "upsertedCount": 0,
            "matchedCount": 1
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server).await;
    let response = client.patch_album(ALBUM_ID, &fields).await.unwrap();

    let ack: crate::UpdateAcknowledgement =
        serde_json::from_value(response.json_value().unwrap()).unwrap();
    assert_eq!(ack, crate::UpdateAcknowledgement::single_modified());
}

#[tokio::test]
async fn test_put_album_omits_unset_fields() {
    let mock_server = MockServer::start().await;
    let fields = AlbumFields {
        title: Some("Echoes of the Code".to_string()),
        artist: Some("The Virtual Virtuosos".to_string()),
        label: Some("Test Records".to_string()),
        songs: Some(14),
        ..Default::default()
    };

    Mock::given(method("PUT"))
        .and(path(format!("/albums/{ALBUM_ID}")))
        .and(body_json(json!({
            "title": "Echoes of the Code",
            "artist": "The Virtual Virtuosos",
            "label": "Test Records",
            "songs": 14
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "acknowledged": true,
            "modifiedCount": 1,
            "upsertedId": null,
            "upsertedCount": 0,
            "matchedCount": 1
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server).await;
    let response = client.put_album(ALBUM_ID, &fields).await.unwrap();

    assert_eq!(response.status_code(), 200);
}

#[tokio::test]
async fn test_delete_album() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path(format!("/albums/{ALBUM_ID}")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "acknowledged": true, "deletedCount": 1 })),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server).await;
    let response = client.delete_album(ALBUM_ID).await.unwrap();

    let ack: crate::DeleteAcknowledgement =
        serde_json::from_value(response.json_value().unwrap()).unwrap();
    assert_eq!(ack, crate::DeleteAcknowledgement::single_deleted());
}
