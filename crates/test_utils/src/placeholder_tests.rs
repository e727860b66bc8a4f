use super::*;
use api_client::{NewPost, PlaceholderClient};

fn client_for(fake: &FakePlaceholderService) -> PlaceholderClient {
    PlaceholderClient::new(&fake.uri(), Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_users_include_samantha() {
    let fake = FakePlaceholderService::start().await;

    let response = client_for(&fake).list_users().await.unwrap();

    let users = response.json_value().unwrap();
    let usernames: Vec<&str> = users
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|user| user["username"].as_str())
        .collect();
    assert!(usernames.contains(&"Samantha"));
}

#[tokio::test]
async fn test_post_is_echoed_with_new_id() {
    let fake = FakePlaceholderService::start().await;
    let post = NewPost {
        title: "t".to_string(),
        body: "b".to_string(),
        user_id: 7,
    };

    let response = client_for(&fake).create_post(&post).await.unwrap();

    assert_eq!(response.status_code(), 201);
    assert_eq!(
        response.json_value().unwrap(),
        json!({ "title": "t", "body": "b", "userId": 7, "id": 101 })
    );
}

#[tokio::test]
async fn test_posts_delay_is_applied() {
    let fake = FakePlaceholderService::start_with(PlaceholderFakeOptions {
        posts_delay: Duration::from_millis(150),
        ..Default::default()
    })
    .await;

    let response = client_for(&fake).list_posts().await.unwrap();

    assert_eq!(response.status_code(), 200);
    assert!(response.elapsed >= Duration::from_millis(150));
}
