//! Fake of the generic placeholder API.
//!
//! Serves a fixed `/users` collection, echoes `POST /posts` with a new id, and
//! answers `GET /posts` after a configurable delay.

use std::time::Duration;

use serde_json::{json, Map, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

#[cfg(test)]
#[path = "placeholder_tests.rs"]
mod tests;

/// Configuration of the fake placeholder API.
#[derive(Debug, Clone)]
pub struct PlaceholderFakeOptions {
    /// Body served by `GET /users`.
    pub users: Vec<Value>,
    /// Id assigned to every created post.
    pub new_post_id: Value,
    /// Delay before `GET /posts` answers.
    pub posts_delay: Duration,
}

impl Default for PlaceholderFakeOptions {
    fn default() -> Self {
        Self {
            users: default_users(),
            new_post_id: json!(101),
            posts_delay: Duration::ZERO,
        }
    }
}

/// A small sample of the users the hosted service serves.
pub fn default_users() -> Vec<Value> {
    vec![
        json!({
            "id": 1,
            "name": "Leanne Graham",
            "username": "Bret",
            "email": "Sincere@april.biz"
        }),
        json!({
            "id": 2,
            "name": "Ervin Howell",
            "username": "Antonette",
            "email": "Shanna@melissa.tv"
        }),
        json!({
            "id": 3,
            "name": "Clementine Bauch",
            "username": "Samantha",
            "email": "Nathan@yesenia.net"
        }),
    ]
}

/// A running fake placeholder API.
pub struct FakePlaceholderService {
    server: MockServer,
}

impl FakePlaceholderService {
    pub async fn start() -> Self {
        Self::start_with(PlaceholderFakeOptions::default()).await
    }

    pub async fn start_with(options: PlaceholderFakeOptions) -> Self {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/users"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&options.users))
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/posts"))
            .respond_with(EchoPost {
                id: options.new_post_id.clone(),
            })
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/posts"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(sample_posts())
                    .set_delay(options.posts_delay),
            )
            .mount(&server)
            .await;

        Self { server }
    }

    /// Base URI of the fake.
    pub fn uri(&self) -> String {
        self.server.uri()
    }
}

fn sample_posts() -> Value {
    json!([
        {
            "userId": 1,
            "id": 1,
            "title": "sunt aut facere repellat provident occaecati excepturi optio reprehenderit",
            "body": "quia et suscipit"
        },
        {
            "userId": 1,
            "id": 2,
            "title": "qui est esse",
            "body": "est rerum tempore vitae"
        }
    ])
}

struct EchoPost {
    id: Value,
}

impl Respond for EchoPost {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        match request.body_json::<Map<String, Value>>() {
            Ok(mut post) => {
                post.insert("id".to_string(), self.id.clone());
                ResponseTemplate::new(201).set_body_json(post)
            }
            Err(_) => ResponseTemplate::new(400).set_body_json(json!({})),
        }
    }
}
