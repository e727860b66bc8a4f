//! Stateless spot checks against the placeholder API.
//!
//! Each check is independent of the others and of the albums lifecycle; they
//! may run in any order.

use std::time::{Duration, Instant};

use api_client::{NewPost, PlaceholderClient};
use serde_json::{Map, Value};
use tracing::{info, instrument};

use crate::errors::{Error, Operation};
use crate::response::{expect_object, expect_status};

#[cfg(test)]
#[path = "spot_checks_tests.rs"]
mod tests;

/// Runs spot checks through a placeholder client.
#[derive(Debug, Clone)]
pub struct SpotChecker {
    client: PlaceholderClient,
}

impl SpotChecker {
    pub fn new(client: PlaceholderClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &PlaceholderClient {
        &self.client
    }

    /// Fetches the collection at `path` and returns the first element whose
    /// `field` equals `value`.
    ///
    /// # Errors
    ///
    /// - `Error::UnexpectedStatus` unless the service answers `200 OK`.
    /// - `Error::MalformedBody` if the body is not a JSON array.
    /// - `Error::NoMatchingElement` if no element matches.
    #[instrument(skip(self, value), fields(value = %value))]
    pub async fn find_matching(
        &self,
        path: &str,
        field: &str,
        value: &Value,
    ) -> Result<Value, Error> {
        let operation = Operation::ReadCollection;
        let response = self.client.api().get(path).await?;
        expect_status(operation, &response, 200)?;

        let elements = match serde_json::from_str::<Value>(&response.body) {
            Ok(Value::Array(elements)) => elements,
            _ => {
                return Err(Error::MalformedBody {
                    operation,
                    expected: "a JSON array",
                    body: response.body.clone(),
                });
            }
        };

        let total = elements.len();
        let found = elements
            .into_iter()
            .find(|element| element.get(field) == Some(value))
            .ok_or_else(|| Error::NoMatchingElement {
                path: path.to_string(),
                field: field.to_string(),
                value: value.clone(),
            })?;

        info!(total = total, "Found matching element");
        Ok(found)
    }

    /// Requires at least one user with exactly `username`.
    ///
    /// Returns the matching user as served. Only `username` is checked.
    pub async fn find_user_by_username(&self, username: &str) -> Result<Value, Error> {
        self.find_matching("/users", "username", &Value::from(username)).await
    }

    /// Creates a post and requires the response to echo every submitted field
    /// and carry a newly assigned `id`.
    ///
    /// Returns the echoed post.
    #[instrument(skip(self, post))]
    pub async fn create_post_echo(&self, post: &NewPost) -> Result<Map<String, Value>, Error> {
        let operation = Operation::CreatePost;
        let response = self.client.create_post(post).await?;
        expect_status(operation, &response, 201)?;

        let echoed = expect_object(operation, &response)?;

        let submitted = [
            ("title", Value::from(post.title.as_str())),
            ("body", Value::from(post.body.as_str())),
            ("userId", Value::from(post.user_id)),
        ];
        for (field, expected) in submitted {
            match echoed.get(field) {
                Some(actual) if *actual == expected => {}
                Some(actual) => {
                    return Err(Error::UnexpectedValue {
                        operation,
                        field: field.to_string(),
                        expected,
                        actual: actual.clone(),
                    });
                }
                None => {
                    return Err(Error::MissingField {
                        operation,
                        field: field.to_string(),
                    });
                }
            }
        }

        match echoed.get("id") {
            Some(id) if !id.is_null() => info!(id = %id, "Post created"),
            _ => {
                return Err(Error::MissingField {
                    operation,
                    field: "id".to_string(),
                });
            }
        }

        Ok(echoed)
    }

    /// Times one `GET /posts` and requires it to finish within `budget`.
    ///
    /// Timing is compared at millisecond resolution. This is an environmental
    /// check: network conditions alone can make it fail.
    ///
    /// Returns the measured elapsed time.
    #[instrument(skip(self))]
    pub async fn posts_within_budget(&self, budget: Duration) -> Result<Duration, Error> {
        let started = Instant::now();
        let response = self.client.list_posts().await?;
        let elapsed = started.elapsed();

        expect_status(Operation::ListPosts, &response, 200)?;

        info!(
            elapsed_ms = elapsed.as_millis() as u64,
            budget_ms = budget.as_millis() as u64,
            "GET /posts response time"
        );

        if elapsed.as_millis() > budget.as_millis() {
            return Err(Error::LatencyExceeded {
                path: "/posts".to_string(),
                elapsed_ms: elapsed.as_millis(),
                budget_ms: budget.as_millis(),
            });
        }
        Ok(elapsed)
    }
}
