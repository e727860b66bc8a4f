//! Stateful fake of the albums CRUD service.
//!
//! Behaves the way the hosted service is documented to behave: PATCH merges
//! the supplied fields, PUT resets omitted fields to `null`, DELETE removes the
//! record so later reads answer 404, and mutations answer with Mongo-style
//! acknowledgements.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use api_client::{AlbumField, ALBUM_CREATED_MESSAGE};
use serde_json::{json, Map, Value};
use tracing::debug;
use uuid::Uuid;
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

#[cfg(test)]
#[path = "albums_tests.rs"]
mod tests;

const ALBUM_PATH_PATTERN: &str = r"^/albums/[^/]+$";

type AlbumRecord = Map<String, Value>;

/// How the fake applies a PUT.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PutBehavior {
    /// Omitted fields become `null`.
    Replace,
    /// Omitted fields keep their value, like a PATCH.
    Merge,
}

/// Knobs for making the fake deviate from the documented contract.
#[derive(Debug, Clone)]
pub struct AlbumsFakeOptions {
    pub put_behavior: PutBehavior,
    /// Message returned by a successful create.
    pub creation_message: String,
    /// When false, DELETE acknowledges one deletion but keeps the record.
    pub delete_removes: bool,
}

impl Default for AlbumsFakeOptions {
    fn default() -> Self {
        Self {
            put_behavior: PutBehavior::Replace,
            creation_message: ALBUM_CREATED_MESSAGE.to_string(),
            delete_removes: true,
        }
    }
}

#[derive(Debug, Clone, Default)]
struct AlbumStore {
    records: Arc<Mutex<HashMap<String, AlbumRecord>>>,
}

impl AlbumStore {
    fn lock(&self) -> MutexGuard<'_, HashMap<String, AlbumRecord>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// A running fake albums service.
pub struct FakeAlbumsService {
    server: MockServer,
    store: AlbumStore,
}

impl FakeAlbumsService {
    /// Start a fake that honours the documented contract.
    pub async fn start() -> Self {
        Self::start_with(AlbumsFakeOptions::default()).await
    }

    /// Start a fake with the given deviations.
    pub async fn start_with(options: AlbumsFakeOptions) -> Self {
        let server = MockServer::start().await;
        let store = AlbumStore::default();

        Mock::given(method("POST"))
            .and(path("/albums"))
            .respond_with(CreateAlbum {
                store: store.clone(),
                message: options.creation_message.clone(),
            })
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path_regex(ALBUM_PATH_PATTERN))
            .respond_with(GetAlbum {
                store: store.clone(),
            })
            .mount(&server)
            .await;

        Mock::given(method("PATCH"))
            .and(path_regex(ALBUM_PATH_PATTERN))
            .respond_with(UpdateAlbum {
                store: store.clone(),
                behavior: PutBehavior::Merge,
            })
            .mount(&server)
            .await;

        Mock::given(method("PUT"))
            .and(path_regex(ALBUM_PATH_PATTERN))
            .respond_with(UpdateAlbum {
                store: store.clone(),
                behavior: options.put_behavior,
            })
            .mount(&server)
            .await;

        Mock::given(method("DELETE"))
            .and(path_regex(ALBUM_PATH_PATTERN))
            .respond_with(DeleteAlbum {
                store: store.clone(),
                removes: options.delete_removes,
            })
            .mount(&server)
            .await;

        Self { server, store }
    }

    /// Base URI of the fake.
    pub fn uri(&self) -> String {
        self.server.uri()
    }

    /// The stored record for `album_id`, if it exists.
    pub fn album(&self, album_id: &str) -> Option<Map<String, Value>> {
        self.store.lock().get(album_id).cloned()
    }

    /// Number of albums currently stored.
    pub fn album_count(&self) -> usize {
        self.store.lock().len()
    }

    /// Number of requests received with the given HTTP method.
    pub async fn request_count(&self, http_method: &str) -> usize {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|request| request.method.as_str().eq_ignore_ascii_case(http_method))
            .count()
    }
}

fn album_id_from(request: &Request) -> String {
    request
        .url
        .path()
        .rsplit('/')
        .next()
        .unwrap_or_default()
        .to_string()
}

fn bad_request(reason: &str) -> ResponseTemplate {
    ResponseTemplate::new(400).set_body_json(json!({ "message": reason }))
}

fn not_found() -> ResponseTemplate {
    ResponseTemplate::new(404).set_body_json(json!({ "message": "Album not found" }))
}

/// Copies every album field present in `body` into `record`.
///
/// Returns true if any stored value changed.
fn merge_fields(record: &mut AlbumRecord, body: &Map<String, Value>) -> bool {
    let mut changed = false;
    for field in AlbumField::ALL {
        if let Some(value) = body.get(field.as_str()) {
            let previous = record.insert(field.as_str().to_string(), value.clone());
            changed |= previous.as_ref() != Some(value);
        }
    }
    changed
}

/// Sets every album field from `body`, using `null` for omitted ones.
fn replace_fields(record: &mut AlbumRecord, body: &Map<String, Value>) -> bool {
    let mut changed = false;
    for field in AlbumField::ALL {
        let value = body.get(field.as_str()).cloned().unwrap_or(Value::Null);
        let previous = record.insert(field.as_str().to_string(), value.clone());
        changed |= previous != Some(value);
    }
    changed
}

struct CreateAlbum {
    store: AlbumStore,
    message: String,
}

impl Respond for CreateAlbum {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let Ok(body) = request.body_json::<Map<String, Value>>() else {
            return bad_request("Request body must be a JSON object");
        };

        let album_id = Uuid::new_v4().simple().to_string();
        let mut record: AlbumRecord = AlbumField::ALL
            .iter()
            .map(|field| (field.as_str().to_string(), Value::Null))
            .collect();
        merge_fields(&mut record, &body);
        record.insert("album_id".to_string(), Value::String(album_id.clone()));

        debug!(album_id = %album_id, "Fake albums service created album");
        self.store.lock().insert(album_id.clone(), record);

        ResponseTemplate::new(201).set_body_json(json!({
            "album_id": album_id,
            "message": self.message,
        }))
    }
}

struct GetAlbum {
    store: AlbumStore,
}

impl Respond for GetAlbum {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        match self.store.lock().get(&album_id_from(request)) {
            Some(record) => ResponseTemplate::new(200).set_body_json(record),
            None => not_found(),
        }
    }
}

struct UpdateAlbum {
    store: AlbumStore,
    behavior: PutBehavior,
}

impl Respond for UpdateAlbum {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let Ok(body) = request.body_json::<Map<String, Value>>() else {
            return bad_request("Request body must be a JSON object");
        };

        let mut records = self.store.lock();
        let (matched, modified) = match records.get_mut(&album_id_from(request)) {
            Some(record) => {
                let changed = match self.behavior {
                    PutBehavior::Merge => merge_fields(record, &body),
                    PutBehavior::Replace => replace_fields(record, &body),
                };
                (1, u64::from(changed))
            }
            None => (0, 0),
        };

        ResponseTemplate::new(200).set_body_json(json!({
            "acknowledged": true,
            "modifiedCount": modified,
            "upsertedId": null,
            "upsertedCount": 0,
            "matchedCount": matched,
        }))
    }
}

struct DeleteAlbum {
    store: AlbumStore,
    removes: bool,
}

impl Respond for DeleteAlbum {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let album_id = album_id_from(request);
        let mut records = self.store.lock();

        let deleted = if self.removes {
            records.remove(&album_id).is_some()
        } else {
            records.contains_key(&album_id)
        };

        ResponseTemplate::new(200).set_body_json(json!({
            "acknowledged": true,
            "deletedCount": u64::from(deleted),
        }))
    }
}
