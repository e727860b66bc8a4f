//! Data models exchanged with the albums and placeholder services.
//!
//! Request payloads skip unset fields when serialized so that a partial update
//! only carries the fields it changes. Response records are checked as raw
//! JSON; only the fixed-shape acknowledgements are modelled.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

#[cfg(test)]
#[path = "models_tests.rs"]
mod tests;

/// The confirmation message the albums service returns on creation.
///
/// The spelling matches what the service sends.
pub const ALBUM_CREATED_MESSAGE: &str = "Album created succesfully";

/// The named, user-settable fields of an album record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AlbumField {
    Title,
    Artist,
    Genre,
    Label,
    Songs,
    Year,
}

impl AlbumField {
    /// Every album field, in the order the service documents them.
    pub const ALL: [AlbumField; 6] = [
        AlbumField::Title,
        AlbumField::Artist,
        AlbumField::Genre,
        AlbumField::Label,
        AlbumField::Songs,
        AlbumField::Year,
    ];

    /// The JSON key used for this field on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            AlbumField::Title => "title",
            AlbumField::Artist => "artist",
            AlbumField::Genre => "genre",
            AlbumField::Label => "label",
            AlbumField::Songs => "songs",
            AlbumField::Year => "year",
        }
    }
}

impl fmt::Display for AlbumField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A set of album fields sent in a create, PATCH or PUT request.
///
/// Fields left as `None` are omitted from the JSON body entirely. For a PATCH
/// that means "leave unchanged"; for a PUT the service resets them to `null`.
///
/// ## Examples
///
/// ```rust
/// use api_client::AlbumFields;
///
/// let patch = AlbumFields {
///     title: Some("Echoes of the Code".to_string()),
///     songs: Some(14),
///     ..Default::default()
/// };
/// assert_eq!(patch.supplied().len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlbumFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub songs: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<u32>,
}

impl AlbumFields {
    /// Returns the JSON value supplied for `field`, if any.
    pub fn get(&self, field: AlbumField) -> Option<Value> {
        match field {
            AlbumField::Title => self.title.clone().map(Value::from),
            AlbumField::Artist => self.artist.clone().map(Value::from),
            AlbumField::Genre => self.genre.clone().map(Value::from),
            AlbumField::Label => self.label.clone().map(Value::from),
            AlbumField::Songs => self.songs.map(Value::from),
            AlbumField::Year => self.year.map(Value::from),
        }
    }

    /// The fields this payload carries, with their JSON values.
    pub fn supplied(&self) -> Vec<(AlbumField, Value)> {
        AlbumField::ALL
            .iter()
            .filter_map(|field| self.get(*field).map(|value| (*field, value)))
            .collect()
    }
}

/// Acknowledgement returned by PATCH and PUT on an album.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAcknowledgement {
    pub acknowledged: bool,
    pub modified_count: u64,
    pub upserted_id: Option<Value>,
    pub upserted_count: u64,
    pub matched_count: u64,
}

impl UpdateAcknowledgement {
    /// The acknowledgement for an update that matched and modified exactly one
    /// record without upserting.
    pub fn single_modified() -> Self {
        Self {
            acknowledged: true,
            modified_count: 1,
            upserted_id: None,
            upserted_count: 0,
            matched_count: 1,
        }
    }
}

/// Acknowledgement returned by `DELETE /albums/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteAcknowledgement {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

impl DeleteAcknowledgement {
    /// The acknowledgement for a delete that removed exactly one record.
    pub fn single_deleted() -> Self {
        Self {
            acknowledged: true,
            deleted_count: 1,
        }
    }
}

/// Payload for `POST /posts`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPost {
    pub title: String,
    pub body: String,
    pub user_id: u64,
}

