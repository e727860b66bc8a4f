//! Expected-state projections for album records.
//!
//! A projection is built by replaying the operations a check has applied, in
//! order. Only the fields it mentions are asserted when the record is read
//! back, which lets a check state exactly what it knows and nothing more.

use std::collections::BTreeMap;

use api_client::{AlbumField, AlbumFields};
use serde_json::{Map, Value};

use crate::errors::FieldMismatch;

#[cfg(test)]
#[path = "expected_tests.rs"]
mod tests;

/// The partial state an album is expected to have.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpectedAlbum {
    album_id: Option<String>,
    fields: BTreeMap<AlbumField, Value>,
}

impl ExpectedAlbum {
    /// A projection that asserts nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// The state right after creating an album from `fields`.
    ///
    /// Fields not supplied on creation are left unasserted.
    pub fn after_create(album_id: impl Into<String>, fields: &AlbumFields) -> Self {
        let mut expected = Self::new().with_album_id(album_id);
        expected.apply_partial(fields);
        expected
    }

    /// Also expect the record's `album_id` to equal `album_id`.
    pub fn with_album_id(mut self, album_id: impl Into<String>) -> Self {
        self.album_id = Some(album_id.into());
        self
    }

    /// Layers a partial update: supplied fields change, others keep their
    /// expectation.
    pub fn apply_partial(&mut self, fields: &AlbumFields) {
        for (field, value) in fields.supplied() {
            self.fields.insert(field, value);
        }
    }

    /// Layers a full replacement: supplied fields change and every field the
    /// payload omits is expected to be `null`.
    pub fn apply_replace(&mut self, fields: &AlbumFields) {
        for field in AlbumField::ALL {
            let value = fields.get(field).unwrap_or(Value::Null);
            self.fields.insert(field, value);
        }
    }

    /// Expects `field` to hold `value`.
    pub fn expect(mut self, field: AlbumField, value: impl Into<Value>) -> Self {
        self.fields.insert(field, value.into());
        self
    }

    /// Expects `field` to be `null`.
    pub fn expect_null(self, field: AlbumField) -> Self {
        self.expect(field, Value::Null)
    }

    /// Stops asserting `field`.
    pub fn forget(&mut self, field: AlbumField) {
        self.fields.remove(&field);
    }

    pub fn album_id(&self) -> Option<&str> {
        self.album_id.as_deref()
    }

    /// The expected value of `field`, if it is asserted.
    pub fn get(&self, field: AlbumField) -> Option<&Value> {
        self.fields.get(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.album_id.is_none() && self.fields.is_empty()
    }

    /// Compares a fetched record against this projection.
    ///
    /// Equality is strict: a key that is missing from the record does not
    /// satisfy an expected `null`. Returns every mismatch, in field order.
    pub fn mismatches(&self, record: &Map<String, Value>) -> Vec<FieldMismatch> {
        let id_check = self
            .album_id
            .as_ref()
            .map(|id| ("album_id", Value::String(id.clone())));
        let field_checks = self
            .fields
            .iter()
            .map(|(field, value)| (field.as_str(), value.clone()));

        id_check
            .into_iter()
            .chain(field_checks)
            .filter_map(|(key, expected)| {
                let actual = record.get(key);
                if actual == Some(&expected) {
                    None
                } else {
                    Some(FieldMismatch {
                        field: key.to_string(),
                        expected,
                        actual: actual.cloned(),
                    })
                }
            })
            .collect()
    }
}
