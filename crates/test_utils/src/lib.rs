//! Test utilities for contract verification tests.
//!
//! This crate provides in-process fakes of the two remote services, built on
//! wiremock. The fakes keep state between requests, so a whole album lifecycle
//! can be exercised offline, and they expose knobs that make them break the
//! contract in specific ways so tests can prove the verifier notices.

pub mod albums;
pub use albums::{AlbumsFakeOptions, FakeAlbumsService, PutBehavior};

pub mod placeholder;
pub use placeholder::{FakePlaceholderService, PlaceholderFakeOptions};
