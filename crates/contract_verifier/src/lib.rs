//! Contract verification for the albums CRUD service and the placeholder API.
//!
//! The crate sends real requests through [`api_client`] and checks every
//! response against the services' documented contracts:
//!
//! - [`LifecycleVerifier`] / [`AlbumLifecycle`] drive one album through
//!   create, partial update (PATCH), full replacement (PUT) and delete, and
//!   verify that each read-back matches the layered [`ExpectedAlbum`].
//! - [`SpotChecker`] runs independent checks against the placeholder API:
//!   field lookup in a collection, creation echo, and a latency bound.
//! - [`scenarios`] holds the concrete scenarios built from both.
//!
//! Nothing is retried. Any deviation is returned as an [`Error`] and fails the
//! calling test.

pub mod config;
pub use config::ContractConfig;

pub mod errors;
pub use errors::{Error, FieldMismatch, Operation};

pub mod expected;
pub use expected::ExpectedAlbum;

pub mod lifecycle;
pub use lifecycle::{AlbumLifecycle, LifecycleState, LifecycleVerifier};

mod response;

pub mod scenarios;

pub mod spot_checks;
pub use spot_checks::SpotChecker;

/// Initialize logging for contract checks.
///
/// Reads the filter from `RUST_LOG`, defaulting to `info`. Safe to call more
/// than once; only the first call installs the subscriber.
pub fn init_logging() {
    use tracing_subscriber::EnvFilter;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_test_writer()
        .try_init();
}
