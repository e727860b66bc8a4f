//! Live contract tests against the hosted services.
//!
//! Every test in this crate sends real requests over the network, so each one
//! is ignored by default. Run them with:
//!
//! ```text
//! cargo test -p e2e_tests -- --ignored
//! ```
//!
//! The target services are taken from the environment; see
//! [`ContractConfig::from_env`].

use anyhow::{Context, Result};
use contract_verifier::{ContractConfig, LifecycleVerifier, SpotChecker};
use tracing::info;

/// Loads configuration and initializes logging for a live test.
pub fn live_config() -> Result<ContractConfig> {
    contract_verifier::init_logging();

    let config = ContractConfig::from_env().context("Failed to load contract configuration")?;
    info!(
        albums = %config.albums_base_url,
        placeholder = %config.placeholder_base_url,
        "Running live contract tests"
    );
    Ok(config)
}

/// Builds a lifecycle verifier for the configured albums service.
pub fn albums_verifier(config: &ContractConfig) -> Result<LifecycleVerifier> {
    let client = config
        .albums_client()
        .context("Failed to build albums client")?;
    Ok(LifecycleVerifier::new(client))
}

/// Builds a spot checker for the configured placeholder service.
pub fn placeholder_checker(config: &ContractConfig) -> Result<SpotChecker> {
    let client = config
        .placeholder_client()
        .context("Failed to build placeholder client")?;
    Ok(SpotChecker::new(client))
}
