use super::*;
use serial_test::serial;

const ALL_VARS: [&str; 4] = [
    ALBUMS_BASE_URL_VAR,
    PLACEHOLDER_BASE_URL_VAR,
    POSTS_LATENCY_BUDGET_VAR,
    HTTP_TIMEOUT_VAR,
];

fn clear_env() {
    for var in ALL_VARS {
        unsafe {
            std::env::remove_var(var);
        }
    }
}

#[test]
fn test_default_points_at_hosted_services() {
    let config = ContractConfig::default();

    assert_eq!(
        config.albums_base_url,
        "https://albums-collection-service.herokuapp.com"
    );
    assert_eq!(
        config.placeholder_base_url,
        "https://jsonplaceholder.typicode.com"
    );
    assert_eq!(config.posts_latency_budget, Duration::from_millis(500));
    assert_eq!(config.request_timeout, Duration::from_secs(30));
}

#[test]
#[serial]
fn test_from_env_without_variables_uses_defaults() {
    clear_env();

    let config = ContractConfig::from_env().unwrap();

    assert_eq!(config, ContractConfig::default());
}

#[test]
#[serial]
fn test_from_env_overrides() {
    clear_env();
    unsafe {
        std::env::set_var(ALBUMS_BASE_URL_VAR, "http://localhost:3000");
        std::env::set_var(PLACEHOLDER_BASE_URL_VAR, " http://localhost:4000 ");
        std::env::set_var(POSTS_LATENCY_BUDGET_VAR, "1200");
        std::env::set_var(HTTP_TIMEOUT_VAR, "5");
    }

    let config = ContractConfig::from_env().unwrap();
    clear_env();

    assert_eq!(config.albums_base_url, "http://localhost:3000");
    assert_eq!(config.placeholder_base_url, "http://localhost:4000");
    assert_eq!(config.posts_latency_budget, Duration::from_millis(1200));
    assert_eq!(config.request_timeout, Duration::from_secs(5));
}

#[test]
#[serial]
fn test_from_env_empty_variable_falls_back_to_default() {
    clear_env();
    unsafe {
        std::env::set_var(ALBUMS_BASE_URL_VAR, "");
    }

    let config = ContractConfig::from_env().unwrap();
    clear_env();

    assert_eq!(config.albums_base_url, DEFAULT_ALBUMS_BASE_URL);
}

#[test]
#[serial]
fn test_from_env_rejects_malformed_budget() {
    clear_env();
    unsafe {
        std::env::set_var(POSTS_LATENCY_BUDGET_VAR, "fast");
    }

    let result = ContractConfig::from_env();
    clear_env();

    match result {
        Err(Error::Config(message)) => {
            assert!(message.contains("POSTS_LATENCY_BUDGET_MS"));
            assert!(message.contains("'fast'"));
        }
        other => panic!("Expected config error, got {:?}", other),
    }
}

#[test]
#[serial]
fn test_from_env_rejects_zero_timeout() {
    clear_env();
    unsafe {
        std::env::set_var(HTTP_TIMEOUT_VAR, "0");
    }

    let result = ContractConfig::from_env();
    clear_env();

    match result {
        Err(Error::Config(message)) => assert!(message.contains("HTTP_TIMEOUT_SECS")),
        other => panic!("Expected config error, got {:?}", other),
    }
}

#[test]
fn test_albums_client_rejects_malformed_url() {
    let config = ContractConfig {
        albums_base_url: "::not a url::".to_string(),
        ..Default::default()
    };

    let result = config.albums_client();

    assert!(matches!(
        result,
        Err(Error::Client(api_client::Error::InvalidUrl(_, _)))
    ));
}
