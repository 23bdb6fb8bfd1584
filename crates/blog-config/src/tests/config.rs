use crate::Config;
use crate::tests::{EnvGuard, setup_config_dir};

use googletest::assert_that;
use googletest::prelude::{anything, contains_substring, err, eq};
use serial_test::serial;

#[test]
#[serial]
fn given_config_toml_when_loaded_then_values_are_used() {
    // Given
    let (temp, _guard) = setup_config_dir();
    std::fs::write(
        temp.path().join("config.toml"),
        r#"
            [server]
            port = 9200

            [auth]
            identity_provider_url = "https://tokens.example.com"

            [rate_limit]
            user_max_requests = 4
            anon_max_requests = 1

            [api]
            default_page_size = 5
        "#,
    )
    .unwrap();

    // When
    let config = Config::load().unwrap();

    // Then
    assert_that!(config.server.port, eq(9200));
    assert_that!(
        config.auth.identity_provider_url,
        eq("https://tokens.example.com")
    );
    assert_that!(config.rate_limit.user_max_requests, eq(4));
    assert_that!(config.api.default_page_size, eq(5));
}

#[test]
#[serial]
fn given_toml_and_env_when_loaded_then_env_wins() {
    // Given
    let (temp, _guard) = setup_config_dir();
    std::fs::write(
        temp.path().join("config.toml"),
        r#"
            [server]
            port = 9200
        "#,
    )
    .unwrap();
    let _port = EnvGuard::set("BLOG_SERVER_PORT", "9300");

    // When
    let config = Config::load().unwrap();

    // Then
    assert_that!(config.server.port, eq(9300));
}

#[test]
#[serial]
fn given_invalid_toml_when_loaded_then_parse_error() {
    // Given
    let (temp, _guard) = setup_config_dir();
    std::fs::write(temp.path().join("config.toml"), "server = not valid toml").unwrap();

    // When
    let result = Config::load();

    // Then
    assert_that!(result, err(anything()));
}

#[test]
#[serial]
fn given_absolute_database_path_when_validate_then_error() {
    // Given
    let (_temp, _guard) = setup_config_dir();
    let _url = EnvGuard::set("BLOG_AUTH_IDENTITY_PROVIDER_URL", "http://127.0.0.1:54321");
    let _db = EnvGuard::set("BLOG_DATABASE_PATH", "/var/lib/blog.db");

    // When
    let config = Config::load().unwrap();
    let result = config.validate();

    // Then
    assert_that!(result, err(anything()));
    let err_msg = format!("{}", result.unwrap_err());
    assert_that!(err_msg, contains_substring("relative"));
}

#[test]
#[serial]
fn given_database_path_when_resolved_then_inside_config_dir() {
    // Given
    let (temp, _guard) = setup_config_dir();

    // When
    let config = Config::load().unwrap();
    let db_path = config.database_path().unwrap();

    // Then
    assert_that!(db_path.starts_with(temp.path()), eq(true));
    assert_that!(db_path.ends_with("blog.db"), eq(true));
}
