use crate::{
    ApiConfig, AuthConfig, ConfigError, ConfigErrorResult, DatabaseConfig, LoggingConfig,
    RateLimitConfig, ServerConfig,
};

use std::path::PathBuf;

use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub logging: LoggingConfig,
    pub rate_limit: RateLimitConfig,
    pub api: ApiConfig,
}

impl Config {
    /// Load config with full production error handling.
    ///
    /// Loading order:
    /// 1. Check for BLOG_CONFIG_DIR env var, else use ./.blog/
    /// 2. Auto-create config directory if it doesn't exist
    /// 3. Load config.toml if it exists, else use defaults
    /// 4. Apply BLOG_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let config_dir = Self::config_dir()?;

        // Auto-create config directory
        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::Io {
                path: config_dir.clone(),
                source: e,
            })?;
        }

        let config_path = config_dir.join("config.toml");

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    /// Load and parse TOML file with detailed error context.
    fn load_toml(path: &PathBuf) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.clone(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.clone(),
            source: e,
        })
    }

    /// Get the config directory.
    /// Priority: BLOG_CONFIG_DIR env var > ./.blog/ (relative to cwd)
    pub fn config_dir() -> Result<PathBuf, ConfigError> {
        if let Ok(dir) = std::env::var("BLOG_CONFIG_DIR") {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(".blog"))
    }

    /// Validate all configuration.
    /// Call after load() to catch all errors at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.server.validate()?;
        self.auth.validate()?;
        self.rate_limit.validate()?;
        self.api.validate()?;

        // Validate database path doesn't escape config dir
        let db_path = std::path::Path::new(&self.database.path);
        if db_path.is_absolute() || self.database.path.contains("..") {
            return Err(ConfigError::database(
                "database.path must be relative and cannot contain '..'",
            ));
        }

        Ok(())
    }

    /// Get absolute path to database file.
    pub fn database_path(&self) -> Result<PathBuf, ConfigError> {
        let config_dir = Self::config_dir()?;
        Ok(config_dir.join(&self.database.path))
    }

    /// Get bind address as string.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Log configuration summary (NEVER logs secrets).
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!(
            "  server: {}:{} (max {} connections)",
            self.server.host, self.server.port, self.server.max_connections
        );
        info!("  database: {}", self.database.path);
        info!(
            "  auth: provider={} (jwks ttl {}s, timeout {}s)",
            self.auth.identity_provider_url, self.auth.jwks_ttl_secs, self.auth.http_timeout_secs
        );
        info!(
            "  logging: {} (colored: {})",
            *self.logging.level, self.logging.colored
        );
        info!(
            "  rate_limit: user {}/{}s, anon {}/{}s",
            self.rate_limit.user_max_requests,
            self.rate_limit.window_secs,
            self.rate_limit.anon_max_requests,
            self.rate_limit.window_secs
        );
        info!(
            "  api: page_size={} (max {})",
            self.api.default_page_size, self.api.max_page_size
        );
    }

    fn apply_env_overrides(&mut self) {
        // Server
        Self::apply_env_string("BLOG_SERVER_HOST", &mut self.server.host);
        Self::apply_env_parse("BLOG_SERVER_PORT", &mut self.server.port);
        Self::apply_env_parse(
            "BLOG_SERVER_MAX_CONNECTIONS",
            &mut self.server.max_connections,
        );

        // Database
        Self::apply_env_string("BLOG_DATABASE_PATH", &mut self.database.path);

        // Auth
        Self::apply_env_string(
            "BLOG_AUTH_IDENTITY_PROVIDER_URL",
            &mut self.auth.identity_provider_url,
        );
        Self::apply_env_parse("BLOG_AUTH_JWKS_TTL_SECS", &mut self.auth.jwks_ttl_secs);
        Self::apply_env_parse(
            "BLOG_AUTH_HTTP_TIMEOUT_SECS",
            &mut self.auth.http_timeout_secs,
        );

        // Logging
        Self::apply_env_parse("BLOG_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("BLOG_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_option_string("BLOG_LOG_FILE", &mut self.logging.file);

        // Rate limit
        Self::apply_env_parse(
            "BLOG_RATE_LIMIT_USER_MAX_REQUESTS",
            &mut self.rate_limit.user_max_requests,
        );
        Self::apply_env_parse(
            "BLOG_RATE_LIMIT_ANON_MAX_REQUESTS",
            &mut self.rate_limit.anon_max_requests,
        );
        Self::apply_env_parse(
            "BLOG_RATE_LIMIT_WINDOW_SECS",
            &mut self.rate_limit.window_secs,
        );

        // Api
        Self::apply_env_parse("BLOG_API_DEFAULT_PAGE_SIZE", &mut self.api.default_page_size);
        Self::apply_env_parse("BLOG_API_MAX_PAGE_SIZE", &mut self.api.max_page_size);
    }

    /// Helper: Apply environment variable override for String values
    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Helper: Apply environment variable override for bool values (accepts "true"/"1")
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    /// Helper: Apply environment variable override for parseable values
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    /// Helper: Apply environment variable override for Option<String> values
    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = Some(val);
        }
    }
}
