use crate::{ConfigError, ConfigErrorResult, DEFAULT_MAX_PAGE_SIZE, DEFAULT_PAGE_SIZE};

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Page size used when a listing request does not ask for one
    pub default_page_size: u32,
    /// Upper bound on client-requested page sizes
    pub max_page_size: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: DEFAULT_MAX_PAGE_SIZE,
        }
    }
}

impl ApiConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.default_page_size == 0 {
            return Err(ConfigError::api(
                "api.default_page_size must be greater than zero",
            ));
        }

        if self.max_page_size < self.default_page_size {
            return Err(ConfigError::api(
                "api.max_page_size cannot be smaller than api.default_page_size",
            ));
        }

        Ok(())
    }
}
