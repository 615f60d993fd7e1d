//! Strapi CMS configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Connection settings for the Strapi instance holding products and carts.
#[derive(Debug, Clone, Deserialize)]
pub struct CmsConfig {
    /// Base URL of the CMS, e.g. `http://localhost:1337`
    pub base_url: String,

    /// API bearer token
    pub token: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl CmsConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate CMS configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.base_url.is_empty() {
            return Err(ValidationError::MissingRequired("CMS_BASE_URL"));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::InvalidCmsUrl);
        }
        if self.token.is_empty() {
            return Err(ValidationError::MissingRequired("CMS_TOKEN"));
        }
        if self.timeout_secs == 0 || self.timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

fn default_timeout() -> u64 {
    10
}
