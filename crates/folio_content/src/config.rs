//! Content settings

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::fetch::SiteUrls;

/// Where site content lives and how long to wait for it
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Site root the article paths are resolved against
    pub base_url: String,
    /// Per-request timeout for catalog and card fetches
    pub fetch_timeout_ms: u64,
    /// Full-size hero background, relative to `base_url`
    pub background: String,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            base_url: ".".to_string(),
            fetch_timeout_ms: 8000,
            background: "assets/images/background.webp".to_string(),
        }
    }
}

impl ContentConfig {
    pub fn urls(&self) -> SiteUrls {
        SiteUrls::new(self.base_url.clone())
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }

    pub fn background_url(&self) -> String {
        self.urls().join(&self.background)
    }
}
