//! Folio configuration file handling

use anyhow::{Context, Result};
use folio_animation::{HeroConfig, TiltConfig};
use folio_content::{ContentConfig, QuoteConfig};
use folio_widgets::{ModalConfig, NavConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Name of the configuration file looked up in a site directory
pub const CONFIG_FILE: &str = "folio.toml";

/// Top-level Folio configuration (folio.toml)
///
/// Every section is optional; missing keys keep the values the page was
/// designed with.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct FolioConfig {
    pub hero: HeroConfig,
    pub nav: NavConfig,
    pub content: ContentConfig,
    pub quote: QuoteConfig,
    pub tilt: TiltConfig,
    pub modal: ModalConfig,
}

impl FolioConfig {
    /// Load configuration from a directory (looks for folio.toml).
    ///
    /// `path` may also name the file itself. A directory without a
    /// folio.toml yields the defaults.
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let config_path = if path.is_file() {
            path.to_path_buf()
        } else {
            path.join(CONFIG_FILE)
        };

        if !config_path.exists() {
            debug!(path = %path.display(), "no folio.toml, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))
    }

    /// Parse a TOML document
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("Invalid folio configuration")
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_animation::Easing;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_document_is_default() {
        assert_eq!(FolioConfig::from_toml("").unwrap(), FolioConfig::default());
    }

    #[test]
    fn test_partial_sections() {
        let config = FolioConfig::from_toml(
            r#"
            [hero]
            collapsed_height = 72.0
            title_easing = "linear"

            [nav]
            threshold = 0.35

            [content]
            base_url = "https://blog.example.org/"
            fetch_timeout_ms = 2500

            [quote]
            fallbacks = ["山高水长"]

            [modal.images.github]
            image = "/assets/images/gh_card.webp"
            alt = "GitHub"
            caption = "GitHub 主页"
            "#,
        )
        .unwrap();

        assert_eq!(config.hero.collapsed_height, 72.0);
        assert_eq!(config.hero.title_easing, Easing::Linear);
        assert_eq!(config.hero.final_title_top, 30.0);
        assert_eq!(config.nav.threshold, 0.35);
        assert_eq!(config.nav.show_class, "show");
        assert_eq!(
            config.content.urls().manifest(),
            "https://blog.example.org/dynamic/articles/content.json"
        );
        assert_eq!(config.quote.fallbacks, vec!["山高水长".to_string()]);
        assert_eq!(config.quote.url, "https://v1.hitokoto.cn");
        assert_eq!(config.tilt, TiltConfig::default());
        assert_eq!(config.modal.images.len(), 1);
        assert_eq!(config.modal.images["github"].caption, "GitHub 主页");
    }

    #[test]
    fn test_rejects_wrong_types() {
        let err = FolioConfig::from_toml("[nav]\nthreshold = \"high\"").unwrap_err();
        assert!(err.to_string().contains("Invalid folio configuration"));
    }

    #[test]
    fn test_round_trip_through_toml() {
        let config = FolioConfig::default();
        let text = config.to_toml().unwrap();
        assert_eq!(FolioConfig::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = std::env::temp_dir().join("folio-config-missing");
        let config = FolioConfig::load_from_dir(&dir).unwrap();
        assert_eq!(config, FolioConfig::default());
    }
}
