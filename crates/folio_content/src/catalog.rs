//! Article catalog
//!
//! The manifest at `dynamic/articles/content.json` lists every article card
//! and the page size of the listing. It is read once at startup.

use std::ops::RangeInclusive;
use std::time::Duration;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{ContentError, Result};
use crate::fetch::{fetch_json, Fetcher, SiteUrls};

/// `entryHtml` value selecting the shared default card template
pub const DEFAULT_CARD: &str = "default";

/// One listed article
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    /// `"default"` or a marker for a custom `card.html`
    #[serde(default = "default_entry_html")]
    pub entry_html: String,
    /// Ships a `card.css`
    #[serde(default)]
    pub entry_css: bool,
    /// Ships a `card.js`
    #[serde(default)]
    pub entry_js: bool,
}

fn default_entry_html() -> String {
    DEFAULT_CARD.to_string()
}

impl CatalogEntry {
    pub fn uses_default_card(&self) -> bool {
        self.entry_html == DEFAULT_CARD
    }
}

/// Manifest as stored on the site
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Manifest {
    #[serde(default)]
    count: Option<usize>,
    page_count: usize,
    #[serde(default)]
    articles: Vec<CatalogEntry>,
}

/// Validated article catalog
#[derive(Clone, Debug)]
pub struct Catalog {
    page_size: usize,
    entries: Vec<CatalogEntry>,
    by_id: FxHashMap<String, usize>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ids and an empty page size
    pub fn new(page_size: usize, entries: Vec<CatalogEntry>) -> Result<Self> {
        if page_size == 0 {
            return Err(ContentError::InvalidManifest(
                "pageCount must be at least 1".to_string(),
            ));
        }

        let mut by_id = FxHashMap::default();
        for (index, entry) in entries.iter().enumerate() {
            if by_id.insert(entry.id.clone(), index).is_some() {
                return Err(ContentError::InvalidManifest(format!(
                    "duplicate article id '{}'",
                    entry.id
                )));
            }
        }

        Ok(Self {
            page_size,
            entries,
            by_id,
        })
    }

    /// Parse a manifest document
    pub fn from_json(json: &str) -> Result<Self> {
        let manifest: Manifest = serde_json::from_str(json)
            .map_err(|err| ContentError::InvalidManifest(err.to_string()))?;
        Self::from_manifest(manifest)
    }

    fn from_manifest(manifest: Manifest) -> Result<Self> {
        if let Some(count) = manifest.count {
            if count != manifest.articles.len() {
                return Err(ContentError::InvalidManifest(format!(
                    "count is {count} but {} articles are listed",
                    manifest.articles.len()
                )));
            }
        }
        Self::new(manifest.page_count, manifest.articles)
    }

    /// Fetch and validate the site's manifest
    pub async fn load(fetcher: &impl Fetcher, urls: &SiteUrls, timeout: Duration) -> Result<Self> {
        let url = urls.manifest();
        let manifest: Manifest = fetch_json(fetcher, &url, timeout).await?;
        let catalog = Self::from_manifest(manifest)?;
        info!(
            articles = catalog.count(),
            page_size = catalog.page_size(),
            "article catalog loaded"
        );
        Ok(catalog)
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn get(&self, id: &str) -> Option<&CatalogEntry> {
        self.by_id.get(id).map(|&index| &self.entries[index])
    }

    /// Entries whose listing index falls in `range`, clipped to the catalog
    pub fn slice(&self, range: RangeInclusive<usize>) -> &[CatalogEntry] {
        let start = (*range.start()).min(self.entries.len());
        let end = range.end().saturating_add(1).min(self.entries.len());
        &self.entries[start..end.max(start)]
    }
}
