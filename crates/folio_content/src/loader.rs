//! Article card loading and caching
//!
//! Cards are built on first display and kept for the session. Each article
//! id maps to a shared once-cell, so concurrent requests for the same
//! uncached card wait on a single fetch instead of issuing their own. A
//! failed load leaves the cell empty and the next request retries.

use std::ops::RangeInclusive;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use rustc_hash::FxHashMap;
use tokio::sync::OnceCell;
use tracing::{debug, trace, warn};

use crate::catalog::{Catalog, CatalogEntry};
use crate::error::{ContentError, Result};
use crate::fetch::{with_timeout, Fetcher, SiteUrls};

const TITLE_SLOT: &str = r#"<span class="column-card-title"></span>"#;
const SUBTITLE_SLOT: &str = r#"<span class="column-card-subtitle"></span>"#;

/// A built article card
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CardFragment {
    pub article_id: String,
    pub html: String,
    /// Contents of the card's `card.css`, if it ships one and it loaded
    pub stylesheet: Option<String>,
    /// Contents of the card's `card.js`, if it ships one and it loaded
    pub script: Option<String>,
}

/// Fill the default template's title and subtitle slots
pub fn render_default_card(template: &str, title: &str, subtitle: &str) -> String {
    let title = format!(
        r#"<span class="column-card-title">{}</span>"#,
        html_escape::encode_text(title)
    );
    let subtitle = format!(
        r#"<span class="column-card-subtitle">{}</span>"#,
        html_escape::encode_text(subtitle)
    );
    template
        .replacen(TITLE_SLOT, &title, 1)
        .replacen(SUBTITLE_SLOT, &subtitle, 1)
}

type CardCell = Arc<OnceCell<Arc<CardFragment>>>;

/// Loads article cards through a [`Fetcher`] and caches them by id
pub struct CardLoader<F> {
    fetcher: F,
    catalog: Catalog,
    urls: SiteUrls,
    timeout: Duration,
    cards: Mutex<FxHashMap<String, CardCell>>,
    template: OnceCell<String>,
}

impl<F: Fetcher> CardLoader<F> {
    pub fn new(fetcher: F, catalog: Catalog, urls: SiteUrls, timeout: Duration) -> Self {
        Self {
            fetcher,
            catalog,
            urls,
            timeout,
            cards: Mutex::new(FxHashMap::default()),
            template: OnceCell::new(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub fn urls(&self) -> &SiteUrls {
        &self.urls
    }

    /// The cached card for `id`, without loading
    pub fn cached(&self, id: &str) -> Option<Arc<CardFragment>> {
        self.lock_cards()
            .get(id)
            .and_then(|cell| cell.get().cloned())
    }

    /// Number of cards in the cache
    pub fn cached_count(&self) -> usize {
        self.lock_cards()
            .values()
            .filter(|cell| cell.initialized())
            .count()
    }

    /// Return the card for `id`, building and caching it on first use.
    ///
    /// Repeated calls return the same `Arc`.
    pub async fn ensure_loaded(&self, id: &str) -> Result<Arc<CardFragment>> {
        let entry = self
            .catalog
            .get(id)
            .ok_or_else(|| ContentError::UnknownArticle(id.to_string()))?;

        let cell = Arc::clone(self.lock_cards().entry(id.to_string()).or_default());
        if let Some(card) = cell.get() {
            trace!(id, "card cache hit");
            return Ok(Arc::clone(card));
        }

        let card = cell.get_or_try_init(|| self.build_card(entry)).await?;
        Ok(Arc::clone(card))
    }

    /// Load every card of a listing range, in order.
    ///
    /// Indices past the end of the catalog are ignored.
    pub async fn load_range(&self, range: RangeInclusive<usize>) -> Vec<CardOutcome> {
        let mut outcomes = Vec::new();
        for entry in self.catalog.slice(range) {
            let result = self.ensure_loaded(&entry.id).await;
            if let Err(err) = &result {
                warn!(id = %entry.id, %err, "failed to load article card");
            }
            outcomes.push(CardOutcome {
                id: entry.id.clone(),
                result,
            });
        }
        outcomes
    }

    /// Fetch the article page fragment for `id`
    pub async fn article_page(&self, id: &str) -> Result<String> {
        self.fetch(&self.urls.article_page(id)).await
    }

    async fn build_card(&self, entry: &CatalogEntry) -> Result<Arc<CardFragment>> {
        let id = entry.id.as_str();
        let html = if entry.uses_default_card() {
            let template = self.default_template().await?;
            render_default_card(template, &entry.title, &entry.subtitle)
        } else {
            self.fetch(&self.urls.card_html(id)).await?
        };

        let stylesheet = if entry.entry_css {
            self.fetch_optional(&self.urls.card_css(id)).await
        } else {
            None
        };
        let script = if entry.entry_js {
            self.fetch_optional(&self.urls.card_js(id)).await
        } else {
            None
        };

        debug!(id, default = entry.uses_default_card(), "card built");
        Ok(Arc::new(CardFragment {
            article_id: id.to_string(),
            html,
            stylesheet,
            script,
        }))
    }

    async fn default_template(&self) -> Result<&str> {
        let template = self
            .template
            .get_or_try_init(|| async move {
                let url = self.urls.default_card();
                self.fetch(&url).await
            })
            .await?;
        Ok(template.as_str())
    }

    async fn fetch(&self, url: &str) -> Result<String> {
        with_timeout(self.timeout, url, self.fetcher.fetch_text(url)).await
    }

    /// Card assets that fail to load are skipped
    async fn fetch_optional(&self, url: &str) -> Option<String> {
        match self.fetch(url).await {
            Ok(body) => Some(body),
            Err(err) => {
                warn!(url, %err, "optional card asset unavailable");
                None
            }
        }
    }

    fn lock_cards(&self) -> std::sync::MutexGuard<'_, FxHashMap<String, CardCell>> {
        self.cards.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<F> std::fmt::Debug for CardLoader<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let cached = self
            .cards
            .try_lock()
            .map(|cards| cards.values().filter(|cell| cell.initialized()).count())
            .unwrap_or(0);

        f.debug_struct("CardLoader")
            .field("base", &self.urls.base())
            .field("articles", &self.catalog.count())
            .field("cached", &cached)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Result of loading one card of a page
#[derive(Debug)]
pub struct CardOutcome {
    pub id: String,
    pub result: Result<Arc<CardFragment>>,
}

/// What the listing region currently shows
#[derive(Clone, Debug, Default, PartialEq)]
pub enum ContentRegion {
    #[default]
    Empty,
    Loading {
        page: usize,
    },
    Ready {
        page: usize,
        cards: Vec<Arc<CardFragment>>,
        /// Ids of cards that failed to load
        failed: Vec<String>,
    },
    /// Every card of the page failed
    Failed {
        page: usize,
        message: String,
    },
}

impl ContentRegion {
    pub fn from_outcomes(page: usize, outcomes: Vec<CardOutcome>) -> Self {
        let mut cards = Vec::with_capacity(outcomes.len());
        let mut failed = Vec::new();
        let mut first_error = None;

        for outcome in outcomes {
            match outcome.result {
                Ok(card) => cards.push(card),
                Err(err) => {
                    if first_error.is_none() {
                        first_error = Some(err.to_string());
                    }
                    failed.push(outcome.id);
                }
            }
        }

        match first_error {
            Some(message) if cards.is_empty() => ContentRegion::Failed { page, message },
            _ => ContentRegion::Ready {
                page,
                cards,
                failed,
            },
        }
    }

    pub fn page(&self) -> Option<usize> {
        match self {
            ContentRegion::Empty => None,
            ContentRegion::Loading { page }
            | ContentRegion::Ready { page, .. }
            | ContentRegion::Failed { page, .. } => Some(*page),
        }
    }
}

/// Token for one page load request
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageTicket {
    pub page: usize,
    generation: u64,
}

/// Orders page load requests so a superseded load is discarded
#[derive(Debug, Default)]
pub struct PageLoads {
    latest: AtomicU64,
}

impl PageLoads {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a load for `page`, superseding any earlier one
    pub fn begin(&self, page: usize) -> PageTicket {
        let generation = self.latest.fetch_add(1, Ordering::Relaxed) + 1;
        PageTicket { page, generation }
    }

    /// Whether `ticket` is still the latest request
    pub fn is_current(&self, ticket: PageTicket) -> bool {
        self.latest.load(Ordering::Relaxed) == ticket.generation
    }
}
