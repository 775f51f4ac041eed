//! Quote widget
//!
//! Shows a one-line quote from the hitokoto API under the hero title. While
//! a quote loads the widget shows a placeholder; if the request fails it
//! falls back to a local quote, rotating through the configured list.
//!
//! Loading is split into `start`/`finish` halves around the fetch so hosts
//! can keep the widget responsive while the request is pending. Each start
//! bumps a generation; a completion carrying an older generation is
//! dropped.

use std::time::Duration;

use folio_core::Surface;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::Result;
use crate::fetch::{fetch_json, Fetcher};

/// Quote widget settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuoteConfig {
    pub url: String,
    pub timeout_ms: u64,
    /// Text shown while a quote is loading
    pub placeholder: String,
    /// Local quotes used when the API is unreachable
    pub fallbacks: Vec<String>,
    pub loaded_class: String,
    pub refreshing_class: String,
}

impl Default for QuoteConfig {
    fn default() -> Self {
        Self {
            url: "https://v1.hitokoto.cn".to_string(),
            timeout_ms: 5000,
            placeholder: "茫茫句海，总有一句适合你...".to_string(),
            fallbacks: vec![
                "生活不止眼前的苟且，还有诗和远方。".to_string(),
                "星光不问赶路人，时光不负有心人。".to_string(),
                "保持热爱，奔赴山海。".to_string(),
                "简单的生活，何尝不是一场华丽的冒险。".to_string(),
            ],
            loaded_class: "loaded".to_string(),
            refreshing_class: "refreshing".to_string(),
        }
    }
}

impl QuoteConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[derive(Debug, Deserialize)]
struct QuoteResponse {
    hitokoto: String,
    #[serde(default)]
    from: Option<String>,
}

/// `"<text> — <from>"`, or just the text when there is no source
pub fn format_quote(text: &str, from: Option<&str>) -> String {
    match from.map(str::trim).filter(|from| !from.is_empty()) {
        Some(from) => format!("{text} — {from}"),
        None => text.to_string(),
    }
}

/// Request one quote from the API
pub async fn fetch_quote(fetcher: &impl Fetcher, config: &QuoteConfig) -> Result<String> {
    let response: QuoteResponse = fetch_json(fetcher, &config.url, config.timeout()).await?;
    Ok(format_quote(&response.hitokoto, response.from.as_deref()))
}

/// Surfaces of the quote widget
#[derive(Debug, Default)]
pub struct QuoteTargets {
    /// Outer element carrying the state classes
    pub container: Surface,
    /// Element holding the quote text
    pub content: Surface,
}

/// Identifies one pending quote load
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QuoteTicket {
    generation: u64,
}

#[derive(Debug)]
pub struct QuoteWidget {
    config: QuoteConfig,
    targets: QuoteTargets,
    text: String,
    generation: u64,
    refreshing: bool,
    loaded: bool,
    /// Quote shown before the pending refresh started
    before_refresh: Option<String>,
    next_fallback: usize,
}

impl QuoteWidget {
    pub fn new(config: QuoteConfig, targets: QuoteTargets) -> Self {
        let text = config.placeholder.clone();
        Self {
            config,
            targets,
            text,
            generation: 0,
            refreshing: false,
            loaded: false,
            before_refresh: None,
            next_fallback: 0,
        }
    }

    pub fn config(&self) -> &QuoteConfig {
        &self.config
    }

    /// Current quote text, for copying to the clipboard
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_refreshing(&self) -> bool {
        self.refreshing
    }

    /// Show the placeholder and start a load, superseding any pending load
    /// or refresh
    pub fn start_load(&mut self) -> QuoteTicket {
        self.generation += 1;
        self.set_refreshing(false);
        self.before_refresh = None;
        self.text.clone_from(&self.config.placeholder);
        self.targets.content.set_text(&self.text);
        self.set_loaded(false);
        QuoteTicket {
            generation: self.generation,
        }
    }

    /// Start a user-requested refresh.
    ///
    /// Returns `None` while another refresh is still pending.
    pub fn begin_refresh(&mut self) -> Option<QuoteTicket> {
        if self.refreshing {
            debug!("quote refresh already in flight");
            return None;
        }
        let shown = self.loaded.then(|| self.text.clone());
        let ticket = self.start_load();
        self.before_refresh = shown;
        self.set_refreshing(true);
        Some(ticket)
    }

    /// Abandon the refresh identified by `ticket`, restoring the quote shown
    /// before it started.
    ///
    /// Returns `false` when `ticket` is not the pending refresh.
    pub fn cancel_refresh(&mut self, ticket: QuoteTicket) -> bool {
        if !self.refreshing || ticket.generation != self.generation {
            return false;
        }
        // A late completion of the abandoned request is discarded
        self.generation += 1;
        self.set_refreshing(false);

        match self.before_refresh.take() {
            Some(text) => {
                self.text = text;
                self.set_loaded(true);
            }
            None => self.text.clone_from(&self.config.placeholder),
        }
        self.targets.content.set_text(&self.text);
        debug!("quote refresh cancelled");
        true
    }

    /// Apply the outcome of a load.
    ///
    /// Returns `false` when a newer load has started since `ticket` was
    /// issued; the outcome is then discarded.
    pub fn finish(&mut self, ticket: QuoteTicket, result: Result<String>) -> bool {
        if ticket.generation != self.generation {
            debug!(
                ticket = ticket.generation,
                latest = self.generation,
                "discarding stale quote"
            );
            return false;
        }

        self.text = match result {
            Ok(text) => text,
            Err(err) => {
                warn!(%err, "quote request failed, using a local quote");
                self.next_fallback()
            }
        };
        self.before_refresh = None;
        self.targets.content.set_text(&self.text);
        self.set_refreshing(false);
        self.set_loaded(true);
        true
    }

    /// Load a quote through `fetcher`
    pub async fn load(&mut self, fetcher: &impl Fetcher) -> bool {
        let ticket = self.start_load();
        let result = fetch_quote(fetcher, &self.config).await;
        self.finish(ticket, result)
    }

    /// Refresh through `fetcher`; `false` if a refresh was already pending.
    ///
    /// Dropping the future before it completes cancels the refresh.
    pub async fn refresh(&mut self, fetcher: &impl Fetcher) -> bool {
        let Some(ticket) = self.begin_refresh() else {
            return false;
        };
        let mut pending = PendingRefresh {
            widget: self,
            ticket: Some(ticket),
        };
        let result = fetch_quote(fetcher, &pending.widget.config).await;
        pending.ticket = None;
        pending.widget.finish(ticket, result)
    }

    fn set_refreshing(&mut self, refreshing: bool) {
        if self.refreshing != refreshing {
            self.refreshing = refreshing;
            self.targets
                .container
                .set_class(&self.config.refreshing_class, refreshing);
        }
    }

    fn set_loaded(&mut self, loaded: bool) {
        self.loaded = loaded;
        self.targets
            .container
            .set_class(&self.config.loaded_class, loaded);
    }

    fn next_fallback(&mut self) -> String {
        let fallbacks = &self.config.fallbacks;
        if fallbacks.is_empty() {
            return self.config.placeholder.clone();
        }
        let quote = fallbacks[self.next_fallback % fallbacks.len()].clone();
        self.next_fallback = (self.next_fallback + 1) % fallbacks.len();
        quote
    }
}

/// Cancels its refresh unless disarmed before drop
struct PendingRefresh<'a> {
    widget: &'a mut QuoteWidget,
    ticket: Option<QuoteTicket>,
}

impl Drop for PendingRefresh<'_> {
    fn drop(&mut self) {
        if let Some(ticket) = self.ticket.take() {
            self.widget.cancel_refresh(ticket);
        }
    }
}
