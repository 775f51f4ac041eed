//! Folio content
//!
//! Everything the home page loads over the network:
//!
//! - [`catalog`]: the article manifest
//! - [`loader`]: article cards, cached by id with in-flight de-duplication
//! - [`quote`]: the one-line quote widget with local fallbacks
//! - [`preload`]: the full-size hero background
//!
//! All requests go through a [`Fetcher`]. Enable the `network` feature for
//! the `reqwest`-backed [`fetch::HttpFetcher`].

pub mod catalog;
pub mod config;
pub mod error;
pub mod fetch;
pub mod loader;
pub mod preload;
pub mod quote;

pub use catalog::{Catalog, CatalogEntry};
pub use config::ContentConfig;
pub use error::{ContentError, Result};
pub use fetch::{Fetcher, SiteUrls};
pub use loader::{CardFragment, CardLoader, CardOutcome, ContentRegion, PageLoads, PageTicket};
pub use preload::preload_background;
pub use quote::{QuoteConfig, QuoteTargets, QuoteTicket, QuoteWidget};

#[cfg(feature = "network")]
pub use fetch::HttpFetcher;
