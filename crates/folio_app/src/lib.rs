//! Folio home page
//!
//! Composes the folio components into the landing page of the site:
//!
//! - [`home::HomePage`]: scroll layout, navigation bar, pager and article
//!   cards, the quote widget, contact card tilt, the image modal and the
//!   background preload
//! - [`config::FolioConfig`]: `folio.toml`, one section per component
//! - [`logging`]: `tracing` subscriber setup
//! - [`headless`]: in-memory surfaces for running the page without a browser
//!
//! # Example
//!
//! ```rust
//! use folio_app::headless::HeadlessPage;
//! use folio_app::{FolioConfig, HomePage};
//! use folio_content::{CardLoader, Catalog, ContentError, Fetcher, SiteUrls};
//! use folio_core::{Event, Viewport};
//! use std::time::Duration;
//!
//! struct Offline;
//!
//! impl Fetcher for Offline {
//!     async fn fetch_bytes(&self, url: &str) -> folio_content::Result<Vec<u8>> {
//!         Err(ContentError::Status { url: url.to_string(), status: 404 })
//!     }
//! }
//!
//! let elements = HeadlessPage::new(0);
//! let catalog = Catalog::new(5, Vec::new()).unwrap();
//! let loader = CardLoader::new(Offline, catalog, SiteUrls::default(), Duration::from_secs(1));
//! let mut page = HomePage::new(
//!     &FolioConfig::default(),
//!     elements.surfaces(),
//!     Viewport::new(1280.0, 800.0),
//!     loader,
//! );
//!
//! // Scroll halfway through the hero's travel
//! page.handle_event(&Event::Scroll { y: 370.0 });
//! page.run_frame(16.0);
//!
//! assert_eq!(page.ratio(), Some(0.5));
//! assert_eq!(elements.hero_container.style("height").as_deref(), Some("430px"));
//! assert!(elements.nav.has_class("show"));
//! ```

pub mod config;
pub mod headless;
pub mod home;
pub mod logging;

pub use config::FolioConfig;
pub use home::{load_page, HomeSurfaces, HomePage, PageNav, PageRequest};
