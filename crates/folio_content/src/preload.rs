//! High-resolution background preload
//!
//! The page first paints a small background image. Once the full-size image
//! has been fetched the background element gets the `bgloaded` class, which
//! swaps it in. A failed preload keeps the small image.

use std::time::Duration;

use folio_core::Surface;
use tracing::{info, warn};

use crate::fetch::{with_timeout, Fetcher};

/// Class added to the background once the full image is available
pub const LOADED_CLASS: &str = "bgloaded";

/// Fetch the image at `url` and mark `background` once it arrived.
///
/// Returns whether the image loaded.
pub async fn preload_background(
    fetcher: &impl Fetcher,
    url: &str,
    timeout: Duration,
    background: &mut Surface,
) -> bool {
    match with_timeout(timeout, url, fetcher.fetch_bytes(url)).await {
        Ok(bytes) => {
            background.set_class(LOADED_CLASS, true);
            info!(url, size = bytes.len(), "high resolution background loaded");
            true
        }
        Err(err) => {
            warn!(url, %err, "high resolution background unavailable, keeping the preview");
            false
        }
    }
}
