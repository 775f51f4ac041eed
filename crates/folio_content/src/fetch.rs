//! Fetching site resources
//!
//! Everything the page loads goes through a [`Fetcher`]. Browser hosts wrap
//! `fetch()`, native hosts use [`HttpFetcher`] (`network` feature) and tests
//! use an in-memory map.

use std::future::Future;
use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::error::{ContentError, Result};

/// Source of site resources
#[allow(async_fn_in_trait)]
pub trait Fetcher {
    /// Fetch the raw body at `url`
    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>>;

    /// Fetch the body at `url` as UTF-8 text
    async fn fetch_text(&self, url: &str) -> Result<String> {
        let bytes = self.fetch_bytes(url).await?;
        String::from_utf8(bytes).map_err(|err| ContentError::Decode {
            url: url.to_string(),
            message: err.to_string(),
        })
    }
}

impl<F: Fetcher + ?Sized> Fetcher for &F {
    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>> {
        (**self).fetch_bytes(url).await
    }

    async fn fetch_text(&self, url: &str) -> Result<String> {
        (**self).fetch_text(url).await
    }
}

/// Bound `fut` by `timeout`, reporting expiry against `url`
pub async fn with_timeout<T>(
    timeout: Duration,
    url: &str,
    fut: impl Future<Output = Result<T>>,
) -> Result<T> {
    match tokio::time::timeout(timeout, fut).await {
        Ok(result) => result,
        Err(_) => Err(ContentError::Timeout {
            url: url.to_string(),
            timeout,
        }),
    }
}

/// Fetch `url` and decode its JSON body
pub async fn fetch_json<T: DeserializeOwned>(
    fetcher: &impl Fetcher,
    url: &str,
    timeout: Duration,
) -> Result<T> {
    let body = with_timeout(timeout, url, fetcher.fetch_text(url)).await?;
    serde_json::from_str(&body).map_err(|err| ContentError::Decode {
        url: url.to_string(),
        message: err.to_string(),
    })
}

/// Resource locations relative to the site root
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SiteUrls {
    base: String,
}

impl SiteUrls {
    pub fn new(base: impl Into<String>) -> Self {
        let mut base = base.into();
        while base.ends_with('/') {
            base.pop();
        }
        Self { base }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// Resolve a site-relative path
    pub fn join(&self, path: &str) -> String {
        format!("{}/{}", self.base, path.trim_start_matches('/'))
    }

    pub fn manifest(&self) -> String {
        self.join("dynamic/articles/content.json")
    }

    pub fn default_card(&self) -> String {
        self.join("dynamic/articles/default.html")
    }

    pub fn card_html(&self, id: &str) -> String {
        self.join(&format!("dynamic/articles/{id}/card.html"))
    }

    pub fn card_css(&self, id: &str) -> String {
        self.join(&format!("dynamic/articles/{id}/card.css"))
    }

    pub fn card_js(&self, id: &str) -> String {
        self.join(&format!("dynamic/articles/{id}/card.js"))
    }

    pub fn article_page(&self, id: &str) -> String {
        self.join(&format!("articles/{id}.html"))
    }
}

impl Default for SiteUrls {
    fn default() -> Self {
        Self::new(".")
    }
}

#[cfg(feature = "network")]
pub use http::HttpFetcher;

#[cfg(feature = "network")]
mod http {
    use std::time::Duration;

    use tracing::trace;

    use super::Fetcher;
    use crate::error::{ContentError, Result};

    /// HTTP fetcher backed by a shared `reqwest` client
    #[derive(Clone, Debug)]
    pub struct HttpFetcher {
        client: reqwest::Client,
        timeout: Duration,
    }

    impl HttpFetcher {
        pub fn new(timeout: Duration) -> Result<Self> {
            let client = reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .map_err(|err| ContentError::Http {
                    url: String::new(),
                    message: err.to_string(),
                })?;
            Ok(Self { client, timeout })
        }
    }

    impl Fetcher for HttpFetcher {
        async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>> {
            trace!(url, "GET");
            let to_error = |err: reqwest::Error| {
                if err.is_timeout() {
                    ContentError::Timeout {
                        url: url.to_string(),
                        timeout: self.timeout,
                    }
                } else {
                    ContentError::Http {
                        url: url.to_string(),
                        message: err.to_string(),
                    }
                }
            };

            let response = self.client.get(url).send().await.map_err(to_error)?;
            let status = response.status();
            if !status.is_success() {
                return Err(ContentError::Status {
                    url: url.to_string(),
                    status: status.as_u16(),
                });
            }

            let body = response.bytes().await.map_err(to_error)?;
            Ok(body.to_vec())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Slow;

    impl Fetcher for Slow {
        async fn fetch_bytes(&self, _url: &str) -> Result<Vec<u8>> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(Vec::new())
        }
    }

    struct Fixed(&'static str);

    impl Fetcher for Fixed {
        async fn fetch_bytes(&self, _url: &str) -> Result<Vec<u8>> {
            Ok(self.0.as_bytes().to_vec())
        }
    }

    #[test]
    fn test_site_urls() {
        let urls = SiteUrls::new("https://example.org/blog/");
        assert_eq!(
            urls.manifest(),
            "https://example.org/blog/dynamic/articles/content.json"
        );
        assert_eq!(
            urls.card_css("1001"),
            "https://example.org/blog/dynamic/articles/1001/card.css"
        );
        assert_eq!(SiteUrls::default().article_page("7"), "./articles/7.html");
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout() {
        let result = with_timeout(
            Duration::from_secs(5),
            "slow://",
            Slow.fetch_text("slow://"),
        )
        .await;
        assert!(matches!(result, Err(ContentError::Timeout { .. })));
    }

    #[tokio::test]
    async fn test_fetch_json_decode_error() {
        let result: Result<serde_json::Value> =
            fetch_json(&Fixed("{not json"), "fixed://", Duration::from_secs(1)).await;
        assert!(matches!(result, Err(ContentError::Decode { .. })));

        let value: serde_json::Value =
            fetch_json(&Fixed(r#"{"a":1}"#), "fixed://", Duration::from_secs(1))
                .await
                .unwrap();
        assert_eq!(value["a"], 1);
    }
}
