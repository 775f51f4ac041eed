//! Content error types

use std::time::Duration;
use thiserror::Error;

/// Errors raised while fetching or decoding site content
#[derive(Error, Debug)]
pub enum ContentError {
    /// The request could not be made or the connection failed
    #[error("Request to {url} failed: {message}")]
    Http { url: String, message: String },

    /// The server answered with a non-success status
    #[error("Request to {url} returned status {status}")]
    Status { url: String, status: u16 },

    /// No response within the configured timeout
    #[error("Request to {url} timed out after {timeout:?}")]
    Timeout { url: String, timeout: Duration },

    /// The response body was not what we expected
    #[error("Failed to decode {url}: {message}")]
    Decode { url: String, message: String },

    /// The catalog has no article with this id
    #[error("Unknown article: {0}")]
    UnknownArticle(String),

    /// The catalog manifest is inconsistent
    #[error("Invalid manifest: {0}")]
    InvalidManifest(String),
}

impl ContentError {
    /// Whether the resource does not exist, so the host should redirect to
    /// its not-found page instead of showing a transient error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ContentError::Status { status: 404, .. } | ContentError::UnknownArticle(_)
        )
    }

    /// The URL the failed request targeted, if any
    pub fn url(&self) -> Option<&str> {
        match self {
            ContentError::Http { url, .. }
            | ContentError::Status { url, .. }
            | ContentError::Timeout { url, .. }
            | ContentError::Decode { url, .. } => Some(url),
            ContentError::UnknownArticle(_) | ContentError::InvalidManifest(_) => None,
        }
    }
}

/// Result type for content operations
pub type Result<T> = std::result::Result<T, ContentError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found() {
        let missing = ContentError::Status {
            url: "./articles/42.html".into(),
            status: 404,
        };
        assert!(missing.is_not_found());
        assert!(ContentError::UnknownArticle("42".into()).is_not_found());

        let unavailable = ContentError::Status {
            url: "./articles/42.html".into(),
            status: 503,
        };
        assert!(!unavailable.is_not_found());
        assert_eq!(unavailable.url(), Some("./articles/42.html"));
    }

    #[test]
    fn test_display() {
        let err = ContentError::Timeout {
            url: "https://v1.hitokoto.cn".into(),
            timeout: Duration::from_millis(1500),
        };
        assert_eq!(
            err.to_string(),
            "Request to https://v1.hitokoto.cn timed out after 1.5s"
        );
    }
}
