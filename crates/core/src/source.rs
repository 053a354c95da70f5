//! Upstream photo source capability.
//!
//! The query service talks to the outside world only through
//! [`PhotoSource`]. The binary picks the implementation once at startup:
//! the live provider client in production, [`crate::mock::MockPhotoSource`]
//! in development.

use async_trait::async_trait;

use crate::photo::{Photo, PhotoPage};

/// Errors reported by a [`PhotoSource`].
#[derive(Debug, Clone, thiserror::Error)]
pub enum SourceError {
    /// The request never produced a response (DNS, connect, TLS, ...).
    #[error("Upstream request failed: {0}")]
    Transport(String),

    /// The request exceeded its timeout.
    #[error("Upstream request timed out")]
    Timeout,

    /// The provider answered with a non-success status.
    #[error("Upstream returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// The provider answered but the payload did not match the expected shape.
    #[error("Upstream payload could not be decoded: {0}")]
    Decode(String),
}

impl SourceError {
    /// Whether the provider reported that the requested resource does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, SourceError::Status { status: 404, .. })
    }
}

/// A provider of photo data.
#[async_trait]
pub trait PhotoSource: Send + Sync {
    /// Short identifier used in logs and the health payload.
    fn name(&self) -> &'static str;

    /// Fetch `count` random photos.
    async fn random_photos(&self, count: u32) -> Result<Vec<Photo>, SourceError>;

    /// Full-text search, one page at a time (`page` is 1-based).
    async fn search_photos(
        &self,
        query: &str,
        page: u32,
        per_page: u32,
    ) -> Result<PhotoPage, SourceError>;

    /// Fetch a single photo by id.
    async fn photo(&self, id: &str) -> Result<Photo, SourceError>;

    /// Notify the provider that a photo was downloaded (analytics only).
    async fn track_download(&self, id: &str) -> Result<(), SourceError>;
}
