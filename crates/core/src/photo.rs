//! Photo domain model and request parameter rules.
//!
//! [`Photo`] mirrors the provider's photo record (snake_case on the wire) so
//! the HTTP layer can serialize it unchanged. [`PhotoPage`] is the paginated
//! shape shared by search and topic browsing.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Parameter constants
// ---------------------------------------------------------------------------

/// Default number of photos for the random endpoint.
pub const DEFAULT_COUNT: u32 = 10;
/// Default page for paginated endpoints (1-based).
pub const DEFAULT_PAGE: u32 = 1;
/// Default page size for paginated endpoints.
pub const DEFAULT_PER_PAGE: u32 = 10;

// ---------------------------------------------------------------------------
// Model
// ---------------------------------------------------------------------------

/// Image URLs for every size variant the provider serves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoUrls {
    pub raw: String,
    pub full: String,
    pub regular: String,
    pub small: String,
    pub thumb: String,
}

/// Author avatar URLs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileImage {
    pub small: String,
    pub medium: String,
    pub large: String,
}

/// The photographer credited for a photo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoUser {
    pub id: String,
    pub username: String,
    pub name: String,
    pub profile_image: ProfileImage,
}

/// A single photo record.
///
/// `id` is the provider's stable identifier, or `mock-N` for synthetic
/// entries produced by [`crate::mock`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Photo {
    pub id: String,
    /// ISO 8601 creation time as reported by the provider.
    pub created_at: String,
    /// ISO 8601 last-update time as reported by the provider.
    pub updated_at: String,
    pub width: u32,
    pub height: u32,
    /// Dominant colour swatch, e.g. `#60544D`.
    pub color: String,
    pub description: Option<String>,
    pub alt_description: Option<String>,
    pub urls: PhotoUrls,
    pub user: PhotoUser,
    pub likes: u64,
    pub downloads: u64,
}

/// One page of search or topic results.
///
/// `total` and `total_pages` are provider-reported and may be approximate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoPage {
    pub results: Vec<Photo>,
    pub total: u64,
    pub total_pages: u64,
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a free-text search term or topic slug.
///
/// Returns the trimmed term; blank input is rejected.
pub fn validate_term<'a>(field: &str, term: &'a str) -> Result<&'a str, CoreError> {
    let trimmed = term.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    Ok(trimmed)
}

/// Normalise an optional query: blank strings count as "no query".
pub fn normalize_query(query: Option<&str>) -> Option<&str> {
    query.map(str::trim).filter(|q| !q.is_empty())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
