//! Wire types for Unsplash JSON payloads.
//!
//! These mirror the subset of the provider schema the gallery uses and are
//! converted into [`pixgrid_core::photo`] types at the crate boundary. Fields
//! the provider omits on some endpoints (e.g. `downloads` on list endpoints)
//! default rather than fail decoding.

use serde::Deserialize;

use pixgrid_core::photo::{Photo, PhotoPage, PhotoUrls, PhotoUser, ProfileImage};

/// Swatch used when the provider reports no dominant colour.
const FALLBACK_COLOR: &str = "#CCCCCC";

#[derive(Debug, Deserialize)]
pub struct UnsplashUrls {
    pub raw: String,
    pub full: String,
    pub regular: String,
    pub small: String,
    pub thumb: String,
}

#[derive(Debug, Deserialize)]
pub struct UnsplashProfileImage {
    pub small: String,
    pub medium: String,
    pub large: String,
}

#[derive(Debug, Deserialize)]
pub struct UnsplashUser {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub name: Option<String>,
    pub profile_image: UnsplashProfileImage,
}

/// A photo as returned by `/photos/random`, `/photos/{id}` and inside
/// `/search/photos` results.
#[derive(Debug, Deserialize)]
pub struct UnsplashPhoto {
    pub id: String,
    pub created_at: String,
    pub updated_at: String,
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub alt_description: Option<String>,
    pub urls: UnsplashUrls,
    pub user: UnsplashUser,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub downloads: u64,
}

/// Body of `/search/photos`.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    pub results: Vec<UnsplashPhoto>,
    pub total: u64,
    pub total_pages: u64,
}

impl From<UnsplashPhoto> for Photo {
    fn from(p: UnsplashPhoto) -> Self {
        let name = p.user.name.unwrap_or_else(|| p.user.username.clone());
        Photo {
            id: p.id,
            created_at: p.created_at,
            updated_at: p.updated_at,
            width: p.width,
            height: p.height,
            color: p.color.unwrap_or_else(|| FALLBACK_COLOR.to_string()),
            description: p.description,
            alt_description: p.alt_description,
            urls: PhotoUrls {
                raw: p.urls.raw,
                full: p.urls.full,
                regular: p.urls.regular,
                small: p.urls.small,
                thumb: p.urls.thumb,
            },
            user: PhotoUser {
                id: p.user.id,
                username: p.user.username,
                name,
                profile_image: ProfileImage {
                    small: p.user.profile_image.small,
                    medium: p.user.profile_image.medium,
                    large: p.user.profile_image.large,
                },
            },
            likes: p.likes,
            downloads: p.downloads,
        }
    }
}

impl From<SearchResponse> for PhotoPage {
    fn from(r: SearchResponse) -> Self {
        PhotoPage {
            results: r.results.into_iter().map(Photo::from).collect(),
            total: r.total,
            total_pages: r.total_pages,
        }
    }
}
