//! Synthetic photo data for development mode and upstream-failure fallback.
//!
//! A fixed pool of sample photos is cycled to produce exactly the number of
//! records requested: entry `i` of `mock_photos(n)` is pool entry
//! `i % POOL_SIZE`. Output is deterministic for a given count and repeats
//! once the pool is exhausted, so callers must not assume unique ids.

use async_trait::async_trait;

use crate::photo::{Photo, PhotoPage, PhotoUrls, PhotoUser, ProfileImage};
use crate::source::{PhotoSource, SourceError};

struct Sample {
    id: &'static str,
    image: &'static str,
    width: u32,
    height: u32,
    color: &'static str,
    description: &'static str,
    alt_description: &'static str,
    user_id: &'static str,
    username: &'static str,
    name: &'static str,
    likes: u64,
    downloads: u64,
}

const SAMPLES: &[Sample] = &[
    Sample {
        id: "mock-1",
        image: "photo-1506905925346-21bda4d32df4",
        width: 6000,
        height: 4000,
        color: "#8C8C8C",
        description: "Mountain range under a clear sky",
        alt_description: "snow covered mountain during daytime",
        user_id: "mock-user-1",
        username: "alpine_lens",
        name: "Mara Keller",
        likes: 1520,
        downloads: 20431,
    },
    Sample {
        id: "mock-2",
        image: "photo-1507525428034-b723cf961d3e",
        width: 5472,
        height: 3648,
        color: "#26A6D9",
        description: "Turquoise water on a quiet beach",
        alt_description: "seashore during daytime",
        user_id: "mock-user-2",
        username: "tidewalker",
        name: "Jonah Reyes",
        likes: 3104,
        downloads: 48210,
    },
    Sample {
        id: "mock-3",
        image: "photo-1441974231531-c6227db76b6e",
        width: 5184,
        height: 3456,
        color: "#26400C",
        description: "Sunlight through a dense forest",
        alt_description: "green trees in forest",
        user_id: "mock-user-3",
        username: "understory",
        name: "Ines Duarte",
        likes: 2211,
        downloads: 30987,
    },
    Sample {
        id: "mock-4",
        image: "photo-1477959858617-67f85cf4f1df",
        width: 4896,
        height: 3264,
        color: "#0C2640",
        description: "City skyline at dusk",
        alt_description: "high rise buildings during night time",
        user_id: "mock-user-4",
        username: "nightgrid",
        name: "Theo Lindqvist",
        likes: 987,
        downloads: 12044,
    },
    Sample {
        id: "mock-5",
        image: "photo-1470071459604-3b5ec3a7fe05",
        width: 4000,
        height: 2667,
        color: "#D9A673",
        description: "Fog rolling over green hills",
        alt_description: "foggy mountain summit",
        user_id: "mock-user-5",
        username: "lowcloud",
        name: "Priya Nair",
        likes: 1876,
        downloads: 25530,
    },
    Sample {
        id: "mock-6",
        image: "photo-1501785888041-af3ef285b470",
        width: 6016,
        height: 4016,
        color: "#406073",
        description: "Lake reflecting autumn trees",
        alt_description: "body of water surrounded by trees",
        user_id: "mock-user-6",
        username: "stillwater",
        name: "Oskar Brandt",
        likes: 2640,
        downloads: 37712,
    },
];

/// Number of distinct photos in the sample pool.
pub const POOL_SIZE: usize = SAMPLES.len();

const MOCK_TIMESTAMP: &str = "2024-01-15T10:30:00Z";

fn to_photo(sample: &Sample) -> Photo {
    let base = format!("https://images.unsplash.com/{}", sample.image);
    let avatar = format!("https://images.unsplash.com/profile-{}", sample.user_id);

    Photo {
        id: sample.id.to_string(),
        created_at: MOCK_TIMESTAMP.to_string(),
        updated_at: MOCK_TIMESTAMP.to_string(),
        width: sample.width,
        height: sample.height,
        color: sample.color.to_string(),
        description: Some(sample.description.to_string()),
        alt_description: Some(sample.alt_description.to_string()),
        urls: PhotoUrls {
            raw: base.clone(),
            full: format!("{base}?q=85&fm=jpg"),
            regular: format!("{base}?w=1080&q=80&fm=jpg&fit=max"),
            small: format!("{base}?w=400&q=80&fm=jpg&fit=max"),
            thumb: format!("{base}?w=200&q=80&fm=jpg&fit=max"),
        },
        user: PhotoUser {
            id: sample.user_id.to_string(),
            username: sample.username.to_string(),
            name: sample.name.to_string(),
            profile_image: ProfileImage {
                small: format!("{avatar}?w=32&h=32"),
                medium: format!("{avatar}?w=64&h=64"),
                large: format!("{avatar}?w=128&h=128"),
            },
        },
        likes: sample.likes,
        downloads: sample.downloads,
    }
}

/// Produce exactly `count` synthetic photos by cycling the sample pool.
pub fn mock_photos(count: usize) -> Vec<Photo> {
    SAMPLES.iter().cycle().take(count).map(to_photo).collect()
}

/// A single degraded page: `per_page` synthetic photos, reported as the only
/// page so clients do not ask for more.
pub fn mock_page(per_page: u32) -> PhotoPage {
    PhotoPage {
        results: mock_photos(per_page as usize),
        total: u64::from(per_page),
        total_pages: 1,
    }
}

/// [`PhotoSource`] serving the sample pool, used in development mode so
/// the live provider's rate limit is never spent.
#[derive(Debug, Default, Clone, Copy)]
pub struct MockPhotoSource;

#[async_trait]
impl PhotoSource for MockPhotoSource {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn random_photos(&self, count: u32) -> Result<Vec<Photo>, SourceError> {
        Ok(mock_photos(count as usize))
    }

    async fn search_photos(
        &self,
        _query: &str,
        _page: u32,
        per_page: u32,
    ) -> Result<PhotoPage, SourceError> {
        Ok(mock_page(per_page))
    }

    async fn photo(&self, id: &str) -> Result<Photo, SourceError> {
        SAMPLES
            .iter()
            .find(|sample| sample.id == id)
            .map(to_photo)
            .ok_or_else(|| SourceError::Status {
                status: 404,
                body: format!("No mock photo with id {id}"),
            })
    }

    async fn track_download(&self, _id: &str) -> Result<(), SourceError> {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn pool_ids_are_distinct() {
        let ids: HashSet<_> = SAMPLES.iter().map(|s| s.id).collect();
        assert_eq!(ids.len(), POOL_SIZE);
    }

    #[test]
    fn length_always_matches_count() {
        for n in [0, 1, POOL_SIZE - 1, POOL_SIZE, POOL_SIZE + 1, 30, 100] {
            assert_eq!(mock_photos(n).len(), n, "count {n}");
        }
    }

    #[test]
    fn output_cycles_through_pool() {
        let n = POOL_SIZE * 3 + 2;
        let photos = mock_photos(n);
        let pool = mock_photos(POOL_SIZE);

        for (i, photo) in photos.iter().enumerate() {
            assert_eq!(photo.id, pool[i % POOL_SIZE].id, "index {i}");
        }
    }

    #[test]
    fn output_is_deterministic() {
        assert_eq!(mock_photos(12), mock_photos(12));
    }

    #[test]
    fn every_photo_carries_all_url_variants() {
        for photo in mock_photos(POOL_SIZE) {
            for url in [
                &photo.urls.raw,
                &photo.urls.full,
                &photo.urls.regular,
                &photo.urls.small,
                &photo.urls.thumb,
                &photo.user.profile_image.small,
                &photo.user.profile_image.medium,
                &photo.user.profile_image.large,
            ] {
                assert!(url.starts_with("https://"), "{}: {url}", photo.id);
            }
        }
    }

    #[test]
    fn mock_page_is_single_page() {
        let page = mock_page(10);
        assert_eq!(page.results.len(), 10);
        assert_eq!(page.total, 10);
        assert_eq!(page.total_pages, 1);
    }

    #[tokio::test]
    async fn mock_source_detail_lookup() {
        let source = MockPhotoSource;
        assert_eq!(source.photo("mock-3").await.unwrap().id, "mock-3");

        let err = source.photo("missing").await.unwrap_err();
        assert!(err.is_not_found());
    }
}
