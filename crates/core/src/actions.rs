//! User actions on photos: like toggling and download recording.
//!
//! Persistence is abstracted behind [`ActionStore`] (implemented over
//! Postgres in `pixgrid-db`). Unlike the read path there is no fallback
//! here: a store failure is surfaced as [`CoreError::Persistence`].

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::source::PhotoSource;
use crate::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A stored like, unique per `(user_id, photo_id)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LikeRecord {
    pub id: DbId,
    pub user_id: String,
    pub photo_id: String,
    pub created_at: Timestamp,
}

/// A photo the user interacted with, as returned by the history listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoActivity {
    pub photo_id: String,
    pub created_at: Timestamp,
}

/// Outcome of [`ActionService::toggle_like`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LikeToggle {
    pub liked: bool,
}

/// Outcome of [`ActionService::record_download`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadReceipt {
    pub download_url: String,
}

/// Keyed persistence for likes and downloads.
#[async_trait]
pub trait ActionStore: Send + Sync {
    async fn find_like(&self, user_id: &str, photo_id: &str)
        -> Result<Option<LikeRecord>, CoreError>;

    async fn create_like(&self, user_id: &str, photo_id: &str) -> Result<LikeRecord, CoreError>;

    /// Delete a like by row id. Returns `false` if it was already gone.
    async fn delete_like(&self, like_id: DbId) -> Result<bool, CoreError>;

    async fn create_download(&self, user_id: &str, photo_id: &str)
        -> Result<PhotoActivity, CoreError>;

    /// Likes for a user, newest first.
    async fn list_likes(&self, user_id: &str) -> Result<Vec<PhotoActivity>, CoreError>;

    /// Downloads for a user, newest first.
    async fn list_downloads(&self, user_id: &str) -> Result<Vec<PhotoActivity>, CoreError>;
}

// ---------------------------------------------------------------------------
// Service
// ---------------------------------------------------------------------------

/// Records likes and downloads against an [`ActionStore`].
pub struct ActionService {
    store: Arc<dyn ActionStore>,
    source: Arc<dyn PhotoSource>,
}

impl ActionService {
    pub fn new(store: Arc<dyn ActionStore>, source: Arc<dyn PhotoSource>) -> Self {
        Self { store, source }
    }

    /// Flip the like state of `(user_id, photo_id)`.
    ///
    /// An existing like is removed (`liked: false`); otherwise one is
    /// created (`liked: true`). Repeated calls alternate.
    pub async fn toggle_like(&self, user_id: &str, photo_id: &str) -> Result<LikeToggle, CoreError> {
        match self.store.find_like(user_id, photo_id).await? {
            Some(existing) => {
                self.store.delete_like(existing.id).await?;
                tracing::info!(user_id, photo_id, "Photo unliked");
                Ok(LikeToggle { liked: false })
            }
            None => {
                self.store.create_like(user_id, photo_id).await?;
                tracing::info!(user_id, photo_id, "Photo liked");
                Ok(LikeToggle { liked: true })
            }
        }
    }

    /// Record a download, then notify the provider's download tracker.
    ///
    /// Every call records a new row. The provider notification is
    /// best-effort: its failure is logged and does not undo the record.
    pub async fn record_download(
        &self,
        user_id: &str,
        photo_id: &str,
        download_url: &str,
    ) -> Result<DownloadReceipt, CoreError> {
        self.store.create_download(user_id, photo_id).await?;
        tracing::info!(user_id, photo_id, "Photo download recorded");

        if let Err(e) = self.source.track_download(photo_id).await {
            tracing::warn!(
                photo_id,
                source = self.source.name(),
                error = %e,
                "Download tracking notification failed",
            );
        }

        Ok(DownloadReceipt {
            download_url: download_url.to_string(),
        })
    }

    /// Photos the user has liked, newest first.
    pub async fn liked_photos(&self, user_id: &str) -> Result<Vec<PhotoActivity>, CoreError> {
        self.store.list_likes(user_id).await
    }

    /// The user's download history, newest first.
    pub async fn download_history(&self, user_id: &str) -> Result<Vec<PhotoActivity>, CoreError> {
        self.store.list_downloads(user_id).await
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use assert_matches::assert_matches;
    use chrono::Utc;
    use tokio::sync::Mutex;

    use super::*;
    use crate::mock::MockPhotoSource;
    use crate::photo::{Photo, PhotoPage};
    use crate::source::SourceError;

    #[derive(Default)]
    struct MemoryStore {
        likes: Mutex<Vec<LikeRecord>>,
        downloads: Mutex<Vec<(String, PhotoActivity)>>,
        next_id: AtomicUsize,
        broken: bool,
    }

    impl MemoryStore {
        fn check(&self) -> Result<(), CoreError> {
            if self.broken {
                return Err(CoreError::Persistence("connection refused".into()));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl ActionStore for MemoryStore {
        async fn find_like(
            &self,
            user_id: &str,
            photo_id: &str,
        ) -> Result<Option<LikeRecord>, CoreError> {
            self.check()?;
            let likes = self.likes.lock().await;
            Ok(likes
                .iter()
                .find(|l| l.user_id == user_id && l.photo_id == photo_id)
                .cloned())
        }

        async fn create_like(&self, user_id: &str, photo_id: &str) -> Result<LikeRecord, CoreError> {
            self.check()?;
            let record = LikeRecord {
                id: self.next_id.fetch_add(1, Ordering::SeqCst) as DbId + 1,
                user_id: user_id.to_string(),
                photo_id: photo_id.to_string(),
                created_at: Utc::now(),
            };
            self.likes.lock().await.push(record.clone());
            Ok(record)
        }

        async fn delete_like(&self, like_id: DbId) -> Result<bool, CoreError> {
            self.check()?;
            let mut likes = self.likes.lock().await;
            let before = likes.len();
            likes.retain(|l| l.id != like_id);
            Ok(likes.len() < before)
        }

        async fn create_download(
            &self,
            user_id: &str,
            photo_id: &str,
        ) -> Result<PhotoActivity, CoreError> {
            self.check()?;
            let activity = PhotoActivity {
                photo_id: photo_id.to_string(),
                created_at: Utc::now(),
            };
            self.downloads
                .lock()
                .await
                .push((user_id.to_string(), activity.clone()));
            Ok(activity)
        }

        async fn list_likes(&self, user_id: &str) -> Result<Vec<PhotoActivity>, CoreError> {
            self.check()?;
            let likes = self.likes.lock().await;
            Ok(likes
                .iter()
                .rev()
                .filter(|l| l.user_id == user_id)
                .map(|l| PhotoActivity {
                    photo_id: l.photo_id.clone(),
                    created_at: l.created_at,
                })
                .collect())
        }

        async fn list_downloads(&self, user_id: &str) -> Result<Vec<PhotoActivity>, CoreError> {
            self.check()?;
            let downloads = self.downloads.lock().await;
            Ok(downloads
                .iter()
                .rev()
                .filter(|(uid, _)| uid == user_id)
                .map(|(_, a)| a.clone())
                .collect())
        }
    }

    /// Source whose download tracker always fails.
    struct TrackerDown {
        tracked: AtomicUsize,
    }

    #[async_trait]
    impl PhotoSource for TrackerDown {
        fn name(&self) -> &'static str {
            "tracker-down"
        }

        async fn random_photos(&self, _count: u32) -> Result<Vec<Photo>, SourceError> {
            Err(SourceError::Timeout)
        }

        async fn search_photos(
            &self,
            _query: &str,
            _page: u32,
            _per_page: u32,
        ) -> Result<PhotoPage, SourceError> {
            Err(SourceError::Timeout)
        }

        async fn photo(&self, _id: &str) -> Result<Photo, SourceError> {
            Err(SourceError::Timeout)
        }

        async fn track_download(&self, _id: &str) -> Result<(), SourceError> {
            self.tracked.fetch_add(1, Ordering::SeqCst);
            Err(SourceError::Transport("connection reset".into()))
        }
    }

    fn service(store: Arc<MemoryStore>) -> ActionService {
        ActionService::new(store, Arc::new(MockPhotoSource))
    }

    #[tokio::test]
    async fn toggle_like_flips_state() {
        let svc = service(Arc::new(MemoryStore::default()));

        assert_eq!(svc.toggle_like("u1", "p1").await.unwrap(), LikeToggle { liked: true });
        assert_eq!(svc.toggle_like("u1", "p1").await.unwrap(), LikeToggle { liked: false });
        assert_eq!(svc.toggle_like("u1", "p1").await.unwrap(), LikeToggle { liked: true });
    }

    #[tokio::test]
    async fn likes_are_scoped_per_user_and_photo() {
        let store = Arc::new(MemoryStore::default());
        let svc = service(Arc::clone(&store));

        svc.toggle_like("u1", "p1").await.unwrap();
        assert!(svc.toggle_like("u2", "p1").await.unwrap().liked);
        assert!(svc.toggle_like("u1", "p2").await.unwrap().liked);

        let liked: Vec<_> = svc
            .liked_photos("u1")
            .await
            .unwrap()
            .into_iter()
            .map(|a| a.photo_id)
            .collect();
        assert_eq!(liked, vec!["p2", "p1"]);
    }

    #[tokio::test]
    async fn downloads_are_recorded_every_time() {
        let store = Arc::new(MemoryStore::default());
        let svc = service(Arc::clone(&store));

        for _ in 0..3 {
            let receipt = svc
                .record_download("u1", "p1", "https://example.com/p1.jpg")
                .await
                .unwrap();
            assert_eq!(receipt.download_url, "https://example.com/p1.jpg");
        }

        assert_eq!(svc.download_history("u1").await.unwrap().len(), 3);
        assert!(svc.download_history("u2").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn tracking_failure_does_not_undo_download() {
        let store = Arc::new(MemoryStore::default());
        let source = Arc::new(TrackerDown {
            tracked: AtomicUsize::new(0),
        });
        let svc = ActionService::new(store.clone(), source.clone());

        let receipt = svc.record_download("u1", "p9", "https://example.com/p9.jpg").await;

        assert!(receipt.is_ok());
        assert_eq!(source.tracked.load(Ordering::SeqCst), 1);
        assert_eq!(svc.download_history("u1").await.unwrap()[0].photo_id, "p9");
    }

    #[tokio::test]
    async fn store_failures_surface_as_persistence_errors() {
        let svc = service(Arc::new(MemoryStore {
            broken: true,
            ..MemoryStore::default()
        }));

        assert_matches!(svc.toggle_like("u1", "p1").await, Err(CoreError::Persistence(_)));
        assert_matches!(
            svc.record_download("u1", "p1", "https://example.com").await,
            Err(CoreError::Persistence(_))
        );
    }

    #[test]
    fn receipt_serializes_download_url_in_camel_case() {
        let receipt = DownloadReceipt {
            download_url: "https://example.com/a.jpg".into(),
        };
        let json = serde_json::to_value(receipt).unwrap();
        assert_eq!(json["downloadUrl"], "https://example.com/a.jpg");
    }
}
