//! [`ActionStore`] implementation over the repositories.

use async_trait::async_trait;
use pixgrid_core::actions::{ActionStore, LikeRecord, PhotoActivity};
use pixgrid_core::error::CoreError;
use pixgrid_core::types::DbId;

use crate::repositories::{DownloadRepo, LikeRepo};
use crate::DbPool;

/// Postgres-backed action store.
#[derive(Clone)]
pub struct PgActionStore {
    pool: DbPool,
}

impl PgActionStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn persistence(op: &'static str) -> impl FnOnce(sqlx::Error) -> CoreError {
    move |e| {
        tracing::error!(op, error = %e, "Action store query failed");
        CoreError::Persistence(e.to_string())
    }
}

#[async_trait]
impl ActionStore for PgActionStore {
    async fn find_like(
        &self,
        user_id: &str,
        photo_id: &str,
    ) -> Result<Option<LikeRecord>, CoreError> {
        let row = LikeRepo::find_by_user_and_photo(&self.pool, user_id, photo_id)
            .await
            .map_err(persistence("find_like"))?;
        Ok(row.map(LikeRecord::from))
    }

    async fn create_like(&self, user_id: &str, photo_id: &str) -> Result<LikeRecord, CoreError> {
        LikeRepo::create(&self.pool, user_id, photo_id)
            .await
            .map(LikeRecord::from)
            .map_err(persistence("create_like"))
    }

    async fn delete_like(&self, like_id: DbId) -> Result<bool, CoreError> {
        LikeRepo::delete(&self.pool, like_id)
            .await
            .map_err(persistence("delete_like"))
    }

    async fn create_download(
        &self,
        user_id: &str,
        photo_id: &str,
    ) -> Result<PhotoActivity, CoreError> {
        DownloadRepo::create(&self.pool, user_id, photo_id)
            .await
            .map(PhotoActivity::from)
            .map_err(persistence("create_download"))
    }

    async fn list_likes(&self, user_id: &str) -> Result<Vec<PhotoActivity>, CoreError> {
        let rows = LikeRepo::list_by_user(&self.pool, user_id)
            .await
            .map_err(persistence("list_likes"))?;
        Ok(rows.into_iter().map(PhotoActivity::from).collect())
    }

    async fn list_downloads(&self, user_id: &str) -> Result<Vec<PhotoActivity>, CoreError> {
        let rows = DownloadRepo::list_by_user(&self.pool, user_id)
            .await
            .map_err(persistence("list_downloads"))?;
        Ok(rows.into_iter().map(PhotoActivity::from).collect())
    }
}
