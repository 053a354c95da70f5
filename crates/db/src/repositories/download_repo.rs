//! Repository for the `photo_downloads` table.

use sqlx::PgPool;

use crate::models::download::PhotoDownload;

const COLUMNS: &str = "id, user_id, photo_id, created_at";

/// Append-only download history.
pub struct DownloadRepo;

impl DownloadRepo {
    /// Record a download. Every call inserts a new row.
    pub async fn create(
        pool: &PgPool,
        user_id: &str,
        photo_id: &str,
    ) -> Result<PhotoDownload, sqlx::Error> {
        let query = format!(
            "INSERT INTO photo_downloads (user_id, photo_id) \
             VALUES ($1, $2) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PhotoDownload>(&query)
            .bind(user_id)
            .bind(photo_id)
            .fetch_one(pool)
            .await
    }

    /// All downloads for a user, newest first.
    pub async fn list_by_user(
        pool: &PgPool,
        user_id: &str,
    ) -> Result<Vec<PhotoDownload>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM photo_downloads \
             WHERE user_id = $1 \
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, PhotoDownload>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }
}
