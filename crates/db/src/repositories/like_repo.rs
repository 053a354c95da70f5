//! Repository for the `photo_likes` table.

use pixgrid_core::types::DbId;
use sqlx::PgPool;

use crate::models::like::PhotoLike;

const COLUMNS: &str = "id, user_id, photo_id, created_at";

/// Keyed access to likes, unique per `(user_id, photo_id)`.
pub struct LikeRepo;

impl LikeRepo {
    /// Find the like for a user and photo, if any.
    pub async fn find_by_user_and_photo(
        pool: &PgPool,
        user_id: &str,
        photo_id: &str,
    ) -> Result<Option<PhotoLike>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM photo_likes WHERE user_id = $1 AND photo_id = $2");
        sqlx::query_as::<_, PhotoLike>(&query)
            .bind(user_id)
            .bind(photo_id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a like, returning the stored row.
    ///
    /// If a concurrent request already inserted the same pair, the existing
    /// row is returned instead of failing on the unique constraint.
    pub async fn create(
        pool: &PgPool,
        user_id: &str,
        photo_id: &str,
    ) -> Result<PhotoLike, sqlx::Error> {
        let query = format!(
            "INSERT INTO photo_likes (user_id, photo_id) \
             VALUES ($1, $2) \
             ON CONFLICT ON CONSTRAINT uq_photo_likes_user_photo \
             DO UPDATE SET user_id = EXCLUDED.user_id \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PhotoLike>(&query)
            .bind(user_id)
            .bind(photo_id)
            .fetch_one(pool)
            .await
    }

    /// Delete a like by id. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM photo_likes WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// All likes for a user, newest first.
    pub async fn list_by_user(pool: &PgPool, user_id: &str) -> Result<Vec<PhotoLike>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM photo_likes \
             WHERE user_id = $1 \
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, PhotoLike>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }
}
