use pixgrid_core::actions::{LikeRecord, PhotoActivity};
use pixgrid_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `photo_likes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PhotoLike {
    pub id: DbId,
    pub user_id: String,
    pub photo_id: String,
    pub created_at: Timestamp,
}

impl From<PhotoLike> for LikeRecord {
    fn from(row: PhotoLike) -> Self {
        LikeRecord {
            id: row.id,
            user_id: row.user_id,
            photo_id: row.photo_id,
            created_at: row.created_at,
        }
    }
}

impl From<PhotoLike> for PhotoActivity {
    fn from(row: PhotoLike) -> Self {
        PhotoActivity {
            photo_id: row.photo_id,
            created_at: row.created_at,
        }
    }
}
