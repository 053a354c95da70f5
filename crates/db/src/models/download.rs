use pixgrid_core::actions::PhotoActivity;
use pixgrid_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `photo_downloads` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PhotoDownload {
    pub id: DbId,
    pub user_id: String,
    pub photo_id: String,
    pub created_at: Timestamp,
}

impl From<PhotoDownload> for PhotoActivity {
    fn from(row: PhotoDownload) -> Self {
        PhotoActivity {
            photo_id: row.photo_id,
            created_at: row.created_at,
        }
    }
}
