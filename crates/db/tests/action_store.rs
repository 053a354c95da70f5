//! Integration tests for the Postgres action store.

use std::sync::Arc;

use assert_matches::assert_matches;
use pixgrid_core::actions::{ActionService, ActionStore, LikeToggle};
use pixgrid_core::error::CoreError;
use pixgrid_core::mock::MockPhotoSource;
use pixgrid_db::repositories::{DownloadRepo, LikeRepo};
use pixgrid_db::PgActionStore;
use sqlx::PgPool;

fn service(pool: &PgPool) -> ActionService {
    ActionService::new(
        Arc::new(PgActionStore::new(pool.clone())),
        Arc::new(MockPhotoSource),
    )
}

// ---------------------------------------------------------------------------
// Repositories
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn like_create_is_idempotent_per_pair(pool: PgPool) {
    let first = LikeRepo::create(&pool, "u1", "p1").await.unwrap();
    let second = LikeRepo::create(&pool, "u1", "p1").await.unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(LikeRepo::list_by_user(&pool, "u1").await.unwrap().len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn like_delete_reports_missing_rows(pool: PgPool) {
    let like = LikeRepo::create(&pool, "u1", "p1").await.unwrap();

    assert!(LikeRepo::delete(&pool, like.id).await.unwrap());
    assert!(!LikeRepo::delete(&pool, like.id).await.unwrap());
    assert!(LikeRepo::find_by_user_and_photo(&pool, "u1", "p1")
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn downloads_list_newest_first(pool: PgPool) {
    for photo in ["p1", "p2", "p3"] {
        DownloadRepo::create(&pool, "u1", photo).await.unwrap();
    }
    DownloadRepo::create(&pool, "u2", "p9").await.unwrap();

    let photos: Vec<_> = DownloadRepo::list_by_user(&pool, "u1")
        .await
        .unwrap()
        .into_iter()
        .map(|d| d.photo_id)
        .collect();
    assert_eq!(photos, vec!["p3", "p2", "p1"]);
}

// ---------------------------------------------------------------------------
// ActionService over Postgres
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn toggle_like_alternates(pool: PgPool) {
    let svc = service(&pool);

    assert_eq!(svc.toggle_like("u1", "p1").await.unwrap(), LikeToggle { liked: true });
    assert_eq!(svc.toggle_like("u1", "p1").await.unwrap(), LikeToggle { liked: false });
    assert_eq!(svc.toggle_like("u1", "p1").await.unwrap(), LikeToggle { liked: true });

    let liked = svc.liked_photos("u1").await.unwrap();
    assert_eq!(liked.len(), 1);
    assert_eq!(liked[0].photo_id, "p1");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn record_download_appends_history(pool: PgPool) {
    let svc = service(&pool);

    for _ in 0..2 {
        let receipt = svc
            .record_download("u1", "mock-1", "https://example.com/mock-1.jpg")
            .await
            .unwrap();
        assert_eq!(receipt.download_url, "https://example.com/mock-1.jpg");
    }

    assert_eq!(svc.download_history("u1").await.unwrap().len(), 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn closed_pool_surfaces_persistence_error(pool: PgPool) {
    let store = PgActionStore::new(pool.clone());
    pool.close().await;

    assert_matches!(store.find_like("u1", "p1").await, Err(CoreError::Persistence(_)));
    assert_matches!(store.list_downloads("u1").await, Err(CoreError::Persistence(_)));
}
