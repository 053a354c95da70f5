//! Handlers for the photo gallery endpoints.
//!
//! Read endpoints are public and never fail on upstream trouble (the photo
//! service substitutes mock data). Like/download endpoints require a Bearer
//! token and surface persistence failures.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use pixgrid_core::photo::validate_term;

use crate::error::AppResult;
use crate::extract::{ValidJson, ValidQuery};
use crate::middleware::auth::AuthUser;
use crate::query::{DownloadPhotoRequest, PageParams, RandomPhotosParams, SearchPhotosParams};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// GET /photos/random
// ---------------------------------------------------------------------------

/// Random photos, optionally narrowed by a free-text query.
pub async fn random_photos(
    State(state): State<AppState>,
    ValidQuery(params): ValidQuery<RandomPhotosParams>,
) -> AppResult<impl IntoResponse> {
    let count = params.count();

    let photos = state
        .photos
        .random_photos(count, params.query.as_deref())
        .await;

    tracing::debug!(count, returned = photos.len(), "Random photos served");
    Ok(Json(DataResponse { data: photos }))
}

// ---------------------------------------------------------------------------
// GET /photos/search
// ---------------------------------------------------------------------------

/// One page of search results.
pub async fn search_photos(
    State(state): State<AppState>,
    ValidQuery(params): ValidQuery<SearchPhotosParams>,
) -> AppResult<impl IntoResponse> {
    let query = validate_term("query", &params.query)?;
    let paging = params.paging();

    let page = state
        .photos
        .search_photos(query, paging.page(), paging.per_page())
        .await;

    Ok(Json(DataResponse { data: page }))
}

// ---------------------------------------------------------------------------
// GET /photos/topic/{topic}
// ---------------------------------------------------------------------------

/// One page of photos for a topic slug.
pub async fn photos_by_topic(
    State(state): State<AppState>,
    Path(topic): Path<String>,
    ValidQuery(params): ValidQuery<PageParams>,
) -> AppResult<impl IntoResponse> {
    let topic = validate_term("topic", &topic)?;

    let page = state
        .photos
        .photos_by_topic(topic, params.page(), params.per_page())
        .await;

    Ok(Json(DataResponse { data: page }))
}

// ---------------------------------------------------------------------------
// GET /photos/detail/{id}
// ---------------------------------------------------------------------------

/// Full details for a single photo. Unknown ids (or an unreachable
/// provider) answer 404.
pub async fn photo_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let photo = state.photos.photo_by_id(&id).await?;
    Ok(Json(DataResponse { data: photo }))
}

// ---------------------------------------------------------------------------
// POST /photos/{id}/like
// ---------------------------------------------------------------------------

/// Toggle the caller's like on a photo.
pub async fn toggle_like(
    user: AuthUser,
    State(state): State<AppState>,
    Path(photo_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let toggle = state.actions.toggle_like(&user.user_id, &photo_id).await?;
    Ok(Json(DataResponse { data: toggle }))
}

// ---------------------------------------------------------------------------
// POST /photos/{id}/download
// ---------------------------------------------------------------------------

/// Record a download and echo the URL the client should fetch.
pub async fn record_download(
    user: AuthUser,
    State(state): State<AppState>,
    Path(photo_id): Path<String>,
    ValidJson(input): ValidJson<DownloadPhotoRequest>,
) -> AppResult<impl IntoResponse> {
    let receipt = state
        .actions
        .record_download(&user.user_id, &photo_id, &input.download_url)
        .await?;

    Ok(Json(DataResponse { data: receipt }))
}

// ---------------------------------------------------------------------------
// GET /photos/user/likes
// ---------------------------------------------------------------------------

/// Photos the caller has liked, newest first.
pub async fn liked_photos(
    user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let likes = state.actions.liked_photos(&user.user_id).await?;
    Ok(Json(DataResponse { data: likes }))
}

// ---------------------------------------------------------------------------
// GET /photos/user/downloads
// ---------------------------------------------------------------------------

/// The caller's download history, newest first.
pub async fn download_history(
    user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let downloads = state.actions.download_history(&user.user_id).await?;
    Ok(Json(DataResponse { data: downloads }))
}
