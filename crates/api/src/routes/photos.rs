//! Route definitions for the photo gallery.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::photos;
use crate::state::AppState;

/// Photo routes mounted at `/photos`.
///
/// ```text
/// GET  /random           -> random_photos      (?count=&query=)
/// GET  /search           -> search_photos      (?query=&page=&perPage=)
/// GET  /topic/{topic}    -> photos_by_topic    (?page=&perPage=)
/// GET  /detail/{id}      -> photo_detail
/// POST /{id}/like        -> toggle_like        (auth)
/// POST /{id}/download    -> record_download    (auth)
/// GET  /user/likes       -> liked_photos       (auth)
/// GET  /user/downloads   -> download_history   (auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/random", get(photos::random_photos))
        .route("/search", get(photos::search_photos))
        .route("/topic/{topic}", get(photos::photos_by_topic))
        .route("/detail/{id}", get(photos::photo_detail))
        .route("/{id}/like", post(photos::toggle_like))
        .route("/{id}/download", post(photos::record_download))
        .route("/user/likes", get(photos::liked_photos))
        .route("/user/downloads", get(photos::download_history))
}
