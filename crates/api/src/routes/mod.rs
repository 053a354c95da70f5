pub mod health;
pub mod photos;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /photos/random                 random photos (public)
/// /photos/search                 search (public)
/// /photos/topic/{topic}          topic browsing (public)
/// /photos/detail/{id}            photo detail (public)
/// /photos/{id}/like              toggle like (requires auth)
/// /photos/{id}/download          record download (requires auth)
/// /photos/user/likes             liked photos (requires auth)
/// /photos/user/downloads         download history (requires auth)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/photos", photos::router())
}
