//! Periodic removal of stale photo cache entries.
//!
//! Reads already ignore entries older than the TTL; this task only reclaims
//! their memory so keys that are never requested again do not accumulate.

use std::sync::Arc;
use std::time::Duration;

use pixgrid_core::cache::ResponseCache;
use tokio_util::sync::CancellationToken;

/// Run the sweep loop until `cancel` is triggered.
///
/// Every `every`, entries older than `ttl` are dropped from `cache`.
pub async fn run(
    cache: Arc<ResponseCache>,
    ttl: Duration,
    every: Duration,
    cancel: CancellationToken,
) {
    tracing::info!(
        interval_secs = every.as_secs(),
        ttl_secs = ttl.as_secs(),
        "Photo cache sweeper started"
    );

    let mut interval = tokio::time::interval(every);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Photo cache sweeper stopping");
                break;
            }
            _ = interval.tick() => {
                let removed = cache.sweep_expired(ttl).await;
                if removed > 0 {
                    let remaining = cache.len().await;
                    tracing::info!(removed, remaining, "Photo cache: swept stale entries");
                } else {
                    tracing::debug!("Photo cache: nothing to sweep");
                }
            }
        }
    }
}
