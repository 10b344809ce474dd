//! Keeps a storage backend installed, reconnecting with backoff and
//! toggling degraded mode while the database is unreachable.

use std::{future::Future, sync::Arc, time::Duration};

use tokio::time::sleep;
use tracing::{info, warn};

use crate::{
    dao::{bingo_store::BingoStore, storage::StorageError},
    state::SharedState,
};

const INITIAL_DELAY: Duration = Duration::from_millis(1_000);
const MAX_DELAY: Duration = Duration::from_secs(10);
const HEALTH_POLL_INTERVAL: Duration = Duration::from_secs(5);
const MAX_RECONNECT_ATTEMPTS: u32 = 3;

/// Connect to the storage backend and supervise it until the process exits.
pub async fn run<F, Fut>(state: SharedState, mut connect: F)
where
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = Result<Arc<dyn BingoStore>, StorageError>> + Send,
{
    let mut delay = INITIAL_DELAY;

    loop {
        let store = match connect().await {
            Ok(store) => store,
            Err(err) => {
                warn!(error = %err, "storage connection attempt failed");
                sleep(delay).await;
                delay = (delay * 2).min(MAX_DELAY);
                continue;
            }
        };

        state.install_store(store.clone()).await;
        info!("storage connection established; leaving degraded mode");
        delay = INITIAL_DELAY;

        supervise(&state, store).await;

        // Reconnects exhausted: drop the handle and start over from scratch.
        state.clear_store().await;
        warn!("exhausted storage reconnect attempts; rebuilding connection");
    }
}

/// Poll the backend's health, attempting in-place reconnects on failure.
/// Returns once the reconnect budget is spent.
async fn supervise(state: &SharedState, store: Arc<dyn BingoStore>) {
    loop {
        sleep(HEALTH_POLL_INTERVAL).await;

        match store.health_check().await {
            Ok(()) => {
                if state.is_degraded() {
                    info!("storage healthy again; leaving degraded mode");
                    state.update_degraded(false);
                }
            }
            Err(err) => {
                warn!(error = %err, "storage health check failed; entering degraded mode");
                state.update_degraded(true);

                if !try_reconnect(&store).await {
                    return;
                }
                info!("storage reconnection succeeded");
                state.update_degraded(false);
            }
        }
    }
}

async fn try_reconnect(store: &Arc<dyn BingoStore>) -> bool {
    let mut backoff = INITIAL_DELAY;

    for attempt in 1..=MAX_RECONNECT_ATTEMPTS {
        match store.try_reconnect().await {
            Ok(()) => return true,
            Err(err) => {
                warn!(attempt, error = %err, "storage reconnect attempt failed");
                sleep(backoff).await;
                backoff = (backoff * 2).min(MAX_DELAY);
            }
        }
    }

    false
}
