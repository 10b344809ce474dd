use tracing::warn;

use crate::{
    dto::health::{HealthResponse, StorageStatus},
    state::SharedState,
};

/// Probe the storage backend and report overall health.
///
/// The probe result is advisory; the degraded flag owned by the supervisor
/// decides the top-level status, so a single flaky ping here never flips the
/// server into degraded mode on its own.
pub async fn health_status(state: &SharedState) -> HealthResponse {
    let storage = match state.require_store().await {
        Ok(store) => match store.health_check().await {
            Ok(()) => StorageStatus::Reachable,
            Err(err) => {
                warn!(error = %err, "storage ping failed during health probe");
                StorageStatus::Unreachable
            }
        },
        Err(_) => StorageStatus::Disconnected,
    };

    HealthResponse::new(state.is_degraded(), storage)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        config::AppConfig,
        dao::{bingo_store::BingoStore, memory::MemoryStore},
        state::AppState,
    };

    #[tokio::test]
    async fn reports_degraded_until_a_store_is_installed() {
        let state = AppState::new(AppConfig::default());

        let health = health_status(&state).await;
        assert_eq!(health.status, "degraded");
        assert_eq!(health.storage, StorageStatus::Disconnected);

        let store: Arc<dyn BingoStore> = Arc::new(MemoryStore::default());
        state.install_store(store).await;

        let health = health_status(&state).await;
        assert_eq!(health.status, "ok");
        assert_eq!(health.storage, StorageStatus::Reachable);
    }
}
