pub mod round;
mod sse;

use std::sync::Arc;

use tokio::sync::{RwLock, watch};

use crate::{config::AppConfig, dao::bingo_store::BingoStore, error::ServiceError};

pub use self::sse::SseHub;

pub type SharedState = Arc<AppState>;

const SSE_CHANNEL_CAPACITY: usize = 16;

/// Central application state: the installed storage backend, the SSE hub,
/// the degraded-mode flag, and the loaded configuration.
pub struct AppState {
    store: RwLock<Option<Arc<dyn BingoStore>>>,
    sse: SseHub,
    degraded: watch::Sender<bool>,
    config: AppConfig,
}

impl AppState {
    /// Construct a new [`AppState`] wrapped in an [`Arc`] so it can be cloned cheaply.
    ///
    /// The application starts in degraded mode until a storage backend is installed.
    pub fn new(config: AppConfig) -> SharedState {
        let (degraded_tx, _rx) = watch::channel(true);
        Arc::new(Self {
            store: RwLock::new(None),
            sse: SseHub::new(SSE_CHANNEL_CAPACITY),
            degraded: degraded_tx,
            config,
        })
    }

    /// Obtain a handle to the storage backend, failing while degraded.
    pub async fn require_store(&self) -> Result<Arc<dyn BingoStore>, ServiceError> {
        let guard = self.store.read().await;
        guard.as_ref().cloned().ok_or(ServiceError::Degraded)
    }

    /// Install a storage backend and leave degraded mode.
    pub async fn install_store(&self, store: Arc<dyn BingoStore>) {
        {
            let mut guard = self.store.write().await;
            *guard = Some(store);
        }
        self.update_degraded(false);
    }

    /// Remove the storage backend and enter degraded mode.
    pub async fn clear_store(&self) {
        {
            let mut guard = self.store.write().await;
            guard.take();
        }
        self.update_degraded(true);
    }

    /// Current degraded flag.
    pub fn is_degraded(&self) -> bool {
        *self.degraded.borrow()
    }

    /// Update the degraded flag, notifying watchers only on a change.
    pub fn update_degraded(&self, value: bool) {
        self.degraded.send_if_modified(|current| {
            if *current != value {
                *current = value;
                true
            } else {
                false
            }
        });
    }

    /// Subscribe to degraded mode updates.
    pub fn degraded_watcher(&self) -> watch::Receiver<bool> {
        self.degraded.subscribe()
    }

    /// Broadcast hub used for the public SSE stream.
    pub fn sse(&self) -> &SseHub {
        &self.sse
    }

    /// Immutable runtime configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}
