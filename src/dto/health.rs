use serde::Serialize;
use utoipa::ToSchema;

/// Storage backend connectivity as seen by the most recent health probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum StorageStatus {
    /// The backend answered the ping.
    Reachable,
    /// A backend is installed but the ping failed.
    Unreachable,
    /// No backend is installed; the server is running degraded.
    Disconnected,
}

/// Payload returned by the `/healthcheck` route.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// `ok`, or `degraded` while no storage backend is installed.
    pub status: String,
    /// Storage connectivity behind the status.
    pub storage: StorageStatus,
}

impl HealthResponse {
    /// Fold the degraded flag and probe result into a response.
    pub fn new(degraded: bool, storage: StorageStatus) -> Self {
        Self {
            status: if degraded { "degraded" } else { "ok" }.to_owned(),
            storage,
        }
    }
}
