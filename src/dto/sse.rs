use serde::Serialize;
use utoipa::ToSchema;

#[derive(Clone, Debug)]
/// Dispatched payload carried across the SSE channel.
pub struct ServerEvent {
    pub event: Option<String>,
    pub data: String,
}

impl ServerEvent {
    /// Convenience wrapper that serialises `payload` into the SSE data field.
    pub fn json<E, T>(event: E, payload: &T) -> serde_json::Result<Self>
    where
        E: Into<Option<String>>,
        T: Serialize,
    {
        Ok(Self {
            event: event.into(),
            data: serde_json::to_string(payload)?,
        })
    }

    /// Build a plain-text event without JSON serialisation.
    pub fn new<E>(event: E, data: String) -> Self
    where
        E: Into<Option<String>>,
    {
        Self {
            event: event.into(),
            data,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
/// Broadcast when a player completes a bingo line.
pub struct RoundWonEvent {
    /// Name of the winner.
    pub winner: String,
    /// When the win was recorded, RFC3339.
    pub won_at: String,
}

#[derive(Debug, Serialize, ToSchema)]
/// Broadcast when the backend enters or leaves degraded mode.
pub struct SystemStatus {
    pub degraded: bool,
}
