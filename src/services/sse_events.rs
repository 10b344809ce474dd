//! Typed constructors for the events pushed onto the shared SSE stream.

use std::time::SystemTime;

use serde::Serialize;
use tracing::warn;

use crate::{
    dto::{
        format_system_time,
        sse::{RoundWonEvent, ServerEvent, SystemStatus},
    },
    state::SharedState,
};

const EVENT_ROUND_WON: &str = "round.won";
const EVENT_SYSTEM_STATUS: &str = "system.status";
const EVENT_INFO: &str = "info";

/// Broadcast a round win to every connected session. Each session decides
/// locally whether to surface the banner, based on its own suppression flag.
pub fn broadcast_round_won(state: &SharedState, winner: &str, won_at: SystemTime) {
    let payload = RoundWonEvent {
        winner: winner.to_owned(),
        won_at: format_system_time(won_at),
    };
    send_event(state, EVENT_ROUND_WON, &payload);
}

/// Broadcast a degraded-mode change.
pub fn broadcast_system_status(state: &SharedState, degraded: bool) {
    send_event(state, EVENT_SYSTEM_STATUS, &SystemStatus { degraded });
}

/// Send a human-readable info message onto the stream.
pub fn broadcast_info(state: &SharedState, message: &str) {
    state.sse().broadcast(ServerEvent::new(
        Some(EVENT_INFO.to_string()),
        message.to_string(),
    ));
}

/// Forward degraded-mode changes from the watch channel onto the SSE stream
/// for as long as the application state is alive.
pub async fn watch_degraded(state: SharedState) {
    let mut watcher = state.degraded_watcher();
    loop {
        let degraded = *watcher.borrow_and_update();
        broadcast_system_status(&state, degraded);
        if watcher.changed().await.is_err() {
            break;
        }
    }
}

fn send_event<T: Serialize>(state: &SharedState, name: &str, payload: &T) {
    match ServerEvent::json(Some(name.to_string()), payload) {
        Ok(event) => state.sse().broadcast(event),
        Err(err) => warn!(event = name, error = %err, "failed to serialise SSE event"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::AppConfig, state::AppState};

    #[tokio::test]
    async fn degraded_flips_are_forwarded_to_the_stream() {
        let state = AppState::new(AppConfig::default());
        let mut events = state.sse().subscribe();
        tokio::spawn(watch_degraded(state.clone()));

        // The watcher first reports the boot state: degraded until storage.
        let event = events.recv().await.unwrap();
        assert_eq!(event.event.as_deref(), Some(EVENT_SYSTEM_STATUS));
        let payload: serde_json::Value = serde_json::from_str(&event.data).unwrap();
        assert_eq!(payload["degraded"], true);

        state.update_degraded(false);
        let event = events.recv().await.unwrap();
        assert_eq!(event.event.as_deref(), Some(EVENT_SYSTEM_STATUS));
        let payload: serde_json::Value = serde_json::from_str(&event.data).unwrap();
        assert_eq!(payload["degraded"], false);
    }
}
