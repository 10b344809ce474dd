use std::convert::Infallible;

use axum::{Router, extract::State, response::sse::Sse, routing::get};
use futures::Stream;
use tracing::info;

use crate::{
    services::{sse_events, sse_service},
    state::SharedState,
};

#[utoipa::path(
    get,
    path = "/sse/events",
    tag = "sse",
    responses((status = 200, description = "Shared event stream", content_type = "text/event-stream", body = String))
)]
/// Stream realtime game events to connected sessions.
pub async fn events_stream(
    State(state): State<SharedState>,
) -> Sse<impl Stream<Item = Result<axum::response::sse::Event, Infallible>>> {
    let receiver = sse_service::subscribe(&state);
    info!("New SSE connection");
    sse_events::broadcast_info(&state, "event stream connected");
    sse_service::to_sse_stream(receiver)
}

/// Configure the SSE endpoint.
pub fn router() -> Router<SharedState> {
    Router::<SharedState>::new().route("/sse/events", get(events_stream))
}
