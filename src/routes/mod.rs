use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{services::documentation::ApiDoc, state::SharedState};

pub mod boards;
pub mod health;
pub mod leaderboard;
pub mod sse;
pub mod tiles;

/// Compose all route trees, wiring in shared state and the Swagger UI.
pub fn router(state: SharedState) -> Router<()> {
    let api_router = health::router()
        .merge(sse::router())
        .merge(tiles::router())
        .merge(boards::router())
        .merge(leaderboard::router());

    let swagger: Router<()> = SwaggerUi::new("/docs")
        .url("/api-doc/openapi.json", ApiDoc::openapi())
        .into();

    api_router.with_state(state).merge(swagger)
}
