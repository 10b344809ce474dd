use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for the bingo backend.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::sse::events_stream,
        crate::routes::tiles::list_tiles,
        crate::routes::tiles::add_tile,
        crate::routes::tiles::edit_tile,
        crate::routes::tiles::delete_tile,
        crate::routes::boards::board_view,
        crate::routes::boards::generate_board,
        crate::routes::boards::toggle_cell,
        crate::routes::leaderboard::leaderboard,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::health::StorageStatus,
            crate::dto::tile::TileInput,
            crate::dto::tile::TileSummary,
            crate::dto::board::BoardView,
            crate::dto::board::BoardSummary,
            crate::dto::board::CellSummary,
            crate::dto::board::WinnerNotice,
            crate::dto::leaderboard::LeaderboardEntrySummary,
            crate::dto::sse::RoundWonEvent,
            crate::dto::sse::SystemStatus,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "tiles", description = "Shared tile pool management"),
        (name = "boards", description = "Per-player boards and cell marking"),
        (name = "leaderboard", description = "Cumulative win counts"),
        (name = "sse", description = "Server-sent events stream"),
    )
)]
pub struct ApiDoc;
