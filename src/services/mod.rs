/// Board generation and per-player board views.
pub mod board_service;
/// OpenAPI documentation generation.
pub mod documentation;
/// Health check service.
pub mod health_service;
/// Cumulative win counts.
pub mod leaderboard_service;
/// Cell marking and round resolution.
pub mod round_service;
/// Server-Sent Events message generation.
pub mod sse_events;
/// Server-Sent Events broadcasting service.
pub mod sse_service;
/// Storage connection supervisor with reconnect and degraded mode.
pub mod storage_supervisor;
/// Tile pool management.
pub mod tile_service;
