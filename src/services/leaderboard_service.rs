//! Cumulative win counts, incremented once per won round.

use std::sync::Arc;

use crate::{
    dao::bingo_store::BingoStore, dto::leaderboard::LeaderboardEntrySummary, error::ServiceError,
    state::SharedState,
};

/// Add one win for the player, creating the entry at 1.
///
/// Callers must only invoke this on the transition into a won round; the
/// round service's one-way win rule guarantees at most one call per round.
pub async fn record_win(store: &Arc<dyn BingoStore>, player: &str) -> Result<(), ServiceError> {
    store.increment_wins(player.to_owned()).await?;
    Ok(())
}

/// All leaderboard entries, most wins first, ties by player name.
pub async fn list_sorted(
    state: &SharedState,
) -> Result<Vec<LeaderboardEntrySummary>, ServiceError> {
    let store = state.require_store().await?;
    let mut entries = store.list_leaderboard().await?;
    entries.sort_by(|a, b| b.wins.cmp(&a.wins).then_with(|| a.player.cmp(&b.player)));
    Ok(entries.into_iter().map(Into::into).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::AppConfig, dao::memory::MemoryStore, state::AppState};

    #[tokio::test]
    async fn sorted_by_wins_then_name() {
        let state = AppState::new(AppConfig::default());
        let store: Arc<dyn BingoStore> = Arc::new(MemoryStore::default());
        state.install_store(store.clone()).await;

        for _ in 0..3 {
            record_win(&store, "theo").await.unwrap();
        }
        record_win(&store, "mia").await.unwrap();
        record_win(&store, "katie").await.unwrap();

        let entries = list_sorted(&state).await.unwrap();
        let ranked: Vec<(&str, u64)> = entries
            .iter()
            .map(|entry| (entry.player.as_str(), entry.wins))
            .collect();
        assert_eq!(ranked, vec![("theo", 3), ("katie", 1), ("mia", 1)]);
    }
}
