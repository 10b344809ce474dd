use std::{collections::BTreeSet, sync::Arc, time::SystemTime};

use futures::{TryStreamExt, future::BoxFuture};
use mongodb::{
    Client, Collection, Database,
    bson::doc,
    options::{IndexOptions, ReturnDocument},
};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{
    config::MongoConfig,
    connection::establish_connection,
    error::{MongoDaoError, MongoResult},
    models::{
        BOARDS_COLLECTION, BoardDocument, CLEARED_COLLECTION, CellDocument, ClearedDocument,
        GAME_STATUS_COLLECTION, GAME_STATUS_KEY, LEADERBOARD_COLLECTION, LeaderboardDocument,
        TILES_COLLECTION, TileDocument, WinnerDocument,
    },
};
use crate::dao::{
    bingo_store::BingoStore,
    models::{BoardEntity, CellEntity, LeaderboardEntryEntity, RoundWinnerEntity, TileEntity},
    storage::StorageResult,
};

/// MongoDB-backed [`BingoStore`].
///
/// All timestamps are written with `$currentDate` so the database server
/// assigns them; client clocks are never trusted.
#[derive(Clone)]
pub struct MongoBingoStore {
    inner: Arc<MongoInner>,
}

struct MongoInner {
    state: RwLock<MongoState>,
    config: MongoConfig,
}

struct MongoState {
    client: Client,
    database: Database,
}

impl MongoInner {
    async fn ping(&self) -> MongoResult<()> {
        let database = {
            let guard = self.state.read().await;
            guard.database.clone()
        };

        database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|source| MongoDaoError::HealthPing { source })?;
        Ok(())
    }

    async fn reconnect(&self) -> MongoResult<()> {
        let (client, database) =
            establish_connection(&self.config.uri, &self.config.database_name).await?;
        let mut guard = self.state.write().await;
        guard.client = client;
        guard.database = database;
        Ok(())
    }
}

impl MongoBingoStore {
    /// Establish a connection to MongoDB and ensure indexes are present.
    pub async fn connect(config: MongoConfig) -> MongoResult<Self> {
        let (client, database) = establish_connection(&config.uri, &config.database_name).await?;

        let inner = Arc::new(MongoInner {
            state: RwLock::new(MongoState { client, database }),
            config,
        });

        let store = Self { inner };
        store.ensure_indexes().await?;
        Ok(store)
    }

    async fn ensure_indexes(&self) -> MongoResult<()> {
        let database = self.database().await;

        // Sorted leaderboard reads scan this collection by descending wins.
        let leaderboard = database.collection::<LeaderboardDocument>(LEADERBOARD_COLLECTION);
        let index = mongodb::IndexModel::builder()
            .keys(doc! {"wins": -1})
            .options(
                IndexOptions::builder()
                    .name(Some("leaderboard_wins_idx".to_owned()))
                    .build(),
            )
            .build();

        leaderboard
            .create_index(index)
            .await
            .map_err(|source| MongoDaoError::EnsureIndex {
                collection: LEADERBOARD_COLLECTION,
                index: "wins",
                source,
            })?;

        Ok(())
    }

    async fn database(&self) -> Database {
        let guard = self.inner.state.read().await;
        guard.database.clone()
    }

    async fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        let guard = self.inner.state.read().await;
        guard.database.collection::<T>(name)
    }

    async fn insert_tile(&self, tile: TileEntity) -> MongoResult<()> {
        let document: TileDocument = tile.into();
        self.collection::<TileDocument>(TILES_COLLECTION)
            .await
            .insert_one(&document)
            .await
            .map_err(|source| MongoDaoError::Query {
                collection: TILES_COLLECTION,
                op: "insert tile",
                source,
            })?;
        Ok(())
    }

    async fn update_tile_text(&self, id: Uuid, text: String) -> MongoResult<()> {
        let result = self
            .collection::<TileDocument>(TILES_COLLECTION)
            .await
            .update_one(
                doc! { "_id": id.to_string() },
                doc! { "$set": { "text": text } },
            )
            .await
            .map_err(|source| MongoDaoError::Query {
                collection: TILES_COLLECTION,
                op: "update tile text",
                source,
            })?;

        if result.matched_count == 0 {
            return Err(MongoDaoError::Missing {
                collection: TILES_COLLECTION,
                key: id.to_string(),
            });
        }
        Ok(())
    }

    async fn delete_tile(&self, id: Uuid) -> MongoResult<bool> {
        let result = self
            .collection::<TileDocument>(TILES_COLLECTION)
            .await
            .delete_one(doc! { "_id": id.to_string() })
            .await
            .map_err(|source| MongoDaoError::Query {
                collection: TILES_COLLECTION,
                op: "delete tile",
                source,
            })?;
        Ok(result.deleted_count > 0)
    }

    async fn list_tiles(&self) -> MongoResult<Vec<TileEntity>> {
        let documents: Vec<TileDocument> = self
            .collection::<TileDocument>(TILES_COLLECTION)
            .await
            .find(doc! {})
            .await
            .map_err(|source| MongoDaoError::Query {
                collection: TILES_COLLECTION,
                op: "list tiles",
                source,
            })?
            .try_collect()
            .await
            .map_err(|source| MongoDaoError::Query {
                collection: TILES_COLLECTION,
                op: "list tiles",
                source,
            })?;

        documents.into_iter().map(TryInto::try_into).collect()
    }

    async fn find_board(&self, player: &str) -> MongoResult<Option<BoardEntity>> {
        let document = self
            .collection::<BoardDocument>(BOARDS_COLLECTION)
            .await
            .find_one(doc! { "_id": player })
            .await
            .map_err(|source| MongoDaoError::Query {
                collection: BOARDS_COLLECTION,
                op: "load board",
                source,
            })?;

        match document {
            Some(doc) => Ok(Some(doc.into_entity()?.1)),
            None => Ok(None),
        }
    }

    async fn put_board(&self, player: String, cells: Vec<CellEntity>) -> MongoResult<BoardEntity> {
        let cell_docs: Vec<CellDocument> = cells.iter().map(Into::into).collect();
        let cells_bson =
            mongodb::bson::serialize_to_bson(&cell_docs).map_err(|source| MongoDaoError::Encode {
                collection: BOARDS_COLLECTION,
                source,
            })?;
        let marked_bson = mongodb::bson::serialize_to_bson(&[crate::state::round::FREE_CELL_INDEX as u32])
            .map_err(|source| MongoDaoError::Encode {
                collection: BOARDS_COLLECTION,
                source,
            })?;

        // One upsert replaces the whole board and stamps the server clock, so
        // a regeneration is all-or-nothing.
        let document = self
            .collection::<BoardDocument>(BOARDS_COLLECTION)
            .await
            .find_one_and_update(
                doc! { "_id": &player },
                doc! {
                    "$set": {
                        "cells": cells_bson,
                        "marked": marked_bson,
                        "has_won": false,
                    },
                    "$currentDate": { "created_at": true },
                },
            )
            .upsert(true)
            .return_document(ReturnDocument::After)
            .await
            .map_err(|source| MongoDaoError::Query {
                collection: BOARDS_COLLECTION,
                op: "save board",
                source,
            })?;

        match document {
            Some(doc) => Ok(doc.into_entity()?.1),
            None => Err(MongoDaoError::Missing {
                collection: BOARDS_COLLECTION,
                key: player,
            }),
        }
    }

    async fn patch_board_marks(
        &self,
        player: String,
        marked: BTreeSet<usize>,
        has_won: bool,
    ) -> MongoResult<()> {
        let marks: Vec<u32> = marked.into_iter().map(|index| index as u32).collect();
        let marked_bson =
            mongodb::bson::serialize_to_bson(&marks).map_err(|source| MongoDaoError::Encode {
                collection: BOARDS_COLLECTION,
                source,
            })?;

        // Marks and the win flag travel in one patch so a winning toggle is
        // persisted atomically.
        let result = self
            .collection::<BoardDocument>(BOARDS_COLLECTION)
            .await
            .update_one(
                doc! { "_id": &player },
                doc! { "$set": { "marked": marked_bson, "has_won": has_won } },
            )
            .await
            .map_err(|source| MongoDaoError::Query {
                collection: BOARDS_COLLECTION,
                op: "patch board marks",
                source,
            })?;

        if result.matched_count == 0 {
            return Err(MongoDaoError::Missing {
                collection: BOARDS_COLLECTION,
                key: player,
            });
        }
        Ok(())
    }

    async fn list_boards(&self) -> MongoResult<Vec<(String, BoardEntity)>> {
        let documents: Vec<BoardDocument> = self
            .collection::<BoardDocument>(BOARDS_COLLECTION)
            .await
            .find(doc! {})
            .await
            .map_err(|source| MongoDaoError::Query {
                collection: BOARDS_COLLECTION,
                op: "list boards",
                source,
            })?
            .try_collect()
            .await
            .map_err(|source| MongoDaoError::Query {
                collection: BOARDS_COLLECTION,
                op: "list boards",
                source,
            })?;

        documents
            .into_iter()
            .map(BoardDocument::into_entity)
            .collect()
    }

    async fn round_winner(&self) -> MongoResult<Option<RoundWinnerEntity>> {
        let document = self
            .collection::<WinnerDocument>(GAME_STATUS_COLLECTION)
            .await
            .find_one(doc! { "_id": GAME_STATUS_KEY })
            .await
            .map_err(|source| MongoDaoError::Query {
                collection: GAME_STATUS_COLLECTION,
                op: "load round winner",
                source,
            })?;

        Ok(document.map(Into::into))
    }

    async fn put_round_winner(&self, winner: String) -> MongoResult<SystemTime> {
        // Returning the updated document surfaces the server-stamped won_at,
        // so the caller broadcasts exactly what was stored.
        let document = self
            .collection::<WinnerDocument>(GAME_STATUS_COLLECTION)
            .await
            .find_one_and_update(
                doc! { "_id": GAME_STATUS_KEY },
                doc! {
                    "$set": { "winner": winner },
                    "$currentDate": { "won_at": true },
                },
            )
            .upsert(true)
            .return_document(ReturnDocument::After)
            .await
            .map_err(|source| MongoDaoError::Query {
                collection: GAME_STATUS_COLLECTION,
                op: "save round winner",
                source,
            })?;

        match document {
            Some(doc) => Ok(doc.won_at.to_system_time()),
            None => Err(MongoDaoError::Missing {
                collection: GAME_STATUS_COLLECTION,
                key: GAME_STATUS_KEY.to_owned(),
            }),
        }
    }

    async fn increment_wins(&self, player: String) -> MongoResult<()> {
        self.collection::<LeaderboardDocument>(LEADERBOARD_COLLECTION)
            .await
            .update_one(doc! { "_id": player }, doc! { "$inc": { "wins": 1 } })
            .upsert(true)
            .await
            .map_err(|source| MongoDaoError::Query {
                collection: LEADERBOARD_COLLECTION,
                op: "increment wins",
                source,
            })?;
        Ok(())
    }

    async fn list_leaderboard(&self) -> MongoResult<Vec<LeaderboardEntryEntity>> {
        let documents: Vec<LeaderboardDocument> = self
            .collection::<LeaderboardDocument>(LEADERBOARD_COLLECTION)
            .await
            .find(doc! {})
            .await
            .map_err(|source| MongoDaoError::Query {
                collection: LEADERBOARD_COLLECTION,
                op: "list leaderboard",
                source,
            })?
            .try_collect()
            .await
            .map_err(|source| MongoDaoError::Query {
                collection: LEADERBOARD_COLLECTION,
                op: "list leaderboard",
                source,
            })?;

        Ok(documents.into_iter().map(Into::into).collect())
    }

    async fn is_cleared(&self, player: &str) -> MongoResult<bool> {
        let document = self
            .collection::<ClearedDocument>(CLEARED_COLLECTION)
            .await
            .find_one(doc! { "_id": player })
            .await
            .map_err(|source| MongoDaoError::Query {
                collection: CLEARED_COLLECTION,
                op: "load suppression flag",
                source,
            })?;

        Ok(document.map(|doc| doc.cleared).unwrap_or(false))
    }

    async fn set_cleared(&self, player: String) -> MongoResult<()> {
        self.collection::<ClearedDocument>(CLEARED_COLLECTION)
            .await
            .update_one(
                doc! { "_id": player },
                doc! { "$set": { "cleared": true } },
            )
            .upsert(true)
            .await
            .map_err(|source| MongoDaoError::Query {
                collection: CLEARED_COLLECTION,
                op: "save suppression flag",
                source,
            })?;
        Ok(())
    }

    async fn reset_cleared(&self) -> MongoResult<()> {
        self.collection::<ClearedDocument>(CLEARED_COLLECTION)
            .await
            .delete_many(doc! {})
            .await
            .map_err(|source| MongoDaoError::Query {
                collection: CLEARED_COLLECTION,
                op: "reset suppression flags",
                source,
            })?;
        Ok(())
    }
}

impl BingoStore for MongoBingoStore {
    fn insert_tile(&self, tile: TileEntity) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.insert_tile(tile).await.map_err(Into::into) })
    }

    fn update_tile_text(&self, id: Uuid, text: String) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.update_tile_text(id, text).await.map_err(Into::into) })
    }

    fn delete_tile(&self, id: Uuid) -> BoxFuture<'static, StorageResult<bool>> {
        let store = self.clone();
        Box::pin(async move { store.delete_tile(id).await.map_err(Into::into) })
    }

    fn list_tiles(&self) -> BoxFuture<'static, StorageResult<Vec<TileEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.list_tiles().await.map_err(Into::into) })
    }

    fn find_board(&self, player: String) -> BoxFuture<'static, StorageResult<Option<BoardEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.find_board(&player).await.map_err(Into::into) })
    }

    fn put_board(
        &self,
        player: String,
        cells: Vec<CellEntity>,
    ) -> BoxFuture<'static, StorageResult<BoardEntity>> {
        let store = self.clone();
        Box::pin(async move { store.put_board(player, cells).await.map_err(Into::into) })
    }

    fn patch_board_marks(
        &self,
        player: String,
        marked: BTreeSet<usize>,
        has_won: bool,
    ) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .patch_board_marks(player, marked, has_won)
                .await
                .map_err(Into::into)
        })
    }

    fn list_boards(&self) -> BoxFuture<'static, StorageResult<Vec<(String, BoardEntity)>>> {
        let store = self.clone();
        Box::pin(async move { store.list_boards().await.map_err(Into::into) })
    }

    fn round_winner(&self) -> BoxFuture<'static, StorageResult<Option<RoundWinnerEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.round_winner().await.map_err(Into::into) })
    }

    fn put_round_winner(&self, winner: String) -> BoxFuture<'static, StorageResult<SystemTime>> {
        let store = self.clone();
        Box::pin(async move { store.put_round_winner(winner).await.map_err(Into::into) })
    }

    fn increment_wins(&self, player: String) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.increment_wins(player).await.map_err(Into::into) })
    }

    fn list_leaderboard(&self) -> BoxFuture<'static, StorageResult<Vec<LeaderboardEntryEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.list_leaderboard().await.map_err(Into::into) })
    }

    fn is_cleared(&self, player: String) -> BoxFuture<'static, StorageResult<bool>> {
        let store = self.clone();
        Box::pin(async move { store.is_cleared(&player).await.map_err(Into::into) })
    }

    fn set_cleared(&self, player: String) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.set_cleared(player).await.map_err(Into::into) })
    }

    fn reset_cleared(&self) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.reset_cleared().await.map_err(Into::into) })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.inner.ping().await.map_err(Into::into) })
    }

    fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.inner.reconnect().await.map_err(Into::into) })
    }
}
