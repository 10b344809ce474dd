/// Storage trait implemented by every persistence backend.
pub mod bingo_store;
/// Persistence entities shared across layers.
pub mod models;
/// Backend-agnostic storage errors.
pub mod storage;

#[cfg(feature = "mongo-store")]
/// MongoDB implementation of the storage trait.
pub mod mongodb;

#[cfg(test)]
pub mod memory;
