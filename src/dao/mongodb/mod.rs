mod config;
mod connection;
mod error;
mod models;
mod store;

pub use config::MongoConfig;
pub use error::{MongoDaoError, MongoResult};
pub use store::MongoBingoStore;
