use std::env;

const DEFAULT_URI: &str = "mongodb://localhost:27017";
const DEFAULT_DB: &str = "bingo";

/// Connection settings for the MongoDB backend, read from the environment.
#[derive(Debug, Clone)]
pub struct MongoConfig {
    /// Connection string, from `MONGO_URI`.
    pub uri: String,
    /// Database name, from `MONGO_DB`.
    pub database_name: String,
}

impl MongoConfig {
    /// Build the configuration from `MONGO_URI` / `MONGO_DB`, falling back to
    /// a local instance and the `bingo` database.
    pub fn from_env() -> Self {
        Self {
            uri: env::var("MONGO_URI").unwrap_or_else(|_| DEFAULT_URI.into()),
            database_name: env::var("MONGO_DB").unwrap_or_else(|_| DEFAULT_DB.into()),
        }
    }
}
