use std::time::Duration;

use mongodb::{Client, Database, bson::doc, options::ClientOptions};
use tokio::time::sleep;
use tracing::{info, warn};

use super::error::{MongoDaoError, MongoResult};

const MAX_CONNECT_ATTEMPTS: u32 = 10;
const BASE_RETRY_DELAY_MS: u64 = 250;

/// Build a client for the given URI and ping the database until it answers,
/// retrying with exponential backoff.
pub async fn establish_connection(uri: &str, database_name: &str) -> MongoResult<(Client, Database)> {
    let options = ClientOptions::parse(uri)
        .await
        .map_err(|source| MongoDaoError::InvalidUri {
            uri: uri.to_owned(),
            source,
        })?;

    let client = Client::with_options(options)
        .map_err(|source| MongoDaoError::ClientConstruction { source })?;
    let database = client.database(database_name);

    let mut attempt: u32 = 0;
    loop {
        attempt += 1;

        match database.run_command(doc! { "ping": 1 }).await {
            Ok(_) => {
                if attempt > 1 {
                    info!(attempt, "connected to MongoDB after retry");
                }
                return Ok((client, database));
            }
            Err(err) if attempt < MAX_CONNECT_ATTEMPTS => {
                let backoff_multiplier = 1u64 << (attempt.saturating_sub(1).min(4));
                let wait = Duration::from_millis(BASE_RETRY_DELAY_MS * backoff_multiplier)
                    .min(Duration::from_secs(5));
                warn!(
                    attempt,
                    wait_ms = wait.as_millis(),
                    error = %err,
                    "MongoDB ping failed during initial connection; retrying"
                );
                sleep(wait).await;
            }
            Err(err) => {
                return Err(MongoDaoError::InitialPing {
                    attempts: attempt,
                    source: err,
                });
            }
        }
    }
}
