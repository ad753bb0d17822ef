//! Core ConnectionManager struct and basic connection methods.

use futures::TryStreamExt;
use mongodb::Client;
use mongodb::bson::doc;
use mongodb::results::CollectionSpecification;
use tokio::runtime::{Builder, Runtime};

use crate::error::{Error, Result};
use crate::models::ConnectionTarget;

/// Owns the runtime that drives every MongoDB call of a run.
///
/// The runtime is single-threaded and each call blocks until the driver
/// answers, so databases and collections are visited strictly in order.
pub struct ConnectionManager {
    pub(crate) runtime: Runtime,
}

impl ConnectionManager {
    /// Create a new connection manager
    pub fn new() -> Result<Self> {
        let runtime = Builder::new_current_thread().enable_all().build()?;
        Ok(Self { runtime })
    }

    /// Connect to the target and verify the server answers (and accepts our
    /// credentials) with a `ping`.
    pub fn connect(&self, target: &ConnectionTarget) -> Result<Client> {
        let options = target.client_options()?;
        self.runtime.block_on(async {
            let client = Client::with_options(options)
                .map_err(|e| Error::Connection(format!("{target}: {e}")))?;

            let ping = client.database("admin").run_command(doc! { "ping": 1 }).await;
            if let Err(e) = ping {
                client.shutdown().await;
                return Err(Error::Connection(format!("{target}: {e}")));
            }

            Ok(client)
        })
    }

    /// Close the client's pools and monitors.
    pub fn disconnect(&self, client: Client) {
        self.runtime.block_on(async move { client.shutdown().await });
    }

    /// List databases for a connected client (runs in Tokio runtime)
    pub fn list_databases(&self, client: &Client) -> Result<Vec<String>> {
        self.runtime.block_on(async {
            let mut databases = client.list_database_names().await?;
            databases.sort_unstable_by_key(|name| name.to_lowercase());
            Ok(databases)
        })
    }

    /// List collection specs in a database (runs in Tokio runtime)
    pub fn list_collection_specs(
        &self,
        client: &Client,
        database: &str,
    ) -> Result<Vec<CollectionSpecification>> {
        self.runtime.block_on(async {
            let db = client.database(database);
            let cursor = db.list_collections().await?;
            let mut specs: Vec<CollectionSpecification> = cursor.try_collect().await?;
            specs.sort_unstable_by_key(|spec| spec.name.to_lowercase());
            Ok(specs)
        })
    }
}
