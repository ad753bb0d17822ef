//! Read access to server statistics, behind a trait so aggregation can run
//! against a live server or an in-memory fixture.

use mongodb::Client;
use mongodb::results::CollectionType;

use crate::connection::ConnectionManager;
use crate::error::Result;
use crate::models::CollectionStats;

/// Everything the aggregator needs from a server.
pub trait StatsSource {
    /// Names of every database on the server.
    fn database_names(&self) -> Result<Vec<String>>;

    /// Names of the collections in `database` that carry storage statistics.
    fn collection_names(&self, database: &str) -> Result<Vec<String>>;

    /// Current size statistics of one collection.
    ///
    /// Fails with [`crate::error::Error::CollectionUnavailable`] when the
    /// collection cannot be statted any more.
    fn collection_stats(&self, database: &str, collection: &str) -> Result<CollectionStats>;
}

/// [`StatsSource`] backed by a connected driver client.
pub struct MongoSource<'a> {
    manager: &'a ConnectionManager,
    client: &'a Client,
}

impl<'a> MongoSource<'a> {
    pub fn new(manager: &'a ConnectionManager, client: &'a Client) -> Self {
        Self { manager, client }
    }
}

impl StatsSource for MongoSource<'_> {
    fn database_names(&self) -> Result<Vec<String>> {
        self.manager.list_databases(self.client)
    }

    fn collection_names(&self, database: &str) -> Result<Vec<String>> {
        let specs = self.manager.list_collection_specs(self.client, database)?;
        Ok(specs
            .into_iter()
            .filter(|spec| {
                let is_view = matches!(spec.collection_type, CollectionType::View);
                if is_view {
                    log::debug!("Skipping view {database}.{}", spec.name);
                }
                !is_view
            })
            .map(|spec| spec.name)
            .collect())
    }

    fn collection_stats(&self, database: &str, collection: &str) -> Result<CollectionStats> {
        let reply = self.manager.collection_stats(self.client, database, collection)?;
        Ok(CollectionStats::from_document(database, collection, &reply))
    }
}
