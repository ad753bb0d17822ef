//! Collection statistics operations.

use mongodb::Client;
use mongodb::bson::{Document, doc};
use mongodb::error::ErrorKind;

use crate::connection::ConnectionManager;
use crate::error::{Error, Result};

impl ConnectionManager {
    /// Fetch collection stats (runs in Tokio runtime)
    ///
    /// A command rejected by the server for this collection (dropped since it
    /// was listed, a view, no privilege) surfaces as
    /// [`Error::CollectionUnavailable`]; transport failures stay [`Error::Mongo`].
    pub fn collection_stats(
        &self,
        client: &Client,
        database: &str,
        collection: &str,
    ) -> Result<Document> {
        self.runtime.block_on(async {
            let db = client.database(database);
            db.run_command(doc! { "collStats": collection })
                .await
                .map_err(|e| classify_stats_error(&format!("{database}.{collection}"), e))
        })
    }
}

fn classify_stats_error(namespace: &str, err: mongodb::error::Error) -> Error {
    match err.kind.as_ref() {
        ErrorKind::Command(command) => Error::CollectionUnavailable {
            namespace: namespace.to_string(),
            reason: format!("{} ({}): {}", command.code_name, command.code, command.message),
        },
        _ => Error::Mongo(err),
    }
}
