//! In-memory statistics for tests that don't need a server.

#![allow(dead_code)]

use std::collections::BTreeMap;

use mongodb::bson::{Document, doc};

use mongo_index_stats::config::Settings;
use mongo_index_stats::connection::StatsSource;
use mongo_index_stats::error::{Error, Result};
use mongo_index_stats::models::{CollectionStats, ConnectionTarget};

/// Stats for `database.name` with the given index sizes; the total index
/// size is their sum.
pub fn collection(
    database: &str,
    name: &str,
    docs: u64,
    data: u64,
    indexes: &[(&str, u64)],
) -> CollectionStats {
    let index_sizes: BTreeMap<String, u64> =
        indexes.iter().map(|(n, s)| (n.to_string(), *s)).collect();
    CollectionStats {
        namespace: format!("{database}.{name}"),
        document_count: docs,
        data_size: data,
        total_index_size: index_sizes.values().sum(),
        index_sizes,
    }
}

enum FakeCollection {
    Ready(String, CollectionStats),
    /// Dropped between listing and `collStats`
    Dropped(String),
    /// Connection lost while fetching
    Lost(String),
}

impl FakeCollection {
    fn name(&self) -> &str {
        match self {
            FakeCollection::Ready(name, _)
            | FakeCollection::Dropped(name)
            | FakeCollection::Lost(name) => name,
        }
    }
}

/// A server made of canned collection stats, listed in insertion order.
#[derive(Default)]
pub struct FakeSource {
    databases: Vec<(String, Vec<FakeCollection>)>,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    fn db_mut(&mut self, database: &str) -> &mut Vec<FakeCollection> {
        if let Some(index) = self.databases.iter().position(|(name, _)| name == database) {
            return &mut self.databases[index].1;
        }
        self.databases.push((database.to_string(), Vec::new()));
        &mut self.databases.last_mut().expect("just pushed").1
    }

    /// Add an empty database.
    pub fn database(mut self, database: &str) -> Self {
        self.db_mut(database);
        self
    }

    pub fn with(mut self, database: &str, name: &str, stats: CollectionStats) -> Self {
        self.db_mut(database).push(FakeCollection::Ready(name.to_string(), stats));
        self
    }

    /// Convenience around [`collection`].
    pub fn collection(
        self,
        database: &str,
        name: &str,
        docs: u64,
        data: u64,
        indexes: &[(&str, u64)],
    ) -> Self {
        let stats = collection(database, name, docs, data, indexes);
        self.with(database, name, stats)
    }

    pub fn dropped(mut self, database: &str, name: &str) -> Self {
        self.db_mut(database).push(FakeCollection::Dropped(name.to_string()));
        self
    }

    pub fn lost(mut self, database: &str, name: &str) -> Self {
        self.db_mut(database).push(FakeCollection::Lost(name.to_string()));
        self
    }
}

impl StatsSource for FakeSource {
    fn database_names(&self) -> Result<Vec<String>> {
        Ok(self.databases.iter().map(|(name, _)| name.clone()).collect())
    }

    fn collection_names(&self, database: &str) -> Result<Vec<String>> {
        Ok(self
            .databases
            .iter()
            .find(|(name, _)| name == database)
            .map(|(_, colls)| colls.iter().map(|c| c.name().to_string()).collect())
            .unwrap_or_default())
    }

    fn collection_stats(&self, database: &str, collection: &str) -> Result<CollectionStats> {
        let found = self
            .databases
            .iter()
            .find(|(name, _)| name == database)
            .and_then(|(_, colls)| colls.iter().find(|c| c.name() == collection));

        match found {
            Some(FakeCollection::Ready(_, stats)) => Ok(stats.clone()),
            Some(FakeCollection::Lost(_)) => Err(Error::Connection("connection reset".into())),
            Some(FakeCollection::Dropped(_)) | None => Err(Error::CollectionUnavailable {
                namespace: format!("{database}.{collection}"),
                reason: "NamespaceNotFound (26): ns not found".into(),
            }),
        }
    }
}

/// Settings for a remote host so no RAM samples are expected.
pub fn settings() -> Settings {
    Settings::for_target(ConnectionTarget::new("db.example.net", 27017), |_| None)
        .expect("default settings")
}

/// A `collStats` reply shaped like a MongoDB 7.0 answer.
pub fn coll_stats_reply(ns: &str, count: i32, size: i64, indexes: &[(&str, i32)]) -> Document {
    let mut index_sizes = Document::new();
    for (name, bytes) in indexes {
        index_sizes.insert(*name, *bytes);
    }
    let total: i32 = indexes.iter().map(|(_, bytes)| bytes).sum();
    doc! {
        "ns": ns,
        "count": count,
        "size": size,
        "storageSize": 4096_i32,
        "nindexes": indexes.len() as i32,
        "totalIndexSize": total,
        "indexSizes": index_sizes,
        "ok": 1.0,
    }
}
