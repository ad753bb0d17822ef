// Statistics records gathered during a single sampling run

use std::collections::BTreeMap;

use mongodb::bson::{Bson, Document};

/// Size statistics for one collection, as reported by `collStats`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CollectionStats {
    /// Fully qualified `database.collection`
    pub namespace: String,
    pub document_count: u64,
    pub data_size: u64,
    pub total_index_size: u64,
    /// Index name -> size in bytes
    pub index_sizes: BTreeMap<String, u64>,
}

impl CollectionStats {
    /// Build stats from a `collStats` reply.
    ///
    /// Missing or non-numeric fields read as zero so a partial reply never
    /// aborts aggregation.
    pub fn from_document(database: &str, collection: &str, doc: &Document) -> Self {
        let namespace = match doc.get_str("ns") {
            Ok(ns) if !ns.is_empty() => ns.to_string(),
            _ => format!("{database}.{collection}"),
        };

        for key in ["count", "size", "totalIndexSize", "indexSizes"] {
            if !doc.contains_key(key) {
                log::debug!("collStats for {namespace} has no `{key}` field, reading as zero");
            }
        }

        let index_sizes = doc
            .get_document("indexSizes")
            .map(|sizes| {
                sizes
                    .iter()
                    .map(|(name, value)| (name.clone(), bson_to_u64(value).unwrap_or(0)))
                    .collect()
            })
            .unwrap_or_default();

        Self {
            namespace,
            document_count: read_u64(doc, "count"),
            data_size: read_u64(doc, "size"),
            total_index_size: read_u64(doc, "totalIndexSize"),
            index_sizes,
        }
    }
}

/// Running totals across every collection of a run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SummaryStats {
    pub document_count: u64,
    pub data_size: u64,
    pub total_index_size: u64,
}

impl SummaryStats {
    pub fn add(&mut self, stats: &CollectionStats) {
        self.document_count = self.document_count.saturating_add(stats.document_count);
        self.data_size = self.data_size.saturating_add(stats.data_size);
        self.total_index_size = self.total_index_size.saturating_add(stats.total_index_size);
    }
}

/// Collections fetched for one database, in enumeration order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DatabaseStats {
    pub name: String,
    pub collections: Vec<CollectionStats>,
}

impl DatabaseStats {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), collections: Vec::new() }
    }
}

/// Everything gathered from one server during a run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ServerStats {
    pub summary: SummaryStats,
    pub databases: Vec<DatabaseStats>,
    /// Collections that disappeared or refused `collStats` and were left out
    pub skipped: usize,
}

impl ServerStats {
    pub fn collection_count(&self) -> usize {
        self.databases.iter().map(|db| db.collections.len()).sum()
    }

    pub fn collections(&self) -> impl Iterator<Item = &CollectionStats> {
        self.databases.iter().flat_map(|db| db.collections.iter())
    }
}

/// One index and the storage it occupies.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexSizeEntry {
    pub namespace: String,
    pub index_name: String,
    pub size: u64,
}

impl IndexSizeEntry {
    pub fn new(namespace: impl Into<String>, index_name: impl Into<String>, size: u64) -> Self {
        Self { namespace: namespace.into(), index_name: index_name.into(), size }
    }
}

fn read_u64(doc: &Document, key: &str) -> u64 {
    doc.get(key).and_then(bson_to_u64).unwrap_or(0)
}

fn bson_to_u64(value: &Bson) -> Option<u64> {
    match value {
        Bson::Int32(v) if *v >= 0 => Some(*v as u64),
        Bson::Int64(v) if *v >= 0 => Some(*v as u64),
        Bson::Double(v) if *v >= 0.0 => Some(*v as u64),
        _ => None,
    }
}
