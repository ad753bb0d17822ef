//! Selection of the largest indexes across a server.

use std::cmp::Ordering;

use crate::models::{IndexSizeEntry, ServerStats};

pub const DEFAULT_TOP_N: usize = 5;

/// What happens when several indexes have exactly the same size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SizeCollision {
    /// Keep one index per distinct size: the one with the smallest
    /// `(namespace, index_name)`.
    #[default]
    OnePerSize,
    /// Keep every index; equal sizes are ordered by `(namespace, index_name)`.
    KeepAll,
}

/// How many indexes to keep and how to treat equal sizes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TopIndexOptions {
    /// `None` keeps every index
    pub limit: Option<usize>,
    pub collision: SizeCollision,
}

impl Default for TopIndexOptions {
    fn default() -> Self {
        Self { limit: Some(DEFAULT_TOP_N), collision: SizeCollision::default() }
    }
}

/// One entry per index of every collection, in database, collection and
/// index-name order.
pub fn index_entries(stats: &ServerStats) -> Vec<IndexSizeEntry> {
    stats
        .collections()
        .flat_map(|coll| {
            coll.index_sizes.iter().map(move |(name, size)| {
                IndexSizeEntry::new(coll.namespace.as_str(), name.as_str(), *size)
            })
        })
        .collect()
}

/// Largest entries first, ties broken by namespace then index name.
fn by_size_desc(a: &IndexSizeEntry, b: &IndexSizeEntry) -> Ordering {
    b.size
        .cmp(&a.size)
        .then_with(|| a.namespace.cmp(&b.namespace))
        .then_with(|| a.index_name.cmp(&b.index_name))
}

/// Pick the largest indexes according to `options`.
pub fn select_top(
    mut entries: Vec<IndexSizeEntry>,
    options: TopIndexOptions,
) -> Vec<IndexSizeEntry> {
    entries.sort_by(by_size_desc);

    if options.collision == SizeCollision::OnePerSize {
        // Sorted, so the first of each run of equal sizes is the winner.
        entries.dedup_by(|later, kept| later.size == kept.size);
    }

    if let Some(limit) = options.limit {
        entries.truncate(limit);
    }
    entries
}

/// Flatten and select in one go.
pub fn top_indexes(stats: &ServerStats, options: TopIndexOptions) -> Vec<IndexSizeEntry> {
    select_top(index_entries(stats), options)
}
