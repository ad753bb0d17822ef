//! Aggregation of collection statistics and top-index selection.

pub mod aggregator;
pub mod naming;
pub mod top_indexes;

pub use aggregator::{DatabaseFilter, aggregate};
pub use naming::{DEFAULT_SHARD_PREFIX, NameTransformer};
pub use top_indexes::{
    DEFAULT_TOP_N, SizeCollision, TopIndexOptions, index_entries, select_top, top_indexes,
};
