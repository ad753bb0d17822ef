// Data structures and types

pub mod connection;
pub mod stats;

pub use connection::{ConnectionTarget, Credentials, DEFAULT_HOST, DEFAULT_PORT};
pub use stats::{CollectionStats, DatabaseStats, IndexSizeEntry, ServerStats, SummaryStats};
