//! MongoDB connection management and operations.
//!
//! This module provides:
//! - `ConnectionManager`: runtime ownership, connect/disconnect and listing
//! - `ops`: statistics commands
//! - `source`: the `StatsSource` seam the aggregator reads through

pub mod manager;
pub mod ops;
pub mod source;

pub use manager::ConnectionManager;
pub use source::{MongoSource, StatsSource};
